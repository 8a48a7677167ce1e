//! Scenes contributed by the module.

pub mod dragon_scene;
