//! Domain types of the dragon kills module.

pub mod character_ext;
pub mod dragon_kill;
