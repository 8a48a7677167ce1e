//! Dragon Kills Core: host engine contract.
//!
//! This crate defines the models and traits a content module sees of the
//! game engine: characters, scenes, viewpoints, events, repositories and
//! clocks. It contains no storage or battle code.

pub mod battle;
pub mod character;
pub mod clock;
pub mod contracts;
pub mod error;
pub mod event;
pub mod game;
pub mod module;
pub mod property;
pub mod repository;
pub mod rng;
pub mod scene;
pub mod template;
pub mod viewpoint;
