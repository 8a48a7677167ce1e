//! In-memory reference host.
//!
//! Implements the engine contract from `dragonkills-core` with in-process
//! stores so that modules can be driven end to end without a database.
//! Characters can only take actions from the viewpoint last shown to them.

pub mod bus;
pub mod fight;
pub mod host;
pub mod records;
pub mod render;
pub mod rng;
pub mod scenes;
pub mod templates;
pub mod time;

pub use host::Host;
