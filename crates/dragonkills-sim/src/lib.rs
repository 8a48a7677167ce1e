//! Command-line simulation of a Green Dragon encounter.

pub mod encounter;
pub mod error;
pub mod settings;
