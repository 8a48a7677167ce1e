//! Command and query handlers of the dragon kills module.

pub mod command_handlers;
pub mod query_handlers;
