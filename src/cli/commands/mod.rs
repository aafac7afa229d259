//! CLI command implementations.

pub mod interactive;
pub mod lookup;
pub mod providers;
