//! Shared helpers used across all waypoint crates.

pub mod error;
pub mod paths;

pub use error::FromMessage;
