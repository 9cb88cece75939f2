//! Project directory access for waypoint.
//!
//! The directory is the external daemon that owns the authoritative list of
//! tracked projects and their absolute paths. This crate exposes it through
//! the [`ProjectDirectory`] trait with three implementations: the daemon's
//! HTTP API, a TOML file for offline use, and an in-memory list for tests.

pub mod error;
pub mod http;
pub mod memory;
pub mod store;
pub mod types;

use std::path::Path;

use async_trait::async_trait;

pub use {
    error::{Error, Result},
    http::DaemonDirectory,
    memory::InMemoryDirectory,
    store::TomlProjectDirectory,
    types::{ProjectCounts, ProjectFilter, ProjectInfo},
};

/// Read-only access to the project listing.
///
/// Implementations must not cache across calls: every `list_projects` call
/// reflects the directory's current state.
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<ProjectInfo>>;
    async fn is_initialized(&self, path: &Path) -> Result<bool>;
}
