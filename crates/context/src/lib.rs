//! URL-driven project context and navigation for waypoint.
//!
//! [`PathContext`] holds the current project state derived from the
//! location and owns the resolution lifecycle. [`Navigator`] is the single
//! executor that turns a URL into a rendered view, following at most one
//! redirect. The last resolved project path is kept in a [`KeyValueStore`]
//! for "continue where I left off" landings on `/`.

pub mod context;
pub mod error;
pub mod navigator;
pub mod state;
pub mod store;

pub use {
    context::{PathContext, PendingResolution},
    error::{Error, Result},
    navigator::{Navigation, Navigator},
    state::PathState,
    store::{
        InMemoryKeyValueStore, KeyValueStore, LAST_PROJECT_KEY, TomlKeyValueStore,
        forget_last_project, read_last_project, write_last_project,
    },
};
