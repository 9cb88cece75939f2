//! Configuration loading and env substitution.
//!
//! Config files: `waypoint.toml`, `waypoint.yaml`, or `waypoint.json`
//! Searched in `./` then `~/.config/waypoint/`.
//!
//! Supports `${ENV_VAR}` and `${ENV_VAR:-default}` substitution in the raw
//! file before parsing.

pub mod env_subst;
pub mod loader;
pub mod schema;

pub use {
    loader::{
        config_dir, data_dir, discover_and_load, find_config_file, load_config, set_config_dir,
        set_data_dir,
    },
    schema::{DEFAULT_DAEMON_URL, DaemonConfig, DirectoryConfig, StorageConfig, WaypointConfig},
};
