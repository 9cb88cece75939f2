//! Config schema types.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the project daemon listens unless configured otherwise.
pub const DEFAULT_DAEMON_URL: &str = "http://127.0.0.1:7420";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaypointConfig {
    pub daemon: DaemonConfig,
    pub directory: DirectoryConfig,
    pub storage: StorageConfig,
}

/// Connection to the project daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// Base URL; API paths are joined onto it.
    pub url: String,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DAEMON_URL.into(),
        }
    }
}

/// Project listing source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Read projects from this TOML file instead of asking the daemon.
    pub projects_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Key-value file holding the last visited project. Defaults to
    /// `state.toml` in the data directory.
    pub state_file: Option<PathBuf>,
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_daemon() {
        let config = WaypointConfig::default();
        assert_eq!(config.daemon.url, DEFAULT_DAEMON_URL);
        assert_eq!(config.directory.projects_file, None);
        assert_eq!(config.storage.state_file, None);
    }

    #[test]
    fn partial_tables_keep_defaults() {
        let config: WaypointConfig = toml::from_str(
            r#"
            [storage]
            state_file = "/tmp/waypoint/state.toml"
            "#,
        )
        .unwrap();
        assert_eq!(config.daemon.url, DEFAULT_DAEMON_URL);
        assert_eq!(
            config.storage.state_file,
            Some(PathBuf::from("/tmp/waypoint/state.toml"))
        );
    }
}
