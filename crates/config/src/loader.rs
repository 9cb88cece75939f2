use std::{
    path::{Path, PathBuf},
    sync::RwLock,
};

use tracing::{debug, warn};

use crate::{env_subst::substitute_env, schema::WaypointConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "waypoint.toml",
    "waypoint.yaml",
    "waypoint.yml",
    "waypoint.json",
];

/// File name of the key-value state file inside the data directory.
const STATE_FILENAME: &str = "state.toml";

static CONFIG_DIR_OVERRIDE: RwLock<Option<PathBuf>> = RwLock::new(None);
static DATA_DIR_OVERRIDE: RwLock<Option<PathBuf>> = RwLock::new(None);

/// Use `dir` instead of the platform config directory.
pub fn set_config_dir(dir: PathBuf) {
    if let Ok(mut guard) = CONFIG_DIR_OVERRIDE.write() {
        *guard = Some(dir);
    }
}

/// Use `dir` instead of the platform data directory.
pub fn set_data_dir(dir: PathBuf) {
    if let Ok(mut guard) = DATA_DIR_OVERRIDE.write() {
        *guard = Some(dir);
    }
}

fn read_override(lock: &RwLock<Option<PathBuf>>) -> Option<PathBuf> {
    lock.read().ok().and_then(|guard| guard.clone())
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "waypoint")
}

/// Returns the user-global config directory (`~/.config/waypoint/`), or the
/// override set with [`set_config_dir`].
pub fn config_dir() -> Option<PathBuf> {
    read_override(&CONFIG_DIR_OVERRIDE)
        .or_else(|| project_dirs().map(|d| d.config_dir().to_path_buf()))
}

/// Returns the user data directory, or the override set with
/// [`set_data_dir`].
pub fn data_dir() -> Option<PathBuf> {
    read_override(&DATA_DIR_OVERRIDE).or_else(|| project_dirs().map(|d| d.data_dir().to_path_buf()))
}

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> anyhow::Result<WaypointConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./waypoint.{toml,yaml,yml,json}` (project-local)
/// 2. `<config dir>/waypoint.{toml,yaml,yml,json}` (user-global)
///
/// Returns `WaypointConfig::default()` if no config file is found or the
/// one found does not parse.
pub fn discover_and_load() -> WaypointConfig {
    let Some(path) = find_config_file() else {
        debug!("no config file found, using defaults");
        return WaypointConfig::default();
    };

    debug!(path = %path.display(), "loading config");
    match load_config(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            WaypointConfig::default()
        },
    }
}

/// Find the first config file in standard locations.
pub fn find_config_file() -> Option<PathBuf> {
    let mut dirs = vec![PathBuf::from(".")];
    dirs.extend(config_dir());
    find_config_file_in(&dirs)
}

fn find_config_file_in(dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter()
        .flat_map(|dir| CONFIG_FILENAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

impl WaypointConfig {
    /// Configured state file, falling back to `state.toml` in the data
    /// directory.
    pub fn state_file(&self) -> Option<PathBuf> {
        self.storage
            .state_file
            .clone()
            .or_else(|| data_dir().map(|dir| dir.join(STATE_FILENAME)))
    }
}

fn parse_config(raw: &str, path: &Path) -> anyhow::Result<WaypointConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported config format: .{ext}"),
    }
}
