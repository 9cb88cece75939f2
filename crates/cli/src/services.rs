//! Wires config and flags into the directory, store and navigator.

use std::{path::PathBuf, sync::Arc};

use {
    tracing::{debug, warn},
    waypoint_config::WaypointConfig,
    waypoint_context::{
        InMemoryKeyValueStore, KeyValueStore, Navigator, PathContext, TomlKeyValueStore,
    },
    waypoint_directory::{DaemonDirectory, ProjectDirectory, TomlProjectDirectory},
    waypoint_routing::ProjectResolver,
};

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub daemon_url: Option<String>,
    pub projects_file: Option<PathBuf>,
    pub state_file: Option<PathBuf>,
}

pub struct Services {
    pub resolver: ProjectResolver,
    pub store: Arc<dyn KeyValueStore>,
    pub navigator: Navigator,
}

impl Services {
    pub fn build(config: &WaypointConfig, overrides: Overrides) -> anyhow::Result<Self> {
        let directory = build_directory(config, &overrides)?;
        let store = build_store(config, &overrides);
        let resolver = ProjectResolver::new(directory);
        let navigator = Navigator::new(PathContext::new(resolver.clone(), store.clone()));
        Ok(Self {
            resolver,
            store,
            navigator,
        })
    }
}

fn build_directory(
    config: &WaypointConfig,
    overrides: &Overrides,
) -> anyhow::Result<Arc<dyn ProjectDirectory>> {
    let projects_file = overrides
        .projects_file
        .clone()
        .or_else(|| config.directory.projects_file.clone());
    if let Some(path) = projects_file {
        debug!(path = %path.display(), "using projects file");
        return Ok(Arc::new(TomlProjectDirectory::new(path)));
    }

    let url = overrides
        .daemon_url
        .as_deref()
        .unwrap_or(&config.daemon.url);
    debug!(url, "using project daemon");
    Ok(Arc::new(DaemonDirectory::new(url)?))
}

fn build_store(config: &WaypointConfig, overrides: &Overrides) -> Arc<dyn KeyValueStore> {
    match overrides.state_file.clone().or_else(|| config.state_file()) {
        Some(path) => Arc::new(TomlKeyValueStore::new(path)),
        None => {
            warn!("no data directory available, last project will not be remembered");
            Arc::new(InMemoryKeyValueStore::default())
        },
    }
}
