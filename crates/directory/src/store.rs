use std::{
    fs,
    path::{Path, PathBuf},
};

use {async_trait::async_trait, tracing::debug};

use crate::{
    ProjectDirectory,
    error::{Context, Result},
    types::{ProjectFilter, ProjectInfo},
};

#[derive(Debug, serde::Deserialize, Default)]
struct TomlFile {
    #[serde(default)]
    projects: Vec<ProjectInfo>,
}

/// Serves the project listing from a TOML file of `[[projects]]` tables.
///
/// The file is re-read on every call so edits show up without a restart.
/// A missing file is an empty directory.
pub struct TomlProjectDirectory {
    path: PathBuf,
}

impl TomlProjectDirectory {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_file(&self) -> Result<TomlFile> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "projects file missing, listing is empty");
            return Ok(TomlFile::default());
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let mut file: TomlFile = toml::from_str(&data)?;
        for project in &mut file.projects {
            project.fill_display_path();
        }
        Ok(file)
    }
}

#[async_trait]
impl ProjectDirectory for TomlProjectDirectory {
    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<ProjectInfo>> {
        let projects = self
            .read_file()?
            .projects
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect();
        Ok(projects)
    }

    async fn is_initialized(&self, path: &Path) -> Result<bool> {
        Ok(self
            .read_file()?
            .projects
            .iter()
            .find(|p| p.is_at(path))
            .is_some_and(|p| p.initialized))
    }
}
