use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Entity counts reported alongside a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectCounts {
    pub issues: u64,
    pub docs: u64,
}

/// One entry of the directory listing.
///
/// `path` is the project's canonical identity. An absent
/// `organization_slug` means the project is ungrouped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub path: PathBuf,
    pub name: String,
    #[serde(default)]
    pub organization_slug: Option<String>,
    #[serde(default)]
    pub initialized: bool,
    #[serde(default)]
    pub favorite: bool,
    /// The project's path no longer exists on disk.
    #[serde(default)]
    pub stale: bool,
    #[serde(default)]
    pub counts: ProjectCounts,
    /// Home-relative rendering of `path`. Filled in by the directory client
    /// when the source leaves it empty.
    #[serde(default)]
    pub display_path: String,
}

impl ProjectInfo {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        let path = path.into();
        let display_path = waypoint_common::paths::display_path(&path);
        Self {
            path,
            name: name.into(),
            organization_slug: None,
            initialized: false,
            favorite: false,
            stale: false,
            counts: ProjectCounts::default(),
            display_path,
        }
    }

    #[must_use]
    pub fn with_organization(mut self, slug: impl Into<String>) -> Self {
        self.organization_slug = Some(slug.into());
        self
    }

    #[must_use]
    pub fn initialized(mut self, initialized: bool) -> Self {
        self.initialized = initialized;
        self
    }

    pub(crate) fn fill_display_path(&mut self) {
        if self.display_path.is_empty() {
            self.display_path = waypoint_common::paths::display_path(&self.path);
        }
    }

    pub fn is_at(&self, path: &Path) -> bool {
        self.path == path
    }
}

/// Listing filter understood by every directory implementation.
///
/// The default filter returns every non-stale project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectFilter {
    pub organization_slug: Option<String>,
    pub ungrouped_only: bool,
    pub include_stale: bool,
}

impl ProjectFilter {
    pub fn organization(slug: impl Into<String>) -> Self {
        Self {
            organization_slug: Some(slug.into()),
            ..Self::default()
        }
    }

    pub fn ungrouped() -> Self {
        Self {
            ungrouped_only: true,
            ..Self::default()
        }
    }

    pub fn matches(&self, project: &ProjectInfo) -> bool {
        if project.stale && !self.include_stale {
            return false;
        }
        if self.ungrouped_only && project.organization_slug.is_some() {
            return false;
        }
        match &self.organization_slug {
            Some(slug) => project.organization_slug.as_deref() == Some(slug.as_str()),
            None => true,
        }
    }
}
