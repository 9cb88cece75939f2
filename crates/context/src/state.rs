use std::path::Path;

use {
    serde::Serialize,
    waypoint_routing::{ProjectRef, ProjectResolution},
};

/// Current project state, derived from the location.
///
/// Exactly one variant holds at a time. A new value is published on every
/// transition; the watch channel never sees a partial update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum PathState {
    /// No org/project in the URL: cross-project views.
    Aggregate,
    Loading {
        project: ProjectRef,
    },
    Resolved {
        resolution: ProjectResolution,
    },
    NotFound {
        project: ProjectRef,
        message: String,
    },
    /// The directory could not be asked; retrying may help.
    Unavailable {
        project: ProjectRef,
        message: String,
    },
}

impl PathState {
    /// URL-level identity of the project this state is about.
    pub fn project(&self) -> Option<ProjectRef> {
        match self {
            Self::Aggregate => None,
            Self::Loading { project }
            | Self::NotFound { project, .. }
            | Self::Unavailable { project, .. } => Some(project.clone()),
            Self::Resolved { resolution } => Some(resolution.project_ref()),
        }
    }

    pub fn resolution(&self) -> Option<&ProjectResolution> {
        match self {
            Self::Resolved { resolution } => Some(resolution),
            _ => None,
        }
    }

    /// Absolute path of the resolved project; empty when none is selected.
    pub fn project_path(&self) -> &Path {
        self.resolution()
            .map_or(Path::new(""), |resolution| resolution.project_path.as_path())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Whether entering `project` again would reuse this state instead of
    /// starting a new lookup.
    pub(crate) fn covers(&self, project: &ProjectRef) -> bool {
        match self {
            Self::Loading { project: current } => current == project,
            Self::Resolved { resolution } => {
                resolution.org_slug == project.org_slug
                    && resolution.project_name == project.project_name
            },
            Self::Aggregate | Self::NotFound { .. } | Self::Unavailable { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::path::PathBuf};

    fn resolved() -> PathState {
        PathState::Resolved {
            resolution: ProjectResolution {
                org_slug: Some("acme".into()),
                project_name: "widget".into(),
                project_path: PathBuf::from("/srv/widget"),
                initialized: true,
                display_path: "/srv/widget".into(),
            },
        }
    }

    #[test]
    fn aggregate_has_empty_project_path() {
        assert_eq!(PathState::Aggregate.project_path(), Path::new(""));
        assert_eq!(PathState::Aggregate.project(), None);
    }

    #[test]
    fn loading_exposes_request_without_path() {
        let state = PathState::Loading {
            project: ProjectRef::new(Some("acme"), "widget"),
        };
        assert_eq!(state.project(), Some(ProjectRef::new(Some("acme"), "widget")));
        assert_eq!(state.project_path(), Path::new(""));
        assert!(state.is_loading());
    }

    #[test]
    fn resolved_exposes_path() {
        let state = resolved();
        assert_eq!(state.project_path(), Path::new("/srv/widget"));
        assert!(state.covers(&ProjectRef::new(Some("acme"), "widget")));
        assert!(!state.covers(&ProjectRef::ungrouped("widget")));
    }

    #[test]
    fn failures_do_not_cover_their_project() {
        let project = ProjectRef::ungrouped("widget");
        let state = PathState::Unavailable {
            project: project.clone(),
            message: "daemon down".into(),
        };
        assert!(!state.covers(&project));
    }
}
