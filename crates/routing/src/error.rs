use std::{fmt, path::PathBuf};

use crate::location::ProjectRef;

/// What a resolution was asked to find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectLookup {
    ByName(ProjectRef),
    ByPath(PathBuf),
}

impl fmt::Display for ProjectLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByName(project) => write!(f, "{project}"),
            Self::ByPath(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolution failures. The two kinds are never conflated: a missing project
/// is final for that URL, an unreachable directory may succeed on retry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("project not found: {0}")]
    NotFound(ProjectLookup),
    #[error("failed to resolve project {lookup}: {source}")]
    DirectoryUnavailable {
        lookup: ProjectLookup,
        #[source]
        source: waypoint_directory::Error,
    },
}

impl Error {
    #[must_use]
    pub fn unavailable(lookup: ProjectLookup, source: waypoint_directory::Error) -> Self {
        Self::DirectoryUnavailable { lookup, source }
    }

    pub fn lookup(&self) -> &ProjectLookup {
        match self {
            Self::NotFound(lookup) | Self::DirectoryUnavailable { lookup, .. } => lookup,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
