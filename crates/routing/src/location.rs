use std::{borrow::Cow, fmt, path::PathBuf};

use {serde::Serialize, url::Url};

use crate::{
    dispatch::Route,
    links,
    page::Page,
    sentinel::{self, BOOKMARK_SEGMENT},
};

/// URL-level project identity, before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRef {
    /// `None` for ungrouped projects.
    pub org_slug: Option<String>,
    pub project_name: String,
}

impl ProjectRef {
    pub fn new(org_slug: Option<&str>, project_name: impl Into<String>) -> Self {
        Self {
            org_slug: org_slug.map(str::to_string),
            project_name: project_name.into(),
        }
    }

    pub fn ungrouped(project_name: impl Into<String>) -> Self {
        Self::new(None, project_name)
    }

    pub fn link(&self, page: &str) -> String {
        links::build_project_link(self.org_slug.as_deref(), &self.project_name, page)
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.org_slug {
            Some(org) => write!(f, "{org}/{}", self.project_name),
            None => write!(f, "{} (ungrouped)", self.project_name),
        }
    }
}

/// A parsed URL path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// `/`
    Root,
    /// Cross-project page: `/{page}[/...]`. The keyword may be unknown.
    Aggregate { page: String, rest: Vec<String> },
    /// `/{org}/{project}[/{page}[/...]]`
    Project {
        project: ProjectRef,
        page: Option<String>,
        rest: Vec<String>,
    },
    /// `/by-path/{absolute path}`
    PathBookmark { path: PathBuf },
}

impl Location {
    pub fn project(&self) -> Option<&ProjectRef> {
        match self {
            Self::Project { project, .. } => Some(project),
            Self::Root | Self::Aggregate { .. } | Self::PathBookmark { .. } => None,
        }
    }

    /// The part the dispatcher reads. Root and bookmarks are handled before
    /// dispatch and have no route.
    pub fn route(&self) -> Option<Route<'_>> {
        match self {
            Self::Aggregate { page, rest } => Some(Route {
                project: None,
                page: Some(page),
                rest,
            }),
            Self::Project {
                project,
                page,
                rest,
            } => Some(Route {
                project: Some(project),
                page: page.as_deref(),
                rest,
            }),
            Self::Root | Self::PathBookmark { .. } => None,
        }
    }

    /// Canonical URL for this location.
    pub fn to_url(&self) -> String {
        match self {
            Self::Root => "/".to_string(),
            Self::Aggregate { page, rest } => {
                let mut url = format!("/{}", links::encode_segment(page));
                for segment in rest {
                    url.push('/');
                    url.push_str(&links::encode_segment(segment));
                }
                url
            },
            Self::Project {
                project,
                page: None,
                ..
            } => links::build_project_root_link(project),
            Self::Project {
                project,
                page: Some(page),
                rest,
            } => {
                let rest: Vec<&str> = rest.iter().map(String::as_str).collect();
                links::build_project_sub_link(
                    project.org_slug.as_deref(),
                    &project.project_name,
                    page,
                    &rest,
                )
            },
            Self::PathBookmark { path } => links::build_bookmark_link(path),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url())
    }
}

fn path_of(raw: &str) -> Cow<'_, str> {
    if raw.contains("://")
        && let Ok(url) = Url::parse(raw)
    {
        return Cow::Owned(url.path().to_string());
    }
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    Cow::Borrowed(&raw[..end])
}

fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| segment.to_string())
}

/// Parse a URL (full or path-only) into a [`Location`].
///
/// Empty segments are ignored, so `//acme//widget/` equals `/acme/widget`.
/// A reserved page keyword in first position marks an aggregate URL; a lone
/// unknown segment is an aggregate URL with an unknown page.
pub fn parse_location(raw: &str) -> Location {
    let path = path_of(raw);
    let segments: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(decode_segment)
        .collect();

    let mut iter = segments.into_iter();
    let Some(first) = iter.next() else {
        return Location::Root;
    };

    if first == BOOKMARK_SEGMENT {
        let rest: Vec<String> = iter.collect();
        return Location::PathBookmark {
            path: PathBuf::from(format!("/{}", rest.join("/"))),
        };
    }

    if Page::from_keyword(&first).is_some() {
        return Location::Aggregate {
            page: first,
            rest: iter.collect(),
        };
    }

    let Some(project_name) = iter.next() else {
        return Location::Aggregate {
            page: first,
            rest: Vec::new(),
        };
    };

    Location::Project {
        project: ProjectRef {
            org_slug: sentinel::decode_org(&first),
            project_name,
        },
        page: iter.next(),
        rest: iter.collect(),
    }
}
