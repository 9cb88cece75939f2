//! Canonical URL construction.
//!
//! This is the only module that emits the ungrouped sentinel.

use std::{borrow::Cow, path::Path};

use crate::{
    location::ProjectRef,
    sentinel::{self, BOOKMARK_SEGMENT},
};

pub(crate) fn encode_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}

fn project_prefix(org_slug: Option<&str>, project_name: &str) -> String {
    format!(
        "/{}/{}",
        encode_segment(sentinel::encode_org(org_slug)),
        encode_segment(project_name)
    )
}

/// `/{org or sentinel}/{project}`; the form that redirects to the default page.
pub(crate) fn build_project_root_link(project: &ProjectRef) -> String {
    project_prefix(project.org_slug.as_deref(), &project.project_name)
}

/// `/{org or sentinel}/{project}/{page}`
pub fn build_project_link(org_slug: Option<&str>, project_name: &str, page: &str) -> String {
    build_project_sub_link(org_slug, project_name, page, &[])
}

/// `/{org or sentinel}/{project}/{page}/{subpath...}`
pub fn build_project_sub_link(
    org_slug: Option<&str>,
    project_name: &str,
    page: &str,
    subpath: &[&str],
) -> String {
    let mut url = project_prefix(org_slug, project_name);
    url.push('/');
    url.push_str(&encode_segment(page));
    for segment in subpath.iter().filter(|s| !s.is_empty()) {
        url.push('/');
        url.push_str(&encode_segment(segment));
    }
    url
}

/// Prefix a page-relative path with the current project, if any.
///
/// Outside a project (aggregate views) the path is returned unchanged apart
/// from a leading `/`. `path` is taken as already URL-encoded.
pub fn build_contextual_link(project: Option<&ProjectRef>, path: &str) -> String {
    let relative = path.trim_start_matches('/');
    match project {
        Some(project) if relative.is_empty() => build_project_root_link(project),
        Some(project) => format!("{}/{relative}", build_project_root_link(project)),
        None => format!("/{relative}"),
    }
}

/// `/by-path/{absolute path}`, the bookmark form that redirects to the
/// canonical project URL.
pub fn build_bookmark_link(path: &Path) -> String {
    let mut url = format!("/{BOOKMARK_SEGMENT}");
    for segment in path
        .to_string_lossy()
        .split(['/', '\\'])
        .filter(|s| !s.is_empty())
    {
        url.push('/');
        url.push_str(&encode_segment(segment));
    }
    url
}
