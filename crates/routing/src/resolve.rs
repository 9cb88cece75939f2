use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use {
    serde::Serialize,
    tracing::{debug, warn},
    waypoint_directory::{ProjectDirectory, ProjectFilter, ProjectInfo},
};

use crate::{
    Error, ProjectLookup, Result,
    location::ProjectRef,
    sentinel,
};

/// A project located in the directory, addressable both ways.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResolution {
    /// `None` exactly when the project has no organization.
    pub org_slug: Option<String>,
    pub project_name: String,
    pub project_path: PathBuf,
    pub initialized: bool,
    pub display_path: String,
}

impl ProjectResolution {
    fn from_info(info: &ProjectInfo) -> Self {
        Self {
            org_slug: info.organization_slug.clone(),
            project_name: info.name.clone(),
            project_path: info.path.clone(),
            initialized: info.initialized,
            display_path: info.display_path.clone(),
        }
    }

    pub fn project_ref(&self) -> ProjectRef {
        ProjectRef::new(self.org_slug.as_deref(), self.project_name.clone())
    }

    pub fn link(&self, page: &str) -> String {
        crate::links::build_project_link(self.org_slug.as_deref(), &self.project_name, page)
    }
}

/// An organization slug that is reserved as a first URL segment has no
/// canonical link: the sentinel reads as "ungrouped", page keywords and the
/// bookmark prefix read as other routes.
fn has_conflicting_org(info: &ProjectInfo) -> bool {
    info.organization_slug
        .as_deref()
        .is_some_and(sentinel::is_reserved_org)
}

/// Maps `(org, project)` to absolute paths and back.
///
/// Every call performs exactly one directory listing; nothing is cached.
#[derive(Clone)]
pub struct ProjectResolver {
    directory: Arc<dyn ProjectDirectory>,
}

impl ProjectResolver {
    pub fn new(directory: Arc<dyn ProjectDirectory>) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &Arc<dyn ProjectDirectory> {
        &self.directory
    }

    async fn listing(&self, lookup: &ProjectLookup) -> Result<Vec<ProjectInfo>> {
        debug!(lookup = %lookup, "listing projects for resolution");
        self.directory
            .list_projects(&ProjectFilter::default())
            .await
            .map_err(|source| Error::unavailable(lookup.clone(), source))
    }

    pub async fn resolve(&self, project: &ProjectRef) -> Result<ProjectResolution> {
        self.resolve_by_name(project.org_slug.as_deref(), &project.project_name)
            .await
    }

    /// Find the single project named `project_name` in `org_slug`
    /// (`None` = ungrouped). Zero or several matches are not-found.
    pub async fn resolve_by_name(
        &self,
        org_slug: Option<&str>,
        project_name: &str,
    ) -> Result<ProjectResolution> {
        // A sentinel slug handed in directly still means "ungrouped".
        let org_slug = org_slug.filter(|slug| !sentinel::is_ungrouped_segment(slug));
        let lookup = ProjectLookup::ByName(ProjectRef::new(org_slug, project_name));
        let projects = self.listing(&lookup).await?;

        let mut candidates = Vec::new();
        for info in projects.iter().filter(|p| p.name == project_name) {
            if has_conflicting_org(info) {
                warn!(
                    project = %info.name,
                    org = info.organization_slug.as_deref().unwrap_or_default(),
                    path = %info.path.display(),
                    "organization slug is a reserved URL segment, ignoring"
                );
                continue;
            }
            if info.organization_slug.as_deref() == org_slug {
                candidates.push(info);
            }
        }

        match candidates.as_slice() {
            [info] => {
                debug!(lookup = %lookup, path = %info.path.display(), "resolved project");
                Ok(ProjectResolution::from_info(info))
            },
            [] => Err(Error::NotFound(lookup)),
            many => {
                warn!(lookup = %lookup, matches = many.len(), "ambiguous project name");
                Err(Error::NotFound(lookup))
            },
        }
    }

    /// Inverse mapping: find the project at exactly `path`.
    pub async fn resolve_by_path(&self, path: &Path) -> Result<ProjectResolution> {
        let lookup = ProjectLookup::ByPath(path.to_path_buf());
        let projects = self.listing(&lookup).await?;

        let Some(info) = projects.iter().find(|p| p.is_at(path)) else {
            return Err(Error::NotFound(lookup));
        };
        if has_conflicting_org(info) {
            warn!(
                org = info.organization_slug.as_deref().unwrap_or_default(),
                path = %info.path.display(),
                "organization slug is a reserved URL segment, project has no canonical URL"
            );
            return Err(Error::NotFound(lookup));
        }
        Ok(ProjectResolution::from_info(info))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::location::parse_location,
        waypoint_directory::InMemoryDirectory,
    };

    fn listing() -> Vec<ProjectInfo> {
        vec![
            ProjectInfo::new("/srv/acme/widget", "widget")
                .with_organization("acme")
                .initialized(true),
            ProjectInfo::new("/home/ada/widget", "widget"),
            ProjectInfo::new("/srv/beta/gadget", "gadget").with_organization("beta"),
            ProjectInfo::new("/srv/gamma/gadget", "gadget").with_organization("gamma"),
        ]
    }

    fn resolver_with(projects: Vec<ProjectInfo>) -> (Arc<InMemoryDirectory>, ProjectResolver) {
        let directory = Arc::new(InMemoryDirectory::new(projects));
        let resolver = ProjectResolver::new(directory.clone());
        (directory, resolver)
    }

    #[tokio::test]
    async fn resolves_by_organization_and_name() {
        let (directory, resolver) = resolver_with(listing());
        let res = resolver.resolve_by_name(Some("acme"), "widget").await.unwrap();
        assert_eq!(res.org_slug.as_deref(), Some("acme"));
        assert_eq!(res.project_path, PathBuf::from("/srv/acme/widget"));
        assert!(res.initialized);
        assert_eq!(directory.list_calls(), 1);
    }

    #[tokio::test]
    async fn ungrouped_lookup_only_matches_ungrouped() {
        let (_, resolver) = resolver_with(listing());
        let res = resolver.resolve_by_name(None, "widget").await.unwrap();
        assert_eq!(res.org_slug, None);
        assert_eq!(res.project_path, PathBuf::from("/home/ada/widget"));
    }

    #[tokio::test]
    async fn same_name_in_other_organizations_is_not_found() {
        let (_, resolver) = resolver_with(listing());
        let err = resolver.resolve_by_name(None, "gadget").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            err.lookup(),
            &ProjectLookup::ByName(ProjectRef::ungrouped("gadget"))
        );
    }

    #[tokio::test]
    async fn duplicate_names_in_one_organization_are_not_found() {
        let (_, resolver) = resolver_with(vec![
            ProjectInfo::new("/a/widget", "widget").with_organization("acme"),
            ProjectInfo::new("/b/widget", "widget").with_organization("acme"),
        ]);
        let err = resolver.resolve_by_name(Some("acme"), "widget").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn resolves_by_path() {
        let (directory, resolver) = resolver_with(listing());
        let res = resolver
            .resolve_by_path(Path::new("/srv/beta/gadget/"))
            .await
            .unwrap();
        assert_eq!(res.org_slug.as_deref(), Some("beta"));
        assert_eq!(res.project_name, "gadget");
        assert_eq!(directory.list_calls(), 1);

        let err = resolver
            .resolve_by_path(Path::new("/srv/missing"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn round_trip_through_link() {
        let (_, resolver) = resolver_with(listing());
        for org in [None, Some("acme")] {
            let first = resolver.resolve_by_name(org, "widget").await.unwrap();
            let link = first.link("issues");
            let parsed = parse_location(&link);
            let again = resolver.resolve(parsed.project().unwrap()).await.unwrap();
            assert_eq!(again.project_path, first.project_path, "{link}");
            assert_eq!(again.org_slug.as_deref(), org);
        }
    }

    #[tokio::test]
    async fn directory_failure_is_not_not_found() {
        let directory = Arc::new(InMemoryDirectory::unavailable());
        let resolver = ProjectResolver::new(directory);

        let err = resolver.resolve_by_name(Some("acme"), "widget").await.unwrap_err();
        assert!(matches!(err, Error::DirectoryUnavailable { .. }));
        assert!(!err.is_not_found());
        assert!(err.to_string().starts_with("failed to resolve project acme/widget"));

        let err = resolver.resolve_by_path(Path::new("/srv")).await.unwrap_err();
        assert!(matches!(err, Error::DirectoryUnavailable { .. }));
    }

    #[tokio::test]
    async fn sentinel_named_organization_prefers_ungrouped_reading() {
        let (_, resolver) = resolver_with(vec![
            ProjectInfo::new("/odd/widget", "widget").with_organization("_"),
            ProjectInfo::new("/home/ada/widget", "widget"),
        ]);
        let res = resolver.resolve_by_name(None, "widget").await.unwrap();
        assert_eq!(res.project_path, PathBuf::from("/home/ada/widget"));

        let res = resolver.resolve_by_name(Some("_"), "widget").await.unwrap();
        assert_eq!(res.project_path, PathBuf::from("/home/ada/widget"));

        let err = resolver
            .resolve_by_path(Path::new("/odd/widget"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn sentinel_named_organization_alone_is_not_found() {
        let (_, resolver) = resolver_with(vec![
            ProjectInfo::new("/odd/widget", "widget").with_organization("_"),
        ]);
        let err = resolver.resolve_by_name(None, "widget").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn keyword_named_organizations_have_no_canonical_url() {
        let (_, resolver) = resolver_with(vec![
            ProjectInfo::new("/srv/docs/widget", "widget").with_organization("docs"),
            ProjectInfo::new("/srv/by-path/gadget", "gadget").with_organization("by-path"),
        ]);

        let err = resolver
            .resolve_by_name(Some("docs"), "widget")
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        for path in ["/srv/docs/widget", "/srv/by-path/gadget"] {
            let err = resolver.resolve_by_path(Path::new(path)).await.unwrap_err();
            assert!(err.is_not_found(), "{path}");
        }
    }

    #[tokio::test]
    async fn resolved_links_always_parse_back_to_the_project() {
        let (_, resolver) = resolver_with(vec![
            ProjectInfo::new("/srv/acme/widget", "widget").with_organization("acme"),
            ProjectInfo::new("/srv/issues/widget", "widget").with_organization("issues"),
        ]);
        let res = resolver
            .resolve_by_path(Path::new("/srv/acme/widget"))
            .await
            .unwrap();
        let location = parse_location(&res.link("issues"));
        assert_eq!(location.project(), Some(&res.project_ref()));
    }
}
