//! Client for the project daemon's HTTP API.
//!
//! - `GET /api/projects` lists projects; the filter maps to the
//!   `organizationSlug`, `ungroupedOnly` and `includeStale` query parameters.
//! - `GET /api/projects/initialized?path=` answers `{ "initialized": bool }`.

use std::path::Path;

use {
    async_trait::async_trait,
    reqwest::Client,
    serde::{Deserialize, de::DeserializeOwned},
    tracing::debug,
    url::Url,
};

use crate::{
    Error, ProjectDirectory, Result,
    types::{ProjectFilter, ProjectInfo},
};

#[derive(Debug, Deserialize)]
struct InitializedResponse {
    initialized: bool,
}

/// [`ProjectDirectory`] talking to a running daemon.
#[derive(Debug, Clone)]
pub struct DaemonDirectory {
    client: Client,
    base_url: Url,
}

impl DaemonDirectory {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let mut url = Url::parse(base_url).map_err(|source| Error::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        // `Url::join` replaces the last segment unless the base ends in `/`.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self {
            client,
            base_url: url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|source| Error::InvalidUrl {
                url: format!("{}{path}", self.base_url),
                source,
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(url = %url, "querying project daemon");

        let resp = self
            .client
            .get(url.as_str())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| Error::request(url.as_str(), source))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        resp.json()
            .await
            .map_err(|source| Error::external("failed to parse project daemon response", source))
    }
}

fn listing_url(mut url: Url, filter: &ProjectFilter) -> Url {
    {
        let mut query = url.query_pairs_mut();
        if let Some(slug) = &filter.organization_slug {
            query.append_pair("organizationSlug", slug);
        }
        if filter.ungrouped_only {
            query.append_pair("ungroupedOnly", "true");
        }
        if filter.include_stale {
            query.append_pair("includeStale", "true");
        }
    }
    // Drop the dangling `?` left behind when no pair was appended.
    if url.query() == Some("") {
        url.set_query(None);
    }
    url
}

#[async_trait]
impl ProjectDirectory for DaemonDirectory {
    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<ProjectInfo>> {
        let url = listing_url(self.endpoint("api/projects")?, filter);
        let mut projects: Vec<ProjectInfo> = self.get_json(url).await?;
        for project in &mut projects {
            project.fill_display_path();
        }
        debug!(count = projects.len(), "received project listing");
        Ok(projects)
    }

    async fn is_initialized(&self, path: &Path) -> Result<bool> {
        let mut url = self.endpoint("api/projects/initialized")?;
        url.query_pairs_mut()
            .append_pair("path", &path.to_string_lossy());
        let resp: InitializedResponse = self.get_json(url).await?;
        Ok(resp.initialized)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, mockito::Matcher};

    #[test]
    fn base_url_gets_trailing_slash() {
        let directory = DaemonDirectory::new("http://127.0.0.1:7420/daemon").unwrap();
        assert_eq!(directory.base_url().as_str(), "http://127.0.0.1:7420/daemon/");
        assert_eq!(
            directory.endpoint("api/projects").unwrap().as_str(),
            "http://127.0.0.1:7420/daemon/api/projects"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = DaemonDirectory::new("not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }

    #[test]
    fn listing_url_omits_unset_filters() {
        let base = Url::parse("http://localhost/api/projects").unwrap();
        assert_eq!(
            listing_url(base.clone(), &ProjectFilter::default()).as_str(),
            "http://localhost/api/projects"
        );
        let filter = ProjectFilter {
            organization_slug: Some("acme".into()),
            ungrouped_only: false,
            include_stale: true,
        };
        assert_eq!(
            listing_url(base, &filter).as_str(),
            "http://localhost/api/projects?organizationSlug=acme&includeStale=true"
        );
    }

    // ── HTTP integration tests (with mockito) ──────────────────────────

    #[tokio::test]
    async fn list_projects_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/projects")
            .match_query(Matcher::UrlEncoded("ungroupedOnly".into(), "true".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!([
                    { "path": "/srv/scratch", "name": "scratch", "initialized": true },
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let directory = DaemonDirectory::new(&server.url()).unwrap();
        let projects = directory
            .list_projects(&ProjectFilter::ungrouped())
            .await
            .unwrap();

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "scratch");
        assert!(projects[0].organization_slug.is_none());
        assert!(!projects[0].display_path.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn list_projects_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/projects")
            .with_status(503)
            .with_body("daemon starting")
            .create_async()
            .await;

        let directory = DaemonDirectory::new(&server.url()).unwrap();
        let err = directory
            .list_projects(&ProjectFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Status { status: 503, .. }));
        assert!(err.to_string().contains("daemon starting"));
    }

    #[tokio::test]
    async fn list_projects_bad_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/projects")
            .with_status(200)
            .with_body("{\"not\": \"a list\"}")
            .create_async()
            .await;

        let directory = DaemonDirectory::new(&server.url()).unwrap();
        let err = directory
            .list_projects(&ProjectFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::External { .. }));
    }

    #[tokio::test]
    async fn is_initialized_sends_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/projects/initialized")
            .match_query(Matcher::UrlEncoded("path".into(), "/srv/my widget".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"initialized": true}"#)
            .create_async()
            .await;

        let directory = DaemonDirectory::new(&server.url()).unwrap();
        assert!(
            directory
                .is_initialized(Path::new("/srv/my widget"))
                .await
                .unwrap()
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unreachable_daemon_is_a_request_error() {
        // Port 9 (discard) on localhost is not expected to run an HTTP server.
        let directory = DaemonDirectory::new("http://127.0.0.1:9").unwrap();
        let err = directory
            .list_projects(&ProjectFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Request { .. }));
    }
}
