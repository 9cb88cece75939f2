use std::path::Path;

use {
    serde::Serialize,
    tracing::{debug, info, warn},
    waypoint_routing::{DEFAULT_PAGE, Dispatch, Location, View, dispatch, parse_location},
};

use crate::{Error, Result, context::PathContext, state::PathState, store};

/// Outcome of a single navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    /// URL the navigation started from.
    pub requested: String,
    /// URL that was finally rendered.
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirected_from: Option<String>,
    pub view: View,
    pub state: PathState,
}

/// Turns URLs into views, driving a [`PathContext`] on the way.
#[derive(Clone)]
pub struct Navigator {
    context: PathContext,
}

impl Navigator {
    pub fn new(context: PathContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &PathContext {
        &self.context
    }

    /// Navigate to `url`, following at most one redirect.
    pub async fn navigate(&self, url: &str) -> Result<Navigation> {
        let mut current = url.to_string();
        let mut redirected_from: Option<String> = None;

        loop {
            let location = parse_location(&current);
            match self.step(&location).await {
                Dispatch::Render { view } => {
                    debug!(url = %current, ?view, "rendering");
                    return Ok(Navigation {
                        requested: url.to_string(),
                        url: current,
                        redirected_from,
                        view,
                        state: self.context.state().as_ref().clone(),
                    });
                },
                Dispatch::Redirect { to } => {
                    if redirected_from.is_some() {
                        return Err(Error::RedirectLimit { from: current, to });
                    }
                    info!(from = %current, to = %to, "redirecting");
                    redirected_from = Some(std::mem::replace(&mut current, to));
                },
            }
        }
    }

    async fn step(&self, location: &Location) -> Dispatch {
        match location {
            Location::Root => {
                self.context.enter(location);
                self.landing().await
            },
            Location::PathBookmark { path } => {
                self.context.enter(location);
                self.bookmark(path).await
            },
            Location::Aggregate { .. } | Location::Project { .. } => {
                let Some(route) = location.route() else {
                    return render(View::ProjectChooser);
                };
                let decision = dispatch(&route);
                if matches!(decision, Dispatch::Redirect { .. }) {
                    return decision;
                }

                self.context.sync_location(location).await;
                let state = self.context.settled().await;
                match &*state {
                    PathState::NotFound { message, .. } => render(View::ProjectNotFound {
                        message: message.clone(),
                    }),
                    PathState::Unavailable { message, .. } => {
                        render(View::DirectoryUnavailable {
                            message: message.clone(),
                        })
                    },
                    PathState::Aggregate
                    | PathState::Loading { .. }
                    | PathState::Resolved { .. } => decision,
                }
            },
        }
    }

    /// `/` lands on the last project when it still resolves, otherwise on
    /// the chooser.
    async fn landing(&self) -> Dispatch {
        let pointer = match store::read_last_project(self.context.store().as_ref()).await {
            Ok(Some(path)) => path,
            Ok(None) => return render(View::ProjectChooser),
            Err(err) => {
                warn!(error = %err, "failed to read last project");
                return render(View::ProjectChooser);
            },
        };

        match self.context.resolver().resolve_by_path(&pointer).await {
            Ok(resolution) => Dispatch::Redirect {
                to: resolution.link(DEFAULT_PAGE.keyword()),
            },
            Err(err) => {
                debug!(path = %pointer.display(), error = %err, "last project did not resolve");
                render(View::ProjectChooser)
            },
        }
    }

    async fn bookmark(&self, path: &Path) -> Dispatch {
        match self.context.resolver().resolve_by_path(path).await {
            Ok(resolution) => Dispatch::Redirect {
                to: resolution.link(DEFAULT_PAGE.keyword()),
            },
            Err(err) if err.is_not_found() => render(View::ProjectNotFound {
                message: err.to_string(),
            }),
            Err(err) => render(View::DirectoryUnavailable {
                message: err.to_string(),
            }),
        }
    }
}

fn render(view: View) -> Dispatch {
    Dispatch::Render { view }
}
