use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use {
    tokio::{sync::watch, task::JoinHandle},
    tracing::{debug, info, warn},
    waypoint_routing::{
        Location, ProjectRef, ProjectResolution, ProjectResolver, build_contextual_link,
    },
};

use crate::{
    Result,
    state::PathState,
    store::{self, KeyValueStore},
};

/// A lookup started by [`PathContext::enter`], tagged with the generation
/// it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingResolution {
    pub generation: u64,
    pub project: ProjectRef,
}

struct Inner {
    resolver: ProjectResolver,
    store: Arc<dyn KeyValueStore>,
    state: watch::Sender<Arc<PathState>>,
    /// Bumped whenever the location leaves the current project scope. Only
    /// mutated while the watch sender's lock is held.
    generation: AtomicU64,
}

/// Process-wide project state derived from the current location.
///
/// Cloning is cheap and every clone observes the same state.
#[derive(Clone)]
pub struct PathContext {
    inner: Arc<Inner>,
}

impl PathContext {
    pub fn new(resolver: ProjectResolver, store: Arc<dyn KeyValueStore>) -> Self {
        let (state, _) = watch::channel(Arc::new(PathState::Aggregate));
        Self {
            inner: Arc::new(Inner {
                resolver,
                store,
                state,
                generation: AtomicU64::new(0),
            }),
        }
    }

    pub fn resolver(&self) -> &ProjectResolver {
        &self.inner.resolver
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.inner.store
    }

    /// Receiver woken once per state transition.
    pub fn subscribe(&self) -> watch::Receiver<Arc<PathState>> {
        self.inner.state.subscribe()
    }

    pub fn state(&self) -> Arc<PathState> {
        self.inner.state.borrow().clone()
    }

    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    /// Absolute path of the resolved project; empty when none is selected.
    pub fn project_path(&self) -> PathBuf {
        self.state().project_path().to_path_buf()
    }

    /// Prefix `path` with the current project, or leave it alone in
    /// aggregate views.
    pub fn contextual_link(&self, path: &str) -> String {
        let project = self.state().project();
        build_contextual_link(project.as_ref(), path)
    }

    fn bump_generation(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Apply a location change synchronously.
    ///
    /// Returns the lookup to run when the location names a project that is
    /// not already loading or resolved. Any lookup still in flight for a
    /// previous location is invalidated.
    pub fn enter(&self, location: &Location) -> Option<PendingResolution> {
        let Some(project) = location.project() else {
            self.inner.state.send_if_modified(|state| {
                let generation = self.bump_generation();
                if matches!(**state, PathState::Aggregate) {
                    return false;
                }
                debug!(generation, "left project scope");
                *state = Arc::new(PathState::Aggregate);
                true
            });
            return None;
        };

        let mut pending = None;
        self.inner.state.send_if_modified(|state| {
            if state.covers(project) {
                return false;
            }
            let generation = self.bump_generation();
            debug!(generation, project = %project, "resolving project");
            *state = Arc::new(PathState::Loading {
                project: project.clone(),
            });
            pending = Some(PendingResolution {
                generation,
                project: project.clone(),
            });
            true
        });
        pending
    }

    /// Run a lookup and commit its result if it is still current.
    ///
    /// Returns whether the result was committed.
    pub async fn resolve(&self, pending: PendingResolution) -> bool {
        let result = self.inner.resolver.resolve(&pending.project).await;
        let next = match &result {
            Ok(resolution) => PathState::Resolved {
                resolution: resolution.clone(),
            },
            Err(err) if err.is_not_found() => PathState::NotFound {
                project: pending.project.clone(),
                message: err.to_string(),
            },
            Err(err) => PathState::Unavailable {
                project: pending.project.clone(),
                message: err.to_string(),
            },
        };

        if !self.commit(pending.generation, next) {
            warn!(
                generation = pending.generation,
                current = self.generation(),
                project = %pending.project,
                "discarding stale resolution"
            );
            return false;
        }

        match result {
            Ok(resolution) => {
                info!(
                    project = %pending.project,
                    path = %resolution.project_path.display(),
                    "project resolved"
                );
                self.remember(&resolution).await;
            },
            Err(err) => info!(error = %err, "project resolution failed"),
        }
        true
    }

    fn commit(&self, generation: u64, next: PathState) -> bool {
        self.inner.state.send_if_modified(|state| {
            if self.generation() != generation {
                return false;
            }
            *state = Arc::new(next);
            true
        })
    }

    async fn remember(&self, resolution: &ProjectResolution) {
        if let Err(err) =
            store::write_last_project(self.inner.store.as_ref(), &resolution.project_path).await
        {
            warn!(error = %err, "failed to persist last project");
        }
    }

    /// Apply a location change and wait for its lookup, if any.
    pub async fn sync_location(&self, location: &Location) -> Arc<PathState> {
        if let Some(pending) = self.enter(location) {
            self.resolve(pending).await;
        }
        self.state()
    }

    /// Apply a location change and run its lookup in the background.
    pub fn spawn_location(&self, location: &Location) -> Option<JoinHandle<bool>> {
        let pending = self.enter(location)?;
        let context = self.clone();
        Some(tokio::spawn(async move { context.resolve(pending).await }))
    }

    /// Wait until no lookup is in flight and return the settled state.
    pub async fn settled(&self) -> Arc<PathState> {
        let mut rx = self.subscribe();
        match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    /// Re-check the resolved project's initialized flag with the directory.
    ///
    /// Returns whether the state changed. Does nothing outside a resolved
    /// project; a navigation in the meantime discards the answer.
    pub async fn refresh_initialized(&self) -> Result<bool> {
        let (generation, resolution) = {
            let state = self.inner.state.borrow();
            match state.resolution() {
                Some(resolution) => (self.generation(), resolution.clone()),
                None => return Ok(false),
            }
        };

        let initialized = self
            .inner
            .resolver
            .directory()
            .is_initialized(&resolution.project_path)
            .await?;
        if initialized == resolution.initialized {
            return Ok(false);
        }

        let changed = self.commit(
            generation,
            PathState::Resolved {
                resolution: ProjectResolution {
                    initialized,
                    ..resolution
                },
            },
        );
        if changed {
            debug!(initialized, "project initialization changed");
        }
        Ok(changed)
    }
}
