use std::{
    path::Path,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

use {async_trait::async_trait, tokio::sync::RwLock};

use crate::{
    Error, ProjectDirectory, Result,
    types::{ProjectFilter, ProjectInfo},
};

/// Directory backed by an in-process list.
///
/// Counts listing calls and can be switched into an unreachable mode, which
/// makes it the stand-in for the daemon in tests.
#[derive(Default)]
pub struct InMemoryDirectory {
    projects: RwLock<Vec<ProjectInfo>>,
    unavailable: AtomicBool,
    list_calls: AtomicUsize,
}

impl InMemoryDirectory {
    pub fn new(projects: Vec<ProjectInfo>) -> Self {
        Self {
            projects: RwLock::new(projects),
            ..Self::default()
        }
    }

    /// A directory whose every call fails as if the daemon were down.
    pub fn unavailable() -> Self {
        let directory = Self::default();
        directory.set_unavailable(true);
        directory
    }

    pub async fn replace(&self, projects: Vec<ProjectInfo>) {
        *self.projects.write().await = projects;
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `list_projects` calls served so far, failed ones included.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::message("project daemon is unreachable"));
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectDirectory for InMemoryDirectory {
    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<ProjectInfo>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let projects = self.projects.read().await;
        Ok(projects
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn is_initialized(&self, path: &Path) -> Result<bool> {
        self.check_available()?;
        let projects = self.projects.read().await;
        Ok(projects
            .iter()
            .find(|p| p.is_at(path))
            .is_some_and(|p| p.initialized))
    }
}
