use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use {async_trait::async_trait, tokio::sync::Mutex, tracing::debug};

use crate::error::{Context, Result};

/// Key under which the last successfully resolved project path is kept.
pub const LAST_PROJECT_KEY: &str = "lastProjectPath";

/// Durable string key-value storage for client-side state.
///
/// Writes are last-write-wins; no locking across processes.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

// ── TOML file-backed implementation ──────────────────────────────────

/// Stores values as a flat string table in a TOML file.
pub struct TomlKeyValueStore {
    path: PathBuf,
}

impl TomlKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        Ok(toml::from_str(&data)?)
    }

    fn write_file(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = toml::to_string_pretty(values)?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        debug!(path = %self.path.display(), "saved client state");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for TomlKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_file()?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_file()?;
        values.insert(key.to_string(), value.to_string());
        self.write_file(&values)
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.read_file()?;
        if values.remove(key).is_some() {
            self.write_file(&values)?;
        }
        Ok(())
    }
}

// ── In-memory implementation ─────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.lock().await.remove(key);
        Ok(())
    }
}

// ── Last-project pointer ─────────────────────────────────────────────

pub async fn read_last_project(store: &dyn KeyValueStore) -> Result<Option<PathBuf>> {
    Ok(store
        .get(LAST_PROJECT_KEY)
        .await?
        .filter(|value| !value.is_empty())
        .map(PathBuf::from))
}

pub async fn write_last_project(store: &dyn KeyValueStore, path: &Path) -> Result<()> {
    store
        .set(LAST_PROJECT_KEY, &path.to_string_lossy())
        .await
}

pub async fn forget_last_project(store: &dyn KeyValueStore) -> Result<()> {
    store.remove(LAST_PROJECT_KEY).await
}
