//! Client-side key-value storage
//!
//! Storage is owned by the application, not by the client. The client only
//! ever reads from it through [`StorageCredentials`](crate::StorageCredentials);
//! writing (logging in, logging out) is left to whoever owns the backend.
//!
//! Two backends are provided: [`MemoryStorage`] for a single process and
//! [`FileStorage`], which persists a flat JSON object on disk.

use std::collections::HashMap;
use std::fmt::Debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use tokio::sync::{Mutex, RwLock};

use crate::error::ApiError;

/// Persistent string to string storage
#[async_trait::async_trait]
pub trait LocalStorage: Debug + Send + Sync {
    /// Read the value stored under `key`
    async fn get_item(&self, key: &str) -> Result<Option<String>, ApiError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set_item(&self, key: &str, value: &str) -> Result<(), ApiError>;

    /// Remove `key`; removing a missing key is not an error
    async fn remove_item(&self, key: &str) -> Result<(), ApiError>;
}

#[async_trait::async_trait]
impl<T: LocalStorage + ?Sized> LocalStorage for Arc<T> {
    async fn get_item(&self, key: &str) -> Result<Option<String>, ApiError> {
        (**self).get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), ApiError> {
        (**self).set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), ApiError> {
        (**self).remove_item(key).await
    }
}

/// In memory storage
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl LocalStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, ApiError> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), ApiError> {
        self.items
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), ApiError> {
        self.items.write().await.remove(key);
        Ok(())
    }
}

type WriteLocks = std::sync::Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>;

static WRITE_LOCKS: OnceLock<WriteLocks> = OnceLock::new();
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Write lock shared by every handle on `path` in this process
fn write_lock_for(path: &Path) -> Arc<Mutex<()>> {
    let locks = WRITE_LOCKS.get_or_init(Default::default);
    let mut locks = locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    locks
        .entry(path.to_path_buf())
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone()
}

/// Storage persisted as a JSON object in a single file
///
/// The file is read on every lookup so that changes made by another process
/// are picked up. A missing file reads as empty storage. Writes go to a
/// temporary file in the same directory which is then renamed over the
/// target, so readers never observe a partially written file.
///
/// Handles created in the same process for the same path share one write
/// lock. Writers in different processes are not serialized.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileStorage {
    /// Use the file at `path`, which does not need to exist yet
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let write_lock = write_lock_for(&path);
        Self { path, write_lock }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<HashMap<String, String>, ApiError> {
        match tokio::fs::read(&self.path).await {
            Ok(contents) if contents.iter().all(u8::is_ascii_whitespace) => Ok(HashMap::new()),
            Ok(contents) => serde_json::from_slice(&contents).map_err(|e| {
                ApiError::Storage(format!(
                    "{} is not a JSON object: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn store(&self, items: &HashMap<String, String>) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_vec_pretty(items)
            .map_err(|e| ApiError::Storage(e.to_string()))?;

        let temp_path = self.temp_path();
        if let Err(e) = tokio::fs::write(&temp_path, json).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Sibling of the target, unique per process and per write
    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "storage".to_string());
        let suffix = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.path.with_file_name(format!(
            ".{}.{}.{}.tmp",
            file_name,
            std::process::id(),
            suffix
        ))
    }
}

#[async_trait::async_trait]
impl LocalStorage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, ApiError> {
        Ok(self.load().await?.remove(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), ApiError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;
        items.insert(key.to_string(), value.to_string());
        self.store(&items).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), ApiError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;
        if items.remove(key).is_some() {
            self.store(&items).await?;
        }
        Ok(())
    }
}
