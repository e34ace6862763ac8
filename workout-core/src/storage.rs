//! File-backed storage for the workout document.
//!
//! The whole document is the unit of read and write: every call loads the
//! file, and every append rewrites it. Writes go through a temp file and a
//! rename so a crash never leaves a truncated document behind.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde_json::error::Category;
use serde_json::ser::PrettyFormatter;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::errors::{StoreError, StoreResult};
use crate::models::{Document, MalformedPolicy, WorkoutLog};

/// Load the document at `path`. A missing or empty file is an empty document.
pub async fn read_document(path: &Path, policy: MalformedPolicy) -> StoreResult<Document> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Data file absent, starting empty");
            return Ok(Document::new());
        }
        Err(e) => return Err(StoreError::io(path, e)),
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Document::new());
    }

    match serde_json::from_slice::<Document>(&bytes) {
        Ok(doc) => Ok(doc),
        // Parseable JSON that does not fit the schema still holds other users'
        // logs, so it is never discarded.
        Err(e) if e.classify() == Category::Data => Err(StoreError::Malformed {
            path: path.to_path_buf(),
            source: e,
        }),
        Err(e) => match policy {
            MalformedPolicy::Discard => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Data file is malformed, treating as empty; next write will replace it"
                );
                Ok(Document::new())
            }
            MalformedPolicy::Reject => Err(StoreError::Malformed {
                path: path.to_path_buf(),
                source: e,
            }),
        },
    }
}

/// Replace the file at `path` with `document`.
pub async fn write_document(path: &Path, document: &Document) -> StoreResult<()> {
    let bytes = to_pretty_json(document)?;
    let target = path.to_path_buf();

    tokio::task::spawn_blocking(move || write_atomic(&target, &bytes))
        .await
        .map_err(|e| StoreError::io(path, std::io::Error::other(e)))?
}

fn to_pretty_json<T: Serialize>(value: &T) -> StoreResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let temp_path = temp_path_for(path);
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| StoreError::io(&temp_path, e))?;

    file.write_all(bytes)
        .and_then(|_| file.sync_all())
        .map_err(|e| StoreError::io(&temp_path, e))?;
    drop(file);

    std::fs::rename(&temp_path, path).map_err(|e| StoreError::io(path, e))?;
    Ok(())
}

/// The data file plus the lock that serializes read-modify-write on it.
#[derive(Debug, Clone)]
pub struct LogStore {
    path: Arc<PathBuf>,
    policy: MalformedPolicy,
    lock: Arc<Mutex<()>>,
}

impl LogStore {
    pub fn new(path: impl Into<PathBuf>, policy: MalformedPolicy) -> Self {
        Self {
            path: Arc::new(path.into()),
            policy,
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> MalformedPolicy {
        self.policy
    }

    pub async fn load(&self) -> StoreResult<Document> {
        let _guard = self.lock.lock().await;
        read_document(&self.path, self.policy).await
    }

    pub async fn users(&self) -> StoreResult<Vec<String>> {
        let doc = self.load().await?;
        Ok(doc.into_keys().collect())
    }

    /// Logs for `username`, empty if the user has never been written.
    pub async fn logs_for(&self, username: &str) -> StoreResult<Vec<WorkoutLog>> {
        let mut doc = self.load().await?;
        Ok(doc.swap_remove(username).unwrap_or_default())
    }

    pub async fn append(&self, username: &str, log: WorkoutLog) -> StoreResult<WorkoutLog> {
        let _guard = self.lock.lock().await;

        let mut doc = read_document(&self.path, self.policy).await?;
        let logs = doc.entry(username.to_string()).or_default();
        logs.push(log.clone());
        let count = logs.len();

        write_document(&self.path, &doc).await?;
        debug!(user = %username, count, "Appended workout log");

        Ok(log)
    }
}
