//! Object store trait and local filesystem backend

use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Read access to stored document objects
///
/// Implementations:
/// - [`LocalObjectStore`]: filesystem directories standing in for buckets
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Download an object into a local temporary file
    ///
    /// The returned handle deletes the file when dropped, so the
    /// temporary copy is released on every exit path.
    async fn download(&self, bucket: &str, key: &str) -> Result<NamedTempFile>;

    /// Store name for logging
    fn name(&self) -> &str;
}

/// Filesystem-backed object store: `{root}/{bucket}/{key}`
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, bucket: &str, key: &str) -> PathBuf {
        self.root.join(bucket).join(key)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn download(&self, bucket: &str, key: &str) -> Result<NamedTempFile> {
        let path = self.object_path(bucket, key);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| Error::download(bucket, key, e.to_string()))?;

        let mut temp = NamedTempFile::new().map_err(|e| {
            Error::download(bucket, key, format!("failed to create temporary file: {}", e))
        })?;
        temp.write_all(&bytes)
            .map_err(|e| Error::download(bucket, key, e.to_string()))?;
        temp.flush()
            .map_err(|e| Error::download(bucket, key, e.to_string()))?;

        tracing::debug!(bucket, key, size = bytes.len(), "downloaded object");
        Ok(temp)
    }

    fn name(&self) -> &str {
        "local"
    }
}
