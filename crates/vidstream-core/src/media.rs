//! Media storage abstraction layer.
//!
//! Uploaded avatar and cover images go through the [`MediaStore`] trait so
//! backends (local filesystem, object storage) can be swapped without
//! changing business logic. Publishing consumes a staged local file and
//! returns the stable public URL for the stored object.

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

/// Abstract trait for media storage backends.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Publish a staged local file under `key` and return its public URL.
    async fn store(&self, local_path: &Path, key: &str) -> Result<String, MediaError>;

    /// Delete a stored object by key. Missing objects are not an error.
    async fn delete(&self, key: &str) -> Result<(), MediaError>;

    /// Public URL for a stored key.
    fn url_for(&self, key: &str) -> String;
}

/// Error type for media storage operations.
#[derive(Debug)]
pub enum MediaError {
    /// I/O error (file system or similar).
    IoError(std::io::Error),

    /// Invalid storage key format.
    InvalidKey(String),
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "I/O error: {}", e),
            Self::InvalidKey(msg) => write!(f, "Invalid storage key: {}", msg),
        }
    }
}

impl std::error::Error for MediaError {}

impl From<std::io::Error> for MediaError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

/// Local-filesystem backend: objects live under `root`, URLs resolve
/// against `base_url`.
pub struct LocalMediaStore {
    root: PathBuf,
    base_url: String,
}

impl LocalMediaStore {
    pub fn new(root: PathBuf, base_url: String) -> Self {
        Self {
            root,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, MediaError> {
        if key.is_empty() || key.starts_with('/') {
            return Err(MediaError::InvalidKey(key.to_string()));
        }
        // Keys are relative paths; reject anything that could escape the root.
        if key.split('/').any(|part| part.is_empty() || part == "." || part == "..") {
            return Err(MediaError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn store(&self, local_path: &Path, key: &str) -> Result<String, MediaError> {
        let target = self.resolve(key)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::copy(local_path, &target).await?;
        Ok(self.url_for(key))
    }

    async fn delete(&self, key: &str) -> Result<(), MediaError> {
        let target = self.resolve(key)?;
        match fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}
