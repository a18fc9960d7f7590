//! Trait for checking local workspace files.

use crate::traits::LookupError;
use async_trait::async_trait;
use std::path::Path;

/// What a path in the local workspace points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Directory,
    Other,
}

/// Stats paths in the local workspace.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Determine what `path` points at.
    async fn stat(&self, path: &Path) -> Result<FileKind, LookupError>;
}

/// [`FileSystem`] backed by the real file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn stat(&self, path: &Path) -> Result<FileKind, LookupError> {
        let metadata = tokio::fs::metadata(path).await?;
        let kind = if metadata.is_file() {
            FileKind::File
        } else if metadata.is_dir() {
            FileKind::Directory
        } else {
            FileKind::Other
        };
        Ok(kind)
    }
}
