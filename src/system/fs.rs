use std::io;
use std::path::Path;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncRead;

use super::{DirEntry, FileSystem};
use crate::core::SystemError;

/// Filesystem access through `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

#[async_trait]
impl FileSystem for OsFileSystem {
    /// Entries sorted by name. Symlinks are reported by their own type, not their target's.
    async fn list_directory(&self, path: &Path) -> Result<Vec<DirEntry>, SystemError> {
        let mut reader = fs::read_dir(path).await?;
        let mut entries = Vec::new();
        while let Some(entry) = reader.next_entry().await? {
            let is_dir = entry.file_type().await?.is_dir();
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn open_file(&self, path: &Path) -> Result<Box<dyn AsyncRead + Send + Unpin>, SystemError> {
        let file = fs::File::open(path).await?;
        // Opening a directory succeeds on unix; reading it later would not
        if file.metadata().await?.is_dir() {
            return Err(io::Error::other(format!("{} is a directory", path.display())).into());
        }
        Ok(Box::new(file))
    }
}
