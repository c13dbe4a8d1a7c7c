//! System-Operation Collaborators
//!
//! Each command handler depends on exactly one of these traits. The `Os*`
//! implementations talk to the real host; tests substitute scripted ones.

pub mod display;
pub mod fs;
pub mod host;
pub mod network;

use std::net::IpAddr;
use std::path::Path;

use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::core::SystemError;

pub use display::OsDisplays;
pub use fs::OsFileSystem;
pub use host::OsHost;
pub use network::OsNetwork;

/// One directory entry as reported by [`FileSystem::list_directory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// A captured display, PNG-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Identity of the machine the agent runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub username: String,
    pub hostname: String,
    pub os: String,
    pub arch: String,
}

#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Entries of `path`, in the order the collaborator chooses.
    async fn list_directory(&self, path: &Path) -> Result<Vec<DirEntry>, SystemError>;

    /// Opens a regular file for streaming.
    async fn open_file(&self, path: &Path) -> Result<Box<dyn AsyncRead + Send + Unpin>, SystemError>;
}

#[async_trait]
pub trait Displays: Send + Sync {
    async fn count_active_displays(&self) -> Result<usize, SystemError>;

    async fn capture_display(&self, index: usize) -> Result<CapturedImage, SystemError>;
}

#[async_trait]
pub trait NetworkIdentity: Send + Sync {
    async fn resolve_public_address(&self) -> Result<IpAddr, SystemError>;

    async fn resolve_local_address(&self) -> Result<IpAddr, SystemError>;
}

pub trait HostIdentity: Send + Sync {
    fn host_info(&self) -> Result<HostInfo, SystemError>;
}
