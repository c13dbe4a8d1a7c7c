//! Scripted system collaborators
//!
//! Each mock answers from a fixed script and counts its calls so tests can
//! assert that an operation was, or was not, attempted.

use std::collections::HashMap;
use std::io;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::io::AsyncRead;

use telectl::core::SystemError;
use telectl::system::{CapturedImage, DirEntry, Displays, FileSystem, HostIdentity, HostInfo, NetworkIdentity};

fn not_found(path: &Path) -> SystemError {
    io::Error::new(io::ErrorKind::NotFound, format!("{}: no such file or directory", path.display())).into()
}

#[derive(Default)]
pub struct ScriptedFs {
    dirs: HashMap<PathBuf, Vec<DirEntry>>,
    files: HashMap<PathBuf, Vec<u8>>,
    pub list_calls: AtomicUsize,
    pub open_calls: AtomicUsize,
}

impl ScriptedFs {
    pub fn with_dir(mut self, path: &str, entries: Vec<DirEntry>) -> Self {
        self.dirs.insert(PathBuf::from(path), entries);
        self
    }

    pub fn with_file(mut self, path: &str, contents: &[u8]) -> Self {
        self.files.insert(PathBuf::from(path), contents.to_vec());
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn open_calls(&self) -> usize {
        self.open_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FileSystem for ScriptedFs {
    async fn list_directory(&self, path: &Path) -> Result<Vec<DirEntry>, SystemError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.dirs.get(path).cloned().ok_or_else(|| not_found(path))
    }

    async fn open_file(&self, path: &Path) -> Result<Box<dyn AsyncRead + Send + Unpin>, SystemError> {
        self.open_calls.fetch_add(1, Ordering::SeqCst);
        let contents = self.files.get(path).cloned().ok_or_else(|| not_found(path))?;
        Ok(Box::new(io::Cursor::new(contents)))
    }
}

/// Displays answering from a per-index script. `Err` entries fail that capture.
#[derive(Default)]
pub struct ScriptedDisplays {
    captures: Vec<Result<CapturedImage, String>>,
    enumeration_error: Option<String>,
    pub capture_calls: AtomicUsize,
}

impl ScriptedDisplays {
    pub fn new(captures: Vec<Result<CapturedImage, String>>) -> Self {
        Self {
            captures,
            ..Self::default()
        }
    }

    pub fn failing_enumeration(message: &str) -> Self {
        Self {
            enumeration_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn capture_calls(&self) -> usize {
        self.capture_calls.load(Ordering::SeqCst)
    }
}

pub fn image(width: u32, height: u32) -> CapturedImage {
    CapturedImage {
        width,
        height,
        png: vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a],
    }
}

#[async_trait]
impl Displays for ScriptedDisplays {
    async fn count_active_displays(&self) -> Result<usize, SystemError> {
        match &self.enumeration_error {
            Some(message) => Err(SystemError::Capture(message.clone())),
            None => Ok(self.captures.len()),
        }
    }

    async fn capture_display(&self, index: usize) -> Result<CapturedImage, SystemError> {
        self.capture_calls.fetch_add(1, Ordering::SeqCst);
        match self.captures.get(index) {
            Some(Ok(image)) => Ok(image.clone()),
            Some(Err(message)) => Err(SystemError::Capture(message.clone())),
            None => Err(SystemError::Capture(format!("display #{index} is not active"))),
        }
    }
}

#[derive(Default)]
pub struct ScriptedNetwork {
    public: Option<IpAddr>,
    local: Option<IpAddr>,
    pub public_calls: AtomicUsize,
    pub local_calls: AtomicUsize,
}

impl ScriptedNetwork {
    /// `None` makes the lookup fail.
    pub fn new(public: Option<&str>, local: Option<&str>) -> Self {
        Self {
            public: public.map(|ip| ip.parse().unwrap()),
            local: local.map(|ip| ip.parse().unwrap()),
            ..Self::default()
        }
    }

    pub fn local_calls(&self) -> usize {
        self.local_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NetworkIdentity for ScriptedNetwork {
    async fn resolve_public_address(&self) -> Result<IpAddr, SystemError> {
        self.public_calls.fetch_add(1, Ordering::SeqCst);
        self.public
            .ok_or_else(|| SystemError::InvalidAddress("echo service unreachable".to_string()))
    }

    async fn resolve_local_address(&self) -> Result<IpAddr, SystemError> {
        self.local_calls.fetch_add(1, Ordering::SeqCst);
        self.local.ok_or(SystemError::Unavailable("local address"))
    }
}

#[derive(Default)]
pub struct FixedHost {
    info: Option<HostInfo>,
}

impl FixedHost {
    pub fn new(username: &str, hostname: &str) -> Self {
        Self {
            info: Some(HostInfo {
                username: username.to_string(),
                hostname: hostname.to_string(),
                os: "linux".to_string(),
                arch: "x86_64".to_string(),
            }),
        }
    }
}

impl HostIdentity for FixedHost {
    fn host_info(&self) -> Result<HostInfo, SystemError> {
        self.info.clone().ok_or(SystemError::Unavailable("hostname"))
    }
}
