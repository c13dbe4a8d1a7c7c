//! Common test utilities
//!
//! This module is shared across all integration tests

#![allow(dead_code)]

pub mod collaborators;
pub mod transport;

#[allow(unused_imports)]
pub use collaborators::{FixedHost, ScriptedDisplays, ScriptedFs, ScriptedNetwork};
#[allow(unused_imports)]
pub use transport::{RecordingTransport, Sent};

use std::path::PathBuf;
use std::sync::Arc;

use telectl::commands::Collaborators;

/// Collaborators that fail every call unless a test replaces them.
pub fn collaborators(scratch_dir: PathBuf) -> Collaborators {
    Collaborators {
        fs: Arc::new(ScriptedFs::default()),
        displays: Arc::new(ScriptedDisplays::default()),
        network: Arc::new(ScriptedNetwork::default()),
        host: Arc::new(FixedHost::default()),
        scratch_dir,
    }
}
