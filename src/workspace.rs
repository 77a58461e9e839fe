//! Temporary workspace for fragment artifacts.

use std::path::{Path, PathBuf};

use log::{info, warn};
use tempfile::TempDir;

use crate::error::Result;

/// A lazily created temporary directory that owns every fragment artifact
/// of a build and guarantees their collective removal.
///
/// At most one directory is live per workspace. Cleanup is idempotent and
/// also runs on drop, so artifacts never outlive the builder regardless of
/// how a build exits.
#[derive(Debug)]
pub struct Workspace {
    prefix: String,
    dir: Option<TempDir>,
    counter: u32,
}

impl Workspace {
    /// Create a workspace; no directory is materialized yet.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            dir: None,
            counter: 0,
        }
    }

    /// Materialize the directory. Idempotent.
    pub fn init(&mut self) -> Result<()> {
        if self.dir.is_none() {
            let dir = tempfile::Builder::new().prefix(&self.prefix).tempdir()?;
            info!("workspace initialized at {}", dir.path().display());
            self.dir = Some(dir);
        }
        Ok(())
    }

    /// Path of the live directory, if one has been materialized.
    pub fn path(&self) -> Option<&Path> {
        self.dir.as_ref().map(TempDir::path)
    }

    /// Allocate a fresh artifact path inside the workspace, initializing
    /// it first if needed.
    ///
    /// Names come from a monotonically increasing counter, so they cannot
    /// collide within a workspace.
    pub fn next_path(&mut self) -> Result<PathBuf> {
        self.init()?;
        self.counter += 1;
        let name = format!("frag-{:04}.docx", self.counter);
        // init() above guarantees the directory exists
        Ok(self.dir.as_ref().unwrap().path().join(name))
    }

    /// Remove the directory and everything under it. Idempotent; removal
    /// failures are logged, never propagated — cleanup must not turn a
    /// finished build into a failure.
    pub fn cleanup(&mut self) {
        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            match dir.close() {
                Ok(()) => info!("workspace removed: {}", path.display()),
                Err(e) => warn!("failed to remove workspace {}: {e}", path.display()),
            }
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        self.cleanup();
    }
}
