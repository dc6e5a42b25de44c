//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pageserver::config::Config;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// A scratch directory holding a `pages/` document root plus files that
/// live next to it, outside the root. Removed on drop.
pub struct DocRoot {
    base: PathBuf,
    root: PathBuf,
}

impl DocRoot {
    pub fn new() -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
        let base = std::env::temp_dir().join(format!(
            "pageserver-test-{}-{}",
            std::process::id(),
            id
        ));
        let _ = fs::remove_dir_all(&base);
        fs::create_dir_all(base.join("pages")).unwrap();

        let base = fs::canonicalize(base).unwrap();
        let root = base.join("pages");
        Self { base, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Writes a file beneath the document root, creating parent directories.
    pub fn write(&self, rel: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        write_under(&self.root, rel, contents)
    }

    /// Writes a file next to the document root, outside of it.
    pub fn write_outside(&self, rel: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        write_under(&self.base, rel, contents)
    }

    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let dir = self.root.join(rel);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    pub fn config(&self) -> Arc<Config> {
        Arc::new(Config {
            port: 8000,
            document_root: self.root.clone(),
            debug: false,
        })
    }
}

impl Drop for DocRoot {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.base);
    }
}

fn write_under(dir: &Path, rel: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

/// Deterministic non-text payload of `len` bytes.
pub fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}
