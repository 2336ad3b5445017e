//! Path resolution for clipstore configuration and data files.
//!
//! Paths are relative to the working directory:
//! - `clipstore.yaml` - Optional configuration file
//! - `db/clipboard.db` - SQLite database holding the `entries` table

use std::path::{Path, PathBuf};

use crate::error::ClipstoreError;

/// Database location relative to the root.
pub const DEFAULT_DATABASE: &str = "db/clipboard.db";

/// Config file name relative to the root.
pub const CONFIG_FILE: &str = "clipstore.yaml";

/// Paths to clipstore configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: the working directory.
    pub root: PathBuf,
    /// Config file: `<root>/clipstore.yaml`
    pub config_file: PathBuf,
    /// Database file: `<root>/db/clipboard.db`
    pub database: PathBuf,
}

impl Paths {
    /// Create paths based on the current working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn new() -> Result<Self, ClipstoreError> {
        let root = std::env::current_dir().map_err(|e| {
            ClipstoreError::Config(format!("Could not determine working directory: {e}"))
        })?;
        Ok(Self::with_root(root))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join(CONFIG_FILE),
            database: root.join(DEFAULT_DATABASE),
            root,
        }
    }

    /// Resolve a configured path against the root. Absolute paths are kept.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
