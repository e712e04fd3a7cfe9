//! Path resolution for plankr configuration and data files.
//!
//! All plankr data is stored in `~/.plankr/`:
//! - `config.yaml` - Main configuration file
//! - `plankr.db` - SQLite database for the history cache and pending queue

use std::path::PathBuf;

use crate::error::PlankrError;

/// Paths to plankr configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.plankr/`
    pub root: PathBuf,
    /// Config file: `~/.plankr/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.plankr/plankr.db`
    pub database: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, PlankrError> {
        let home = std::env::var("HOME").map_err(|_| {
            PlankrError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".plankr")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("plankr.db"),
            root,
        }
    }

    /// Ensure the root directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), PlankrError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                PlankrError::Config(format!("Failed to create directory {:?}: {}", self.root, e))
            })?;
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if home cannot be determined
            Self::with_root(PathBuf::from(".plankr"))
        })
    }
}
