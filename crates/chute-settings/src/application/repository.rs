//! Storage abstraction for the settings file.

use std::path::PathBuf;

use chute_core::{ConfigNode, NodeError};
use thiserror::Error;

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The game directory holding `GameData` could not be determined.
    #[error("could not determine the game root directory")]
    NoGameRoot,

    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file exists but is not a valid config tree.
    #[error("failed to parse settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: NodeError,
    },
}

/// Whole-tree persistence for the settings file.
///
/// Implementations always read and write the complete tree; there is no
/// partial update.
#[cfg_attr(test, mockall::automock)]
pub trait SettingsRepository {
    /// Reads the stored tree, or `Ok(None)` when nothing is stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the data exists but cannot be read or
    /// parsed.
    fn load(&self) -> Result<Option<ConfigNode>, SettingsError>;

    /// Replaces the stored tree with `root`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the write fails.
    fn save(&self, root: &ConfigNode) -> Result<(), SettingsError>;
}
