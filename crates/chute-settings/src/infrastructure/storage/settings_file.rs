//! File-backed settings repository.
//!
//! Reads and writes the whole settings file through the config node codec.
//! A missing file is reported as "nothing stored" rather than as an error,
//! which is how the load protocol detects a first run.

use std::path::{Path, PathBuf};

use chute_core::{parse_tree, write_tree, ConfigNode};
use tracing::debug;

use crate::application::repository::{SettingsError, SettingsRepository};

/// [`SettingsRepository`] backed by a file on disk.
#[derive(Debug, Clone)]
pub struct FileSettingsRepository {
    path: PathBuf,
}

impl FileSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsRepository for FileSettingsRepository {
    fn load(&self) -> Result<Option<ConfigNode>, SettingsError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no settings file at {}", self.path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let root = parse_tree(&text).map_err(|source| SettingsError::Parse {
            path: self.path.clone(),
            source,
        })?;
        debug!("read settings file {}", self.path.display());
        Ok(Some(root))
    }

    /// Creates missing parent directories, then overwrites the file.
    fn save(&self, root: &ConfigNode) -> Result<(), SettingsError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| SettingsError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(&self.path, write_tree(root)).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!("wrote settings file {}", self.path.display());
        Ok(())
    }
}
