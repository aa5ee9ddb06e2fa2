//! In-memory settings repository for unit testing and dry runs.
//!
//! Stores the file *text* rather than the tree, so every save and load still
//! goes through the config node codec exactly like the file-backed
//! repository.  Clones share the same storage, which lets a test keep a
//! handle while a [`SettingsStore`](crate::SettingsStore) owns another.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chute_core::{parse_tree, write_tree, ConfigNode};

use crate::application::repository::{SettingsError, SettingsRepository};

const MEMORY_PATH: &str = "<memory>";

#[derive(Debug, Default)]
struct Inner {
    text: Option<String>,
    writes: usize,
}

/// A [`SettingsRepository`] holding the settings file text in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsRepository {
    inner: Arc<Mutex<Inner>>,
}

impl MemorySettingsRepository {
    /// Creates an empty repository, as if the file did not exist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository whose file already contains `text`.
    pub fn with_text(text: &str) -> Self {
        let repo = Self::new();
        repo.inner.lock().expect("lock poisoned").text = Some(text.to_string());
        repo
    }

    /// Returns the current file text, if any.
    pub fn text(&self) -> Option<String> {
        self.inner.lock().expect("lock poisoned").text.clone()
    }

    /// Returns the number of successful saves.
    pub fn write_count(&self) -> usize {
        self.inner.lock().expect("lock poisoned").writes
    }
}

impl SettingsRepository for MemorySettingsRepository {
    fn load(&self) -> Result<Option<ConfigNode>, SettingsError> {
        let Some(text) = self.text() else {
            return Ok(None);
        };
        parse_tree(&text)
            .map(Some)
            .map_err(|source| SettingsError::Parse {
                path: PathBuf::from(MEMORY_PATH),
                source,
            })
    }

    fn save(&self, root: &ConfigNode) -> Result<(), SettingsError> {
        let mut inner = self.inner.lock().expect("lock poisoned");
        inner.text = Some(write_tree(root));
        inner.writes += 1;
        Ok(())
    }
}
