//! SettingsStore: owner of the live RealChute settings.
//!
//! A store is created by running the load protocol once against a
//! repository.  Afterwards the settings live in memory behind a mutex; UI and
//! behaviour code read and change them through [`SettingsStore::lock`] or the
//! snapshot helpers, and [`SettingsStore::save`] writes them back together
//! with the preset library.
//!
//! The process-wide instance is handed out by
//! [`crate::infrastructure::storage::global::fetch`].

use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

use chute_core::{PresetSource, Settings};

use super::load_settings::{load_or_repair, LoadAction};
use super::repository::{SettingsError, SettingsRepository};
use super::save_settings::save_settings;

pub struct SettingsStore {
    settings: Mutex<Settings>,
    repository: Box<dyn SettingsRepository + Send + Sync>,
    load_action: LoadAction,
}

impl SettingsStore {
    /// Loads (and if needed creates or repairs) the stored settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the load protocol fails.  No store exists
    /// in that case.
    pub fn open<R>(repository: R) -> Result<Self, SettingsError>
    where
        R: SettingsRepository + Send + Sync + 'static,
    {
        let report = load_or_repair(&repository)?;
        Ok(Self {
            settings: Mutex::new(report.settings),
            repository: Box::new(repository),
            load_action: report.action,
        })
    }

    /// What opening the store did to the stored file.
    pub fn load_action(&self) -> LoadAction {
        self.load_action
    }

    /// Locks the live settings for direct reads and writes.
    ///
    /// A lock poisoned by a panicking holder is recovered; the settings are
    /// plain values and cannot be left half-updated.
    pub fn lock(&self) -> MutexGuard<'_, Settings> {
        self.settings.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the current settings.
    pub fn snapshot(&self) -> Settings {
        self.lock().clone()
    }

    /// Applies `f` to the live settings while holding the lock.
    pub fn update<T>(&self, f: impl FnOnce(&mut Settings) -> T) -> T {
        f(&mut self.lock())
    }

    /// Writes the current settings and `presets` to the repository.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the write fails.
    pub fn save(&self, presets: &dyn PresetSource) -> Result<(), SettingsError> {
        let settings = self.snapshot();
        save_settings(self.repository.as_ref(), &settings, presets)
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("SettingsStore");
        // Never block here: the caller may be holding the guard.
        match self.settings.try_lock() {
            Ok(guard) => debug.field("settings", &*guard),
            Err(TryLockError::Poisoned(poisoned)) => {
                debug.field("settings", &*poisoned.into_inner())
            }
            Err(TryLockError::WouldBlock) => debug.field("settings", &format_args!("<locked>")),
        };
        debug
            .field("load_action", &self.load_action)
            .finish_non_exhaustive()
    }
}
