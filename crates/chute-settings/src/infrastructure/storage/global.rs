//! The process-wide settings store.
//!
//! # Lifecycle
//!
//! ```text
//! unconstructed ──fetch()──► constructed (lives until process exit)
//! ```
//!
//! The first successful [`fetch`] resolves the settings path, runs the load
//! protocol and publishes the store.  Construction runs under an init lock so
//! concurrent first calls cannot build two stores; later calls only read the
//! published `OnceLock`.  If construction fails nothing is published and the
//! next call tries again.
//!
//! Code that can take the store as a parameter should do so and leave
//! [`fetch`] to the entry points.

use std::sync::{Mutex, OnceLock, PoisonError};

use chute_core::PresetSource;
use tracing::debug;

use super::paths::settings_url;
use super::settings_file::FileSettingsRepository;
use crate::application::repository::SettingsError;
use crate::application::store::SettingsStore;

static STORE: OnceLock<SettingsStore> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Returns the process-wide store, constructing it on first call.
///
/// The first call may read the settings file and, when it is missing or
/// incomplete, write it.
///
/// # Errors
///
/// Returns [`SettingsError`] if the path cannot be resolved or the load
/// protocol fails.
pub fn fetch() -> Result<&'static SettingsStore, SettingsError> {
    if let Some(store) = STORE.get() {
        return Ok(store);
    }

    let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(store) = STORE.get() {
        return Ok(store);
    }

    let path = settings_url()?;
    debug!("constructing settings store from {}", path.display());
    let store = SettingsStore::open(FileSettingsRepository::new(path))?;
    Ok(STORE.get_or_init(|| store))
}

/// Saves the process-wide settings together with `presets`.
///
/// # Errors
///
/// Returns [`SettingsError`] if the store cannot be constructed or the write
/// fails.
pub fn save_settings(presets: &dyn PresetSource) -> Result<(), SettingsError> {
    fetch()?.save(presets)
}
