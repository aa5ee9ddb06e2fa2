//! Resolution of the settings file path.
//!
//! The settings file lives inside the game installation:
//!
//! ```text
//! <game root>/GameData/RealChute/Plugins/PluginData/RealChute_Settings.cfg
//! ```
//!
//! The game root is the directory of the running executable, falling back to
//! the current directory.  Setting `REALCHUTE_SETTINGS_PATH` overrides the
//! whole path.  The result is resolved once and then constant for the
//! process.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::application::repository::SettingsError;

/// Environment variable overriding the settings file location.
pub const SETTINGS_PATH_ENV: &str = "REALCHUTE_SETTINGS_PATH";

/// Path of the settings file relative to the game root.
pub const SETTINGS_RELATIVE_PATH: [&str; 5] = [
    "GameData",
    "RealChute",
    "Plugins",
    "PluginData",
    "RealChute_Settings.cfg",
];

static SETTINGS_URL: OnceLock<PathBuf> = OnceLock::new();

/// Returns the process-wide settings file path, resolving it on first call.
///
/// # Errors
///
/// Returns [`SettingsError::NoGameRoot`] when neither the override nor a game
/// root is available.  The resolution is retried on the next call.
pub fn settings_url() -> Result<&'static Path, SettingsError> {
    if let Some(path) = SETTINGS_URL.get() {
        return Ok(path.as_path());
    }
    let resolved = resolve_settings_path()?;
    Ok(SETTINGS_URL.get_or_init(|| resolved).as_path())
}

/// Resolves the settings path without caching.
///
/// # Errors
///
/// Returns [`SettingsError::NoGameRoot`] when no location can be determined.
pub fn resolve_settings_path() -> Result<PathBuf, SettingsError> {
    if let Some(path) = std::env::var_os(SETTINGS_PATH_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    game_root()
        .map(|root| settings_path_in(&root))
        .ok_or(SettingsError::NoGameRoot)
}

/// Builds the settings path below a given game root.
pub fn settings_path_in(game_root: &Path) -> PathBuf {
    SETTINGS_RELATIVE_PATH
        .iter()
        .fold(game_root.to_path_buf(), |path, part| path.join(part))
}

/// Directory of the running executable, or the current directory.
fn game_root() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| std::env::current_dir().ok())
}
