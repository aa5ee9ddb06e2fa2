//! LoadSettings: first-access load of the settings file with self-repair.
//!
//! # Load protocol
//!
//! ```text
//! repository.load()
//!   ├─ None            ──►  write defaults          ──►  Created
//!   └─ Some(tree)
//!        └─ read REALCHUTE_SETTINGS
//!             ├─ all four keys readable           ──►  Loaded
//!             └─ any key absent or unreadable
//!                  └─ rewrite section with the
//!                     current values               ──►  Repaired
//! ```
//!
//! A missing `REALCHUTE_SETTINGS` section is treated as an empty one, so it
//! is repaired like any other incomplete file.  Repair keeps the section's
//! `PRESET` child nodes but drops every other top-level node of the file.
//!
//! Loading may therefore write.  The returned [`LoadReport`] says whether it
//! did.

use chute_core::{ConfigNode, Settings, SettingsKey, SETTINGS_NODE};
use serde::Serialize;
use tracing::{info, warn};

use super::repository::{SettingsError, SettingsRepository};

/// What [`load_or_repair`] did to the stored file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadAction {
    /// The file was complete and left untouched.
    Loaded,
    /// The file did not exist and was written with defaults.
    Created,
    /// The file lacked keys and was rewritten.
    Repaired,
}

impl LoadAction {
    /// Returns `true` when loading wrote to the repository.
    pub fn wrote(self) -> bool {
        !matches!(self, LoadAction::Loaded)
    }
}

/// Outcome of the load protocol.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub settings: Settings,
    pub action: LoadAction,
    /// Keys that were filled with defaults during a repair.
    pub missing: Vec<SettingsKey>,
}

/// Runs the load protocol against `repository`.
///
/// # Errors
///
/// Returns [`SettingsError`] if the stored file cannot be read or parsed, or
/// if writing the created/repaired file fails.  Nothing is cached on error.
pub fn load_or_repair(repository: &dyn SettingsRepository) -> Result<LoadReport, SettingsError> {
    info!("loading settings file");

    let Some(mut root) = repository.load()? else {
        warn!("settings file is missing; creating a new one with defaults");
        let settings = Settings::default();
        let mut root = ConfigNode::new();
        root.add_node(settings.to_node());
        repository.save(&root)?;
        return Ok(LoadReport {
            settings,
            action: LoadAction::Created,
            missing: Vec::new(),
        });
    };

    let mut section = root
        .get_node(SETTINGS_NODE)
        .cloned()
        .unwrap_or_else(|| ConfigNode::named(SETTINGS_NODE));
    let read = Settings::read_from(&section);

    if !read.needs_repair() {
        info!("settings loaded");
        return Ok(LoadReport {
            settings: read.settings,
            action: LoadAction::Loaded,
            missing: Vec::new(),
        });
    }

    let missing_names: Vec<&str> = read.missing.iter().map(|k| k.as_str()).collect();
    warn!(
        "settings file is missing {}; fixing settings file",
        missing_names.join(", ")
    );

    section.clear_values();
    read.settings.write_to(&mut section);
    root.clear_data();
    root.add_node(section);
    repository.save(&root)?;

    Ok(LoadReport {
        settings: read.settings,
        action: LoadAction::Repaired,
        missing: read.missing,
    })
}
