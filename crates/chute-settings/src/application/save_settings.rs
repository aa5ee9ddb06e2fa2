//! SaveSettings: serializes the live settings and the preset library.
//!
//! The stored file is always replaced in full.  The four flags are written
//! first, followed by one `PRESET` node per preset in the library's order.

use chute_core::{ConfigNode, PresetSource, Settings};
use tracing::info;

use super::repository::{SettingsError, SettingsRepository};

/// Builds the complete settings file tree.
pub fn build_settings_tree(settings: &Settings, presets: &dyn PresetSource) -> ConfigNode {
    let mut section = settings.to_node();
    for preset in presets.presets() {
        section.add_node(preset.to_node());
    }

    let mut root = ConfigNode::new();
    root.add_node(section);
    root
}

/// Overwrites the stored settings with `settings` and `presets`.
///
/// # Errors
///
/// Returns [`SettingsError`] if the repository write fails.
pub fn save_settings(
    repository: &dyn SettingsRepository,
    settings: &Settings,
    presets: &dyn PresetSource,
) -> Result<(), SettingsError> {
    let root = build_settings_tree(settings, presets);
    repository.save(&root)?;
    info!("saved settings file");
    Ok(())
}
