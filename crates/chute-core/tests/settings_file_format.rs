//! Integration tests for the settings file format.
//!
//! These tests go through the public API only: settings and presets are
//! serialized into a tree, written as text, parsed back, and read again.

use chute_core::{
    parse_tree, write_tree, ConfigNode, Preset, PresetSource, PresetsLibrary, Settings,
    SettingsKey, SETTINGS_NODE,
};

fn settings_file(settings: &Settings, presets: &[Preset]) -> ConfigNode {
    let mut section = settings.to_node();
    for preset in presets {
        section.add_node(preset.to_node());
    }
    let mut root = ConfigNode::new();
    root.add_node(section);
    root
}

#[test]
fn test_written_settings_file_has_expected_text() {
    let root = settings_file(&Settings::default(), &[]);

    let text = write_tree(&root);

    assert_eq!(
        text,
        "REALCHUTE_SETTINGS\n{\n\tautoArm = False\n\tjokeActivated = False\n\tuseStaging = True\n\thideIcon = False\n}\n"
    );
}

#[test]
fn test_settings_survive_text_round_trip_without_missing_keys() {
    // Arrange
    let settings = Settings {
        auto_arm: true,
        joke_activated: true,
        use_staging: false,
        hide_icon: true,
        ..Settings::default()
    };

    // Act
    let text = write_tree(&settings_file(&settings, &[]));
    let root = parse_tree(&text).expect("parse");
    let read = Settings::read_from(root.get_node(SETTINGS_NODE).expect("section"));

    // Assert
    assert!(read.missing.is_empty());
    assert_eq!(read.settings, settings);
}

#[test]
fn test_presets_written_after_flags_in_order() {
    // Arrange
    let presets = vec![
        Preset::new("Drogue", "small")
            .with_parameter("material", "Kevlar")
            .expect("valid key"),
        Preset::new("Main", "large"),
        Preset::new("Cargo", "heavy"),
    ];

    // Act
    let text = write_tree(&settings_file(&Settings::default(), &presets));
    let root = parse_tree(&text).expect("parse");

    // Assert
    let section = root.get_node(SETTINGS_NODE).expect("section");
    assert_eq!(section.values().count(), SettingsKey::ALL.len());
    let library = PresetsLibrary::from_settings_tree(&root);
    assert_eq!(library.presets(), presets);
}

#[test]
fn test_hand_written_file_with_comments_is_readable() {
    let text = "// edited by hand\nREALCHUTE_SETTINGS {\n    autoArm = true\n    useStaging = FALSE\n}\n";

    let root = parse_tree(text).expect("parse");
    let read = Settings::read_from(root.get_node(SETTINGS_NODE).expect("section"));

    assert!(read.settings.auto_arm);
    assert!(!read.settings.use_staging);
    assert_eq!(
        read.missing,
        vec![SettingsKey::JokeActivated, SettingsKey::HideIcon]
    );
}
