//! Integration test for the process-wide settings store.
//!
//! This file holds a single test because the store and its path are
//! process-wide: the path override must be in place before the first
//! `fetch()` and cannot be changed afterwards.

use std::sync::Arc;
use std::thread;

use chute_core::{parse_tree, Preset, PresetsLibrary, Settings, PRESET_NODE, SETTINGS_NODE};
use chute_settings::infrastructure::storage::paths::{settings_url, SETTINGS_PATH_ENV};
use chute_settings::{fetch, save_settings, SettingsStore};
use uuid::Uuid;

#[test]
fn test_fetch_returns_one_store_for_the_whole_process() {
    // Arrange: point the process at a fresh temp file
    let dir = std::env::temp_dir().join(format!("realchute_global_{}", Uuid::new_v4()));
    let path = dir.join("RealChute_Settings.cfg");
    std::env::set_var(SETTINGS_PATH_ENV, &path);

    // Act: race the first access from several threads
    let barrier = Arc::new(std::sync::Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                fetch().expect("fetch") as *const SettingsStore as usize
            })
        })
        .collect();
    let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // Assert: same instance everywhere, built from defaults
    let store = fetch().expect("fetch");
    let address = store as *const SettingsStore as usize;
    assert!(addresses.iter().all(|a| *a == address));
    assert_eq!(settings_url().expect("path"), path.as_path());
    assert!(path.exists());
    assert_eq!(store.snapshot(), Settings::default());

    // Act: change a flag and save with presets through the static entry point
    fetch().expect("fetch").update(|s| s.auto_arm = true);
    let mut library = PresetsLibrary::new();
    library.add(Preset::new("Drogue", "small"));
    save_settings(&library).expect("save");

    // Assert: the file reflects the live store
    let root = parse_tree(&std::fs::read_to_string(&path).unwrap()).expect("parse");
    let section = root.get_node(SETTINGS_NODE).expect("section");
    assert_eq!(section.get_value("autoArm"), Some("True"));
    assert_eq!(section.get_nodes(PRESET_NODE).count(), 1);
    assert!(std::ptr::eq(fetch().expect("fetch"), store));

    std::fs::remove_dir_all(&dir).ok();
}
