//! # chute-core
//!
//! Shared library for the RealChute settings tooling containing the config
//! node tree, its text codec, and the settings/preset domain types.
//!
//! This crate performs no file-system access.  Reading and writing the
//! settings file is the job of `chute-settings`.
//!
//! # Architecture overview
//!
//! - **`node`** – The hierarchical key/value tree used by the game for every
//!   `.cfg` file, plus the codec turning it into text and back.  A node has a
//!   name, an ordered list of `key = value` pairs and an ordered list of
//!   child nodes.
//!
//! - **`domain`** – The `Settings` value object with its compiled-in defaults,
//!   the `Vector2` window position, and the `Preset` records appended to the
//!   settings file by the presets library.

pub mod domain;
pub mod node;

pub use domain::preset::{
    Preset, PresetError, PresetSource, PresetsLibrary, PRESET_NODE, RESERVED_PRESET_KEYS,
};
pub use domain::settings::{Settings, SettingsKey, SettingsRead, Vector2, SETTINGS_NODE};
pub use node::codec::{parse_tree, write_tree, NodeError};
pub use node::tree::ConfigNode;
pub use node::value::{ConfigValue, ValueError};
