//! Parachute presets and the library that owns them.
//!
//! A [`Preset`] is a named bundle of parachute parameters saved by the player.
//! Presets are stored as `PRESET` child nodes of `REALCHUTE_SETTINGS`, after
//! the four settings flags.  The settings store never creates or edits
//! presets; it only asks a [`PresetSource`] for the current list when saving.

use thiserror::Error;
use tracing::warn;

use crate::domain::settings::SETTINGS_NODE;
use crate::node::ConfigNode;

/// Name of the node each preset is serialized into.
pub const PRESET_NODE: &str = "PRESET";

/// Keys written by [`Preset::to_node`] itself; parameters may not use them.
pub const RESERVED_PRESET_KEYS: [&str; 2] = ["name", "description"];

/// Errors raised while building a [`Preset`] or reading one from a node.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PresetError {
    #[error("preset node has no name")]
    MissingName,

    /// The parameter key collides with a field the preset stores itself.
    #[error("parameter key {0:?} is reserved")]
    ReservedKey(String),

    /// The parameter key cannot be written as a `key = value` line.
    #[error("parameter key {0:?} is not a valid config key")]
    InvalidKey(String),
}

/// A named parachute configuration bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub name: String,
    pub description: String,
    parameters: Vec<(String, String)>,
}

impl Preset {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    /// Adds a parameter, returning `self` for chaining.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::ReservedKey`] for `name` or `description`, and
    /// [`PresetError::InvalidKey`] for a key that would not read back as the
    /// same key: empty, padded with whitespace, or containing `=`, a brace, a
    /// line break or `//`.
    pub fn with_parameter(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, PresetError> {
        let key = key.into();
        validate_parameter_key(&key)?;
        self.parameters.push((key, value.into()));
        Ok(self)
    }

    /// Extra `key = value` pairs in file order.
    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }

    /// Serializes the preset into a `PRESET` node.
    pub fn to_node(&self) -> ConfigNode {
        let mut node = ConfigNode::named(PRESET_NODE);
        node.add_raw("name", self.name.as_str());
        node.add_raw("description", self.description.as_str());
        for (key, value) in &self.parameters {
            node.add_raw(key.as_str(), value.as_str());
        }
        node
    }

    /// Reads a preset back from a `PRESET` node.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::MissingName`] when the node has no non-empty
    /// `name` value.
    pub fn from_node(node: &ConfigNode) -> Result<Self, PresetError> {
        let name = node
            .get_value("name")
            .filter(|n| !n.is_empty())
            .ok_or(PresetError::MissingName)?;
        let description = node.get_value("description").unwrap_or_default();
        let parameters = node
            .values()
            .filter(|(k, _)| !RESERVED_PRESET_KEYS.contains(k))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters,
        })
    }
}

fn validate_parameter_key(key: &str) -> Result<(), PresetError> {
    if RESERVED_PRESET_KEYS.contains(&key) {
        return Err(PresetError::ReservedKey(key.to_string()));
    }
    let unwritable = key.is_empty()
        || key.trim() != key
        || key.contains(['=', '{', '}', '\n', '\r'])
        || key.contains("//");
    if unwritable {
        return Err(PresetError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Read-only view of an ordered preset collection.
pub trait PresetSource {
    /// Returns the current presets in iteration order.
    fn presets(&self) -> Vec<Preset>;
}

/// The in-process presets library.
#[derive(Debug, Clone, Default)]
pub struct PresetsLibrary {
    presets: Vec<Preset>,
}

impl PresetsLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `PRESET` stored under `REALCHUTE_SETTINGS` in a parsed
    /// settings file.  Presets without a name are skipped with a warning.
    pub fn from_settings_tree(root: &ConfigNode) -> Self {
        let mut library = Self::new();
        let Some(settings) = root.get_node(SETTINGS_NODE) else {
            return library;
        };

        for (index, node) in settings.get_nodes(PRESET_NODE).enumerate() {
            match Preset::from_node(node) {
                Ok(preset) => library.add(preset),
                Err(e) => warn!("skipping preset #{index}: {e}"),
            }
        }
        library
    }

    /// Adds a preset.  A preset with the same name is replaced in place;
    /// otherwise the new one is appended.
    pub fn add(&mut self, preset: Preset) {
        match self.presets.iter_mut().find(|p| p.name == preset.name) {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
    }

    /// Removes the preset called `name`, returning it if it existed.
    pub fn remove(&mut self, name: &str) -> Option<Preset> {
        let index = self.presets.iter().position(|p| p.name == name)?;
        Some(self.presets.remove(index))
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl PresetSource for PresetsLibrary {
    fn presets(&self) -> Vec<Preset> {
        self.presets.clone()
    }
}
