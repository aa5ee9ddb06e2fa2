//! The RealChute settings value object.
//!
//! [`Settings`] holds the four persisted flags plus the in-memory window
//! position.  This module knows how the flags map onto the
//! `REALCHUTE_SETTINGS` node but does no file I/O.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::node::{ConfigNode, ConfigValue, ValueError};

/// Name of the node holding the settings inside the settings file.
pub const SETTINGS_NODE: &str = "REALCHUTE_SETTINGS";

/// 2-D float vector used for the settings window position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl ConfigValue for Vector2 {
    fn to_config_string(&self) -> String {
        format!("{},{}", self.x, self.y)
    }

    fn from_config_str(raw: &str) -> Result<Self, ValueError> {
        let (x, y) = raw
            .split_once(',')
            .ok_or_else(|| ValueError::new(raw, "Vector2"))?;
        let x = f32::from_config_str(x).map_err(|_| ValueError::new(raw, "Vector2"))?;
        let y = f32::from_config_str(y).map_err(|_| ValueError::new(raw, "Vector2"))?;
        Ok(Self { x, y })
    }
}

/// One of the four persisted boolean flags.
///
/// The order of [`SettingsKey::ALL`] is the order the keys are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsKey {
    /// Parachutes arm automatically when staged.
    AutoArm,
    /// The April Fools joke is active.
    JokeActivated,
    /// Parachutes can be deployed through staging.
    UseStaging,
    /// The Space Center toolbar icon is hidden.
    HideIcon,
}

impl SettingsKey {
    pub const ALL: [SettingsKey; 4] = [
        SettingsKey::AutoArm,
        SettingsKey::JokeActivated,
        SettingsKey::UseStaging,
        SettingsKey::HideIcon,
    ];

    /// The key as it appears in the settings file.
    pub fn as_str(self) -> &'static str {
        match self {
            SettingsKey::AutoArm => "autoArm",
            SettingsKey::JokeActivated => "jokeActivated",
            SettingsKey::UseStaging => "useStaging",
            SettingsKey::HideIcon => "hideIcon",
        }
    }
}

impl fmt::Display for SettingsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingsKey {
    type Err = String;

    /// Accepts the file key (`autoArm`) or its snake_case form (`auto_arm`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s.chars().filter(|c| *c != '_').collect();
        SettingsKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(&normalised))
            .ok_or_else(|| format!("unknown settings key {s:?}"))
    }
}

/// RealChute settings.
///
/// `position` is kept in memory for the settings window and is never written
/// to the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub auto_arm: bool,
    pub joke_activated: bool,
    pub use_staging: bool,
    pub position: Vector2,
    pub hide_icon: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_arm: false,
            joke_activated: false,
            use_staging: true,
            position: Vector2::new(100.0, 100.0),
            hide_icon: false,
        }
    }
}

/// Result of reading [`Settings`] out of a settings node.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsRead {
    /// Settings with defaults substituted for every missing key.
    pub settings: Settings,
    /// Keys that were absent or unreadable, in [`SettingsKey::ALL`] order.
    pub missing: Vec<SettingsKey>,
}

impl SettingsRead {
    /// Returns `true` when the node must be rewritten to be complete.
    pub fn needs_repair(&self) -> bool {
        !self.missing.is_empty()
    }
}

impl Settings {
    pub fn get(&self, key: SettingsKey) -> bool {
        match key {
            SettingsKey::AutoArm => self.auto_arm,
            SettingsKey::JokeActivated => self.joke_activated,
            SettingsKey::UseStaging => self.use_staging,
            SettingsKey::HideIcon => self.hide_icon,
        }
    }

    pub fn set(&mut self, key: SettingsKey, value: bool) {
        let slot = match key {
            SettingsKey::AutoArm => &mut self.auto_arm,
            SettingsKey::JokeActivated => &mut self.joke_activated,
            SettingsKey::UseStaging => &mut self.use_staging,
            SettingsKey::HideIcon => &mut self.hide_icon,
        };
        *slot = value;
    }

    /// Reads the four flags from a `REALCHUTE_SETTINGS` node.
    ///
    /// A key that is absent, or whose value is not a boolean, keeps its
    /// compiled-in default and is reported in [`SettingsRead::missing`].  A
    /// key that reads successfully is never reported.  `position` always
    /// takes its default.
    pub fn read_from(node: &ConfigNode) -> SettingsRead {
        let mut settings = Settings::default();
        let mut missing = Vec::new();

        for key in SettingsKey::ALL {
            match node.get_parsed::<bool>(key.as_str()) {
                Some(Ok(value)) => settings.set(key, value),
                Some(Err(e)) => {
                    debug!("settings key {key} unreadable ({e}); using default");
                    missing.push(key);
                }
                None => {
                    debug!("settings key {key} absent; using default");
                    missing.push(key);
                }
            }
        }

        SettingsRead { settings, missing }
    }

    /// Appends the four flags to `node` in file order.
    pub fn write_to(&self, node: &mut ConfigNode) {
        for key in SettingsKey::ALL {
            node.add_value(key.as_str(), self.get(key));
        }
    }

    /// Builds a fresh `REALCHUTE_SETTINGS` node holding only the four flags.
    pub fn to_node(&self) -> ConfigNode {
        let mut node = ConfigNode::named(SETTINGS_NODE);
        self.write_to(&mut node);
        node
    }
}
