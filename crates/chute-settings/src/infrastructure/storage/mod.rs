//! Storage infrastructure: settings file persistence.
//!
//! - `paths` resolves where `RealChute_Settings.cfg` lives.
//! - `settings_file` reads and writes the file through the config node codec.
//! - `memory` keeps the file text in memory for tests and tooling.
//! - `global` owns the process-wide [`SettingsStore`](crate::SettingsStore).

pub mod global;
pub mod memory;
pub mod paths;
pub mod settings_file;
