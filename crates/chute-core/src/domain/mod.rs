//! Domain types for the RealChute settings.
//!
//! Pure types with no file-system access: the settings value object and the
//! presets that get appended to the settings file.

pub mod preset;
pub mod settings;
