//! Application layer: the settings load/repair/save lifecycle.
//!
//! Code here works against the [`repository::SettingsRepository`] trait and
//! never touches the file system directly, so every step of the lifecycle can
//! be exercised in unit tests with an in-memory or mocked repository.
//!
//! # Sub-modules
//!
//! - **`repository`** – The storage abstraction and its error type.
//!
//! - **`load_settings`** – Reads the settings on first access, creating the
//!   file when absent and repairing it when keys are missing.
//!
//! - **`save_settings`** – Builds the full settings tree (flags plus presets)
//!   and overwrites the stored file.
//!
//! - **`store`** – [`store::SettingsStore`], the owner of the live settings.

pub mod load_settings;
pub mod repository;
pub mod save_settings;
pub mod store;
