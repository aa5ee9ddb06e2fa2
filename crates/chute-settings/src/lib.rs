//! chute-settings library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.

pub mod application;
pub mod infrastructure;

pub use application::repository::{SettingsError, SettingsRepository};
pub use application::store::SettingsStore;
pub use infrastructure::storage::global::{fetch, save_settings};
