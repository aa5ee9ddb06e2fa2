//! Infrastructure layer for the settings store.
//!
//! Contains the file-system adapters: settings path resolution, the
//! file-backed repository, and the process-wide store instance.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `chute_core`, but MUST NOT be imported by the `application` layer outside
//! of tests.

pub mod storage;
