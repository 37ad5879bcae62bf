//! editor-settings library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does this crate do? (for beginners)
//!
//! `editor-settings-core` knows how to keep settings in memory.  This crate
//! makes them survive a restart:
//!
//! 1. On startup it finds the per-user settings directory (or, for a
//!    self-contained install, a directory next to the executable) and
//!    creates its sub-folders.
//! 2. It loads the saved settings file and merges it over the default
//!    catalog, or falls back to the defaults (plus an optional bootstrap
//!    descriptor) when there is nothing usable on disk.
//! 3. It recomputes host-dependent values such as the network debug host.
//! 4. While the editor runs, every change is broadcast to subscribers.
//! 5. On shutdown it writes everything back.
//!
//! No step in this sequence is allowed to abort the editor: failures are
//! logged through `tracing` and the service degrades to defaults.

/// Application layer: the settings service and its collaborator traits.
pub mod application;

/// Infrastructure layer: file storage and host platform adapters.
pub mod infrastructure;

pub use application::editor_settings::{EditorSettings, SaveError};
pub use application::events::SettingsEvent;
pub use application::host::HostEnvironment;
pub use infrastructure::platform::{FixedHost, SystemHost};
pub use infrastructure::storage::location::{ConfigLocation, LocationOptions};
