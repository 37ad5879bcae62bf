//! # editor-settings-core
//!
//! Shared library containing the editor settings domain: the typed value
//! union, the ordered property store, the presentation hint registry, and the
//! default settings catalog with its bootstrap descriptor.
//!
//! This crate has zero dependencies on the file system, environment
//! variables, or network interfaces.  Anything host-specific (executable
//! directory, screen count, platform family) is passed in by the caller.
//!
//! # Architecture overview (for beginners)
//!
//! An editor keeps hundreds of small preferences: colors for the text editor,
//! which mouse modifier orbits the 3D camera, how big file dialog thumbnails
//! are.  Instead of one struct with a field per preference, the editor treats
//! them as a *property bag*: string keys such as `"text_editor/tab_size"`
//! mapped to typed values.  New preferences can be added by any editor
//! component without touching a central schema.
//!
//! This crate defines:
//!
//! - **`domain`** – The property bag itself.  [`Value`] is the closed set of
//!   value types, [`PropertyStore`] keeps keys in a stable presentation order,
//!   and [`HintRegistry`] holds the UI metadata (ranges, enum choices, file
//!   patterns) for property editors.
//!
//! - **`catalog`** – The fixed list of default settings every fresh install
//!   starts with, plus the optional [`BootstrapDescriptor`] a packaged
//!   distribution can ship to pre-seed projects and presets.

pub mod catalog;
pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `editor_settings_core::PropertyStore` instead of the full module path.
pub use catalog::bootstrap::{BootstrapDescriptor, DescriptorError};
pub use catalog::defaults::{
    catalog_entries, load_defaults, screen_hint, CatalogContext, CatalogEntry, HostPlatform,
};
pub use domain::hints::{HintKind, HintRegistry, PropertyHint};
pub use domain::store::{
    PropertyInfo, PropertyStore, PropertyUsage, SettingEntry, StoreError,
};
pub use domain::value::{Color, ColorParseError, Value, ValueType, Vector2};
