//! Infrastructure layer for the settings service.
//!
//! Contains OS-facing adapters: settings directory resolution, the settings
//! file codec, the per-project directory lists, and the host platform
//! implementations of [`crate::application::host::HostEnvironment`].

pub mod platform;
pub mod storage;
