//! Application layer for the settings service.
//!
//! # Sub-modules
//!
//! - **`editor_settings`** – The [`editor_settings::EditorSettings`] service:
//!   startup lifecycle, locked get/set access, save and shutdown.
//!
//! - **`events`** – Change notifications broadcast to interested editor
//!   components.
//!
//! - **`host`** – The [`host::HostEnvironment`] trait through which the
//!   service asks the platform for the executable directory, environment
//!   variables, network interfaces and screen count.
//!
//! - **`debug_host`** – Choosing the network debug host from the local
//!   interface addresses.

pub mod debug_host;
pub mod editor_settings;
pub mod events;
pub mod host;
