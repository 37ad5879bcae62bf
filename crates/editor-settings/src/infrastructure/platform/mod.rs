//! Host platform adapters implementing
//! [`HostEnvironment`](crate::application::host::HostEnvironment).
//!
//! | Type         | Used by                | Source of facts                       |
//! |--------------|------------------------|---------------------------------------|
//! | `SystemHost` | the binary             | `std::env`, `current_exe`, `if-addrs` |
//! | `FixedHost`  | integration tests      | values given at construction          |
//!
//! [`FixedHost`] is always compiled (not guarded by `#[cfg(test)]`) so the
//! integration tests under `tests/` can drive the full startup lifecycle
//! against a temporary directory without touching the real user profile.

pub mod fixed;
pub mod system;

pub use fixed::FixedHost;
pub use system::SystemHost;
