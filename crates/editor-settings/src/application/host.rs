//! Host environment abstraction.
//!
//! Everything the settings service needs from the operating system goes
//! through [`HostEnvironment`], so the startup lifecycle can be tested with a
//! fixed, in-memory host instead of the real machine.

use std::net::IpAddr;
use std::path::PathBuf;

/// Facts about the machine and process the settings service runs in.
#[cfg_attr(test, mockall::automock)]
pub trait HostEnvironment: Send + Sync {
    /// Directory containing the running editor executable.
    fn executable_dir(&self) -> Option<PathBuf>;

    /// Value of environment variable `name`; `None` when unset or empty.
    fn env_var(&self, name: &str) -> Option<String>;

    /// Addresses of all local network interfaces, loopback included.
    fn local_addresses(&self) -> Vec<IpAddr>;

    /// Number of attached monitors.
    fn screen_count(&self) -> usize;

    /// Resource path of the currently open project.  Distinct projects get
    /// distinct per-project settings directories derived from it.
    fn project_resource_path(&self) -> String;
}
