//! The real machine.

use std::net::IpAddr;
use std::path::PathBuf;

use tracing::warn;

use crate::application::host::HostEnvironment;

/// [`HostEnvironment`] backed by the running process and operating system.
///
/// The monitor count and project path are not discoverable from a headless
/// process, so they are supplied by the caller (the CLI takes them from
/// `--screens` and `--project`).
#[derive(Debug, Clone)]
pub struct SystemHost {
    screen_count: usize,
    project_resource_path: String,
}

impl SystemHost {
    pub fn new(project_resource_path: impl Into<String>) -> Self {
        Self {
            screen_count: 1,
            project_resource_path: project_resource_path.into(),
        }
    }

    pub fn with_screen_count(mut self, screen_count: usize) -> Self {
        self.screen_count = screen_count;
        self
    }
}

impl HostEnvironment for SystemHost {
    fn executable_dir(&self) -> Option<PathBuf> {
        let exe = std::env::current_exe().ok()?;
        exe.parent().map(PathBuf::from)
    }

    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }

    fn local_addresses(&self) -> Vec<IpAddr> {
        match if_addrs::get_if_addrs() {
            Ok(interfaces) => interfaces.iter().map(|iface| iface.ip()).collect(),
            Err(e) => {
                warn!("cannot enumerate network interfaces: {e}");
                Vec::new()
            }
        }
    }

    fn screen_count(&self) -> usize {
        self.screen_count
    }

    fn project_resource_path(&self) -> String {
        self.project_resource_path.clone()
    }
}
