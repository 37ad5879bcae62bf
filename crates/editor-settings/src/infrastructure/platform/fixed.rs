//! A host whose every fact is chosen up front.

use std::collections::HashMap;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::application::host::HostEnvironment;

/// [`HostEnvironment`] returning fixed values.  Makes no OS calls.
///
/// # Example
///
/// ```
/// use editor_settings::infrastructure::platform::FixedHost;
/// use editor_settings::HostEnvironment;
///
/// let host = FixedHost::new("/projects/game")
///     .with_env("HOME", "/tmp/home")
///     .with_addresses(&["192.168.1.20"]);
/// assert_eq!(host.env_var("HOME").as_deref(), Some("/tmp/home"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixedHost {
    pub executable_dir: Option<PathBuf>,
    pub env: HashMap<String, String>,
    pub addresses: Vec<IpAddr>,
    pub screen_count: usize,
    pub project_resource_path: String,
}

impl FixedHost {
    /// A single-monitor host with no environment, no executable directory
    /// and only the loopback interface.
    pub fn new(project_resource_path: impl Into<String>) -> Self {
        Self {
            executable_dir: None,
            env: HashMap::new(),
            addresses: vec![IpAddr::from([127, 0, 0, 1])],
            screen_count: 1,
            project_resource_path: project_resource_path.into(),
        }
    }

    pub fn with_executable_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.executable_dir = Some(dir.into());
        self
    }

    pub fn with_env(mut self, name: &str, value: impl Into<String>) -> Self {
        self.env.insert(name.to_string(), value.into());
        self
    }

    /// Appends parsed `addresses`; unparseable entries are skipped.
    pub fn with_addresses(mut self, addresses: &[&str]) -> Self {
        self.addresses
            .extend(addresses.iter().filter_map(|a| a.parse::<IpAddr>().ok()));
        self
    }

    pub fn with_screen_count(mut self, screen_count: usize) -> Self {
        self.screen_count = screen_count;
        self
    }
}

impl HostEnvironment for FixedHost {
    fn executable_dir(&self) -> Option<PathBuf> {
        self.executable_dir.clone()
    }

    fn env_var(&self, name: &str) -> Option<String> {
        self.env.get(name).filter(|v| !v.is_empty()).cloned()
    }

    fn local_addresses(&self) -> Vec<IpAddr> {
        self.addresses.clone()
    }

    fn screen_count(&self) -> usize {
        self.screen_count
    }

    fn project_resource_path(&self) -> String {
        self.project_resource_path.clone()
    }
}
