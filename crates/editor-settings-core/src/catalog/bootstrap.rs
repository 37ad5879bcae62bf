//! Bootstrap descriptor: pre-seeded projects and presets for packaged
//! distributions.
//!
//! A distribution that ships the editor in "self-contained" mode places a
//! marker file next to the executable.  The marker's contents are read as a
//! TOML bootstrap descriptor with two recognised sections:
//!
//! ```toml
//! [init_projects]
//! list = ["demos/platformer", "demos/shooter"]
//!
//! [presets]
//! "text_editor/tab_size" = 2
//! "global/default_project_path" = "/opt/editor/projects"
//! ```
//!
//! - `init_projects.list` – path fragments relative to the executable
//!   directory.  Each becomes a `projects/<name>` setting.
//! - `presets` – arbitrary key/value pairs copied into the store verbatim.
//!
//! An empty marker file is a valid, empty descriptor.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::domain::value::Value;

/// Error returned when a bootstrap descriptor cannot be parsed.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("failed to parse bootstrap descriptor: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
struct InitProjects {
    #[serde(default)]
    list: Option<Vec<String>>,
}

/// Parsed bootstrap descriptor.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct BootstrapDescriptor {
    #[serde(default)]
    init_projects: Option<InitProjects>,
    #[serde(default)]
    presets: Option<toml::Table>,
}

impl BootstrapDescriptor {
    /// Parses descriptor text.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::Parse`] if `text` is not valid TOML or a
    /// recognised section has the wrong shape.
    pub fn parse(text: &str) -> Result<Self, DescriptorError> {
        Ok(toml::from_str(text)?)
    }

    /// Whether the descriptor has an `init_projects` section with a `list` key.
    pub fn has_init_projects(&self) -> bool {
        self.init_projects
            .as_ref()
            .is_some_and(|section| section.list.is_some())
    }

    /// Returns the raw `init_projects.list` fragments (empty when absent).
    pub fn init_project_fragments(&self) -> &[String] {
        self.init_projects
            .as_ref()
            .and_then(|section| section.list.as_deref())
            .unwrap_or(&[])
    }

    /// Resolves each init project against `executable_dir` and returns the
    /// `(setting key, project path)` pairs to store.
    ///
    /// The path is `<executable_dir>/<fragment>` joined with `/` on every
    /// platform; the key is `projects/` followed by that path with every `/`
    /// replaced by `::`.  Without an executable directory the fragments are
    /// used unchanged.
    pub fn init_projects(&self, executable_dir: Option<&Path>) -> Vec<(String, String)> {
        self.init_project_fragments()
            .iter()
            .map(|fragment| {
                let path = match executable_dir {
                    Some(dir) => {
                        let base = dir.to_string_lossy();
                        format!("{}/{}", base.trim_end_matches('/'), fragment)
                    }
                    None => fragment.clone(),
                };
                (format!("projects/{}", path.replace('/', "::")), path)
            })
            .collect()
    }

    /// Whether the descriptor has a `presets` section.
    pub fn has_presets(&self) -> bool {
        self.presets.is_some()
    }

    /// Returns the preset key/value pairs in key order.
    ///
    /// Presets whose TOML shape has no [`Value`] counterpart are skipped with
    /// a warning.
    pub fn presets(&self) -> Vec<(String, Value)> {
        let Some(table) = &self.presets else {
            return Vec::new();
        };
        table
            .iter()
            .filter_map(|(key, raw)| match Value::from_toml(raw) {
                Some(value) => Some((key.clone(), value)),
                None => {
                    warn!(key = %key, "skipping bootstrap preset with unsupported value");
                    None
                }
            })
            .collect()
    }
}
