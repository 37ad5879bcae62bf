//! Settings directory resolution.
//!
//! Decides where settings live and makes sure the directory tree exists:
//!
//! - Self-contained install (marker file `._sc_` beside the executable):
//!   `<exe_dir>/editor_data`, and the marker itself is read as the bootstrap
//!   descriptor.
//! - Windows (`APPDATA` set): `%APPDATA%\Godot`
//! - Elsewhere (`HOME` set): `~/.godot`
//!
//! An explicit root override (CLI `--config-root`) wins over all of these.
//!
//! Under the root the following tree is created on first run:
//!
//! ```text
//! <root>/
//!   editor_settings.toml      main settings file
//!   templates/                export templates
//!   tmp/                      scratch files
//!   config/
//!     <project>-<digest>/     per-project files (favorite_dirs, recent_dirs)
//! ```
//!
//! # Per-project directory names
//!
//! The project directory is named after the last component of the project
//! resource path plus a SHA-256 hex digest of the full path.  Two projects
//! that are both called `game` but live in different places therefore get
//! different directories, while the name stays recognisable when browsing.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, warn};

use editor_settings_core::{BootstrapDescriptor, DescriptorError};

use crate::application::host::HostEnvironment;

/// File name of the self-contained install marker.
pub const SELF_CONTAINED_MARKER: &str = "._sc_";
/// Directory next to the executable used by self-contained installs.
pub const SELF_CONTAINED_DIR: &str = "editor_data";
/// File name of the main settings file inside the root.
pub const SETTINGS_FILE_NAME: &str = "editor_settings.toml";
/// Short product name used for the per-user directory.
pub const APP_SHORT_NAME: &str = "godot";

/// Sub-directories created under the settings root.
const ROOT_SUBDIRS: [&str; 3] = ["templates", "tmp", "config"];

/// Error type for settings directory resolution.
#[derive(Debug, Error)]
pub enum LocationError {
    /// Neither an override, a marker, `APPDATA` nor `HOME` is available.
    #[error("could not determine a settings directory: no APPDATA or HOME")]
    NoHomeDirectory,

    /// The directory the settings root should live in does not exist.
    #[error("cannot find path for config directory: {0}")]
    BaseMissing(PathBuf),

    /// The settings root could not be created.
    #[error("cannot create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Caller-supplied location options.
#[derive(Debug, Clone, Default)]
pub struct LocationOptions {
    /// Use this directory as the settings root instead of resolving one.
    pub root_override: Option<PathBuf>,
}

/// Where the settings root should be, before anything is created on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RootChoice {
    pub root: PathBuf,
    /// Path of the self-contained marker, when one was found.
    pub marker: Option<PathBuf>,
}

/// Fully resolved, existing settings location.  Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigLocation {
    settings_dir: PathBuf,
    project_dir_name: String,
}

impl ConfigLocation {
    /// Root settings directory.
    pub fn settings_dir(&self) -> &Path {
        &self.settings_dir
    }

    /// Path of the main settings file.
    pub fn config_file(&self) -> PathBuf {
        self.settings_dir.join(SETTINGS_FILE_NAME)
    }

    /// Name of the per-project sub-directory under `config/`.
    pub fn project_dir_name(&self) -> &str {
        &self.project_dir_name
    }

    /// Per-project settings directory.
    pub fn project_settings_dir(&self) -> PathBuf {
        self.settings_dir
            .join("config")
            .join(&self.project_dir_name)
    }
}

/// Chooses the settings root for `host`.
///
/// # Errors
///
/// Returns [`LocationError::NoHomeDirectory`] when no candidate applies.
pub fn choose_root(
    host: &dyn HostEnvironment,
    options: &LocationOptions,
) -> Result<RootChoice, LocationError> {
    if let Some(root) = &options.root_override {
        return Ok(RootChoice {
            root: root.clone(),
            marker: None,
        });
    }

    if let Some(exe_dir) = host.executable_dir() {
        let marker = exe_dir.join(SELF_CONTAINED_MARKER);
        if marker.is_file() {
            debug!(marker = %marker.display(), "self-contained install detected");
            return Ok(RootChoice {
                root: exe_dir.join(SELF_CONTAINED_DIR),
                marker: Some(marker),
            });
        }
    }

    if let Some(appdata) = host.env_var("APPDATA") {
        return Ok(RootChoice {
            root: PathBuf::from(appdata).join(capitalize(APP_SHORT_NAME)),
            marker: None,
        });
    }

    if let Some(home) = host.env_var("HOME") {
        return Ok(RootChoice {
            root: PathBuf::from(home).join(format!(".{}", APP_SHORT_NAME.to_lowercase())),
            marker: None,
        });
    }

    Err(LocationError::NoHomeDirectory)
}

/// Reads the self-contained marker as a bootstrap descriptor.
///
/// An unreadable or malformed marker is logged and treated as absent.
pub fn read_marker_descriptor(marker: &Path) -> Option<BootstrapDescriptor> {
    let text = match std::fs::read_to_string(marker) {
        Ok(text) => text,
        Err(e) => {
            warn!(marker = %marker.display(), "cannot read bootstrap descriptor: {e}");
            return None;
        }
    };
    match BootstrapDescriptor::parse(&text) {
        Ok(descriptor) => Some(descriptor),
        Err(DescriptorError::Parse(e)) => {
            warn!(marker = %marker.display(), "ignoring malformed bootstrap descriptor: {e}");
            None
        }
    }
}

/// Creates the settings tree under `root` and returns the resolved location.
///
/// The parent of `root` must already exist.  Failure to create `templates/`,
/// `tmp/` or the per-project directory is logged but not fatal.
///
/// # Errors
///
/// Returns [`LocationError::BaseMissing`] if the parent of `root` is missing,
/// or [`LocationError::CreateDir`] if `root` or `root/config` cannot be
/// created.
pub fn prepare(root: &Path, project_resource_path: &str) -> Result<ConfigLocation, LocationError> {
    if let Some(base) = root.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !base.is_dir() {
            return Err(LocationError::BaseMissing(base.to_path_buf()));
        }
    }

    create_dir(root)?;

    for sub in ROOT_SUBDIRS {
        let dir = root.join(sub);
        if let Err(e) = create_dir(&dir) {
            if sub == "config" {
                return Err(e);
            }
            warn!("{e}");
        }
    }

    let project_dir_name = project_dir_name(project_resource_path);
    let location = ConfigLocation {
        settings_dir: root.to_path_buf(),
        project_dir_name,
    };
    if let Err(e) = create_dir(&location.project_settings_dir()) {
        warn!("{e}");
    }

    Ok(location)
}

/// Derives the per-project directory name from the project resource path.
pub fn project_dir_name(project_resource_path: &str) -> String {
    let trimmed = project_resource_path.trim_end_matches(['/', '\\']);
    let file_name = trimmed
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let digest = Sha256::digest(trimmed.as_bytes());
    format!("{file_name}-{digest:x}")
}

fn create_dir(path: &Path) -> Result<(), LocationError> {
    if path.is_dir() {
        return Ok(());
    }
    std::fs::create_dir(path).map_err(|source| LocationError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
