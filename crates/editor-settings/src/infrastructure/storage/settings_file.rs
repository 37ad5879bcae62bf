//! `editor_settings.toml` reading and writing.
//!
//! The file is a plain TOML document:
//!
//! ```toml
//! format_version = 1
//! next_order = 72
//!
//! [[setting]]
//! key = "text_editor/tab_size"
//! order = 31
//! hidden = false
//!
//! [setting.value]
//! type = "int"
//! value = 4
//!
//! [[hint]]
//! key = "text_editor/tab_size"
//! value_type = "int"
//! kind = "range"
//! hint_string = "1, 64, 1"
//! ```
//!
//! Every stored entry is written, hidden ones included, together with its
//! order integer so that a reload reproduces the enumeration order exactly.
//!
//! # Atomic writes
//!
//! [`save`] writes to `editor_settings.toml.tmp` first and then renames it
//! over the real file.  A crash in the middle of writing leaves the previous
//! file intact instead of a truncated one.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use editor_settings_core::{HintKind, PropertyHint, PropertyStore, SettingEntry, Value, ValueType};

/// Version written to new files.  Files with a newer version are rejected.
pub const FORMAT_VERSION: u32 = 1;

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsFileError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The store could not be serialized to TOML.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The file was written by a newer editor.
    #[error("unsupported settings format version {found} (newest supported is {FORMAT_VERSION})")]
    UnsupportedVersion { found: u32 },
}

// ── File schema ───────────────────────────────────────────────────────────────

/// On-disk representation of the whole store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettingsDocument {
    pub format_version: u32,
    /// Order counter at the time of saving.
    #[serde(default)]
    pub next_order: u64,
    #[serde(default, rename = "setting")]
    pub settings: Vec<SettingRecord>,
    #[serde(default, rename = "hint")]
    pub hints: Vec<HintRecord>,
}

/// One `[[setting]]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettingRecord {
    pub key: String,
    pub order: u64,
    #[serde(default)]
    pub hidden: bool,
    pub value: Value,
}

/// One `[[hint]]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HintRecord {
    pub key: String,
    pub value_type: ValueType,
    #[serde(default)]
    pub kind: HintKind,
    #[serde(default)]
    pub hint_string: String,
}

impl SettingsDocument {
    /// Captures every entry and hint of `store`.
    pub fn from_store(store: &PropertyStore) -> Self {
        let settings = store
            .entries()
            .into_iter()
            .map(|e| SettingRecord {
                key: e.key,
                order: e.order,
                hidden: e.hidden,
                value: e.value,
            })
            .collect();

        let hints = store
            .hints()
            .iter()
            .map(|(key, hint)| HintRecord {
                key: key.to_string(),
                value_type: hint.value_type,
                kind: hint.kind,
                hint_string: hint.hint_string.clone(),
            })
            .collect();

        Self {
            format_version: FORMAT_VERSION,
            next_order: store.next_order(),
            settings,
            hints,
        }
    }

    /// Merges this document into `store`.
    ///
    /// Saved entries replace catalog entries and keep their saved orders (see
    /// [`PropertyStore::restore`]).  Saved hints are only added for keys the
    /// catalog has no hint for, so host-dependent catalog hints (such as the
    /// monitor list) always reflect the current machine.
    pub fn merge_into(self, store: &mut PropertyStore) {
        let entries = self
            .settings
            .into_iter()
            .map(|r| SettingEntry {
                key: r.key,
                value: r.value,
                order: r.order,
                hidden: r.hidden,
            })
            .collect();
        store.restore(entries, self.next_order);

        for record in self.hints {
            if store.hints().contains(&record.key) {
                continue;
            }
            store.add_hint(
                record.key,
                PropertyHint::new(record.value_type, record.kind, record.hint_string),
            );
        }
    }
}

// ── File I/O ──────────────────────────────────────────────────────────────────

/// Parses settings file text.
///
/// # Errors
///
/// Returns [`SettingsFileError::Parse`] for malformed TOML and
/// [`SettingsFileError::UnsupportedVersion`] for files from a newer format.
pub fn parse(text: &str) -> Result<SettingsDocument, SettingsFileError> {
    let document: SettingsDocument = toml::from_str(text)?;
    if document.format_version > FORMAT_VERSION {
        return Err(SettingsFileError::UnsupportedVersion {
            found: document.format_version,
        });
    }
    Ok(document)
}

/// Loads the settings file at `path`.
///
/// # Errors
///
/// Returns [`SettingsFileError::Io`] if the file cannot be read, plus the
/// errors of [`parse`].
pub fn load(path: &Path) -> Result<SettingsDocument, SettingsFileError> {
    let text = std::fs::read_to_string(path).map_err(|source| SettingsFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document = parse(&text)?;
    debug!(path = %path.display(), entries = document.settings.len(), "settings file loaded");
    Ok(document)
}

/// Writes the full contents of `store` to `path`.
///
/// # Errors
///
/// Returns [`SettingsFileError::Serialize`] if the store cannot be rendered
/// and [`SettingsFileError::Io`] if the file cannot be written.
pub fn save(path: &Path, store: &PropertyStore) -> Result<(), SettingsFileError> {
    let text = toml::to_string_pretty(&SettingsDocument::from_store(store))?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, text).map_err(|source| SettingsFileError::Io {
        path: tmp.clone(),
        source,
    })?;
    std::fs::rename(&tmp, path).map_err(|source| SettingsFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), entries = store.len(), "settings file written");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
