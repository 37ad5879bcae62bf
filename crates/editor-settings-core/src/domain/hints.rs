//! Property hint registry.
//!
//! A hint tells a property editor how to present a setting: an integer with a
//! slider range, an integer chosen from a named list, a string that is really
//! a file path with a glob filter.  Hints are keyed by the same strings as
//! settings but live in their own map; a key without a hint is presented
//! according to its value type alone.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::value::ValueType;

/// Kind of presentation hint attached to a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    /// No special presentation.
    #[default]
    None,
    /// Numeric range, hint string `"min,max,step"`.
    Range,
    /// Integer index into a comma-separated list of labels, or a string
    /// restricted to a comma-separated list of candidates.
    Enum,
    /// Absolute file path; hint string is a glob filter such as `"*.fnt"`.
    GlobalFile,
    /// Absolute directory path.
    GlobalDir,
}

/// Presentation metadata for one setting key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyHint {
    /// Type the editor widget should edit.
    pub value_type: ValueType,
    pub kind: HintKind,
    /// Parameter of `kind`; empty when the kind takes none.
    #[serde(default)]
    pub hint_string: String,
}

impl PropertyHint {
    pub fn new(value_type: ValueType, kind: HintKind, hint_string: impl Into<String>) -> Self {
        Self {
            value_type,
            kind,
            hint_string: hint_string.into(),
        }
    }

    pub fn range(value_type: ValueType, range: impl Into<String>) -> Self {
        Self::new(value_type, HintKind::Range, range)
    }

    pub fn enumeration(value_type: ValueType, labels: impl Into<String>) -> Self {
        Self::new(value_type, HintKind::Enum, labels)
    }

    pub fn global_file(filter: impl Into<String>) -> Self {
        Self::new(ValueType::String, HintKind::GlobalFile, filter)
    }

    pub fn global_dir() -> Self {
        Self::new(ValueType::String, HintKind::GlobalDir, "")
    }
}

/// Key-indexed map of [`PropertyHint`]s.
///
/// Backed by a `BTreeMap` so iteration (and therefore the persisted hint
/// list) is deterministic.  Hints are only ever added or replaced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HintRegistry {
    hints: BTreeMap<String, PropertyHint>,
}

impl HintRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the hint for `key`.
    pub fn add_hint(&mut self, key: impl Into<String>, hint: PropertyHint) {
        self.hints.insert(key.into(), hint);
    }

    pub fn get(&self, key: &str) -> Option<&PropertyHint> {
        self.hints.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.hints.contains_key(key)
    }

    /// Iterates over all hints in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyHint)> {
        self.hints.iter().map(|(k, h)| (k.as_str(), h))
    }

    pub fn len(&self) -> usize {
        self.hints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }
}
