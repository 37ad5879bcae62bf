//! Ordered property store.
//!
//! The store maps setting keys to [`Value`]s.  Each key also carries an
//! **order** integer assigned when the key is first inserted; enumeration
//! sorts by it, so property editors list settings in a stable, meaningful
//! sequence (the sequence in which the default catalog defines them) rather
//! than hash or alphabetical order.
//!
//! # Order invariant
//!
//! Every live key has exactly one order value, unique across the store.
//! Order values come from a running counter that only ever grows: erasing a
//! key does not return its order to the pool, and [`PropertyStore::raise_order`]
//! draws a fresh value from the same counter.
//!
//! # Key conventions
//!
//! Keys are hierarchical by convention only (`"3d_editor/zoom_style"`); the
//! store does not model the hierarchy.  Keys beginning with an underscore are
//! storage-only: they are persisted but reported with
//! [`PropertyUsage::Storage`] so editor UIs skip them.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::domain::hints::{HintKind, HintRegistry, PropertyHint};
use crate::domain::value::{Value, ValueType};

/// Errors reported by [`PropertyStore`] operations on specific keys.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    /// The operation requires the key to exist.
    #[error("setting not found: {0}")]
    KeyNotFound(String),
}

/// How a property is used by consumers of [`PropertyStore::enumerate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyUsage {
    /// Persisted, not shown in the editor (keys starting with `_`).
    Storage,
    /// Persisted and shown in the editor.
    StorageAndEditor,
}

impl PropertyUsage {
    fn for_key(key: &str) -> Self {
        if key.starts_with('_') {
            PropertyUsage::Storage
        } else {
            PropertyUsage::StorageAndEditor
        }
    }
}

/// Presentation record produced by [`PropertyStore::enumerate`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PropertyInfo {
    pub name: String,
    pub value_type: ValueType,
    pub order: u64,
    pub hint: HintKind,
    pub hint_string: String,
    pub usage: PropertyUsage,
}

/// A full stored entry, including hidden ones.  Used for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingEntry {
    pub key: String,
    pub value: Value,
    pub order: u64,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    value: Value,
    order: u64,
    hidden: bool,
}

/// Insertion-ordered mapping from setting keys to values, plus the hint
/// registry that decorates them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyStore {
    props: HashMap<String, Slot>,
    hints: HintRegistry,
    next_order: u64,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store whose order counter starts at `next_order`.
    ///
    /// Used when a store replaces an earlier one, so that orders handed out
    /// by the replacement never repeat ones the earlier store already used.
    pub fn continuing_from(next_order: u64) -> Self {
        Self {
            next_order,
            ..Self::default()
        }
    }

    /// Inserts, updates, or removes a setting.
    ///
    /// `Value::Nil` removes `key` (no error if it is absent).  Any other value
    /// inserts or replaces; a fresh order is assigned only on first insertion,
    /// so updating a value never moves it in enumeration.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();

        if value.is_nil() {
            self.props.remove(&key);
            return;
        }

        match self.props.get_mut(&key) {
            Some(slot) => slot.value = value,
            None => {
                let order = self.take_order();
                self.props.insert(
                    key,
                    Slot {
                        value,
                        order,
                        hidden: false,
                    },
                );
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.props.get(key).map(|slot| &slot.value)
    }

    pub fn has(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }

    /// Removes `key` unconditionally.  No-op if absent.
    pub fn erase(&mut self, key: &str) {
        self.props.remove(key);
    }

    /// Returns the stored value of `key`, inserting `default` first if the
    /// key is absent.
    pub fn define(&mut self, key: &str, default: impl Into<Value>) -> Value {
        if let Some(existing) = self.get(key) {
            return existing.clone();
        }
        let default = default.into();
        self.set(key, default.clone());
        default
    }

    /// Moves `key` to the end of the enumeration order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::KeyNotFound`] if `key` is not stored.
    pub fn raise_order(&mut self, key: &str) -> Result<(), StoreError> {
        if !self.props.contains_key(key) {
            return Err(StoreError::KeyNotFound(key.to_string()));
        }
        let order = self.take_order();
        if let Some(slot) = self.props.get_mut(key) {
            slot.order = order;
        }
        Ok(())
    }

    /// Hides or shows `key` in [`PropertyStore::enumerate`].  Hidden keys are
    /// still persisted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::KeyNotFound`] if `key` is not stored.
    pub fn set_hidden_from_editor(&mut self, key: &str, hidden: bool) -> Result<(), StoreError> {
        let slot = self
            .props
            .get_mut(key)
            .ok_or_else(|| StoreError::KeyNotFound(key.to_string()))?;
        slot.hidden = hidden;
        Ok(())
    }

    pub fn order_of(&self, key: &str) -> Option<u64> {
        self.props.get(key).map(|slot| slot.order)
    }

    /// Returns every non-hidden setting sorted ascending by order.
    ///
    /// When a hint is registered for a key, its value type, hint kind and hint
    /// string replace the ones derived from the stored value.
    pub fn enumerate(&self) -> Vec<PropertyInfo> {
        let mut visible: Vec<(&String, &Slot)> =
            self.props.iter().filter(|(_, slot)| !slot.hidden).collect();
        visible.sort_by_key(|(_, slot)| slot.order);

        visible
            .into_iter()
            .map(|(key, slot)| {
                let (value_type, hint, hint_string) = match self.hints.get(key) {
                    Some(h) => (h.value_type, h.kind, h.hint_string.clone()),
                    None => (slot.value.value_type(), HintKind::None, String::new()),
                };
                PropertyInfo {
                    name: key.clone(),
                    value_type,
                    order: slot.order,
                    hint,
                    hint_string,
                    usage: PropertyUsage::for_key(key),
                }
            })
            .collect()
    }

    /// Returns every stored entry, hidden ones included, sorted by order.
    pub fn entries(&self) -> Vec<SettingEntry> {
        let mut entries: Vec<SettingEntry> = self
            .props
            .iter()
            .map(|(key, slot)| SettingEntry {
                key: key.clone(),
                value: slot.value.clone(),
                order: slot.order,
                hidden: slot.hidden,
            })
            .collect();
        entries.sort_by_key(|e| e.order);
        entries
    }

    /// Merges previously saved entries over the current contents.
    ///
    /// Saved entries keep their saved order integers.  Keys already present
    /// but absent from `saved` (settings introduced by a newer default
    /// catalog) are renumbered after the saved ones, preserving their
    /// relative order.  `saved_next_order` is the counter persisted alongside
    /// the entries; the resulting counter is never below it.
    pub fn restore(&mut self, mut saved: Vec<SettingEntry>, saved_next_order: u64) {
        saved.retain(|e| !e.value.is_nil());
        saved.sort_by_key(|e| e.order);

        let mut next = saved
            .iter()
            .map(|e| e.order + 1)
            .max()
            .unwrap_or(0)
            .max(saved_next_order);

        let saved_keys: HashSet<&str> = saved.iter().map(|e| e.key.as_str()).collect();
        let mut leftovers: Vec<(u64, String)> = self
            .props
            .iter()
            .filter(|(key, _)| !saved_keys.contains(key.as_str()))
            .map(|(key, slot)| (slot.order, key.clone()))
            .collect();
        leftovers.sort();
        for (_, key) in leftovers {
            if let Some(slot) = self.props.get_mut(&key) {
                slot.order = next;
                next += 1;
            }
        }

        let mut previous: Option<u64> = None;
        for entry in saved {
            // Corrupt files may repeat an order; renumber the duplicate.
            let order = match previous {
                Some(prev) if entry.order <= prev => {
                    let fresh = next;
                    next += 1;
                    fresh
                }
                _ => entry.order,
            };
            previous = Some(previous.map_or(order, |p| p.max(order)));
            self.props.insert(
                entry.key,
                Slot {
                    value: entry.value,
                    order,
                    hidden: entry.hidden,
                },
            );
        }

        self.next_order = next;
    }

    /// Inserts or overwrites the presentation hint for `key`.
    pub fn add_hint(&mut self, key: impl Into<String>, hint: PropertyHint) {
        self.hints.add_hint(key, hint);
    }

    pub fn hints(&self) -> &HintRegistry {
        &self.hints
    }

    /// Next order value the counter will hand out.
    pub fn next_order(&self) -> u64 {
        self.next_order
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    fn take_order(&mut self) -> u64 {
        let order = self.next_order;
        self.next_order += 1;
        order
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
