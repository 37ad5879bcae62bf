//! The editor settings service.
//!
//! [`EditorSettings`] owns the property store for the lifetime of the editor.
//! It is built once at startup with [`EditorSettings::create`], shared by
//! reference (or `Arc`) with every component that reads or writes settings,
//! and consumed by [`EditorSettings::destroy`] at shutdown, which writes
//! everything back to disk.
//!
//! # Startup sequence
//!
//! ```text
//! create()
//!   ├─ choose_root()          override / ._sc_ marker / APPDATA / HOME
//!   ├─ prepare()              templates/ tmp/ config/ config/<project>/
//!   ├─ settings_file::load()  merge saved entries over the default catalog
//!   │    └─ on failure: defaults + bootstrap descriptor
//!   ├─ setup_network()        recompute network/debug_host
//!   └─ load_favorites()       favorite_dirs / recent_dirs
//! ```
//!
//! Every step logs its failures and carries on; the worst outcome is an
//! in-memory store with catalog defaults and no save path.
//!
//! # Why std::sync::Mutex? (for beginners)
//!
//! All operations here are short, synchronous map lookups and inserts.  An
//! async mutex would force every caller into `async` code for no benefit.
//! The store lock is never held across a file write or a channel send: [`save`]
//! clones the store under the lock and writes the clone after releasing it,
//! and [`set`] publishes its change event only after the guard is dropped.
//!
//! A panic while the lock is held poisons it.  The store has no multi-step
//! invariants that a half-finished `set` could break, so a poisoned lock is
//! simply recovered with [`PoisonError::into_inner`].
//!
//! The two directory lists have their own locks, held while their file is
//! rewritten so the file and the in-memory list always agree.
//!
//! [`save`]: EditorSettings::save
//! [`set`]: EditorSettings::set

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use editor_settings_core::{
    load_defaults, BootstrapDescriptor, CatalogContext, HostPlatform, PropertyHint, PropertyInfo,
    PropertyStore, StoreError, Value, ValueType,
};

use crate::application::debug_host::{choose_debug_host, DEBUG_HOST_KEY};
use crate::application::events::{SettingsEvent, SettingsNotifier};
use crate::application::host::HostEnvironment;
use crate::infrastructure::storage::dir_lists::{
    read_dir_list, write_dir_list, FAVORITE_DIRS_FILE, RECENT_DIRS_FILE,
};
use crate::infrastructure::storage::location::{
    choose_root, prepare, read_marker_descriptor, ConfigLocation, LocationOptions,
};
use crate::infrastructure::storage::settings_file::{self, SettingsFileError};

/// Error returned by [`EditorSettings::save`] and [`EditorSettings::destroy`].
#[derive(Debug, Error)]
pub enum SaveError {
    /// Startup could not resolve a settings directory.
    #[error("no settings path was resolved; nothing to save to")]
    NoPath,

    /// Another thread held the store lock; this save was skipped.
    #[error("settings store is busy; save skipped")]
    Busy,

    #[error(transparent)]
    File(#[from] SettingsFileError),
}

/// Which of the two directory lists an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirList {
    Favorite,
    Recent,
}

impl DirList {
    fn file_name(self) -> &'static str {
        match self {
            DirList::Favorite => FAVORITE_DIRS_FILE,
            DirList::Recent => RECENT_DIRS_FILE,
        }
    }
}

/// Process-wide editor settings.
#[derive(Debug)]
pub struct EditorSettings {
    store: Mutex<PropertyStore>,
    location: Option<ConfigLocation>,
    descriptor: Option<BootstrapDescriptor>,
    catalog: CatalogContext,
    favorite_dirs: Mutex<Vec<String>>,
    recent_dirs: Mutex<Vec<String>>,
    notifier: SettingsNotifier,
}

impl EditorSettings {
    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Runs the full startup sequence against `host`.
    ///
    /// Never fails: location, load and descriptor problems are logged and the
    /// service falls back to the default catalog.
    pub fn create(host: &dyn HostEnvironment, options: &LocationOptions) -> Self {
        let catalog = CatalogContext {
            platform: HostPlatform::current(),
            screen_count: host.screen_count(),
            executable_dir: host.executable_dir(),
        };

        let (location, descriptor) = match choose_root(host, options) {
            Ok(choice) => {
                let descriptor = choice.marker.as_deref().and_then(read_marker_descriptor);
                match prepare(&choice.root, &host.project_resource_path()) {
                    Ok(location) => {
                        info!(path = %location.settings_dir().display(), "settings directory ready");
                        (Some(location), descriptor)
                    }
                    Err(e) => {
                        error!("{e}");
                        (None, descriptor)
                    }
                }
            }
            Err(e) => {
                error!("{e}");
                (None, None)
            }
        };

        let store = Self::load_store(location.as_ref(), &catalog, descriptor.as_ref());

        let settings = Self::assemble(store, location, descriptor, catalog);
        settings.setup_network(host);
        if settings.location.is_some() {
            settings.load_favorites();
        }
        settings
    }

    /// Builds an in-memory service holding only the default catalog.
    ///
    /// There is no save path; [`EditorSettings::save`] returns
    /// [`SaveError::NoPath`].
    pub fn with_defaults(catalog: CatalogContext) -> Self {
        let mut store = PropertyStore::new();
        load_defaults(&mut store, &catalog, None);
        Self::assemble(store, None, None, catalog)
    }

    /// Saves and releases the service.
    ///
    /// Owning `self` guarantees no other reference can hold the store lock,
    /// so unlike [`EditorSettings::save`] this never reports
    /// [`SaveError::Busy`].
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::NoPath`] when no settings directory was resolved,
    /// or [`SaveError::File`] if writing failed.
    pub fn destroy(self) -> Result<(), SaveError> {
        let store = self
            .store
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        let result = Self::write(self.location.as_ref(), &store);
        if let Err(e) = &result {
            error!("final settings save failed: {e}");
        }
        debug!("editor settings released");
        result
    }

    fn assemble(
        store: PropertyStore,
        location: Option<ConfigLocation>,
        descriptor: Option<BootstrapDescriptor>,
        catalog: CatalogContext,
    ) -> Self {
        Self {
            store: Mutex::new(store),
            location,
            descriptor,
            catalog,
            favorite_dirs: Mutex::new(Vec::new()),
            recent_dirs: Mutex::new(Vec::new()),
            notifier: SettingsNotifier::default(),
        }
    }

    /// Merges the saved file over the catalog, or falls back to catalog plus
    /// descriptor when there is no usable file.
    fn load_store(
        location: Option<&ConfigLocation>,
        catalog: &CatalogContext,
        descriptor: Option<&BootstrapDescriptor>,
    ) -> PropertyStore {
        if let Some(location) = location {
            let path = location.config_file();
            if path.is_file() {
                match settings_file::load(&path) {
                    Ok(document) => {
                        let mut store = PropertyStore::new();
                        load_defaults(&mut store, catalog, None);
                        document.merge_into(&mut store);
                        info!(path = %path.display(), entries = store.len(), "settings loaded");
                        return store;
                    }
                    Err(e) => warn!("{e}; falling back to default settings"),
                }
            } else {
                info!(path = %path.display(), "no settings file yet; using defaults");
            }
        }

        let mut store = PropertyStore::new();
        load_defaults(&mut store, catalog, descriptor);
        store
    }

    /// Recomputes `network/debug_host` from the host's interface addresses.
    ///
    /// The candidate list becomes an enum hint on the key.
    pub fn setup_network(&self, host: &dyn HostEnvironment) {
        let addresses = host.local_addresses();
        let mut store = self.lock_store();
        let current = store
            .get(DEBUG_HOST_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let choice = choose_debug_host(&current, &addresses);
        debug!(value = %choice.value, candidates = %choice.candidates, "debug host selected");
        store.set(DEBUG_HOST_KEY, choice.value);
        store.add_hint(
            DEBUG_HOST_KEY,
            PropertyHint::enumeration(ValueType::String, choice.candidates),
        );
    }

    /// Replaces every setting with the catalog defaults (and the bootstrap
    /// descriptor, if one was found at startup), then notifies subscribers.
    ///
    /// The order counter carries on from the replaced store, so no order
    /// integer is handed out twice during the service's lifetime.
    pub fn reset_to_defaults(&self, host: &dyn HostEnvironment) {
        {
            let mut store = self.lock_store();
            let mut fresh = PropertyStore::continuing_from(store.next_order());
            load_defaults(&mut fresh, &self.catalog, self.descriptor.as_ref());
            *store = fresh;
        }
        self.setup_network(host);
        info!("settings reset to defaults");
        self.notify_changes();
    }

    // ── Store access ──────────────────────────────────────────────────────────

    /// Sets `key` (or removes it when `value` is [`Value::Nil`]) and
    /// publishes [`SettingsEvent::Changed`].
    pub fn set(&self, key: &str, value: impl Into<Value>) {
        self.lock_store().set(key, value);
        self.notifier.publish(SettingsEvent::Changed {
            key: key.to_string(),
        });
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.lock_store().get(key).cloned()
    }

    pub fn has(&self, key: &str) -> bool {
        self.lock_store().has(key)
    }

    /// Removes `key` if present.
    pub fn erase(&self, key: &str) {
        self.lock_store().erase(key);
    }

    /// Returns the value of `key`, storing `default` first if it is unset.
    pub fn define(&self, key: &str, default: impl Into<Value>) -> Value {
        self.lock_store().define(key, default)
    }

    /// Moves `key` to the end of the presentation order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::KeyNotFound`] (also logged) if `key` is unset.
    pub fn raise_order(&self, key: &str) -> Result<(), StoreError> {
        self.lock_store().raise_order(key).map_err(|e| {
            warn!("cannot raise order: {e}");
            e
        })
    }

    pub fn set_hidden_from_editor(&self, key: &str, hidden: bool) -> Result<(), StoreError> {
        self.lock_store().set_hidden_from_editor(key, hidden)
    }

    /// Visible settings in presentation order, with hints applied.
    pub fn property_list(&self) -> Vec<PropertyInfo> {
        self.lock_store().enumerate()
    }

    pub fn add_hint(&self, key: &str, hint: PropertyHint) {
        self.lock_store().add_hint(key, hint);
    }

    pub fn hint(&self, key: &str) -> Option<PropertyHint> {
        self.lock_store().hints().get(key).cloned()
    }

    /// Copy of the whole store, hidden entries and hints included.
    pub fn snapshot(&self) -> PropertyStore {
        self.lock_store().clone()
    }

    // ── Notifications ─────────────────────────────────────────────────────────

    pub fn subscribe(&self) -> broadcast::Receiver<SettingsEvent> {
        self.notifier.subscribe()
    }

    /// Publishes [`SettingsEvent::Applied`] to signal the end of a batch.
    pub fn notify_changes(&self) {
        self.notifier.publish(SettingsEvent::Applied);
    }

    // ── Persistence ───────────────────────────────────────────────────────────

    /// Writes the store to the settings file.
    ///
    /// Does not wait for the store lock: if another thread is mutating the
    /// store right now, the save is skipped and [`SaveError::Busy`] returned.
    ///
    /// # Errors
    ///
    /// [`SaveError::NoPath`] without a resolved location, [`SaveError::Busy`]
    /// as above, [`SaveError::File`] if writing failed.  All are logged.
    pub fn save(&self) -> Result<(), SaveError> {
        if self.location.is_none() {
            warn!("{}", SaveError::NoPath);
            return Err(SaveError::NoPath);
        }

        let snapshot = match self.store.try_lock() {
            Ok(guard) => guard.clone(),
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().clone(),
            Err(TryLockError::WouldBlock) => {
                warn!("{}", SaveError::Busy);
                return Err(SaveError::Busy);
            }
        };

        Self::write(self.location.as_ref(), &snapshot).map_err(|e| {
            error!("settings save failed: {e}");
            e
        })
    }

    fn write(location: Option<&ConfigLocation>, store: &PropertyStore) -> Result<(), SaveError> {
        let location = location.ok_or(SaveError::NoPath)?;
        let path = location.config_file();
        settings_file::save(&path, store)?;
        info!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Root settings directory, when one was resolved.
    pub fn settings_path(&self) -> Option<PathBuf> {
        self.location
            .as_ref()
            .map(|l| l.settings_dir().to_path_buf())
    }

    /// Per-project settings directory, when one was resolved.
    pub fn project_settings_path(&self) -> Option<PathBuf> {
        self.location.as_ref().map(ConfigLocation::project_settings_dir)
    }

    pub fn location(&self) -> Option<&ConfigLocation> {
        self.location.as_ref()
    }

    // ── Directory lists ───────────────────────────────────────────────────────

    /// Replaces the favorite directories and writes them to disk.
    pub fn set_favorite_dirs(&self, dirs: Vec<String>) {
        self.store_dir_list(DirList::Favorite, dirs);
    }

    pub fn favorite_dirs(&self) -> Vec<String> {
        lock(&self.favorite_dirs).clone()
    }

    /// Replaces the recently visited directories and writes them to disk.
    pub fn set_recent_dirs(&self, dirs: Vec<String>) {
        self.store_dir_list(DirList::Recent, dirs);
    }

    pub fn recent_dirs(&self) -> Vec<String> {
        lock(&self.recent_dirs).clone()
    }

    /// Appends the entries of both list files in the per-project directory
    /// to the in-memory lists.  No deduplication is done.
    ///
    /// A missing file contributes nothing; read errors are logged.
    pub fn load_favorites(&self) {
        for list in [DirList::Favorite, DirList::Recent] {
            let Some(path) = self.dir_list_path(list) else {
                continue;
            };
            match read_dir_list(&path) {
                Ok(dirs) => lock(self.dir_list(list)).extend(dirs),
                Err(e) => warn!("{e}"),
            }
        }
    }

    fn store_dir_list(&self, list: DirList, dirs: Vec<String>) {
        // Held across the write so file and memory change together.
        let mut current = lock(self.dir_list(list));
        if let Some(path) = self.dir_list_path(list) {
            if let Err(e) = write_dir_list(&path, &dirs) {
                warn!("{e}");
            }
        } else {
            debug!(file = list.file_name(), "no settings directory; list kept in memory only");
        }
        *current = dirs;
    }

    fn dir_list(&self, list: DirList) -> &Mutex<Vec<String>> {
        match list {
            DirList::Favorite => &self.favorite_dirs,
            DirList::Recent => &self.recent_dirs,
        }
    }

    fn dir_list_path(&self, list: DirList) -> Option<PathBuf> {
        self.project_settings_path()
            .map(|dir| dir.join(list.file_name()))
    }

    fn lock_store(&self) -> MutexGuard<'_, PropertyStore> {
        lock(&self.store)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::host::MockHostEnvironment;
    use std::net::IpAddr;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("edset_svc_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// A mock host whose HOME points at `home`, with one LAN address.
    fn mock_host(home: Option<PathBuf>) -> MockHostEnvironment {
        let home = home.map(|h| h.to_string_lossy().into_owned());
        let mut host = MockHostEnvironment::new();
        host.expect_executable_dir().return_const(None::<PathBuf>);
        host.expect_env_var().returning(move |name| match name {
            "HOME" => home.clone(),
            _ => None,
        });
        host.expect_local_addresses().returning(|| {
            vec![
                IpAddr::from([127, 0, 0, 1]),
                IpAddr::from([192, 168, 1, 20]),
            ]
        });
        host.expect_screen_count().return_const(2usize);
        host.expect_project_resource_path()
            .return_const("/projects/game".to_string());
        host
    }

    fn in_memory() -> EditorSettings {
        EditorSettings::with_defaults(CatalogContext::default())
    }

    // ── Store access ──────────────────────────────────────────────────────────

    #[test]
    fn test_set_then_get() {
        let settings = in_memory();
        settings.set("text_editor/tab_size", 8);
        assert_eq!(settings.get("text_editor/tab_size"), Some(Value::Int(8)));
    }

    #[test]
    fn test_set_nil_removes_key() {
        let settings = in_memory();
        settings.set("custom/key", "x");
        settings.set("custom/key", Value::Nil);
        assert!(!settings.has("custom/key"));
    }

    #[test]
    fn test_raise_order_on_missing_key_is_reported() {
        let settings = in_memory();
        assert_eq!(
            settings.raise_order("no/such/key"),
            Err(StoreError::KeyNotFound("no/such/key".to_string()))
        );
    }

    #[test]
    fn test_raise_order_moves_key_last_in_property_list() {
        // Arrange
        let settings = in_memory();

        // Act
        settings.raise_order("global/font").unwrap();

        // Assert
        let list = settings.property_list();
        assert_eq!(list.last().map(|p| p.name.as_str()), Some("global/font"));
    }

    #[test]
    fn test_define_keeps_existing_value() {
        let settings = in_memory();
        settings.set("custom/zoom", 2.0);
        assert_eq!(settings.define("custom/zoom", 1.0), Value::Float(2.0));
        assert_eq!(settings.define("custom/new", 1.0), Value::Float(1.0));
    }

    // ── Notifications ─────────────────────────────────────────────────────────

    #[test]
    fn test_set_publishes_changed_event() {
        // Arrange
        let settings = in_memory();
        let mut rx = settings.subscribe();

        // Act
        settings.set("text_editor/tab_size", 2);
        settings.notify_changes();

        // Assert
        assert_eq!(
            rx.try_recv().unwrap(),
            SettingsEvent::Changed {
                key: "text_editor/tab_size".to_string()
            }
        );
        assert_eq!(rx.try_recv().unwrap(), SettingsEvent::Applied);
    }

    #[test]
    fn test_set_without_subscribers_does_not_fail() {
        let settings = in_memory();
        settings.set("a/b", true);
        assert!(settings.has("a/b"));
    }

    // ── Persistence ───────────────────────────────────────────────────────────

    #[test]
    fn test_save_without_location_reports_no_path() {
        let settings = in_memory();
        assert!(matches!(settings.save(), Err(SaveError::NoPath)));
    }

    #[test]
    fn test_save_skips_when_store_is_locked() {
        // Arrange
        let home = temp_dir();
        let settings = EditorSettings::create(&mock_host(Some(home.clone())), &LocationOptions::default());
        let guard = settings.store.lock().unwrap();

        // Act
        let result = settings.save();

        // Assert
        assert!(matches!(result, Err(SaveError::Busy)));
        drop(guard);
        assert!(settings.save().is_ok());
        std::fs::remove_dir_all(&home).ok();
    }

    #[test]
    fn test_create_without_home_falls_back_to_defaults() {
        // Arrange
        let host = mock_host(None);

        // Act
        let settings = EditorSettings::create(&host, &LocationOptions::default());

        // Assert
        assert_eq!(settings.settings_path(), None);
        assert_eq!(settings.get("text_editor/tab_size"), Some(Value::Int(4)));
        assert!(matches!(settings.destroy(), Err(SaveError::NoPath)));
    }

    #[test]
    fn test_create_selects_lan_debug_host() {
        let settings = EditorSettings::create(&mock_host(None), &LocationOptions::default());

        assert_eq!(
            settings.get(DEBUG_HOST_KEY),
            Some(Value::String("192.168.1.20".to_string()))
        );
        let hint = settings.hint(DEBUG_HOST_KEY).unwrap();
        assert_eq!(hint.hint_string, "192.168.1.20");
    }

    #[test]
    fn test_create_uses_host_screen_count() {
        let settings = EditorSettings::create(&mock_host(None), &LocationOptions::default());

        let hint = settings.hint("game_window_placement/screen").unwrap();
        assert!(hint.hint_string.ends_with("Monitor 2"));
    }

    #[test]
    fn test_reset_restores_defaults_and_notifies() {
        // Arrange
        let host = mock_host(None);
        let settings = EditorSettings::create(&host, &LocationOptions::default());
        settings.set("text_editor/tab_size", 12);
        let mut rx = settings.subscribe();

        // Act
        settings.reset_to_defaults(&host);

        // Assert
        assert_eq!(settings.get("text_editor/tab_size"), Some(Value::Int(4)));
        assert_eq!(rx.try_recv().unwrap(), SettingsEvent::Applied);
    }

    // ── Directory lists ───────────────────────────────────────────────────────

    #[test]
    fn test_dir_lists_without_location_stay_in_memory() {
        let settings = in_memory();
        settings.set_favorite_dirs(vec!["/a".to_string()]);
        assert_eq!(settings.favorite_dirs(), vec!["/a".to_string()]);
        assert!(settings.recent_dirs().is_empty());
    }

    #[test]
    fn test_dir_lists_are_written_to_project_dir() {
        // Arrange
        let home = temp_dir();
        let settings = EditorSettings::create(&mock_host(Some(home.clone())), &LocationOptions::default());

        // Act
        settings.set_recent_dirs(vec!["/r1".to_string(), "/r2".to_string()]);

        // Assert
        let file = settings
            .project_settings_path()
            .unwrap()
            .join(RECENT_DIRS_FILE);
        assert_eq!(std::fs::read_to_string(file).unwrap(), "/r1\n/r2\n");
        std::fs::remove_dir_all(&home).ok();
    }

    #[test]
    fn test_load_favorites_appends_to_current_lists() {
        // Arrange
        let home = temp_dir();
        let settings = EditorSettings::create(&mock_host(Some(home.clone())), &LocationOptions::default());
        settings.set_favorite_dirs(vec!["a".to_string(), "b".to_string()]);

        // Act
        settings.load_favorites();

        // Assert
        assert_eq!(settings.favorite_dirs(), ["a", "b", "a", "b"]);
        assert!(settings.recent_dirs().is_empty());
        std::fs::remove_dir_all(&home).ok();
    }

    #[test]
    fn test_concurrent_list_writes_leave_file_and_memory_in_agreement() {
        // Arrange
        let home = temp_dir();
        let settings = std::sync::Arc::new(EditorSettings::create(
            &mock_host(Some(home.clone())),
            &LocationOptions::default(),
        ));

        // Act
        let workers: Vec<_> = (0..8)
            .map(|t| {
                let settings = std::sync::Arc::clone(&settings);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        settings.set_favorite_dirs(vec![format!("/t{t}/{i}"), format!("/t{t}")]);
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        // Assert
        let file = settings
            .project_settings_path()
            .unwrap()
            .join(FAVORITE_DIRS_FILE);
        let on_disk = read_dir_list(&file).unwrap();
        assert_eq!(on_disk, settings.favorite_dirs());
        std::fs::remove_dir_all(&home).ok();
    }

    #[test]
    fn test_reset_does_not_reuse_order_integers() {
        // Arrange
        let host = mock_host(None);
        let settings = EditorSettings::create(&host, &LocationOptions::default());
        settings.set("custom/extra", 1);
        let used_before = settings.snapshot().next_order();

        // Act
        settings.reset_to_defaults(&host);

        // Assert
        let entries = settings.snapshot().entries();
        assert!(!entries.is_empty());
        assert!(entries.iter().all(|e| e.order >= used_before));
    }
}
