//! Integration tests for the settings startup and shutdown lifecycle.
//!
//! Each test points a [`FixedHost`] at a fresh temporary directory and drives
//! `EditorSettings::create` / `destroy` through the public API, checking what
//! ends up on disk and what a second startup reads back.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use editor_settings::application::debug_host::DEBUG_HOST_KEY;
use editor_settings::infrastructure::platform::FixedHost;
use editor_settings::infrastructure::storage::location::{
    SELF_CONTAINED_DIR, SELF_CONTAINED_MARKER, SETTINGS_FILE_NAME,
};
use editor_settings::{EditorSettings, LocationOptions};
use editor_settings_core::{
    catalog::defaults::catalog_entries, CatalogContext, HintKind, PropertyHint, Value, ValueType,
};
use uuid::Uuid;

const PROJECT: &str = "/home/dev/projects/platformer";

fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("edset_it_{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn home_host(home: &Path) -> FixedHost {
    FixedHost::new(PROJECT).with_env("HOME", home.to_string_lossy())
}

fn start(host: &FixedHost) -> EditorSettings {
    EditorSettings::create(host, &LocationOptions::default())
}

// ── First run ─────────────────────────────────────────────────────────────────

#[test]
fn test_first_run_creates_directory_tree_and_uses_defaults() {
    // Arrange
    let home = temp_dir();
    let host = home_host(&home);

    // Act
    let settings = start(&host);

    // Assert
    let root = home.join(".godot");
    assert_eq!(settings.settings_path(), Some(root.clone()));
    for sub in ["templates", "tmp", "config"] {
        assert!(root.join(sub).is_dir(), "{sub} not created");
    }
    let project_dir = settings.project_settings_path().unwrap();
    assert!(project_dir.is_dir());
    assert!(project_dir.starts_with(root.join("config")));

    let ctx = CatalogContext::default();
    for entry in catalog_entries(&ctx) {
        assert_eq!(
            settings.get(entry.key).as_ref(),
            Some(&entry.value),
            "{} does not hold its default",
            entry.key
        );
    }

    std::fs::remove_dir_all(&home).ok();
}

#[test]
fn test_appdata_takes_precedence_over_home() {
    let appdata = temp_dir();
    let host = FixedHost::new(PROJECT)
        .with_env("APPDATA", appdata.to_string_lossy())
        .with_env("HOME", "/nonexistent-home");

    let settings = start(&host);

    assert_eq!(settings.settings_path(), Some(appdata.join("Godot")));
    std::fs::remove_dir_all(&appdata).ok();
}

#[test]
fn test_root_override_wins() {
    // Arrange
    let home = temp_dir();
    let custom = temp_dir().join("custom-root");
    let options = LocationOptions {
        root_override: Some(custom.clone()),
    };

    // Act
    let settings = EditorSettings::create(&home_host(&home), &options);

    // Assert
    assert_eq!(settings.settings_path(), Some(custom.clone()));
    assert!(!home.join(".godot").exists());

    std::fs::remove_dir_all(&home).ok();
    if let Some(parent) = custom.parent() {
        std::fs::remove_dir_all(parent).ok();
    }
}

#[test]
fn test_missing_home_directory_degrades_to_in_memory_defaults() {
    // Arrange
    let host = FixedHost::new(PROJECT)
        .with_env("HOME", format!("/nonexistent-{}/nested", Uuid::new_v4()));

    // Act
    let settings = start(&host);

    // Assert
    assert_eq!(settings.settings_path(), None);
    assert_eq!(settings.get("text_editor/tab_size"), Some(Value::Int(4)));
    assert!(settings.save().is_err());
}

// ── Save and reload ───────────────────────────────────────────────────────────

#[test]
fn test_save_then_reload_round_trips_values_hints_and_order() {
    // Arrange
    let home = temp_dir();
    let host = home_host(&home);
    let settings = start(&host);
    settings.set("text_editor/tab_size", 2);
    settings.set("custom/plugin/enabled", true);
    settings.set("_internal/last_layout", "Default");
    settings
        .set_hidden_from_editor("custom/plugin/enabled", true)
        .unwrap();
    settings.raise_order("global/font").unwrap();
    settings.add_hint(
        "custom/plugin/level",
        PropertyHint::range(ValueType::Int, "0, 10, 1"),
    );
    let before = settings.snapshot();

    // Act
    settings.destroy().expect("save on shutdown");
    let reloaded = start(&host).snapshot();

    // Assert
    let without_debug_host = |entries: Vec<editor_settings_core::SettingEntry>| {
        entries
            .into_iter()
            .filter(|e| e.key != DEBUG_HOST_KEY)
            .collect::<Vec<_>>()
    };
    assert_eq!(
        without_debug_host(reloaded.entries()),
        without_debug_host(before.entries())
    );
    assert_eq!(
        reloaded.hints().get("custom/plugin/level").map(|h| h.kind),
        Some(HintKind::Range)
    );
    assert_eq!(
        reloaded.enumerate().last().map(|p| p.name.clone()),
        Some("global/font".to_string())
    );

    std::fs::remove_dir_all(&home).ok();
}

#[test]
fn test_reload_recomputes_debug_host_for_current_machine() {
    // Arrange
    let home = temp_dir();
    let first = home_host(&home).with_addresses(&["10.0.0.5"]);
    start(&first).destroy().unwrap();

    // Act
    let second = home_host(&home).with_addresses(&["192.168.7.7"]);
    let settings = start(&second);

    // Assert
    assert_eq!(
        settings.get(DEBUG_HOST_KEY),
        Some(Value::String("192.168.7.7".to_string()))
    );

    std::fs::remove_dir_all(&home).ok();
}

#[test]
fn test_corrupt_settings_file_falls_back_to_defaults() {
    // Arrange
    let home = temp_dir();
    let host = home_host(&home);
    start(&host).destroy().unwrap();
    std::fs::write(home.join(".godot").join(SETTINGS_FILE_NAME), "not [valid toml").unwrap();

    // Act
    let settings = start(&host);

    // Assert
    assert_eq!(settings.get("text_editor/tab_size"), Some(Value::Int(4)));
    assert!(settings.settings_path().is_some());

    std::fs::remove_dir_all(&home).ok();
}

#[test]
fn test_new_catalog_keys_are_ordered_after_saved_ones() {
    // Arrange: a settings file saved by an older editor holding one key.
    let home = temp_dir();
    let root = home.join(".godot");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(
        root.join(SETTINGS_FILE_NAME),
        r#"
format_version = 1
next_order = 1

[[setting]]
key = "text_editor/tab_size"
order = 0

[setting.value]
type = "int"
value = 3
"#,
    )
    .unwrap();

    // Act
    let settings = start(&home_host(&home));

    // Assert
    let list = settings.property_list();
    assert_eq!(list.first().map(|p| p.name.as_str()), Some("text_editor/tab_size"));
    assert_eq!(settings.get("text_editor/tab_size"), Some(Value::Int(3)));
    assert_eq!(settings.get("global/font"), Some(Value::String(String::new())));

    std::fs::remove_dir_all(&home).ok();
}

// ── Directory lists ───────────────────────────────────────────────────────────

#[test]
fn test_favorite_and_recent_dirs_survive_restart() {
    // Arrange
    let home = temp_dir();
    let host = home_host(&home);
    let settings = start(&host);

    // Act
    settings.set_favorite_dirs(vec!["a".to_string(), "b".to_string()]);
    settings.set_recent_dirs(vec!["res://levels".to_string()]);
    drop(settings);
    let reloaded = start(&host);

    // Assert
    assert_eq!(reloaded.favorite_dirs(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(reloaded.recent_dirs(), vec!["res://levels".to_string()]);

    std::fs::remove_dir_all(&home).ok();
}

#[test]
fn test_dir_lists_are_per_project() {
    // Arrange
    let home = temp_dir();
    let game = home_host(&home);
    let mut tool = home_host(&home);
    tool.project_resource_path = "/home/dev/projects/tool".to_string();
    start(&game).set_favorite_dirs(vec!["res://game".to_string()]);

    // Act
    let other = start(&tool);

    // Assert
    assert!(other.favorite_dirs().is_empty());

    std::fs::remove_dir_all(&home).ok();
}

// ── Self-contained installs ───────────────────────────────────────────────────

#[test]
fn test_marker_redirects_root_and_applies_descriptor() {
    // Arrange
    let exe_dir = temp_dir();
    std::fs::write(
        exe_dir.join(SELF_CONTAINED_MARKER),
        "[init_projects]\nlist = [\"demos/platformer\"]\n\n[presets]\n\"text_editor/tab_size\" = 2\n",
    )
    .unwrap();
    let home = temp_dir();
    let host = home_host(&home).with_executable_dir(&exe_dir);

    // Act
    let settings = start(&host);

    // Assert
    assert_eq!(settings.settings_path(), Some(exe_dir.join(SELF_CONTAINED_DIR)));
    assert!(!home.join(".godot").exists());
    assert_eq!(settings.get("text_editor/tab_size"), Some(Value::Int(2)));

    let project_path = format!(
        "{}/demos/platformer",
        exe_dir.to_string_lossy().trim_end_matches('/')
    );
    let key = format!("projects/{}", project_path.replace('/', "::"));
    assert_eq!(settings.get(&key), Some(Value::String(project_path)));

    std::fs::remove_dir_all(&exe_dir).ok();
    std::fs::remove_dir_all(&home).ok();
}

#[test]
fn test_descriptor_presets_do_not_override_saved_settings() {
    // Arrange
    let exe_dir = temp_dir();
    std::fs::write(
        exe_dir.join(SELF_CONTAINED_MARKER),
        "[presets]\n\"text_editor/tab_size\" = 2\n",
    )
    .unwrap();
    let host = FixedHost::new(PROJECT).with_executable_dir(&exe_dir);
    let first = start(&host);
    first.set("text_editor/tab_size", 6);
    first.destroy().unwrap();

    // Act
    let second = start(&host);

    // Assert
    assert_eq!(second.get("text_editor/tab_size"), Some(Value::Int(6)));

    std::fs::remove_dir_all(&exe_dir).ok();
}

// ── Shared access ─────────────────────────────────────────────────────────────

#[test]
fn test_concurrent_sets_and_raises_keep_orders_unique() {
    // Arrange
    let settings = Arc::new(EditorSettings::with_defaults(CatalogContext::default()));

    // Act
    let workers: Vec<_> = (0..8)
        .map(|t| {
            let settings = Arc::clone(&settings);
            thread::spawn(move || {
                for i in 0..200 {
                    let key = format!("threads/{t}/{i}");
                    settings.set(&key, i);
                    if i % 3 == 0 {
                        settings.raise_order(&key).unwrap();
                    }
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker panicked");
    }

    // Assert
    let snapshot = settings.snapshot();
    let entries = snapshot.entries();
    let orders: HashSet<u64> = entries.iter().map(|e| e.order).collect();
    assert_eq!(orders.len(), entries.len(), "an order integer was handed out twice");
    assert!(entries.iter().all(|e| e.order < snapshot.next_order()));
    assert!(settings.has("threads/7/199"));
}
