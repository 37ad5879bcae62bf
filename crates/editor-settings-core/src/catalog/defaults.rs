//! Default settings catalog.
//!
//! The catalog is the fixed list of settings a fresh install starts with.  Key
//! names, default values, and hint parameters are part of the on-disk
//! compatibility surface: saved settings files and editor components refer to
//! these exact strings, so entries are only ever appended.
//!
//! Catalog order matters: entries are inserted in the sequence listed here, so
//! it is also the order property editors display them in.

use std::path::PathBuf;

use tracing::debug;

use crate::catalog::bootstrap::BootstrapDescriptor;
use crate::domain::hints::PropertyHint;
use crate::domain::store::PropertyStore;
use crate::domain::value::{Color, Value, ValueType, Vector2};

/// Labels shared by the three 3D camera modifier settings.
const MODIFIER_LABELS: &str = "None,Shift,Alt,Meta,Ctrl";

/// Host platform family, for the few platform-conditional catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    Windows,
    Other,
}

impl HostPlatform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            HostPlatform::Windows
        } else {
            HostPlatform::Other
        }
    }
}

/// Host facts the catalog depends on.
#[derive(Debug, Clone)]
pub struct CatalogContext {
    pub platform: HostPlatform,
    /// Number of attached monitors; drives the game window screen choices.
    pub screen_count: usize,
    /// Directory containing the editor executable; init projects from a
    /// bootstrap descriptor are resolved against it.
    pub executable_dir: Option<PathBuf>,
}

impl Default for CatalogContext {
    fn default() -> Self {
        Self {
            platform: HostPlatform::current(),
            screen_count: 1,
            executable_dir: None,
        }
    }
}

/// One catalog row.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub key: &'static str,
    pub value: Value,
    pub hint: Option<PropertyHint>,
}

#[derive(Default)]
struct CatalogBuilder {
    entries: Vec<CatalogEntry>,
}

impl CatalogBuilder {
    fn def(&mut self, key: &'static str, value: impl Into<Value>) -> &mut Self {
        self.entries.push(CatalogEntry {
            key,
            value: value.into(),
            hint: None,
        });
        self
    }

    fn hinted(&mut self, key: &'static str, value: impl Into<Value>, hint: PropertyHint) -> &mut Self {
        self.entries.push(CatalogEntry {
            key,
            value: value.into(),
            hint: Some(hint),
        });
        self
    }
}

/// Builds the `game_window_placement/screen` choices for `screen_count`
/// monitors.
pub fn screen_hint(screen_count: usize) -> String {
    let mut hint = String::from("Default (Same as Editor)");
    for i in 1..=screen_count {
        hint.push_str(&format!(",Monitor {i}"));
    }
    hint
}

/// Returns the full default catalog for the given host, in insertion order.
pub fn catalog_entries(ctx: &CatalogContext) -> Vec<CatalogEntry> {
    let mut c = CatalogBuilder::default();

    c.hinted("global/font", "", PropertyHint::global_file("*.fnt"))
        .hinted("global/autoscan_project_path", "", PropertyHint::global_dir())
        .hinted("global/default_project_path", "", PropertyHint::global_dir())
        .hinted("global/default_project_export_path", "", PropertyHint::global_dir())
        .def("global/show_script_in_scene_tabs", false);

    c.def("text_editor/background_color", Color::from_hex_argb(0x3b00_0000))
        .def("text_editor/text_color", Color::from_hex_rgb(0xaaaaaa))
        .def("text_editor/text_selected_color", Color::from_hex_rgb(0x000000))
        .def("text_editor/keyword_color", Color::from_hex_rgb(0xffffb3))
        .def("text_editor/base_type_color", Color::from_hex_rgb(0xa4ffd4))
        .def("text_editor/engine_type_color", Color::from_hex_rgb(0x83d3ff))
        .def("text_editor/comment_color", Color::from_hex_rgb(0x983d1b))
        .def("text_editor/string_color", Color::from_hex_rgb(0xef6ebe))
        .def("text_editor/symbol_color", Color::from_hex_rgb(0xbadfff))
        .def("text_editor/selection_color", Color::from_hex_rgb(0x7b5dbe))
        .def("text_editor/brace_mismatch_color", Color::rgb(1.0, 0.2, 0.2))
        .def("text_editor/current_line_color", Color::rgba(0.3, 0.5, 0.8, 0.15))
        .def("text_editor/scroll_past_end_of_file", false)
        // A tab size of 0 breaks the text editor layout.
        .hinted(
            "text_editor/tab_size",
            4,
            PropertyHint::range(ValueType::Int, "1, 64, 1"),
        )
        .def("text_editor/idle_parse_delay", 2)
        .def("text_editor/create_signal_callbacks", true)
        .def("text_editor/autosave_interval_secs", 0)
        .hinted("text_editor/font", "", PropertyHint::global_file("*.fnt"))
        .def("text_editor/auto_brace_complete", false)
        .def("text_editor/restore_scripts_on_load", true);

    c.hinted(
        "scenetree_editor/duplicate_node_name_num_separator",
        0,
        PropertyHint::enumeration(ValueType::Int, "None,Space,Underscore,Dash"),
    );

    c.def("gridmap_editor/pick_distance", 5000.0);

    c.def("3d_editor/default_fov", 45.0)
        .def("3d_editor/default_z_near", 0.1)
        .def("3d_editor/default_z_far", 500.0)
        .hinted(
            "3d_editor/navigation_scheme",
            0,
            PropertyHint::enumeration(ValueType::Int, "Godot,Maya,Modo"),
        )
        .hinted(
            "3d_editor/zoom_style",
            0,
            PropertyHint::enumeration(ValueType::Int, "Vertical, Horizontal"),
        )
        .hinted(
            "3d_editor/orbit_modifier",
            0,
            PropertyHint::enumeration(ValueType::Int, MODIFIER_LABELS),
        )
        .hinted(
            "3d_editor/pan_modifier",
            1,
            PropertyHint::enumeration(ValueType::Int, MODIFIER_LABELS),
        )
        .hinted(
            "3d_editor/zoom_modifier",
            4,
            PropertyHint::enumeration(ValueType::Int, MODIFIER_LABELS),
        )
        .def("3d_editor/emulate_numpad", false);

    c.def("2d_editor/bone_width", 5)
        .def("2d_editor/bone_color1", Color::rgba(1.0, 1.0, 1.0, 0.9))
        .def("2d_editor/bone_color2", Color::rgba(0.75, 0.75, 0.75, 0.9))
        .def("2d_editor/bone_selected_color", Color::rgba(0.9, 0.45, 0.45, 0.9))
        .def("2d_editor/bone_ik_color", Color::rgba(0.9, 0.9, 0.45, 0.9));

    c.hinted(
        "game_window_placement/rect",
        0,
        PropertyHint::enumeration(
            ValueType::Int,
            "Default,Centered,Custom Position,Force Maximized,Force Full Screen",
        ),
    )
    .def("game_window_placement/rect_custom_position", Vector2::ZERO)
    .hinted(
        "game_window_placement/screen",
        0,
        PropertyHint::enumeration(ValueType::Int, screen_hint(ctx.screen_count)),
    );

    c.def("on_save/compress_binary_resources", true)
        .def("on_save/save_modified_external_resources", true)
        .def("on_save/save_paths_as_relative", false)
        .def("on_save/save_paths_without_extension", false);

    c.def("file_dialog/show_hidden_files", false)
        .hinted(
            "file_dialog/display_mode",
            0,
            PropertyHint::enumeration(ValueType::Int, "Thumbnails,List"),
        )
        .hinted(
            "file_dialog/thumbnail_size",
            64,
            PropertyHint::range(ValueType::Int, "32,128,16"),
        );

    c.def("animation/autorename_animation_tracks", true)
        .def("animation/confirm_insert_track", true);

    c.def("property_editor/texture_preview_width", 48)
        .def("property_editor/auto_refresh_interval", 0.3)
        .def("help/doc_path", "");

    let texture_tool_filter = match ctx.platform {
        HostPlatform::Windows => "*.exe",
        HostPlatform::Other => "",
    };
    c.def("import/ask_save_before_reimport", false)
        .hinted(
            "import/pvrtc_texture_tool",
            "",
            PropertyHint::global_file(texture_tool_filter),
        )
        .def("PVRTC/fast_conversion", false);

    c.def("run/auto_save_before_running", true)
        .def("resources/save_compressed_resources", true)
        .def("resources/auto_reload_modified_images", true);

    c.entries
}

/// Populates `store` with the default catalog, then applies `descriptor`.
///
/// Init projects from the descriptor are stored as `projects/<name>` and
/// presets are copied verbatim, so presets may override catalog defaults.
pub fn load_defaults(
    store: &mut PropertyStore,
    ctx: &CatalogContext,
    descriptor: Option<&BootstrapDescriptor>,
) {
    let entries = catalog_entries(ctx);
    let count = entries.len();
    for entry in entries {
        store.set(entry.key, entry.value);
        if let Some(hint) = entry.hint {
            store.add_hint(entry.key, hint);
        }
    }
    debug!(count, "default catalog loaded");

    let Some(descriptor) = descriptor else {
        return;
    };

    for (key, path) in descriptor.init_projects(ctx.executable_dir.as_deref()) {
        store.set(key, path);
    }
    for (key, value) in descriptor.presets() {
        store.set(key, value);
    }
}
