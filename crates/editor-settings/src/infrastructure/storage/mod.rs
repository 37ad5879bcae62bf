//! Storage infrastructure: everything the settings service keeps on disk.
//!
//! - **`location`** – Finds (and creates) the settings root directory and the
//!   per-project sub-directory.
//! - **`settings_file`** – Reads and writes `editor_settings.toml`.
//! - **`dir_lists`** – Reads and writes the newline-delimited favorite and
//!   recent directory lists.

pub mod dir_lists;
pub mod location;
pub mod settings_file;
