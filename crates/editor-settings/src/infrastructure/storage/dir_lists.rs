//! Favorite and recent directory lists.
//!
//! Both lists live in the per-project settings directory as plain text files
//! with one path per line.  Reading stops at the first blank line, so a file
//! with a trailing empty line (or junk after a blank separator) still yields
//! only the real entries.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// File name of the favorite directories list.
pub const FAVORITE_DIRS_FILE: &str = "favorite_dirs";
/// File name of the recent directories list.
pub const RECENT_DIRS_FILE: &str = "recent_dirs";

#[derive(Debug, Error)]
pub enum DirListError {
    #[error("I/O error accessing directory list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parses list file text: trimmed lines up to the first blank one.
pub fn parse_dir_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .take_while(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads the list at `path`.  A missing file is an empty list.
///
/// # Errors
///
/// Returns [`DirListError::Io`] for read failures other than "not found".
pub fn read_dir_list(path: &Path) -> Result<Vec<String>, DirListError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(parse_dir_list(&text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(source) => Err(DirListError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Overwrites the list at `path` with `dirs`, one per line.
///
/// # Errors
///
/// Returns [`DirListError::Io`] if the file cannot be written.
pub fn write_dir_list(path: &Path, dirs: &[String]) -> Result<(), DirListError> {
    let mut text = String::new();
    for dir in dirs {
        text.push_str(dir);
        text.push('\n');
    }
    std::fs::write(path, text).map_err(|source| DirListError::Io {
        path: path.to_path_buf(),
        source,
    })
}
