// src/file.rs

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::config::consts::{DECK_EXT, SUMMARY_EXT};
use crate::error::Result;

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(std::io::Error::other(format!(
            "Path exists but is not a directory: {}",
            dir.display()
        ))
        .into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Create the directory a file is about to be written into.
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

/// `<dir>/<stem> - Parte <n>.pptx`
pub fn deck_path(dir: &Path, stem: &str, sequence: usize) -> PathBuf {
    dir.join(format!("{stem} - Parte {sequence}.{DECK_EXT}"))
}

/// `<dir>/<stem>.json`
pub fn summary_path(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{stem}.{SUMMARY_EXT}"))
}

/// Duplicate handling **only within this run**: two pages with the same
/// title get `"<stem>"` and `"<stem> (2)"`.
pub fn resolve_stem(stem: &str, seen: &mut HashMap<String, usize>) -> String {
    let count = seen.entry(s!(stem)).or_insert(0);
    *count += 1;
    if *count == 1 {
        s!(stem)
    } else {
        format!("{stem} ({})", *count)
    }
}
