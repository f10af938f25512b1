//! Path resolution utilities for qapflow
//!
//! Provides functions to locate the store root and construct paths to the
//! files that make up a QAP store.

use std::path::{Path, PathBuf};

use crate::errors::{QapError, Result};

/// Find the store root containing a .qapflow directory.
///
/// Walks up the directory tree from the starting directory.
///
/// # Errors
/// * `StoreNotFound` - If no .qapflow directory is found on the way up
pub fn find_store_root(start_cwd: &Path) -> Result<PathBuf> {
    let mut current = start_cwd
        .canonicalize()
        .map_err(|e| QapError::StoreNotFound(format!("Cannot resolve path: {}", e)))?;

    loop {
        if current.join(".qapflow").exists() {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => {
                return Err(QapError::StoreNotFound(
                    "Could not find a .qapflow directory; run `qapflow init` first".to_string(),
                ));
            }
        }
    }
}

/// Resolve the current working directory, optionally using an override.
pub fn resolve_cwd(cwd_option: Option<&Path>) -> PathBuf {
    match cwd_option {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Get the path to the .qapflow directory.
pub fn get_store_dir(root: &Path) -> PathBuf {
    root.join(".qapflow")
}

/// Get the path to the config.json file.
pub fn get_config_path(root: &Path) -> PathBuf {
    get_store_dir(root).join("config.json")
}

/// Get the path to the users.json file.
pub fn get_users_path(root: &Path) -> PathBuf {
    get_store_dir(root).join("users.json")
}

/// Get the path to the records directory.
pub fn get_records_dir(root: &Path) -> PathBuf {
    get_store_dir(root).join("records")
}

/// Get the path to a specific record's directory.
pub fn get_record_dir(root: &Path, id: &str) -> PathBuf {
    get_records_dir(root).join(id)
}

/// Get the path to a record's record.json file.
pub fn get_record_json_path(root: &Path, id: &str) -> PathBuf {
    get_record_dir(root, id).join("record.json")
}
