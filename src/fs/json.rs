//! JSON file operations with schema validation
//!
//! Provides functions to read and write JSON files with serde validation.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{QapError, Result};
use crate::schemas::{Config, QapRecord, UserRegistry};

use super::paths::{get_config_path, get_record_json_path, get_records_dir, get_users_path};

/// Read and deserialize a JSON file.
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidJson` - If the file contains invalid JSON or does not match
///   the expected schema
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            QapError::FileNotFound(format!("File not found: {}", path.display()))
        } else {
            QapError::Io(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| {
        QapError::InvalidJson(format!("Invalid JSON in file {}: {}", path.display(), e))
    })
}

/// Write a value to a JSON file with pretty formatting.
///
/// Uses atomic write (write to temp file, then rename) to avoid partial writes.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content =
        serde_json::to_string_pretty(data).map_err(|e| QapError::InvalidJson(e.to_string()))?;

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Write atomically: write to temp file, then rename
    let temp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Read the config.json file for a store, falling back to defaults.
pub fn read_config(root: &Path) -> Result<Config> {
    let path = get_config_path(root);
    if !path.exists() {
        return Ok(Config::default());
    }
    read_json(&path)
}

/// Write the config.json file for a store.
pub fn write_config(root: &Path, config: &Config) -> Result<()> {
    write_json(&get_config_path(root), config)
}

/// Read the users.json registry, falling back to an empty registry.
pub fn read_users(root: &Path) -> Result<UserRegistry> {
    let path = get_users_path(root);
    if !path.exists() {
        return Ok(UserRegistry::default());
    }
    read_json(&path)
}

/// Write the users.json registry.
pub fn write_users(root: &Path, registry: &UserRegistry) -> Result<()> {
    write_json(&get_users_path(root), registry)
}

/// Read a record.json file by record id.
///
/// # Errors
/// * `RecordNotFound` - If no record with the given id exists
pub fn read_record(root: &Path, id: &str) -> Result<QapRecord> {
    let path = get_record_json_path(root, id);
    if !path.exists() {
        return Err(QapError::RecordNotFound(id.to_string()));
    }
    read_json(&path)
}

/// Write a record.json file for a record.
pub fn write_record(root: &Path, record: &QapRecord) -> Result<()> {
    write_json(&get_record_json_path(root, &record.id), record)
}

/// Read every record in the store, sorted by id.
///
/// Directories without a readable record.json are skipped.
pub fn list_records(root: &Path) -> Result<Vec<QapRecord>> {
    let records_dir = get_records_dir(root);
    if !records_dir.exists() {
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    for dir_entry in fs::read_dir(&records_dir)? {
        let dir_entry = dir_entry?;
        if !dir_entry.path().is_dir() {
            continue;
        }
        let path = dir_entry.path().join("record.json");
        match read_json::<QapRecord>(&path) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable record");
            }
        }
    }

    records.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(records)
}
