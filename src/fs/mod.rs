//! File system utilities for qapflow
//!
//! Provides path resolution and JSON file operations.

mod json;
mod paths;

pub use json::{
    list_records, read_config, read_json, read_record, read_users, write_config, write_json,
    write_record, write_users,
};
pub use paths::{
    find_store_root, get_config_path, get_record_dir, get_record_json_path, get_records_dir,
    get_store_dir, get_users_path, resolve_cwd,
};
