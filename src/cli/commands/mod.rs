//! Command implementations for the qapflow CLI

pub mod advance;
pub mod decide;
pub mod init;
pub mod list;
pub mod metrics;
pub mod new;
pub mod reopen;
pub mod review;
pub mod show;
pub mod submit;
pub mod user_add;

use std::path::{Path, PathBuf};

use crate::config::load_config;
use crate::errors::{QapError, Result};
use crate::fs;
use crate::schemas::{Config, User};

/// Locate the store root and load its configuration
pub(crate) fn open_store(cwd: Option<&Path>) -> Result<(PathBuf, Config)> {
    let root = fs::find_store_root(&fs::resolve_cwd(cwd))?;
    let config = load_config(&root)?;
    Ok((root, config))
}

/// Look up a registered user by username
pub(crate) fn require_user(root: &Path, username: &str) -> Result<User> {
    fs::read_users(root)?
        .find(username)
        .cloned()
        .ok_or_else(|| QapError::UnknownUser(username.to_string()))
}
