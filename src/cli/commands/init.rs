//! Init command - Create a new QAP store

use std::path::Path;

use tracing::info;

use crate::errors::{QapError, Result};
use crate::fs::{self, get_store_dir};
use crate::schemas::{Config, UserRegistry};

/// Initialize a new QAP store in the given directory
pub async fn run(cwd: Option<&Path>, force: bool) -> Result<()> {
    let root = fs::resolve_cwd(cwd);
    let store_dir = get_store_dir(&root);

    if store_dir.exists() && !force {
        return Err(QapError::ConfigError(format!(
            "{} already exists (use --force to re-initialize)",
            store_dir.display()
        )));
    }

    std::fs::create_dir_all(fs::get_records_dir(&root))?;
    fs::write_config(&root, &Config::default())?;
    fs::write_users(&root, &UserRegistry::default())?;

    info!(store = %store_dir.display(), "initialized QAP store");
    println!("Initialized QAP store at {}", store_dir.display());
    Ok(())
}
