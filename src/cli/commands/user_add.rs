//! User-add command - Register a workflow participant

use std::path::Path;

use tracing::info;

use crate::errors::{QapError, Result};
use crate::fs;
use crate::schemas::{Role, User};

use super::open_store;

/// Register a user in the store's users.json
pub async fn run(cwd: Option<&Path>, username: &str, role: &str, plants: &str) -> Result<()> {
    let (root, _config) = open_store(cwd)?;

    let role: Role = role
        .parse()
        .map_err(QapError::InvalidArgument)?;

    let mut registry = fs::read_users(&root)?;
    if registry.find(username).is_some() {
        return Err(QapError::InvalidArgument(format!(
            "user {} is already registered",
            username
        )));
    }

    registry
        .users
        .push(User::new(username.to_string(), role, plants.to_string()));
    fs::write_users(&root, &registry)?;

    info!(username, %role, plants, "registered user");
    println!("Registered {} ({})", username, role);
    Ok(())
}
