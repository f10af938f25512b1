//! Submit command - Send a draft into level-2 review

use std::path::Path;

use tracing::info;

use crate::domain::submit_for_review;
use crate::errors::{QapError, Result};
use crate::fs;
use crate::schemas::{QapStatus, Role};

use super::{open_store, require_user};

/// Submit a draft record for review
pub async fn run(cwd: Option<&Path>, id: &str, as_user: &str) -> Result<()> {
    let (root, _config) = open_store(cwd)?;
    let user = require_user(&root, as_user)?;
    let record = fs::read_record(&root, id)?;

    if !matches!(record.status, QapStatus::Draft | QapStatus::EditRequested) {
        return Err(QapError::InvalidTransition(format!(
            "record {} is {} and cannot be submitted",
            record.id, record.status
        )));
    }

    let is_owner = record.submitted_by.as_deref() == Some(user.username.as_str());
    if user.role != Role::Admin && !is_owner {
        return Err(QapError::AccessDenied(format!(
            "only the owning requestor may submit {}",
            record.id
        )));
    }

    let submitted = submit_for_review(&record, &user.username);
    fs::write_record(&root, &submitted)?;

    info!(id = %submitted.id, status = %submitted.status, "record submitted");
    println!("{} submitted for review (level 2)", submitted.id);
    Ok(())
}
