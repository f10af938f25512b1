//! Decide command - Plant head approval or rejection at level 5

use std::path::Path;

use tracing::info;

use crate::domain::{can_user_access_qap, finalize, Decision};
use crate::errors::{QapError, Result};
use crate::fs;
use crate::schemas::{QapStatus, Role};

use super::{open_store, require_user};

/// Apply the plant head's final decision to a record
pub async fn run(
    cwd: Option<&Path>,
    id: &str,
    decision: Decision,
    comments: Option<String>,
    as_user: &str,
) -> Result<()> {
    let (root, config) = open_store(cwd)?;
    let user = require_user(&root, as_user)?;
    let record = fs::read_record(&root, id)?;

    if record.status != QapStatus::Level5 {
        return Err(QapError::InvalidTransition(format!(
            "record {} is {}, not awaiting plant head approval",
            record.id, record.status
        )));
    }
    let may_decide = user.role == Role::Admin
        || (user.role == Role::PlantHead
            && can_user_access_qap(&user, &record, &config.head_review_plants));
    if !may_decide {
        return Err(QapError::AccessDenied(format!(
            "role '{}' cannot decide on {}",
            user.role, record.id
        )));
    }

    let decided = finalize(&record, decision, &user.username, comments);
    fs::write_record(&root, &decided)?;

    info!(id = %decided.id, status = %decided.status, "final decision recorded");
    println!("{} {}", decided.id, decided.status);
    Ok(())
}
