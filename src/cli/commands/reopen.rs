//! Reopen command - Reset a submitted or finished record to draft

use std::path::Path;

use tracing::info;

use crate::domain::{reopen_for_edit, TransitionResult};
use crate::errors::{QapError, Result};
use crate::fs;
use crate::schemas::QapStatus;

use super::{open_store, require_user};

/// Reopen a record for editing as its owning requestor.
///
/// Discards any approval in effect; the full history stays on the timeline.
pub async fn run(cwd: Option<&Path>, id: &str, as_user: &str) -> Result<()> {
    let (root, _config) = open_store(cwd)?;
    let user = require_user(&root, as_user)?;
    let record = fs::read_record(&root, id)?;

    if record.status == QapStatus::Draft {
        return Err(QapError::InvalidTransition(format!(
            "record {} is already a draft",
            record.id
        )));
    }

    match reopen_for_edit(&record, &user.username) {
        TransitionResult::Success { next_record } => {
            fs::write_record(&root, &next_record)?;
            info!(id = %next_record.id, "record reopened for editing");
            println!("{} reopened as draft", next_record.id);
            Ok(())
        }
        TransitionResult::Refused { reason } => Err(QapError::AccessDenied(reason)),
    }
}
