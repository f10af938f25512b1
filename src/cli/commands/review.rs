//! Review command - Record a role's response at the record's current level

use std::collections::BTreeMap;
use std::path::Path;

use tracing::info;

use crate::domain::{can_user_access_qap, record_review, role_reviews_at};
use crate::errors::{QapError, Result};
use crate::fs;
use crate::schemas::Role;

use super::{open_store, require_user};

/// Record a review response for the acting user's role
pub async fn run(
    cwd: Option<&Path>,
    id: &str,
    acknowledge: bool,
    raw_comments: &[String],
    as_user: &str,
) -> Result<()> {
    let (root, config) = open_store(cwd)?;
    let user = require_user(&root, as_user)?;
    let record = fs::read_record(&root, id)?;
    let level = record.current_level;

    if !can_user_access_qap(&user, &record, &config.head_review_plants) {
        return Err(QapError::AccessDenied(format!(
            "{} may not act on {} at level {}",
            user.username, record.id, level
        )));
    }
    if user.role != Role::Admin && !role_reviews_at(user.role, level) {
        return Err(QapError::AccessDenied(format!(
            "role '{}' does not review at level {}",
            user.role, level
        )));
    }

    let mut comments = BTreeMap::new();
    for raw in raw_comments {
        let (index, text) = parse_row_comment(raw)?;
        comments.insert(index, text);
    }

    let reviewed = record_review(&record, level, user.role, &user.username, acknowledge, comments);
    fs::write_record(&root, &reviewed)?;

    info!(id = %reviewed.id, level, role = %user.role, acknowledge, "review recorded");
    println!("{} reviewed by {} at level {}", reviewed.id, user.username, level);
    Ok(())
}

/// Parse a per-row comment in "index:text" form
fn parse_row_comment(raw: &str) -> Result<(usize, String)> {
    let (index, text) = raw.split_once(':').ok_or_else(|| {
        QapError::InvalidArgument(format!("comment '{}' is not in index:text form", raw))
    })?;
    let index: usize = index.trim().parse().map_err(|_| {
        QapError::InvalidArgument(format!("comment '{}' has a non-numeric row index", raw))
    })?;
    Ok((index, text.trim().to_string()))
}
