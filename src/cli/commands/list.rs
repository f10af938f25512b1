//! List command - List records visible to the acting user

use std::path::Path;

use chrono::Utc;

use crate::domain::{accessible_qaps, is_overdue};
use crate::errors::{QapError, Result};
use crate::fs;
use crate::schemas::{QapRecord, QapStatus};

use super::{open_store, require_user};

/// List records with optional filtering
pub async fn run(
    cwd: Option<&Path>,
    as_user: Option<&str>,
    status: Option<&str>,
    plant: Option<&str>,
    json: bool,
) -> Result<()> {
    let (root, config) = open_store(cwd)?;
    let records = fs::list_records(&root)?;

    let visible: Vec<&QapRecord> = match as_user {
        Some(username) => {
            let user = require_user(&root, username)?;
            accessible_qaps(&user, &records, &config.head_review_plants)
        }
        None => records.iter().collect(),
    };

    let status_filter = match status {
        Some(s) => Some(s.parse::<QapStatus>().map_err(QapError::InvalidArgument)?),
        None => None,
    };
    let plant_filter = plant.map(|p| p.trim().to_lowercase());

    let filtered: Vec<&QapRecord> = visible
        .into_iter()
        .filter(|r| status_filter.map_or(true, |s| r.status == s))
        .filter(|r| plant_filter.as_ref().map_or(true, |p| r.plant == *p))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&filtered).map_err(|e| {
            QapError::InvalidJson(e.to_string())
        })?);
        return Ok(());
    }

    if filtered.is_empty() {
        println!("No records.");
        return Ok(());
    }

    let now = Utc::now();
    println!("{:<10} {:<15} {:<6} {:<6} {}", "ID", "STATUS", "LEVEL", "PLANT", "TITLE");
    for record in filtered {
        let overdue = if is_overdue(record, now, config.review_deadline_days) {
            "  [overdue]"
        } else {
            ""
        };
        println!(
            "{:<10} {:<15} {:<6} {:<6} {}{}",
            record.id, record.status, record.current_level, record.plant, record.title, overdue
        );
    }
    Ok(())
}
