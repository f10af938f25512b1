//! New command - Create a draft record

use std::path::Path;

use tracing::info;

use crate::errors::{QapError, Result};
use crate::fs;
use crate::schemas::{QapRecord, Role, SpecSheet};

use super::{open_store, require_user};

/// Create a new draft record owned by the acting requestor
pub async fn run(
    cwd: Option<&Path>,
    title: &str,
    customer: &str,
    plant: &str,
    specs: Option<&Path>,
    as_user: &str,
) -> Result<()> {
    let (root, config) = open_store(cwd)?;
    let user = require_user(&root, as_user)?;

    if !matches!(user.role, Role::Requestor | Role::Admin) {
        return Err(QapError::AccessDenied(format!(
            "role '{}' cannot create records",
            user.role
        )));
    }

    let records = fs::list_records(&root)?;
    let id = next_record_id(&records, &config.id_prefix);

    let mut record = QapRecord::new(id.clone(), title.to_string(), customer.to_string(), plant);
    record.submitted_by = Some(user.username.clone());

    if let Some(specs_path) = specs {
        let sheet: SpecSheet = fs::read_json(specs_path)?;
        record = record.with_specs(sheet);
    }

    fs::write_record(&root, &record)?;

    info!(id = %record.id, plant = %record.plant, "created draft record");
    println!("Created {} ({}, plant {})", record.id, record.title, record.plant);
    Ok(())
}

/// Next free record id under the given prefix.
///
/// Scans existing ids for the highest numeric suffix and increments it.
fn next_record_id(records: &[QapRecord], prefix: &str) -> String {
    let max = records
        .iter()
        .filter_map(|r| r.id.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{}{:03}", prefix, max + 1)
}
