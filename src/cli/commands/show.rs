//! Show command - Display one record

use std::path::Path;

use crate::domain::{can_user_access_qap, level_name, turnaround_time};
use crate::errors::{QapError, Result};
use crate::fs;

use super::{open_store, require_user};

/// Show details of a specific record
pub async fn run(cwd: Option<&Path>, id: &str, as_user: Option<&str>, json: bool) -> Result<()> {
    let (root, config) = open_store(cwd)?;
    let record = fs::read_record(&root, id)?;

    if let Some(username) = as_user {
        let user = require_user(&root, username)?;
        if !can_user_access_qap(&user, &record, &config.head_review_plants) {
            return Err(QapError::AccessDenied(format!(
                "{} may not view {} at level {}",
                username, record.id, record.current_level
            )));
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&record).map_err(|e| {
            QapError::InvalidJson(e.to_string())
        })?);
        return Ok(());
    }

    println!("{} - {}", record.id, record.title);
    println!("  customer: {}", record.customer);
    println!("  plant:    {}", record.plant);
    println!(
        "  status:   {} (level {}, {})",
        record.status,
        record.current_level,
        level_name(record.current_level)
    );
    if let Some(by) = &record.submitted_by {
        println!("  owner:    {}", by);
    }
    println!("  specs:    {} mqp, {} visual", record.specs.mqp.len(), record.specs.visual.len());

    if !record.timeline.is_empty() {
        println!("  timeline:");
        for entry in &record.timeline {
            let comment = entry
                .comments
                .as_deref()
                .map(|c| format!(" - {}", c))
                .unwrap_or_default();
            println!(
                "    [{}] L{} {} ({}){}",
                entry.timestamp.format("%Y-%m-%d %H:%M"),
                entry.level,
                entry.action,
                entry.user,
                comment
            );
        }
    }

    for level in [2u8, 3, 4, 5] {
        let ms = turnaround_time(&record, level);
        if ms > 0 {
            println!("  level {} turnaround: {:.1}h", level, ms as f64 / 3_600_000.0);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn setup_store() -> TempDir {
        let temp = TempDir::new().unwrap();
        super::super::init::run(Some(temp.path()), false).await.unwrap();
        super::super::user_add::run(Some(temp.path()), "ravi", "requestor", "p4")
            .await
            .unwrap();
        super::super::user_add::run(Some(temp.path()), "lars", "quality", "p2")
            .await
            .unwrap();
        super::super::new::run(Some(temp.path()), "Plan", "Acme", "p4", None, "ravi")
            .await
            .unwrap();
        super::super::submit::run(Some(temp.path()), "QAP-001", "ravi").await.unwrap();
        temp
    }

    #[tokio::test]
    async fn test_show_unrestricted() {
        let temp = setup_store().await;
        run(Some(temp.path()), "QAP-001", None, false).await.unwrap();
        run(Some(temp.path()), "QAP-001", None, true).await.unwrap();
    }

    #[tokio::test]
    async fn test_show_enforces_access_when_user_given() {
        let temp = setup_store().await;

        // Owner sees it
        run(Some(temp.path()), "QAP-001", Some("ravi"), false).await.unwrap();

        // Wrong-plant reviewer does not
        let result = run(Some(temp.path()), "QAP-001", Some("lars"), false).await;
        assert!(matches!(result.unwrap_err(), QapError::AccessDenied(_)));
    }

    #[tokio::test]
    async fn test_show_missing_record() {
        let temp = setup_store().await;
        let result = run(Some(temp.path()), "QAP-404", None, false).await;

        assert!(matches!(result.unwrap_err(), QapError::RecordNotFound(_)));
    }
}
