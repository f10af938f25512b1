//! Advance command - Move a record toward a target level

use std::path::Path;

use tracing::info;

use crate::domain::{can_user_access_qap, is_terminal, process_workflow_transition, NextLevel};
use crate::errors::{QapError, Result};
use crate::fs;
use crate::schemas::Role;

use super::{open_store, require_user};

/// Advance a record toward the requested level
pub async fn run(cwd: Option<&Path>, id: &str, to: &str, as_user: &str) -> Result<()> {
    let (root, config) = open_store(cwd)?;
    let user = require_user(&root, as_user)?;
    let record = fs::read_record(&root, id)?;

    let next: NextLevel = to.parse().map_err(QapError::InvalidArgument)?;

    if is_terminal(record.status) {
        return Err(QapError::InvalidTransition(format!(
            "record {} is {} and cannot be advanced",
            record.id, record.status
        )));
    }
    if user.role != Role::Admin && !can_user_access_qap(&user, &record, &config.head_review_plants) {
        return Err(QapError::AccessDenied(format!(
            "{} may not advance {} from level {}",
            user.username, record.id, record.current_level
        )));
    }

    let advanced =
        process_workflow_transition(&record, next, &user.username, &config.head_review_plants);
    fs::write_record(&root, &advanced)?;

    info!(
        id = %advanced.id,
        from = record.current_level,
        status = %advanced.status,
        level = advanced.current_level,
        "record advanced"
    );
    println!(
        "{} is now {} (level {})",
        advanced.id, advanced.status, advanced.current_level
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::QapStatus;
    use tempfile::TempDir;

    async fn setup_store(plant: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        super::super::init::run(Some(temp.path()), false).await.unwrap();
        super::super::user_add::run(Some(temp.path()), "ravi", "requestor", plant)
            .await
            .unwrap();
        super::super::user_add::run(Some(temp.path()), "meena", "quality", plant)
            .await
            .unwrap();
        super::super::user_add::run(Some(temp.path()), "root", "admin", "")
            .await
            .unwrap();
        super::super::new::run(Some(temp.path()), "Plan", "Acme", plant, None, "ravi")
            .await
            .unwrap();
        super::super::submit::run(Some(temp.path()), "QAP-001", "ravi").await.unwrap();
        temp
    }

    #[tokio::test]
    async fn test_advance_to_head_review() {
        let temp = setup_store("p4").await;
        run(Some(temp.path()), "QAP-001", "3", "meena").await.unwrap();

        let record = fs::read_record(temp.path(), "QAP-001").unwrap();
        assert_eq!(record.status, QapStatus::Level3);
        assert_eq!(record.current_level, 3);
    }

    #[tokio::test]
    async fn test_advance_bypasses_head_for_p2() {
        let temp = setup_store("p2").await;
        run(Some(temp.path()), "QAP-001", "3", "meena").await.unwrap();

        let record = fs::read_record(temp.path(), "QAP-001").unwrap();
        assert_eq!(record.status, QapStatus::Level4);
        assert_eq!(record.current_level, 4);
        assert!(record.timeline.iter().any(|e| e.action == "Auto-bypassed (P2 plant)"));
    }

    #[tokio::test]
    async fn test_advance_denied_once_record_moves_on() {
        let temp = setup_store("p4").await;
        run(Some(temp.path()), "QAP-001", "3", "meena").await.unwrap();

        // meena (quality, level 2) no longer owns the record at level 3
        let result = run(Some(temp.path()), "QAP-001", "4", "meena").await;
        assert!(matches!(result.unwrap_err(), QapError::AccessDenied(_)));
    }

    #[tokio::test]
    async fn test_advance_admin_override() {
        let temp = setup_store("p4").await;
        run(Some(temp.path()), "QAP-001", "3", "root").await.unwrap();
        run(Some(temp.path()), "QAP-001", "4", "root").await.unwrap();

        let record = fs::read_record(temp.path(), "QAP-001").unwrap();
        assert_eq!(record.status, QapStatus::Level4);
    }

    #[tokio::test]
    async fn test_advance_rejects_bad_target() {
        let temp = setup_store("p4").await;
        let result = run(Some(temp.path()), "QAP-001", "99", "meena").await;

        assert!(matches!(result.unwrap_err(), QapError::InvalidArgument(_)));
    }
}
