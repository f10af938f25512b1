//! Metrics command - Turnaround analytics over approved records

use std::path::Path;

use crate::domain::{average_turnaround, TurnaroundFilter};
use crate::errors::{QapError, Result};
use crate::fs;

use super::open_store;

/// Report average turnaround across approved records
pub async fn run(
    cwd: Option<&Path>,
    plant: Option<&str>,
    level: Option<u8>,
    json: bool,
) -> Result<()> {
    let (root, _config) = open_store(cwd)?;
    let records = fs::list_records(&root)?;

    let filter = TurnaroundFilter {
        plant: plant.map(str::to_string),
        level,
    };
    let summary = average_turnaround(&records, &filter);

    if json {
        let payload = serde_json::json!({
            "average_ms": summary.average_ms,
            "count": summary.count,
        });
        println!("{}", serde_json::to_string_pretty(&payload).map_err(|e| {
            QapError::InvalidJson(e.to_string())
        })?);
        return Ok(());
    }

    let scope = match level {
        Some(level) => format!("level {} turnaround", level),
        None => "submit-to-approve turnaround".to_string(),
    };
    if summary.count == 0 {
        println!("No approved records match.");
    } else {
        println!(
            "Average {} over {} record(s): {:.1}h",
            scope,
            summary.count,
            summary.average_ms as f64 / 3_600_000.0
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{finalize, Decision};
    use crate::schemas::QapStatus;
    use tempfile::TempDir;

    async fn setup_store_with_approved() -> TempDir {
        let temp = TempDir::new().unwrap();
        super::super::init::run(Some(temp.path()), false).await.unwrap();
        super::super::user_add::run(Some(temp.path()), "ravi", "requestor", "p2")
            .await
            .unwrap();
        super::super::new::run(Some(temp.path()), "Plan", "Acme", "p2", None, "ravi")
            .await
            .unwrap();
        super::super::submit::run(Some(temp.path()), "QAP-001", "ravi").await.unwrap();

        let record = fs::read_record(temp.path(), "QAP-001").unwrap();
        let approved = finalize(&record, Decision::Approve, "boss", None);
        fs::write_record(temp.path(), &approved).unwrap();
        temp
    }

    #[tokio::test]
    async fn test_metrics_runs_on_empty_store() {
        let temp = TempDir::new().unwrap();
        super::super::init::run(Some(temp.path()), false).await.unwrap();

        run(Some(temp.path()), None, None, false).await.unwrap();
        run(Some(temp.path()), None, None, true).await.unwrap();
    }

    #[tokio::test]
    async fn test_metrics_with_approved_record() {
        let temp = setup_store_with_approved().await;

        let record = fs::read_record(temp.path(), "QAP-001").unwrap();
        assert_eq!(record.status, QapStatus::Approved);

        run(Some(temp.path()), Some("p2"), None, false).await.unwrap();
        run(Some(temp.path()), None, Some(2), true).await.unwrap();
    }
}
