//! Turnaround analytics
//!
//! Turnaround is measured on the timeline: a level's window opens with its
//! "Sent to ..." entry (or the submission entry, for level 2) and closes with
//! its "Reviewed ..." or "Approved ..." entry. Missing boundaries count as 0
//! rather than erroring, matching the original tool.

use chrono::{DateTime, Utc};

use crate::schemas::{QapRecord, QapStatus, TimelineEntry};

use super::states::is_terminal;

/// Optional restrictions for [`average_turnaround`]
#[derive(Debug, Clone, Default)]
pub struct TurnaroundFilter {
    /// Restrict to records from this plant (case-insensitive)
    pub plant: Option<String>,

    /// Average a single level's turnaround instead of submit-to-approve
    pub level: Option<u8>,
}

/// Aggregate turnaround over a record set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnaroundSummary {
    /// Average duration in milliseconds (0 when count is 0)
    pub average_ms: i64,

    /// Number of records that contributed
    pub count: usize,
}

fn opens_level(entry: &TimelineEntry) -> bool {
    entry.action.contains("Sent to") || entry.action.starts_with("Submitted")
}

fn closes_level(entry: &TimelineEntry) -> bool {
    entry.action.contains("Reviewed") || entry.action.contains("Approved")
}

/// Milliseconds a record spent at a level, or 0 if either boundary is missing
pub fn turnaround_time(record: &QapRecord, level: u8) -> i64 {
    let start = record
        .timeline
        .iter()
        .find(|e| e.level == level && opens_level(e))
        .map(|e| e.timestamp);
    let end = record
        .timeline
        .iter()
        .find(|e| e.level == level && closes_level(e))
        .map(|e| e.timestamp);

    match (start, end) {
        (Some(start), Some(end)) => (end - start).num_milliseconds(),
        _ => 0,
    }
}

/// Milliseconds from submission to the plant head's approval entry,
/// or 0 if either boundary is missing
pub fn total_turnaround_time(record: &QapRecord) -> i64 {
    let start = record
        .submitted_at
        .or_else(|| record.timeline.first().map(|e| e.timestamp));
    let end = record
        .timeline
        .iter()
        .find(|e| e.action.contains("Approved"))
        .map(|e| e.timestamp);

    match (start, end) {
        (Some(start), Some(end)) => (end - start).num_milliseconds(),
        _ => 0,
    }
}

/// Average turnaround across approved records.
///
/// Only records with status `approved` contribute. With a level filter the
/// per-level turnaround is averaged; otherwise the full submit-to-approve
/// duration is. A count of 0 always comes with an average of 0.
pub fn average_turnaround(records: &[QapRecord], filter: &TurnaroundFilter) -> TurnaroundSummary {
    let plant = filter.plant.as_ref().map(|p| p.trim().to_lowercase());

    let durations: Vec<i64> = records
        .iter()
        .filter(|r| r.status == QapStatus::Approved)
        .filter(|r| plant.as_ref().map_or(true, |p| r.plant == *p))
        .map(|r| match filter.level {
            Some(level) => turnaround_time(r, level),
            None => total_turnaround_time(r),
        })
        .collect();

    let count = durations.len();
    if count == 0 {
        return TurnaroundSummary { average_ms: 0, count: 0 };
    }

    TurnaroundSummary {
        average_ms: durations.iter().sum::<i64>() / count as i64,
        count,
    }
}

/// Whether a record has sat at its current level past the review deadline.
///
/// Display-only: an overdue record is never advanced automatically.
pub fn is_overdue(record: &QapRecord, now: DateTime<Utc>, deadline_days: u32) -> bool {
    if is_terminal(record.status) {
        return false;
    }
    match record.level_start_times.get(&record.current_level) {
        Some(started) => (now - *started).num_days() >= i64::from(deadline_days),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry(level: u8, action: &str, at: DateTime<Utc>) -> TimelineEntry {
        TimelineEntry {
            level,
            action: action.to_string(),
            user: "u".to_string(),
            timestamp: at,
            comments: None,
        }
    }

    fn base_record(plant: &str) -> QapRecord {
        QapRecord::new(
            "QAP-001".to_string(),
            "Test Plan".to_string(),
            "Acme Solar".to_string(),
            plant,
        )
    }

    fn approved_record(plant: &str, level3_minutes: i64, total_minutes: i64) -> QapRecord {
        let t0 = Utc::now() - Duration::days(10);
        let mut record = base_record(plant);
        record.status = QapStatus::Approved;
        record.current_level = 5;
        record.submitted_at = Some(t0);
        record.timeline = vec![
            entry(2, "Submitted for review", t0),
            entry(3, "Sent to Head for review", t0),
            entry(3, "Reviewed by head", t0 + Duration::minutes(level3_minutes)),
            entry(5, "Approved by Plant Head", t0 + Duration::minutes(total_minutes)),
        ];
        record
    }

    #[test]
    fn test_turnaround_time_for_level() {
        let record = approved_record("p4", 90, 300);
        assert_eq!(turnaround_time(&record, 3), Duration::minutes(90).num_milliseconds());
    }

    #[test]
    fn test_turnaround_time_missing_boundary_is_zero() {
        let record = base_record("p4");
        assert_eq!(turnaround_time(&record, 3), 0);

        // Start without an end
        let mut record = base_record("p4");
        record.timeline = vec![entry(3, "Sent to Head for review", Utc::now())];
        assert_eq!(turnaround_time(&record, 3), 0);
    }

    #[test]
    fn test_total_turnaround_time() {
        let record = approved_record("p4", 90, 300);
        assert_eq!(total_turnaround_time(&record), Duration::minutes(300).num_milliseconds());
    }

    #[test]
    fn test_average_turnaround_empty_set() {
        let summary = average_turnaround(&[], &TurnaroundFilter::default());
        assert_eq!(summary, TurnaroundSummary { average_ms: 0, count: 0 });
    }

    #[test]
    fn test_average_turnaround_ignores_unapproved() {
        let mut pending = approved_record("p4", 60, 120);
        pending.status = QapStatus::Level5;

        let summary = average_turnaround(&[pending], &TurnaroundFilter::default());
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average_ms, 0);
    }

    #[test]
    fn test_average_turnaround_total() {
        let records = vec![approved_record("p4", 60, 100), approved_record("p4", 60, 300)];
        let summary = average_turnaround(&records, &TurnaroundFilter::default());

        assert_eq!(summary.count, 2);
        assert_eq!(summary.average_ms, Duration::minutes(200).num_milliseconds());
    }

    #[test]
    fn test_average_turnaround_per_level() {
        let records = vec![approved_record("p4", 30, 100), approved_record("p5", 90, 100)];
        let filter = TurnaroundFilter { plant: None, level: Some(3) };
        let summary = average_turnaround(&records, &filter);

        assert_eq!(summary.count, 2);
        assert_eq!(summary.average_ms, Duration::minutes(60).num_milliseconds());
    }

    #[test]
    fn test_average_turnaround_plant_filter() {
        let records = vec![approved_record("p4", 30, 100), approved_record("p2", 30, 500)];
        let filter = TurnaroundFilter { plant: Some("P2".to_string()), level: None };
        let summary = average_turnaround(&records, &filter);

        assert_eq!(summary.count, 1);
        assert_eq!(summary.average_ms, Duration::minutes(500).num_milliseconds());
    }

    #[test]
    fn test_is_overdue() {
        let now = Utc::now();
        let mut record = base_record("p4");
        record.current_level = 2;
        record.status = QapStatus::Level2;
        record.level_start_times.insert(2, now - Duration::days(5));

        assert!(is_overdue(&record, now, 4));
        assert!(!is_overdue(&record, now, 7));
    }

    #[test]
    fn test_terminal_records_are_never_overdue() {
        let now = Utc::now();
        let mut record = approved_record("p4", 30, 60);
        record.level_start_times.insert(5, now - Duration::days(30));

        assert!(!is_overdue(&record, now, 4));
    }

    #[test]
    fn test_overdue_without_start_time() {
        let record = base_record("p4");
        assert!(!is_overdue(&record, Utc::now(), 4));
    }
}
