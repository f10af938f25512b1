//! Workflow transition logic
//!
//! Pure functions for moving QAP records between review levels. No function
//! here mutates its input; each returns a new record with the transition
//! applied. Malformed records are not rejected - whatever branch matches the
//! requested target is applied as-is, matching the original tool's behavior.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::schemas::{QapRecord, QapStatus, Role, RoleResponse, TimelineEntry};

use super::states::plant_requires_head_review;

/// Target of a workflow advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextLevel {
    /// Head review (bypassed for plants without head review)
    Level3,
    /// Technical head review
    Level4,
    /// Back to the requestor for final comments
    FinalComments,
    /// Head final review pass
    Level3Final,
    /// Technical head final review pass
    Level4Final,
    /// Plant head final approval
    Level5,
}

impl std::fmt::Display for NextLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NextLevel::Level3 => "3",
            NextLevel::Level4 => "4",
            NextLevel::FinalComments => "final-comments",
            NextLevel::Level3Final => "level-3-final",
            NextLevel::Level4Final => "level-4-final",
            NextLevel::Level5 => "5",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for NextLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "3" | "level-3" => Ok(NextLevel::Level3),
            "4" | "level-4" => Ok(NextLevel::Level4),
            "5" | "level-5" => Ok(NextLevel::Level5),
            "final-comments" => Ok(NextLevel::FinalComments),
            "level-3-final" => Ok(NextLevel::Level3Final),
            "level-4-final" => Ok(NextLevel::Level4Final),
            _ => Err(format!("Unknown target level: {}", s)),
        }
    }
}

/// Final decision at plant head level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

/// Result of a guarded transition attempt
#[derive(Debug)]
pub enum TransitionResult {
    /// Successful transition with the new record
    Success {
        /// The record with the transition applied
        next_record: QapRecord,
    },
    /// Refused transition with a reason
    Refused {
        /// Why the transition was not applied
        reason: String,
    },
}

impl TransitionResult {
    /// Check if the transition was applied
    pub fn is_success(&self) -> bool {
        matches!(self, TransitionResult::Success { .. })
    }

    /// Check if the transition was refused
    pub fn is_refused(&self) -> bool {
        matches!(self, TransitionResult::Refused { .. })
    }

    /// Get the next record if the transition was applied
    pub fn record(self) -> Option<QapRecord> {
        match self {
            TransitionResult::Success { next_record } => Some(next_record),
            TransitionResult::Refused { .. } => None,
        }
    }

    /// Get the refusal reason if the transition was refused
    pub fn reason(self) -> Option<String> {
        match self {
            TransitionResult::Success { .. } => None,
            TransitionResult::Refused { reason } => Some(reason),
        }
    }
}

fn entry(
    level: u8,
    action: impl Into<String>,
    user: &str,
    at: DateTime<Utc>,
    comments: Option<String>,
) -> TimelineEntry {
    TimelineEntry {
        level,
        action: action.into(),
        user: user.to_string(),
        timestamp: at,
        comments,
    }
}

/// Submit a draft for level-2 review.
///
/// Stamps the submitter and submission time, moves the record to level 2
/// and opens its turnaround window.
pub fn submit_for_review(record: &QapRecord, user: &str) -> QapRecord {
    let now = Utc::now();
    let mut out = record.clone();
    out.submitted_by = Some(user.to_string());
    out.submitted_at = Some(now);
    out.with_level_end(1, now)
        .with_state(QapStatus::Level2, 2)
        .with_level_start(2, now)
        .with_timeline_entry(entry(2, "Submitted for review", user, now, None))
}

/// Advance a record toward the requested level.
///
/// Closes the turnaround window of the level being left, applies the
/// status/level pair for the target and opens the new level's window.
/// A level-3 request from a plant without head review is auto-bypassed
/// straight to level 4, appending both the bypass entry and the forward
/// entry. Calling this twice with the same target appends timeline entries
/// twice - the operation is deliberately not idempotent.
pub fn process_workflow_transition(
    record: &QapRecord,
    next: NextLevel,
    user: &str,
    head_plants: &[String],
) -> QapRecord {
    let now = Utc::now();
    let out = record.clone().with_level_end(record.current_level, now);

    let out = match next {
        NextLevel::Level3 => {
            if plant_requires_head_review(&record.plant, head_plants) {
                out.with_timeline_entry(entry(3, "Sent to Head for review", user, now, None))
                    .with_state(QapStatus::Level3, 3)
            } else {
                let bypass = format!("Auto-bypassed ({} plant)", record.plant.to_uppercase());
                out.with_timeline_entry(entry(3, bypass, user, now, None))
                    .with_timeline_entry(entry(4, "Sent to Technical Head", user, now, None))
                    .with_state(QapStatus::Level4, 4)
            }
        }
        NextLevel::Level4 => out
            .with_timeline_entry(entry(4, "Sent to Technical Head", user, now, None))
            .with_state(QapStatus::Level4, 4),
        NextLevel::FinalComments => out
            .with_timeline_entry(entry(
                1,
                "Sent to Requestor for final comments",
                user,
                now,
                None,
            ))
            .with_state(QapStatus::FinalComments, 1),
        NextLevel::Level3Final => out
            .with_timeline_entry(entry(3, "Sent to Head for final review", user, now, None))
            .with_state(QapStatus::Level3Final, 3),
        NextLevel::Level4Final => out
            .with_timeline_entry(entry(
                4,
                "Sent to Technical Head for final review",
                user,
                now,
                None,
            ))
            .with_state(QapStatus::Level4Final, 4),
        NextLevel::Level5 => out
            .with_timeline_entry(entry(
                5,
                "Sent to Plant Head for final approval",
                user,
                now,
                None,
            ))
            .with_state(QapStatus::Level5, 5),
    };

    let new_level = out.current_level;
    out.with_level_start(new_level, now)
}

/// Record a role's review response at a level.
///
/// Overwrites any earlier response from the same role at the same level and
/// appends a "Reviewed by ..." timeline entry, which closes the level's
/// turnaround window for analytics.
pub fn record_review(
    record: &QapRecord,
    level: u8,
    role: Role,
    user: &str,
    acknowledged: bool,
    comments: BTreeMap<usize, String>,
) -> QapRecord {
    let now = Utc::now();
    let response = RoleResponse {
        responded_by: user.to_string(),
        acknowledged,
        comments,
        responded_at: now,
    };
    record
        .clone()
        .with_response(level, role.to_string(), response)
        .with_timeline_entry(entry(level, format!("Reviewed by {}", role), user, now, None))
}

/// Apply the plant head's final decision at level 5
pub fn finalize(
    record: &QapRecord,
    decision: Decision,
    user: &str,
    comments: Option<String>,
) -> QapRecord {
    let now = Utc::now();
    let (status, action) = match decision {
        Decision::Approve => (QapStatus::Approved, "Approved by Plant Head"),
        Decision::Reject => (QapStatus::Rejected, "Rejected by Plant Head"),
    };
    record
        .clone()
        .with_level_end(5, now)
        .with_timeline_entry(entry(5, action, user, now, comments))
        .with_state(status, 5)
}

/// Reopen a submitted or finished record for editing.
///
/// Only the submitting requestor may reopen, and only once the record has
/// left draft. The record resets to draft at level 1; the timeline and the
/// level time maps are kept for audit, so an approval that is discarded this
/// way stays visible in history.
pub fn reopen_for_edit(record: &QapRecord, user: &str) -> TransitionResult {
    if record.status == QapStatus::Draft {
        return TransitionResult::Refused {
            reason: format!("record {} is already a draft", record.id),
        };
    }

    match &record.submitted_by {
        Some(owner) if owner == user => {}
        Some(owner) => {
            return TransitionResult::Refused {
                reason: format!("only {} may reopen record {}", owner, record.id),
            };
        }
        None => {
            return TransitionResult::Refused {
                reason: format!("record {} has no submitter on file", record.id),
            };
        }
    }

    let now = Utc::now();
    let next_record = record
        .clone()
        .with_timeline_entry(entry(1, "Reopened for editing", user, now, None))
        .with_state(QapStatus::Draft, 1)
        .with_level_start(1, now);

    TransitionResult::Success { next_record }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn head_plants() -> Vec<String> {
        vec!["p4".to_string(), "p5".to_string()]
    }

    fn make_record(plant: &str) -> QapRecord {
        QapRecord::new(
            "QAP-001".to_string(),
            "Test Plan".to_string(),
            "Acme Solar".to_string(),
            plant,
        )
    }

    fn submitted_record(plant: &str) -> QapRecord {
        submit_for_review(&make_record(plant), "ravi")
    }

    #[test]
    fn test_submit_moves_to_level_2() {
        let record = make_record("p4");
        let submitted = submit_for_review(&record, "ravi");

        assert_eq!(submitted.status, QapStatus::Level2);
        assert_eq!(submitted.current_level, 2);
        assert_eq!(submitted.submitted_by.as_deref(), Some("ravi"));
        assert!(submitted.submitted_at.is_some());
        assert_eq!(submitted.timeline.len(), 1);
        assert_eq!(submitted.timeline[0].action, "Submitted for review");
        assert!(submitted.level_start_times.contains_key(&2));

        // Original unchanged
        assert_eq!(record.status, QapStatus::Draft);
        assert!(record.timeline.is_empty());
    }

    #[test]
    fn test_level_3_for_head_review_plant() {
        let record = submitted_record("p4");
        let advanced = process_workflow_transition(&record, NextLevel::Level3, "meena", &head_plants());

        assert_eq!(advanced.status, QapStatus::Level3);
        assert_eq!(advanced.current_level, 3);
        let last = advanced.timeline.last().unwrap();
        assert_eq!(last.level, 3);
        assert_eq!(last.action, "Sent to Head for review");
        assert!(advanced.level_end_times.contains_key(&2));
        assert!(advanced.level_start_times.contains_key(&3));
    }

    #[test]
    fn test_level_3_bypassed_for_p2_plant() {
        let record = submitted_record("p2");
        let before = record.timeline.len();
        let advanced = process_workflow_transition(&record, NextLevel::Level3, "meena", &head_plants());

        assert_eq!(advanced.status, QapStatus::Level4);
        assert_eq!(advanced.current_level, 4);

        // Exactly two new entries: bypass + forward
        assert_eq!(advanced.timeline.len(), before + 2);
        let bypass = &advanced.timeline[before];
        let forward = &advanced.timeline[before + 1];
        assert_eq!(bypass.level, 3);
        assert_eq!(bypass.action, "Auto-bypassed (P2 plant)");
        assert_eq!(forward.level, 4);
        assert_eq!(forward.action, "Sent to Technical Head");

        // Level 3 window never opened
        assert!(!advanced.level_start_times.contains_key(&3));
        assert!(advanced.level_start_times.contains_key(&4));
    }

    #[test]
    fn test_level_4_transition() {
        let record = submitted_record("p4");
        let advanced = process_workflow_transition(&record, NextLevel::Level4, "head", &head_plants());

        assert_eq!(advanced.status, QapStatus::Level4);
        assert_eq!(advanced.current_level, 4);
        assert_eq!(advanced.timeline.last().unwrap().action, "Sent to Technical Head");
    }

    #[test]
    fn test_final_comments_returns_to_level_1() {
        let record = submitted_record("p4");
        let advanced =
            process_workflow_transition(&record, NextLevel::FinalComments, "tech-head", &head_plants());

        assert_eq!(advanced.status, QapStatus::FinalComments);
        assert_eq!(advanced.current_level, 1);
        let last = advanced.timeline.last().unwrap();
        assert_eq!(last.level, 1);
        assert_eq!(last.action, "Sent to Requestor for final comments");
    }

    #[test]
    fn test_legacy_final_review_targets() {
        let record = submitted_record("p4");

        let head_final =
            process_workflow_transition(&record, NextLevel::Level3Final, "ravi", &head_plants());
        assert_eq!(head_final.status, QapStatus::Level3Final);
        assert_eq!(head_final.current_level, 3);
        assert_eq!(head_final.timeline.last().unwrap().action, "Sent to Head for final review");

        let tech_final =
            process_workflow_transition(&record, NextLevel::Level4Final, "ravi", &head_plants());
        assert_eq!(tech_final.status, QapStatus::Level4Final);
        assert_eq!(tech_final.current_level, 4);
        assert_eq!(
            tech_final.timeline.last().unwrap().action,
            "Sent to Technical Head for final review"
        );
    }

    #[test]
    fn test_level_5_transition() {
        let record = submitted_record("p4");
        let advanced = process_workflow_transition(&record, NextLevel::Level5, "ravi", &head_plants());

        assert_eq!(advanced.status, QapStatus::Level5);
        assert_eq!(advanced.current_level, 5);
        assert_eq!(
            advanced.timeline.last().unwrap().action,
            "Sent to Plant Head for final approval"
        );
    }

    #[test]
    fn test_transition_is_not_idempotent() {
        let record = submitted_record("p2");
        let once = process_workflow_transition(&record, NextLevel::Level3, "x", &head_plants());
        let twice = process_workflow_transition(&once, NextLevel::Level3, "x", &head_plants());

        // Each call appends its own bypass + forward pair
        assert_eq!(twice.timeline.len(), once.timeline.len() + 2);
        assert_eq!(twice.status, QapStatus::Level4);
    }

    #[test]
    fn test_transition_does_not_mutate_original() {
        let record = submitted_record("p4");
        let snapshot = record.clone();
        let _ = process_workflow_transition(&record, NextLevel::Level5, "x", &head_plants());
        assert_eq!(record, snapshot);
    }

    #[test]
    fn test_record_review_appends_response_and_timeline() {
        let record = submitted_record("p4");
        let comments = BTreeMap::from([(0, "tighten tolerance".to_string())]);
        let reviewed = record_review(&record, 2, Role::Quality, "meena", false, comments.clone());

        let response = reviewed.response(2, "quality").unwrap();
        assert_eq!(response.responded_by, "meena");
        assert!(!response.acknowledged);
        assert_eq!(response.comments, comments);

        let last = reviewed.timeline.last().unwrap();
        assert_eq!(last.level, 2);
        assert_eq!(last.action, "Reviewed by quality");
    }

    #[test]
    fn test_record_review_overwrites_same_role() {
        let record = submitted_record("p4");
        let first = record_review(&record, 2, Role::Quality, "meena", false, BTreeMap::new());
        let second = record_review(&first, 2, Role::Quality, "meena", true, BTreeMap::new());

        assert!(second.response(2, "quality").unwrap().acknowledged);
        assert_eq!(second.level_responses.get(&2).unwrap().len(), 1);
        // Both reviews remain on the timeline
        assert_eq!(second.timeline.len(), first.timeline.len() + 1);
    }

    #[test]
    fn test_finalize_approve() {
        let record = process_workflow_transition(
            &submitted_record("p4"),
            NextLevel::Level5,
            "ravi",
            &head_plants(),
        );
        let approved = finalize(&record, Decision::Approve, "boss", Some("good to go".to_string()));

        assert_eq!(approved.status, QapStatus::Approved);
        assert_eq!(approved.current_level, 5);
        let last = approved.timeline.last().unwrap();
        assert_eq!(last.action, "Approved by Plant Head");
        assert_eq!(last.comments.as_deref(), Some("good to go"));
        assert!(approved.level_end_times.contains_key(&5));
    }

    #[test]
    fn test_finalize_reject() {
        let record = submitted_record("p2");
        let rejected = finalize(&record, Decision::Reject, "boss", None);

        assert_eq!(rejected.status, QapStatus::Rejected);
        assert_eq!(rejected.timeline.last().unwrap().action, "Rejected by Plant Head");
    }

    #[test]
    fn test_reopen_by_owner() {
        let record = submitted_record("p4");
        let approved = finalize(&record, Decision::Approve, "boss", None);

        let result = reopen_for_edit(&approved, "ravi");
        assert!(result.is_success());

        let reopened = result.record().unwrap();
        assert_eq!(reopened.status, QapStatus::Draft);
        assert_eq!(reopened.current_level, 1);
        assert_eq!(reopened.timeline.last().unwrap().action, "Reopened for editing");
        // Audit history survives the reset
        assert!(reopened.timeline.iter().any(|e| e.action == "Approved by Plant Head"));
        assert!(reopened.level_end_times.contains_key(&5));
    }

    #[test]
    fn test_reopen_refused_for_non_owner() {
        let record = submitted_record("p4");
        let result = reopen_for_edit(&record, "intruder");

        assert!(result.is_refused());
        assert!(result.reason().unwrap().contains("only ravi"));
    }

    #[test]
    fn test_reopen_refused_for_draft() {
        let record = make_record("p4");
        let result = reopen_for_edit(&record, "ravi");

        assert!(result.is_refused());
        assert!(result.reason().unwrap().contains("already a draft"));
    }

    #[test]
    fn test_next_level_parsing() {
        assert_eq!("3".parse::<NextLevel>().unwrap(), NextLevel::Level3);
        assert_eq!("4".parse::<NextLevel>().unwrap(), NextLevel::Level4);
        assert_eq!("5".parse::<NextLevel>().unwrap(), NextLevel::Level5);
        assert_eq!("final-comments".parse::<NextLevel>().unwrap(), NextLevel::FinalComments);
        assert_eq!("level-3-final".parse::<NextLevel>().unwrap(), NextLevel::Level3Final);
        assert_eq!("level-4-final".parse::<NextLevel>().unwrap(), NextLevel::Level4Final);
        assert!("2".parse::<NextLevel>().is_err());
    }
}
