//! Workflow level and status definitions
//!
//! The review sequence is fixed:
//! requestor (1) → plant review (2) → head (3, p4/p5 only) →
//! technical head (4) → final comments (1) → plant head (5)

use crate::schemas::QapStatus;

/// The numbered review levels, in workflow order.
///
/// IMPORTANT: This is the source of truth for which levels exist. Level 3
/// is visited only by records whose plant routes through head review.
pub const REVIEW_LEVELS: &[u8] = &[1, 2, 3, 4, 5];

/// The primary status a record carries while a level owns it
pub fn status_for_level(level: u8) -> Option<QapStatus> {
    match level {
        1 => Some(QapStatus::Draft),
        2 => Some(QapStatus::Level2),
        3 => Some(QapStatus::Level3),
        4 => Some(QapStatus::Level4),
        5 => Some(QapStatus::Level5),
        _ => None,
    }
}

/// The level that owns a record in the given status
pub fn level_for_status(status: QapStatus) -> u8 {
    match status {
        QapStatus::Draft | QapStatus::FinalComments | QapStatus::EditRequested => 1,
        QapStatus::Submitted | QapStatus::Level2 => 2,
        QapStatus::Level3 | QapStatus::Level3Final => 3,
        QapStatus::Level4 | QapStatus::Level4Final => 4,
        QapStatus::Level5 | QapStatus::Approved | QapStatus::Rejected => 5,
    }
}

/// Whether a status/level pair agrees with the level table
pub fn status_level_agree(status: QapStatus, level: u8) -> bool {
    level_for_status(status) == level
}

/// Whether a record from this plant routes through the level-3 head review
pub fn plant_requires_head_review(plant: &str, head_plants: &[String]) -> bool {
    let plant = plant.trim().to_lowercase();
    head_plants.iter().any(|p| p.trim().to_lowercase() == plant)
}

/// Check if a status is terminal (approved or rejected)
pub fn is_terminal(status: QapStatus) -> bool {
    matches!(status, QapStatus::Approved | QapStatus::Rejected)
}

/// Human-readable name for a review level
pub fn level_name(level: u8) -> &'static str {
    match level {
        1 => "Requestor",
        2 => "Plant Review",
        3 => "Head",
        4 => "Technical Head",
        5 => "Plant Head",
        _ => "Unknown",
    }
}
