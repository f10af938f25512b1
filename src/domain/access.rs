//! Role-based access rules
//!
//! One predicate decides whether a user may act on a record; the list
//! filter applies the same predicate. The original tool let technical-head
//! and plant-head list every record while gating single-record access by
//! level; that looseness is treated here as a bug and not carried over.

use crate::schemas::{QapRecord, QapStatus, Role, User};

use super::states::plant_requires_head_review;

/// Check whether a user may act on a record in its current state.
///
/// - admin: always
/// - requestor: ownership only, regardless of level
/// - production/quality/technical: own plant, level 2 only
/// - head: a p4/p5-class user whose plant list covers the record's plant,
///   at level 3 or during the head final review pass
/// - technical-head: level 4 or the technical final review pass, any plant
/// - plant-head: level 5, any plant
pub fn can_user_access_qap(user: &User, record: &QapRecord, head_plants: &[String]) -> bool {
    match user.role {
        Role::Admin => true,
        Role::Requestor => record.submitted_by.as_deref() == Some(user.username.as_str()),
        Role::Production | Role::Quality | Role::Technical => {
            record.current_level == 2 && user.has_plant(&record.plant)
        }
        Role::Head => {
            let in_head_class = user
                .plants()
                .iter()
                .any(|p| plant_requires_head_review(p, head_plants));
            in_head_class
                && user.has_plant(&record.plant)
                && (record.current_level == 3 || record.status == QapStatus::Level3Final)
        }
        Role::TechnicalHead => {
            record.current_level == 4 || record.status == QapStatus::Level4Final
        }
        Role::PlantHead => record.current_level == 5,
    }
}

/// Filter a record set down to what the user may see.
///
/// Applies the same predicate as [`can_user_access_qap`].
pub fn accessible_qaps<'a>(
    user: &User,
    records: &'a [QapRecord],
    head_plants: &[String],
) -> Vec<&'a QapRecord> {
    records
        .iter()
        .filter(|r| can_user_access_qap(user, r, head_plants))
        .collect()
}

/// The roles that own a review level
pub fn next_level_reviewers(level: u8) -> Vec<Role> {
    match level {
        1 => vec![Role::Requestor],
        2 => vec![Role::Production, Role::Quality, Role::Technical],
        3 => vec![Role::Head],
        4 => vec![Role::TechnicalHead],
        5 => vec![Role::PlantHead],
        _ => vec![],
    }
}

/// Whether a role reviews at the given level
pub fn role_reviews_at(role: Role, level: u8) -> bool {
    next_level_reviewers(level).contains(&role)
}
