//! Domain logic for the QAP review workflow

pub mod access;
pub mod analytics;
pub mod states;
pub mod transitions;


pub use access::{accessible_qaps, can_user_access_qap, next_level_reviewers, role_reviews_at};
pub use analytics::{
    average_turnaround, is_overdue, total_turnaround_time, turnaround_time, TurnaroundFilter,
    TurnaroundSummary,
};
pub use states::{
    is_terminal, level_for_status, level_name, plant_requires_head_review, status_for_level,
    status_level_agree, REVIEW_LEVELS,
};
pub use transitions::{
    finalize, process_workflow_transition, record_review, reopen_for_edit, submit_for_review,
    Decision, NextLevel, TransitionResult,
};
