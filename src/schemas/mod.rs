//! Schema types for qapflow
//!
//! All types serialize to JSON compatible with the original tool's records.

mod config;
mod qap;
mod user;

pub use config::Config;
pub use qap::{
    normalize_roles, MatchVerdict, QapRecord, QapStatus, RoleResponse, SpecRow, SpecSheet,
    TimelineEntry,
};
pub use user::{Role, User, UserRegistry};
