//! Config schema - Store configuration for qapflow

use serde::{Deserialize, Serialize};

/// Main configuration for a qapflow store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Plants whose records route through the level-3 head review.
    /// Records from any other plant bypass level 3 entirely.
    #[serde(default = "default_head_review_plants")]
    pub head_review_plants: Vec<String>,

    /// Days a level has to respond before a record is labeled overdue.
    /// Display-only; an overdue record is never auto-advanced.
    #[serde(default = "default_review_deadline_days")]
    pub review_deadline_days: u32,

    /// Prefix for generated record ids (e.g. "QAP-")
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_head_review_plants() -> Vec<String> {
    vec!["p4".to_string(), "p5".to_string()]
}

fn default_review_deadline_days() -> u32 {
    4
}

fn default_id_prefix() -> String {
    "QAP-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: 1,
            head_review_plants: default_head_review_plants(),
            review_deadline_days: 4,
            id_prefix: "QAP-".to_string(),
        }
    }
}
