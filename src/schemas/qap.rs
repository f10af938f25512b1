//! QAP record schema - The central workflow entity
//!
//! Wire names match the JSON produced by the original tool, including the
//! legacy status variants that older records may still carry.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Workflow status for a QAP record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QapStatus {
    /// Requestor is still editing
    #[serde(rename = "draft")]
    Draft,
    /// Legacy alias for a freshly submitted record
    #[serde(rename = "submitted")]
    Submitted,
    /// Under production/quality/technical review
    #[serde(rename = "level-2")]
    Level2,
    /// Under departmental head review (p4/p5 plants only)
    #[serde(rename = "level-3")]
    Level3,
    /// Under technical head review
    #[serde(rename = "level-4")]
    Level4,
    /// Back with the requestor for final comments
    #[serde(rename = "final-comments")]
    FinalComments,
    /// Awaiting plant head approval
    #[serde(rename = "level-5")]
    Level5,
    /// Terminal: approved by plant head
    #[serde(rename = "approved")]
    Approved,
    /// Terminal: rejected by plant head
    #[serde(rename = "rejected")]
    Rejected,
    /// Legacy: head final review pass
    #[serde(rename = "level-3-final")]
    Level3Final,
    /// Legacy: technical head final review pass
    #[serde(rename = "level-4-final")]
    Level4Final,
    /// Legacy: requestor asked to edit a submitted record
    #[serde(rename = "edit-requested")]
    EditRequested,
}

impl std::fmt::Display for QapStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            QapStatus::Draft => "draft",
            QapStatus::Submitted => "submitted",
            QapStatus::Level2 => "level-2",
            QapStatus::Level3 => "level-3",
            QapStatus::Level4 => "level-4",
            QapStatus::FinalComments => "final-comments",
            QapStatus::Level5 => "level-5",
            QapStatus::Approved => "approved",
            QapStatus::Rejected => "rejected",
            QapStatus::Level3Final => "level-3-final",
            QapStatus::Level4Final => "level-4-final",
            QapStatus::EditRequested => "edit-requested",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for QapStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(QapStatus::Draft),
            "submitted" => Ok(QapStatus::Submitted),
            "level-2" => Ok(QapStatus::Level2),
            "level-3" => Ok(QapStatus::Level3),
            "level-4" => Ok(QapStatus::Level4),
            "final-comments" => Ok(QapStatus::FinalComments),
            "level-5" => Ok(QapStatus::Level5),
            "approved" => Ok(QapStatus::Approved),
            "rejected" => Ok(QapStatus::Rejected),
            "level-3-final" => Ok(QapStatus::Level3Final),
            "level-4-final" => Ok(QapStatus::Level4Final),
            "edit-requested" => Ok(QapStatus::EditRequested),
            _ => Err(format!("Unknown QAP status: {}", s)),
        }
    }
}

/// Whether a manufacturer spec row matches the customer requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchVerdict {
    Yes,
    No,
}

/// One entry in a record's audit trail.
///
/// The timeline is append-only; entries are never edited or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Review level the entry is tagged with
    pub level: u8,

    /// What happened (e.g. "Sent to Technical Head")
    pub action: String,

    /// Username of the actor
    pub user: String,

    /// When it happened
    pub timestamp: DateTime<Utc>,

    /// Optional free-text comment attached to the action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// A single role's response at a review level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleResponse {
    /// Username of the responder
    pub responded_by: String,

    /// Whether the role acknowledged the record as-is
    pub acknowledged: bool,

    /// Per-spec-row comments, keyed by row index
    #[serde(default)]
    pub comments: BTreeMap<usize, String>,

    /// When the response was recorded
    pub responded_at: DateTime<Utc>,
}

/// One specification comparison row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecRow {
    /// What is being specified (e.g. "Cell efficiency")
    pub description: String,

    /// Measurement unit, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// The manufacturer's standard specification
    pub standard_spec: String,

    /// Customer override, when the customer asked for something else
    #[serde(default)]
    pub customer_spec: Option<String>,

    /// Whether the standard spec satisfies the customer requirement
    pub verdict: MatchVerdict,

    /// Roles assigned to review this row.
    ///
    /// Older records stored this as a single comma-joined string; it is
    /// normalized to an ordered, deduplicated list of lowercase role names
    /// at the deserialization boundary.
    #[serde(default, deserialize_with = "deserialize_review_by")]
    pub review_by: Vec<String>,
}

/// The two specification categories a QAP is split into
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpecSheet {
    /// Measurement / quality-process checks
    #[serde(default)]
    pub mqp: Vec<SpecRow>,

    /// Visual and electroluminescence defect checks
    #[serde(default)]
    pub visual: Vec<SpecRow>,
}

/// A Quality Assurance Plan moving through the review workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QapRecord {
    /// Schema version for forward compatibility
    pub schema_version: u32,

    /// Unique identifier for the record
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// Customer the plan is prepared for
    pub customer: String,

    /// Manufacturing site code (lowercase, e.g. "p2", "p4")
    pub plant: String,

    /// Current workflow status
    pub status: QapStatus,

    /// Review level that currently owns the record (1-5)
    pub current_level: u8,

    /// Username of the requestor who submitted the record
    #[serde(default)]
    pub submitted_by: Option<String>,

    /// When the record was submitted for review
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub last_modified_at: DateTime<Utc>,

    /// Responses per level, per role. Append-only; never deleted.
    #[serde(default)]
    pub level_responses: BTreeMap<u8, BTreeMap<String, RoleResponse>>,

    /// Append-only audit trail
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,

    /// Specification comparison rows
    #[serde(default)]
    pub specs: SpecSheet,

    /// When each level started owning the record (turnaround analytics)
    #[serde(default)]
    pub level_start_times: BTreeMap<u8, DateTime<Utc>>,

    /// When each level stopped owning the record (turnaround analytics)
    #[serde(default)]
    pub level_end_times: BTreeMap<u8, DateTime<Utc>>,
}

impl QapRecord {
    /// Create a new draft record owned by level 1
    pub fn new(id: String, title: String, customer: String, plant: &str) -> Self {
        let now = Utc::now();
        QapRecord {
            schema_version: 1,
            id,
            title,
            customer,
            plant: plant.trim().to_lowercase(),
            status: QapStatus::Draft,
            current_level: 1,
            submitted_by: None,
            submitted_at: None,
            created_at: now,
            last_modified_at: now,
            level_responses: BTreeMap::new(),
            timeline: Vec::new(),
            specs: SpecSheet::default(),
            level_start_times: BTreeMap::new(),
            level_end_times: BTreeMap::new(),
        }
    }

    /// Return a new record with the given status and level, updating the timestamp
    pub fn with_state(mut self, status: QapStatus, level: u8) -> Self {
        self.status = status;
        self.current_level = level;
        self.touch_returning()
    }

    /// Return a new record with the entry appended to the timeline
    pub fn with_timeline_entry(mut self, entry: TimelineEntry) -> Self {
        self.timeline.push(entry);
        self.touch_returning()
    }

    /// Return a new record with the given specs, updating the timestamp
    pub fn with_specs(mut self, specs: SpecSheet) -> Self {
        self.specs = specs;
        self.touch_returning()
    }

    /// Return a new record with a role response recorded at the given level
    pub fn with_response(mut self, level: u8, role: String, response: RoleResponse) -> Self {
        self.level_responses.entry(level).or_default().insert(role, response);
        self.touch_returning()
    }

    /// Return a new record with a level start time stamped
    pub fn with_level_start(mut self, level: u8, at: DateTime<Utc>) -> Self {
        self.level_start_times.insert(level, at);
        self
    }

    /// Return a new record with a level end time stamped
    pub fn with_level_end(mut self, level: u8, at: DateTime<Utc>) -> Self {
        self.level_end_times.insert(level, at);
        self
    }

    /// Response recorded for a role at a level, if any
    pub fn response(&self, level: u8, role: &str) -> Option<&RoleResponse> {
        self.level_responses.get(&level).and_then(|m| m.get(role))
    }

    /// Update the last_modified_at timestamp to now and return self
    fn touch_returning(mut self) -> Self {
        self.last_modified_at = Utc::now();
        self
    }
}

/// Normalize a reviewer role list: trim, lowercase, drop empties,
/// deduplicate while preserving first-seen order.
pub fn normalize_roles<I, S>(roles: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for role in roles {
        let role = role.as_ref().trim().to_lowercase();
        if role.is_empty() || out.contains(&role) {
            continue;
        }
        out.push(role);
    }
    out
}

fn deserialize_review_by<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<String>),
    }

    let raw = Raw::deserialize(deserializer)?;
    let items: Vec<String> = match raw {
        Raw::One(s) => s.split(',').map(str::to_string).collect(),
        Raw::Many(v) => v,
    };
    Ok(normalize_roles(items))
}
