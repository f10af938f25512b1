//! User schema - Reviewer identities and roles

use serde::{Deserialize, Serialize};

/// Role a user plays in the review workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Drafts records and gives final comments
    Requestor,
    /// Level-2 production reviewer
    Production,
    /// Level-2 quality reviewer
    Quality,
    /// Level-2 technical reviewer
    Technical,
    /// Level-3 departmental head (p4/p5 plants only)
    Head,
    /// Level-4 technical head
    TechnicalHead,
    /// Level-5 plant head
    PlantHead,
    /// Unrestricted access
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Requestor => "requestor",
            Role::Production => "production",
            Role::Quality => "quality",
            Role::Technical => "technical",
            Role::Head => "head",
            Role::TechnicalHead => "technical-head",
            Role::PlantHead => "plant-head",
            Role::Admin => "admin",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requestor" => Ok(Role::Requestor),
            "production" => Ok(Role::Production),
            "quality" => Ok(Role::Quality),
            "technical" => Ok(Role::Technical),
            "head" => Ok(Role::Head),
            "technical-head" => Ok(Role::TechnicalHead),
            "plant-head" => Ok(Role::PlantHead),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// A registered workflow participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique username
    pub username: String,

    /// Workflow role
    pub role: Role,

    /// Comma-separated plant codes the user belongs to (e.g. "p4, p5").
    /// Empty for plant-independent roles.
    #[serde(default)]
    pub plant: String,
}

impl User {
    /// Create a new user
    pub fn new(username: String, role: Role, plant: String) -> Self {
        User { username, role, plant }
    }

    /// The user's plant list, trimmed and lowercased
    pub fn plants(&self) -> Vec<String> {
        self.plant
            .split(',')
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// Whether the user belongs to the given plant (case-insensitive)
    pub fn has_plant(&self, plant: &str) -> bool {
        let plant = plant.trim().to_lowercase();
        self.plants().iter().any(|p| *p == plant)
    }
}

/// The registered user set, persisted as users.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRegistry {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// All registered users
    #[serde(default)]
    pub users: Vec<User>,
}

fn default_schema_version() -> u32 {
    1
}

impl UserRegistry {
    /// Look up a user by username
    pub fn find(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }
}
