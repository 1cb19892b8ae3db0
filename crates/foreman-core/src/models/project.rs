//! Project model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ProjectStatus, Step};

/// Represents a construction project with its ordered steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    /// Unique identifier for the project
    pub id: u64,

    /// Client the project is delivered for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u64>,

    /// Title of the project
    pub title: String,

    /// Detailed multi-line description of the project
    pub description: Option<String>,

    /// Site address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Current status, derived from the steps unless manually set
    #[serde(default)]
    pub status: ProjectStatus,

    /// Timestamp when the project was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the project was last modified (UTC)
    pub updated_at: Timestamp,

    /// Associated steps, loaded on demand
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub steps: Vec<Step>,
}
