//! Step model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{StepStatus, Task};

/// Represents a phase of work within a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    /// Unique identifier for the step
    pub id: u64,

    /// ID of the parent project
    pub project_id: u64,

    /// Brief title of the step
    pub title: String,

    /// Detailed multi-line description of the step
    pub description: Option<String>,

    /// Current status, derived from the tasks unless manually set
    pub status: StepStatus,

    /// Order of the step within the project (0-indexed)
    pub order: u32,

    /// Timestamp when the step was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the step was last updated (UTC)
    pub updated_at: Timestamp,

    /// Associated tasks, loaded on demand
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tasks: Vec<Task>,
}
