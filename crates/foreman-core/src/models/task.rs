//! Task model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::TaskStatus;

/// Represents a unit of work within a step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task
    pub id: u64,

    /// ID of the parent step
    pub step_id: u64,

    /// Brief title of the task
    pub title: String,

    /// Detailed multi-line description of the task
    pub description: Option<String>,

    /// Current status of the task
    pub status: TaskStatus,

    /// Actor who created the task
    pub created_by: String,

    /// Timestamp when the task was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the task was last updated (UTC)
    pub updated_at: Timestamp,
}
