//! Status enumerations for projects, steps and tasks.
//!
//! All three enums are closed: a status string that does not name a variant is
//! rejected when parsed, so the derivation rules in [`crate::propagation`]
//! never see an unknown value.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Folds the accepted spellings (`IN_PROGRESS`, `in-progress`, `inprogress`)
/// into one lookup key.
fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-' && *c != ' ')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Status of a task. Set directly by a user action, never derived.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started yet
    #[default]
    Todo,

    /// Being worked on
    InProgress,

    /// Finished and waiting for review
    Review,

    /// Finished
    Done,

    /// Cannot progress until something external is resolved
    Blocked,

    /// Put on hold on purpose
    Suspended,
}

impl TaskStatus {
    /// Every task status, in declaration order.
    pub const ALL: [TaskStatus; 6] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Done,
        TaskStatus::Blocked,
        TaskStatus::Suspended,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Review => "review",
            TaskStatus::Done => "done",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Suspended => "suspended",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// ```rust
    /// use foreman_core::models::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Done.with_icon(), "✓ Done");
    /// assert_eq!(TaskStatus::Blocked.with_icon(), "✗ Blocked");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "○ Todo",
            TaskStatus::InProgress => "➤ In Progress",
            TaskStatus::Review => "◎ Review",
            TaskStatus::Done => "✓ Done",
            TaskStatus::Blocked => "✗ Blocked",
            TaskStatus::Suspended => "‖ Suspended",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "inprogress" => Ok(TaskStatus::InProgress),
            "review" => Ok(TaskStatus::Review),
            "done" => Ok(TaskStatus::Done),
            "blocked" => Ok(TaskStatus::Blocked),
            "suspended" => Ok(TaskStatus::Suspended),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

/// Status of a step, normally derived from its tasks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// No task has started
    #[default]
    Pending,

    /// At least one task is moving
    InProgress,

    /// Every task is done
    Completed,

    /// At least one task is blocked
    Blocked,

    /// At least one task is suspended
    Suspended,
}

impl StepStatus {
    /// Every step status, in declaration order.
    pub const ALL: [StepStatus; 5] = [
        StepStatus::Pending,
        StepStatus::InProgress,
        StepStatus::Completed,
        StepStatus::Blocked,
        StepStatus::Suspended,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Pending => "pending",
            StepStatus::InProgress => "in_progress",
            StepStatus::Completed => "completed",
            StepStatus::Blocked => "blocked",
            StepStatus::Suspended => "suspended",
        }
    }

    /// Get status with consistent icon formatting for display.
    pub fn with_icon(&self) -> &'static str {
        match self {
            StepStatus::Pending => "○ Pending",
            StepStatus::InProgress => "➤ In Progress",
            StepStatus::Completed => "✓ Completed",
            StepStatus::Blocked => "✗ Blocked",
            StepStatus::Suspended => "‖ Suspended",
        }
    }
}

impl FromStr for StepStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "pending" => Ok(StepStatus::Pending),
            "inprogress" => Ok(StepStatus::InProgress),
            "completed" => Ok(StepStatus::Completed),
            "blocked" => Ok(StepStatus::Blocked),
            "suspended" => Ok(StepStatus::Suspended),
            _ => Err(format!("Invalid step status: {s}")),
        }
    }
}

/// Status of a project, normally derived from its steps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Nothing has started yet
    #[default]
    Draft,

    /// Work is under way
    InProgress,

    /// Every step is completed
    Completed,

    /// Abandoned; only reachable by manual assignment
    Cancelled,

    /// A step is blocked or suspended
    Suspended,
}

impl ProjectStatus {
    /// Every project status, in declaration order.
    pub const ALL: [ProjectStatus; 5] = [
        ProjectStatus::Draft,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::Cancelled,
        ProjectStatus::Suspended,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
            ProjectStatus::Suspended => "suspended",
        }
    }

    /// Whether derivation can never produce this status.
    ///
    /// ```rust
    /// use foreman_core::models::ProjectStatus;
    ///
    /// assert!(ProjectStatus::Cancelled.is_terminal());
    /// assert!(!ProjectStatus::Suspended.is_terminal());
    /// ```
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProjectStatus::Cancelled)
    }

    /// Get status with consistent icon formatting for display.
    pub fn with_icon(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "○ Draft",
            ProjectStatus::InProgress => "➤ In Progress",
            ProjectStatus::Completed => "✓ Completed",
            ProjectStatus::Cancelled => "✗ Cancelled",
            ProjectStatus::Suspended => "‖ Suspended",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "draft" => Ok(ProjectStatus::Draft),
            "inprogress" => Ok(ProjectStatus::InProgress),
            "completed" => Ok(ProjectStatus::Completed),
            "cancelled" | "canceled" => Ok(ProjectStatus::Cancelled),
            "suspended" => Ok(ProjectStatus::Suspended),
            _ => Err(format!("Invalid project status: {s}")),
        }
    }
}
