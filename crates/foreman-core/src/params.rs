//! Parameter structures for Foreman operations
//!
//! This module contains shared parameter structures used across the
//! different interfaces (CLI, MCP) without framework-specific derives beyond
//! serde. JSON schema generation is only compiled in with the `schema`
//! feature.
//!
//! ## Parameter Wrapper Pattern
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Interface layers wrap or convert into these types; the tracker only ever
//! accepts core parameters. Statuses travel as strings here and are parsed
//! into the closed enums by the `TryFrom` conversions in
//! [`crate::models::requests`].

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

/// Parse an optional status string into one of the status enums.
///
/// ```rust
/// use foreman_core::{models::TaskStatus, params::parse_status};
///
/// let status: Option<TaskStatus> = parse_status(Some("in_progress"))?;
/// assert_eq!(status, Some(TaskStatus::InProgress));
/// assert!(parse_status::<TaskStatus>(Some("finished")).is_err());
/// # Ok::<(), foreman_core::TrackerError>(())
/// ```
pub fn parse_status<S>(value: Option<&str>) -> Result<Option<S>>
where
    S: FromStr<Err = String>,
{
    value
        .map(S::from_str)
        .transpose()
        .map_err(|reason| TrackerError::invalid_input("status").with_reason(reason))
}

/// Generic parameters for operations requiring just an ID.
///
/// Used for operations like show_project, show_step, show_task, remove_task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateClient {
    /// Display name of the client (required)
    pub name: String,
    /// Optional contact email
    pub email: Option<String>,
    /// Optional contact phone number
    pub phone: Option<String>,
}

/// Parameters for creating a new project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateProject {
    /// Title of the project (required)
    pub title: String,
    /// Optional detailed description of the project
    pub description: Option<String>,
    /// Optional site address
    pub address: Option<String>,
    /// Optional client the project is delivered for
    pub client_id: Option<u64>,
}

/// Parameters for listing projects.
///
/// All filters are optional and combine with AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListProjects {
    /// Only projects in this status ('draft', 'in_progress', 'completed',
    /// 'cancelled' or 'suspended')
    #[serde(default)]
    pub status: Option<String>,
    /// Only projects of this client
    #[serde(default)]
    pub client_id: Option<u64>,
    /// Only projects whose title contains this text
    #[serde(default)]
    pub title: Option<String>,
}

/// Parameters for updating an existing project.
///
/// A status given here is a manual assignment. 'cancelled' can only be
/// reached this way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateProject {
    /// Project ID to update (required)
    pub id: u64,
    /// Updated title
    pub title: Option<String>,
    /// Updated description; blank clears it
    pub description: Option<String>,
    /// Updated site address; blank clears it
    pub address: Option<String>,
    /// Reassign the project to another client
    pub client_id: Option<u64>,
    /// Manually assigned status
    pub status: Option<String>,
}

/// Base parameters for step creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct StepCreate {
    /// ID of the project to add the step to
    pub project_id: u64,
    /// Title of the step (required)
    pub title: String,
    /// Optional detailed description of the step
    pub description: Option<String>,
}

/// Parameters for inserting a step at a specific position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct InsertStep {
    /// Base step creation parameters
    #[serde(flatten)]
    pub step: StepCreate,
    /// Position to insert the step (0-indexed)
    pub position: u32,
}

/// Parameters for swapping the order of two steps of the same project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SwapSteps {
    /// ID of the first step to swap
    pub step1_id: u64,
    /// ID of the second step to swap
    pub step2_id: u64,
}

/// Parameters for updating an existing step.
///
/// A status given here is a manual override. It feeds the project
/// derivation right away and is replaced by the derived value the next time
/// one of the step's tasks changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateStep {
    /// Step ID to update (required)
    pub id: u64,
    /// New status ('pending', 'in_progress', 'completed', 'blocked' or
    /// 'suspended')
    pub status: Option<String>,
    /// Updated title of the step
    pub title: Option<String>,
    /// Updated detailed description of the step; blank clears it
    pub description: Option<String>,
}

/// Parameters for creating a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TaskCreate {
    /// ID of the step to add the task to
    pub step_id: u64,
    /// Title of the task (required)
    pub title: String,
    /// Optional detailed description of the task
    pub description: Option<String>,
    /// Identifier of the person creating the task (required)
    pub actor: String,
}

/// Parameters for updating an existing task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateTask {
    /// Task ID to update (required)
    pub id: u64,
    /// New status ('todo', 'in_progress', 'review', 'done', 'blocked' or
    /// 'suspended')
    pub status: Option<String>,
    /// Updated title of the task
    pub title: Option<String>,
    /// Updated detailed description of the task; blank clears it
    pub description: Option<String>,
}

/// Reject blank required text fields.
pub(crate) fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TrackerError::invalid_input(field).with_reason("must not be empty"));
    }
    Ok(())
}
