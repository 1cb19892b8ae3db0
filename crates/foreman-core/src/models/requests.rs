//! Validated request types for updating models.
//!
//! Interface layers hand over loosely typed [`crate::params`] structures with
//! statuses as strings. The `TryFrom` conversions below parse those strings
//! into the closed status enums, so the database layer only ever receives
//! values the derivation rules understand.

use super::{ProjectStatus, StepStatus, TaskStatus};
use crate::{
    error::TrackerError,
    params::{parse_status, UpdateProject, UpdateStep, UpdateTask},
};

/// Partial update of a project.
///
/// Optional text fields are doubly wrapped: `None` keeps the stored value,
/// `Some(None)` clears it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub client_id: Option<u64>,
    pub status: Option<ProjectStatus>,
}

impl UpdateProjectRequest {
    /// Whether the request would change anything.
    pub fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.address.is_some()
            || self.client_id.is_some()
            || self.status.is_some()
    }
}

impl TryFrom<UpdateProject> for UpdateProjectRequest {
    type Error = TrackerError;

    fn try_from(params: UpdateProject) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_status(params.status.as_deref())?,
            title: params.title,
            description: clearable(params.description),
            address: clearable(params.address),
            client_id: params.client_id,
        })
    }
}

/// Partial update of a step. A status here is a manual override.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UpdateStepRequest {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<StepStatus>,
}

impl UpdateStepRequest {
    /// Whether the request would change anything.
    pub fn has_changes(&self) -> bool {
        self.title.is_some() || self.description.is_some() || self.status.is_some()
    }
}

impl TryFrom<UpdateStep> for UpdateStepRequest {
    type Error = TrackerError;

    /// Convert an UpdateStep parameter into a validated UpdateStepRequest.
    ///
    /// ```rust
    /// use foreman_core::{models::{StepStatus, UpdateStepRequest}, params::UpdateStep};
    ///
    /// let params = UpdateStep {
    ///     id: 1,
    ///     status: Some("BLOCKED".to_string()),
    ///     ..Default::default()
    /// };
    /// let request: UpdateStepRequest = params.try_into()?;
    /// assert_eq!(request.status, Some(StepStatus::Blocked));
    /// # Ok::<(), foreman_core::TrackerError>(())
    /// ```
    fn try_from(params: UpdateStep) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_status(params.status.as_deref())?,
            title: params.title,
            description: clearable(params.description),
        })
    }
}

/// Partial update of a task.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
}

impl UpdateTaskRequest {
    /// Whether the request would change anything.
    pub fn has_changes(&self) -> bool {
        self.title.is_some() || self.description.is_some() || self.status.is_some()
    }
}

impl TryFrom<UpdateTask> for UpdateTaskRequest {
    type Error = TrackerError;

    fn try_from(params: UpdateTask) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_status(params.status.as_deref())?,
            title: params.title,
            description: clearable(params.description),
        })
    }
}

/// A blank value clears an optional text field.
fn clearable(value: Option<String>) -> Option<Option<String>> {
    value.map(|text| (!text.trim().is_empty()).then_some(text))
}
