//! Storage port consumed by the cascade.

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    models::{ProjectStatus, StepStatus, TaskStatus},
};

/// Identifier and status of one child row, the only shape the cascade reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry<S> {
    pub id: u64,
    pub status: S,
}

impl<S> StatusEntry<S> {
    pub fn new(id: u64, status: S) -> Self {
        Self { id, status }
    }
}

/// Narrow read/write access to the statuses of steps, tasks and projects.
///
/// Reads must hit the backing store every time; the cascade relies on
/// seeing sibling changes made by other requests.
pub trait StatusRepository {
    /// Step owning the task.
    ///
    /// # Errors
    /// `TaskNotFound` when the task does not exist.
    fn task_step_id(&self, task_id: u64) -> Result<u64>;

    /// Project owning the step.
    ///
    /// # Errors
    /// `StepNotFound` when the step does not exist.
    fn step_project_id(&self, step_id: u64) -> Result<u64>;

    /// Statuses of every task of the step.
    fn task_statuses(&self, step_id: u64) -> Result<Vec<StatusEntry<TaskStatus>>>;

    /// Statuses of every step of the project.
    fn step_statuses(&self, project_id: u64) -> Result<Vec<StatusEntry<StepStatus>>>;

    /// Stored status of the step.
    fn step_status(&self, step_id: u64) -> Result<StepStatus>;

    /// Stored status of the project.
    fn project_status(&self, project_id: u64) -> Result<ProjectStatus>;

    /// Persist a new step status.
    fn set_step_status(&mut self, step_id: u64, status: StepStatus) -> Result<()>;

    /// Persist a new project status.
    fn set_project_status(&mut self, project_id: u64, status: ProjectStatus) -> Result<()>;
}
