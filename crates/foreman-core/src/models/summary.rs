//! Project summary types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Project, ProjectStatus, StepStatus, TaskStatus};

/// Summary information about a project with step and task counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Project ID
    pub id: u64,
    /// Client the project belongs to
    pub client_id: Option<u64>,
    /// Title of the project
    pub title: String,
    /// Detailed multi-line description of the project
    pub description: Option<String>,
    /// Site address
    pub address: Option<String>,
    /// Project status
    pub status: ProjectStatus,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Total number of steps
    pub total_steps: u32,
    /// Number of completed steps
    pub completed_steps: u32,
    /// Total number of tasks across all steps
    pub total_tasks: u32,
    /// Number of done tasks across all steps
    pub done_tasks: u32,
}

impl ProjectSummary {
    /// Fraction of done tasks, or `None` when the project has no tasks.
    pub fn task_progress(&self) -> Option<f64> {
        (self.total_tasks > 0).then(|| f64::from(self.done_tasks) / f64::from(self.total_tasks))
    }
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        let total_steps = project.steps.len() as u32;
        let completed_steps = project
            .steps
            .iter()
            .filter(|step| step.status == StepStatus::Completed)
            .count() as u32;
        let tasks = project.steps.iter().flat_map(|step| step.tasks.iter());
        let (total_tasks, done_tasks) = tasks.fold((0u32, 0u32), |(total, done), task| {
            (total + 1, done + u32::from(task.status == TaskStatus::Done))
        });

        Self {
            id: project.id,
            client_id: project.client_id,
            title: project.title.clone(),
            description: project.description.clone(),
            address: project.address.clone(),
            status: project.status,
            created_at: project.created_at,
            updated_at: project.updated_at,
            total_steps,
            completed_steps,
            total_tasks,
            done_tasks,
        }
    }
}
