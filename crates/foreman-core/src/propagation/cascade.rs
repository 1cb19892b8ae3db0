//! Two-level status cascade: task → step → project.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{
    derive::{project_status_from_steps, step_status_from_tasks},
    policy::ManualStatusPolicy,
    repository::StatusRepository,
};
use crate::{
    error::Result,
    models::{ProjectStatus, StepStatus},
};

/// A status write performed by a cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange<S> {
    /// ID of the step or project that changed
    pub id: u64,
    pub from: S,
    pub to: S,
}

/// Every write a cascade performed, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeOutcome {
    /// Step writes. At most one, except for a full project refresh.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StatusChange<StepStatus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<StatusChange<ProjectStatus>>,
}

impl CascadeOutcome {
    /// Number of status writes.
    pub fn writes(&self) -> usize {
        self.steps.len() + usize::from(self.project.is_some())
    }

    pub fn is_noop(&self) -> bool {
        self.writes() == 0
    }

    /// The step write of a single-step cascade.
    pub fn step(&self) -> Option<&StatusChange<StepStatus>> {
        self.steps.first()
    }
}

/// Re-derives parent statuses after a child changed.
///
/// Each call reads the sibling set fresh from the repository and only writes
/// when the derived status differs from the stored one, so running the same
/// cascade twice writes nothing the second time. Writes are not grouped in a
/// transaction: if the project write fails, the step write stays.
pub struct Cascade<'a, R: ?Sized> {
    repo: &'a mut R,
    policy: ManualStatusPolicy,
}

impl<'a, R> Cascade<'a, R>
where
    R: StatusRepository + ?Sized,
{
    pub fn new(repo: &'a mut R, policy: ManualStatusPolicy) -> Self {
        Self { repo, policy }
    }

    /// Run after a task's status was persisted.
    pub fn on_task_status_changed(&mut self, task_id: u64) -> Result<CascadeOutcome> {
        let step_id = self.repo.task_step_id(task_id)?;
        self.on_step_tasks_changed(step_id)
    }

    /// Run after the task set of a step changed (create, delete, status
    /// update). The project is re-derived even when the step did not change.
    pub fn on_step_tasks_changed(&mut self, step_id: u64) -> Result<CascadeOutcome> {
        let step = self.rederive_step(step_id)?;
        let project_id = self.repo.step_project_id(step_id)?;
        let project = self.rederive_project(project_id, false)?;

        Ok(CascadeOutcome {
            steps: step.into_iter().collect(),
            project,
        })
    }

    /// Run after a step's own status was set manually, or the step was
    /// created. Only the project level is re-derived.
    pub fn on_step_status_changed(&mut self, step_id: u64) -> Result<CascadeOutcome> {
        let project_id = self.repo.step_project_id(step_id)?;
        self.on_project_steps_changed(project_id)
    }

    /// Run after the step set of a project changed, e.g. a step was removed.
    pub fn on_project_steps_changed(&mut self, project_id: u64) -> Result<CascadeOutcome> {
        Ok(CascadeOutcome {
            steps: Vec::new(),
            project: self.rederive_project(project_id, false)?,
        })
    }

    /// Explicit re-trigger: re-derive every step of the project from its
    /// tasks, then the project itself, ignoring the manual status policy.
    pub fn refresh_project(&mut self, project_id: u64) -> Result<CascadeOutcome> {
        let mut steps = Vec::new();
        for entry in self.repo.step_statuses(project_id)? {
            if let Some(change) = self.rederive_step(entry.id)? {
                steps.push(change);
            }
        }
        let project = self.rederive_project(project_id, true)?;

        Ok(CascadeOutcome { steps, project })
    }

    fn rederive_step(&mut self, step_id: u64) -> Result<Option<StatusChange<StepStatus>>> {
        let tasks: Vec<_> = self
            .repo
            .task_statuses(step_id)?
            .into_iter()
            .map(|entry| entry.status)
            .collect();

        let Some(derived) = step_status_from_tasks(&tasks) else {
            debug!("Step {step_id} has no tasks, keeping its status");
            return Ok(None);
        };

        let current = self.repo.step_status(step_id)?;
        if current == derived {
            debug!("Step {step_id} already {current}");
            return Ok(None);
        }

        self.repo.set_step_status(step_id, derived)?;
        info!("Step {step_id} status {current} -> {derived}");

        Ok(Some(StatusChange {
            id: step_id,
            from: current,
            to: derived,
        }))
    }

    fn rederive_project(
        &mut self,
        project_id: u64,
        force: bool,
    ) -> Result<Option<StatusChange<ProjectStatus>>> {
        let steps: Vec<_> = self
            .repo
            .step_statuses(project_id)?
            .into_iter()
            .map(|entry| entry.status)
            .collect();

        let Some(derived) = project_status_from_steps(&steps) else {
            debug!("Project {project_id} has no steps, keeping its status");
            return Ok(None);
        };

        let current = self.repo.project_status(project_id)?;
        if !force && !self.policy.allows_overwrite(current) {
            debug!(
                "Project {project_id} is {current}, kept under the {} policy",
                self.policy
            );
            return Ok(None);
        }
        if current == derived {
            debug!("Project {project_id} already {current}");
            return Ok(None);
        }

        self.repo.set_project_status(project_id, derived)?;
        info!("Project {project_id} status {current} -> {derived}");

        Ok(Some(StatusChange {
            id: project_id,
            from: current,
            to: derived,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::{
        error::TrackerError,
        models::TaskStatus,
        propagation::StatusEntry,
    };

    /// In-memory repository that counts writes and can fail project writes.
    #[derive(Default)]
    struct MemoryRepo {
        projects: BTreeMap<u64, ProjectStatus>,
        steps: BTreeMap<u64, (u64, StepStatus)>,
        tasks: BTreeMap<u64, (u64, TaskStatus)>,
        writes: usize,
        fail_project_writes: bool,
    }

    impl MemoryRepo {
        fn project(mut self, id: u64, status: ProjectStatus) -> Self {
            self.projects.insert(id, status);
            self
        }

        fn step(mut self, id: u64, project_id: u64, status: StepStatus) -> Self {
            self.steps.insert(id, (project_id, status));
            self
        }

        fn task(mut self, id: u64, step_id: u64, status: TaskStatus) -> Self {
            self.tasks.insert(id, (step_id, status));
            self
        }

        fn set_task(&mut self, id: u64, status: TaskStatus) {
            self.tasks.get_mut(&id).expect("task exists").1 = status;
        }
    }

    impl StatusRepository for MemoryRepo {
        fn task_step_id(&self, task_id: u64) -> Result<u64> {
            self.tasks
                .get(&task_id)
                .map(|(step_id, _)| *step_id)
                .ok_or(TrackerError::TaskNotFound { id: task_id })
        }

        fn step_project_id(&self, step_id: u64) -> Result<u64> {
            self.steps
                .get(&step_id)
                .map(|(project_id, _)| *project_id)
                .ok_or(TrackerError::StepNotFound { id: step_id })
        }

        fn task_statuses(&self, step_id: u64) -> Result<Vec<StatusEntry<TaskStatus>>> {
            Ok(self
                .tasks
                .iter()
                .filter(|(_, (owner, _))| *owner == step_id)
                .map(|(id, (_, status))| StatusEntry::new(*id, *status))
                .collect())
        }

        fn step_statuses(&self, project_id: u64) -> Result<Vec<StatusEntry<StepStatus>>> {
            Ok(self
                .steps
                .iter()
                .filter(|(_, (owner, _))| *owner == project_id)
                .map(|(id, (_, status))| StatusEntry::new(*id, *status))
                .collect())
        }

        fn step_status(&self, step_id: u64) -> Result<StepStatus> {
            self.steps
                .get(&step_id)
                .map(|(_, status)| *status)
                .ok_or(TrackerError::StepNotFound { id: step_id })
        }

        fn project_status(&self, project_id: u64) -> Result<ProjectStatus> {
            self.projects
                .get(&project_id)
                .copied()
                .ok_or(TrackerError::ProjectNotFound { id: project_id })
        }

        fn set_step_status(&mut self, step_id: u64, status: StepStatus) -> Result<()> {
            let entry = self
                .steps
                .get_mut(&step_id)
                .ok_or(TrackerError::StepNotFound { id: step_id })?;
            entry.1 = status;
            self.writes += 1;
            Ok(())
        }

        fn set_project_status(&mut self, project_id: u64, status: ProjectStatus) -> Result<()> {
            if self.fail_project_writes {
                return Err(TrackerError::database("Failed to update project status")
                    .with_source(rusqlite::Error::InvalidQuery));
            }
            let entry = self
                .projects
                .get_mut(&project_id)
                .ok_or(TrackerError::ProjectNotFound { id: project_id })?;
            *entry = status;
            self.writes += 1;
            Ok(())
        }
    }

    fn cascade(repo: &mut MemoryRepo) -> Cascade<'_, MemoryRepo> {
        Cascade::new(repo, ManualStatusPolicy::PreserveTerminal)
    }

    #[test]
    fn test_task_done_completes_step_and_project() {
        let mut repo = MemoryRepo::default()
            .project(1, ProjectStatus::InProgress)
            .step(10, 1, StepStatus::InProgress)
            .step(11, 1, StepStatus::Completed)
            .task(100, 10, TaskStatus::Done)
            .task(101, 10, TaskStatus::Done)
            .task(102, 10, TaskStatus::Done);

        let outcome = cascade(&mut repo).on_task_status_changed(102).unwrap();

        assert_eq!(
            outcome.step(),
            Some(&StatusChange {
                id: 10,
                from: StepStatus::InProgress,
                to: StepStatus::Completed
            })
        );
        assert_eq!(
            outcome.project,
            Some(StatusChange {
                id: 1,
                from: ProjectStatus::InProgress,
                to: ProjectStatus::Completed
            })
        );
        assert_eq!(outcome.writes(), 2);
        assert_eq!(repo.writes, 2);
    }

    #[test]
    fn test_second_run_is_a_noop() {
        let mut repo = MemoryRepo::default()
            .project(1, ProjectStatus::Draft)
            .step(10, 1, StepStatus::Pending)
            .task(100, 10, TaskStatus::Blocked)
            .task(101, 10, TaskStatus::Todo);

        let first = cascade(&mut repo).on_task_status_changed(100).unwrap();
        assert_eq!(first.writes(), 2);

        let second = cascade(&mut repo).on_task_status_changed(100).unwrap();
        assert!(second.is_noop());
        assert_eq!(repo.writes, 2);
        assert_eq!(repo.steps[&10].1, StepStatus::Blocked);
        assert_eq!(repo.projects[&1], ProjectStatus::Suspended);
    }

    #[test]
    fn test_project_rederived_even_when_step_unchanged() {
        // The step already holds its derived value but the project is stale.
        let mut repo = MemoryRepo::default()
            .project(1, ProjectStatus::Draft)
            .step(10, 1, StepStatus::InProgress)
            .task(100, 10, TaskStatus::Review);

        let outcome = cascade(&mut repo).on_task_status_changed(100).unwrap();

        assert!(outcome.steps.is_empty());
        assert_eq!(outcome.project.map(|c| c.to), Some(ProjectStatus::InProgress));
    }

    #[test]
    fn test_step_without_tasks_keeps_status() {
        let mut repo = MemoryRepo::default()
            .project(1, ProjectStatus::Draft)
            .step(10, 1, StepStatus::Blocked);

        let outcome = cascade(&mut repo).on_step_tasks_changed(10).unwrap();

        assert!(outcome.steps.is_empty());
        assert_eq!(repo.steps[&10].1, StepStatus::Blocked);
        // The project still follows the (manual) step status.
        assert_eq!(repo.projects[&1], ProjectStatus::Suspended);
    }

    #[test]
    fn test_project_without_steps_keeps_status() {
        let mut repo = MemoryRepo::default().project(1, ProjectStatus::InProgress);

        let outcome = cascade(&mut repo).on_project_steps_changed(1).unwrap();

        assert!(outcome.is_noop());
        assert_eq!(repo.projects[&1], ProjectStatus::InProgress);
    }

    #[test]
    fn test_manual_step_status_feeds_project() {
        let mut repo = MemoryRepo::default()
            .project(1, ProjectStatus::InProgress)
            .step(10, 1, StepStatus::Blocked)
            .step(11, 1, StepStatus::Completed)
            .task(100, 10, TaskStatus::Done);

        let outcome = cascade(&mut repo).on_step_status_changed(10).unwrap();

        // Only the project level runs; the manual step value is not re-derived.
        assert!(outcome.steps.is_empty());
        assert_eq!(repo.steps[&10].1, StepStatus::Blocked);
        assert_eq!(repo.projects[&1], ProjectStatus::Suspended);
    }

    #[test]
    fn test_manual_step_status_overwritten_by_next_task_change() {
        let mut repo = MemoryRepo::default()
            .project(1, ProjectStatus::Suspended)
            .step(10, 1, StepStatus::Blocked)
            .task(100, 10, TaskStatus::InProgress);

        let outcome = cascade(&mut repo).on_task_status_changed(100).unwrap();

        assert_eq!(outcome.step().map(|c| c.to), Some(StepStatus::InProgress));
        assert_eq!(repo.projects[&1], ProjectStatus::InProgress);
    }

    #[test]
    fn test_cancelled_project_preserved_by_default() {
        let mut repo = MemoryRepo::default()
            .project(1, ProjectStatus::Cancelled)
            .step(10, 1, StepStatus::Pending)
            .task(100, 10, TaskStatus::Done);

        let outcome = cascade(&mut repo).on_task_status_changed(100).unwrap();

        assert_eq!(outcome.step().map(|c| c.to), Some(StepStatus::Completed));
        assert_eq!(outcome.project, None);
        assert_eq!(repo.projects[&1], ProjectStatus::Cancelled);
    }

    #[test]
    fn test_cancelled_project_overwritten_when_always_deriving() {
        let mut repo = MemoryRepo::default()
            .project(1, ProjectStatus::Cancelled)
            .step(10, 1, StepStatus::Pending)
            .task(100, 10, TaskStatus::Done);

        let outcome = Cascade::new(&mut repo, ManualStatusPolicy::AlwaysDerive)
            .on_task_status_changed(100)
            .unwrap();

        assert_eq!(outcome.project.map(|c| c.to), Some(ProjectStatus::Completed));
        assert_eq!(repo.projects[&1], ProjectStatus::Completed);
    }

    #[test]
    fn test_refresh_rederives_everything_and_ignores_policy() {
        let mut repo = MemoryRepo::default()
            .project(1, ProjectStatus::Cancelled)
            .step(10, 1, StepStatus::Blocked)
            .step(11, 1, StepStatus::Pending)
            .step(12, 1, StepStatus::Suspended)
            .task(100, 10, TaskStatus::Done)
            .task(101, 11, TaskStatus::Done);

        let outcome = cascade(&mut repo).refresh_project(1).unwrap();

        // Step 12 has no tasks and keeps its manual value.
        assert_eq!(
            outcome.steps.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![10, 11]
        );
        assert_eq!(outcome.project.map(|c| c.to), Some(ProjectStatus::Suspended));
        assert_eq!(repo.writes, 3);
    }

    #[test]
    fn test_sibling_changes_are_read_fresh() {
        let mut repo = MemoryRepo::default()
            .project(1, ProjectStatus::Draft)
            .step(10, 1, StepStatus::Pending)
            .task(100, 10, TaskStatus::Todo)
            .task(101, 10, TaskStatus::Todo);

        cascade(&mut repo).on_task_status_changed(100).unwrap();
        repo.set_task(101, TaskStatus::Suspended);
        let outcome = cascade(&mut repo).on_task_status_changed(100).unwrap();

        assert_eq!(outcome.step().map(|c| c.to), Some(StepStatus::Suspended));
        assert_eq!(repo.projects[&1], ProjectStatus::Suspended);
    }

    #[test]
    fn test_project_write_failure_keeps_step_write() {
        let mut repo = MemoryRepo::default()
            .project(1, ProjectStatus::Draft)
            .step(10, 1, StepStatus::Pending)
            .task(100, 10, TaskStatus::InProgress);
        repo.fail_project_writes = true;

        let error = cascade(&mut repo).on_task_status_changed(100).unwrap_err();

        assert!(matches!(error, TrackerError::Database { .. }));
        assert_eq!(repo.steps[&10].1, StepStatus::InProgress);
        assert_eq!(repo.projects[&1], ProjectStatus::Draft);
    }

    #[test]
    fn test_unknown_task_is_reported() {
        let mut repo = MemoryRepo::default();
        let error = cascade(&mut repo).on_task_status_changed(7).unwrap_err();
        assert!(matches!(error, TrackerError::TaskNotFound { id: 7 }));
    }
}
