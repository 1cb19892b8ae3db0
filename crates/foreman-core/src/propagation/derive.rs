//! Pure derivation rules: task statuses → step status → project status.
//!
//! Both rule sets are evaluated top to bottom and the first match wins. They
//! only depend on which statuses are present, never on their order or
//! multiplicity, so any permutation of the input yields the same result.

use crate::models::{ProjectStatus, StepStatus, TaskStatus};

/// Derive a step status from the statuses of its tasks.
///
/// 1. every task done → completed
/// 2. any task blocked → blocked
/// 3. any task suspended → suspended
/// 4. any task in progress or in review → in progress
/// 5. every task todo → pending
/// 6. anything else (e.g. todo mixed with done) → pending
///
/// The input must not be empty; use [`step_status_from_tasks`] when it may
/// be.
///
/// ```rust
/// use foreman_core::{
///     models::{StepStatus, TaskStatus::*},
///     propagation::derive_step_status,
/// };
///
/// assert_eq!(derive_step_status(&[Todo, Blocked, Done]), StepStatus::Blocked);
/// assert_eq!(derive_step_status(&[Done, Done]), StepStatus::Completed);
/// ```
pub fn derive_step_status(tasks: &[TaskStatus]) -> StepStatus {
    debug_assert!(!tasks.is_empty(), "step derivation needs at least one task");

    let any = |wanted: &[TaskStatus]| tasks.iter().any(|s| wanted.contains(s));

    if tasks.iter().all(|s| *s == TaskStatus::Done) {
        StepStatus::Completed
    } else if any(&[TaskStatus::Blocked]) {
        StepStatus::Blocked
    } else if any(&[TaskStatus::Suspended]) {
        StepStatus::Suspended
    } else if any(&[TaskStatus::InProgress, TaskStatus::Review]) {
        StepStatus::InProgress
    } else {
        // Covers both "every task todo" and the todo/done mix.
        StepStatus::Pending
    }
}

/// Derive a project status from the statuses of its steps.
///
/// 1. every step completed → completed
/// 2. any step blocked or suspended → suspended
/// 3. any step in progress → in progress
/// 4. every step pending → draft
/// 5. anything else → draft
///
/// Never yields [`ProjectStatus::Cancelled`]. The input must not be empty;
/// use [`project_status_from_steps`] when it may be.
///
/// ```rust
/// use foreman_core::{
///     models::{ProjectStatus, StepStatus::*},
///     propagation::derive_project_status,
/// };
///
/// assert_eq!(derive_project_status(&[Blocked, Completed]), ProjectStatus::Suspended);
/// assert_eq!(derive_project_status(&[Pending, InProgress]), ProjectStatus::InProgress);
/// ```
pub fn derive_project_status(steps: &[StepStatus]) -> ProjectStatus {
    debug_assert!(!steps.is_empty(), "project derivation needs at least one step");

    let any = |wanted: &[StepStatus]| steps.iter().any(|s| wanted.contains(s));

    if steps.iter().all(|s| *s == StepStatus::Completed) {
        ProjectStatus::Completed
    } else if any(&[StepStatus::Blocked, StepStatus::Suspended]) {
        ProjectStatus::Suspended
    } else if any(&[StepStatus::InProgress]) {
        ProjectStatus::InProgress
    } else {
        ProjectStatus::Draft
    }
}

/// Derive a step status, or `None` when the step has no tasks.
pub fn step_status_from_tasks(tasks: &[TaskStatus]) -> Option<StepStatus> {
    (!tasks.is_empty()).then(|| derive_step_status(tasks))
}

/// Derive a project status, or `None` when the project has no steps.
pub fn project_status_from_steps(steps: &[StepStatus]) -> Option<ProjectStatus> {
    (!steps.is_empty()).then(|| derive_project_status(steps))
}
