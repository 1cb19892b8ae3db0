//! Task operations for the Tracker.

use super::{Cascaded, Tracker};
use crate::{
    display::Tasks,
    error::{Result, TrackerError},
    models::{Task, UpdateTaskRequest},
    params::{require_text, Id, TaskCreate, UpdateTask},
    propagation::Cascade,
};

impl Tracker {
    /// Adds a task in the todo status to a step, recording `actor` as its
    /// creator. The step and project are re-derived.
    pub async fn add_task(&self, params: &TaskCreate) -> Result<Cascaded<Task>> {
        require_text("title", &params.title)?;
        require_text("actor", &params.actor)?;

        let TaskCreate {
            step_id,
            title,
            description,
            actor,
        } = params.clone();

        self.with_cascade(move |db, policy| {
            let task = db.add_task(step_id, &title, description.as_deref(), &actor)?;
            let cascade = Cascade::new(db, policy).on_step_tasks_changed(step_id)?;
            Ok(Cascaded::new(task, cascade))
        })
        .await
    }

    /// Updates task details. A status change cascades to the step and the
    /// project.
    ///
    /// The task write is committed before the cascade runs; if the cascade
    /// fails the error is returned and the task keeps its new status.
    pub async fn update_task(&self, params: &UpdateTask) -> Result<Cascaded<Task>> {
        if let Some(title) = &params.title {
            require_text("title", title)?;
        }
        let request = UpdateTaskRequest::try_from(params.clone())?;
        let id = params.id;

        self.with_cascade(move |db, policy| {
            let status_changed = request.status.is_some();
            db.update_task(id, request)?;

            let cascade = if status_changed {
                Cascade::new(db, policy).on_task_status_changed(id)?
            } else {
                Default::default()
            };

            let task = db.get_task(id)?.ok_or(TrackerError::TaskNotFound { id })?;
            Ok(Cascaded::new(task, cascade))
        })
        .await
    }

    /// Retrieves a single task.
    pub async fn get_task(&self, params: &Id) -> Result<Option<Task>> {
        let id = params.id;
        self.with_database(move |db| db.get_task(id)).await
    }

    /// Retrieves all tasks of a step.
    pub async fn get_tasks(&self, params: &Id) -> Result<Tasks> {
        let step_id = params.id;

        self.with_database(move |db| {
            db.ensure_step_exists(step_id)?;
            db.get_tasks(step_id)
        })
        .await
        .map(Tasks)
    }

    /// Removes a task and re-derives its step and project from the remaining
    /// tasks.
    pub async fn remove_task(&self, params: &Id) -> Result<Cascaded<Task>> {
        let id = params.id;

        self.with_cascade(move |db, policy| {
            let task = db.remove_task(id)?;
            let cascade = Cascade::new(db, policy).on_step_tasks_changed(task.step_id)?;
            Ok(Cascaded::new(task, cascade))
        })
        .await
    }
}
