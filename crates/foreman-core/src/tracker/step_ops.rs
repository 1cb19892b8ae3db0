//! Step operations for the Tracker.

use log::info;

use super::{Cascaded, Tracker};
use crate::{
    display::Steps,
    error::{Result, TrackerError},
    models::{Step, UpdateStepRequest},
    params::{require_text, Id, InsertStep, StepCreate, SwapSteps, UpdateStep},
    propagation::Cascade,
};

impl Tracker {
    /// Appends a new pending step to a project.
    ///
    /// The project status is re-derived since the step set changed.
    pub async fn add_step(&self, params: &StepCreate) -> Result<Cascaded<Step>> {
        require_text("title", &params.title)?;

        let StepCreate {
            project_id,
            title,
            description,
        } = params.clone();

        self.with_cascade(move |db, policy| {
            let step = db.add_step(project_id, &title, description.as_deref())?;
            let cascade = Cascade::new(db, policy).on_step_status_changed(step.id)?;
            Ok(Cascaded::new(step, cascade))
        })
        .await
    }

    /// Inserts a new step at a specific position in the project's step
    /// order.
    pub async fn insert_step(&self, params: &InsertStep) -> Result<Cascaded<Step>> {
        require_text("title", &params.step.title)?;

        let InsertStep { step, position } = params.clone();
        let StepCreate {
            project_id,
            title,
            description,
        } = step;

        self.with_cascade(move |db, policy| {
            let step = db.insert_step(project_id, position, &title, description.as_deref())?;
            let cascade = Cascade::new(db, policy).on_step_status_changed(step.id)?;
            Ok(Cascaded::new(step, cascade))
        })
        .await
    }

    /// Updates step details.
    ///
    /// A status is a manual override. The project is re-derived from it
    /// right away; the step keeps it until one of its tasks changes.
    pub async fn update_step(&self, params: &UpdateStep) -> Result<Cascaded<Step>> {
        if let Some(title) = &params.title {
            require_text("title", title)?;
        }
        let request = UpdateStepRequest::try_from(params.clone())?;
        let id = params.id;

        self.with_cascade(move |db, policy| {
            let manual_status = request.status;
            db.update_step(id, request)?;

            let cascade = match manual_status {
                Some(status) => {
                    info!("Step {id} status set manually to {status}");
                    Cascade::new(db, policy).on_step_status_changed(id)?
                }
                None => Default::default(),
            };

            let step = db.get_step(id)?.ok_or(TrackerError::StepNotFound { id })?;
            Ok(Cascaded::new(step, cascade))
        })
        .await
    }

    /// Retrieves all steps of a project in order.
    pub async fn get_steps(&self, params: &Id) -> Result<Steps> {
        let project_id = params.id;

        self.with_database(move |db| {
            db.ensure_project_exists(project_id)?;
            db.get_steps(project_id)
        })
        .await
        .map(Steps)
    }

    /// Retrieves a single step with its tasks.
    pub async fn get_step(&self, params: &Id) -> Result<Option<Step>> {
        let id = params.id;
        self.with_database(move |db| db.get_step(id)).await
    }

    /// Swaps the order of two steps of the same project. Order does not
    /// feed any status, so no cascade runs.
    pub async fn swap_steps(&self, params: &SwapSteps) -> Result<()> {
        let SwapSteps { step1_id, step2_id } = params.clone();
        self.with_database(move |db| db.swap_steps(step1_id, step2_id))
            .await
    }

    /// Removes a step with its tasks and re-derives the project from the
    /// remaining steps.
    pub async fn remove_step(&self, params: &Id) -> Result<Cascaded<Step>> {
        let id = params.id;

        self.with_cascade(move |db, policy| {
            let step = db.remove_step(id)?;
            let cascade = Cascade::new(db, policy).on_project_steps_changed(step.project_id)?;
            Ok(Cascaded::new(step, cascade))
        })
        .await
    }
}
