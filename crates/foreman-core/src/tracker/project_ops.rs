//! Project operations for the Tracker.

use log::info;

use super::{Cascaded, Tracker};
use crate::{
    display::ProjectSummaries,
    error::{Result, TrackerError},
    models::{Project, ProjectFilter, UpdateProjectRequest},
    params::{require_text, CreateProject, Id, ListProjects, UpdateProject},
    propagation::Cascade,
};

impl Tracker {
    /// Creates a new project in the draft status.
    pub async fn create_project(&self, params: &CreateProject) -> Result<Project> {
        require_text("title", &params.title)?;

        let CreateProject {
            title,
            description,
            address,
            client_id,
        } = params.clone();

        self.with_database(move |db| {
            db.create_project(
                &title,
                description.as_deref(),
                address.as_deref(),
                client_id,
            )
        })
        .await
    }

    /// Lists project summaries, optionally filtered by status, client and
    /// title.
    pub async fn list_projects(&self, params: &ListProjects) -> Result<ProjectSummaries> {
        let filter = ProjectFilter::try_from(params)?;

        self.with_database(move |db| db.list_projects(&filter))
            .await
            .map(ProjectSummaries)
    }

    /// Retrieves a project with its steps and their tasks.
    pub async fn get_project(&self, params: &Id) -> Result<Option<Project>> {
        let id = params.id;
        self.with_database(move |db| db.get_project(id)).await
    }

    /// Updates project details and returns the updated project.
    ///
    /// A status given here is stored as is. `cancelled` can only be set this
    /// way; under the default policy no cascade will overwrite it.
    pub async fn update_project(&self, params: &UpdateProject) -> Result<Project> {
        if let Some(title) = &params.title {
            require_text("title", title)?;
        }
        let request = UpdateProjectRequest::try_from(params.clone())?;
        let id = params.id;

        self.with_database(move |db| {
            if let Some(status) = request.status {
                info!("Project {id} status set manually to {status}");
            }
            db.update_project(id, request)?;
            db.get_project(id)?
                .ok_or(TrackerError::ProjectNotFound { id })
        })
        .await
    }

    /// Deletes a project with all of its steps and tasks.
    pub async fn delete_project(&self, params: &Id) -> Result<Project> {
        let id = params.id;
        self.with_database(move |db| db.delete_project(id)).await
    }

    /// Re-derives every step and the project itself from the stored tasks,
    /// regardless of the manual status policy.
    pub async fn refresh_project_status(&self, params: &Id) -> Result<Cascaded<Project>> {
        let id = params.id;

        self.with_cascade(move |db, policy| {
            db.ensure_project_exists(id)?;
            let cascade = Cascade::new(db, policy).refresh_project(id)?;
            let project = db
                .get_project(id)?
                .ok_or(TrackerError::ProjectNotFound { id })?;
            Ok(Cascaded::new(project, cascade))
        })
        .await
    }
}
