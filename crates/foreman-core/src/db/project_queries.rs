//! Project CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::{id_column, status_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{Project, ProjectFilter, ProjectStatus, ProjectSummary, UpdateProjectRequest},
};

const INSERT_PROJECT_SQL: &str = "INSERT INTO projects (client_id, title, description, address, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const SELECT_PROJECT_SQL: &str = "SELECT id, client_id, title, description, address, status, created_at, updated_at FROM projects WHERE id = ?1";
const UPDATE_PROJECT_SQL: &str = "UPDATE projects SET client_id = ?1, title = ?2, description = ?3, address = ?4, status = ?5, updated_at = ?6 WHERE id = ?7";
const DELETE_PROJECT_SQL: &str = "DELETE FROM projects WHERE id = ?1";

// Counters are computed per row; the tables are small enough for correlated
// subqueries.
const SELECT_PROJECT_SUMMARIES_SQL: &str = "SELECT p.id, p.client_id, p.title, p.description, p.address, p.status, p.created_at, p.updated_at,
    (SELECT COUNT(*) FROM steps s WHERE s.project_id = p.id),
    (SELECT COUNT(*) FROM steps s WHERE s.project_id = p.id AND s.status = 'completed'),
    (SELECT COUNT(*) FROM tasks t JOIN steps s ON t.step_id = s.id WHERE s.project_id = p.id),
    (SELECT COUNT(*) FROM tasks t JOIN steps s ON t.step_id = s.id WHERE s.project_id = p.id AND t.status = 'done')
    FROM projects p";

impl super::Database {
    fn build_project_from_row(row: &rusqlite::Row) -> rusqlite::Result<Project> {
        Ok(Project {
            id: id_column(row, 0)?,
            client_id: row.get::<_, Option<i64>>(1)?.map(|id| id as u64),
            title: row.get(2)?,
            description: row.get(3)?,
            address: row.get(4)?,
            status: status_column(row, 5)?,
            created_at: timestamp_column(row, 6)?,
            updated_at: timestamp_column(row, 7)?,
            steps: Vec::new(),
        })
    }

    /// Creates a new project in the draft status.
    pub fn create_project(
        &mut self,
        title: &str,
        description: Option<&str>,
        address: Option<&str>,
        client_id: Option<u64>,
    ) -> Result<Project> {
        if let Some(client_id) = client_id {
            self.ensure_client_exists(client_id)?;
        }

        let now = Timestamp::now();
        let now_str = now.to_string();

        self.connection
            .execute(
                INSERT_PROJECT_SQL,
                params![
                    client_id.map(|id| id as i64),
                    title,
                    description,
                    address,
                    ProjectStatus::Draft.as_str(),
                    &now_str,
                    &now_str
                ],
            )
            .db_context("Failed to insert project")?;

        Ok(Project {
            id: self.connection.last_insert_rowid() as u64,
            client_id,
            title: title.into(),
            description: description.map(String::from),
            address: address.map(String::from),
            status: ProjectStatus::Draft,
            created_at: now,
            updated_at: now,
            steps: Vec::new(),
        })
    }

    /// Retrieves a project without its steps.
    pub fn get_project_record(&self, id: u64) -> Result<Option<Project>> {
        self.connection
            .query_row(SELECT_PROJECT_SQL, params![id as i64], Self::build_project_from_row)
            .optional()
            .db_context("Failed to query project")
    }

    /// Retrieves a project with its steps and their tasks.
    pub fn get_project(&self, id: u64) -> Result<Option<Project>> {
        let mut project = self.get_project_record(id)?;

        if let Some(ref mut project) = project {
            project.steps = self.get_steps(project.id)?;
        }

        Ok(project)
    }

    /// Lists project summaries, newest first.
    pub fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<ProjectSummary>> {
        let mut query = SELECT_PROJECT_SUMMARIES_SQL.to_string();
        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref title) = filter.title_contains {
            conditions.push("p.title LIKE ?");
            params_vec.push(Box::new(format!("%{title}%")));
        }

        if let Some(client_id) = filter.client_id {
            conditions.push("p.client_id = ?");
            params_vec.push(Box::new(client_id as i64));
        }

        if let Some(status) = filter.status {
            conditions.push("p.status = ?");
            params_vec.push(Box::new(status.as_str()));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY p.created_at DESC, p.id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let summaries = stmt
            .query_map(&params_refs[..], |row| {
                let project = Self::build_project_from_row(row)?;
                let count = |idx: usize| row.get::<_, i64>(idx).map(|n| n as u32);

                Ok(ProjectSummary {
                    id: project.id,
                    client_id: project.client_id,
                    title: project.title,
                    description: project.description,
                    address: project.address,
                    status: project.status,
                    created_at: project.created_at,
                    updated_at: project.updated_at,
                    total_steps: count(8)?,
                    completed_steps: count(9)?,
                    total_tasks: count(10)?,
                    done_tasks: count(11)?,
                })
            })
            .db_context("Failed to query projects")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch projects")?;

        Ok(summaries)
    }

    /// Updates project details. A status in the request is stored as given.
    pub fn update_project(&mut self, id: u64, request: UpdateProjectRequest) -> Result<()> {
        if !request.has_changes() {
            return Ok(());
        }

        if let Some(client_id) = request.client_id {
            self.ensure_client_exists(client_id)?;
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current = tx
            .query_row(SELECT_PROJECT_SQL, params![id as i64], Self::build_project_from_row)
            .optional()
            .db_context("Failed to get current project")?
            .ok_or(TrackerError::ProjectNotFound { id })?;

        let client_id = request.client_id.or(current.client_id);
        let title = request.title.unwrap_or(current.title);
        let description = request.description.unwrap_or(current.description);
        let address = request.address.unwrap_or(current.address);
        let status = request.status.unwrap_or(current.status);

        tx.execute(
            UPDATE_PROJECT_SQL,
            params![
                client_id.map(|id| id as i64),
                &title,
                &description,
                &address,
                status.as_str(),
                Timestamp::now().to_string(),
                id as i64
            ],
        )
        .db_context("Failed to update project")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Deletes a project together with its steps and tasks, returning the
    /// deleted project record.
    pub fn delete_project(&mut self, id: u64) -> Result<Project> {
        let project = self
            .get_project_record(id)?
            .ok_or(TrackerError::ProjectNotFound { id })?;

        self.connection
            .execute(DELETE_PROJECT_SQL, params![id as i64])
            .db_context("Failed to delete project")?;

        Ok(project)
    }

    /// Fails with `ProjectNotFound` unless the project exists.
    pub(crate) fn ensure_project_exists(&self, id: u64) -> Result<()> {
        let exists: bool = self
            .connection
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM projects WHERE id = ?1)",
                params![id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to check project existence")?;

        if exists {
            Ok(())
        } else {
            Err(TrackerError::ProjectNotFound { id })
        }
    }
}
