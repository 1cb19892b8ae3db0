//! Task CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::{id_column, status_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{Task, TaskStatus, UpdateTaskRequest},
};

const CHECK_STEP_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM steps WHERE id = ?1)";
const INSERT_TASK_SQL: &str = "INSERT INTO tasks (step_id, title, description, status, created_by, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const SELECT_TASK_BY_ID_SQL: &str = "SELECT id, step_id, title, description, status, created_by, created_at, updated_at FROM tasks WHERE id = ?1";
const SELECT_TASKS_BY_STEP_SQL: &str = "SELECT id, step_id, title, description, status, created_by, created_at, updated_at FROM tasks WHERE step_id = ?1 ORDER BY id";
const SELECT_TASKS_BY_PROJECT_SQL: &str = "SELECT t.id, t.step_id, t.title, t.description, t.status, t.created_by, t.created_at, t.updated_at FROM tasks t JOIN steps s ON t.step_id = s.id WHERE s.project_id = ?1 ORDER BY t.id";
const UPDATE_TASK_SQL: &str =
    "UPDATE tasks SET title = ?1, description = ?2, status = ?3, updated_at = ?4 WHERE id = ?5";
const DELETE_TASK_SQL: &str = "DELETE FROM tasks WHERE id = ?1";
const UPDATE_STEP_TIMESTAMP_SQL: &str = "UPDATE steps SET updated_at = ?1 WHERE id = ?2";

impl super::Database {
    fn build_task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: id_column(row, 0)?,
            step_id: id_column(row, 1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            status: status_column(row, 4)?,
            created_by: row.get(5)?,
            created_at: timestamp_column(row, 6)?,
            updated_at: timestamp_column(row, 7)?,
        })
    }

    /// Adds a new task in the todo status to the step.
    pub fn add_task(
        &mut self,
        step_id: u64,
        title: &str,
        description: Option<&str>,
        actor: &str,
    ) -> Result<Task> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let step_exists: bool = tx
            .query_row(CHECK_STEP_EXISTS_SQL, params![step_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check step existence")?;

        if !step_exists {
            return Err(TrackerError::StepNotFound { id: step_id });
        }

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_TASK_SQL,
            params![
                step_id as i64,
                title,
                description,
                TaskStatus::Todo.as_str(),
                actor,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert task")?;

        let id = tx.last_insert_rowid() as u64;

        tx.execute(UPDATE_STEP_TIMESTAMP_SQL, params![&now_str, step_id as i64])
            .db_context("Failed to update step timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Task {
            id,
            step_id,
            title: title.into(),
            description: description.map(String::from),
            status: TaskStatus::Todo,
            created_by: actor.into(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Updates task details. The caller runs the cascade afterwards.
    pub fn update_task(&mut self, task_id: u64, request: UpdateTaskRequest) -> Result<()> {
        if !request.has_changes() {
            return Ok(());
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current = tx
            .query_row(
                SELECT_TASK_BY_ID_SQL,
                params![task_id as i64],
                Self::build_task_from_row,
            )
            .optional()
            .db_context("Failed to get current task")?
            .ok_or(TrackerError::TaskNotFound { id: task_id })?;

        let title = request.title.unwrap_or(current.title);
        let description = request.description.unwrap_or(current.description);
        let status = request.status.unwrap_or(current.status);

        tx.execute(
            UPDATE_TASK_SQL,
            params![
                &title,
                &description,
                status.as_str(),
                Timestamp::now().to_string(),
                task_id as i64
            ],
        )
        .db_context("Failed to update task")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Retrieves a single task by its ID.
    pub fn get_task(&self, task_id: u64) -> Result<Option<Task>> {
        self.connection
            .query_row(
                SELECT_TASK_BY_ID_SQL,
                params![task_id as i64],
                Self::build_task_from_row,
            )
            .optional()
            .db_context("Failed to get task")
    }

    /// Retrieves all tasks of a step in creation order.
    pub fn get_tasks(&self, step_id: u64) -> Result<Vec<Task>> {
        self.query_tasks(SELECT_TASKS_BY_STEP_SQL, step_id)
    }

    /// Retrieves every task of every step of a project.
    pub(crate) fn get_project_tasks(&self, project_id: u64) -> Result<Vec<Task>> {
        self.query_tasks(SELECT_TASKS_BY_PROJECT_SQL, project_id)
    }

    fn query_tasks(&self, sql: &str, owner_id: u64) -> Result<Vec<Task>> {
        let mut stmt = self
            .connection
            .prepare(sql)
            .db_context("Failed to prepare query")?;

        let tasks = stmt
            .query_map(params![owner_id as i64], Self::build_task_from_row)
            .db_context("Failed to query tasks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch tasks")?;

        Ok(tasks)
    }

    /// Removes a task and returns the removed record.
    pub fn remove_task(&mut self, task_id: u64) -> Result<Task> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let task = tx
            .query_row(
                SELECT_TASK_BY_ID_SQL,
                params![task_id as i64],
                Self::build_task_from_row,
            )
            .optional()
            .db_context("Failed to query task")?
            .ok_or(TrackerError::TaskNotFound { id: task_id })?;

        tx.execute(DELETE_TASK_SQL, params![task_id as i64])
            .db_context("Failed to delete task")?;

        tx.execute(
            UPDATE_STEP_TIMESTAMP_SQL,
            params![Timestamp::now().to_string(), task.step_id as i64],
        )
        .db_context("Failed to update step timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(task)
    }
}
