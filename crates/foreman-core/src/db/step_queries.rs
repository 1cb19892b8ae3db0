//! Step CRUD operations and queries.

use std::collections::HashMap;

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Transaction};

use super::{id_column, status_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{Step, StepStatus, UpdateStepRequest},
};

const CHECK_PROJECT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM projects WHERE id = ?1)";
const CHECK_STEP_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM steps WHERE id = ?1)";
const COUNT_STEPS_SQL: &str = "SELECT COUNT(*) FROM steps WHERE project_id = ?1";
const INSERT_STEP_SQL: &str = "INSERT INTO steps (project_id, title, description, status, step_order, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const UPDATE_PROJECT_TIMESTAMP_SQL: &str = "UPDATE projects SET updated_at = ?1 WHERE id = ?2";
const UPDATE_STEP_ORDERS_INCREMENT_SQL: &str =
    "UPDATE steps SET step_order = step_order + 1 WHERE project_id = ?1 AND step_order >= ?2";
const UPDATE_STEP_ORDERS_DECREMENT_SQL: &str =
    "UPDATE steps SET step_order = step_order - 1 WHERE project_id = ?1 AND step_order > ?2";
const UPDATE_STEP_SQL: &str =
    "UPDATE steps SET title = ?1, description = ?2, status = ?3, updated_at = ?4 WHERE id = ?5";
const UPDATE_STEP_ORDER_SQL: &str =
    "UPDATE steps SET step_order = ?1, updated_at = ?2 WHERE id = ?3";
const SELECT_STEPS_BY_PROJECT_SQL: &str = "SELECT id, project_id, title, description, status, step_order, created_at, updated_at FROM steps WHERE project_id = ?1 ORDER BY step_order, id";
const SELECT_STEP_BY_ID_SQL: &str = "SELECT id, project_id, title, description, status, step_order, created_at, updated_at FROM steps WHERE id = ?1";
const DELETE_STEP_SQL: &str = "DELETE FROM steps WHERE id = ?1";

impl super::Database {
    fn build_step_from_row(row: &rusqlite::Row) -> rusqlite::Result<Step> {
        Ok(Step {
            id: id_column(row, 0)?,
            project_id: id_column(row, 1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            status: status_column(row, 4)?,
            order: row.get::<_, i64>(5)? as u32,
            created_at: timestamp_column(row, 6)?,
            updated_at: timestamp_column(row, 7)?,
            tasks: Vec::new(),
        })
    }

    fn select_step(tx: &Transaction, step_id: u64) -> Result<Step> {
        tx.query_row(
            SELECT_STEP_BY_ID_SQL,
            params![step_id as i64],
            Self::build_step_from_row,
        )
        .optional()
        .db_context("Failed to query step")?
        .ok_or(TrackerError::StepNotFound { id: step_id })
    }

    /// Appends a new pending step to the project.
    pub fn add_step(
        &mut self,
        project_id: u64,
        title: &str,
        description: Option<&str>,
    ) -> Result<Step> {
        self.insert_step_at(project_id, None, title, description)
    }

    /// Inserts a new step at a specific position in the project's step order.
    /// All steps at or after the position move one place down.
    pub fn insert_step(
        &mut self,
        project_id: u64,
        position: u32,
        title: &str,
        description: Option<&str>,
    ) -> Result<Step> {
        self.insert_step_at(project_id, Some(position), title, description)
    }

    fn insert_step_at(
        &mut self,
        project_id: u64,
        position: Option<u32>,
        title: &str,
        description: Option<&str>,
    ) -> Result<Step> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let project_exists: bool = tx
            .query_row(CHECK_PROJECT_EXISTS_SQL, params![project_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check project existence")?;

        if !project_exists {
            return Err(TrackerError::ProjectNotFound { id: project_id });
        }

        let step_count: i64 = tx
            .query_row(COUNT_STEPS_SQL, params![project_id as i64], |row| row.get(0))
            .db_context("Failed to count steps")?;
        let step_count = step_count as u32;

        let order = match position {
            None => step_count,
            // Inserting at the end (position == count) is allowed
            Some(position) if position > step_count => {
                return Err(TrackerError::invalid_input("position").with_reason(format!(
                    "Position {position} is out of range. Project has {step_count} steps"
                )));
            }
            Some(position) => {
                tx.execute(
                    UPDATE_STEP_ORDERS_INCREMENT_SQL,
                    params![project_id as i64, position as i64],
                )
                .db_context("Failed to update step orders")?;
                position
            }
        };

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_STEP_SQL,
            params![
                project_id as i64,
                title,
                description,
                StepStatus::Pending.as_str(),
                order as i64,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert step")?;

        let id = tx.last_insert_rowid() as u64;

        tx.execute(
            UPDATE_PROJECT_TIMESTAMP_SQL,
            params![&now_str, project_id as i64],
        )
        .db_context("Failed to update project timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Step {
            id,
            project_id,
            title: title.into(),
            description: description.map(String::from),
            status: StepStatus::Pending,
            order,
            created_at: now,
            updated_at: now,
            tasks: Vec::new(),
        })
    }

    /// Updates step details. A status in the request is stored as a manual
    /// value; the caller runs the project cascade afterwards.
    pub fn update_step(&mut self, step_id: u64, request: UpdateStepRequest) -> Result<()> {
        if !request.has_changes() {
            return Ok(());
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current = Self::select_step(&tx, step_id)?;

        let title = request.title.unwrap_or(current.title);
        let description = request.description.unwrap_or(current.description);
        let status = request.status.unwrap_or(current.status);
        let now_str = Timestamp::now().to_string();

        tx.execute(
            UPDATE_STEP_SQL,
            params![&title, &description, status.as_str(), &now_str, step_id as i64],
        )
        .db_context("Failed to update step")?;

        tx.execute(
            UPDATE_PROJECT_TIMESTAMP_SQL,
            params![&now_str, current.project_id as i64],
        )
        .db_context("Failed to update project timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Retrieves all steps of a project in order, each with its tasks.
    pub fn get_steps(&self, project_id: u64) -> Result<Vec<Step>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_STEPS_BY_PROJECT_SQL)
            .db_context("Failed to prepare query")?;

        let mut steps = stmt
            .query_map(params![project_id as i64], Self::build_step_from_row)
            .db_context("Failed to query steps")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch steps")?;

        let mut tasks_by_step: HashMap<u64, Vec<_>> = HashMap::new();
        for task in self.get_project_tasks(project_id)? {
            tasks_by_step.entry(task.step_id).or_default().push(task);
        }
        for step in &mut steps {
            step.tasks = tasks_by_step.remove(&step.id).unwrap_or_default();
        }

        Ok(steps)
    }

    /// Retrieves a single step with its tasks.
    pub fn get_step(&self, step_id: u64) -> Result<Option<Step>> {
        let step = self
            .connection
            .query_row(
                SELECT_STEP_BY_ID_SQL,
                params![step_id as i64],
                Self::build_step_from_row,
            )
            .optional()
            .db_context("Failed to get step")?;

        match step {
            Some(mut step) => {
                step.tasks = self.get_tasks(step.id)?;
                Ok(Some(step))
            }
            None => Ok(None),
        }
    }

    /// Swaps the order of two steps within the same project.
    pub fn swap_steps(&mut self, step_id1: u64, step_id2: u64) -> Result<()> {
        if step_id1 == step_id2 {
            return Ok(());
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let first = Self::select_step(&tx, step_id1)?;
        let second = Self::select_step(&tx, step_id2)?;

        if first.project_id != second.project_id {
            return Err(TrackerError::invalid_input("step_ids")
                .with_reason("Steps must be from the same project to swap"));
        }

        let now_str = Timestamp::now().to_string();

        tx.execute(
            UPDATE_STEP_ORDER_SQL,
            params![second.order as i64, &now_str, step_id1 as i64],
        )
        .db_context("Failed to update first step order")?;

        tx.execute(
            UPDATE_STEP_ORDER_SQL,
            params![first.order as i64, &now_str, step_id2 as i64],
        )
        .db_context("Failed to update second step order")?;

        tx.execute(
            UPDATE_PROJECT_TIMESTAMP_SQL,
            params![&now_str, first.project_id as i64],
        )
        .db_context("Failed to update project timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Removes a step and its tasks, closing the gap in the step order.
    /// Returns the removed step record.
    pub fn remove_step(&mut self, step_id: u64) -> Result<Step> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let step = Self::select_step(&tx, step_id)?;

        tx.execute(DELETE_STEP_SQL, params![step_id as i64])
            .db_context("Failed to delete step")?;

        tx.execute(
            UPDATE_STEP_ORDERS_DECREMENT_SQL,
            params![step.project_id as i64, step.order as i64],
        )
        .db_context("Failed to update step orders")?;

        let now_str = Timestamp::now().to_string();
        tx.execute(
            UPDATE_PROJECT_TIMESTAMP_SQL,
            params![&now_str, step.project_id as i64],
        )
        .db_context("Failed to update project timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(step)
    }

    /// Fails with `StepNotFound` unless the step exists.
    pub(crate) fn ensure_step_exists(&self, id: u64) -> Result<()> {
        let exists: bool = self
            .connection
            .query_row(CHECK_STEP_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check step existence")?;

        if exists {
            Ok(())
        } else {
            Err(TrackerError::StepNotFound { id })
        }
    }
}
