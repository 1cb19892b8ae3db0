//! SQLite implementation of the cascade's storage port.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::{id_column, status_column, Database};
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{ProjectStatus, StepStatus, TaskStatus},
    propagation::{StatusEntry, StatusRepository},
};

const SELECT_TASK_STEP_SQL: &str = "SELECT step_id FROM tasks WHERE id = ?1";
const SELECT_STEP_PROJECT_SQL: &str = "SELECT project_id FROM steps WHERE id = ?1";
const SELECT_TASK_STATUSES_SQL: &str = "SELECT id, status FROM tasks WHERE step_id = ?1 ORDER BY id";
const SELECT_STEP_STATUSES_SQL: &str =
    "SELECT id, status FROM steps WHERE project_id = ?1 ORDER BY step_order, id";
const SELECT_STEP_STATUS_SQL: &str = "SELECT status FROM steps WHERE id = ?1";
const SELECT_PROJECT_STATUS_SQL: &str = "SELECT status FROM projects WHERE id = ?1";
const UPDATE_STEP_STATUS_SQL: &str = "UPDATE steps SET status = ?1, updated_at = ?2 WHERE id = ?3";
const UPDATE_PROJECT_STATUS_SQL: &str =
    "UPDATE projects SET status = ?1, updated_at = ?2 WHERE id = ?3";

impl Database {
    fn status_entries<S>(&self, sql: &str, owner_id: u64) -> Result<Vec<StatusEntry<S>>>
    where
        S: std::str::FromStr<Err = String>,
    {
        let mut stmt = self
            .connection
            .prepare(sql)
            .db_context("Failed to prepare query")?;

        let entries = stmt
            .query_map(params![owner_id as i64], |row| {
                Ok(StatusEntry::new(id_column(row, 0)?, status_column(row, 1)?))
            })
            .db_context("Failed to query statuses")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch statuses")?;

        Ok(entries)
    }
}

impl StatusRepository for Database {
    fn task_step_id(&self, task_id: u64) -> Result<u64> {
        self.connection
            .query_row(SELECT_TASK_STEP_SQL, params![task_id as i64], |row| {
                id_column(row, 0)
            })
            .optional()
            .db_context("Failed to query task step")?
            .ok_or(TrackerError::TaskNotFound { id: task_id })
    }

    fn step_project_id(&self, step_id: u64) -> Result<u64> {
        self.connection
            .query_row(SELECT_STEP_PROJECT_SQL, params![step_id as i64], |row| {
                id_column(row, 0)
            })
            .optional()
            .db_context("Failed to query step project")?
            .ok_or(TrackerError::StepNotFound { id: step_id })
    }

    fn task_statuses(&self, step_id: u64) -> Result<Vec<StatusEntry<TaskStatus>>> {
        self.status_entries(SELECT_TASK_STATUSES_SQL, step_id)
    }

    fn step_statuses(&self, project_id: u64) -> Result<Vec<StatusEntry<StepStatus>>> {
        self.status_entries(SELECT_STEP_STATUSES_SQL, project_id)
    }

    fn step_status(&self, step_id: u64) -> Result<StepStatus> {
        self.connection
            .query_row(SELECT_STEP_STATUS_SQL, params![step_id as i64], |row| {
                status_column(row, 0)
            })
            .optional()
            .db_context("Failed to query step status")?
            .ok_or(TrackerError::StepNotFound { id: step_id })
    }

    fn project_status(&self, project_id: u64) -> Result<ProjectStatus> {
        self.connection
            .query_row(
                SELECT_PROJECT_STATUS_SQL,
                params![project_id as i64],
                |row| status_column(row, 0),
            )
            .optional()
            .db_context("Failed to query project status")?
            .ok_or(TrackerError::ProjectNotFound { id: project_id })
    }

    fn set_step_status(&mut self, step_id: u64, status: StepStatus) -> Result<()> {
        let updated = self
            .connection
            .execute(
                UPDATE_STEP_STATUS_SQL,
                params![status.as_str(), Timestamp::now().to_string(), step_id as i64],
            )
            .db_context("Failed to update step status")?;

        if updated == 0 {
            return Err(TrackerError::StepNotFound { id: step_id });
        }
        Ok(())
    }

    fn set_project_status(&mut self, project_id: u64, status: ProjectStatus) -> Result<()> {
        let updated = self
            .connection
            .execute(
                UPDATE_PROJECT_STATUS_SQL,
                params![
                    status.as_str(),
                    Timestamp::now().to_string(),
                    project_id as i64
                ],
            )
            .db_context("Failed to update project status")?;

        if updated == 0 {
            return Err(TrackerError::ProjectNotFound { id: project_id });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::{Cascade, ManualStatusPolicy};

    fn seeded() -> (Database, u64, u64) {
        let mut db = Database::in_memory().unwrap();
        let project = db.create_project("Kitchen", None, None, None).unwrap();
        let step = db.add_step(project.id, "Demolition", None).unwrap();
        (db, project.id, step.id)
    }

    #[test]
    fn test_reads_statuses_of_children() {
        let (mut db, project_id, step_id) = seeded();
        let first = db.add_task(step_id, "Strip tiles", None, "alice").unwrap();
        let second = db.add_task(step_id, "Remove cabinets", None, "alice").unwrap();

        let tasks = db.task_statuses(step_id).unwrap();
        assert_eq!(
            tasks,
            vec![
                StatusEntry::new(first.id, TaskStatus::Todo),
                StatusEntry::new(second.id, TaskStatus::Todo)
            ]
        );
        assert_eq!(
            db.step_statuses(project_id).unwrap(),
            vec![StatusEntry::new(step_id, StepStatus::Pending)]
        );
        assert_eq!(db.task_step_id(first.id).unwrap(), step_id);
        assert_eq!(db.step_project_id(step_id).unwrap(), project_id);
    }

    #[test]
    fn test_missing_rows_are_not_found() {
        let (mut db, _, _) = seeded();
        assert!(matches!(
            db.task_step_id(99),
            Err(TrackerError::TaskNotFound { id: 99 })
        ));
        assert!(matches!(
            db.step_status(99),
            Err(TrackerError::StepNotFound { id: 99 })
        ));
        assert!(matches!(
            db.set_project_status(99, ProjectStatus::Draft),
            Err(TrackerError::ProjectNotFound { id: 99 })
        ));
    }

    #[test]
    fn test_cascade_writes_through_sqlite() {
        let (mut db, project_id, step_id) = seeded();
        let task = db.add_task(step_id, "Strip tiles", None, "alice").unwrap();
        db.update_task(
            task.id,
            crate::models::UpdateTaskRequest {
                status: Some(TaskStatus::InProgress),
                ..Default::default()
            },
        )
        .unwrap();

        let outcome = Cascade::new(&mut db, ManualStatusPolicy::default())
            .on_task_status_changed(task.id)
            .unwrap();

        assert_eq!(outcome.writes(), 2);
        assert_eq!(db.step_status(step_id).unwrap(), StepStatus::InProgress);
        assert_eq!(
            db.project_status(project_id).unwrap(),
            ProjectStatus::InProgress
        );
    }
}
