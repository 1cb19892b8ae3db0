//! High-level tracker API for clients, projects, steps and tasks.
//!
//! [`Tracker`] is the async entry point used by the CLI and the MCP server.
//! Every operation opens the database on a blocking worker, performs its
//! write, and then runs the status cascade for whatever it touched:
//!
//! ```text
//! ┌──────────────┐    ┌─────────────────┐    ┌───────────────────┐
//! │  CLI / MCP   │───▶│ Tracker (async) │───▶│ Database (SQLite) │
//! └──────────────┘    └────────┬────────┘    └─────────▲─────────┘
//!                              │ after each write       │
//!                              ▼                        │
//!                     ┌─────────────────┐  StatusRepository
//!                     │     Cascade     │───────────────┘
//!                     └─────────────────┘
//! ```
//!
//! | operation | cascade entry point |
//! |---|---|
//! | `add_task`, `remove_task` | [`Cascade::on_step_tasks_changed`](crate::propagation::Cascade::on_step_tasks_changed) |
//! | `update_task` with a status | [`Cascade::on_task_status_changed`](crate::propagation::Cascade::on_task_status_changed) |
//! | `add_step`, `insert_step`, `update_step` with a status | [`Cascade::on_step_status_changed`](crate::propagation::Cascade::on_step_status_changed) |
//! | `remove_step` | [`Cascade::on_project_steps_changed`](crate::propagation::Cascade::on_project_steps_changed) |
//! | `refresh_project_status` | [`Cascade::refresh_project`](crate::propagation::Cascade::refresh_project) |
//!
//! Mutating step and task operations return a [`Cascaded`] value so callers
//! can report which parent statuses moved.
//!
//! # Example
//!
//! ```rust
//! use foreman_core::{
//!     models::{ProjectStatus, StepStatus},
//!     params::{CreateProject, StepCreate, TaskCreate, UpdateTask},
//!     TrackerBuilder,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # tokio::runtime::Runtime::new()?.block_on(async {
//! let dir = tempfile::tempdir()?;
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some(dir.path().join("foreman.db")))
//!     .build()
//!     .await?;
//!
//! let project = tracker
//!     .create_project(&CreateProject {
//!         title: "Bathroom remodel".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! let step = tracker
//!     .add_step(&StepCreate {
//!         project_id: project.id,
//!         title: "Plumbing".to_string(),
//!         description: None,
//!     })
//!     .await?
//!     .resource;
//! let task = tracker
//!     .add_task(&TaskCreate {
//!         step_id: step.id,
//!         title: "Move drain".to_string(),
//!         description: None,
//!         actor: "sam".to_string(),
//!     })
//!     .await?
//!     .resource;
//!
//! let updated = tracker
//!     .update_task(&UpdateTask {
//!         id: task.id,
//!         status: Some("done".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! assert_eq!(updated.cascade.step().map(|c| c.to), Some(StepStatus::Completed));
//! assert_eq!(updated.cascade.project.map(|c| c.to), Some(ProjectStatus::Completed));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # })
//! # }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::task;

use crate::{
    db::Database,
    error::{Result, TrackerError},
    propagation::{CascadeOutcome, ManualStatusPolicy},
};

pub mod builder;
pub mod client_ops;
pub mod project_ops;
pub mod step_ops;
pub mod task_ops;

#[cfg(test)]
mod tests;

pub use builder::TrackerBuilder;

/// Main tracker interface.
#[derive(Debug, Clone)]
pub struct Tracker {
    pub(crate) db_path: PathBuf,
    pub(crate) policy: ManualStatusPolicy,
}

/// Result of a mutation together with the status writes of its cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cascaded<T> {
    pub resource: T,
    pub cascade: CascadeOutcome,
}

impl<T> Cascaded<T> {
    pub fn new(resource: T, cascade: CascadeOutcome) -> Self {
        Self { resource, cascade }
    }
}

impl Tracker {
    pub(crate) fn new(db_path: PathBuf, policy: ManualStatusPolicy) -> Self {
        Self { db_path, policy }
    }

    /// Path of the SQLite database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Policy applied to manually assigned terminal project statuses.
    pub fn manual_status_policy(&self) -> ManualStatusPolicy {
        self.policy
    }

    /// Run `op` against a fresh connection on the blocking pool.
    pub(crate) async fn with_database<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(TrackerError::join)?
    }

    /// Like [`Tracker::with_database`], also handing over a cascade policy.
    pub(crate) async fn with_cascade<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database, ManualStatusPolicy) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let policy = self.policy;
        self.with_database(move |db| op(db, policy)).await
    }
}
