//! Status propagation from tasks to steps to projects.
//!
//! Task statuses are set by people. Step and project statuses are derived:
//!
//! ```text
//! ┌─────────────┐  derive_step_status   ┌─────────────┐  derive_project_status  ┌───────────────┐
//! │ TaskStatus* │ ────────────────────▶ │ StepStatus  │ ──────────────────────▶ │ ProjectStatus │
//! └─────────────┘                       └─────────────┘                         └───────────────┘
//! ```
//!
//! - [`derive`]: the two pure rule sets, the only place either is written down
//! - [`cascade`]: the orchestrator every mutation site calls after persisting
//! - [`repository`]: the storage port the orchestrator reads and writes through
//! - [`policy`]: what happens to manually assigned terminal statuses
//!
//! The cascade is bounded to two levels and runs synchronously inside the
//! operation that triggered it. Concurrent operations on sibling tasks may
//! interleave their reads; the last status write wins.
//!
//! # Example
//!
//! ```rust
//! use foreman_core::{
//!     models::{ProjectStatus, StepStatus, TaskStatus},
//!     propagation::{derive_project_status, step_status_from_tasks},
//! };
//!
//! let step = step_status_from_tasks(&[TaskStatus::Done, TaskStatus::Done]);
//! assert_eq!(step, Some(StepStatus::Completed));
//! assert_eq!(step_status_from_tasks(&[]), None);
//!
//! let project = derive_project_status(&[StepStatus::Completed, StepStatus::Completed]);
//! assert_eq!(project, ProjectStatus::Completed);
//! ```

pub mod cascade;
pub mod derive;
pub mod policy;
pub mod repository;

pub use cascade::{Cascade, CascadeOutcome, StatusChange};
pub use derive::{
    derive_project_status, derive_step_status, project_status_from_steps, step_status_from_tasks,
};
pub use policy::ManualStatusPolicy;
pub use repository::{StatusEntry, StatusRepository};
