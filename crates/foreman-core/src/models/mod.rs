//! Data models for clients, projects, steps and tasks.
//!
//! This module contains the core domain models of the Foreman project
//! tracker. Display implementations for these models are located in
//! [`crate::display::models`] to keep data structures apart from
//! presentation.
//!
//! The ownership chain is `Client → Project → Step → Task`. Task statuses are
//! set by users; step and project statuses are derived from their children by
//! [`crate::propagation`] and only hold a manual value until the next cascade.
//!
//! # Examples
//!
//! ```rust
//! use foreman_core::models::{Step, StepStatus};
//! use jiff::Timestamp;
//!
//! let step = Step {
//!     id: 1,
//!     project_id: 1,
//!     title: "Foundations".to_string(),
//!     status: StepStatus::InProgress,
//!     // ... other fields
//! #   description: None,
//! #   order: 0,
//! #   created_at: Timestamp::now(),
//! #   updated_at: Timestamp::now(),
//! #   tasks: vec![],
//! };
//! println!("{}", step); // Shows ➤ In Progress status icon
//! ```

pub mod client;
pub mod filters;
pub mod project;
pub mod requests;
pub mod status;
pub mod step;
pub mod summary;
pub mod task;

#[cfg(test)]
mod tests;

pub use client::Client;
pub use filters::ProjectFilter;
pub use project::Project;
pub use requests::{UpdateProjectRequest, UpdateStepRequest, UpdateTaskRequest};
pub use status::{ProjectStatus, StepStatus, TaskStatus};
pub use step::Step;
pub use summary::ProjectSummary;
pub use task::Task;
