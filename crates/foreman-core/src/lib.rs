//! Core library for the Foreman construction project tracker.
//!
//! Clients own projects, projects are split into ordered steps and steps into
//! tasks. People set task statuses; step and project statuses follow from
//! their children through the rules in [`propagation`], re-applied after
//! every mutation that could change them.
//!
//! # Modules
//!
//! - [`models`]: clients, projects, steps, tasks and their status enums
//! - [`propagation`]: derivation rules and the task → step → project cascade
//! - [`db`]: SQLite persistence, including the cascade's storage port
//! - [`tracker`]: the async API used by the CLI and the MCP server
//! - [`params`]: interface-neutral operation parameters
//! - [`display`]: markdown formatting of models and operation results
//!
//! # Quick Start
//!
//! ```rust
//! use foreman_core::{params::CreateProject, TrackerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("foreman.db"))
//!     .build()
//!     .await?;
//!
//! let project = tracker
//!     .create_project(&CreateProject {
//!         title: "Kitchen renovation".to_string(),
//!         description: None,
//!         address: Some("4 Quay Road".to_string()),
//!         client_id: None,
//!     })
//!     .await?;
//! println!("{project}");
//!
//! use foreman_core::params::ListProjects;
//! for summary in &tracker.list_projects(&ListProjects::default()).await? {
//!     println!("{} is {}", summary.title, summary.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod propagation;
pub mod tracker;

pub use db::Database;
pub use display::{
    Clients, CreateResult, DeleteResult, OperationStatus, ProjectSummaries, Steps, Tasks,
    UpdateResult,
};
pub use error::{Result, TrackerError};
pub use models::{
    Client, Project, ProjectFilter, ProjectStatus, ProjectSummary, Step, StepStatus, Task,
    TaskStatus,
};
pub use propagation::{CascadeOutcome, ManualStatusPolicy, StatusChange};
pub use tracker::{Cascaded, Tracker, TrackerBuilder};
