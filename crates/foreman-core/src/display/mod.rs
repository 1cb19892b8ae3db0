//! Markdown formatting for models, collections and operation results.
//!
//! Domain models implement `Display` directly (see [`models`]); groups of
//! models and the outcome of mutations are formatted through small wrapper
//! types so the CLI and the MCP server print exactly the same text.
//!
//! ```text
//! ┌──────────────────┐    ┌─────────────────────┐    ┌──────────────────┐
//! │  Domain models   │    │ Collections, result │    │  Markdown text   │
//! │ (Project, Step…) │───▶│      wrappers       │───▶│ (terminal / MCP) │
//! └──────────────────┘    └─────────────────────┘    └──────────────────┘
//! ```
//!
//! - [`collections`]: `ProjectSummaries`, `Clients`, `Steps`, `Tasks`
//! - [`results`]: `CreateResult`, `UpdateResult`, `DeleteResult`, including
//!   the status cascade of a mutation
//! - [`status`]: one-line confirmations
//! - [`datetime`]: local time formatting

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Clients, ProjectSummaries, Steps, Tasks};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, Resource, UpdateResult};
pub use status::OperationStatus;
