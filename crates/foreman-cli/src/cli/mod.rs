//! Command definitions and their handlers.
//!
//! Every command is a clap `Args` struct converted into the matching core
//! parameter type, so the tracker never sees clap types:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Tracker
//! ```
//!
//! Statuses are offered as closed value lists per level and passed on as the
//! strings the core parses. Each command group lives in its own module with
//! its handler.

use anyhow::{bail, Context, Result};
use clap::Args;
use foreman_core::{params::*, Tracker};

use crate::renderer::TerminalRenderer;

mod client;
mod project;
mod step;
mod task;

pub use client::ClientCommands;
pub use project::ProjectCommands;
pub use step::StepCommands;
pub use task::TaskCommands;

/// Arguments for commands that only take a resource ID
#[derive(Args)]
pub struct IdArgs {
    #[arg(help = "Unique identifier of the resource")]
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Delete a resource permanently
#[derive(Args)]
pub struct DeleteArgs {
    #[arg(help = "Unique identifier of the resource to permanently delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl DeleteArgs {
    /// The core parameters, or an error when `--confirm` is missing.
    fn confirmed(self, kind: &str) -> Result<Id> {
        if !self.confirm {
            bail!(
                "Deleting {kind} {} cannot be undone. Re-run with --confirm",
                self.id
            );
        }
        Ok(Id { id: self.id })
    }
}

/// Runs commands against a tracker and renders their markdown output.
pub struct Cli {
    tracker: Tracker,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(tracker: Tracker, renderer: TerminalRenderer) -> Self {
        Self { tracker, renderer }
    }

    /// Render the project list, the default command.
    pub async fn list_projects(&self, params: &ListProjects) -> Result<()> {
        let projects = self
            .tracker
            .list_projects(params)
            .await
            .context("Failed to list projects")?;
        self.renderer.render(&format!("# Projects\n\n{projects}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_requires_confirmation() {
        let args = DeleteArgs {
            id: 7,
            confirm: false,
        };
        let error = args.confirmed("project").unwrap_err();
        assert!(error.to_string().contains("--confirm"));

        let args = DeleteArgs {
            id: 7,
            confirm: true,
        };
        assert_eq!(args.confirmed("project").unwrap().id, 7);
    }
}
