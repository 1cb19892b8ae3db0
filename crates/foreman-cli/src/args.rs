use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use foreman_core::ManualStatusPolicy;

use crate::cli::{ClientCommands, ProjectCommands, StepCommands, TaskCommands};

/// Command-line interface for the Foreman construction project tracker
///
/// Foreman tracks clients, their projects, the ordered steps of each project
/// and the tasks within each step. Task statuses are set by hand; step and
/// project statuses are derived from their children after every change. The
/// same operations are available to AI assistants through the MCP server
/// started with `foreman serve`.
#[derive(Parser)]
#[command(version, about, name = "foreman")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/foreman/foreman.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// What status cascades may do with a manually cancelled project
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = ManualStatusArg::PreserveTerminal
    )]
    pub manual_status: ManualStatusArg,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Foreman CLI
///
/// One command group per level of the hierarchy, plus `serve` for the MCP
/// server. Without a command the project list is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage clients
    #[command(alias = "c")]
    Client {
        #[command(subcommand)]
        command: ClientCommands,
    },
    /// Manage projects
    #[command(alias = "p")]
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Manage the steps of a project
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Manage the tasks of a step
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Start the MCP server
    Serve,
}

/// Command-line values for [`ManualStatusPolicy`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ManualStatusArg {
    /// Keep a cancelled project cancelled until it is refreshed
    PreserveTerminal,
    /// Let every cascade overwrite the project status
    AlwaysDerive,
}

impl From<ManualStatusArg> for ManualStatusPolicy {
    fn from(val: ManualStatusArg) -> Self {
        match val {
            ManualStatusArg::PreserveTerminal => ManualStatusPolicy::PreserveTerminal,
            ManualStatusArg::AlwaysDerive => ManualStatusPolicy::AlwaysDerive,
        }
    }
}
