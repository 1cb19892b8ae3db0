//! Foreman CLI Application
//!
//! Command-line interface and MCP server for the Foreman construction
//! project tracker.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use foreman_core::{params::ListProjects, TrackerBuilder};
use log::info;
use mcp::{run_stdio_server, ForemanMcpServer};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        manual_status,
        command,
    } = Args::parse();

    let tracker = TrackerBuilder::new()
        .with_database_path(database_file)
        .with_manual_status_policy(manual_status.into())
        .build()
        .await
        .context("Failed to initialize tracker")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!(
        "Foreman started with the {} manual status policy",
        tracker.manual_status_policy()
    );

    match command {
        Some(Client { command }) => {
            Cli::new(tracker, renderer)
                .handle_client_command(command)
                .await
        }
        Some(Project { command }) => {
            Cli::new(tracker, renderer)
                .handle_project_command(command)
                .await
        }
        Some(Step { command }) => {
            Cli::new(tracker, renderer)
                .handle_step_command(command)
                .await
        }
        Some(Task { command }) => {
            Cli::new(tracker, renderer)
                .handle_task_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting Foreman MCP server");
            run_stdio_server(ForemanMcpServer::new(tracker))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(tracker, renderer)
                .list_projects(&ListProjects::default())
                .await
        }
    }
}
