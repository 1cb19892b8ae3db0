//! MCP server implementation for Foreman
//!
//! Exposes one tool per tracker operation over stdio so AI assistants can
//! manage clients, projects, steps and tasks. Tool results are the same
//! markdown the CLI prints, including any status cascade a mutation caused.

use std::sync::Arc;

use anyhow::Result;
use foreman_core::Tracker;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;

pub use handlers::{
    CreateClient, CreateProject, Id, InsertStep, ListProjects, McpResult, StepCreate, SwapSteps,
    TaskCreate, UpdateProject, UpdateStep, UpdateTask,
};

/// MCP server for Foreman
#[derive(Clone)]
pub struct ForemanMcpServer {
    tracker: Arc<Mutex<Tracker>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ForemanMcpServer {
    pub fn new(tracker: Tracker) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(tracker)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.tracker.clone())
    }

    #[tool(
        name = "create_client",
        description = "Register a client who commissions construction projects. Requires a name; email and phone are optional. Returns the new client ID for use as client_id on projects."
    )]
    async fn create_client(&self, params: Parameters<CreateClient>) -> McpResult {
        self.handlers().create_client(params).await
    }

    #[tool(
        name = "list_clients",
        description = "List all clients in alphabetical order with their contact details."
    )]
    async fn list_clients(&self) -> McpResult {
        self.handlers().list_clients().await
    }

    #[tool(
        name = "show_client",
        description = "Show the details of a single client by ID."
    )]
    async fn show_client(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_client(params).await
    }

    #[tool(
        name = "delete_client",
        description = "Delete a client. Refused while the client still owns projects; delete or reassign those first."
    )]
    async fn delete_client(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_client(params).await
    }

    #[tool(
        name = "create_project",
        description = "Create a construction project. Requires a title; description, site address and client_id are optional. New projects start in 'draft' and follow their steps once steps are added."
    )]
    async fn create_project(&self, params: Parameters<CreateProject>) -> McpResult {
        self.handlers().create_project(params).await
    }

    #[tool(
        name = "list_projects",
        description = "List projects, newest first, with step and task progress. Optional filters: status ('draft', 'in_progress', 'completed', 'cancelled', 'suspended'), client_id, and title (case-insensitive substring)."
    )]
    async fn list_projects(&self, params: Parameters<ListProjects>) -> McpResult {
        self.handlers().list_projects(params).await
    }

    #[tool(
        name = "show_project",
        description = "Show a project with all of its steps in order and every task within each step, including all statuses."
    )]
    async fn show_project(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_project(params).await
    }

    #[tool(
        name = "update_project",
        description = "Update a project's title, description, address, client_id or status. A manual status is replaced by the derived one at the next change to the project's steps, except 'cancelled', which is kept unless the server runs with the always-derive policy."
    )]
    async fn update_project(&self, params: Parameters<UpdateProject>) -> McpResult {
        self.handlers().update_project(params).await
    }

    #[tool(
        name = "delete_project",
        description = "Permanently delete a project with all of its steps and tasks. This cannot be undone."
    )]
    async fn delete_project(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_project(params).await
    }

    #[tool(
        name = "refresh_project_status",
        description = "Re-derive the status of every step of a project from its tasks, then the project status from its steps. Overrides a manual 'cancelled'. Reports every status that changed."
    )]
    async fn refresh_project_status(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().refresh_project_status(params).await
    }

    #[tool(
        name = "add_step",
        description = "Append a step to the end of a project. Requires project_id and title. Steps start 'pending' and the project status is re-derived."
    )]
    async fn add_step(&self, params: Parameters<StepCreate>) -> McpResult {
        self.handlers().add_step(params).await
    }

    #[tool(
        name = "insert_step",
        description = "Insert a step at a 0-based position in a project's step order (0 = first). Steps at or after the position move down by one. The position may equal the current step count to append."
    )]
    async fn insert_step(&self, params: Parameters<InsertStep>) -> McpResult {
        self.handlers().insert_step(params).await
    }

    #[tool(
        name = "update_step",
        description = "Update a step's title, description or status ('pending', 'in_progress', 'completed', 'blocked', 'suspended'). A manual status immediately re-derives the project and holds until one of the step's tasks changes."
    )]
    async fn update_step(&self, params: Parameters<UpdateStep>) -> McpResult {
        self.handlers().update_step(params).await
    }

    #[tool(
        name = "show_step",
        description = "Show a single step with its tasks."
    )]
    async fn show_step(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_step(params).await
    }

    #[tool(
        name = "list_steps",
        description = "List the steps of a project in order. Pass the project ID as id."
    )]
    async fn list_steps(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().list_steps(params).await
    }

    #[tool(
        name = "swap_steps",
        description = "Swap the positions of two steps of the same project. Statuses are not affected."
    )]
    async fn swap_steps(&self, params: Parameters<SwapSteps>) -> McpResult {
        self.handlers().swap_steps(params).await
    }

    #[tool(
        name = "remove_step",
        description = "Remove a step and its tasks, close the gap in the step order and re-derive the project status."
    )]
    async fn remove_step(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().remove_step(params).await
    }

    #[tool(
        name = "add_task",
        description = "Add a task to a step. Requires step_id, title and actor (who records the task). Tasks start 'todo'; the step and project statuses are re-derived."
    )]
    async fn add_task(&self, params: Parameters<TaskCreate>) -> McpResult {
        self.handlers().add_task(params).await
    }

    #[tool(
        name = "update_task",
        description = "Update a task's title, description or status ('todo', 'in_progress', 'review', 'done', 'blocked', 'suspended'). A status change re-derives the owning step from all of its tasks, then the project from all of its steps, and reports what changed."
    )]
    async fn update_task(&self, params: Parameters<UpdateTask>) -> McpResult {
        self.handlers().update_task(params).await
    }

    #[tool(
        name = "show_task",
        description = "Show a single task by ID."
    )]
    async fn show_task(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_task(params).await
    }

    #[tool(
        name = "list_tasks",
        description = "List the tasks of a step. Pass the step ID as id."
    )]
    async fn list_tasks(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().list_tasks(params).await
    }

    #[tool(
        name = "remove_task",
        description = "Remove a task and re-derive the owning step and project. A step left without tasks keeps its last status."
    )]
    async fn remove_task(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().remove_task(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for ForemanMcpServer {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name = "foreman".to_string();
        server_info.version = env!("CARGO_PKG_VERSION").to_string();

        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info,
            instructions: Some(r#"Foreman tracks construction projects for clients.

## Core Concepts
- **Clients** own projects.
- **Projects** are split into ordered **steps**; steps are split into **tasks**.
- Task statuses are set by hand: todo, in_progress, review, done, blocked, suspended.
- Step and project statuses are derived after every change:
  - step: all tasks done → completed; any blocked → blocked; any suspended → suspended; any in_progress/review → in_progress; otherwise pending
  - project: all steps completed → completed; any blocked/suspended → suspended; any in_progress → in_progress; otherwise draft
- 'cancelled' is only ever set by hand on a project.

## Workflow
1. `create_client` and `create_project`
2. `add_step` for each phase of the works, `add_task` for each job within a phase
3. `update_task` as work progresses; the response lists any step or project status that moved
4. `show_project` or `list_projects` to review progress

Use `refresh_project_status` to re-derive a project after manual status edits."#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: ForemanMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Foreman MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_every_tracker_operation_is_a_tool() {
        let temp_dir = TempDir::new().unwrap();
        let tracker = foreman_core::TrackerBuilder::new()
            .with_database_path(Some(temp_dir.path().join("mcp.db")))
            .build()
            .await
            .unwrap();

        let server = ForemanMcpServer::new(tracker);
        let mut names: Vec<_> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();

        assert_eq!(names.len(), 22);
        for expected in ["update_task", "update_step", "refresh_project_status", "list_clients"] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
        assert_eq!(server.get_info().server_info.name, "foreman");
    }
}
