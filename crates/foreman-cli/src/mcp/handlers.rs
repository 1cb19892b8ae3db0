//! MCP tool handlers implementation

use std::{fmt, sync::Arc};

use foreman_core::{
    display::{CreateResult, DeleteResult, OperationStatus, UpdateResult},
    params as core, Tracker,
};
use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::errors::{not_found, to_mcp_error};

// ============================================================================
// Generic Parameter Wrapper
// ============================================================================
//
// Core parameter types carry serde derives and, behind the `schema` feature,
// JsonSchema. The wrapper passes both straight through so the tool
// signatures below name MCP-facing types while the core stays free of MCP
// concerns.

/// Generic MCP wrapper for core parameter types
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreateClient = McpParams<core::CreateClient>;
pub type CreateProject = McpParams<core::CreateProject>;
pub type ListProjects = McpParams<core::ListProjects>;
pub type UpdateProject = McpParams<core::UpdateProject>;
pub type StepCreate = McpParams<core::StepCreate>;
pub type InsertStep = McpParams<core::InsertStep>;
pub type SwapSteps = McpParams<core::SwapSteps>;
pub type UpdateStep = McpParams<core::UpdateStep>;
pub type TaskCreate = McpParams<core::TaskCreate>;
pub type UpdateTask = McpParams<core::UpdateTask>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(output: &impl fmt::Display) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(
        output.to_string(),
    )]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    tracker: Arc<Mutex<Tracker>>,
}

impl McpHandlers {
    pub fn new(tracker: Arc<Mutex<Tracker>>) -> Self {
        Self { tracker }
    }

    // ------------------------------------------------------------------
    // Clients
    // ------------------------------------------------------------------

    pub async fn create_client(&self, Parameters(params): Parameters<CreateClient>) -> McpResult {
        debug!("create_client: {params:?}");

        let client = self
            .tracker
            .lock()
            .await
            .create_client(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create client", &e))?;

        text(&CreateResult::new(client))
    }

    pub async fn list_clients(&self) -> McpResult {
        debug!("list_clients");

        let clients = self
            .tracker
            .lock()
            .await
            .list_clients()
            .await
            .map_err(|e| to_mcp_error("Failed to list clients", &e))?;

        text(&format!("# Clients\n\n{clients}"))
    }

    pub async fn show_client(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_client: {params:?}");

        let id = params.as_ref().id;
        let client = self
            .tracker
            .lock()
            .await
            .get_client(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get client", &e))?
            .ok_or_else(|| not_found("Client", id))?;

        text(&client)
    }

    pub async fn delete_client(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_client: {params:?}");

        let client = self
            .tracker
            .lock()
            .await
            .delete_client(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete client", &e))?;

        text(&DeleteResult::new(client))
    }

    // ------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------

    pub async fn create_project(
        &self,
        Parameters(params): Parameters<CreateProject>,
    ) -> McpResult {
        debug!("create_project: {params:?}");

        let project = self
            .tracker
            .lock()
            .await
            .create_project(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create project", &e))?;

        text(&CreateResult::new(project))
    }

    pub async fn list_projects(&self, Parameters(params): Parameters<ListProjects>) -> McpResult {
        debug!("list_projects: {params:?}");

        let projects = self
            .tracker
            .lock()
            .await
            .list_projects(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list projects", &e))?;

        text(&format!("# Projects\n\n{projects}"))
    }

    pub async fn show_project(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_project: {params:?}");

        let id = params.as_ref().id;
        let project = self
            .tracker
            .lock()
            .await
            .get_project(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get project", &e))?
            .ok_or_else(|| not_found("Project", id))?;

        text(&project)
    }

    pub async fn update_project(
        &self,
        Parameters(params): Parameters<UpdateProject>,
    ) -> McpResult {
        debug!("update_project: {params:?}");

        let inner = params.as_ref();
        let project = self
            .tracker
            .lock()
            .await
            .update_project(inner)
            .await
            .map_err(|e| to_mcp_error("Failed to update project", &e))?;

        let mut changes = status_and_text_changes(
            inner.status.as_deref(),
            inner.title.is_some(),
            inner.description.is_some(),
        );
        if inner.address.is_some() {
            changes.push("Updated address".to_string());
        }
        if let Some(client_id) = inner.client_id {
            changes.push(format!("Moved to client {client_id}"));
        }

        text(&UpdateResult::with_changes(project, changes))
    }

    pub async fn delete_project(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_project: {params:?}");

        let project = self
            .tracker
            .lock()
            .await
            .delete_project(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete project", &e))?;

        text(&DeleteResult::new(project))
    }

    pub async fn refresh_project_status(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("refresh_project_status: {params:?}");

        let refreshed = self
            .tracker
            .lock()
            .await
            .refresh_project_status(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to refresh project status", &e))?;

        text(&format!(
            "{}\n{}\n{}",
            OperationStatus::success(format!(
                "Re-derived statuses of project {}",
                refreshed.resource.id
            )),
            refreshed.cascade,
            refreshed.resource
        ))
    }

    // ------------------------------------------------------------------
    // Steps
    // ------------------------------------------------------------------

    pub async fn add_step(&self, Parameters(params): Parameters<StepCreate>) -> McpResult {
        debug!("add_step: {params:?}");

        let step = self
            .tracker
            .lock()
            .await
            .add_step(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add step", &e))?;

        text(&CreateResult::new(step))
    }

    pub async fn insert_step(&self, Parameters(params): Parameters<InsertStep>) -> McpResult {
        debug!("insert_step: {params:?}");

        let step = self
            .tracker
            .lock()
            .await
            .insert_step(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to insert step", &e))?;

        text(&CreateResult::new(step))
    }

    pub async fn update_step(&self, Parameters(params): Parameters<UpdateStep>) -> McpResult {
        debug!("update_step: {params:?}");

        let inner = params.as_ref();
        let step = self
            .tracker
            .lock()
            .await
            .update_step(inner)
            .await
            .map_err(|e| to_mcp_error("Failed to update step", &e))?;

        let changes = status_and_text_changes(
            inner.status.as_deref(),
            inner.title.is_some(),
            inner.description.is_some(),
        );
        text(&UpdateResult::with_changes(step, changes))
    }

    pub async fn show_step(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_step: {params:?}");

        let id = params.as_ref().id;
        let step = self
            .tracker
            .lock()
            .await
            .get_step(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get step", &e))?
            .ok_or_else(|| not_found("Step", id))?;

        text(&step)
    }

    pub async fn list_steps(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("list_steps: {params:?}");

        let steps = self
            .tracker
            .lock()
            .await
            .get_steps(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list steps", &e))?;

        text(&format!(
            "# Steps of project {}\n\n{steps}",
            params.as_ref().id
        ))
    }

    pub async fn swap_steps(&self, Parameters(params): Parameters<SwapSteps>) -> McpResult {
        debug!("swap_steps: {params:?}");

        let inner = params.as_ref();
        self.tracker
            .lock()
            .await
            .swap_steps(inner)
            .await
            .map_err(|e| to_mcp_error("Failed to swap steps", &e))?;

        text(&OperationStatus::success(format!(
            "Swapped the order of steps {} and {}",
            inner.step1_id, inner.step2_id
        )))
    }

    pub async fn remove_step(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("remove_step: {params:?}");

        let step = self
            .tracker
            .lock()
            .await
            .remove_step(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to remove step", &e))?;

        text(&DeleteResult::new(step))
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    pub async fn add_task(&self, Parameters(params): Parameters<TaskCreate>) -> McpResult {
        debug!("add_task: {params:?}");

        let task = self
            .tracker
            .lock()
            .await
            .add_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add task", &e))?;

        text(&CreateResult::new(task))
    }

    pub async fn update_task(&self, Parameters(params): Parameters<UpdateTask>) -> McpResult {
        debug!("update_task: {params:?}");

        let inner = params.as_ref();
        let task = self
            .tracker
            .lock()
            .await
            .update_task(inner)
            .await
            .map_err(|e| to_mcp_error("Failed to update task", &e))?;

        let changes = status_and_text_changes(
            inner.status.as_deref(),
            inner.title.is_some(),
            inner.description.is_some(),
        );
        text(&UpdateResult::with_changes(task, changes))
    }

    pub async fn show_task(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_task: {params:?}");

        let id = params.as_ref().id;
        let task = self
            .tracker
            .lock()
            .await
            .get_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get task", &e))?
            .ok_or_else(|| not_found("Task", id))?;

        text(&task)
    }

    pub async fn list_tasks(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("list_tasks: {params:?}");

        let tasks = self
            .tracker
            .lock()
            .await
            .get_tasks(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list tasks", &e))?;

        text(&format!("# Tasks of step {}\n\n{tasks}", params.as_ref().id))
    }

    pub async fn remove_task(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("remove_task: {params:?}");

        let task = self
            .tracker
            .lock()
            .await
            .remove_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to remove task", &e))?;

        text(&DeleteResult::new(task))
    }
}

/// Change list shared by the update tools.
fn status_and_text_changes(status: Option<&str>, title: bool, description: bool) -> Vec<String> {
    let mut changes = Vec::new();
    if let Some(status) = status {
        changes.push(format!("Status set to '{status}'"));
    }
    if title {
        changes.push("Updated title".to_string());
    }
    if description {
        changes.push("Updated description".to_string());
    }
    changes
}
