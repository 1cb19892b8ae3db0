use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use foreman_core::{
    display::{CreateResult, DeleteResult, OperationStatus, UpdateResult},
    params::{CreateProject, ListProjects, UpdateProject},
    ProjectStatus,
};

use super::{Cli, DeleteArgs, IdArgs};

/// Create a new project
#[derive(Args)]
pub struct CreateProjectArgs {
    /// Title of the project
    pub title: String,
    #[arg(short, long, help = "Optional description of the works")]
    pub description: Option<String>,
    #[arg(short, long, help = "Site address")]
    pub address: Option<String>,
    #[arg(short, long, help = "ID of the client who owns the project")]
    pub client: Option<u64>,
}

impl From<CreateProjectArgs> for CreateProject {
    fn from(val: CreateProjectArgs) -> Self {
        CreateProject {
            title: val.title,
            description: val.description,
            address: val.address,
            client_id: val.client,
        }
    }
}

/// List projects with their progress
#[derive(Args, Default)]
pub struct ListProjectsArgs {
    #[arg(short, long, value_enum, help = "Only show projects in this status")]
    pub status: Option<ProjectStatusArg>,
    #[arg(short, long, help = "Only show projects of this client")]
    pub client: Option<u64>,
    #[arg(short, long, help = "Only show projects whose title contains this text")]
    pub title: Option<String>,
}

impl From<ListProjectsArgs> for ListProjects {
    fn from(val: ListProjectsArgs) -> Self {
        ListProjects {
            status: val.status.map(|s| ProjectStatus::from(s).as_str().to_string()),
            client_id: val.client,
            title: val.title,
        }
    }
}

/// Update a project's details or set its status by hand
///
/// A manually set status stays until the next change to the project's steps
/// re-derives it. `cancelled` is kept across cascades unless
/// `--manual-status always-derive` is in effect.
#[derive(Args)]
pub struct UpdateProjectArgs {
    #[arg(help = "Unique identifier of the project to update")]
    pub id: u64,
    #[arg(short, long, help = "Updated title")]
    pub title: Option<String>,
    #[arg(short, long, help = "Updated description (empty to clear)")]
    pub description: Option<String>,
    #[arg(short, long, help = "Updated site address (empty to clear)")]
    pub address: Option<String>,
    #[arg(short, long, help = "ID of the new owning client")]
    pub client: Option<u64>,
    #[arg(short, long, value_enum, help = "New status for the project")]
    pub status: Option<ProjectStatusArg>,
}

impl UpdateProjectArgs {
    fn changes(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(status) = self.status {
            changes.push(format!("Status set to {}", ProjectStatus::from(status)));
        }
        if self.title.is_some() {
            changes.push("Updated title".to_string());
        }
        if self.description.is_some() {
            changes.push("Updated description".to_string());
        }
        if self.address.is_some() {
            changes.push("Updated address".to_string());
        }
        if let Some(client) = self.client {
            changes.push(format!("Moved to client {client}"));
        }
        changes
    }
}

impl From<UpdateProjectArgs> for UpdateProject {
    fn from(val: UpdateProjectArgs) -> Self {
        UpdateProject {
            id: val.id,
            title: val.title,
            description: val.description,
            address: val.address,
            client_id: val.client,
            status: val.status.map(|s| ProjectStatus::from(s).as_str().to_string()),
        }
    }
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project
    #[command(alias = "c")]
    Create(CreateProjectArgs),
    /// List projects with their progress
    #[command(aliases = ["l", "ls"])]
    List(ListProjectsArgs),
    /// Show a project with its steps and tasks
    #[command(alias = "s")]
    Show(IdArgs),
    /// Update a project's details or status
    #[command(alias = "u")]
    Update(UpdateProjectArgs),
    /// Re-derive every step and the project status from the tasks
    #[command(alias = "r")]
    Refresh(IdArgs),
    /// Delete a project with all its steps and tasks
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteArgs),
}

/// Command-line values for project statuses
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProjectStatusArg {
    Draft,
    InProgress,
    Completed,
    Cancelled,
    Suspended,
}

impl From<ProjectStatusArg> for ProjectStatus {
    fn from(val: ProjectStatusArg) -> Self {
        match val {
            ProjectStatusArg::Draft => ProjectStatus::Draft,
            ProjectStatusArg::InProgress => ProjectStatus::InProgress,
            ProjectStatusArg::Completed => ProjectStatus::Completed,
            ProjectStatusArg::Cancelled => ProjectStatus::Cancelled,
            ProjectStatusArg::Suspended => ProjectStatus::Suspended,
        }
    }
}

impl Cli {
    pub async fn handle_project_command(&self, command: ProjectCommands) -> Result<()> {
        match command {
            ProjectCommands::Create(args) => {
                let project = self
                    .tracker
                    .create_project(&args.into())
                    .await
                    .context("Failed to create project")?;
                self.renderer.render(&CreateResult::new(project).to_string())
            }
            ProjectCommands::List(args) => self.list_projects(&args.into()).await,
            ProjectCommands::Show(args) => {
                let id = args.id;
                let project = self
                    .tracker
                    .get_project(&args.into())
                    .await
                    .context("Failed to get project")?
                    .with_context(|| format!("Project with ID {id} not found"))?;
                self.renderer.render(&project.to_string())
            }
            ProjectCommands::Update(args) => {
                let changes = args.changes();
                let project = self
                    .tracker
                    .update_project(&args.into())
                    .await
                    .context("Failed to update project")?;
                self.renderer
                    .render(&UpdateResult::with_changes(project, changes).to_string())
            }
            ProjectCommands::Refresh(args) => {
                let refreshed = self
                    .tracker
                    .refresh_project_status(&args.into())
                    .await
                    .context("Failed to refresh project status")?;
                let output = format!(
                    "{}\n{}",
                    OperationStatus::success(format!(
                        "Re-derived statuses of project {}",
                        refreshed.resource.id
                    )),
                    refreshed.cascade
                );
                self.renderer.render(&output)
            }
            ProjectCommands::Delete(args) => {
                let params = args.confirmed("project")?;
                let project = self
                    .tracker
                    .delete_project(&params)
                    .await
                    .context("Failed to delete project")?;
                self.renderer.render(&DeleteResult::new(project).to_string())
            }
        }
    }
}
