use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use foreman_core::{
    display::{CreateResult, DeleteResult, UpdateResult},
    params::{TaskCreate, UpdateTask},
    TaskStatus,
};

use super::{Cli, IdArgs};

/// Add a new task to a step
#[derive(Args)]
pub struct AddTaskArgs {
    #[arg(help = "Unique identifier of the step to add this task to")]
    pub step_id: u64,
    /// Title of the task
    pub title: String,
    #[arg(long, help = "Who is recording the task")]
    pub actor: String,
    #[arg(short, long, help = "Optional description of the task")]
    pub description: Option<String>,
}

impl From<AddTaskArgs> for TaskCreate {
    fn from(val: AddTaskArgs) -> Self {
        TaskCreate {
            step_id: val.step_id,
            title: val.title,
            description: val.description,
            actor: val.actor,
        }
    }
}

/// Update a task's status or details
///
/// Changing the status re-derives the owning step and its project.
#[derive(Args)]
pub struct UpdateTaskArgs {
    #[arg(help = "Unique identifier of the task to update")]
    pub id: u64,
    #[arg(short, long, value_enum, help = "New status for the task")]
    pub status: Option<TaskStatusArg>,
    #[arg(short, long, help = "Updated title")]
    pub title: Option<String>,
    #[arg(short, long, help = "Updated description (empty to clear)")]
    pub description: Option<String>,
}

impl UpdateTaskArgs {
    fn changes(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(status) = self.status {
            changes.push(format!("Status set to {}", TaskStatus::from(status)));
        }
        if self.title.is_some() {
            changes.push("Updated title".to_string());
        }
        if self.description.is_some() {
            changes.push("Updated description".to_string());
        }
        changes
    }
}

impl From<UpdateTaskArgs> for UpdateTask {
    fn from(val: UpdateTaskArgs) -> Self {
        UpdateTask {
            id: val.id,
            status: val.status.map(|s| TaskStatus::from(s).as_str().to_string()),
            title: val.title,
            description: val.description,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a new task to a step
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// Update a task's status or details
    #[command(alias = "u")]
    Update(UpdateTaskArgs),
    /// Show details of a task
    #[command(alias = "s")]
    Show(IdArgs),
    /// List the tasks of a step
    #[command(aliases = ["l", "ls"])]
    List(IdArgs),
    /// Remove a task
    #[command(alias = "rm")]
    Remove(IdArgs),
}

/// Command-line values for task statuses
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TaskStatusArg {
    Todo,
    InProgress,
    Review,
    Done,
    Blocked,
    Suspended,
}

impl From<TaskStatusArg> for TaskStatus {
    fn from(val: TaskStatusArg) -> Self {
        match val {
            TaskStatusArg::Todo => TaskStatus::Todo,
            TaskStatusArg::InProgress => TaskStatus::InProgress,
            TaskStatusArg::Review => TaskStatus::Review,
            TaskStatusArg::Done => TaskStatus::Done,
            TaskStatusArg::Blocked => TaskStatus::Blocked,
            TaskStatusArg::Suspended => TaskStatus::Suspended,
        }
    }
}

impl Cli {
    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => {
                let task = self
                    .tracker
                    .add_task(&args.into())
                    .await
                    .context("Failed to add task")?;
                self.renderer.render(&CreateResult::new(task).to_string())
            }
            TaskCommands::Update(args) => {
                let changes = args.changes();
                let task = self
                    .tracker
                    .update_task(&args.into())
                    .await
                    .context("Failed to update task")?;
                self.renderer
                    .render(&UpdateResult::with_changes(task, changes).to_string())
            }
            TaskCommands::Show(args) => {
                let id = args.id;
                let task = self
                    .tracker
                    .get_task(&args.into())
                    .await
                    .context("Failed to get task")?
                    .with_context(|| format!("Task with ID {id} not found"))?;
                self.renderer.render(&format!("{task}\n"))
            }
            TaskCommands::List(args) => {
                let step_id = args.id;
                let tasks = self
                    .tracker
                    .get_tasks(&args.into())
                    .await
                    .context("Failed to list tasks")?;
                self.renderer
                    .render(&format!("# Tasks of step {step_id}\n\n{tasks}"))
            }
            TaskCommands::Remove(args) => {
                let task = self
                    .tracker
                    .remove_task(&args.into())
                    .await
                    .context("Failed to remove task")?;
                self.renderer.render(&DeleteResult::new(task).to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_args_map_to_core_strings() {
        let params = UpdateTask::from(UpdateTaskArgs {
            id: 4,
            status: Some(TaskStatusArg::InProgress),
            title: None,
            description: None,
        });
        assert_eq!(params.status.as_deref(), Some("in_progress"));
    }
}
