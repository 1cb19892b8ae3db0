use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use foreman_core::{
    display::{CreateResult, DeleteResult, OperationStatus, UpdateResult},
    params::{InsertStep, StepCreate, SwapSteps, UpdateStep},
    StepStatus,
};

use super::{Cli, IdArgs};

/// Append a new step to a project
#[derive(Args)]
pub struct AddStepArgs {
    #[arg(help = "Unique identifier of the project to add this step to")]
    pub project_id: u64,
    /// Title of the step
    pub title: String,
    #[arg(short, long, help = "Optional description of the work in this step")]
    pub description: Option<String>,
}

impl From<AddStepArgs> for StepCreate {
    fn from(val: AddStepArgs) -> Self {
        StepCreate {
            project_id: val.project_id,
            title: val.title,
            description: val.description,
        }
    }
}

/// Insert a new step at a specific position in a project
///
/// Position is 0-indexed (0 = first position). All existing steps at or
/// after this position move one place down.
#[derive(Args)]
pub struct InsertStepArgs {
    #[arg(help = "Unique identifier of the project to insert this step into")]
    pub project_id: u64,
    #[arg(help = "0-based position index where to insert the step (0 = first position)")]
    pub position: u32,
    /// Title of the step
    pub title: String,
    #[arg(short, long, help = "Optional description of the work in this step")]
    pub description: Option<String>,
}

impl From<InsertStepArgs> for InsertStep {
    fn from(val: InsertStepArgs) -> Self {
        InsertStep {
            step: StepCreate {
                project_id: val.project_id,
                title: val.title,
                description: val.description,
            },
            position: val.position,
        }
    }
}

/// Update a step's details or set its status by hand
///
/// A manual status feeds the project status straight away and holds until
/// one of the step's tasks changes.
#[derive(Args)]
pub struct UpdateStepArgs {
    #[arg(help = "Unique identifier of the step to update")]
    pub id: u64,
    #[arg(short, long, value_enum, help = "New status for the step")]
    pub status: Option<StepStatusArg>,
    #[arg(short, long, help = "Updated title")]
    pub title: Option<String>,
    #[arg(short, long, help = "Updated description (empty to clear)")]
    pub description: Option<String>,
}

impl UpdateStepArgs {
    fn changes(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(status) = self.status {
            changes.push(format!("Status set to {}", StepStatus::from(status)));
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

impl From<UpdateStepArgs> for UpdateStep {
    fn from(val: UpdateStepArgs) -> Self {
        UpdateStep {
            id: val.id,
            status: val.status.map(|s| StepStatus::from(s).as_str().to_string()),
            title: val.title,
            description: val.description,
        }
    }
}

/// Swap the order of two steps within the same project
#[derive(Args)]
pub struct SwapStepsArgs {
    #[arg(help = "Unique identifier of the first step to swap")]
    pub step1_id: u64,
    #[arg(help = "Unique identifier of the second step to swap")]
    pub step2_id: u64,
}

impl From<SwapStepsArgs> for SwapSteps {
    fn from(val: SwapStepsArgs) -> Self {
        SwapSteps {
            step1_id: val.step1_id,
            step2_id: val.step2_id,
        }
    }
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// Append a new step to a project
    #[command(alias = "a")]
    Add(AddStepArgs),
    /// Insert a new step at a specific position in a project
    #[command(alias = "i")]
    Insert(InsertStepArgs),
    /// Update a step's details or status
    #[command(alias = "u")]
    Update(UpdateStepArgs),
    /// Show a step with its tasks
    #[command(alias = "s")]
    Show(IdArgs),
    /// List the steps of a project
    #[command(aliases = ["l", "ls"])]
    List(IdArgs),
    /// Swap the order of two steps within the same project
    #[command(alias = "sw")]
    Swap(SwapStepsArgs),
    /// Remove a step and its tasks
    #[command(alias = "rm")]
    Remove(IdArgs),
}

/// Command-line values for step statuses
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StepStatusArg {
    Pending,
    InProgress,
    Completed,
    Blocked,
    Suspended,
}

impl From<StepStatusArg> for StepStatus {
    fn from(val: StepStatusArg) -> Self {
        match val {
            StepStatusArg::Pending => StepStatus::Pending,
            StepStatusArg::InProgress => StepStatus::InProgress,
            StepStatusArg::Completed => StepStatus::Completed,
            StepStatusArg::Blocked => StepStatus::Blocked,
            StepStatusArg::Suspended => StepStatus::Suspended,
        }
    }
}

impl Cli {
    pub async fn handle_step_command(&self, command: StepCommands) -> Result<()> {
        match command {
            StepCommands::Add(args) => {
                let step = self
                    .tracker
                    .add_step(&args.into())
                    .await
                    .context("Failed to add step")?;
                self.renderer.render(&CreateResult::new(step).to_string())
            }
            StepCommands::Insert(args) => {
                let step = self
                    .tracker
                    .insert_step(&args.into())
                    .await
                    .context("Failed to insert step")?;
                self.renderer.render(&CreateResult::new(step).to_string())
            }
            StepCommands::Update(args) => {
                let changes = args.changes();
                let step = self
                    .tracker
                    .update_step(&args.into())
                    .await
                    .context("Failed to update step")?;
                self.renderer
                    .render(&UpdateResult::with_changes(step, changes).to_string())
            }
            StepCommands::Show(args) => {
                let id = args.id;
                let step = self
                    .tracker
                    .get_step(&args.into())
                    .await
                    .context("Failed to get step")?
                    .with_context(|| format!("Step with ID {id} not found"))?;
                self.renderer.render(&step.to_string())
            }
            StepCommands::List(args) => {
                let project_id = args.id;
                let steps = self
                    .tracker
                    .get_steps(&args.into())
                    .await
                    .context("Failed to list steps")?;
                self.renderer
                    .render(&format!("# Steps of project {project_id}\n\n{steps}"))
            }
            StepCommands::Swap(args) => {
                let params = SwapSteps::from(args);
                self.tracker
                    .swap_steps(&params)
                    .await
                    .context("Failed to swap steps")?;
                let status = OperationStatus::success(format!(
                    "Swapped the order of steps {} and {}",
                    params.step1_id, params.step2_id
                ));
                self.renderer.render(&status.to_string())
            }
            StepCommands::Remove(args) => {
                let step = self
                    .tracker
                    .remove_step(&args.into())
                    .await
                    .context("Failed to remove step")?;
                self.renderer.render(&DeleteResult::new(step).to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_changes_describe_given_fields() {
        let args = UpdateStepArgs {
            id: 2,
            status: Some(StepStatusArg::Blocked),
            title: None,
            description: Some("Waiting on permits".to_string()),
        };
        assert_eq!(
            args.changes(),
            vec!["Status set to blocked", "Updated description"]
        );
    }
}
