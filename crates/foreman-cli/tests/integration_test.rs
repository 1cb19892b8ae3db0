//! Integration tests comparing CLI output with the core Display
//! implementations the MCP server returns.

use std::process::Command;

use foreman_core::{
    display::CreateResult,
    params::{CreateProject, Id, ListProjects, StepCreate, TaskCreate},
    Tracker, TrackerBuilder,
};
use tempfile::TempDir;

async fn create_test_tracker() -> (Tracker, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .build()
        .await
        .expect("Failed to create tracker");
    (tracker, temp_dir)
}

/// Run a CLI command against the tracker's database and capture stdout
fn run_cli_command(tracker: &Tracker, args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_foreman"))
        .arg("--no-color")
        .arg("--database-file")
        .arg(tracker.database_path())
        .args(args)
        .output()
        .expect("Failed to run CLI command");
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

#[tokio::test]
async fn test_project_show_matches_display() {
    let (tracker, _temp_dir) = create_test_tracker().await;
    let project = tracker
        .create_project(&CreateProject {
            title: "Mill refurbishment".to_string(),
            description: Some("Convert ground floor to offices".to_string()),
            address: Some("Mill Lane".to_string()),
            client_id: None,
        })
        .await
        .unwrap();
    let step = tracker
        .add_step(&StepCreate {
            project_id: project.id,
            title: "Strip out".to_string(),
            description: None,
        })
        .await
        .unwrap()
        .resource;
    tracker
        .add_task(&TaskCreate {
            step_id: step.id,
            title: "Remove partitions".to_string(),
            description: Some("Ground floor only".to_string()),
            actor: "rui".to_string(),
        })
        .await
        .unwrap();

    let cli_output = run_cli_command(&tracker, &["project", "show", &project.id.to_string()]);

    let project = tracker
        .get_project(&Id { id: project.id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cli_output, project.to_string());
}

#[tokio::test]
async fn test_create_output_matches_display() {
    let (tracker, _temp_dir) = create_test_tracker().await;

    let cli_output = run_cli_command(&tracker, &["project", "create", "Boathouse"]);

    let project = tracker.get_project(&Id { id: 1 }).await.unwrap().unwrap();
    assert_eq!(cli_output, CreateResult::new(project).to_string());
}

#[tokio::test]
async fn test_project_list_matches_display() {
    let (tracker, _temp_dir) = create_test_tracker().await;
    run_cli_command(&tracker, &["project", "create", "Annex"]);
    run_cli_command(&tracker, &["project", "create", "Carport"]);

    let cli_output = run_cli_command(&tracker, &["project", "list"]);

    let summaries = tracker
        .list_projects(&ListProjects::default())
        .await
        .unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(cli_output, format!("# Projects\n\n{summaries}"));
}
