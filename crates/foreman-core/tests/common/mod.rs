#![allow(dead_code)]

use foreman_core::{
    params::{CreateProject, StepCreate, TaskCreate},
    ManualStatusPolicy, Tracker, TrackerBuilder,
};
use tempfile::TempDir;

/// Helper function to create a test tracker backed by a temporary database
pub async fn create_test_tracker() -> (TempDir, Tracker) {
    create_test_tracker_with(ManualStatusPolicy::default()).await
}

pub async fn create_test_tracker_with(policy: ManualStatusPolicy) -> (TempDir, Tracker) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_manual_status_policy(policy)
        .build()
        .await
        .expect("Failed to create tracker");
    (temp_dir, tracker)
}

pub async fn project(tracker: &Tracker, title: &str) -> u64 {
    tracker
        .create_project(&CreateProject {
            title: title.to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create project")
        .id
}

pub async fn step(tracker: &Tracker, project_id: u64, title: &str) -> u64 {
    tracker
        .add_step(&StepCreate {
            project_id,
            title: title.to_string(),
            description: None,
        })
        .await
        .expect("Failed to add step")
        .resource
        .id
}

pub async fn task(tracker: &Tracker, step_id: u64, title: &str) -> u64 {
    tracker
        .add_task(&TaskCreate {
            step_id,
            title: title.to_string(),
            description: None,
            actor: "site-manager".to_string(),
        })
        .await
        .expect("Failed to add task")
        .resource
        .id
}
