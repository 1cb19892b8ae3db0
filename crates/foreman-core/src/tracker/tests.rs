//! Tests for the tracker module.

use tempfile::TempDir;

use super::*;
use crate::{
    models::{ProjectStatus, StepStatus},
    params::{
        CreateClient, CreateProject, Id, ListProjects, StepCreate, TaskCreate, UpdateProject,
        UpdateStep, UpdateTask,
    },
};

async fn create_test_tracker(policy: ManualStatusPolicy) -> (TempDir, Tracker) {
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

async fn project_with_task(tracker: &Tracker) -> (u64, u64, u64) {
    let project = tracker
        .create_project(&CreateProject {
            title: "Extension".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let step = tracker
        .add_step(&StepCreate {
            project_id: project.id,
            title: "Footings".to_string(),
            description: None,
        })
        .await
        .unwrap()
        .resource;
    let task = tracker
        .add_task(&TaskCreate {
            step_id: step.id,
            title: "Dig trench".to_string(),
            description: None,
            actor: "kai".to_string(),
        })
        .await
        .unwrap()
        .resource;
    (project.id, step.id, task.id)
}

async fn set_task(tracker: &Tracker, id: u64, status: &str) -> Cascaded<crate::models::Task> {
    tracker
        .update_task(&UpdateTask {
            id,
            status: Some(status.to_string()),
            ..Default::default()
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_builder_keeps_policy_and_path() {
    let (temp_dir, tracker) = create_test_tracker(ManualStatusPolicy::AlwaysDerive).await;

    assert_eq!(tracker.manual_status_policy(), ManualStatusPolicy::AlwaysDerive);
    assert_eq!(tracker.database_path(), temp_dir.path().join("test.db"));
    assert!(tracker.database_path().exists());
}

#[tokio::test]
async fn test_builder_creates_missing_directories() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("dir").join("foreman.db");

    TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .unwrap();

    assert!(db_path.exists());
}

#[tokio::test]
async fn test_blank_required_fields_are_rejected() {
    let (_temp_dir, tracker) = create_test_tracker(ManualStatusPolicy::default()).await;

    let error = tracker
        .create_client(&CreateClient {
            name: "  ".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(error, TrackerError::InvalidInput { ref field, .. } if field == "name"));

    let (_, step_id, _) = project_with_task(&tracker).await;
    let error = tracker
        .add_task(&TaskCreate {
            step_id,
            title: "Lay membrane".to_string(),
            description: None,
            actor: String::new(),
        })
        .await
        .unwrap_err();
    assert!(matches!(error, TrackerError::InvalidInput { ref field, .. } if field == "actor"));
}

#[tokio::test]
async fn test_unknown_status_string_is_rejected_before_writing() {
    let (_temp_dir, tracker) = create_test_tracker(ManualStatusPolicy::default()).await;
    let (_, _, task_id) = project_with_task(&tracker).await;

    let error = tracker
        .update_task(&UpdateTask {
            id: task_id,
            status: Some("finished".to_string()),
            title: Some("Renamed".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(error, TrackerError::InvalidInput { .. }));

    let task = tracker.get_task(&Id { id: task_id }).await.unwrap().unwrap();
    assert_eq!(task.title, "Dig trench");
}

#[tokio::test]
async fn test_client_with_projects_cannot_be_deleted() {
    let (_temp_dir, tracker) = create_test_tracker(ManualStatusPolicy::default()).await;

    let client = tracker
        .create_client(&CreateClient {
            name: "Aldridge Builders".to_string(),
            email: Some("office@aldridge.example".to_string()),
            phone: None,
        })
        .await
        .unwrap();
    let project = tracker
        .create_project(&CreateProject {
            title: "Warehouse".to_string(),
            client_id: Some(client.id),
            ..Default::default()
        })
        .await
        .unwrap();

    let error = tracker.delete_client(&Id { id: client.id }).await.unwrap_err();
    assert!(matches!(error, TrackerError::InvalidInput { .. }));

    tracker.delete_project(&Id { id: project.id }).await.unwrap();
    let deleted = tracker.delete_client(&Id { id: client.id }).await.unwrap();
    assert_eq!(deleted.name, "Aldridge Builders");
    assert!(tracker.list_clients().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_project_for_unknown_client_is_rejected() {
    let (_temp_dir, tracker) = create_test_tracker(ManualStatusPolicy::default()).await;

    let error = tracker
        .create_project(&CreateProject {
            title: "Orphan".to_string(),
            client_id: Some(42),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(error, TrackerError::ClientNotFound { id: 42 }));
}

#[tokio::test]
async fn test_list_projects_filters() {
    let (_temp_dir, tracker) = create_test_tracker(ManualStatusPolicy::default()).await;
    let (active_id, _, task_id) = project_with_task(&tracker).await;
    set_task(&tracker, task_id, "in_progress").await;
    tracker
        .create_project(&CreateProject {
            title: "Shed".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let all = tracker.list_projects(&ListProjects::default()).await.unwrap();
    assert_eq!(all.len(), 2);

    let active = tracker
        .list_projects(&ListProjects {
            status: Some("IN_PROGRESS".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, active_id);
    assert_eq!(active[0].total_tasks, 1);

    let by_title = tracker
        .list_projects(&ListProjects {
            title: Some("she".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].title, "Shed");

    let error = tracker
        .list_projects(&ListProjects {
            status: Some("archived".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(error, TrackerError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_update_without_status_does_not_cascade() {
    let (_temp_dir, tracker) = create_test_tracker(ManualStatusPolicy::default()).await;
    let (_, step_id, task_id) = project_with_task(&tracker).await;

    let updated = tracker
        .update_task(&UpdateTask {
            id: task_id,
            title: Some("Dig deeper trench".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.resource.title, "Dig deeper trench");
    assert!(updated.cascade.is_noop());

    let updated = tracker
        .update_step(&UpdateStep {
            id: step_id,
            description: Some("Concrete strip footings".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(updated.cascade.is_noop());
    assert_eq!(updated.resource.tasks.len(), 1);
}

#[tokio::test]
async fn test_manual_cancel_survives_cascades_by_default() {
    let (_temp_dir, tracker) = create_test_tracker(ManualStatusPolicy::PreserveTerminal).await;
    let (project_id, _, task_id) = project_with_task(&tracker).await;

    let project = tracker
        .update_project(&UpdateProject {
            id: project_id,
            status: Some("cancelled".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(project.status, ProjectStatus::Cancelled);

    let updated = set_task(&tracker, task_id, "done").await;
    assert_eq!(updated.cascade.step().map(|c| c.to), Some(StepStatus::Completed));
    assert_eq!(updated.cascade.project, None);

    let refreshed = tracker
        .refresh_project_status(&Id { id: project_id })
        .await
        .unwrap();
    assert_eq!(refreshed.resource.status, ProjectStatus::Completed);
    assert_eq!(
        refreshed.cascade.project.map(|c| c.from),
        Some(ProjectStatus::Cancelled)
    );
}

#[tokio::test]
async fn test_manual_cancel_overwritten_when_always_deriving() {
    let (_temp_dir, tracker) = create_test_tracker(ManualStatusPolicy::AlwaysDerive).await;
    let (project_id, _, task_id) = project_with_task(&tracker).await;

    tracker
        .update_project(&UpdateProject {
            id: project_id,
            status: Some("cancelled".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let updated = set_task(&tracker, task_id, "blocked").await;
    assert_eq!(
        updated.cascade.project.map(|c| c.to),
        Some(ProjectStatus::Suspended)
    );
}

#[tokio::test]
async fn test_not_found_errors() {
    let (_temp_dir, tracker) = create_test_tracker(ManualStatusPolicy::default()).await;

    assert!(tracker.get_project(&Id { id: 9 }).await.unwrap().is_none());
    assert!(matches!(
        tracker.get_steps(&Id { id: 9 }).await.unwrap_err(),
        TrackerError::ProjectNotFound { id: 9 }
    ));
    assert!(matches!(
        tracker.get_tasks(&Id { id: 9 }).await.unwrap_err(),
        TrackerError::StepNotFound { id: 9 }
    ));
    assert!(matches!(
        tracker
            .update_task(&UpdateTask {
                id: 9,
                status: Some("done".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err(),
        TrackerError::TaskNotFound { id: 9 }
    ));
    assert!(matches!(
        tracker.remove_step(&Id { id: 9 }).await.unwrap_err(),
        TrackerError::StepNotFound { id: 9 }
    ));
    assert!(matches!(
        tracker
            .refresh_project_status(&Id { id: 9 })
            .await
            .unwrap_err(),
        TrackerError::ProjectNotFound { id: 9 }
    ));
}
