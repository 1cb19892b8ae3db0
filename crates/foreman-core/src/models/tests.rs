#[cfg(test)]
mod model_tests {
    use jiff::Timestamp;

    use crate::{
        models::{
            Project, ProjectStatus, ProjectSummary, Step, StepStatus, Task, TaskStatus,
            UpdateProjectRequest, UpdateStepRequest, UpdateTaskRequest,
        },
        params::{UpdateProject, UpdateStep, UpdateTask},
        TrackerError,
    };

    fn ts() -> Timestamp {
        Timestamp::from_second(1_640_995_200).unwrap() // 2022-01-01 00:00:00 UTC
    }

    fn task(id: u64, step_id: u64, status: TaskStatus) -> Task {
        Task {
            id,
            step_id,
            title: format!("Task {id}"),
            description: None,
            status,
            created_by: "morgan".to_string(),
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn step(id: u64, status: StepStatus, tasks: Vec<Task>) -> Step {
        Step {
            id,
            project_id: 1,
            title: format!("Step {id}"),
            description: None,
            status,
            order: id as u32,
            created_at: ts(),
            updated_at: ts(),
            tasks,
        }
    }

    fn project(steps: Vec<Step>) -> Project {
        Project {
            id: 1,
            client_id: None,
            title: "Townhouse".to_string(),
            description: Some("Full refurbishment".to_string()),
            address: None,
            status: ProjectStatus::InProgress,
            created_at: ts(),
            updated_at: ts(),
            steps,
        }
    }

    #[test]
    fn test_new_entities_start_in_initial_status() {
        assert_eq!(TaskStatus::default(), TaskStatus::Todo);
        assert_eq!(StepStatus::default(), StepStatus::Pending);
        assert_eq!(ProjectStatus::default(), ProjectStatus::Draft);
    }

    #[test]
    fn test_statuses_serialize_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::from_str::<StepStatus>("\"blocked\"").unwrap(),
            StepStatus::Blocked
        );
        assert!(serde_json::from_str::<ProjectStatus>("\"archived\"").is_err());
    }

    #[test]
    fn test_status_parsing_is_lenient_about_spelling() {
        assert_eq!("IN_PROGRESS".parse::<StepStatus>(), Ok(StepStatus::InProgress));
        assert_eq!("Review".parse::<TaskStatus>(), Ok(TaskStatus::Review));
        assert_eq!("canceled".parse::<ProjectStatus>(), Ok(ProjectStatus::Cancelled));
        assert_eq!(
            "finished".parse::<TaskStatus>(),
            Err("Invalid task status: finished".to_string())
        );
    }

    #[test]
    fn test_as_str_parses_back() {
        for status in TaskStatus::ALL {
            assert_eq!(status.as_str().parse::<TaskStatus>(), Ok(status));
        }
        for status in StepStatus::ALL {
            assert_eq!(status.as_str().parse::<StepStatus>(), Ok(status));
        }
        for status in ProjectStatus::ALL {
            assert_eq!(status.as_str().parse::<ProjectStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_only_cancelled_is_terminal() {
        let terminal: Vec<_> = ProjectStatus::ALL
            .into_iter()
            .filter(ProjectStatus::is_terminal)
            .collect();
        assert_eq!(terminal, vec![ProjectStatus::Cancelled]);
    }

    #[test]
    fn test_summary_counts_steps_and_tasks() {
        let project = project(vec![
            step(
                1,
                StepStatus::Completed,
                vec![task(1, 1, TaskStatus::Done), task(2, 1, TaskStatus::Done)],
            ),
            step(
                2,
                StepStatus::InProgress,
                vec![task(3, 2, TaskStatus::Review), task(4, 2, TaskStatus::Done)],
            ),
            step(3, StepStatus::Pending, vec![]),
        ]);

        let summary = ProjectSummary::from(&project);

        assert_eq!(summary.total_steps, 3);
        assert_eq!(summary.completed_steps, 1);
        assert_eq!(summary.total_tasks, 4);
        assert_eq!(summary.done_tasks, 3);
        assert_eq!(summary.task_progress(), Some(0.75));
        assert_eq!(summary.description.as_deref(), Some("Full refurbishment"));
    }

    #[test]
    fn test_summary_without_tasks_has_no_progress() {
        assert_eq!(ProjectSummary::from(&project(vec![])).task_progress(), None);
    }

    #[test]
    fn test_empty_children_are_not_serialized() {
        let json = serde_json::to_value(project(vec![])).unwrap();
        assert!(json.get("steps").is_none());
        assert_eq!(json["status"], "in_progress");

        let json = serde_json::to_value(step(1, StepStatus::Pending, vec![])).unwrap();
        assert!(json.get("tasks").is_none());
    }

    #[test]
    fn test_update_requests_parse_statuses() {
        let request = UpdateTaskRequest::try_from(UpdateTask {
            id: 1,
            status: Some("DONE".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(request.status, Some(TaskStatus::Done));
        assert!(request.has_changes());

        let request = UpdateProjectRequest::try_from(UpdateProject {
            id: 1,
            status: Some("cancelled".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(request.status, Some(ProjectStatus::Cancelled));
    }

    #[test]
    fn test_update_request_rejects_status_of_other_level() {
        let error = UpdateStepRequest::try_from(UpdateStep {
            id: 1,
            status: Some("done".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(error, TrackerError::InvalidInput { ref field, .. } if field == "status"));
    }

    #[test]
    fn test_empty_update_has_no_changes() {
        assert!(!UpdateStepRequest::default().has_changes());
        assert!(!UpdateTaskRequest::default().has_changes());
        assert!(!UpdateProjectRequest::default().has_changes());
        assert!(UpdateProjectRequest {
            address: Some(Some("1 Main St".to_string())),
            ..Default::default()
        }
        .has_changes());
    }

    #[test]
    fn test_blank_text_clears_optional_fields() {
        let request = UpdateProjectRequest::try_from(UpdateProject {
            id: 1,
            description: Some("  ".to_string()),
            address: Some("2 Quay Road".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(request.description, Some(None));
        assert_eq!(request.address, Some(Some("2 Quay Road".to_string())));
        assert!(request.has_changes());

        let request = UpdateTaskRequest::try_from(UpdateTask {
            id: 1,
            description: Some(String::new()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(request.description, Some(None));

        let request = UpdateStepRequest::try_from(UpdateStep {
            id: 1,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(request.description, None);
    }
}
