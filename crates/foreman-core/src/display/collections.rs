//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper formats its items with their own `Display` implementation and
//! prints a fixed message for an empty collection.

use std::{fmt, ops::Index};

use serde::Serialize;

use crate::models::{Client, ProjectSummary, Step, Task};

macro_rules! collection {
    ($(#[$meta:meta])* $name:ident, $item:ty, $empty:literal, $separator:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub Vec<$item>);

        impl $name {
            /// Check if the collection is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Number of items in the collection.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Get a reference to the item at the given index.
            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            /// Iterate over the items.
            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $name {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<$item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.0.is_empty() {
                    return writeln!(f, $empty);
                }
                for item in &self.0 {
                    write!(f, concat!("{}", $separator), item)?;
                }
                Ok(())
            }
        }
    };
}

collection!(
    /// Project summaries as returned by the project listing.
    ///
    /// ```rust
    /// use foreman_core::{
    ///     display::ProjectSummaries,
    ///     models::{ProjectStatus, ProjectSummary},
    /// };
    /// use jiff::Timestamp;
    ///
    /// let summary = ProjectSummary {
    ///     id: 1,
    ///     client_id: None,
    ///     title: "Loft conversion".to_string(),
    ///     description: None,
    ///     address: None,
    ///     status: ProjectStatus::Draft,
    ///     created_at: Timestamp::now(),
    ///     updated_at: Timestamp::now(),
    ///     total_steps: 0,
    ///     completed_steps: 0,
    ///     total_tasks: 0,
    ///     done_tasks: 0,
    /// };
    /// let output = ProjectSummaries(vec![summary]).to_string();
    /// assert!(output.contains("## Loft conversion (ID: 1)"));
    /// ```
    ProjectSummaries,
    ProjectSummary,
    "No projects found.",
    ""
);

collection!(
    /// Clients ordered by name.
    Clients,
    Client,
    "No clients found.",
    ""
);

collection!(
    /// Steps of one project, each with its tasks.
    Steps,
    Step,
    "No steps found.",
    ""
);

collection!(
    /// Tasks of one step as a markdown list.
    Tasks,
    Task,
    "No tasks found.",
    "\n"
);

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::{StepStatus, TaskStatus};

    fn ts() -> Timestamp {
        Timestamp::from_second(1_640_995_200).unwrap()
    }

    fn step(id: u64, status: StepStatus) -> Step {
        Step {
            id,
            project_id: 1,
            title: format!("Step {id}"),
            description: None,
            status,
            order: id as u32,
            created_at: ts(),
            updated_at: ts(),
            tasks: vec![],
        }
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(ProjectSummaries(vec![]).to_string(), "No projects found.\n");
        assert_eq!(Clients(vec![]).to_string(), "No clients found.\n");
        assert_eq!(Steps(vec![]).to_string(), "No steps found.\n");
        assert_eq!(Tasks(vec![]).to_string(), "No tasks found.\n");
    }

    #[test]
    fn test_steps_display_multiple_steps() {
        let steps = Steps(vec![step(1, StepStatus::Pending), step(2, StepStatus::Completed)]);
        let output = steps.to_string();

        assert!(output.contains("### 1. Step 1 (○ Pending)"));
        assert!(output.contains("### 2. Step 2 (✓ Completed)"));
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].id, 2);
    }

    #[test]
    fn test_tasks_display_one_line_each() {
        let task = Task {
            id: 5,
            step_id: 1,
            title: "Pour slab".to_string(),
            description: None,
            status: TaskStatus::Review,
            created_by: "lee".to_string(),
            created_at: ts(),
            updated_at: ts(),
        };
        let mut second = task.clone();
        second.id = 6;

        let output = Tasks(vec![task, second]).to_string();
        assert_eq!(
            output,
            "5. Pour slab (◎ Review) by lee\n6. Pour slab (◎ Review) by lee\n"
        );
    }

    #[test]
    fn test_collections_serialize_as_arrays() {
        let json = serde_json::to_value(Steps(vec![step(1, StepStatus::Blocked)])).unwrap();
        assert_eq!(json[0]["status"], "blocked");
    }
}
