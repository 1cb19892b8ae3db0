//! Display implementations for domain models.
//!
//! All implementations produce markdown: the CLI renders it with termimad and
//! the MCP server returns it as text content.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    models::{Client, Project, ProjectStatus, ProjectSummary, Step, StepStatus, Task, TaskStatus},
    propagation::{CascadeOutcome, StatusChange},
};

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        if let Some(email) = &self.email {
            writeln!(f, "- **Email**: {email}")?;
        }
        if let Some(phone) = &self.phone {
            writeln!(f, "- **Phone**: {phone}")?;
        }
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- Status: {}", self.status.with_icon())?;
        if let Some(client_id) = self.client_id {
            writeln!(f, "- Client: {client_id}")?;
        }
        if let Some(address) = &self.address {
            writeln!(f, "- Address: {address}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if self.steps.is_empty() {
            writeln!(f, "\nNo steps in this project.")?;
        } else {
            writeln!(f, "\n## Steps")?;
            writeln!(f)?;
            for step in &self.steps {
                write!(f, "{step}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.id,
            self.title,
            self.status.with_icon()
        )?;
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "{desc}")?;
            writeln!(f)?;
        }

        for task in &self.tasks {
            writeln!(f, "- {task}")?;
        }
        if !self.tasks.is_empty() {
            writeln!(f)?;
        }

        Ok(())
    }
}

/// One line per task, used inside step listings.
impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} ({}) by {}",
            self.id,
            self.title,
            self.status.with_icon(),
            self.created_by
        )?;
        if let Some(desc) = &self.description {
            write!(f, ": {desc}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ProjectSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.total_steps > 0 {
            format!(" ({}/{})", self.completed_steps, self.total_steps)
        } else {
            String::new()
        };

        writeln!(f, "## {} (ID: {}){progress}", self.title, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Status**: {}", self.status.with_icon())?;

        if let Some(desc) = &self.description {
            writeln!(f, "- **Description**: {desc}")?;
        }
        if let Some(address) = &self.address {
            writeln!(f, "- **Address**: {address}")?;
        }
        if let Some(progress) = self.task_progress() {
            writeln!(
                f,
                "- **Tasks**: {}/{} done ({:.0}%)",
                self.done_tasks,
                self.total_tasks,
                progress * 100.0
            )?;
        }

        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}

impl<S: fmt::Display> fmt::Display for StatusChange<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

impl fmt::Display for CascadeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_noop() {
            return writeln!(f, "No status changes.");
        }
        for change in &self.steps {
            writeln!(f, "- Step {}: {change}", change.id)?;
        }
        if let Some(change) = &self.project {
            writeln!(f, "- Project {}: {change}", change.id)?;
        }
        Ok(())
    }
}
