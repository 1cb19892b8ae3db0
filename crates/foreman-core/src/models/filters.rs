//! Filter types for querying projects.

use super::ProjectStatus;
use crate::{
    error::TrackerError,
    params::{parse_status, ListProjects},
};

/// Filter options for querying projects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    /// Filter by project title (case-insensitive partial match)
    pub title_contains: Option<String>,

    /// Only projects of this client
    pub client_id: Option<u64>,

    /// Only projects in this status
    pub status: Option<ProjectStatus>,
}

impl ProjectFilter {
    /// Whether the filter restricts anything at all.
    pub fn is_empty(&self) -> bool {
        self.title_contains.is_none() && self.client_id.is_none() && self.status.is_none()
    }
}

impl TryFrom<&ListProjects> for ProjectFilter {
    type Error = TrackerError;

    /// Build a filter from list parameters, validating the status string.
    ///
    /// ```rust
    /// use foreman_core::{models::{ProjectFilter, ProjectStatus}, params::ListProjects};
    ///
    /// let params = ListProjects {
    ///     status: Some("in_progress".to_string()),
    ///     ..Default::default()
    /// };
    /// let filter = ProjectFilter::try_from(&params)?;
    /// assert_eq!(filter.status, Some(ProjectStatus::InProgress));
    /// # Ok::<(), foreman_core::TrackerError>(())
    /// ```
    fn try_from(params: &ListProjects) -> Result<Self, Self::Error> {
        Ok(Self {
            title_contains: params.title.clone(),
            client_id: params.client_id,
            status: parse_status(params.status.as_deref())?,
        })
    }
}
