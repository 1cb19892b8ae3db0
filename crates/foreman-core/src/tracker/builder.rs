//! Builder for creating and configuring Tracker instances.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    error::{Result, TrackerError},
    propagation::ManualStatusPolicy,
};

/// Builder for creating and configuring Tracker instances.
#[derive(Debug, Clone, Default)]
pub struct TrackerBuilder {
    database_path: Option<PathBuf>,
    policy: ManualStatusPolicy,
}

impl TrackerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/foreman/foreman.db` or `~/.local/share/foreman/foreman.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets what cascades do with a manually cancelled project.
    pub fn with_manual_status_policy(mut self, policy: ManualStatusPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the configured tracker, creating the database file and schema
    /// when missing.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::FileSystem` if the database directory cannot be
    /// created, `TrackerError::XdgDirectory` if no default location exists and
    /// `TrackerError::Database` if schema initialization fails.
    pub async fn build(self) -> Result<Tracker> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| TrackerError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || Database::new(&db_path_clone).map(drop))
            .await
            .map_err(TrackerError::join)??;

        debug!(
            "Using database {} with the {} policy",
            db_path.display(),
            self.policy
        );

        Ok(Tracker::new(db_path, self.policy))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("foreman")
            .place_data_file("foreman.db")
            .map_err(|e| TrackerError::XdgDirectory(e.to_string()))
    }
}
