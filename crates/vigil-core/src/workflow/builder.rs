//! Builder for creating and configuring Workflow instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Workflow;
use crate::{
    db::Database,
    error::{Result, WorkflowError},
};

/// Builder for creating and configuring Workflow instances.
#[derive(Debug, Clone)]
pub struct WorkflowBuilder {
    database_path: Option<PathBuf>,
}

impl WorkflowBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/vigil/vigil.db` or `~/.local/share/vigil/vigil.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured workflow instance.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::FileSystem` if the database path is invalid
    /// Returns `WorkflowError::Database` if database initialization fails
    pub async fn build(self) -> Result<Workflow> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| WorkflowError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), WorkflowError>(())
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(Workflow::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("vigil")
            .place_data_file("vigil.db")
            .map_err(|e| WorkflowError::XdgDirectory(e.to_string()))
    }
}

impl Default for WorkflowBuilder {
    fn default() -> Self {
        Self::new()
    }
}
