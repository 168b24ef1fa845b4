//! High-level workflow API for the inspection tracking system.
//!
//! [`Workflow`] is the central coordinator between interface layers and the
//! database. It owns the lifecycle rules (who may move a plan where), the
//! reschedule sub-workflow, report review with best-effort status sync, and
//! notification fan-out. Database access happens on blocking threads via
//! `tokio::task::spawn_blocking`, opening a fresh connection per operation.
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Workflow`] instances
//! - [`plan_ops`]: Plan and checklist CRUD
//! - [`lifecycle`]: Status transitions and the overdue sweep
//! - [`reschedule`]: The reschedule request sub-workflow
//! - [`report_ops`]: Report creation and review
//! - [`notify`]: Notification dispatch and user management
//! - [`handlers`]: Display-formatted conveniences for interactive frontends

use std::path::PathBuf;

use crate::events::ChangeFeed;

pub mod builder;
pub mod handlers;
pub mod lifecycle;
pub mod notify;
pub mod plan_ops;
pub mod report_ops;
pub mod reschedule;

#[cfg(test)]
mod tests;

pub use builder::WorkflowBuilder;

/// Main workflow interface for managing inspection plans.
pub struct Workflow {
    pub(crate) db_path: PathBuf,
    pub(crate) feed: ChangeFeed,
}

impl Workflow {
    /// Creates a new workflow with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self {
            db_path,
            feed: ChangeFeed::new(),
        }
    }

    /// Returns the change feed for subscribing to store events.
    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }
}
