//! Checklist task model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::TaskStatus;

/// An individual checklist item within an inspection plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChecklistTask {
    /// Unique identifier for the task
    pub id: u64,

    /// ID of the parent plan
    pub plan_id: u64,

    /// What the inspector has to check
    pub text: String,

    /// Current status of the task
    pub status: TaskStatus,

    /// Order of the task within the plan (0-indexed)
    pub position: u32,

    /// Timestamp when the task was created (UTC)
    pub created_at: Timestamp,
}
