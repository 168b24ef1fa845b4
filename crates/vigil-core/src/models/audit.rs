//! Append-only status audit trail.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::InspectionStatus;

/// One row of the append-only status audit trail, written per transition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusLogEntry {
    /// Unique identifier for the log entry
    pub id: u64,

    /// ID of the plan whose status changed
    pub plan_id: u64,

    /// Status before the transition
    pub old_status: InspectionStatus,

    /// Status after the transition
    pub new_status: InspectionStatus,

    /// Display name of the user who made the change
    pub changed_by: String,

    /// Timestamp of the transition (UTC)
    pub timestamp: Timestamp,
}
