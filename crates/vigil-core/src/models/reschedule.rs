//! Reschedule request model, embedded in an inspection plan.

use jiff::civil::Date;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::RescheduleStatus;

/// A request to move a plan's inspection window, subject to supervisor
/// approval.
///
/// At most one pending request exists per plan; the store rejects a second
/// request atomically rather than relying on a caller-side check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RescheduleRequest {
    /// Proposed first day of the new window
    pub start_date: Date,

    /// Proposed last day of the new window
    pub end_date: Date,

    /// Inspector's justification for the move
    pub reason: String,

    /// Identity of the requesting user
    pub requested_by: String,

    /// Current state of the request
    pub status: RescheduleStatus,

    /// Timestamp when the request was filed (UTC)
    pub requested_at: Timestamp,

    /// Supervisor's reason, set when the request is rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}
