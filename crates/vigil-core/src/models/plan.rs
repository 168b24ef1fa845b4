//! Inspection plan model definition and related functionality.

use jiff::civil::Date;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ChecklistTask, InspectionStatus, RescheduleRequest, RiskCategory};

/// Represents a complete inspection plan with schedule, checklist, and
/// lifecycle status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InspectionPlan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Title of the inspection assignment
    pub title: String,

    /// Identifier of the pressure vessel or equipment under inspection
    pub equipment_id: String,

    /// Site or facility location of the equipment
    pub location: Option<String>,

    /// Risk classification of the equipment
    #[serde(default)]
    pub risk_category: RiskCategory,

    /// Kind of inspection (visual, ultrasonic, hydrostatic, ...)
    pub inspection_type: Option<String>,

    /// Identity of the primary assignee
    pub inspector: String,

    /// Redundant list form of assignees, kept for multi-assignee display
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inspectors: Vec<String>,

    /// First day of the inspection window
    pub start: Date,

    /// Last day of the inspection window
    pub end: Date,

    /// Deadline after which the plan goes overdue (defaults to `end`)
    pub due_date: Date,

    /// Lifecycle status of the plan
    #[serde(default)]
    pub status: InspectionStatus,

    /// Free-text result recorded at completion time
    pub outcome: Option<String>,

    /// Active or resolved reschedule request, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reschedule_request: Option<RescheduleRequest>,

    /// Ordered checklist of tasks for the field visit (lazy-loaded by default)
    #[serde(default)]
    pub tasks: Vec<ChecklistTask>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}

impl InspectionPlan {
    /// Whether the plan has a reschedule request awaiting a decision.
    pub fn has_pending_reschedule(&self) -> bool {
        self.reschedule_request
            .as_ref()
            .is_some_and(|r| r.status == super::RescheduleStatus::Pending)
    }
}
