//! Plan summary types and functionality.

use jiff::civil::Date;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{InspectionPlan, InspectionStatus, RiskCategory, TaskStatus};

/// Summary information about a plan with checklist statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Plan ID
    pub id: u64,
    /// Title of the inspection assignment
    pub title: String,
    /// Equipment under inspection
    pub equipment_id: String,
    /// Primary assignee
    pub inspector: String,
    /// Risk classification
    pub risk_category: RiskCategory,
    /// Lifecycle status
    pub status: InspectionStatus,
    /// First day of the inspection window
    pub start: Date,
    /// Last day of the inspection window
    pub end: Date,
    /// Deadline after which the plan goes overdue
    pub due_date: Date,
    /// Whether a reschedule request is awaiting a decision
    pub has_pending_reschedule: bool,
    /// Total number of checklist tasks
    pub total_tasks: u32,
    /// Number of completed checklist tasks
    pub completed_tasks: u32,
    /// Creation timestamp
    pub created_at: Timestamp,
}

impl PlanSummary {
    /// Create a PlanSummary from a plan and task counts.
    pub fn from_plan(plan: InspectionPlan, total_tasks: u32, completed_tasks: u32) -> Self {
        let has_pending_reschedule = plan.has_pending_reschedule();
        Self {
            id: plan.id,
            title: plan.title,
            equipment_id: plan.equipment_id,
            inspector: plan.inspector,
            risk_category: plan.risk_category,
            status: plan.status,
            start: plan.start,
            end: plan.end,
            due_date: plan.due_date,
            has_pending_reschedule,
            total_tasks,
            completed_tasks,
            created_at: plan.created_at,
        }
    }
}

impl From<&InspectionPlan> for PlanSummary {
    fn from(plan: &InspectionPlan) -> Self {
        let total_tasks = plan.tasks.len() as u32;
        let completed_tasks = plan
            .tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Completed)
            .count() as u32;

        Self {
            id: plan.id,
            title: plan.title.clone(),
            equipment_id: plan.equipment_id.clone(),
            inspector: plan.inspector.clone(),
            risk_category: plan.risk_category,
            status: plan.status,
            start: plan.start,
            end: plan.end,
            due_date: plan.due_date,
            has_pending_reschedule: plan.has_pending_reschedule(),
            total_tasks,
            completed_tasks,
            created_at: plan.created_at,
        }
    }
}
