//! Filter types for querying inspection plans.

use jiff::civil::Date;

use super::InspectionStatus;

/// Filter options for querying plans.
#[derive(Debug, Clone, Default)]
pub struct PlanFilter {
    /// Filter by plan title (case-insensitive partial match)
    pub title_contains: Option<String>,

    /// Filter by primary assignee identity (exact match)
    pub inspector: Option<String>,

    /// Filter by equipment identifier (exact match)
    pub equipment_id: Option<String>,

    /// Filter by lifecycle status
    pub status: Option<InspectionStatus>,

    /// Only plans whose due date is on or before this day
    pub due_before: Option<Date>,

    /// Only plans with a pending reschedule request
    pub pending_reschedule: bool,
}

impl From<&crate::params::ListPlans> for PlanFilter {
    fn from(params: &crate::params::ListPlans) -> Self {
        Self {
            status: params.status,
            inspector: params.inspector.clone(),
            pending_reschedule: params.pending_reschedule,
            ..Default::default()
        }
    }
}
