//! Validated request payloads passed from the workflow layer to the store.

use jiff::civil::Date;

use super::RiskCategory;

/// Fully validated data for creating an inspection plan.
///
/// Produced by [`crate::params::CreatePlan::validate`]; dates are already
/// parsed and `due_date` has been defaulted to `end` when absent.
#[derive(Debug, Clone)]
pub struct NewPlan {
    pub title: String,
    pub equipment_id: String,
    pub location: Option<String>,
    pub risk_category: RiskCategory,
    pub inspection_type: Option<String>,
    pub inspector: String,
    pub inspectors: Vec<String>,
    pub start: Date,
    pub end: Date,
    pub due_date: Date,
}

/// Validated reschedule window from a request or a supervisor override.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleWindow {
    pub start: Date,
    pub end: Date,
}
