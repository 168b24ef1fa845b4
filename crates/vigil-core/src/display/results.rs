//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{
    ChecklistTask, InspectionPlan, InspectionReport, InspectionStatus, RescheduleRequest,
};

/// Wrapper type for displaying the result of create operations.
///
/// Formats a success message with the resource ID followed by the full
/// resource details.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<InspectionPlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created plan with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<ChecklistTask> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Added task with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<InspectionReport> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created report with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<RescheduleRequest> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Filed reschedule request")?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<InspectionPlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted plan '{}' (ID: {})",
            self.resource.title, self.resource.id
        )
    }
}

/// Outcome of a lifecycle transition, including the idempotent no-op case.
pub struct TransitionResult {
    pub plan_id: u64,
    pub previous: Option<InspectionStatus>,
    pub target: InspectionStatus,
}

impl fmt::Display for TransitionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.previous {
            Some(old) => writeln!(
                f,
                "Moved plan {}: {} -> {}",
                self.plan_id, old, self.target
            ),
            None => writeln!(
                f,
                "Plan {} is already {}; nothing to do.",
                self.plan_id, self.target
            ),
        }
    }
}

/// Outcome of an overdue sweep.
pub struct SweepResult(pub Vec<(u64, InspectionStatus)>);

impl fmt::Display for SweepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans are overdue.");
        }
        writeln!(f, "Marked {} plan(s) overdue:", self.0.len())?;
        for (plan_id, old) in &self.0 {
            writeln!(f, "- Plan {plan_id} (was {old})")?;
        }
        Ok(())
    }
}
