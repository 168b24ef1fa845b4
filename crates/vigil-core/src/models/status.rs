//! Status enumerations for plans, reports, reschedule requests, and tasks.
//!
//! The original data set carried inspection statuses in a mix of Title-Case
//! and UPPER-CASE spellings. This module fixes one canonical casing and keeps
//! a normalization shim in the `FromStr` implementations so legacy spellings
//! ("SCHEDULED", "IN_PROGRESS", "Submitted") still parse.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of inspection plan lifecycle statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum InspectionStatus {
    /// Plan exists but has not been scheduled
    #[default]
    Planned,

    /// Plan has a confirmed inspection window
    Scheduled,

    /// Field visit is underway
    InProgress,

    /// Field work is finished, findings recorded
    Completed,

    /// Report has been handed to supervisors for review
    Submitted,

    /// Supervisor accepted the inspection (terminal)
    Approved,

    /// Supervisor sent the inspection back
    Rejected,

    /// Due date passed while the plan was still Planned or Scheduled
    Overdue,
}

impl FromStr for InspectionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Legacy records mix casings and separators; normalize before matching.
        match s.to_lowercase().replace(['_', '-', ' '], "").as_str() {
            "planned" | "plan" => Ok(InspectionStatus::Planned),
            "scheduled" => Ok(InspectionStatus::Scheduled),
            "inprogress" => Ok(InspectionStatus::InProgress),
            "completed" => Ok(InspectionStatus::Completed),
            "submitted" => Ok(InspectionStatus::Submitted),
            "approved" => Ok(InspectionStatus::Approved),
            "rejected" => Ok(InspectionStatus::Rejected),
            "overdue" => Ok(InspectionStatus::Overdue),
            _ => Err(format!("Invalid inspection status: {s}")),
        }
    }
}

impl InspectionStatus {
    /// Convert to the canonical string representation stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            InspectionStatus::Planned => "Planned",
            InspectionStatus::Scheduled => "Scheduled",
            InspectionStatus::InProgress => "InProgress",
            InspectionStatus::Completed => "Completed",
            InspectionStatus::Submitted => "Submitted",
            InspectionStatus::Approved => "Approved",
            InspectionStatus::Rejected => "Rejected",
            InspectionStatus::Overdue => "Overdue",
        }
    }

    /// The set of statuses this status may transition to.
    ///
    /// The overdue sweep bypasses this table; it force-sets Overdue on stale
    /// Planned/Scheduled plans.
    pub fn allowed_transitions(&self) -> &'static [InspectionStatus] {
        use InspectionStatus::*;
        match self {
            Planned => &[Scheduled, InProgress, Completed],
            Scheduled => &[InProgress, Planned, Completed],
            InProgress => &[Completed, Submitted],
            Completed => &[Approved, InProgress, Submitted],
            Submitted => &[Approved, Rejected],
            Approved => &[],
            Rejected => &[Submitted, InProgress],
            Overdue => &[InProgress, Completed],
        }
    }

    /// Whether the transition table permits moving to `target`.
    pub fn can_transition_to(&self, target: InspectionStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }

    /// Whether no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Whether only a supervisor may set this status.
    pub fn requires_supervisor(&self) -> bool {
        matches!(self, InspectionStatus::Approved | InspectionStatus::Rejected)
    }

    /// Whether a plan in this status may still be deleted.
    ///
    /// Plans are never hard-deleted past the early lifecycle stages.
    pub fn allows_delete(&self) -> bool {
        matches!(self, InspectionStatus::Planned | InspectionStatus::Scheduled)
    }

    /// Get status with consistent icon formatting for display.
    pub fn with_icon(&self) -> &'static str {
        match self {
            InspectionStatus::Planned => "○ Planned",
            InspectionStatus::Scheduled => "◷ Scheduled",
            InspectionStatus::InProgress => "➤ In Progress",
            InspectionStatus::Completed => "◉ Completed",
            InspectionStatus::Submitted => "↥ Submitted",
            InspectionStatus::Approved => "✓ Approved",
            InspectionStatus::Rejected => "✗ Rejected",
            InspectionStatus::Overdue => "! Overdue",
        }
    }
}

impl fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Acting role attached to a workflow operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Executes field visits and records findings
    Inspector,

    /// Assigns plans and reviews submitted reports
    Supervisor,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inspector" => Ok(Role::Inspector),
            "supervisor" => Ok(Role::Supervisor),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

impl Role {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Inspector => "inspector",
            Role::Supervisor => "supervisor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Risk classification of the inspected equipment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum RiskCategory {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl FromStr for RiskCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(RiskCategory::Low),
            "medium" => Ok(RiskCategory::Medium),
            "high" => Ok(RiskCategory::High),
            "critical" => Ok(RiskCategory::Critical),
            _ => Err(format!("Invalid risk category: {s}")),
        }
    }
}

impl RiskCategory {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Medium => "Medium",
            RiskCategory::High => "High",
            RiskCategory::Critical => "Critical",
        }
    }
}

/// Status of a reschedule request embedded in a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RescheduleStatus {
    /// Awaiting a supervisor decision
    Pending,

    /// Supervisor accepted the proposed window
    Approved,

    /// Supervisor declined; the plan keeps its current window
    Rejected,
}

impl FromStr for RescheduleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(RescheduleStatus::Pending),
            "approved" => Ok(RescheduleStatus::Approved),
            "rejected" => Ok(RescheduleStatus::Rejected),
            _ => Err(format!("Invalid reschedule status: {s}")),
        }
    }
}

impl RescheduleStatus {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RescheduleStatus::Pending => "pending",
            RescheduleStatus::Approved => "approved",
            RescheduleStatus::Rejected => "rejected",
        }
    }
}

/// Status of an inspection report, kept in best-effort sync with its plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ReportStatus {
    #[default]
    Draft,
    Submitted,
    Rejected,
    Approved,
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(ReportStatus::Draft),
            "submitted" => Ok(ReportStatus::Submitted),
            "rejected" => Ok(ReportStatus::Rejected),
            "approved" => Ok(ReportStatus::Approved),
            _ => Err(format!("Invalid report status: {s}")),
        }
    }
}

impl ReportStatus {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Draft => "Draft",
            ReportStatus::Submitted => "Submitted",
            ReportStatus::Rejected => "Rejected",
            ReportStatus::Approved => "Approved",
        }
    }
}

/// Status of a checklist task within a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Task has not been carried out yet
    #[default]
    Pending,

    /// Task has been carried out during the visit
    Completed,
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "completed" | "done" => Ok(TaskStatus::Completed),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

impl TaskStatus {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }

    /// Get status with consistent icon formatting for display.
    pub fn with_icon(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "○ Pending",
            TaskStatus::Completed => "✓ Completed",
        }
    }
}
