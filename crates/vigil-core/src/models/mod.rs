//! Data models for the inspection tracking domain.
//!
//! This module contains the core domain models: inspection plans with their
//! checklist tasks and embedded reschedule requests, finalized reports, the
//! append-only status audit trail, notifications, and user profiles. Display
//! implementations live in [`crate::display::models`] to keep data structures
//! separate from presentation logic.

pub mod audit;
pub mod filters;
pub mod notification;
pub mod plan;
pub mod report;
pub mod requests;
pub mod reschedule;
pub mod status;
pub mod summary;
pub mod task;
pub mod user;


// Re-export all public types at the models level
pub use audit::StatusLogEntry;
pub use filters::PlanFilter;
pub use notification::{Notification, NotificationKind};
pub use plan::InspectionPlan;
pub use report::{InspectionReport, PhotoFinding};
pub use requests::{NewPlan, ScheduleWindow};
pub use reschedule::RescheduleRequest;
pub use status::{
    InspectionStatus, ReportStatus, RescheduleStatus, RiskCategory, Role, TaskStatus,
};
pub use summary::PlanSummary;
pub use task::ChecklistTask;
pub use user::UserProfile;
