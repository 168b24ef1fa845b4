//! Core library for the Vigil inspection tracking application.
//!
//! This crate provides the business logic for pressure vessel inspection
//! plans: the lifecycle state machine with its audit trail, the reschedule
//! sub-workflow, report review, notification dispatch, session checks, and
//! the SQLite-backed store behind all of it.
//!
//! # Display Architecture
//!
//! The crate implements a Display-based architecture for formatting output:
//!
//! - **Domain Models** ([`models`]): Implement [`std::fmt::Display`] for direct
//!   formatting
//! - **Display Wrappers** ([`display`]): Provide contextual and specialized
//!   formatting
//! - **Terminal Rendering**: Rich markdown output via the CLI's terminal
//!   renderer
//!
//! # Quick Start
//!
//! ```rust
//! use vigil_core::{WorkflowBuilder, params::CreatePlan};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let workflow = WorkflowBuilder::new()
//!     .with_database_path(Some("vigil.db"))
//!     .build()
//!     .await?;
//!
//! let create_params = CreatePlan {
//!     title: "Vessel V-201 internal".to_string(),
//!     equipment_id: "V-201".to_string(),
//!     inspector: "alice".to_string(),
//!     start: "2026-09-01".to_string(),
//!     end: "2026-09-03".to_string(),
//!     ..Default::default()
//! };
//!
//! let plan = workflow.create_plan(&create_params).await?;
//! println!("Created plan: {}", plan);
//!
//! // List plans as summaries
//! use vigil_core::params::ListPlans;
//! let plans = workflow.list_plans_summary(&ListPlans::default()).await?;
//! for plan in &plans {
//!     println!("Plan: {}", plan.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod events;
pub mod models;
pub mod params;
pub mod session;
pub mod workflow;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, Notifications, OperationStatus, PlanSummaries, StatusLog,
    SweepResult, TransitionResult,
};
pub use error::{Result, WorkflowError};
pub use events::{ChangeFeed, StoreEvent};
pub use models::{
    ChecklistTask, InspectionPlan, InspectionReport, InspectionStatus, Notification,
    NotificationKind, PlanFilter, PlanSummary, ReportStatus, RescheduleRequest, RescheduleStatus,
    RiskCategory, Role, StatusLogEntry, TaskStatus, UserProfile,
};
pub use params::{
    AddUser, CreatePlan, CreateReport, DeletePlan, Id, ListNotifications, ListPlans,
    RequestReschedule, ResolveReschedule, ReviewReport, TaskCreate, TransitionPlan, UpdateTask,
};
pub use session::{SessionGuard, SessionVerdict, SESSION_TIMEOUT};
pub use workflow::{Workflow, WorkflowBuilder};
