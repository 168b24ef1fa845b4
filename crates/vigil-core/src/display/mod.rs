//! Display formatting functions and result types.
//!
//! Domain models implement `Display` directly (in [`models`]); collections
//! and operation outcomes get newtype wrappers so empty collections and
//! success messages format consistently. All formatters produce markdown for
//! rich terminal rendering.
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (PlanSummaries, Notifications, StatusLog)
//! - [`results`]: Operation result types (CreateResult, DeleteResult, TransitionResult, SweepResult)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Notifications, PlanSummaries, StatusLog};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, SweepResult, TransitionResult};
pub use status::OperationStatus;
