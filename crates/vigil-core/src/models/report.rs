//! Inspection report model, linked to a plan by ID.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::ReportStatus;

/// A photo-backed finding within a report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PhotoFinding {
    /// Stable URLs of the attached photos
    #[serde(default)]
    pub photo_urls: Vec<String>,

    /// What was observed
    pub finding: String,

    /// What should be done about it
    pub recommendation: String,
}

/// The finalized findings document produced from a completed plan.
///
/// The report carries its own status, kept in sync with the parent plan by an
/// explicit best-effort pass rather than a transactional guarantee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InspectionReport {
    /// Unique identifier for the report
    pub id: u64,

    /// ID of the plan this report belongs to
    pub plan_id: u64,

    /// Free-text findings summary
    pub findings: Option<String>,

    /// Ordered photo-backed findings
    #[serde(default)]
    pub photo_report: Vec<PhotoFinding>,

    /// Review status of the report
    #[serde(default)]
    pub status: ReportStatus,

    /// Timestamp when the report was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the report was last modified (UTC)
    pub updated_at: Timestamp,
}
