//! Inspection report CRUD. One report per plan, enforced by a UNIQUE
//! constraint on `plan_id`.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::utils::{column_enum, column_timestamp};
use crate::{
    error::{Result, WorkflowError},
    models::{InspectionReport, PhotoFinding, ReportStatus},
};

const INSERT_REPORT_SQL: &str = "INSERT INTO reports \
     (plan_id, findings, photo_report, status, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?5)";
const SELECT_REPORT_SQL: &str = "SELECT id, plan_id, findings, photo_report, status, \
     created_at, updated_at FROM reports WHERE plan_id = ?1";
const UPDATE_REPORT_SQL: &str = "UPDATE reports SET findings = ?1, photo_report = ?2, \
     updated_at = ?3 WHERE plan_id = ?4";
const UPDATE_REPORT_STATUS_SQL: &str = "UPDATE reports SET status = ?1, updated_at = ?2 \
     WHERE plan_id = ?3";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";

fn report_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<InspectionReport> {
    let photo_json: String = row.get(3)?;
    let photo_report: Vec<PhotoFinding> = serde_json::from_str(&photo_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(InspectionReport {
        id: row.get::<_, i64>(0)? as u64,
        plan_id: row.get::<_, i64>(1)? as u64,
        findings: row.get(2)?,
        photo_report,
        status: column_enum::<ReportStatus>(4, row.get(4)?)?,
        created_at: column_timestamp(5, row.get(5)?)?,
        updated_at: column_timestamp(6, row.get(6)?)?,
    })
}

impl super::Database {
    /// Creates a draft report for a plan.
    pub fn create_report(
        &mut self,
        plan_id: u64,
        findings: Option<&str>,
        photo_report: &[PhotoFinding],
    ) -> Result<InspectionReport> {
        let exists: bool = self
            .connection
            .query_row(CHECK_PLAN_EXISTS_SQL, params![plan_id as i64], |row| {
                row.get(0)
            })
            .map_err(|e| WorkflowError::database_error("Failed to check plan existence", e))?;
        if !exists {
            return Err(WorkflowError::PlanNotFound { id: plan_id });
        }

        let photo_json = serde_json::to_string(photo_report)?;
        let now = Timestamp::now();
        self.connection
            .execute(
                INSERT_REPORT_SQL,
                params![
                    plan_id as i64,
                    findings,
                    photo_json,
                    ReportStatus::Draft.as_str(),
                    now.to_string()
                ],
            )
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(err, _)
                    if err.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    WorkflowError::invalid_input("report")
                        .with_reason(format!("Plan {plan_id} already has a report"))
                }
                other => WorkflowError::database_error("Failed to insert report", other),
            })?;

        Ok(InspectionReport {
            id: self.connection.last_insert_rowid() as u64,
            plan_id,
            findings: findings.map(Into::into),
            photo_report: photo_report.to_vec(),
            status: ReportStatus::Draft,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves the report attached to a plan.
    pub fn get_report(&self, plan_id: u64) -> Result<InspectionReport> {
        self.connection
            .prepare(SELECT_REPORT_SQL)
            .map_err(|e| WorkflowError::database_error("Failed to prepare query", e))?
            .query_row(params![plan_id as i64], report_from_row)
            .optional()
            .map_err(|e| WorkflowError::database_error("Failed to query report", e))?
            .ok_or(WorkflowError::ReportNotFound { plan_id })
    }

    /// Replaces the findings content of a plan's report.
    pub fn update_report(
        &mut self,
        plan_id: u64,
        findings: Option<&str>,
        photo_report: &[PhotoFinding],
    ) -> Result<InspectionReport> {
        let photo_json = serde_json::to_string(photo_report)?;
        let rows = self
            .connection
            .execute(
                UPDATE_REPORT_SQL,
                params![
                    findings,
                    photo_json,
                    Timestamp::now().to_string(),
                    plan_id as i64
                ],
            )
            .map_err(|e| WorkflowError::database_error("Failed to update report", e))?;

        if rows == 0 {
            return Err(WorkflowError::ReportNotFound { plan_id });
        }
        self.get_report(plan_id)
    }

    /// Moves a plan's report to a new review status.
    pub fn set_report_status(
        &mut self,
        plan_id: u64,
        status: ReportStatus,
    ) -> Result<InspectionReport> {
        let rows = self
            .connection
            .execute(
                UPDATE_REPORT_STATUS_SQL,
                params![status.as_str(), Timestamp::now().to_string(), plan_id as i64],
            )
            .map_err(|e| WorkflowError::database_error("Failed to update report status", e))?;

        if rows == 0 {
            return Err(WorkflowError::ReportNotFound { plan_id });
        }
        self.get_report(plan_id)
    }
}
