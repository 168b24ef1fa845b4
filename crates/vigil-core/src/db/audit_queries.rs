//! Status audit trail reads. Appends happen inside the same transaction as
//! the status change itself, over in plan and reschedule queries.

use rusqlite::params;

use super::utils::{column_enum, column_timestamp};
use crate::{
    error::{DatabaseResultExt, Result, WorkflowError},
    models::{InspectionStatus, StatusLogEntry},
};

const SELECT_STATUS_LOG_SQL: &str = "SELECT id, plan_id, old_status, new_status, changed_by, \
     changed_at FROM status_log WHERE plan_id = ?1 ORDER BY id ASC";

fn log_entry_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StatusLogEntry> {
    Ok(StatusLogEntry {
        id: row.get::<_, i64>(0)? as u64,
        plan_id: row.get::<_, i64>(1)? as u64,
        old_status: column_enum::<InspectionStatus>(2, row.get(2)?)?,
        new_status: column_enum::<InspectionStatus>(3, row.get(3)?)?,
        changed_by: row.get(4)?,
        timestamp: column_timestamp(5, row.get(5)?)?,
    })
}

impl super::Database {
    /// Returns the full status history of a plan in insertion order.
    pub fn list_status_log(&self, plan_id: u64) -> Result<Vec<StatusLogEntry>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_STATUS_LOG_SQL)
            .map_err(|e| WorkflowError::database_error("Failed to prepare query", e))?;

        let entries = stmt
            .query_map(params![plan_id as i64], log_entry_from_row)
            .map_err(|e| WorkflowError::database_error("Failed to query status log", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch status log")?;
        Ok(entries)
    }
}
