//! Reschedule request operations embedded in the plans table.
//!
//! Keeping the request columns on the plan row lets the one-pending-request
//! invariant ride on a single conditional UPDATE instead of a caller-side
//! check-then-act sequence.

use jiff::civil::Date;
use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::utils::{column_date, column_enum, column_timestamp};
use crate::{
    error::{DatabaseResultExt, Result, WorkflowError},
    models::{InspectionStatus, RescheduleRequest, RescheduleStatus},
};

const REQUEST_RESCHEDULE_SQL: &str = "UPDATE plans SET \
     resched_start = ?1, resched_end = ?2, resched_reason = ?3, resched_requested_by = ?4, \
     resched_status = 'pending', resched_requested_at = ?5, resched_rejection_reason = NULL, \
     updated_at = ?6 \
     WHERE id = ?7 AND (resched_status IS NULL OR resched_status <> 'pending')";
const REJECT_RESCHEDULE_SQL: &str = "UPDATE plans SET \
     resched_status = 'rejected', resched_rejection_reason = ?1, updated_at = ?2 \
     WHERE id = ?3 AND resched_status = 'pending'";
const CANCEL_RESCHEDULE_SQL: &str = "UPDATE plans SET \
     resched_start = NULL, resched_end = NULL, resched_reason = NULL, \
     resched_requested_by = NULL, resched_status = NULL, resched_requested_at = NULL, \
     resched_rejection_reason = NULL, updated_at = ?1 \
     WHERE id = ?2";
const SELECT_RESCHEDULE_SQL: &str = "SELECT resched_start, resched_end, resched_reason, \
     resched_requested_by, resched_status, resched_requested_at, resched_rejection_reason, status \
     FROM plans WHERE id = ?1";
const APPROVE_RESCHEDULE_SQL: &str = "UPDATE plans SET \
     start_date = ?1, end_date = ?2, due_date = ?2, status = ?3, \
     resched_status = 'approved', updated_at = ?4 \
     WHERE id = ?5 AND resched_status = 'pending'";
const APPROVE_RESCHEDULE_REASSIGN_SQL: &str = "UPDATE plans SET \
     start_date = ?1, end_date = ?2, due_date = ?2, status = ?3, inspector = ?4, \
     resched_status = 'approved', updated_at = ?5 \
     WHERE id = ?6 AND resched_status = 'pending'";
const INSERT_STATUS_LOG_SQL: &str = "INSERT INTO status_log \
     (plan_id, old_status, new_status, changed_by, changed_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";

/// Reschedule columns with the plan's own status appended.
type RescheduleRow = (Option<RescheduleRequest>, InspectionStatus);

fn reschedule_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RescheduleRow> {
    let request = match row.get::<_, Option<String>>(4)? {
        Some(status) => Some(RescheduleRequest {
            start_date: column_date(0, row.get(0)?)?,
            end_date: column_date(1, row.get(1)?)?,
            reason: row.get(2)?,
            requested_by: row.get(3)?,
            status: column_enum::<RescheduleStatus>(4, status)?,
            requested_at: column_timestamp(5, row.get(5)?)?,
            rejection_reason: row.get(6)?,
        }),
        None => None,
    };
    let plan_status = column_enum::<InspectionStatus>(7, row.get(7)?)?;
    Ok((request, plan_status))
}

impl super::Database {
    /// Reads the reschedule request (if any) and the plan's own status.
    pub fn get_reschedule(&self, plan_id: u64) -> Result<RescheduleRow> {
        self.connection
            .prepare(SELECT_RESCHEDULE_SQL)
            .map_err(|e| WorkflowError::database_error("Failed to prepare query", e))?
            .query_row(params![plan_id as i64], reschedule_from_row)
            .optional()
            .map_err(|e| WorkflowError::database_error("Failed to query reschedule request", e))?
            .ok_or(WorkflowError::PlanNotFound { id: plan_id })
    }

    /// Files a reschedule request on a plan.
    ///
    /// The UPDATE carries the no-pending-request condition, so two rapid
    /// requests cannot both succeed; the loser gets
    /// [`WorkflowError::PendingRescheduleExists`].
    pub fn request_reschedule(
        &mut self,
        plan_id: u64,
        start: Date,
        end: Date,
        reason: &str,
        requested_by: &str,
    ) -> Result<RescheduleRequest> {
        let now = Timestamp::now();
        let rows = self
            .connection
            .execute(
                REQUEST_RESCHEDULE_SQL,
                params![
                    start.to_string(),
                    end.to_string(),
                    reason,
                    requested_by,
                    now.to_string(),
                    now.to_string(),
                    plan_id as i64
                ],
            )
            .map_err(|e| WorkflowError::database_error("Failed to file reschedule request", e))?;

        if rows == 0 {
            let exists: bool = self
                .connection
                .query_row(CHECK_PLAN_EXISTS_SQL, params![plan_id as i64], |row| {
                    row.get(0)
                })
                .map_err(|e| WorkflowError::database_error("Failed to check plan existence", e))?;

            if !exists {
                return Err(WorkflowError::PlanNotFound { id: plan_id });
            }
            return Err(WorkflowError::PendingRescheduleExists { plan_id });
        }

        Ok(RescheduleRequest {
            start_date: start,
            end_date: end,
            reason: reason.into(),
            requested_by: requested_by.into(),
            status: RescheduleStatus::Pending,
            requested_at: now,
            rejection_reason: None,
        })
    }

    /// Approves the pending reschedule request, writing the final window onto
    /// the plan and setting its status to Scheduled. The due date follows the
    /// new end date, and the plan may be handed to a new inspector in the
    /// same pass. Appends an audit row when the plan status actually changes.
    pub fn approve_reschedule(
        &mut self,
        plan_id: u64,
        final_start: Date,
        final_end: Date,
        reassign: Option<&str>,
        approved_by: &str,
    ) -> Result<RescheduleRequest> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let (request, old_status) = tx
            .prepare(SELECT_RESCHEDULE_SQL)
            .map_err(|e| WorkflowError::database_error("Failed to prepare query", e))?
            .query_row(params![plan_id as i64], reschedule_from_row)
            .optional()
            .map_err(|e| WorkflowError::database_error("Failed to query reschedule request", e))?
            .ok_or(WorkflowError::PlanNotFound { id: plan_id })?;

        let mut request = match request {
            Some(r) if r.status == RescheduleStatus::Pending => r,
            _ => {
                return Err(WorkflowError::invalid_input("reschedule")
                    .with_reason("Plan has no pending reschedule request"))
            }
        };

        let now = Timestamp::now().to_string();
        match reassign {
            Some(inspector) => tx.execute(
                APPROVE_RESCHEDULE_REASSIGN_SQL,
                params![
                    final_start.to_string(),
                    final_end.to_string(),
                    InspectionStatus::Scheduled.as_str(),
                    inspector,
                    &now,
                    plan_id as i64
                ],
            ),
            None => tx.execute(
                APPROVE_RESCHEDULE_SQL,
                params![
                    final_start.to_string(),
                    final_end.to_string(),
                    InspectionStatus::Scheduled.as_str(),
                    &now,
                    plan_id as i64
                ],
            ),
        }
        .map_err(|e| WorkflowError::database_error("Failed to approve reschedule request", e))?;

        if old_status != InspectionStatus::Scheduled {
            tx.execute(
                INSERT_STATUS_LOG_SQL,
                params![
                    plan_id as i64,
                    old_status.as_str(),
                    InspectionStatus::Scheduled.as_str(),
                    approved_by,
                    &now
                ],
            )
            .map_err(|e| WorkflowError::database_error("Failed to append status log", e))?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        request.status = RescheduleStatus::Approved;
        Ok(request)
    }

    /// Rejects the pending reschedule request with a reason. The plan's own
    /// status and window stay untouched.
    pub fn reject_reschedule(
        &mut self,
        plan_id: u64,
        rejection_reason: &str,
    ) -> Result<RescheduleRequest> {
        let now = Timestamp::now().to_string();
        let rows = self
            .connection
            .execute(
                REJECT_RESCHEDULE_SQL,
                params![rejection_reason, &now, plan_id as i64],
            )
            .map_err(|e| WorkflowError::database_error("Failed to reject reschedule request", e))?;

        if rows == 0 {
            let exists: bool = self
                .connection
                .query_row(CHECK_PLAN_EXISTS_SQL, params![plan_id as i64], |row| {
                    row.get(0)
                })
                .map_err(|e| WorkflowError::database_error("Failed to check plan existence", e))?;

            if !exists {
                return Err(WorkflowError::PlanNotFound { id: plan_id });
            }
            return Err(WorkflowError::invalid_input("reschedule")
                .with_reason("Plan has no pending reschedule request"));
        }

        let (request, _) = self.get_reschedule(plan_id)?;
        request.ok_or_else(|| {
            WorkflowError::invalid_input("reschedule")
                .with_reason("Reschedule request disappeared after rejection")
        })
    }

    /// Clears the reschedule request entirely, used when an inspector accepts
    /// the existing schedule after a rejection. Plan status is untouched.
    pub fn cancel_reschedule(&mut self, plan_id: u64) -> Result<()> {
        let now = Timestamp::now().to_string();
        let rows = self
            .connection
            .execute(CANCEL_RESCHEDULE_SQL, params![&now, plan_id as i64])
            .map_err(|e| WorkflowError::database_error("Failed to cancel reschedule request", e))?;

        if rows == 0 {
            return Err(WorkflowError::PlanNotFound { id: plan_id });
        }
        Ok(())
    }
}
