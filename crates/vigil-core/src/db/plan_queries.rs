//! Plan CRUD operations, the status transition, and the overdue sweep.

use jiff::civil::Date;
use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Row};

use super::utils::{column_date, column_enum, column_timestamp};
use crate::{
    error::{DatabaseResultExt, Result, WorkflowError},
    models::{
        InspectionPlan, InspectionStatus, NewPlan, PlanFilter, PlanSummary, RescheduleRequest,
        RescheduleStatus, RiskCategory,
    },
};

// SQL as const strings for compile-time optimization
const INSERT_PLAN_SQL: &str = "INSERT INTO plans (title, equipment_id, location, risk_category, \
     inspection_type, inspector, inspectors, start_date, end_date, due_date, status, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";
const PLAN_COLUMNS: &str = "id, title, equipment_id, location, risk_category, inspection_type, \
     inspector, inspectors, start_date, end_date, due_date, status, outcome, \
     resched_start, resched_end, resched_reason, resched_requested_by, resched_status, \
     resched_requested_at, resched_rejection_reason, created_at, updated_at";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
const SELECT_PLAN_STATUS_SQL: &str = "SELECT status FROM plans WHERE id = ?1";
const UPDATE_PLAN_STATUS_SQL: &str = "UPDATE plans SET status = ?1, updated_at = ?2 WHERE id = ?3";
const UPDATE_PLAN_OUTCOME_SQL: &str =
    "UPDATE plans SET outcome = ?1, updated_at = ?2 WHERE id = ?3";
const INSERT_STATUS_LOG_SQL: &str = "INSERT INTO status_log \
     (plan_id, old_status, new_status, changed_by, changed_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const SWEEP_CANDIDATES_SQL: &str = "SELECT id, status FROM plans \
     WHERE status IN ('Planned', 'Scheduled') AND due_date < ?1";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1 \
     AND status IN ('Planned', 'Scheduled')";

const SUMMARY_COLUMNS: &str = "p.id, p.title, p.equipment_id, p.inspector, p.risk_category, \
     p.status, p.start_date, p.end_date, p.due_date, p.resched_status, \
     c.total_tasks, c.completed_tasks, p.created_at";

/// Maps one full plans row (in `PLAN_COLUMNS` order) to the domain model.
/// Tasks are not loaded here; callers load them eagerly where needed.
fn plan_from_row(row: &Row<'_>) -> rusqlite::Result<InspectionPlan> {
    let reschedule_request = match row.get::<_, Option<String>>(17)? {
        Some(status) => Some(RescheduleRequest {
            start_date: column_date(13, row.get(13)?)?,
            end_date: column_date(14, row.get(14)?)?,
            reason: row.get(15)?,
            requested_by: row.get(16)?,
            status: column_enum::<RescheduleStatus>(17, status)?,
            requested_at: column_timestamp(18, row.get(18)?)?,
            rejection_reason: row.get(19)?,
        }),
        None => None,
    };

    let inspectors: Vec<String> = serde_json::from_str(&row.get::<_, String>(7)?)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e)))?;

    Ok(InspectionPlan {
        id: row.get::<_, i64>(0)? as u64,
        title: row.get(1)?,
        equipment_id: row.get(2)?,
        location: row.get(3)?,
        risk_category: column_enum::<RiskCategory>(4, row.get(4)?)?,
        inspection_type: row.get(5)?,
        inspector: row.get(6)?,
        inspectors,
        start: column_date(8, row.get(8)?)?,
        end: column_date(9, row.get(9)?)?,
        due_date: column_date(10, row.get(10)?)?,
        status: column_enum::<InspectionStatus>(11, row.get(11)?)?,
        outcome: row.get(12)?,
        reschedule_request,
        tasks: Vec::new(),
        created_at: column_timestamp(20, row.get(20)?)?,
        updated_at: column_timestamp(21, row.get(21)?)?,
    })
}

impl super::Database {
    /// Creates a new inspection plan. The plan starts in `Planned` status.
    pub fn create_plan(&mut self, new: &NewPlan) -> Result<InspectionPlan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();
        let inspectors_json = serde_json::to_string(&new.inspectors)?;

        tx.execute(
            INSERT_PLAN_SQL,
            params![
                new.title,
                new.equipment_id,
                new.location,
                new.risk_category.as_str(),
                new.inspection_type,
                new.inspector,
                inspectors_json,
                new.start.to_string(),
                new.end.to_string(),
                new.due_date.to_string(),
                InspectionStatus::Planned.as_str(),
                &now_str,
                &now_str,
            ],
        )
        .map_err(|e| WorkflowError::database_error("Failed to insert plan", e))?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(InspectionPlan {
            id,
            title: new.title.clone(),
            equipment_id: new.equipment_id.clone(),
            location: new.location.clone(),
            risk_category: new.risk_category,
            inspection_type: new.inspection_type.clone(),
            inspector: new.inspector.clone(),
            inspectors: new.inspectors.clone(),
            start: new.start,
            end: new.end,
            due_date: new.due_date,
            status: InspectionStatus::Planned,
            outcome: None,
            reschedule_request: None,
            tasks: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a plan by its ID, with checklist tasks eagerly loaded.
    pub fn get_plan(&self, id: u64) -> Result<Option<InspectionPlan>> {
        let sql = format!("SELECT {PLAN_COLUMNS} FROM plans WHERE id = ?1");
        let mut stmt = self
            .connection
            .prepare(&sql)
            .map_err(|e| WorkflowError::database_error("Failed to prepare query", e))?;

        let mut plan = stmt
            .query_row(params![id as i64], plan_from_row)
            .optional()
            .map_err(|e| WorkflowError::database_error("Failed to query plan", e))?;

        if let Some(ref mut plan) = plan {
            plan.tasks = self.get_tasks(plan.id)?;
        }

        Ok(plan)
    }

    /// Lists plans matching the filter, with checklist tasks eagerly loaded.
    pub fn list_plans(&self, filter: Option<&PlanFilter>) -> Result<Vec<InspectionPlan>> {
        let mut query = format!("SELECT {PLAN_COLUMNS} FROM plans");
        let (conditions, params_vec) = Self::filter_conditions(filter);

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY due_date ASC, id ASC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .map_err(|e| WorkflowError::database_error("Failed to prepare query", e))?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let mut plans: Vec<InspectionPlan> = stmt
            .query_map(&params_refs[..], plan_from_row)
            .map_err(|e| WorkflowError::database_error("Failed to query plans", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| WorkflowError::database_error("Failed to fetch plans", e))?;

        for plan in &mut plans {
            plan.tasks = self.get_tasks(plan.id)?;
        }

        Ok(plans)
    }

    /// Lists plan summaries matching the filter, with checklist counts taken
    /// from the `plan_task_counts` view instead of loading every task row.
    pub fn list_summaries(&self, filter: Option<&PlanFilter>) -> Result<Vec<PlanSummary>> {
        let mut query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM plans p \
             JOIN plan_task_counts c ON c.plan_id = p.id"
        );
        let (conditions, params_vec) = Self::filter_conditions(filter);

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY p.due_date ASC, p.id ASC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .map_err(|e| WorkflowError::database_error("Failed to prepare query", e))?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let summaries = stmt
            .query_map(&params_refs[..], |row| {
                let resched_status: Option<String> = row.get(9)?;
                Ok(PlanSummary {
                    id: row.get::<_, i64>(0)? as u64,
                    title: row.get(1)?,
                    equipment_id: row.get(2)?,
                    inspector: row.get(3)?,
                    risk_category: column_enum::<RiskCategory>(4, row.get(4)?)?,
                    status: column_enum::<InspectionStatus>(5, row.get(5)?)?,
                    start: column_date(6, row.get(6)?)?,
                    end: column_date(7, row.get(7)?)?,
                    due_date: column_date(8, row.get(8)?)?,
                    has_pending_reschedule: resched_status.as_deref() == Some("pending"),
                    total_tasks: row.get::<_, i64>(10)? as u32,
                    completed_tasks: row.get::<_, i64>(11)? as u32,
                    created_at: column_timestamp(12, row.get(12)?)?,
                })
            })
            .map_err(|e| WorkflowError::database_error("Failed to query plan summaries", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| WorkflowError::database_error("Failed to fetch plan summaries", e))?;

        Ok(summaries)
    }

    /// Builds WHERE conditions and bound parameters for a plan filter.
    fn filter_conditions(
        filter: Option<&PlanFilter>,
    ) -> (Vec<&'static str>, Vec<Box<dyn rusqlite::ToSql>>) {
        let mut conditions: Vec<&'static str> = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(f) = filter {
            if let Some(ref title) = f.title_contains {
                conditions.push("title LIKE ?");
                params_vec.push(Box::new(format!("%{title}%")));
            }
            if let Some(ref inspector) = f.inspector {
                conditions.push("inspector = ?");
                params_vec.push(Box::new(inspector.clone()));
            }
            if let Some(ref equipment) = f.equipment_id {
                conditions.push("equipment_id = ?");
                params_vec.push(Box::new(equipment.clone()));
            }
            if let Some(status) = f.status {
                conditions.push("status = ?");
                params_vec.push(Box::new(status.as_str().to_string()));
            }
            if let Some(due_before) = f.due_before {
                conditions.push("due_date <= ?");
                params_vec.push(Box::new(due_before.to_string()));
            }
            if f.pending_reschedule {
                conditions.push("resched_status = 'pending'");
            }
        }

        (conditions, params_vec)
    }

    /// Applies a lifecycle transition atomically: reads the current status,
    /// checks the transition table, persists the new status, and appends one
    /// audit row, all in a single transaction.
    ///
    /// Returns `Ok(None)` without writing anything when the plan is already
    /// in the requested status (idempotent no-op), otherwise the old status.
    pub fn transition_status(
        &mut self,
        id: u64,
        new_status: InspectionStatus,
        changed_by: &str,
    ) -> Result<Option<InspectionStatus>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let old_status: InspectionStatus = tx
            .query_row(SELECT_PLAN_STATUS_SQL, params![id as i64], |row| {
                column_enum::<InspectionStatus>(0, row.get(0)?)
            })
            .optional()
            .map_err(|e| WorkflowError::database_error("Failed to read plan status", e))?
            .ok_or(WorkflowError::PlanNotFound { id })?;

        if old_status == new_status {
            return Ok(None);
        }

        if !old_status.can_transition_to(new_status) {
            return Err(WorkflowError::InvalidTransition {
                from: old_status,
                to: new_status,
            });
        }

        let now = Timestamp::now().to_string();
        tx.execute(
            UPDATE_PLAN_STATUS_SQL,
            params![new_status.as_str(), &now, id as i64],
        )
        .map_err(|e| WorkflowError::database_error("Failed to update plan status", e))?;

        tx.execute(
            INSERT_STATUS_LOG_SQL,
            params![
                id as i64,
                old_status.as_str(),
                new_status.as_str(),
                changed_by,
                &now
            ],
        )
        .map_err(|e| WorkflowError::database_error("Failed to append status log", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Some(old_status))
    }

    /// Force-sets every Planned/Scheduled plan whose due date has passed to
    /// Overdue, bypassing the transition table. One audit row is appended per
    /// promoted plan. Returns the promoted plan IDs with their old statuses.
    pub fn sweep_overdue(&mut self, today: Date) -> Result<Vec<(u64, InspectionStatus)>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let candidates: Vec<(u64, InspectionStatus)> = {
            let mut stmt = tx
                .prepare(SWEEP_CANDIDATES_SQL)
                .map_err(|e| WorkflowError::database_error("Failed to prepare sweep query", e))?;
            let rows = stmt
                .query_map(params![today.to_string()], |row| {
                    Ok((
                        row.get::<_, i64>(0)? as u64,
                        column_enum::<InspectionStatus>(1, row.get(1)?)?,
                    ))
                })
                .map_err(|e| {
                    WorkflowError::database_error("Failed to query overdue candidates", e)
                })?
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| {
                    WorkflowError::database_error("Failed to fetch overdue candidates", e)
                })?;
            rows
        };

        let now = Timestamp::now().to_string();
        for (id, old_status) in &candidates {
            tx.execute(
                UPDATE_PLAN_STATUS_SQL,
                params![InspectionStatus::Overdue.as_str(), &now, *id as i64],
            )
            .map_err(|e| WorkflowError::database_error("Failed to mark plan overdue", e))?;
            tx.execute(
                INSERT_STATUS_LOG_SQL,
                params![
                    *id as i64,
                    old_status.as_str(),
                    InspectionStatus::Overdue.as_str(),
                    "system",
                    &now
                ],
            )
            .map_err(|e| WorkflowError::database_error("Failed to append status log", e))?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(candidates)
    }

    /// Records the free-text outcome on a plan.
    pub fn set_outcome(&mut self, id: u64, outcome: &str) -> Result<()> {
        let now = Timestamp::now().to_string();
        let rows = self
            .connection
            .execute(UPDATE_PLAN_OUTCOME_SQL, params![outcome, &now, id as i64])
            .map_err(|e| WorkflowError::database_error("Failed to set plan outcome", e))?;

        if rows == 0 {
            return Err(WorkflowError::PlanNotFound { id });
        }
        Ok(())
    }

    /// Permanently deletes a plan. Only allowed while the plan is still in an
    /// early-lifecycle status (Planned or Scheduled); the delete is
    /// conditional so a concurrent transition cannot race past the check.
    pub fn delete_plan(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let rows = tx
            .execute(DELETE_PLAN_SQL, params![id as i64])
            .map_err(|e| WorkflowError::database_error("Failed to delete plan", e))?;

        if rows == 0 {
            let exists: bool = tx
                .query_row(CHECK_PLAN_EXISTS_SQL, params![id as i64], |row| row.get(0))
                .map_err(|e| WorkflowError::database_error("Failed to check plan existence", e))?;

            if !exists {
                return Err(WorkflowError::PlanNotFound { id });
            }
            return Err(WorkflowError::invalid_input("status")
                .with_reason("Only Planned or Scheduled plans can be deleted"));
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}
