//! Checklist task CRUD operations.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::utils::{column_enum, column_timestamp};
use crate::{
    error::{DatabaseResultExt, Result, WorkflowError},
    models::{ChecklistTask, TaskStatus},
};

const INSERT_TASK_SQL: &str = "INSERT INTO tasks (plan_id, text, status, position, created_at) \
     VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_TASKS_SQL: &str = "SELECT id, plan_id, text, status, position, created_at \
     FROM tasks WHERE plan_id = ?1 ORDER BY position ASC";
const SELECT_TASK_SQL: &str = "SELECT id, plan_id, text, status, position, created_at \
     FROM tasks WHERE id = ?1";
const NEXT_POSITION_SQL: &str =
    "SELECT COALESCE(MAX(position) + 1, 0) FROM tasks WHERE plan_id = ?1";
const UPDATE_TASK_STATUS_SQL: &str = "UPDATE tasks SET status = ?1 WHERE id = ?2";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";

fn task_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ChecklistTask> {
    Ok(ChecklistTask {
        id: row.get::<_, i64>(0)? as u64,
        plan_id: row.get::<_, i64>(1)? as u64,
        text: row.get(2)?,
        status: column_enum::<TaskStatus>(3, row.get(3)?)?,
        position: row.get::<_, i64>(4)? as u32,
        created_at: column_timestamp(5, row.get(5)?)?,
    })
}

impl super::Database {
    /// Appends a checklist task to a plan.
    pub fn add_task(&mut self, plan_id: u64, text: &str) -> Result<ChecklistTask> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_PLAN_EXISTS_SQL, params![plan_id as i64], |row| {
                row.get(0)
            })
            .map_err(|e| WorkflowError::database_error("Failed to check plan existence", e))?;
        if !exists {
            return Err(WorkflowError::PlanNotFound { id: plan_id });
        }

        let position: i64 = tx
            .query_row(NEXT_POSITION_SQL, params![plan_id as i64], |row| row.get(0))
            .map_err(|e| WorkflowError::database_error("Failed to compute task position", e))?;

        let now = Timestamp::now();
        tx.execute(
            INSERT_TASK_SQL,
            params![
                plan_id as i64,
                text,
                TaskStatus::Pending.as_str(),
                position,
                now.to_string()
            ],
        )
        .map_err(|e| WorkflowError::database_error("Failed to insert task", e))?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(ChecklistTask {
            id,
            plan_id,
            text: text.into(),
            status: TaskStatus::Pending,
            position: position as u32,
            created_at: now,
        })
    }

    /// Retrieves all checklist tasks for a plan in position order.
    pub fn get_tasks(&self, plan_id: u64) -> Result<Vec<ChecklistTask>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_TASKS_SQL)
            .map_err(|e| WorkflowError::database_error("Failed to prepare query", e))?;

        let tasks = stmt
            .query_map(params![plan_id as i64], task_from_row)
            .map_err(|e| WorkflowError::database_error("Failed to query tasks", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch tasks")?;
        Ok(tasks)
    }

    /// Sets the status of a single checklist task.
    pub fn set_task_status(&mut self, id: u64, status: TaskStatus) -> Result<ChecklistTask> {
        let rows = self
            .connection
            .execute(UPDATE_TASK_STATUS_SQL, params![status.as_str(), id as i64])
            .map_err(|e| WorkflowError::database_error("Failed to update task status", e))?;

        if rows == 0 {
            return Err(WorkflowError::invalid_input("task")
                .with_reason(format!("Task with ID {id} not found")));
        }

        self.connection
            .prepare(SELECT_TASK_SQL)
            .map_err(|e| WorkflowError::database_error("Failed to prepare query", e))?
            .query_row(params![id as i64], task_from_row)
            .optional()
            .map_err(|e| WorkflowError::database_error("Failed to query task", e))?
            .ok_or_else(|| {
                WorkflowError::invalid_input("task")
                    .with_reason(format!("Task with ID {id} not found"))
            })
    }
}
