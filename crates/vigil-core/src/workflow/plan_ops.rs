//! Plan and checklist operations for the Workflow.

use tokio::task;

use super::Workflow;
use crate::{
    db::Database,
    error::{Result, WorkflowError},
    events::StoreEvent,
    models::{ChecklistTask, InspectionPlan, PlanFilter, PlanSummary, StatusLogEntry},
    params::{CreatePlan, Id, ListPlans, TaskCreate, UpdateTask},
};

impl Workflow {
    /// Creates a new inspection plan. Input is validated before anything
    /// touches the database; the plan starts in Planned status.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<InspectionPlan> {
        let new = params.validate()?;
        let db_path = self.db_path.clone();

        let plan = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_plan(&new)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        self.feed.publish(StoreEvent::PlanChanged { id: plan.id });
        Ok(plan)
    }

    /// Retrieves a plan by its ID, with its checklist tasks and any
    /// reschedule request attached.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<InspectionPlan>> {
        let db_path = self.db_path.clone();
        let plan_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_plan(plan_id)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists all plans with optional filtering, ordered by due date.
    pub async fn list_plans(&self, filter: Option<PlanFilter>) -> Result<Vec<InspectionPlan>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_plans(filter.as_ref())
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists plan summaries with checklist progress counts.
    pub async fn list_summaries(&self, params: &ListPlans) -> Result<Vec<PlanSummary>> {
        let db_path = self.db_path.clone();
        let filter = PlanFilter::from(params);

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_summaries(Some(&filter))
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Permanently deletes a plan and its checklist tasks. Only plans still
    /// in Planned or Scheduled status may be deleted.
    pub async fn delete_plan_by_id(&self, params: &Id) -> Result<()> {
        let db_path = self.db_path.clone();
        let plan_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_plan(plan_id)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        self.feed.publish(StoreEvent::PlanChanged { id: plan_id });
        Ok(())
    }

    /// Appends a checklist task to a plan.
    pub async fn add_task(&self, params: &TaskCreate) -> Result<ChecklistTask> {
        params.validate()?;
        let db_path = self.db_path.clone();
        let plan_id = params.plan_id;
        let text = params.text.clone();

        let added = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.add_task(plan_id, &text)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        self.feed.publish(StoreEvent::PlanChanged { id: plan_id });
        Ok(added)
    }

    /// Updates a checklist task's status.
    pub async fn update_task(&self, params: &UpdateTask) -> Result<ChecklistTask> {
        let status = params.validate()?;
        let db_path = self.db_path.clone();
        let task_id = params.id;

        let updated = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.set_task_status(task_id, status)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        self.feed.publish(StoreEvent::PlanChanged {
            id: updated.plan_id,
        });
        Ok(updated)
    }

    /// Returns the full status history of a plan in insertion order.
    pub async fn status_log(&self, params: &Id) -> Result<Vec<StatusLogEntry>> {
        let db_path = self.db_path.clone();
        let plan_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_status_log(plan_id)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
