//! Handler operations that return formatted wrapper types for the Workflow.

use super::Workflow;
use crate::{
    display::{Notifications, PlanSummaries, StatusLog},
    error::Result,
    models::InspectionPlan,
    params::{DeletePlan, Id, ListNotifications, ListPlans},
};

impl Workflow {
    /// Handle listing plans as summaries with checklist progress counts.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use vigil_core::{params::ListPlans, WorkflowBuilder};
    /// # async {
    /// let workflow = WorkflowBuilder::new().build().await?;
    /// let summaries = workflow.list_plans_summary(&ListPlans::default()).await?;
    /// # Result::<(), vigil_core::WorkflowError>::Ok(())
    /// # };
    /// ```
    pub async fn list_plans_summary(&self, params: &ListPlans) -> Result<PlanSummaries> {
        let summaries = self.list_summaries(params).await?;
        Ok(PlanSummaries(summaries))
    }

    /// Handle showing a complete plan with its checklist and any reschedule
    /// request attached.
    pub async fn show_plan(&self, params: &Id) -> Result<Option<InspectionPlan>> {
        self.get_plan(params).await
    }

    /// Handle permanently deleting a plan with confirmation.
    ///
    /// Requires explicit confirmation via the `confirmed` field to prevent
    /// accidental deletion, and uses get-before-delete to return the deleted
    /// plan's details. Only plans still in the early lifecycle stages may be
    /// deleted.
    pub async fn delete_plan(&self, params: &DeletePlan) -> Result<Option<InspectionPlan>> {
        if !params.confirmed {
            return Err(crate::WorkflowError::InvalidInput {
                field: "confirmed".to_string(),
                reason: "Plan deletion requires explicit confirmation. Set 'confirmed' to true \
                         to proceed with permanent deletion."
                    .to_string(),
            });
        }

        let id_params = Id { id: params.id };
        let plan = self.get_plan(&id_params).await?;

        if plan.is_some() {
            self.delete_plan_by_id(&id_params).await?;
        }

        Ok(plan)
    }

    /// Handle listing a user's notification inbox.
    pub async fn list_notifications_display(
        &self,
        params: &ListNotifications,
    ) -> Result<Notifications> {
        let notifications = self.list_notifications(params).await?;
        Ok(Notifications(notifications))
    }

    /// Handle showing a plan's status history.
    pub async fn status_log_display(&self, params: &Id) -> Result<StatusLog> {
        let entries = self.status_log(params).await?;
        Ok(StatusLog(entries))
    }
}
