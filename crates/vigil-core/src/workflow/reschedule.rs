//! The reschedule request sub-workflow.

use tokio::task;

use super::Workflow;
use crate::{
    db::Database,
    error::{Result, WorkflowError},
    events::StoreEvent,
    models::{NotificationKind, RescheduleRequest, Role},
    params::{Id, RequestReschedule, ResolveReschedule},
};

impl Workflow {
    /// Files a reschedule request against a plan and pings the supervisor
    /// role. A plan holds at most one pending request at a time.
    pub async fn request_reschedule(
        &self,
        params: &RequestReschedule,
    ) -> Result<RescheduleRequest> {
        let window = params.validate()?;
        let db_path = self.db_path.clone();
        let plan_id = params.plan_id;
        let reason = params.reason.clone();
        let requested_by = params.requested_by.clone();

        let request = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.request_reschedule(plan_id, window.start, window.end, &reason, &requested_by)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        self.feed.publish(StoreEvent::PlanChanged { id: plan_id });
        self.notify_role_best_effort(
            "supervisor",
            &format!("Reschedule requested for plan {plan_id}"),
            &format!(
                "{} asked to move the window to {} .. {}: {}",
                request.requested_by, request.start_date, request.end_date, request.reason
            ),
            NotificationKind::Info,
            Some(&format!("/plans/{plan_id}")),
        )
        .await;
        Ok(request)
    }

    /// Approves or rejects the pending reschedule request. Supervisor only.
    ///
    /// Approval rewrites the plan's window (and due date) and puts the plan
    /// back in Scheduled status. An explicit override window wins; otherwise
    /// `use_plan_dates` keeps the plan's current window, and the requested
    /// dates apply when neither is given. Rejection records the reason and
    /// leaves the plan untouched. Either way the requester is notified
    /// best-effort.
    pub async fn resolve_reschedule(
        &self,
        params: &ResolveReschedule,
    ) -> Result<RescheduleRequest> {
        let (role, override_window) = params.validate()?;
        if role != Role::Supervisor {
            return Err(WorkflowError::unauthorized(
                "resolve a reschedule request",
                role,
            ));
        }

        let db_path = self.db_path.clone();
        let plan_id = params.plan_id;

        let request = if params.approve {
            let resolved_by = params.resolved_by.clone();
            let use_plan_dates = params.use_plan_dates;
            let reassign = params.reassign.clone();
            task::spawn_blocking(move || {
                let mut db = Database::new(&db_path)?;
                let window = match override_window {
                    Some(window) => window,
                    None if use_plan_dates => {
                        let plan = db
                            .get_plan(plan_id)?
                            .ok_or(WorkflowError::PlanNotFound { id: plan_id })?;
                        crate::models::ScheduleWindow {
                            start: plan.start,
                            end: plan.end,
                        }
                    }
                    None => {
                        let (pending, _) = db.get_reschedule(plan_id)?;
                        let pending = pending.ok_or_else(|| {
                            WorkflowError::invalid_input("reschedule")
                                .with_reason("Plan has no pending reschedule request")
                        })?;
                        crate::models::ScheduleWindow {
                            start: pending.start_date,
                            end: pending.end_date,
                        }
                    }
                };
                db.approve_reschedule(
                    plan_id,
                    window.start,
                    window.end,
                    reassign.as_deref(),
                    &resolved_by,
                )
            })
            .await
            .map_err(|e| WorkflowError::Configuration {
                message: format!("Task join error: {e}"),
            })??
        } else {
            // validate() guarantees the reason is present on the reject path
            let reason = params.rejection_reason.clone().unwrap_or_default();
            task::spawn_blocking(move || {
                let mut db = Database::new(&db_path)?;
                db.reject_reschedule(plan_id, &reason)
            })
            .await
            .map_err(|e| WorkflowError::Configuration {
                message: format!("Task join error: {e}"),
            })??
        };

        self.feed.publish(StoreEvent::PlanChanged { id: plan_id });

        let (title, message, kind) = if params.approve {
            (
                format!("Reschedule approved for plan {plan_id}"),
                format!(
                    "New window {} .. {}, approved by {}.",
                    request.start_date, request.end_date, params.resolved_by
                ),
                NotificationKind::Success,
            )
        } else {
            (
                format!("Reschedule rejected for plan {plan_id}"),
                format!(
                    "Rejected by {}: {}",
                    params.resolved_by,
                    request.rejection_reason.as_deref().unwrap_or("no reason")
                ),
                NotificationKind::Warning,
            )
        };
        self.notify_user_best_effort(
            &request.requested_by,
            &title,
            &message,
            kind,
            Some(&format!("/plans/{plan_id}")),
        )
        .await;
        Ok(request)
    }

    /// Withdraws the reschedule request entirely, keeping the current window.
    pub async fn cancel_reschedule(&self, params: &Id) -> Result<()> {
        let db_path = self.db_path.clone();
        let plan_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.cancel_reschedule(plan_id)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        self.feed.publish(StoreEvent::PlanChanged { id: plan_id });
        Ok(())
    }
}
