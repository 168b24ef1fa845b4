//! Lifecycle transitions and the overdue sweep.

use jiff::civil::Date;
use tokio::task;

use super::Workflow;
use crate::{
    db::Database,
    error::{Result, WorkflowError},
    events::StoreEvent,
    models::{InspectionStatus, NotificationKind, Role},
    params::{Id, TransitionPlan},
};

fn kind_for_status(status: InspectionStatus) -> NotificationKind {
    match status {
        InspectionStatus::Approved => NotificationKind::Success,
        InspectionStatus::Rejected => NotificationKind::Error,
        InspectionStatus::Overdue => NotificationKind::Warning,
        _ => NotificationKind::Info,
    }
}

impl Workflow {
    /// Moves a plan to a new lifecycle status.
    ///
    /// The transition table decides which moves are legal; Approved and
    /// Rejected additionally require the supervisor role. Asking for the
    /// status the plan already has is a no-op and returns `Ok(None)`, with no
    /// audit entry and no notifications. On an actual change the previous
    /// status comes back and the plan's inspectors are notified best-effort.
    pub async fn transition(&self, params: &TransitionPlan) -> Result<Option<InspectionStatus>> {
        let (target, role) = params.validate()?;
        if target.requires_supervisor() && role != Role::Supervisor {
            return Err(WorkflowError::unauthorized(
                format!("move a plan to {target}"),
                role,
            ));
        }

        let db_path = self.db_path.clone();
        let plan_id = params.id;
        let actor = params.actor.clone();

        let previous = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.transition_status(plan_id, target, &actor)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        if let Some(old) = previous {
            self.feed.publish(StoreEvent::PlanChanged { id: plan_id });
            self.announce_transition(plan_id, old, target, &params.actor)
                .await;
            return Ok(Some(old));
        }
        Ok(None)
    }

    /// Marks every Planned or Scheduled plan whose due date has passed as
    /// Overdue, bypassing the transition table. Returns the affected plan IDs
    /// with their previous statuses.
    ///
    /// The caller supplies the reference day, so "today" can be pinned in
    /// tests and in replayed batch runs.
    pub async fn sweep_overdue(&self, today: Date) -> Result<Vec<(u64, InspectionStatus)>> {
        let db_path = self.db_path.clone();

        let swept = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.sweep_overdue(today)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        for (plan_id, old) in &swept {
            self.feed.publish(StoreEvent::PlanChanged { id: *plan_id });
            self.announce_transition(*plan_id, *old, InspectionStatus::Overdue, "system")
                .await;
        }
        Ok(swept)
    }

    /// Best-effort notification fan-out after a committed status change. The
    /// actor is skipped; submission additionally pings the supervisor role.
    async fn announce_transition(
        &self,
        plan_id: u64,
        old: InspectionStatus,
        new: InspectionStatus,
        actor: &str,
    ) {
        let plan = match self.get_plan(&Id { id: plan_id }).await {
            Ok(Some(plan)) => plan,
            Ok(None) => return,
            Err(e) => {
                log::warn!("Failed to load plan {plan_id} for notification: {e}");
                return;
            }
        };

        let title = format!("Plan '{}' is now {new}", plan.title);
        let message = format!("Status changed from {old} to {new} by {actor}.");
        let link = format!("/plans/{plan_id}");
        let kind = kind_for_status(new);

        let mut targets: Vec<&str> = Vec::with_capacity(plan.inspectors.len() + 1);
        targets.push(plan.inspector.as_str());
        for extra in &plan.inspectors {
            if !targets.contains(&extra.as_str()) {
                targets.push(extra);
            }
        }
        for target in targets {
            if target == actor {
                continue;
            }
            self.notify_user_best_effort(target, &title, &message, kind, Some(&link))
                .await;
        }

        if new == InspectionStatus::Submitted {
            self.notify_role_best_effort(
                "supervisor",
                &title,
                &format!("Plan '{}' awaits review.", plan.title),
                NotificationKind::Info,
                Some(&link),
            )
            .await;
        }
    }
}
