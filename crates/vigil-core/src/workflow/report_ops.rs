//! Report creation and review, with best-effort plan status sync.
//!
//! A report carries its own review status. Moving it also tries to move the
//! parent plan to the matching lifecycle status, but that sync is advisory:
//! when the plan refuses the transition the report change stands and the
//! refusal is only logged.

use tokio::task;

use super::Workflow;
use crate::{
    db::Database,
    error::{Result, WorkflowError},
    events::StoreEvent,
    models::{InspectionReport, InspectionStatus, NotificationKind, ReportStatus, Role},
    params::{CreateReport, Id, ReviewReport},
};

impl Workflow {
    /// Creates a draft report for a plan. Each plan holds at most one report.
    pub async fn create_report(&self, params: &CreateReport) -> Result<InspectionReport> {
        let photo_report = params.validate()?;
        let db_path = self.db_path.clone();
        let plan_id = params.plan_id;
        let findings = params.findings.clone();

        let report = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_report(plan_id, findings.as_deref(), &photo_report)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        self.feed.publish(StoreEvent::ReportChanged { plan_id });
        Ok(report)
    }

    /// Replaces the findings content of a plan's draft report.
    pub async fn update_report(&self, params: &CreateReport) -> Result<InspectionReport> {
        let photo_report = params.validate()?;
        let db_path = self.db_path.clone();
        let plan_id = params.plan_id;
        let findings = params.findings.clone();

        let report = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.update_report(plan_id, findings.as_deref(), &photo_report)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        self.feed.publish(StoreEvent::ReportChanged { plan_id });
        Ok(report)
    }

    /// Retrieves the report attached to a plan.
    pub async fn get_report(&self, params: &Id) -> Result<InspectionReport> {
        let db_path = self.db_path.clone();
        let plan_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_report(plan_id)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Submits a plan's report for review and pings the supervisor role.
    pub async fn submit_report(&self, plan_id: u64, actor: &str) -> Result<InspectionReport> {
        let report = self
            .set_report_status(plan_id, ReportStatus::Submitted)
            .await?;
        self.sync_plan_status(plan_id, InspectionStatus::Submitted, actor)
            .await;
        Ok(report)
    }

    /// Approves or rejects a submitted report. Supervisor only.
    pub async fn review_report(&self, params: &ReviewReport) -> Result<InspectionReport> {
        let role = params.validate()?;
        if role != Role::Supervisor {
            return Err(WorkflowError::unauthorized("review a report", role));
        }

        let (report_status, plan_status) = if params.approve {
            (ReportStatus::Approved, InspectionStatus::Approved)
        } else {
            (ReportStatus::Rejected, InspectionStatus::Rejected)
        };

        let report = self
            .set_report_status(params.plan_id, report_status)
            .await?;
        self.sync_plan_status(params.plan_id, plan_status, &params.reviewer)
            .await;

        if let Ok(Some(plan)) = self.get_plan(&Id { id: params.plan_id }).await {
            let (title, kind) = if params.approve {
                (format!("Report for '{}' approved", plan.title), NotificationKind::Success)
            } else {
                (format!("Report for '{}' rejected", plan.title), NotificationKind::Error)
            };
            self.notify_user_best_effort(
                &plan.inspector,
                &title,
                &format!("Reviewed by {}.", params.reviewer),
                kind,
                Some(&format!("/plans/{}", params.plan_id)),
            )
            .await;
        }
        Ok(report)
    }

    async fn set_report_status(
        &self,
        plan_id: u64,
        status: ReportStatus,
    ) -> Result<InspectionReport> {
        let db_path = self.db_path.clone();

        let report = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.set_report_status(plan_id, status)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        self.feed.publish(StoreEvent::ReportChanged { plan_id });
        Ok(report)
    }

    /// Tries to move the parent plan alongside its report. A refused or
    /// failed transition is logged, never surfaced.
    async fn sync_plan_status(&self, plan_id: u64, status: InspectionStatus, actor: &str) {
        let db_path = self.db_path.clone();
        let actor = actor.to_string();

        let result = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.transition_status(plan_id, status, &actor)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        });

        match result {
            Ok(Ok(Some(_))) => {
                self.feed.publish(StoreEvent::PlanChanged { id: plan_id });
            }
            Ok(Ok(None)) => {}
            Ok(Err(e)) | Err(e) => {
                log::warn!("Plan {plan_id} status sync to {status} failed: {e}");
            }
        }
    }
}
