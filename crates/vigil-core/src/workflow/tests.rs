//! Tests for the workflow module.

use jiff::civil::date;
use tempfile::TempDir;

use super::*;
use crate::{
    error::WorkflowError,
    models::{InspectionStatus, NotificationKind, ReportStatus, RescheduleStatus, TaskStatus},
    params::{
        AddUser, CreatePlan, CreateReport, DeletePlan, Id, ListNotifications, ListPlans,
        RequestReschedule, ResolveReschedule, ReviewReport, TaskCreate, TransitionPlan, UpdateTask,
    },
    session::SessionVerdict,
};

/// Helper function to create a test workflow
async fn create_test_workflow() -> (TempDir, Workflow) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let workflow = WorkflowBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create workflow");
    (temp_dir, workflow)
}

fn sample_plan(title: &str) -> CreatePlan {
    CreatePlan {
        title: title.to_string(),
        equipment_id: "V-201".to_string(),
        inspector: "alice".to_string(),
        start: "2026-09-01".to_string(),
        end: "2026-09-03".to_string(),
        ..Default::default()
    }
}

fn transition(id: u64, status: &str, actor: &str, role: &str) -> TransitionPlan {
    TransitionPlan {
        id,
        status: status.to_string(),
        actor: actor.to_string(),
        role: role.to_string(),
    }
}

#[tokio::test]
async fn test_create_and_show_plan() {
    let (_temp_dir, workflow) = create_test_workflow().await;

    let plan = workflow
        .create_plan(&sample_plan("Vessel V-201 internal"))
        .await
        .expect("Failed to create plan");

    assert_eq!(plan.status, InspectionStatus::Planned);
    assert_eq!(plan.due_date, date(2026, 9, 3));

    let shown = workflow
        .show_plan(&Id { id: plan.id })
        .await
        .expect("Failed to show plan")
        .expect("Plan should exist");
    assert_eq!(shown.title, "Vessel V-201 internal");
    assert_eq!(shown.equipment_id, "V-201");
    assert!(shown.tasks.is_empty());
}

#[tokio::test]
async fn test_legal_transition_appends_audit_row() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let plan = workflow.create_plan(&sample_plan("Audit")).await.unwrap();

    let previous = workflow
        .transition(&transition(plan.id, "scheduled", "alice", "inspector"))
        .await
        .expect("Transition should succeed");
    assert_eq!(previous, Some(InspectionStatus::Planned));

    let shown = workflow
        .show_plan(&Id { id: plan.id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shown.status, InspectionStatus::Scheduled);

    let log = workflow.status_log(&Id { id: plan.id }).await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].old_status, InspectionStatus::Planned);
    assert_eq!(log[0].new_status, InspectionStatus::Scheduled);
    assert_eq!(log[0].changed_by, "alice");
}

#[tokio::test]
async fn test_illegal_transition_rejected() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let plan = workflow.create_plan(&sample_plan("Illegal")).await.unwrap();

    // Planned -> Approved is not in the transition table even for a
    // supervisor.
    let result = workflow
        .transition(&transition(plan.id, "approved", "bob", "supervisor"))
        .await;
    assert!(matches!(
        result,
        Err(WorkflowError::InvalidTransition {
            from: InspectionStatus::Planned,
            to: InspectionStatus::Approved,
        })
    ));

    let log = workflow.status_log(&Id { id: plan.id }).await.unwrap();
    assert!(log.is_empty());
}

#[tokio::test]
async fn test_same_status_transition_is_noop() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let plan = workflow.create_plan(&sample_plan("Noop")).await.unwrap();

    let previous = workflow
        .transition(&transition(plan.id, "planned", "alice", "inspector"))
        .await
        .expect("No-op transition should not error");
    assert_eq!(previous, None);

    let log = workflow.status_log(&Id { id: plan.id }).await.unwrap();
    assert!(log.is_empty());
}

#[tokio::test]
async fn test_supervisor_only_statuses_require_role() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let plan = workflow.create_plan(&sample_plan("Role")).await.unwrap();

    let result = workflow
        .transition(&transition(plan.id, "approved", "alice", "inspector"))
        .await;
    assert!(matches!(result, Err(WorkflowError::Unauthorized { .. })));

    let result = workflow
        .transition(&transition(plan.id, "rejected", "alice", "inspector"))
        .await;
    assert!(matches!(result, Err(WorkflowError::Unauthorized { .. })));
}

#[tokio::test]
async fn test_transition_unknown_plan() {
    let (_temp_dir, workflow) = create_test_workflow().await;

    let result = workflow
        .transition(&transition(999, "scheduled", "alice", "inspector"))
        .await;
    assert!(matches!(
        result,
        Err(WorkflowError::PlanNotFound { id: 999 })
    ));
}

fn reschedule_request(plan_id: u64) -> RequestReschedule {
    RequestReschedule {
        plan_id,
        start: "2026-09-10".to_string(),
        end: "2026-09-12".to_string(),
        reason: "Vessel still in service".to_string(),
        requested_by: "alice".to_string(),
    }
}

#[tokio::test]
async fn test_second_pending_reschedule_rejected() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let plan = workflow.create_plan(&sample_plan("Resched")).await.unwrap();

    let request = workflow
        .request_reschedule(&reschedule_request(plan.id))
        .await
        .expect("First request should succeed");
    assert_eq!(request.status, RescheduleStatus::Pending);

    let result = workflow.request_reschedule(&reschedule_request(plan.id)).await;
    assert!(matches!(
        result,
        Err(WorkflowError::PendingRescheduleExists { plan_id }) if plan_id == plan.id
    ));
}

#[tokio::test]
async fn test_reschedule_approval_rewrites_window() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let plan = workflow.create_plan(&sample_plan("Approve")).await.unwrap();
    workflow
        .request_reschedule(&reschedule_request(plan.id))
        .await
        .unwrap();

    let request = workflow
        .resolve_reschedule(&ResolveReschedule {
            plan_id: plan.id,
            approve: true,
            resolved_by: "bob".to_string(),
            role: "supervisor".to_string(),
            ..Default::default()
        })
        .await
        .expect("Approval should succeed");
    assert_eq!(request.status, RescheduleStatus::Approved);

    let shown = workflow
        .show_plan(&Id { id: plan.id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shown.status, InspectionStatus::Scheduled);
    assert_eq!(shown.start, date(2026, 9, 10));
    assert_eq!(shown.end, date(2026, 9, 12));
    assert_eq!(shown.due_date, date(2026, 9, 12));
    assert!(!shown.has_pending_reschedule());

    // The status change rode along in the audit trail.
    let log = workflow.status_log(&Id { id: plan.id }).await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].new_status, InspectionStatus::Scheduled);
    assert_eq!(log[0].changed_by, "bob");
}

#[tokio::test]
async fn test_reschedule_approval_with_override_window() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let plan = workflow.create_plan(&sample_plan("Override")).await.unwrap();
    workflow
        .request_reschedule(&reschedule_request(plan.id))
        .await
        .unwrap();

    workflow
        .resolve_reschedule(&ResolveReschedule {
            plan_id: plan.id,
            approve: true,
            approved_start: Some("2026-09-15".to_string()),
            approved_end: Some("2026-09-16".to_string()),
            resolved_by: "bob".to_string(),
            role: "supervisor".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let shown = workflow
        .show_plan(&Id { id: plan.id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shown.start, date(2026, 9, 15));
    assert_eq!(shown.due_date, date(2026, 9, 16));

    // The requester hears back about the decision.
    let inbox = workflow
        .list_notifications(&ListNotifications {
            user: "alice".to_string(),
            unread_only: false,
        })
        .await
        .unwrap();
    assert_eq!(inbox.len(), 1);
    assert!(inbox[0]
        .title
        .contains(&format!("Reschedule approved for plan {}", plan.id)));
    assert!(inbox[0].message.contains("2026-09-15"));
}

#[tokio::test]
async fn test_reschedule_approval_keeping_plan_dates() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let plan = workflow
        .create_plan(&sample_plan("Keep dates"))
        .await
        .unwrap();
    workflow
        .request_reschedule(&reschedule_request(plan.id))
        .await
        .unwrap();

    let request = workflow
        .resolve_reschedule(&ResolveReschedule {
            plan_id: plan.id,
            approve: true,
            use_plan_dates: true,
            resolved_by: "bob".to_string(),
            role: "supervisor".to_string(),
            ..Default::default()
        })
        .await
        .expect("Approval should succeed");
    assert_eq!(request.status, RescheduleStatus::Approved);

    // The plan keeps its own window, not the requested one.
    let shown = workflow
        .show_plan(&Id { id: plan.id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shown.start, plan.start);
    assert_eq!(shown.end, plan.end);
    assert_eq!(shown.status, InspectionStatus::Scheduled);
}

#[tokio::test]
async fn test_reschedule_approval_reassigns_inspector() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let plan = workflow
        .create_plan(&sample_plan("Handover"))
        .await
        .unwrap();
    workflow
        .request_reschedule(&reschedule_request(plan.id))
        .await
        .unwrap();

    workflow
        .resolve_reschedule(&ResolveReschedule {
            plan_id: plan.id,
            approve: true,
            reassign: Some("carol".to_string()),
            resolved_by: "bob".to_string(),
            role: "supervisor".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let shown = workflow
        .show_plan(&Id { id: plan.id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shown.inspector, "carol");
}

#[tokio::test]
async fn test_reschedule_rejection_leaves_plan_untouched() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let plan = workflow.create_plan(&sample_plan("Reject")).await.unwrap();
    workflow
        .request_reschedule(&reschedule_request(plan.id))
        .await
        .unwrap();

    let request = workflow
        .resolve_reschedule(&ResolveReschedule {
            plan_id: plan.id,
            approve: false,
            rejection_reason: Some("Window clashes with the turnaround".to_string()),
            resolved_by: "bob".to_string(),
            role: "supervisor".to_string(),
            ..Default::default()
        })
        .await
        .expect("Rejection should succeed");
    assert_eq!(request.status, RescheduleStatus::Rejected);
    assert_eq!(
        request.rejection_reason.as_deref(),
        Some("Window clashes with the turnaround")
    );

    let shown = workflow
        .show_plan(&Id { id: plan.id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shown.status, InspectionStatus::Planned);
    assert_eq!(shown.start, date(2026, 9, 1));
    assert!(!shown.has_pending_reschedule());
}

#[tokio::test]
async fn test_reschedule_resolution_requires_supervisor() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let plan = workflow.create_plan(&sample_plan("RoleCheck")).await.unwrap();
    workflow
        .request_reschedule(&reschedule_request(plan.id))
        .await
        .unwrap();

    let result = workflow
        .resolve_reschedule(&ResolveReschedule {
            plan_id: plan.id,
            approve: true,
            resolved_by: "alice".to_string(),
            role: "inspector".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(result, Err(WorkflowError::Unauthorized { .. })));
}

#[tokio::test]
async fn test_cancel_reschedule_clears_request() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let plan = workflow.create_plan(&sample_plan("Cancel")).await.unwrap();
    workflow
        .request_reschedule(&reschedule_request(plan.id))
        .await
        .unwrap();

    workflow
        .cancel_reschedule(&Id { id: plan.id })
        .await
        .expect("Cancel should succeed");

    let shown = workflow
        .show_plan(&Id { id: plan.id })
        .await
        .unwrap()
        .unwrap();
    assert!(shown.reschedule_request.is_none());

    // A fresh request is allowed again.
    workflow
        .request_reschedule(&reschedule_request(plan.id))
        .await
        .expect("New request should succeed after cancel");
}

#[tokio::test]
async fn test_sweep_marks_due_plans_overdue() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let plan = workflow.create_plan(&sample_plan("Sweep")).await.unwrap();

    let swept = workflow
        .sweep_overdue(date(2026, 9, 4))
        .await
        .expect("Sweep should succeed");
    assert_eq!(swept, vec![(plan.id, InspectionStatus::Planned)]);

    let shown = workflow
        .show_plan(&Id { id: plan.id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shown.status, InspectionStatus::Overdue);

    let log = workflow.status_log(&Id { id: plan.id }).await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].changed_by, "system");

    // Already-overdue plans are not swept again.
    let swept = workflow.sweep_overdue(date(2026, 9, 5)).await.unwrap();
    assert!(swept.is_empty());

    // An overdue plan can still be picked up by its inspector.
    workflow
        .transition(&transition(plan.id, "inprogress", "alice", "inspector"))
        .await
        .expect("Overdue plan should transition to InProgress");
    let log = workflow.status_log(&Id { id: plan.id }).await.unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log[1].old_status, InspectionStatus::Overdue);
    assert_eq!(log[1].new_status, InspectionStatus::InProgress);
}

#[tokio::test]
async fn test_sweep_skips_plans_not_yet_due_or_in_progress() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let early = workflow.create_plan(&sample_plan("Early")).await.unwrap();
    let started = workflow.create_plan(&sample_plan("Started")).await.unwrap();
    workflow
        .transition(&transition(started.id, "inprogress", "alice", "inspector"))
        .await
        .unwrap();

    // On the due date itself nothing is overdue yet.
    let swept = workflow.sweep_overdue(date(2026, 9, 3)).await.unwrap();
    assert!(swept.is_empty());

    // Past the due date only the untouched plan is swept.
    let swept = workflow.sweep_overdue(date(2026, 9, 10)).await.unwrap();
    assert_eq!(swept, vec![(early.id, InspectionStatus::Planned)]);
}

#[tokio::test]
async fn test_delete_requires_confirmation_and_early_lifecycle() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let plan = workflow.create_plan(&sample_plan("Delete")).await.unwrap();

    let result = workflow
        .delete_plan(&DeletePlan {
            id: plan.id,
            confirmed: false,
        })
        .await;
    assert!(matches!(result, Err(WorkflowError::InvalidInput { .. })));

    workflow
        .transition(&transition(plan.id, "inprogress", "alice", "inspector"))
        .await
        .unwrap();
    let result = workflow
        .delete_plan(&DeletePlan {
            id: plan.id,
            confirmed: true,
        })
        .await;
    assert!(matches!(result, Err(WorkflowError::InvalidInput { .. })));

    let deletable = workflow.create_plan(&sample_plan("Gone")).await.unwrap();
    let deleted = workflow
        .delete_plan(&DeletePlan {
            id: deletable.id,
            confirmed: true,
        })
        .await
        .expect("Delete should succeed")
        .expect("Deleted plan should be returned");
    assert_eq!(deleted.title, "Gone");

    let shown = workflow.show_plan(&Id { id: deletable.id }).await.unwrap();
    assert!(shown.is_none());
}

#[tokio::test]
async fn test_checklist_progress_in_summaries() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let plan = workflow.create_plan(&sample_plan("Tasks")).await.unwrap();

    let first = workflow
        .add_task(&TaskCreate {
            plan_id: plan.id,
            text: "Verify relief valve tag".to_string(),
        })
        .await
        .unwrap();
    workflow
        .add_task(&TaskCreate {
            plan_id: plan.id,
            text: "Measure shell thickness".to_string(),
        })
        .await
        .unwrap();
    workflow
        .update_task(&UpdateTask {
            id: first.id,
            status: "completed".to_string(),
        })
        .await
        .unwrap();

    let summaries = workflow
        .list_plans_summary(&ListPlans::default())
        .await
        .unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].total_tasks, 2);
    assert_eq!(summaries[0].completed_tasks, 1);

    let shown = workflow
        .show_plan(&Id { id: plan.id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shown.tasks.len(), 2);
    assert_eq!(shown.tasks[0].status, TaskStatus::Completed);
    assert_eq!(shown.tasks[1].status, TaskStatus::Pending);
}

#[tokio::test]
async fn test_list_plans_with_status_filter() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let scheduled = workflow.create_plan(&sample_plan("First")).await.unwrap();
    workflow.create_plan(&sample_plan("Second")).await.unwrap();
    workflow
        .transition(&transition(scheduled.id, "scheduled", "alice", "inspector"))
        .await
        .unwrap();

    let summaries = workflow
        .list_plans_summary(&ListPlans {
            status: Some(InspectionStatus::Scheduled),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].id, scheduled.id);
}

#[tokio::test]
async fn test_transition_notifies_inspectors_but_not_actor() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let plan = workflow.create_plan(&sample_plan("Notify")).await.unwrap();

    // alice is the plan's inspector; bob makes the change.
    workflow
        .transition(&transition(plan.id, "scheduled", "bob", "supervisor"))
        .await
        .unwrap();

    let inbox = workflow
        .list_notifications(&ListNotifications {
            user: "alice".to_string(),
            unread_only: false,
        })
        .await
        .unwrap();
    assert_eq!(inbox.len(), 1);
    assert!(inbox[0].title.contains("Scheduled"));
    assert_eq!(inbox[0].link.as_deref(), Some(format!("/plans/{}", plan.id).as_str()));

    // The actor changing their own plan gets nothing.
    workflow
        .transition(&transition(plan.id, "inprogress", "alice", "inspector"))
        .await
        .unwrap();
    let inbox = workflow
        .list_notifications(&ListNotifications {
            user: "alice".to_string(),
            unread_only: false,
        })
        .await
        .unwrap();
    assert_eq!(inbox.len(), 1);
}

#[tokio::test]
async fn test_submission_fans_out_to_supervisor_role() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    workflow
        .add_user(&AddUser {
            identity: "carol".to_string(),
            display_name: None,
            role: "Lead Supervisor".to_string(),
        })
        .await
        .unwrap();

    let plan = workflow.create_plan(&sample_plan("Fanout")).await.unwrap();
    workflow
        .transition(&transition(plan.id, "inprogress", "alice", "inspector"))
        .await
        .unwrap();
    workflow
        .transition(&transition(plan.id, "submitted", "alice", "inspector"))
        .await
        .unwrap();

    // Containment matching: "Lead Supervisor" matches the supervisor role.
    let inbox = workflow
        .list_notifications(&ListNotifications {
            user: "carol".to_string(),
            unread_only: true,
        })
        .await
        .unwrap();
    assert_eq!(inbox.len(), 1);
    assert!(inbox[0].message.contains("awaits review"));
}

#[tokio::test]
async fn test_mark_notification_read() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let delivered = workflow
        .notify_user(
            "alice",
            "Heads up",
            "Shift change at 14:00",
            NotificationKind::Info,
            None,
        )
        .await
        .unwrap();

    workflow
        .mark_notification_read(&Id { id: delivered.id })
        .await
        .unwrap();

    let unread = workflow
        .list_notifications(&ListNotifications {
            user: "alice".to_string(),
            unread_only: true,
        })
        .await
        .unwrap();
    assert!(unread.is_empty());

    let all = workflow
        .list_notifications(&ListNotifications {
            user: "alice".to_string(),
            unread_only: false,
        })
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
    assert!(all[0].read);
}

#[tokio::test]
async fn test_report_submission_syncs_plan_status() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let plan = workflow.create_plan(&sample_plan("Report")).await.unwrap();
    workflow
        .transition(&transition(plan.id, "inprogress", "alice", "inspector"))
        .await
        .unwrap();

    let report = workflow
        .create_report(&CreateReport {
            plan_id: plan.id,
            findings: Some("No wall loss beyond tolerance.".to_string()),
            photo_json: None,
        })
        .await
        .unwrap();
    assert_eq!(report.status, ReportStatus::Draft);

    let report = workflow.submit_report(plan.id, "alice").await.unwrap();
    assert_eq!(report.status, ReportStatus::Submitted);

    let shown = workflow
        .show_plan(&Id { id: plan.id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shown.status, InspectionStatus::Submitted);
}

#[tokio::test]
async fn test_report_sync_failure_is_swallowed() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let plan = workflow.create_plan(&sample_plan("Drift")).await.unwrap();
    workflow
        .create_report(&CreateReport {
            plan_id: plan.id,
            findings: None,
            photo_json: None,
        })
        .await
        .unwrap();

    // Planned -> Submitted is illegal for the plan, but the report change
    // still stands.
    let report = workflow.submit_report(plan.id, "alice").await.unwrap();
    assert_eq!(report.status, ReportStatus::Submitted);

    let shown = workflow
        .show_plan(&Id { id: plan.id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shown.status, InspectionStatus::Planned);
}

#[tokio::test]
async fn test_report_review_requires_supervisor() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let plan = workflow.create_plan(&sample_plan("Review")).await.unwrap();
    workflow
        .create_report(&CreateReport {
            plan_id: plan.id,
            findings: None,
            photo_json: None,
        })
        .await
        .unwrap();

    let result = workflow
        .review_report(&ReviewReport {
            plan_id: plan.id,
            approve: true,
            reviewer: "alice".to_string(),
            role: "inspector".to_string(),
        })
        .await;
    assert!(matches!(result, Err(WorkflowError::Unauthorized { .. })));
}

#[tokio::test]
async fn test_report_approval_flow() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let plan = workflow.create_plan(&sample_plan("Full")).await.unwrap();
    workflow
        .transition(&transition(plan.id, "inprogress", "alice", "inspector"))
        .await
        .unwrap();
    workflow
        .create_report(&CreateReport {
            plan_id: plan.id,
            findings: Some("Minor pitting, within limits.".to_string()),
            photo_json: None,
        })
        .await
        .unwrap();
    workflow.submit_report(plan.id, "alice").await.unwrap();

    let report = workflow
        .review_report(&ReviewReport {
            plan_id: plan.id,
            approve: true,
            reviewer: "bob".to_string(),
            role: "supervisor".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(report.status, ReportStatus::Approved);

    let shown = workflow
        .show_plan(&Id { id: plan.id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shown.status, InspectionStatus::Approved);
}

#[tokio::test]
async fn test_duplicate_report_rejected() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let plan = workflow.create_plan(&sample_plan("Dup")).await.unwrap();
    let params = CreateReport {
        plan_id: plan.id,
        findings: None,
        photo_json: None,
    };
    workflow.create_report(&params).await.unwrap();

    let result = workflow.create_report(&params).await;
    assert!(matches!(result, Err(WorkflowError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_login_rotates_session_token() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    workflow
        .add_user(&AddUser {
            identity: "alice".to_string(),
            display_name: Some("Alice".to_string()),
            role: "inspector".to_string(),
        })
        .await
        .unwrap();

    let first = workflow.login("alice").await.unwrap();
    assert_eq!(
        workflow.check_session("alice", &first).await.unwrap(),
        SessionVerdict::Active
    );

    let second = workflow.login("alice").await.unwrap();
    assert_ne!(first, second);
    assert_eq!(
        workflow.check_session("alice", &first).await.unwrap(),
        SessionVerdict::SupersededElsewhere
    );
    assert_eq!(
        workflow.check_session("alice", &second).await.unwrap(),
        SessionVerdict::Active
    );
}

#[tokio::test]
async fn test_login_unknown_user() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let result = workflow.login("nobody").await;
    assert!(matches!(result, Err(WorkflowError::UserNotFound { .. })));
}
