use vigil_core::{
    params::{
        CreatePlan, CreateReport, Id, ListNotifications, ListPlans, RequestReschedule,
        ResolveReschedule, ReviewReport, TaskCreate, TransitionPlan, UpdateTask,
    },
    InspectionStatus, ReportStatus, RescheduleStatus, SessionVerdict, TaskStatus,
};

mod common;
use common::create_test_workflow;

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
async fn test_complete_inspection_workflow() {
    let (_temp_dir, workflow) = create_test_workflow().await;

    // Create a plan with a checklist
    let plan = workflow
        .create_plan(&sample_plan("Integration Test"))
        .await
        .expect("Failed to create plan");
    let task1 = workflow
        .add_task(&TaskCreate {
            plan_id: plan.id,
            text: "Check welds".to_string(),
        })
        .await
        .expect("Failed to add task");
    let task2 = workflow
        .add_task(&TaskCreate {
            plan_id: plan.id,
            text: "Check supports".to_string(),
        })
        .await
        .expect("Failed to add task");

    // Walk the plan through the field visit
    for status in ["scheduled", "inprogress"] {
        workflow
            .transition(&transition(plan.id, status, "alice", "inspector"))
            .await
            .expect("Failed to transition");
    }
    for task in [&task1, &task2] {
        workflow
            .update_task(&UpdateTask {
                id: task.id,
                status: "completed".to_string(),
            })
            .await
            .expect("Failed to complete task");
    }
    workflow
        .transition(&transition(plan.id, "completed", "alice", "inspector"))
        .await
        .expect("Failed to transition");

    // File, submit, and approve the report
    workflow
        .create_report(&CreateReport {
            plan_id: plan.id,
            findings: Some("Minor pitting on the south nozzle".to_string()),
            photo_json: None,
        })
        .await
        .expect("Failed to create report");
    let report = workflow
        .submit_report(plan.id, "alice")
        .await
        .expect("Failed to submit report");
    assert_eq!(report.status, ReportStatus::Submitted);

    let report = workflow
        .review_report(&ReviewReport {
            plan_id: plan.id,
            approve: true,
            reviewer: "boss".to_string(),
            role: "supervisor".to_string(),
        })
        .await
        .expect("Failed to review report");
    assert_eq!(report.status, ReportStatus::Approved);

    // The plan followed the report through Submitted to Approved
    let plan = workflow
        .get_plan(&Id { id: plan.id })
        .await
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert_eq!(plan.status, InspectionStatus::Approved);
    assert_eq!(plan.tasks.len(), 2);
    assert!(plan.tasks.iter().all(|t| t.status == TaskStatus::Completed));

    // Every hop left an audit row
    let log = workflow
        .status_log(&Id { id: plan.id })
        .await
        .expect("Failed to read log");
    assert_eq!(log.len(), 5);
    assert_eq!(log[0].old_status, InspectionStatus::Planned);
    assert_eq!(log.last().unwrap().new_status, InspectionStatus::Approved);
}

#[tokio::test]
async fn test_reschedule_workflow_end_to_end() {
    let (_temp_dir, workflow) = create_test_workflow().await;

    let plan = workflow
        .create_plan(&sample_plan("Reschedule Flow"))
        .await
        .expect("Failed to create plan");

    let request = workflow
        .request_reschedule(&RequestReschedule {
            plan_id: plan.id,
            start: "2026-09-10".to_string(),
            end: "2026-09-12".to_string(),
            reason: "Vessel still in service".to_string(),
            requested_by: "alice".to_string(),
        })
        .await
        .expect("Failed to request reschedule");
    assert_eq!(request.status, RescheduleStatus::Pending);

    // Listing can narrow to plans awaiting a decision
    let pending = workflow
        .list_plans_summary(&ListPlans {
            pending_reschedule: true,
            ..Default::default()
        })
        .await
        .expect("Failed to list plans");
    assert_eq!(pending.len(), 1);

    let request = workflow
        .resolve_reschedule(&ResolveReschedule {
            plan_id: plan.id,
            approve: true,
            rejection_reason: None,
            approved_start: None,
            approved_end: None,
            resolved_by: "boss".to_string(),
            role: "supervisor".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to approve reschedule");
    assert_eq!(request.status, RescheduleStatus::Approved);

    // The approved window became the plan's schedule
    let plan = workflow
        .get_plan(&Id { id: plan.id })
        .await
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert_eq!(plan.status, InspectionStatus::Scheduled);
    assert_eq!(plan.start.to_string(), "2026-09-10");
    assert_eq!(plan.due_date.to_string(), "2026-09-12");

    // The requester hears back
    let inbox = workflow
        .list_notifications(&ListNotifications {
            user: "alice".to_string(),
            unread_only: false,
        })
        .await
        .expect("Failed to list notifications");
    assert!(!inbox.is_empty());
}

#[tokio::test]
async fn test_rejected_report_can_be_resubmitted() {
    let (_temp_dir, workflow) = create_test_workflow().await;

    let plan = workflow
        .create_plan(&sample_plan("Second Chance"))
        .await
        .expect("Failed to create plan");
    for status in ["scheduled", "inprogress", "completed"] {
        workflow
            .transition(&transition(plan.id, status, "alice", "inspector"))
            .await
            .expect("Failed to transition");
    }
    workflow
        .create_report(&CreateReport {
            plan_id: plan.id,
            findings: Some("Initial findings".to_string()),
            photo_json: None,
        })
        .await
        .expect("Failed to create report");
    workflow
        .submit_report(plan.id, "alice")
        .await
        .expect("Failed to submit report");

    // Supervisor sends the report back
    workflow
        .review_report(&ReviewReport {
            plan_id: plan.id,
            approve: false,
            reviewer: "boss".to_string(),
            role: "supervisor".to_string(),
        })
        .await
        .expect("Failed to reject report");

    let plan_state = workflow
        .get_plan(&Id { id: plan.id })
        .await
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert_eq!(plan_state.status, InspectionStatus::Rejected);

    // Revised findings go back up for review
    workflow
        .update_report(&CreateReport {
            plan_id: plan.id,
            findings: Some("Revised findings".to_string()),
            photo_json: None,
        })
        .await
        .expect("Failed to update report");
    let report = workflow
        .submit_report(plan.id, "alice")
        .await
        .expect("Failed to resubmit report");
    assert_eq!(report.status, ReportStatus::Submitted);

    let plan_state = workflow
        .get_plan(&Id { id: plan.id })
        .await
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert_eq!(plan_state.status, InspectionStatus::Submitted);
}

#[tokio::test]
async fn test_session_lifecycle() {
    let (_temp_dir, workflow) = create_test_workflow().await;

    workflow
        .add_user(&vigil_core::params::AddUser {
            identity: "alice".to_string(),
            display_name: Some("Alice Smith".to_string()),
            role: "senior inspector".to_string(),
        })
        .await
        .expect("Failed to add user");

    let token = workflow.login("alice").await.expect("Failed to log in");
    let verdict = workflow
        .check_session("alice", &token)
        .await
        .expect("Failed to check session");
    assert_eq!(verdict, SessionVerdict::Active);

    // A login elsewhere rotates the token and kicks the first client
    let newer = workflow.login("alice").await.expect("Failed to log in");
    assert_ne!(token, newer);
    let verdict = workflow
        .check_session("alice", &token)
        .await
        .expect("Failed to check session");
    assert_eq!(verdict, SessionVerdict::SupersededElsewhere);
    let verdict = workflow
        .check_session("alice", &newer)
        .await
        .expect("Failed to check session");
    assert_eq!(verdict, SessionVerdict::Active);
}
