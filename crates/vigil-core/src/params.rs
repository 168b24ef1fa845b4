//! Parameter structures for workflow operations.
//!
//! Shared parameter structures usable across interfaces (CLI today, other
//! frontends later) without framework-specific derives. Interface layers wrap
//! these with their own derives (clap's `Args`, for example) and convert via
//! `From` impls, so the core stays free of UI dependencies.
//!
//! Structures that carry raw user input expose a `validate()` method that
//! parses dates, enums, and cross-field rules into typed values.

use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, WorkflowError},
    models::{
        InspectionStatus, NewPlan, PhotoFinding, RiskCategory, Role, ScheduleWindow, TaskStatus,
    },
};

fn parse_date(field: &str, value: &str) -> Result<Date> {
    Date::from_str(value).map_err(|e| {
        WorkflowError::invalid_input(field)
            .with_reason(format!("Invalid date '{value}' (expected YYYY-MM-DD): {e}"))
    })
}

fn require_nonempty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(WorkflowError::invalid_input(field).with_reason("Value must not be empty"));
    }
    Ok(())
}

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new inspection plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlan {
    /// Title of the plan (required)
    pub title: String,
    /// Identifier of the equipment under inspection (required)
    pub equipment_id: String,
    /// Optional site or area the equipment lives in
    pub location: Option<String>,
    /// Risk category ('low', 'medium', 'high', or 'critical')
    pub risk_category: Option<String>,
    /// Optional free-text inspection type
    pub inspection_type: Option<String>,
    /// Identity of the primary assigned inspector (required)
    pub inspector: String,
    /// Additional inspector identities
    #[serde(default)]
    pub inspectors: Vec<String>,
    /// First day of the inspection window (YYYY-MM-DD)
    pub start: String,
    /// Last day of the inspection window (YYYY-MM-DD)
    pub end: String,
    /// Completion deadline; defaults to the window end when omitted
    pub due_date: Option<String>,
}

impl CreatePlan {
    /// Parses dates and the risk category, checks required fields, and
    /// defaults the due date to the window end.
    pub fn validate(&self) -> Result<NewPlan> {
        require_nonempty("title", &self.title)?;
        require_nonempty("equipment_id", &self.equipment_id)?;
        require_nonempty("inspector", &self.inspector)?;

        let start = parse_date("start", &self.start)?;
        let end = parse_date("end", &self.end)?;
        if end < start {
            return Err(WorkflowError::invalid_input("end")
                .with_reason("Window end must not precede its start"));
        }

        let due_date = match &self.due_date {
            Some(raw) => {
                let due = parse_date("due_date", raw)?;
                if due < end {
                    return Err(WorkflowError::invalid_input("due_date")
                        .with_reason("Due date must not precede the window end"));
                }
                due
            }
            None => end,
        };

        let risk_category = match &self.risk_category {
            Some(raw) => RiskCategory::from_str(raw).map_err(|e| {
                WorkflowError::invalid_input("risk_category").with_reason(e)
            })?,
            None => RiskCategory::default(),
        };

        Ok(NewPlan {
            title: self.title.clone(),
            equipment_id: self.equipment_id.clone(),
            location: self.location.clone(),
            risk_category,
            inspection_type: self.inspection_type.clone(),
            inspector: self.inspector.clone(),
            inspectors: self.inspectors.clone(),
            start,
            end,
            due_date,
        })
    }
}

/// Parameters for listing inspection plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPlans {
    /// Only plans in this lifecycle status
    pub status: Option<InspectionStatus>,
    /// Only plans assigned to this inspector identity
    pub inspector: Option<String>,
    /// Only plans with a pending reschedule request
    #[serde(default)]
    pub pending_reschedule: bool,
}

/// Parameters for deleting a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeletePlan {
    /// ID of the plan to delete
    pub id: u64,
    /// Whether the caller has confirmed the deletion
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for moving a plan to a new lifecycle status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransitionPlan {
    /// ID of the plan to transition
    pub id: u64,
    /// Target status name
    pub status: String,
    /// Identity of the person making the change
    pub actor: String,
    /// Acting role ('inspector' or 'supervisor')
    pub role: String,
}

impl TransitionPlan {
    /// Parses the target status and acting role.
    pub fn validate(&self) -> Result<(InspectionStatus, Role)> {
        require_nonempty("actor", &self.actor)?;
        let status = InspectionStatus::from_str(&self.status)
            .map_err(|e| WorkflowError::invalid_input("status").with_reason(e))?;
        let role = Role::from_str(&self.role)
            .map_err(|e| WorkflowError::invalid_input("role").with_reason(e))?;
        Ok((status, role))
    }
}

/// Parameters for filing a reschedule request against a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestReschedule {
    /// ID of the plan to reschedule
    pub plan_id: u64,
    /// Proposed new window start (YYYY-MM-DD)
    pub start: String,
    /// Proposed new window end (YYYY-MM-DD)
    pub end: String,
    /// Why the plan cannot run in its current window (required)
    pub reason: String,
    /// Identity of the requesting inspector
    pub requested_by: String,
}

impl RequestReschedule {
    /// Parses the proposed window and checks the reason is present.
    pub fn validate(&self) -> Result<ScheduleWindow> {
        require_nonempty("reason", &self.reason)?;
        require_nonempty("requested_by", &self.requested_by)?;

        let start = parse_date("start", &self.start)?;
        let end = parse_date("end", &self.end)?;
        if end < start {
            return Err(WorkflowError::invalid_input("end")
                .with_reason("Window end must not precede its start"));
        }
        Ok(ScheduleWindow { start, end })
    }
}

/// Parameters for approving or rejecting a pending reschedule request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolveReschedule {
    /// ID of the plan carrying the request
    pub plan_id: u64,
    /// True to approve the request, false to reject it
    pub approve: bool,
    /// Required when rejecting
    pub rejection_reason: Option<String>,
    /// Optional supervisor override of the approved window start
    pub approved_start: Option<String>,
    /// Optional supervisor override of the approved window end
    pub approved_end: Option<String>,
    /// Keep the plan's current window on approval instead of the requested one
    pub use_plan_dates: bool,
    /// Hand the plan to a different inspector on approval
    pub reassign: Option<String>,
    /// Identity of the resolving supervisor
    pub resolved_by: String,
    /// Acting role ('inspector' or 'supervisor')
    pub role: String,
}

impl ResolveReschedule {
    /// Parses the acting role and, on approval, the optional window override.
    ///
    /// Returns the role and the override window. Both override dates must be
    /// given together; explicit overrides beat `use_plan_dates`, which in
    /// turn beats the requested window. Rejection requires a reason.
    pub fn validate(&self) -> Result<(Role, Option<ScheduleWindow>)> {
        require_nonempty("resolved_by", &self.resolved_by)?;
        let role = Role::from_str(&self.role)
            .map_err(|e| WorkflowError::invalid_input("role").with_reason(e))?;
        if let Some(reassign) = &self.reassign {
            require_nonempty("reassign", reassign)?;
        }

        if !self.approve {
            match &self.rejection_reason {
                Some(reason) if !reason.trim().is_empty() => return Ok((role, None)),
                _ => {
                    return Err(WorkflowError::invalid_input("rejection_reason")
                        .with_reason("A reason is required when rejecting a reschedule request"))
                }
            }
        }

        let window = match (&self.approved_start, &self.approved_end) {
            (Some(start), Some(end)) => {
                let start = parse_date("approved_start", start)?;
                let end = parse_date("approved_end", end)?;
                if end < start {
                    return Err(WorkflowError::invalid_input("approved_end")
                        .with_reason("Window end must not precede its start"));
                }
                Some(ScheduleWindow { start, end })
            }
            (None, None) => None,
            _ => {
                return Err(WorkflowError::invalid_input("approved_start")
                    .with_reason("Override start and end dates must be given together"))
            }
        };
        Ok((role, window))
    }
}

/// Parameters for adding a checklist task to a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskCreate {
    /// ID of the plan to add the task to
    pub plan_id: u64,
    /// Task text (required)
    pub text: String,
}

impl TaskCreate {
    pub fn validate(&self) -> Result<()> {
        require_nonempty("text", &self.text)
    }
}

/// Parameters for updating a checklist task's status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// ID of the task to update
    pub id: u64,
    /// New status ('pending' or 'completed')
    pub status: String,
}

impl UpdateTask {
    /// Parses the target task status.
    pub fn validate(&self) -> Result<TaskStatus> {
        TaskStatus::from_str(&self.status)
            .map_err(|e| WorkflowError::invalid_input("status").with_reason(e))
    }
}

/// Parameters for creating or updating an inspection report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateReport {
    /// ID of the plan the report documents
    pub plan_id: u64,
    /// Free-text findings summary
    pub findings: Option<String>,
    /// Photo-backed findings as a JSON array
    pub photo_json: Option<String>,
}

impl CreateReport {
    /// Parses the photo findings JSON, if present.
    pub fn validate(&self) -> Result<Vec<PhotoFinding>> {
        match &self.photo_json {
            Some(raw) => Ok(serde_json::from_str(raw)?),
            None => Ok(Vec::new()),
        }
    }
}

/// Parameters for approving or rejecting a submitted report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewReport {
    /// ID of the plan whose report is under review
    pub plan_id: u64,
    /// True to approve the report, false to reject it
    pub approve: bool,
    /// Identity of the reviewer
    pub reviewer: String,
    /// Acting role ('inspector' or 'supervisor')
    pub role: String,
}

impl ReviewReport {
    /// Parses the acting role.
    pub fn validate(&self) -> Result<Role> {
        require_nonempty("reviewer", &self.reviewer)?;
        Role::from_str(&self.role)
            .map_err(|e| WorkflowError::invalid_input("role").with_reason(e))
    }
}

/// Parameters for registering or updating a user profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddUser {
    /// Unique identity (login name) of the user
    pub identity: String,
    /// Human-readable display name; defaults to the identity
    pub display_name: Option<String>,
    /// Free-text role description, matched by containment for fan-out
    pub role: String,
}

impl AddUser {
    pub fn validate(&self) -> Result<()> {
        require_nonempty("identity", &self.identity)?;
        require_nonempty("role", &self.role)
    }
}

/// Parameters for listing a user's notifications.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListNotifications {
    /// Identity whose inbox to read
    pub user: String,
    /// Only unread notifications
    #[serde(default)]
    pub unread_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_create() -> CreatePlan {
        CreatePlan {
            title: "Drum D-101 external".into(),
            equipment_id: "D-101".into(),
            inspector: "alice".into(),
            start: "2026-09-01".into(),
            end: "2026-09-03".into(),
            ..Default::default()
        }
    }

    #[test]
    fn create_plan_defaults_due_date_to_window_end() {
        let plan = base_create().validate().unwrap();
        assert_eq!(plan.due_date, plan.end);
        assert_eq!(plan.risk_category, RiskCategory::Medium);
    }

    #[test]
    fn create_plan_rejects_inverted_window() {
        let mut params = base_create();
        params.end = "2026-08-30".into();
        assert!(matches!(
            params.validate(),
            Err(WorkflowError::InvalidInput { field, .. }) if field == "end"
        ));
    }

    #[test]
    fn create_plan_rejects_due_date_before_end() {
        let mut params = base_create();
        params.due_date = Some("2026-09-02".into());
        assert!(matches!(
            params.validate(),
            Err(WorkflowError::InvalidInput { field, .. }) if field == "due_date"
        ));
    }

    #[test]
    fn create_plan_rejects_blank_title() {
        let mut params = base_create();
        params.title = "  ".into();
        assert!(params.validate().is_err());
    }

    #[test]
    fn create_plan_rejects_malformed_date() {
        let mut params = base_create();
        params.start = "09/01/2026".into();
        assert!(matches!(
            params.validate(),
            Err(WorkflowError::InvalidInput { field, .. }) if field == "start"
        ));
    }

    #[test]
    fn transition_parses_status_and_role() {
        let params = TransitionPlan {
            id: 1,
            status: "in_progress".into(),
            actor: "alice".into(),
            role: "inspector".into(),
        };
        let (status, role) = params.validate().unwrap();
        assert_eq!(status, InspectionStatus::InProgress);
        assert_eq!(role, Role::Inspector);
    }

    #[test]
    fn transition_rejects_unknown_status() {
        let params = TransitionPlan {
            id: 1,
            status: "paused".into(),
            actor: "alice".into(),
            role: "inspector".into(),
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn reschedule_request_requires_reason() {
        let params = RequestReschedule {
            plan_id: 1,
            start: "2026-09-10".into(),
            end: "2026-09-12".into(),
            reason: "".into(),
            requested_by: "alice".into(),
        };
        assert!(matches!(
            params.validate(),
            Err(WorkflowError::InvalidInput { field, .. }) if field == "reason"
        ));
    }

    #[test]
    fn resolve_rejection_requires_reason() {
        let params = ResolveReschedule {
            plan_id: 1,
            approve: false,
            resolved_by: "bob".into(),
            role: "supervisor".into(),
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(WorkflowError::InvalidInput { field, .. }) if field == "rejection_reason"
        ));
    }

    #[test]
    fn resolve_approval_accepts_override_window() {
        let params = ResolveReschedule {
            plan_id: 1,
            approve: true,
            approved_start: Some("2026-09-15".into()),
            approved_end: Some("2026-09-16".into()),
            resolved_by: "bob".into(),
            role: "supervisor".into(),
            ..Default::default()
        };
        let (role, window) = params.validate().unwrap();
        assert_eq!(role, Role::Supervisor);
        assert!(window.is_some());
    }

    #[test]
    fn resolve_approval_rejects_half_override() {
        let params = ResolveReschedule {
            plan_id: 1,
            approve: true,
            approved_start: Some("2026-09-15".into()),
            resolved_by: "bob".into(),
            role: "supervisor".into(),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn report_photo_json_parses() {
        let params = CreateReport {
            plan_id: 1,
            findings: Some("Shell corrosion on the north face".into()),
            photo_json: Some(
                r#"[{"photo_urls":["https://cdn/p1.jpg"],"finding":"Pitting","recommendation":"Re-coat"}]"#
                    .into(),
            ),
        };
        let photos = params.validate().unwrap();
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].finding, "Pitting");
    }

    #[test]
    fn report_photo_json_rejects_garbage() {
        let params = CreateReport {
            plan_id: 1,
            findings: None,
            photo_json: Some("not json".into()),
        };
        assert!(matches!(
            params.validate(),
            Err(WorkflowError::Serialization { .. })
        ));
    }

    #[test]
    fn task_status_parses() {
        let params = UpdateTask {
            id: 3,
            status: "completed".into(),
        };
        assert_eq!(params.validate().unwrap(), TaskStatus::Completed);
    }
}
