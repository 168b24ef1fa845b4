//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure using clap's derive API and the
//! parameter wrapper pattern: each command gets an `Args` struct with
//! clap-specific attributes plus a `From` conversion into the core parameter
//! type, so core types stay free of CLI framework concerns.
//!
//! ```text
//! User Input -> CLI Args (clap) -> Core Params -> Workflow
//! ```

use clap::{Args, Subcommand, ValueEnum};
use jiff::Zoned;
use vigil_core::{
    display::{CreateResult, DeleteResult, OperationStatus, SweepResult, TransitionResult},
    params::{
        AddUser, CreatePlan, CreateReport, DeletePlan, Id, ListNotifications, ListPlans,
        RequestReschedule, ResolveReschedule, ReviewReport, TaskCreate, TransitionPlan, UpdateTask,
    },
    Workflow,
};

use crate::renderer::TerminalRenderer;

/// Command-line representation of plan lifecycle statuses
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Planned,
    Scheduled,
    InProgress,
    Completed,
    Submitted,
    Approved,
    Rejected,
    Overdue,
}

impl From<StatusArg> for vigil_core::InspectionStatus {
    fn from(val: StatusArg) -> Self {
        use vigil_core::InspectionStatus as S;
        match val {
            StatusArg::Planned => S::Planned,
            StatusArg::Scheduled => S::Scheduled,
            StatusArg::InProgress => S::InProgress,
            StatusArg::Completed => S::Completed,
            StatusArg::Submitted => S::Submitted,
            StatusArg::Approved => S::Approved,
            StatusArg::Rejected => S::Rejected,
            StatusArg::Overdue => S::Overdue,
        }
    }
}

impl std::fmt::Display for StatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StatusArg::Planned => "planned",
            StatusArg::Scheduled => "scheduled",
            StatusArg::InProgress => "inprogress",
            StatusArg::Completed => "completed",
            StatusArg::Submitted => "submitted",
            StatusArg::Approved => "approved",
            StatusArg::Rejected => "rejected",
            StatusArg::Overdue => "overdue",
        };
        write!(f, "{name}")
    }
}

/// Command-line representation of acting roles
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Inspector,
    Supervisor,
}

impl std::fmt::Display for RoleArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleArg::Inspector => write!(f, "inspector"),
            RoleArg::Supervisor => write!(f, "supervisor"),
        }
    }
}

/// Create a new inspection plan
#[derive(Args)]
pub struct CreatePlanArgs {
    /// Title of the plan
    pub title: String,
    /// Identifier of the equipment under inspection
    #[arg(short, long)]
    pub equipment: String,
    /// Identity of the primary assigned inspector
    #[arg(short, long)]
    pub inspector: String,
    /// First day of the inspection window (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,
    /// Last day of the inspection window (YYYY-MM-DD)
    #[arg(long)]
    pub end: String,
    /// Completion deadline; defaults to the window end
    #[arg(long)]
    pub due: Option<String>,
    /// Site or area the equipment lives in
    #[arg(short, long)]
    pub location: Option<String>,
    /// Risk category (low, medium, high, critical)
    #[arg(short, long)]
    pub risk: Option<String>,
    /// Kind of inspection (visual, ultrasonic, hydrostatic, ...)
    #[arg(short = 't', long = "type")]
    pub inspection_type: Option<String>,
    /// Additional inspector identities as comma-separated list
    #[arg(long, value_delimiter = ',')]
    pub inspectors: Vec<String>,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            title: val.title,
            equipment_id: val.equipment,
            location: val.location,
            risk_category: val.risk,
            inspection_type: val.inspection_type,
            inspector: val.inspector,
            inspectors: val.inspectors,
            start: val.start,
            end: val.end,
            due_date: val.due,
        }
    }
}

/// List inspection plans
#[derive(Args)]
pub struct ListPlansArgs {
    /// Only plans in this lifecycle status
    #[arg(short, long)]
    pub status: Option<StatusArg>,
    /// Only plans assigned to this inspector identity
    #[arg(short, long)]
    pub inspector: Option<String>,
    /// Only plans with a pending reschedule request
    #[arg(long)]
    pub pending_reschedule: bool,
}

impl From<ListPlansArgs> for ListPlans {
    fn from(val: ListPlansArgs) -> Self {
        ListPlans {
            status: val.status.map(Into::into),
            inspector: val.inspector,
            pending_reschedule: val.pending_reschedule,
        }
    }
}

/// Show details of a specific plan
#[derive(Args)]
pub struct ShowPlanArgs {
    /// ID of the plan to display
    pub id: u64,
}

impl From<ShowPlanArgs> for Id {
    fn from(val: ShowPlanArgs) -> Self {
        Id { id: val.id }
    }
}

/// Delete a plan permanently
#[derive(Args)]
pub struct DeletePlanArgs {
    /// ID of the plan to delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeletePlanArgs> for DeletePlan {
    fn from(val: DeletePlanArgs) -> Self {
        DeletePlan {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

/// Move a plan to a new lifecycle status
#[derive(Args)]
pub struct TransitionPlanArgs {
    /// ID of the plan to transition
    pub id: u64,
    /// Target status
    pub status: StatusArg,
    /// Identity of the person making the change
    #[arg(short, long)]
    pub actor: String,
    /// Acting role
    #[arg(short, long, default_value_t = RoleArg::Inspector)]
    pub role: RoleArg,
}

impl From<TransitionPlanArgs> for TransitionPlan {
    fn from(val: TransitionPlanArgs) -> Self {
        TransitionPlan {
            id: val.id,
            status: val.status.to_string(),
            actor: val.actor,
            role: val.role.to_string(),
        }
    }
}

/// Mark due plans overdue
#[derive(Args)]
pub struct SweepArgs {
    /// Reference day for the sweep (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub as_of: Option<String>,
}

/// Add a checklist task to a plan
#[derive(Args)]
pub struct AddTaskArgs {
    /// ID of the plan to add the task to
    pub plan_id: u64,
    /// Task text
    pub text: String,
}

impl From<AddTaskArgs> for TaskCreate {
    fn from(val: AddTaskArgs) -> Self {
        TaskCreate {
            plan_id: val.plan_id,
            text: val.text,
        }
    }
}

/// Mark a checklist task completed
#[derive(Args)]
pub struct DoneTaskArgs {
    /// ID of the task to complete
    pub id: u64,
}

impl From<DoneTaskArgs> for UpdateTask {
    fn from(val: DoneTaskArgs) -> Self {
        UpdateTask {
            id: val.id,
            status: "completed".to_string(),
        }
    }
}

/// File a reschedule request against a plan
#[derive(Args)]
pub struct RequestRescheduleArgs {
    /// ID of the plan to reschedule
    pub plan_id: u64,
    /// Proposed new window start (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,
    /// Proposed new window end (YYYY-MM-DD)
    #[arg(long)]
    pub end: String,
    /// Why the plan cannot run in its current window
    #[arg(long)]
    pub reason: String,
    /// Identity of the requesting inspector
    #[arg(long = "by")]
    pub requested_by: String,
}

impl From<RequestRescheduleArgs> for RequestReschedule {
    fn from(val: RequestRescheduleArgs) -> Self {
        RequestReschedule {
            plan_id: val.plan_id,
            start: val.start,
            end: val.end,
            reason: val.reason,
            requested_by: val.requested_by,
        }
    }
}

/// Approve a pending reschedule request
#[derive(Args)]
pub struct ApproveRescheduleArgs {
    /// ID of the plan carrying the request
    pub plan_id: u64,
    /// Override the approved window start (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,
    /// Override the approved window end (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,
    /// Keep the plan's current window instead of the requested one
    #[arg(long = "keep-dates", conflicts_with_all = ["start", "end"])]
    pub keep_dates: bool,
    /// Hand the plan to a different inspector
    #[arg(long)]
    pub reassign: Option<String>,
    /// Identity of the resolving supervisor
    #[arg(long = "by")]
    pub resolved_by: String,
    /// Acting role
    #[arg(long, default_value_t = RoleArg::Supervisor)]
    pub role: RoleArg,
}

impl From<ApproveRescheduleArgs> for ResolveReschedule {
    fn from(val: ApproveRescheduleArgs) -> Self {
        ResolveReschedule {
            plan_id: val.plan_id,
            approve: true,
            rejection_reason: None,
            approved_start: val.start,
            approved_end: val.end,
            use_plan_dates: val.keep_dates,
            reassign: val.reassign,
            resolved_by: val.resolved_by,
            role: val.role.to_string(),
        }
    }
}

/// Reject a pending reschedule request
#[derive(Args)]
pub struct RejectRescheduleArgs {
    /// ID of the plan carrying the request
    pub plan_id: u64,
    /// Why the request was declined
    #[arg(long)]
    pub reason: String,
    /// Identity of the resolving supervisor
    #[arg(long = "by")]
    pub resolved_by: String,
    /// Acting role
    #[arg(long, default_value_t = RoleArg::Supervisor)]
    pub role: RoleArg,
}

impl From<RejectRescheduleArgs> for ResolveReschedule {
    fn from(val: RejectRescheduleArgs) -> Self {
        ResolveReschedule {
            plan_id: val.plan_id,
            approve: false,
            rejection_reason: Some(val.reason),
            approved_start: None,
            approved_end: None,
            use_plan_dates: false,
            reassign: None,
            resolved_by: val.resolved_by,
            role: val.role.to_string(),
        }
    }
}

/// Withdraw a reschedule request
#[derive(Args)]
pub struct CancelRescheduleArgs {
    /// ID of the plan carrying the request
    pub plan_id: u64,
}

/// Create a draft report for a plan
#[derive(Args)]
pub struct CreateReportArgs {
    /// ID of the plan the report documents
    pub plan_id: u64,
    /// Free-text findings summary
    #[arg(short, long)]
    pub findings: Option<String>,
    /// Photo-backed findings as a JSON array
    #[arg(long)]
    pub photo_json: Option<String>,
}

impl From<CreateReportArgs> for CreateReport {
    fn from(val: CreateReportArgs) -> Self {
        CreateReport {
            plan_id: val.plan_id,
            findings: val.findings,
            photo_json: val.photo_json,
        }
    }
}

/// Submit a plan's report for review
#[derive(Args)]
pub struct SubmitReportArgs {
    /// ID of the plan whose report to submit
    pub plan_id: u64,
    /// Identity of the submitting inspector
    #[arg(long = "by")]
    pub actor: String,
}

/// Approve or reject a submitted report
#[derive(Args)]
pub struct ReviewReportArgs {
    /// ID of the plan whose report is under review
    pub plan_id: u64,
    /// Identity of the reviewer
    #[arg(long = "by")]
    pub reviewer: String,
    /// Acting role
    #[arg(long, default_value_t = RoleArg::Supervisor)]
    pub role: RoleArg,
}

/// Show a plan's report
#[derive(Args)]
pub struct ShowReportArgs {
    /// ID of the plan whose report to show
    pub plan_id: u64,
}

/// List a user's notifications
#[derive(Args)]
pub struct NotifyListArgs {
    /// Identity whose inbox to read
    pub user: String,
    /// Only unread notifications
    #[arg(long)]
    pub unread: bool,
}

impl From<NotifyListArgs> for ListNotifications {
    fn from(val: NotifyListArgs) -> Self {
        ListNotifications {
            user: val.user,
            unread_only: val.unread,
        }
    }
}

/// Mark a notification as read
#[derive(Args)]
pub struct NotifyReadArgs {
    /// ID of the notification
    pub id: u64,
}

/// Register or update a user
#[derive(Args)]
pub struct UserAddArgs {
    /// Unique identity (login name)
    pub identity: String,
    /// Human-readable display name
    #[arg(long)]
    pub name: Option<String>,
    /// Free-text role description
    #[arg(long)]
    pub role: String,
}

impl From<UserAddArgs> for AddUser {
    fn from(val: UserAddArgs) -> Self {
        AddUser {
            identity: val.identity,
            display_name: val.name,
            role: val.role,
        }
    }
}

/// Start a session for a user
#[derive(Args)]
pub struct UserLoginArgs {
    /// Identity to log in as
    pub identity: String,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new inspection plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List inspection plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show details of a specific plan
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Show a plan's status history
    Log(ShowPlanArgs),
    /// Move a plan to a new lifecycle status
    #[command(alias = "tr")]
    Transition(TransitionPlanArgs),
    /// Mark due plans overdue
    Sweep(SweepArgs),
    /// Delete a plan permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a checklist task to a plan
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// Mark a checklist task completed
    Done(DoneTaskArgs),
}

#[derive(Subcommand)]
pub enum RescheduleCommands {
    /// File a reschedule request against a plan
    Request(RequestRescheduleArgs),
    /// Approve a pending reschedule request
    Approve(ApproveRescheduleArgs),
    /// Reject a pending reschedule request
    Reject(RejectRescheduleArgs),
    /// Withdraw a reschedule request
    Cancel(CancelRescheduleArgs),
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Create a draft report for a plan
    #[command(alias = "c")]
    Create(CreateReportArgs),
    /// Submit a plan's report for review
    Submit(SubmitReportArgs),
    /// Approve a submitted report
    Approve(ReviewReportArgs),
    /// Reject a submitted report
    Reject(ReviewReportArgs),
    /// Show a plan's report
    #[command(alias = "s")]
    Show(ShowReportArgs),
}

#[derive(Subcommand)]
pub enum NotifyCommands {
    /// List a user's notifications
    #[command(aliases = ["l", "ls"])]
    List(NotifyListArgs),
    /// Mark a notification as read
    Read(NotifyReadArgs),
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Register or update a user
    #[command(alias = "a")]
    Add(UserAddArgs),
    /// Start a session for a user
    Login(UserLoginArgs),
}

/// Command dispatcher tying the workflow to the terminal renderer.
pub struct Cli {
    workflow: Workflow,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(workflow: Workflow, renderer: TerminalRenderer) -> Self {
        Self { workflow, renderer }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> anyhow::Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let plan = self.workflow.create_plan(&args.into()).await?;
                self.renderer.render(&format!("{}", CreateResult::new(plan)))
            }
            PlanCommands::List(args) => self.list_plans(&args.into()).await,
            PlanCommands::Show(args) => {
                let params: Id = args.into();
                match self.workflow.show_plan(&params).await? {
                    Some(plan) => self.renderer.render(&format!("{plan}")),
                    None => self.renderer.render(&format!(
                        "{}",
                        OperationStatus::failure(format!(
                            "Inspection plan with ID {} not found",
                            params.id
                        ))
                    )),
                }
            }
            PlanCommands::Log(args) => {
                let log = self.workflow.status_log_display(&args.into()).await?;
                self.renderer.render(&format!("# Status History\n\n{log}"))
            }
            PlanCommands::Transition(args) => {
                let params: TransitionPlan = args.into();
                let (target, _) = params.validate()?;
                let previous = self.workflow.transition(&params).await?;
                self.renderer.render(&format!(
                    "{}",
                    TransitionResult {
                        plan_id: params.id,
                        previous,
                        target,
                    }
                ))
            }
            PlanCommands::Sweep(args) => {
                let today = match args.as_of {
                    Some(raw) => raw.parse()?,
                    None => Zoned::now().date(),
                };
                let swept = self.workflow.sweep_overdue(today).await?;
                self.renderer.render(&format!("{}", SweepResult(swept)))
            }
            PlanCommands::Delete(args) => {
                let params: DeletePlan = args.into();
                match self.workflow.delete_plan(&params).await? {
                    Some(plan) => self.renderer.render(&format!("{}", DeleteResult::new(plan))),
                    None => self.renderer.render(&format!(
                        "{}",
                        OperationStatus::failure(format!(
                            "Inspection plan with ID {} not found",
                            params.id
                        ))
                    )),
                }
            }
        }
    }

    pub async fn list_plans(&self, params: &ListPlans) -> anyhow::Result<()> {
        let summaries = self.workflow.list_plans_summary(params).await?;
        self.renderer
            .render(&format!("# Inspection Plans\n\n{summaries}"))
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> anyhow::Result<()> {
        match command {
            TaskCommands::Add(args) => {
                let task = self.workflow.add_task(&args.into()).await?;
                self.renderer.render(&format!("{}", CreateResult::new(task)))
            }
            TaskCommands::Done(args) => {
                let task = self.workflow.update_task(&args.into()).await?;
                self.renderer.render(&format!(
                    "{}",
                    OperationStatus::success(format!("Completed task '{}'", task.text))
                ))
            }
        }
    }

    pub async fn handle_reschedule_command(
        &self,
        command: RescheduleCommands,
    ) -> anyhow::Result<()> {
        match command {
            RescheduleCommands::Request(args) => {
                let request = self.workflow.request_reschedule(&args.into()).await?;
                self.renderer
                    .render(&format!("{}", CreateResult::new(request)))
            }
            RescheduleCommands::Approve(args) => {
                let request = self.workflow.resolve_reschedule(&args.into()).await?;
                self.renderer
                    .render(&format!("Reschedule request approved.\n\n{request}"))
            }
            RescheduleCommands::Reject(args) => {
                let request = self.workflow.resolve_reschedule(&args.into()).await?;
                self.renderer
                    .render(&format!("Reschedule request rejected.\n\n{request}"))
            }
            RescheduleCommands::Cancel(args) => {
                self.workflow
                    .cancel_reschedule(&Id { id: args.plan_id })
                    .await?;
                self.renderer.render(&format!(
                    "{}",
                    OperationStatus::success(format!(
                        "Cancelled reschedule request on plan {}",
                        args.plan_id
                    ))
                ))
            }
        }
    }

    pub async fn handle_report_command(&self, command: ReportCommands) -> anyhow::Result<()> {
        match command {
            ReportCommands::Create(args) => {
                let report = self.workflow.create_report(&args.into()).await?;
                self.renderer
                    .render(&format!("{}", CreateResult::new(report)))
            }
            ReportCommands::Submit(args) => {
                let report = self
                    .workflow
                    .submit_report(args.plan_id, &args.actor)
                    .await?;
                self.renderer
                    .render(&format!("Report submitted for review.\n\n{report}"))
            }
            ReportCommands::Approve(args) => {
                let report = self
                    .workflow
                    .review_report(&ReviewReport {
                        plan_id: args.plan_id,
                        approve: true,
                        reviewer: args.reviewer,
                        role: args.role.to_string(),
                    })
                    .await?;
                self.renderer.render(&format!("Report approved.\n\n{report}"))
            }
            ReportCommands::Reject(args) => {
                let report = self
                    .workflow
                    .review_report(&ReviewReport {
                        plan_id: args.plan_id,
                        approve: false,
                        reviewer: args.reviewer,
                        role: args.role.to_string(),
                    })
                    .await?;
                self.renderer.render(&format!("Report rejected.\n\n{report}"))
            }
            ReportCommands::Show(args) => {
                let report = self.workflow.get_report(&Id { id: args.plan_id }).await?;
                self.renderer.render(&format!("{report}"))
            }
        }
    }

    pub async fn handle_notify_command(&self, command: NotifyCommands) -> anyhow::Result<()> {
        match command {
            NotifyCommands::List(args) => {
                let inbox = self
                    .workflow
                    .list_notifications_display(&args.into())
                    .await?;
                self.renderer.render(&format!("# Notifications\n\n{inbox}"))
            }
            NotifyCommands::Read(args) => {
                self.workflow
                    .mark_notification_read(&Id { id: args.id })
                    .await?;
                self.renderer.render(&format!(
                    "{}",
                    OperationStatus::success(format!("Marked notification {} as read", args.id))
                ))
            }
        }
    }

    pub async fn handle_user_command(&self, command: UserCommands) -> anyhow::Result<()> {
        match command {
            UserCommands::Add(args) => {
                let params: AddUser = args.into();
                self.workflow.add_user(&params).await?;
                self.renderer.render(&format!(
                    "{}",
                    OperationStatus::success(format!("Registered user '{}'", params.identity))
                ))
            }
            UserCommands::Login(args) => {
                let token = self.workflow.login(&args.identity).await?;
                self.renderer.render(&format!(
                    "Logged in as {}.\n\nSession token: {token}\n",
                    args.identity
                ))
            }
        }
    }
}
