use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    NotifyCommands, PlanCommands, ReportCommands, RescheduleCommands, TaskCommands, UserCommands,
};

/// Main command-line interface for the Vigil inspection tracking tool
///
/// Vigil tracks pressure vessel inspection plans through their lifecycle:
/// scheduling, field work with checklists, report submission and review, and
/// the reschedule workflow in between. Notifications keep inspectors and
/// supervisors aware of changes.
#[derive(Parser)]
#[command(version, about, name = "vigil")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/vigil/vigil.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Vigil CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage inspection plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage checklist tasks within plans
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage reschedule requests
    #[command(alias = "rs")]
    Reschedule {
        #[command(subcommand)]
        command: RescheduleCommands,
    },
    /// Manage inspection reports
    #[command(alias = "r")]
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Read and manage notifications
    #[command(alias = "n")]
    Notify {
        #[command(subcommand)]
        command: NotifyCommands,
    },
    /// Manage users and sessions
    #[command(alias = "u")]
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}
