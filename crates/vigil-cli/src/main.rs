//! Vigil CLI Application
//!
//! Command-line interface for the Vigil inspection tracking tool.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use vigil_core::{params::ListPlans, WorkflowBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args { database_file, no_color, command } = Args::parse();

    let workflow = WorkflowBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize workflow")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Vigil started");

    match command {
        Some(Plan { command }) => {
            Cli::new(workflow, renderer)
                .handle_plan_command(command)
                .await
        }
        Some(Task { command }) => {
            Cli::new(workflow, renderer)
                .handle_task_command(command)
                .await
        }
        Some(Reschedule { command }) => {
            Cli::new(workflow, renderer)
                .handle_reschedule_command(command)
                .await
        }
        Some(Report { command }) => {
            Cli::new(workflow, renderer)
                .handle_report_command(command)
                .await
        }
        Some(Notify { command }) => {
            Cli::new(workflow, renderer)
                .handle_notify_command(command)
                .await
        }
        Some(User { command }) => {
            Cli::new(workflow, renderer)
                .handle_user_command(command)
                .await
        }
        None => {
            Cli::new(workflow, renderer)
                .list_plans(&ListPlans::default())
                .await
        }
    }
}
