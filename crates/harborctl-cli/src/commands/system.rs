//! System-level commands.

use anyhow::Result;
use clap::Subcommand;
use tracing::info;

use crate::context::Context;
use crate::output::render;

/// Subcommands for system-level information.
#[derive(Subcommand)]
pub enum SystemCommands {
    /// Show the health of the Harbor instance and its components
    Health,
}

/// Runs a system subcommand.
///
/// # Errors
///
/// Returns an error if the API call fails.
pub fn run(ctx: &mut Context, command: &SystemCommands) -> Result<()> {
    match command {
        SystemCommands::Health => health(ctx),
    }
}

fn health(ctx: &mut Context) -> Result<()> {
    let client = ctx.client()?;
    info!("Fetching system health...");
    let status = ctx.run(client.health())?;
    render(ctx, &status)
}
