//! CVE allowlist commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use tracing::info;

use harborctl_client::models::{CveAllowlist, CveAllowlistItem};

use crate::context::Context;
use crate::output::render;
use crate::utils::parse_commalist;

/// Subcommands for the system-wide CVE allowlist.
#[derive(Subcommand)]
pub enum CveAllowlistCommands {
    /// Get the current CVE allowlist
    Get,

    /// Add CVE IDs to the CVE allowlist
    Update(UpdateArgs),

    /// Clear the CVE allowlist of all CVEs
    Clear(ClearArgs),
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// CVE to add to the allowlist; comma-separated or repeated
    #[arg(long = "cve", value_name = "CVE")]
    pub cve: Vec<String>,

    /// Replace the existing list with the new CVEs instead of appending
    #[arg(long)]
    pub replace: bool,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Also clear allowlist metadata (project id, expiration, etc.)
    #[arg(long)]
    pub full: bool,
}

/// Runs a CVE allowlist subcommand.
///
/// # Errors
///
/// Returns an error if the API call fails.
pub fn run(ctx: &mut Context, command: &CveAllowlistCommands) -> Result<()> {
    match command {
        CveAllowlistCommands::Get => get(ctx),
        CveAllowlistCommands::Update(args) => update(ctx, args),
        CveAllowlistCommands::Clear(args) => clear(ctx, args),
    }
}

fn get(ctx: &mut Context) -> Result<()> {
    let client = ctx.client()?;
    info!("Fetching CVE allowlist...");
    let allowlist = ctx.run(client.get_cve_allowlist())?;
    render(ctx, &allowlist)
}

fn update(ctx: &mut Context, args: &UpdateArgs) -> Result<()> {
    let cves = parse_commalist(&args.cve);
    let client = ctx.client()?;

    let mut current = ctx.run(client.get_cve_allowlist())?;
    merge_allowlist(&mut current, &cves, args.replace);
    ctx.run(client.update_cve_allowlist(&current))?;

    let total = current.items.as_ref().map_or(0, Vec::len);
    if args.replace {
        info!("Replaced CVE allowlist with {} CVEs", cves.len());
    } else {
        info!("Added {} CVEs to CVE allowlist. Total: {total}", cves.len());
    }
    Ok(())
}

fn clear(ctx: &mut Context, args: &ClearArgs) -> Result<()> {
    let client = ctx.client()?;
    info!("Clearing CVE allowlist...");
    if args.full {
        let empty = CveAllowlist {
            items: Some(Vec::new()),
            ..CveAllowlist::default()
        };
        ctx.run(client.update_cve_allowlist(&empty))?;
        info!("Cleared CVE allowlist of CVEs and metadata");
    } else {
        let mut current = ctx.run(client.get_cve_allowlist())?;
        current.items = Some(Vec::new());
        ctx.run(client.update_cve_allowlist(&current))?;
        info!("Cleared CVE allowlist of CVEs");
    }
    Ok(())
}

/// Merges new CVE ids into an allowlist.
///
/// With `replace` the existing entries are discarded; otherwise the new
/// entries are appended to the existing ones.
fn merge_allowlist(allowlist: &mut CveAllowlist, cve_ids: &[String], replace: bool) {
    let new_items: Vec<CveAllowlistItem> = cve_ids
        .iter()
        .map(|id| CveAllowlistItem::new(id.clone()))
        .collect();
    if replace {
        allowlist.items = Some(new_items);
    } else {
        allowlist
            .items
            .get_or_insert_with(Vec::new)
            .extend(new_items);
    }
}
