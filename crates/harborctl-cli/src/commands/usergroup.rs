//! User group commands.

use anyhow::{bail, Result};
use clap::{Args, Subcommand, ValueEnum};
use tracing::info;

use harborctl_client::models::{UserGroup, UserGroupType};
use harborctl_client::ListUserGroupsParams;

use crate::context::Context;
use crate::output::render;
use crate::prompts::confirm_deletion;
use crate::style::success;

/// Subcommands for user group management.
#[derive(Subcommand)]
pub enum UsergroupCommands {
    /// Get a user group
    Get {
        /// ID of the user group
        group_id: i64,
    },

    /// Create a user group
    Create(CreateArgs),

    /// Update a user group. Only the name can be updated.
    Update(UpdateArgs),

    /// Delete a user group
    Delete(DeleteArgs),

    /// List user groups
    List(ListArgs),

    /// Search for user groups by name
    Search(SearchArgs),
}

/// User group backing type as a CLI argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GroupTypeArg {
    Ldap,
    Http,
    Oidc,
}

impl From<GroupTypeArg> for UserGroupType {
    fn from(arg: GroupTypeArg) -> Self {
        match arg {
            GroupTypeArg::Ldap => Self::Ldap,
            GroupTypeArg::Http => Self::Http,
            GroupTypeArg::Oidc => Self::Oidc,
        }
    }
}

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    /// The type of user group to create
    #[arg(value_enum)]
    pub group_type: GroupTypeArg,

    /// Name of the group to create
    #[arg(long = "name")]
    pub group_name: String,

    /// The DN of the LDAP group if group type is ldap
    #[arg(long)]
    pub ldap_group_dn: Option<String>,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// ID of the user group to update
    pub group_id: i64,

    /// New name for the group
    #[arg(long = "name")]
    pub group_name: String,
}

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// ID of the user group to delete
    pub group_id: i64,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Filter by group name (fuzzy matching)
    #[arg(long)]
    pub group_name: Option<String>,

    /// Filter by LDAP group DN
    #[arg(long)]
    pub ldap_group_dn: Option<String>,

    /// Page to start fetching from
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Number of results per page
    #[arg(long, default_value_t = 10)]
    pub page_size: u32,

    /// Maximum total number of results to fetch
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Group name to search for
    pub group_name: String,

    /// Page to fetch
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Number of results per page
    #[arg(long, default_value_t = 10)]
    pub page_size: u32,
}

/// Runs a user group subcommand.
///
/// # Errors
///
/// Returns an error if validation or the API call fails.
pub fn run(ctx: &mut Context, command: &UsergroupCommands) -> Result<()> {
    match command {
        UsergroupCommands::Get { group_id } => get(ctx, *group_id),
        UsergroupCommands::Create(args) => create(ctx, args),
        UsergroupCommands::Update(args) => update(ctx, args),
        UsergroupCommands::Delete(args) => delete(ctx, args),
        UsergroupCommands::List(args) => list(ctx, args),
        UsergroupCommands::Search(args) => search(ctx, args),
    }
}

fn get(ctx: &mut Context, group_id: i64) -> Result<()> {
    let client = ctx.client()?;
    info!("Fetching user group {group_id}...");
    let usergroup = ctx.run(client.get_usergroup(group_id))?;
    render(ctx, &usergroup)
}

fn create(ctx: &mut Context, args: &CreateArgs) -> Result<()> {
    let group_type = UserGroupType::from(args.group_type);
    if group_type == UserGroupType::Ldap && args.ldap_group_dn.is_none() {
        bail!("LDAP group DN is required for LDAP user groups");
    }

    let usergroup = UserGroup {
        id: None,
        group_name: Some(args.group_name.clone()),
        group_type: Some(group_type.as_i32()),
        ldap_group_dn: args.ldap_group_dn.clone(),
    };

    let client = ctx.client()?;
    info!("Creating user group {}...", args.group_name);
    let group_id = ctx.run(client.create_usergroup(&usergroup))?;
    success(&format!(
        "Created user group '{}' (id {group_id})",
        args.group_name
    ));
    Ok(())
}

fn update(ctx: &mut Context, args: &UpdateArgs) -> Result<()> {
    let usergroup = UserGroup {
        group_name: Some(args.group_name.clone()),
        ..UserGroup::default()
    };
    let client = ctx.client()?;
    info!("Updating user group {}...", args.group_id);
    ctx.run(client.update_usergroup(args.group_id, &usergroup))?;
    success(&format!("Updated user group {}", args.group_id));
    Ok(())
}

fn delete(ctx: &mut Context, args: &DeleteArgs) -> Result<()> {
    confirm_deletion("user group", &args.group_id.to_string(), args.force)?;
    let client = ctx.client()?;
    info!("Deleting user group {}...", args.group_id);
    ctx.run(client.delete_usergroup(args.group_id))?;
    success(&format!("Deleted user group {}", args.group_id));
    Ok(())
}

fn list(ctx: &mut Context, args: &ListArgs) -> Result<()> {
    let params = ListUserGroupsParams {
        group_name: args.group_name.clone(),
        ldap_group_dn: args.ldap_group_dn.clone(),
        page: args.page,
        page_size: args.page_size,
        limit: args.limit,
    };
    let client = ctx.client()?;
    info!("Fetching user groups...");
    let usergroups = ctx.run(client.list_usergroups(&params))?;
    render(ctx, &usergroups)
}

fn search(ctx: &mut Context, args: &SearchArgs) -> Result<()> {
    let client = ctx.client()?;
    info!("Searching user groups...");
    let results = ctx.run(client.search_usergroups(&args.group_name, args.page, args.page_size))?;
    render(ctx, &results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_type_arg_conversion() {
        assert_eq!(UserGroupType::from(GroupTypeArg::Ldap), UserGroupType::Ldap);
        assert_eq!(UserGroupType::from(GroupTypeArg::Http), UserGroupType::Http);
        assert_eq!(UserGroupType::from(GroupTypeArg::Oidc), UserGroupType::Oidc);
    }
}
