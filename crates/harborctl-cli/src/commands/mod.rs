//! CLI commands and argument parsing.

pub mod cve_allowlist;
pub mod self_config;
pub mod system;
pub mod usergroup;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use harborctl_config::OutputFormat;

/// harborctl - command-line client for the Harbor container registry
#[derive(Parser)]
#[command(name = "harborctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "HARBORCTL_CONFIG",
        value_name = "PATH"
    )]
    pub config: Option<PathBuf>,

    /// Output format (overrides the configured default)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage the system-wide CVE allowlist
    #[command(name = "cve-allowlist", subcommand)]
    CveAllowlist(cve_allowlist::CveAllowlistCommands),

    /// Manage user groups
    #[command(subcommand)]
    Usergroup(usergroup::UsergroupCommands),

    /// System-level information
    #[command(subcommand)]
    System(system::SystemCommands),

    /// Manage the CLI itself
    #[command(name = "self", subcommand)]
    SelfCmd(self_config::SelfCommands),

    /// Print version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cve_allowlist_update() {
        let cli = Cli::parse_from([
            "harborctl",
            "cve-allowlist",
            "update",
            "--cve",
            "CVE-1,CVE-2",
            "--replace",
        ]);
        match cli.command {
            Commands::CveAllowlist(cve_allowlist::CveAllowlistCommands::Update(args)) => {
                assert_eq!(args.cve, vec!["CVE-1,CVE-2"]);
                assert!(args.replace);
            }
            _ => panic!("parsed into wrong command"),
        }
    }

    #[test]
    fn test_parse_global_format_flag() {
        let cli = Cli::parse_from(["harborctl", "--format", "json", "system", "health"]);
        assert_eq!(cli.format, Some(OutputFormat::Json));
    }
}
