//! Commands for managing the CLI itself.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use comfy_table::Table;
use serde::Serialize;

use harborctl_config::{default_config_path, env_var_for_key, Config, TableSettings};

use crate::context::Context;
use crate::output::table::{base_table, Tabular};
use crate::output::render;
use crate::style::{info, success, warning};

/// Subcommands for the CLI itself.
#[derive(Subcommand)]
pub enum SelfCommands {
    /// CLI configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current CLI configuration
    Get(GetArgs),

    /// Modify a CLI configuration value
    Set(SetArgs),

    /// Show all config keys that can be modified with `set`
    Keys,

    /// Write the current session configuration to disk
    Write(WriteArgs),

    /// Show the path to the current configuration file
    Path,

    /// Show active harborctl environment variables
    Env(EnvArgs),
}

/// Arguments for `self config get`.
#[derive(Args)]
pub struct GetArgs {
    /// Specific config key to get the value of (dot notation)
    pub key: Option<String>,

    /// Render with the configured output format instead of TOML
    #[arg(long)]
    pub no_toml: bool,
}

/// Arguments for `self config set`.
#[derive(Args)]
pub struct SetArgs {
    /// Key to set, using dot notation (e.g. 'harbor.url')
    pub key: String,

    /// Value to set
    pub value: String,

    /// Path to save the configuration file to
    #[arg(long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Set the value for this session only; do not save to disk
    #[arg(long)]
    pub session: bool,

    /// Show the configuration after setting the value
    #[arg(long)]
    pub show: bool,

    /// Render the shown configuration with the configured output format
    /// instead of TOML
    #[arg(long)]
    pub no_toml: bool,
}

/// Arguments for `self config write`.
#[derive(Args)]
pub struct WriteArgs {
    /// Path to save the configuration file to; defaults to the current
    /// config file path
    #[arg(long, value_name = "PATH")]
    pub path: Option<PathBuf>,
}

/// Arguments for `self config env`.
#[derive(Args)]
pub struct EnvArgs {
    /// List all environment variables, including unset ones
    #[arg(short, long)]
    pub all: bool,
}

/// Runs a `self` subcommand.
///
/// # Errors
///
/// Returns an error if validation or persistence fails.
pub fn run(ctx: &mut Context, command: &SelfCommands) -> Result<()> {
    match command {
        SelfCommands::Config(cmd) => run_config(ctx, cmd),
    }
}

fn run_config(ctx: &mut Context, command: &ConfigCommands) -> Result<()> {
    // All subcommands except `path`, `write` and `env` operate on a
    // configuration that was actually loaded from a file.
    let needs_file = matches!(
        command,
        ConfigCommands::Get(_) | ConfigCommands::Set(_) | ConfigCommands::Keys
    );
    if needs_file && ctx.config.config_file.is_none() {
        bail!("No configuration file loaded. A configuration file must exist to use this command.");
    }

    match command {
        ConfigCommands::Get(args) => get(ctx, args),
        ConfigCommands::Set(args) => set(ctx, args),
        ConfigCommands::Keys => keys(ctx),
        ConfigCommands::Write(args) => write(ctx, args),
        ConfigCommands::Path => path(ctx),
        ConfigCommands::Env(args) => env(ctx, args),
    }
}

fn render_config(ctx: &Context, no_toml: bool) -> Result<()> {
    if no_toml {
        render(ctx, &ConfigDisplay::from_config(&ctx.config))
    } else {
        println!("{}", ctx.config.toml_string(false)?);
        Ok(())
    }
}

fn get(ctx: &Context, args: &GetArgs) -> Result<()> {
    if let Some(ref key) = args.key {
        let value = ctx.config.get(key)?;
        let entry = BTreeMap::from([(key.clone(), value)]);
        return render(ctx, &ConfigDisplay(entry));
    }

    render_config(ctx, args.no_toml)?;
    if let Some(ref path) = ctx.config.config_file {
        info(&format!("Source: {}", path.display()));
    }
    Ok(())
}

fn set(ctx: &mut Context, args: &SetArgs) -> Result<()> {
    ctx.config.set(&args.key, &args.value)?;
    if !args.session {
        ctx.config.save(args.path.as_deref())?;
    }
    if args.show {
        render_config(ctx, args.no_toml)?;
    }
    success(&format!("Set {} to '{}'", args.key, args.value));
    Ok(())
}

fn keys(ctx: &Context) -> Result<()> {
    let keys = ConfigKeys(
        Config::keys()
            .iter()
            .map(ToString::to_string)
            .collect(),
    );
    render(ctx, &keys)
}

fn write(ctx: &Context, args: &WriteArgs) -> Result<()> {
    let save_path = args
        .path
        .clone()
        .or_else(|| ctx.config.config_file.clone());
    let Some(save_path) = save_path else {
        bail!("No path specified and no path found in the current configuration. Use --path to specify one.");
    };
    ctx.config.save(Some(&save_path))?;
    success(&format!("Saved configuration to {}", save_path.display()));
    Ok(())
}

fn path(ctx: &Context) -> Result<()> {
    let path = match ctx.config.config_file.clone() {
        Some(path) => path,
        None => default_config_path()?,
    };

    if !path.exists() {
        info("File does not exist.");
    } else if path.is_dir() {
        warning("Path is a directory. Delete it so a config file can be created.");
    } else if std::fs::read_to_string(&path)
        .map(|text| text.trim().is_empty())
        .unwrap_or(false)
    {
        info("File exists, but is empty.");
    }

    println!("{}", path.display());
    Ok(())
}

fn env(ctx: &Context, args: &EnvArgs) -> Result<()> {
    let mut vars = BTreeMap::new();
    let names = std::iter::once("HARBORCTL_CONFIG".to_string())
        .chain(Config::keys().iter().map(|key| env_var_for_key(key)));
    for name in names {
        match std::env::var(&name) {
            Ok(value) => {
                vars.insert(name, value);
            }
            Err(_) => {
                if args.all {
                    vars.insert(name, String::new());
                }
            }
        }
    }

    if vars.is_empty() {
        info("No environment variables set.");
        return Ok(());
    }
    render(ctx, &EnvVars(vars))
}

/// Redacted dotted-key view of the configuration, for non-TOML rendering.
#[derive(Serialize)]
#[serde(transparent)]
struct ConfigDisplay(BTreeMap<String, String>);

impl ConfigDisplay {
    fn from_config(config: &Config) -> Self {
        let map = Config::keys()
            .iter()
            .filter_map(|key| {
                config
                    .get(key)
                    .ok()
                    .map(|value| ((*key).to_string(), value))
            })
            .collect();
        Self(map)
    }
}

impl Tabular for ConfigDisplay {
    fn table(&self, settings: &TableSettings) -> Table {
        let mut table = base_table(&["Key", "Value"], settings);
        for (key, value) in &self.0 {
            table.add_row(vec![key.clone(), value.clone()]);
        }
        table
    }
}

/// The list of settable config keys.
#[derive(Serialize)]
#[serde(transparent)]
struct ConfigKeys(Vec<String>);

impl Tabular for ConfigKeys {
    fn table(&self, settings: &TableSettings) -> Table {
        let mut table = base_table(&["Key"], settings);
        for key in &self.0 {
            table.add_row(vec![key.clone()]);
        }
        table
    }
}

/// Environment variables and their values.
#[derive(Serialize)]
#[serde(transparent)]
struct EnvVars(BTreeMap<String, String>);

impl Tabular for EnvVars {
    fn table(&self, settings: &TableSettings) -> Table {
        let mut table = base_table(&["Variable", "Value"], settings);
        for (name, value) in &self.0 {
            table.add_row(vec![name.clone(), value.clone()]);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harborctl_config::{OutputFormat, SecretString};

    #[test]
    fn test_config_display_redacts_secrets() {
        let mut config = Config::default();
        config.harbor.secret = SecretString::new("hunter2");
        let display = ConfigDisplay::from_config(&config);
        assert_eq!(
            display.0.get("harbor.secret").map(String::as_str),
            Some("********")
        );
    }

    #[test]
    fn test_config_display_covers_all_keys() {
        let display = ConfigDisplay::from_config(&Config::default());
        assert_eq!(display.0.len(), Config::keys().len());
    }

    #[test]
    fn test_single_key_renders_in_every_format() {
        use harborctl_config::JsonSettings;

        let entry = BTreeMap::from([(
            "harbor.url".to_string(),
            "https://harbor.example.com".to_string(),
        )]);
        let display = ConfigDisplay(entry);

        let table = display.table(&TableSettings::default()).to_string();
        assert!(table.contains("harbor.url"));
        assert!(table.contains("https://harbor.example.com"));

        let json = crate::output::to_json(&display, &JsonSettings::default()).unwrap();
        assert!(json.contains("\"harbor.url\""));

        let toml = crate::output::to_toml(&display).unwrap();
        assert!(toml.contains("\"harbor.url\""));
    }

    #[test]
    fn test_config_keys_table_lists_keys() {
        let keys = ConfigKeys(vec!["harbor.url".to_string()]);
        let rendered = keys.table(&TableSettings::default()).to_string();
        assert!(rendered.contains("harbor.url"));
    }

    fn set_args(key: &str, value: &str, session: bool) -> SetArgs {
        SetArgs {
            key: key.to_string(),
            value: value.to_string(),
            path: None,
            session,
            show: false,
            no_toml: false,
        }
    }

    #[test]
    fn test_set_persists_unless_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.save(Some(&path)).unwrap();
        config.config_file = Some(path.clone());
        let mut ctx = Context::new(config, OutputFormat::Table).unwrap();

        set(&mut ctx, &set_args("harbor.username", "admin", false)).unwrap();
        let reloaded = Config::from_file(Some(&path), false).unwrap();
        assert_eq!(reloaded.harbor.username, "admin");

        set(&mut ctx, &set_args("harbor.username", "other", true)).unwrap();
        let reloaded = Config::from_file(Some(&path), false).unwrap();
        assert_eq!(reloaded.harbor.username, "admin");
        assert_eq!(ctx.config.harbor.username, "other");
    }
}
