//! harborctl - command-line client for the Harbor container registry.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod context;
mod output;
mod prompts;
mod style;
mod utils;

use commands::{Cli, Commands};
use context::Context;
use harborctl_config::{Config, ConfigError};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The real subscriber's filter level comes from the config, so loading
    // runs under a provisional warn-level subscriber; loader diagnostics
    // (unknown keys, clamped values) must still reach stderr.
    let (config, missing_default) = tracing::subscriber::with_default(
        bootstrap_subscriber(std::io::stderr),
        || -> Result<_> {
            let (mut config, missing_default) = load_config(&cli)?;
            config.apply_env_overrides()?;
            Ok((config, missing_default))
        },
    )?;

    init_tracing(&cli, &config);

    if let Some(path) = missing_default {
        tracing::warn!(
            "No configuration file found at {}; using defaults. Run 'harborctl self config write' to create one.",
            path.display()
        );
    }

    let format = cli.format.unwrap_or(config.output.format);
    let mut ctx = Context::new(config, format)?;

    match cli.command {
        Commands::CveAllowlist(ref cmd) => commands::cve_allowlist::run(&mut ctx, cmd),
        Commands::Usergroup(ref cmd) => commands::usergroup::run(&mut ctx, cmd),
        Commands::System(ref cmd) => commands::system::run(&mut ctx, cmd),
        Commands::SelfCmd(ref cmd) => commands::self_config::run(&mut ctx, cmd),
        Commands::Version => {
            println!("harborctl {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Loads the configuration file named by `--config` (or the default path).
///
/// A missing file at the default path is not an error; defaults are used
/// and the path is returned so a warning can be logged once tracing is up.
/// An explicitly requested file that is missing is an error.
fn load_config(cli: &Cli) -> Result<(Config, Option<std::path::PathBuf>)> {
    match Config::from_file(cli.config.as_deref(), false) {
        Ok(config) => Ok((config, None)),
        Err(ConfigError::NotFound { path }) if cli.config.is_none() => {
            Ok((Config::default(), Some(path)))
        }
        Err(err) => Err(err.into()),
    }
}

/// Warn-level subscriber used while the configuration is being loaded.
fn bootstrap_subscriber<W>(writer: W) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> tracing_subscriber::fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(writer)
        .finish()
}

fn init_tracing(cli: &Cli, config: &Config) {
    let directive = if !config.logging.enabled && !cli.verbose {
        "off"
    } else if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| directive.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
