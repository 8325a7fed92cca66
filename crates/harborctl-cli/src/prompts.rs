//! Interactive prompts for missing credentials and destructive actions.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{bail, Context, Result};

fn ensure_tty(what: &str) -> Result<()> {
    if io::stdin().is_terminal() {
        Ok(())
    } else {
        bail!("{what} required; not running interactively");
    }
}

/// Prompts for a non-empty line of input.
///
/// # Errors
///
/// Returns an error when stdin is not a terminal or cannot be read.
pub fn str_prompt(label: &str) -> Result<String> {
    ensure_tty(label)?;
    let stdin = io::stdin();
    loop {
        eprint!("{label}: ");
        io::stderr().flush().ok();
        let mut line = String::new();
        stdin
            .lock()
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }
}

/// Prompts for a secret without echoing it.
///
/// # Errors
///
/// Returns an error when stdin is not a terminal or cannot be read.
pub fn password_prompt(label: &str) -> Result<String> {
    ensure_tty(label)?;
    let secret = rpassword::prompt_password(format!("{label}: "))
        .context("failed to read password from stdin")?;
    if secret.is_empty() {
        bail!("{label} cannot be empty");
    }
    Ok(secret)
}

/// Asks for confirmation before deleting a resource.
///
/// With `force` the prompt is skipped. Non-interactive sessions must pass
/// `--force` explicitly.
///
/// # Errors
///
/// Returns an error if the user declines or no confirmation is possible.
pub fn confirm_deletion(resource: &str, name: &str, force: bool) -> Result<()> {
    if force {
        return Ok(());
    }
    if !io::stdin().is_terminal() {
        bail!("refusing to delete {resource} {name} without confirmation; use --force");
    }

    eprint!("Delete {resource} {name}? [y/N] ");
    io::stderr().flush().ok();
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(()),
        _ => bail!("aborted"),
    }
}
