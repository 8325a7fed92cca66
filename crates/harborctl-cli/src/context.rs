//! Per-invocation context passed to every command handler.
//!
//! Holds the loaded configuration, the chosen output format, the async
//! runtime used to drive client calls from synchronous handlers, and the
//! memoized API clients. Replaces the process-wide mutable state a CLI
//! like this often grows.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing::warn;

use harborctl_client::{Auth, ClientConfig, HarborClient};
use harborctl_config::{Config, OutputFormat, SecretString};

use crate::prompts;

pub struct Context {
    /// Active configuration, possibly mutated by `self config set`.
    pub config: Config,

    /// Output format for this invocation (CLI flag overrides config).
    pub format: OutputFormat,

    runtime: tokio::runtime::Runtime,

    /// One client per configured base URL.
    clients: HashMap<String, Arc<HarborClient>>,
}

impl Context {
    /// Creates a context with the given configuration and output format.
    ///
    /// # Errors
    ///
    /// Returns an error if the async runtime cannot be created.
    pub fn new(config: Config, format: OutputFormat) -> Result<Self> {
        let runtime =
            tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
        Ok(Self {
            config,
            format,
            runtime,
            clients: HashMap::new(),
        })
    }

    /// Blocks on an async client call.
    pub fn run<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Returns the API client for the configured URL, creating it on first
    /// use.
    ///
    /// Missing URL or credentials are prompted for interactively before the
    /// client is built.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials cannot be obtained or the client
    /// cannot be built.
    pub fn client(&mut self) -> Result<Arc<HarborClient>> {
        self.ensure_credentials()?;

        let key = self.config.harbor.url.clone();
        if let Some(client) = self.clients.get(&key) {
            return Ok(Arc::clone(client));
        }

        let client = Arc::new(build_client(&self.config)?);
        self.clients.insert(key, Arc::clone(&client));
        Ok(client)
    }

    /// Prompts for URL and credentials that are missing from the
    /// configuration. Both gaps are reported before the first prompt.
    fn ensure_credentials(&mut self) -> Result<()> {
        let harbor = &self.config.harbor;
        let has_url = !harbor.url.is_empty();
        let has_auth = harbor.has_auth_method();
        if !has_url {
            warn!("Harbor API URL missing from configuration");
        }
        if !has_auth {
            warn!("Harbor authentication method missing from configuration");
        }

        if !has_url {
            self.config.harbor.url = prompts::str_prompt("Harbor API URL")?;
        }
        if !has_auth {
            self.config.harbor.username = prompts::str_prompt("Username")?;
            self.config.harbor.secret = SecretString::new(prompts::password_prompt("Password")?);
        }
        Ok(())
    }
}

fn build_client(config: &Config) -> Result<HarborClient> {
    let harbor = &config.harbor;
    harbor.ensure_authable()?;

    let auth = if !harbor.username.is_empty() && !harbor.secret.is_empty() {
        Auth::basic(&harbor.username, harbor.secret.expose())
    } else if !harbor.basicauth.is_empty() {
        Auth::raw(harbor.basicauth.expose())
    } else if let Some(ref path) = harbor.credentials_file {
        Auth::from_credentials_file(path)?
    } else {
        // ensure_authable() guarantees one of the branches above matched.
        Auth::None
    };

    let client_config = ClientConfig::new(&harbor.url)?.with_auth(auth);
    Ok(HarborClient::new(client_config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authable_config() -> Config {
        let mut config = Config::default();
        config.harbor.url = "https://harbor.example.com".to_string();
        config.harbor.username = "admin".to_string();
        config.harbor.secret = SecretString::new("hunter2");
        config
    }

    #[test]
    fn test_client_is_memoized_per_url() {
        let mut ctx = Context::new(authable_config(), OutputFormat::Table).unwrap();
        let first = ctx.client().unwrap();
        let second = ctx.client().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_build_client_requires_auth() {
        let mut config = Config::default();
        config.harbor.url = "https://harbor.example.com".to_string();
        assert!(build_client(&config).is_err());
    }

    #[test]
    fn test_build_client_prefers_username_secret() {
        let client = build_client(&authable_config()).unwrap();
        assert!(matches!(client.config().auth, Auth::Basic { .. }));
    }

    #[test]
    fn test_build_client_uses_basicauth_token() {
        let mut config = Config::default();
        config.harbor.url = "https://harbor.example.com".to_string();
        config.harbor.basicauth = SecretString::new("YWRtaW46aHVudGVyMg==");
        let client = build_client(&config).unwrap();
        assert!(matches!(client.config().auth, Auth::Raw { .. }));
    }

    #[test]
    fn test_run_drives_futures_to_completion() {
        let ctx = Context::new(Config::default(), OutputFormat::Table).unwrap();
        let value = ctx.run(async { 40 + 2 });
        assert_eq!(value, 42);
    }
}
