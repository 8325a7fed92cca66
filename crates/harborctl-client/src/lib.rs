//! # harborctl-client
//!
//! Async client for the Harbor container registry REST API.
//!
//! Covers the operations exposed by the `harborctl` CLI: the system-wide
//! CVE allowlist, user group management, and instance health. Requests are
//! single-shot; there are no retries and no connection pooling beyond what
//! `reqwest` provides.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use harborctl_client::{Auth, ClientConfig, HarborClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("https://harbor.example.com")?
//!         .with_auth(Auth::basic("admin", "secret"));
//!     let client = HarborClient::new(config)?;
//!
//!     let allowlist = client.get_cve_allowlist().await?;
//!     println!("{} CVEs allowlisted", allowlist.items.map_or(0, |i| i.len()));
//!     Ok(())
//! }
//! ```

mod client;
mod error;
pub mod models;

pub use client::{Auth, ClientConfig, HarborClient, ListUserGroupsParams};
pub use error::ApiError;
