//! Error types for configuration handling.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, mutating or saving the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file does not exist.
    #[error("Config file {path} does not exist")]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Config file already exists and overwrite was not requested.
    #[error("Config file {path} already exists")]
    AlreadyExists {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// No per-OS configuration directory could be determined.
    #[error("Could not determine a default config directory for this platform")]
    NoConfigDir,

    /// File I/O failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing failed.
    #[error("Could not parse config file {path}: {source}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },

    /// TOML serialization failed.
    #[error("Could not serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Dotted-path key does not name a known config field.
    #[error("Invalid config key: {key}")]
    UnknownKey {
        /// Key as given by the user.
        key: String,
    },

    /// Value could not be parsed or validated for the given key.
    #[error("Invalid value for key '{key}': {message}")]
    InvalidValue {
        /// Key as given by the user.
        key: String,
        /// Human-readable reason.
        message: String,
    },

    /// No Harbor API URL configured.
    #[error("A Harbor API URL is required")]
    MissingUrl,

    /// No authentication method configured.
    #[error(
        "A Harbor authentication method must be specified. \
         One of 'username'+'secret', 'basicauth', or 'credentials_file' must be set."
    )]
    MissingAuthMethod,

    /// Credentials file is missing or not a regular file.
    #[error("Credentials file {path} {message}")]
    CredentialsFile {
        /// Configured path.
        path: PathBuf,
        /// Human-readable reason.
        message: String,
    },

    /// Save was requested but no target path is known.
    #[error("Cannot save config: no config file path specified")]
    NoSavePath,
}
