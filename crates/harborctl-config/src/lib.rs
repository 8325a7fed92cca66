//! Layered TOML configuration for the harborctl CLI.
//!
//! The configuration is a tree of sections (`[harbor]`, `[logging]`,
//! `[output]`) loaded from a per-OS default path or an explicit file,
//! with environment-variable overrides applied on top. Individual fields
//! are addressable with dotted-path keys (e.g. `harbor.url`), and secret
//! fields are redacted when the configuration is rendered for display.

mod error;
mod secret;

pub use error::ConfigError;
pub use secret::{SecretString, REDACTED};

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Prefix for environment variables that override config keys.
pub const ENV_VAR_PREFIX: &str = "HARBORCTL_";

/// All dotted-path keys addressable with [`Config::get`] and [`Config::set`].
pub const KEYS: &[&str] = &[
    "harbor.url",
    "harbor.username",
    "harbor.secret",
    "harbor.basicauth",
    "harbor.credentials_file",
    "logging.enabled",
    "logging.level",
    "output.format",
    "output.table.description",
    "output.table.max_depth",
    "output.table.compact",
    "output.json.indent",
    "output.json.sort_keys",
];

/// Returns the environment variable name that overrides a config key.
///
/// # Examples
///
/// ```
/// assert_eq!(harborctl_config::env_var_for_key("harbor.url"), "HARBORCTL_HARBOR_URL");
/// ```
#[must_use]
pub fn env_var_for_key(key: &str) -> String {
    format!("{ENV_VAR_PREFIX}{}", key.to_uppercase().replace('.', "_"))
}

/// Returns the default per-OS config file path.
///
/// # Errors
///
/// Returns an error if no configuration directory can be determined.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("harborctl").join("config.toml"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Serde helper for optional paths.
///
/// TOML has no null, so an unset path round-trips as an empty string.
mod optional_path {
    use std::path::PathBuf;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<PathBuf>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(path) => path.serialize(serializer),
            None => "".serialize(serializer),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<PathBuf>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            Ok(None)
        } else {
            Ok(Some(PathBuf::from(raw)))
        }
    }
}

/// Log verbosity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Returns the level as a lowercase string usable in tracing filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Config representation, not the tracing filter directive.
        let name = match self {
            Self::Warning => "warning",
            other => other.as_str(),
        };
        f.write_str(name)
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!(
                "'{other}' is not a log level (expected one of trace, debug, info, warning, error)"
            )),
        }
    }
}

/// Output formats supported by the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tabular output.
    #[default]
    Table,
    /// JSON output.
    Json,
    /// TOML output.
    Toml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Toml => "toml",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            other => Err(format!(
                "'{other}' is not an output format (expected one of table, json, toml)"
            )),
        }
    }
}

/// Harbor connection and authentication settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarborSettings {
    /// Harbor API URL (e.g. `https://harbor.example.com`).
    pub url: String,

    /// Username for username/secret authentication.
    pub username: String,

    /// Secret (password) for username/secret authentication.
    pub secret: SecretString,

    /// Pre-encoded base64 basic-auth credentials.
    pub basicauth: SecretString,

    /// Path to a robot-account credentials file.
    #[serde(with = "optional_path")]
    pub credentials_file: Option<PathBuf>,
}

impl HarborSettings {
    /// Returns `true` if any of the authentication methods is set.
    #[must_use]
    pub fn has_auth_method(&self) -> bool {
        (!self.username.is_empty() && !self.secret.is_empty())
            || !self.basicauth.is_empty()
            || self.credentials_file.is_some()
    }

    /// Ensures the settings are sufficient to authenticate with the API.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is missing or no auth method is set.
    pub fn ensure_authable(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::MissingUrl);
        }
        if !self.has_auth_method() {
            return Err(ConfigError::MissingAuthMethod);
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.credentials_file {
            validate_credentials_file(path)?;
        }
        Ok(())
    }
}

fn validate_credentials_file(path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::CredentialsFile {
            path: path.to_path_buf(),
            message: "does not exist".to_string(),
        });
    }
    if !path.is_file() {
        return Err(ConfigError::CredentialsFile {
            path: path.to_path_buf(),
            message: "is not a file".to_string(),
        });
    }
    Ok(())
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Whether logging output is enabled at all.
    pub enabled: bool,

    /// Minimum level to log.
    pub level: LogLevel,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Info,
        }
    }
}

/// Settings for the table output format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    /// Include description columns where available.
    pub description: bool,

    /// Maximum nesting depth to render (0 = unlimited).
    #[serde(deserialize_with = "deserialize_max_depth")]
    pub max_depth: u32,

    /// Use the compact table style.
    pub compact: bool,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            description: false,
            max_depth: 0,
            compact: true,
        }
    }
}

/// Negative values used to mean "unlimited"; clamp them to 0 so older
/// config files keep loading.
fn deserialize_max_depth<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = i64::deserialize(deserializer)?;
    if value < 0 {
        tracing::warn!(
            "output.table.max_depth no longer accepts negative values; using 0 (unlimited)"
        );
        return Ok(0);
    }
    u32::try_from(value).map_err(serde::de::Error::custom)
}

/// Settings for the JSON output format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonSettings {
    /// Number of spaces per indentation level.
    pub indent: usize,

    /// Sort object keys alphabetically.
    pub sort_keys: bool,
}

impl Default for JsonSettings {
    fn default() -> Self {
        Self {
            indent: 2,
            sort_keys: true,
        }
    }
}

/// Output rendering settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Default output format.
    pub format: OutputFormat,

    /// Table format settings.
    pub table: TableSettings,

    /// JSON format settings.
    pub json: JsonSettings,
}

/// The full harborctl configuration tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Harbor connection settings.
    pub harbor: HarborSettings,

    /// Logging settings.
    pub logging: LoggingSettings,

    /// Output rendering settings.
    pub output: OutputSettings,

    /// Path the config was loaded from, if any. Not serialized.
    #[serde(skip)]
    pub config_file: Option<PathBuf>,
}

impl Config {
    /// Loads the configuration from a TOML file.
    ///
    /// With `path = None` the default per-OS path is used. With `create =
    /// true` a missing file is created with sample contents first.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing (and `create` is false),
    /// cannot be read or parsed, or fails validation.
    pub fn from_file(path: Option<&Path>, create: bool) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path()?,
        };

        if !path.exists() {
            if create {
                create_config(Some(&path), false)?;
            } else {
                return Err(ConfigError::NotFound { path });
            }
        }

        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let table: toml::Table = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        warn_unknown_keys(&table);

        let mut config: Self = table.try_into().map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        config.harbor.validate()?;
        config.config_file = Some(path);
        Ok(config)
    }

    /// Saves the configuration to disk.
    ///
    /// Uses `path` if given, otherwise the path the config was loaded from.
    ///
    /// # Errors
    ///
    /// Returns an error if no path is known or the file cannot be written.
    pub fn save(&self, path: Option<&Path>) -> Result<(), ConfigError> {
        let target = match path.or(self.config_file.as_deref()) {
            Some(p) => p.to_path_buf(),
            None => return Err(ConfigError::NoSavePath),
        };
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: target.clone(),
                source,
            })?;
        }
        let contents = self.toml_string(true)?;
        std::fs::write(&target, contents).map_err(|source| ConfigError::Io {
            path: target,
            source,
        })
    }

    /// Renders the configuration as a TOML string.
    ///
    /// With `expose_secrets = false`, non-empty secret fields are replaced
    /// with [`REDACTED`]. Unset optional values render as empty strings so
    /// users can see which keys exist.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn toml_string(&self, expose_secrets: bool) -> Result<String, ConfigError> {
        let mut table = toml::Table::try_from(self)?;
        if !expose_secrets {
            redact_harbor_secrets(&mut table);
        }
        Ok(toml::to_string_pretty(&table)?)
    }

    /// Applies `HARBORCTL_*` environment variable overrides on top of the
    /// current values.
    ///
    /// # Errors
    ///
    /// Returns an error if an override value fails to parse or validate.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        for key in KEYS {
            if let Ok(value) = std::env::var(env_var_for_key(key)) {
                tracing::debug!(key, "applying environment override");
                self.set(key, &value)?;
            }
        }
        Ok(())
    }

    /// Returns all dotted-path keys settable with [`Config::set`].
    #[must_use]
    pub fn keys() -> &'static [&'static str] {
        KEYS
    }

    /// Returns the display value for a dotted-path key.
    ///
    /// Secret fields are redacted; unset optional values return an empty
    /// string.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "harbor.url" => self.harbor.url.clone(),
            "harbor.username" => self.harbor.username.clone(),
            "harbor.secret" => self.harbor.secret.to_string(),
            "harbor.basicauth" => self.harbor.basicauth.to_string(),
            "harbor.credentials_file" => self
                .harbor
                .credentials_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "logging.enabled" => self.logging.enabled.to_string(),
            "logging.level" => self.logging.level.to_string(),
            "output.format" => self.output.format.to_string(),
            "output.table.description" => self.output.table.description.to_string(),
            "output.table.max_depth" => self.output.table.max_depth.to_string(),
            "output.table.compact" => self.output.table.compact.to_string(),
            "output.json.indent" => self.output.json.indent.to_string(),
            "output.json.sort_keys" => self.output.json.sort_keys.to_string(),
            _ => {
                return Err(ConfigError::UnknownKey {
                    key: key.to_string(),
                })
            }
        };
        Ok(value)
    }

    /// Sets a dotted-path key to a value parsed from a string.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys or values that fail to parse or
    /// validate.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "harbor.url" => self.harbor.url = value.to_string(),
            "harbor.username" => self.harbor.username = value.to_string(),
            "harbor.secret" => self.harbor.secret = SecretString::from(value),
            "harbor.basicauth" => self.harbor.basicauth = SecretString::from(value),
            "harbor.credentials_file" => {
                if value.is_empty() {
                    self.harbor.credentials_file = None;
                } else {
                    let path = PathBuf::from(value);
                    validate_credentials_file(&path)?;
                    self.harbor.credentials_file = Some(path);
                }
            }
            "logging.enabled" => self.logging.enabled = parse_bool(key, value)?,
            "logging.level" => self.logging.level = parse_value(key, value)?,
            "output.format" => self.output.format = parse_value(key, value)?,
            "output.table.description" => {
                self.output.table.description = parse_bool(key, value)?;
            }
            "output.table.max_depth" => {
                let depth: i64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "max_depth must be an integer".to_string(),
                })?;
                if depth < 0 {
                    tracing::warn!(
                        "output.table.max_depth no longer accepts negative values; using 0"
                    );
                    self.output.table.max_depth = 0;
                } else {
                    self.output.table.max_depth =
                        u32::try_from(depth).map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: "max_depth is too large".to_string(),
                        })?;
                }
            }
            "output.table.compact" => self.output.table.compact = parse_bool(key, value)?,
            "output.json.indent" => {
                self.output.json.indent =
                    value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: "indent must be a non-negative integer".to_string(),
                    })?;
            }
            "output.json.sort_keys" => self.output.json.sort_keys = parse_bool(key, value)?,
            _ => {
                return Err(ConfigError::UnknownKey {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("'{value}' is not a boolean (expected true or false)"),
        }),
    }
}

fn parse_value<T: FromStr<Err = String>>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|message| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    })
}

fn redact_harbor_secrets(table: &mut toml::Table) {
    let Some(harbor) = table.get_mut("harbor").and_then(|v| v.as_table_mut()) else {
        return;
    };
    for field in ["secret", "basicauth", "credentials_file"] {
        if let Some(value) = harbor.get_mut(field) {
            let is_set = value.as_str().is_some_and(|s| !s.is_empty());
            if is_set {
                *value = toml::Value::String(REDACTED.to_string());
            }
        }
    }
}

/// Warns about config keys that are not recognized.
///
/// Unknown keys are tolerated so that config files written by newer
/// versions keep working, but silently ignoring them hides typos.
fn warn_unknown_keys(table: &toml::Table) {
    const SECTIONS: &[(&str, &[&str])] = &[
        ("harbor", &["url", "username", "secret", "basicauth", "credentials_file"]),
        ("logging", &["enabled", "level"]),
        ("output", &["format", "table", "json"]),
    ];

    for (key, value) in table {
        let Some((_, fields)) = SECTIONS.iter().find(|(name, _)| name == key) else {
            tracing::warn!(key, "got unknown config key");
            continue;
        };
        let Some(section) = value.as_table() else {
            continue;
        };
        for sub_key in section.keys() {
            if !fields.contains(&sub_key.as_str()) {
                tracing::warn!(key = format!("{key}.{sub_key}"), "got unknown config key");
            }
        }
    }
}

/// Returns the contents of a sample config file as a TOML string.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn sample_config() -> Result<String, ConfigError> {
    Config::default().toml_string(true)
}

/// Creates a config file with sample contents.
///
/// # Errors
///
/// Returns an error if the file already exists (and `overwrite` is false)
/// or cannot be written.
pub fn create_config(path: Option<&Path>, overwrite: bool) -> Result<PathBuf, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if path.exists() && !overwrite {
        return Err(ConfigError::AlreadyExists { path });
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
    }
    std::fs::write(&path, sample_config()?).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
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
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output.format, OutputFormat::Table);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert!(config.logging.enabled);
        assert_eq!(config.output.json.indent, 2);
        assert!(config.output.json.sort_keys);
        assert!(config.output.table.compact);
        assert_eq!(config.output.table.max_depth, 0);
    }

    #[test]
    fn test_ensure_authable_requires_url() {
        let mut config = authable_config();
        config.harbor.url.clear();
        assert!(matches!(
            config.harbor.ensure_authable(),
            Err(ConfigError::MissingUrl)
        ));
    }

    #[test]
    fn test_ensure_authable_rejects_no_auth_method() {
        let mut config = Config::default();
        config.harbor.url = "https://harbor.example.com".to_string();
        assert!(matches!(
            config.harbor.ensure_authable(),
            Err(ConfigError::MissingAuthMethod)
        ));
        // Username without secret is not a complete method either.
        config.harbor.username = "admin".to_string();
        assert!(config.harbor.ensure_authable().is_err());
    }

    #[test]
    fn test_ensure_authable_accepts_each_method() {
        let mut config = Config::default();
        config.harbor.url = "https://harbor.example.com".to_string();

        let mut with_password = config.clone();
        with_password.harbor.username = "admin".to_string();
        with_password.harbor.secret = SecretString::new("hunter2");
        assert!(with_password.harbor.ensure_authable().is_ok());

        let mut with_basicauth = config.clone();
        with_basicauth.harbor.basicauth = SecretString::new("YWRtaW46aHVudGVyMg==");
        assert!(with_basicauth.harbor.ensure_authable().is_ok());

        let credentials = tempfile::NamedTempFile::new().unwrap();
        config.harbor.credentials_file = Some(credentials.path().to_path_buf());
        assert!(config.harbor.ensure_authable().is_ok());
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = authable_config();
        config.set("output.format", "json").unwrap();
        config.set("output.table.max_depth", "3").unwrap();
        config.save(Some(&path)).unwrap();

        let reloaded = Config::from_file(Some(&path), false).unwrap();
        assert_eq!(reloaded.harbor, config.harbor);
        assert_eq!(reloaded.logging, config.logging);
        assert_eq!(reloaded.output, config.output);
        assert_eq!(reloaded.config_file.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_from_file_missing_errors_without_create() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(
            Config::from_file(Some(&path), false),
            Err(ConfigError::NotFound { .. })
        ));
    }

    #[test]
    fn test_from_file_create_writes_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config::from_file(Some(&path), true).unwrap();
        assert!(path.exists());
        assert_eq!(config.harbor, HarborSettings::default());
    }

    #[test]
    fn test_negative_max_depth_clamped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output.table]\nmax_depth = -1\n").unwrap();
        let config = Config::from_file(Some(&path), false).unwrap();
        assert_eq!(config.output.table.max_depth, 0);
    }

    #[test]
    fn test_get_unknown_key() {
        let config = Config::default();
        assert!(matches!(
            config.get("harbor.nope"),
            Err(ConfigError::UnknownKey { .. })
        ));
        assert!(matches!(
            config.get("harbor"),
            Err(ConfigError::UnknownKey { .. })
        ));
    }

    #[test]
    fn test_get_redacts_secrets() {
        let config = authable_config();
        assert_eq!(config.get("harbor.secret").unwrap(), REDACTED);
        assert_eq!(config.get("harbor.url").unwrap(), "https://harbor.example.com");
        // Empty secrets render as empty, not as asterisks.
        assert_eq!(config.get("harbor.basicauth").unwrap(), "");
    }

    #[test]
    fn test_set_valid_nested_key() {
        let mut config = Config::default();
        config.set("output.json.indent", "4").unwrap();
        assert_eq!(config.output.json.indent, 4);
        config.set("logging.level", "debug").unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_set_unknown_key() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("output.nope", "x"),
            Err(ConfigError::UnknownKey { .. })
        ));
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("logging.enabled", "maybe"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set("output.format", "xml"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set("output.table.max_depth", "deep"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_set_negative_max_depth_clamped() {
        let mut config = Config::default();
        config.set("output.table.max_depth", "-5").unwrap();
        assert_eq!(config.output.table.max_depth, 0);
    }

    #[test]
    fn test_set_missing_credentials_file_rejected() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("harbor.credentials_file", "/no/such/file"),
            Err(ConfigError::CredentialsFile { .. })
        ));
        config.set("harbor.credentials_file", "").unwrap();
        assert_eq!(config.harbor.credentials_file, None);
    }

    #[test]
    fn test_every_key_is_gettable() {
        let config = Config::default();
        for key in Config::keys() {
            assert!(config.get(key).is_ok(), "key {key} not gettable");
        }
    }

    #[test]
    fn test_toml_string_redacts_secrets() {
        let mut config = authable_config();
        config.harbor.basicauth = SecretString::new("YWRtaW46aHVudGVyMg==");

        let redacted = config.toml_string(false).unwrap();
        assert!(redacted.contains(REDACTED));
        assert!(!redacted.contains("hunter2"));
        assert!(!redacted.contains("YWRtaW46aHVudGVyMg=="));

        let exposed = config.toml_string(true).unwrap();
        assert!(exposed.contains("hunter2"));
    }

    #[test]
    fn test_toml_string_renders_unset_values_as_empty_strings() {
        let rendered = Config::default().toml_string(false).unwrap();
        assert!(rendered.contains("credentials_file = \"\""));
        assert!(rendered.contains("secret = \"\""));
    }

    #[test]
    fn test_env_var_for_key() {
        assert_eq!(env_var_for_key("harbor.url"), "HARBORCTL_HARBOR_URL");
        assert_eq!(
            env_var_for_key("output.table.max_depth"),
            "HARBORCTL_OUTPUT_TABLE_MAX_DEPTH"
        );
    }

    #[test]
    fn test_apply_env_overrides() {
        // Only this test touches these variables.
        std::env::set_var("HARBORCTL_HARBOR_USERNAME", "robot$ci");
        std::env::set_var("HARBORCTL_OUTPUT_FORMAT", "toml");
        let mut config = Config::default();
        config.apply_env_overrides().unwrap();
        std::env::remove_var("HARBORCTL_HARBOR_USERNAME");
        std::env::remove_var("HARBORCTL_OUTPUT_FORMAT");

        assert_eq!(config.harbor.username, "robot$ci");
        assert_eq!(config.output.format, OutputFormat::Toml);
    }

    #[test]
    fn test_create_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        create_config(Some(&path), false).unwrap();
        assert!(matches!(
            create_config(Some(&path), false),
            Err(ConfigError::AlreadyExists { .. })
        ));
        assert!(create_config(Some(&path), true).is_ok());
    }

    #[test]
    fn test_sample_config_parses() {
        let sample = sample_config().unwrap();
        let parsed: Config = toml::from_str(&sample).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
