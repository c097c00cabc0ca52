//! Site configuration module.
//!
//! Handles loading, validating, and layering the homepage configuration.
//! Three layers are applied in order, each overriding the previous one:
//!
//! ```text
//! stock defaults  →  content/config.toml  →  FRONTPAGE_* environment
//! ```
//!
//! The environment is read exactly once, in `main`, and handed to
//! [`RemoteConfig::apply_env`] as plain key/value pairs. Nothing else in the
//! crate looks at process state, so every consumer (source selection, asset
//! resolution, page composition) receives the resolved [`SiteConfig`] by
//! reference and tests can build one directly.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! locale = "en"             # Content document: <content>/<locale>.json
//! title = "One to one financial advice"
//! namespace = "site"        # Editor resource-type namespace
//!
//! [remote]
//! host = ""                 # Remote CMS host; empty = local document
//! query_path = "/graphql/execute.json"
//! project = "site"          # Persisted-query namespace
//! auth_token = ""
//! data_source = "auto"      # auto | mock | remote
//! # timeout_secs = 10       # Omit for no request timeout
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Overrides `remote.host`.
pub const ENV_REMOTE_HOST: &str = "FRONTPAGE_REMOTE_HOST";
/// Overrides `remote.query_path`.
pub const ENV_QUERY_PATH: &str = "FRONTPAGE_QUERY_PATH";
/// Overrides `remote.auth_token`.
pub const ENV_AUTH_TOKEN: &str = "FRONTPAGE_AUTH_TOKEN";
/// Overrides `remote.data_source`.
pub const ENV_DATA_SOURCE: &str = "FRONTPAGE_DATA_SOURCE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Homepage configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Locale of the bundled content document (`<locale>.json`).
    pub locale: String,
    /// Document `<title>` of the rendered homepage.
    pub title: String,
    /// Namespace for editable component resource types.
    pub namespace: String,
    /// Remote content service settings.
    pub remote: RemoteConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            title: "One to one financial advice".to_string(),
            namespace: "site".to_string(),
            remote: RemoteConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.locale.trim().is_empty() {
            return Err(ConfigError::Validation("locale must not be empty".into()));
        }
        if !self.remote.query_path.starts_with('/') {
            return Err(ConfigError::Validation(
                "remote.query_path must start with '/'".into(),
            ));
        }
        if self.remote.data_source == DataSource::Remote && self.remote.host().is_none() {
            return Err(ConfigError::Validation(
                "remote.data_source = \"remote\" requires remote.host".into(),
            ));
        }
        Ok(())
    }

    /// File name of the local content document.
    pub fn document_name(&self) -> String {
        format!("{}.json", self.locale)
    }
}

/// Which content source the build should use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Remote when a host is configured, local document otherwise.
    #[default]
    Auto,
    /// Always the local document, even with a host configured.
    Mock,
    /// Always the remote service.
    Remote,
}

impl FromStr for DataSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Ok(Self::Auto),
            "mock" => Ok(Self::Mock),
            "remote" => Ok(Self::Remote),
            other => Err(ConfigError::Validation(format!(
                "unknown data source '{other}' (expected auto, mock or remote)"
            ))),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Mock => "mock",
            Self::Remote => "remote",
        })
    }
}

/// Remote content service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteConfig {
    /// Remote host URL, e.g. `https://publish.example.com`. Empty means unset.
    pub host: String,
    /// Query endpoint appended to the host.
    pub query_path: String,
    /// Persisted-query namespace.
    pub project: String,
    /// Bearer token for content requests. Empty means unset.
    pub auth_token: String,
    /// Source toggle for staged rollout.
    pub data_source: DataSource,
    /// Request timeout in seconds. `None` waits indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            query_path: "/graphql/execute.json".to_string(),
            project: "site".to_string(),
            auth_token: String::new(),
            data_source: DataSource::Auto,
            timeout_secs: None,
        }
    }
}

impl RemoteConfig {
    /// The configured host, if present and non-empty.
    pub fn host(&self) -> Option<&str> {
        non_empty(&self.host)
    }

    /// The configured auth token, if present and non-empty.
    pub fn auth_token(&self) -> Option<&str> {
        non_empty(&self.auth_token)
    }

    /// Apply `FRONTPAGE_*` overrides from an environment snapshot.
    ///
    /// Unrelated variables are ignored. Callers pass `std::env::vars()` in
    /// production and a literal list in tests.
    pub fn apply_env<I, K, V>(&mut self, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            let slot = match key.as_ref() {
                ENV_REMOTE_HOST => &mut self.host,
                ENV_QUERY_PATH => &mut self.query_path,
                ENV_AUTH_TOKEN => &mut self.auth_token,
                ENV_DATA_SOURCE => {
                    let value: String = value.into();
                    self.data_source = value.parse()?;
                    continue;
                }
                _ => continue,
            };
            *slot = value.into();
        }
        Ok(())
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer that user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize.
///
/// Validation is left to the caller because environment overrides are
/// applied after this step.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    Ok(merged.try_into()?)
}

/// Load config from the content directory and apply environment overrides.
///
/// Stock defaults, then `config.toml`, then `env`. The result is validated
/// once all layers are in place.
pub fn load_config<I, K, V>(root: &Path, env: I) -> Result<SiteConfig, ConfigError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut config = resolve_config(stock_defaults_value()?, load_raw_config(root)?)?;
    config.remote.apply_env(env)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Frontpage Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file next to the content document: content/config.toml
# Environment variables override the [remote] section:
#   FRONTPAGE_REMOTE_HOST, FRONTPAGE_QUERY_PATH,
#   FRONTPAGE_AUTH_TOKEN, FRONTPAGE_DATA_SOURCE
# Unknown keys will cause an error.

# Locale of the bundled content document (content/<locale>.json).
locale = "en"

# Document title of the rendered homepage.
title = "One to one financial advice"

# Namespace used for editable component resource types,
# e.g. site/components/hero-banner.
namespace = "site"

# ---------------------------------------------------------------------------
# Remote content service
# ---------------------------------------------------------------------------
[remote]
# Publish host of the headless CMS. When empty, content comes from the
# bundled document and asset paths are left unchanged. When set, asset paths
# are prefixed with this host.
host = ""

# Query endpoint appended to the host for persisted queries.
query_path = "/graphql/execute.json"

# Persisted-query namespace: latestNews -> <project>/latest-news.
project = "site"

# Service credential sent as a bearer token. Prefer FRONTPAGE_AUTH_TOKEN.
auth_token = ""

# auto   = remote when host is set, bundled document otherwise
# mock   = always the bundled document
# remote = always the remote service (requires host)
data_source = "auto"

# Request timeout in seconds. Omit to wait indefinitely.
# timeout_secs = 10
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const NO_ENV: [(&str, &str); 0] = [];

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.locale, "en");
        assert_eq!(config.namespace, "site");
        assert_eq!(config.remote.query_path, "/graphql/execute.json");
        assert_eq!(config.remote.data_source, DataSource::Auto);
        assert!(config.remote.host().is_none());
        assert!(config.remote.auth_token().is_none());
    }

    #[test]
    fn parse_partial_config() {
        let config: SiteConfig = toml::from_str(
            r#"
[remote]
host = "https://cms.example.com"
"#,
        )
        .unwrap();
        assert_eq!(config.remote.host(), Some("https://cms.example.com"));
        // Defaults preserved
        assert_eq!(config.remote.project, "site");
        assert_eq!(config.locale, "en");
    }

    #[test]
    fn whitespace_host_counts_as_unset() {
        let mut remote = RemoteConfig::default();
        remote.host = "   ".to_string();
        assert!(remote.host().is_none());
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("colour = \"teal\"");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_data_source_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[remote]\ndata_source = \"cms\"");
        assert!(result.is_err());
        assert!("cms".parse::<DataSource>().is_err());
    }

    #[test]
    fn data_source_parses_case_insensitively() {
        assert_eq!("MOCK".parse::<DataSource>().unwrap(), DataSource::Mock);
        assert_eq!(" remote ".parse::<DataSource>().unwrap(), DataSource::Remote);
        assert_eq!("".parse::<DataSource>().unwrap(), DataSource::Auto);
    }

    #[test]
    fn validate_rejects_remote_without_host() {
        let mut config = SiteConfig::default();
        config.remote.data_source = DataSource::Remote;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.remote.host = "https://cms.example.com".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_relative_query_path() {
        let mut config = SiteConfig::default();
        config.remote.query_path = "graphql".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_locale() {
        let mut config = SiteConfig::default();
        config.locale = " ".into();
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // Environment overrides
    // =========================================================================

    #[test]
    fn env_overrides_remote_settings() {
        let mut remote = RemoteConfig::default();
        remote
            .apply_env([
                (ENV_REMOTE_HOST, "https://cms.example.com"),
                (ENV_QUERY_PATH, "/gql"),
                (ENV_AUTH_TOKEN, "secret"),
                (ENV_DATA_SOURCE, "mock"),
                ("PATH", "/usr/bin"),
            ])
            .unwrap();
        assert_eq!(remote.host(), Some("https://cms.example.com"));
        assert_eq!(remote.query_path, "/gql");
        assert_eq!(remote.auth_token(), Some("secret"));
        assert_eq!(remote.data_source, DataSource::Mock);
    }

    #[test]
    fn env_rejects_bad_data_source() {
        let mut remote = RemoteConfig::default();
        let result = remote.apply_env([(ENV_DATA_SOURCE, "sometimes")]);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path(), NO_ENV).unwrap();
        assert_eq!(config.locale, "en");
        assert!(config.remote.host().is_none());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "locale = \"fr\"\n[remote]\nproject = \"brand\"\n",
        )
        .unwrap();

        let config = load_config(tmp.path(), NO_ENV).unwrap();
        assert_eq!(config.locale, "fr");
        assert_eq!(config.document_name(), "fr.json");
        assert_eq!(config.remote.project, "brand");
        assert_eq!(config.remote.query_path, "/graphql/execute.json");
    }

    #[test]
    fn env_wins_over_config_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[remote]\nhost = \"https://file.example.com\"\n",
        )
        .unwrap();

        let config = load_config(
            tmp.path(),
            [(ENV_REMOTE_HOST.to_string(), "https://env.example.com".to_string())],
        )
        .unwrap();
        assert_eq!(config.remote.host(), Some("https://env.example.com"));
    }

    #[test]
    fn load_config_validates_after_env() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(tmp.path(), [(ENV_DATA_SOURCE, "remote")]);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn load_config_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path(), NO_ENV);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_nested_tables() {
        let base: toml::Value = toml::from_str("[remote]\nhost = \"a\"\nproject = \"p\"").unwrap();
        let overlay: toml::Value = toml::from_str("[remote]\nhost = \"b\"").unwrap();
        let merged = merge_toml(base, overlay);
        let remote = merged.get("remote").unwrap();
        assert_eq!(remote.get("host").unwrap().as_str(), Some("b"));
        assert_eq!(remote.get("project").unwrap().as_str(), Some("p"));
    }

    #[test]
    fn stock_config_toml_matches_defaults() {
        let parsed: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(parsed.locale, defaults.locale);
        assert_eq!(parsed.title, defaults.title);
        assert_eq!(parsed.namespace, defaults.namespace);
        assert_eq!(parsed.remote.query_path, defaults.remote.query_path);
        assert_eq!(parsed.remote.project, defaults.remote.project);
        assert_eq!(parsed.remote.data_source, defaults.remote.data_source);
        assert_eq!(parsed.remote.timeout_secs, None);
    }
}
