//! Configuration file loading with precedence handling.

use crate::api::{QueryDefaults, DEFAULT_BASE_URL};
use crate::location::Coordinates;
use crate::state::search_form::DEFAULT_SEARCH_TEXT;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A value parsed but is not usable.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Config key or environment variable name.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/propfinder/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Listings API endpoint.
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// `country` query parameter.
    #[serde(default)]
    pub country: Option<String>,

    /// `listing_type` query parameter ("buy", "rent", "share").
    #[serde(default)]
    pub listing_type: Option<String>,

    /// Search text the form starts with.
    #[serde(default)]
    pub default_search: Option<String>,

    /// Request timeout in seconds.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Fixed device position used for location searches.
    #[serde(default)]
    pub location: Option<LocationSection>,
}

/// `[location]` table.
///
/// ```toml
/// [location]
/// latitude = 51.5074
/// longitude = -0.1278
/// ```
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LocationSection {
    pub latitude: f64,
    pub longitude: f64,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub country: String,
    pub listing_type: String,
    pub default_search: String,
    pub request_timeout: Duration,
    pub log_file_path: PathBuf,
    /// `None` means location searches fail with "not configured".
    pub location: Option<Coordinates>,
}

impl ResolvedConfig {
    /// Fixed query parameters derived from this config.
    pub fn query_defaults(&self) -> QueryDefaults {
        QueryDefaults {
            base_url: self.api_base_url.clone(),
            country: self.country.clone(),
            listing_type: self.listing_type.clone(),
        }
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            country: "uk".to_string(),
            listing_type: "buy".to_string(),
            default_search: DEFAULT_SEARCH_TEXT.to_string(),
            request_timeout: Duration::from_secs(30),
            log_file_path: default_log_path(),
            location: None,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/propfinder/propfinder.log` on Linux, or the
/// platform state directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("propfinder").join("propfinder.log")
    } else {
        PathBuf::from("propfinder.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/propfinder/config.toml` on Linux.
/// Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("propfinder").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `PROPFINDER_CONFIG` environment variable
/// 3. Default path `~/.config/propfinder/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("PROPFINDER_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for an unusable base URL, a zero
/// timeout, or out-of-range coordinates.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let api_base_url = match config.api_base_url {
        Some(url) => validate_base_url("api_base_url", url)?,
        None => defaults.api_base_url,
    };

    let request_timeout = match config.request_timeout_secs {
        Some(0) => {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            })
        }
        Some(secs) => Duration::from_secs(secs),
        None => defaults.request_timeout,
    };

    let location = match config.location {
        Some(section) => Some(
            Coordinates::new(section.latitude, section.longitude).map_err(|e| {
                ConfigError::InvalidValue {
                    key: "location".to_string(),
                    reason: e.to_string(),
                }
            })?,
        ),
        None => defaults.location,
    };

    Ok(ResolvedConfig {
        api_base_url,
        country: config.country.unwrap_or(defaults.country),
        listing_type: config.listing_type.unwrap_or(defaults.listing_type),
        default_search: config.default_search.unwrap_or(defaults.default_search),
        request_timeout,
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        location,
    })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `PROPFINDER_API_URL`: Override the API endpoint
/// - `PROPFINDER_LOCATION`: Override the device position (`"<lat>,<lon>"`)
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if either variable is set but invalid.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(url) = std::env::var("PROPFINDER_API_URL") {
        config.api_base_url = validate_base_url("PROPFINDER_API_URL", url)?;
    }

    if let Ok(location) = std::env::var("PROPFINDER_LOCATION") {
        config.location = Some(parse_location_override("PROPFINDER_LOCATION", &location)?);
    }

    Ok(config)
}

/// CLI-level overrides. `None` leaves the lower-precedence value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub api_base_url: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for an invalid URL or location.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    overrides: CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    if let Some(url) = overrides.api_base_url {
        config.api_base_url = validate_base_url("--api-url", url)?;
    }

    if let Some(location) = overrides.location {
        config.location = Some(parse_location_override("--location", &location)?);
    }

    if let Some(search) = overrides.search {
        config.default_search = search;
    }

    Ok(config)
}

/// Accept only absolute http(s) URLs with no query or fragment.
///
/// The search query is appended as `?<params>`, so the base must end at the path.
fn validate_base_url(key: &str, raw: String) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        key: key.to_string(),
        reason,
    };

    let parsed = url::Url::parse(&raw).map_err(|e| invalid(format!("{raw:?}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme {other:?}"))),
    }
    if parsed.query().is_some() {
        return Err(invalid(format!("{raw:?} must not contain a query string")));
    }
    if parsed.fragment().is_some() {
        return Err(invalid(format!("{raw:?} must not contain a fragment")));
    }
    Ok(raw)
}

fn parse_location_override(key: &str, raw: &str) -> Result<Coordinates, ConfigError> {
    Coordinates::parse(raw).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

#[cfg(test)]
mod log_path_tests {
    use super::*;

    #[test]
    fn default_log_path_ends_with_propfinder_log() {
        let path = default_log_path();
        assert!(
            path.to_string_lossy().ends_with("propfinder.log"),
            "Default log path should end with 'propfinder.log', got: {:?}",
            path
        );
    }

    #[test]
    fn resolved_config_default_includes_log_path() {
        let config = ResolvedConfig::default();
        assert!(!config.log_file_path.as_os_str().is_empty());
    }

    #[test]
    fn config_file_log_path_overrides_default() {
        let custom_path = PathBuf::from("/custom/path/to/app.log");
        let config_file = ConfigFile {
            log_file_path: Some(custom_path.clone()),
            ..ConfigFile::default()
        };

        let resolved = merge_config(Some(config_file)).unwrap();
        assert_eq!(resolved.log_file_path, custom_path);
    }
}
