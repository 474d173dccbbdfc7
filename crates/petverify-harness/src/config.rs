// crates/petverify-harness/src/config.rs
// ============================================================================
// Module: Harness Configuration
// Description: Endpoint, timeout, retry, and audit-root settings.
// Purpose: Resolve configuration once at startup with strict parsing.
// Dependencies: thiserror, url
// ============================================================================

//! ## Overview
//! Configuration is resolved once at process start and immutable
//! afterwards. Environment values are parsed strictly: invalid UTF-8,
//! empty strings, and malformed numbers fail closed instead of silently
//! falling back to defaults. Sources overlay in precedence order
//! (defaults, then file, then environment, then flags) via
//! [`ConfigOverrides`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default base endpoint of the service under test.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9090/api/v3";
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Default audit artifact root.
pub const DEFAULT_AUDIT_ROOT: &str = "target/petverify";

// ============================================================================
// SECTION: Environment Keys
// ============================================================================

/// Environment keys for harness configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessEnv {
    /// Base endpoint URL of the service under test.
    BaseUrl,
    /// Request timeout in seconds (positive integer).
    TimeoutSeconds,
    /// Transport-only retry budget (non-negative integer).
    TransportRetries,
    /// Root directory for audit artifacts.
    AuditRoot,
}

impl HarnessEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseUrl => "PETVERIFY_BASE_URL",
            Self::TimeoutSeconds => "PETVERIFY_TIMEOUT_SEC",
            Self::TransportRetries => "PETVERIFY_TRANSPORT_RETRIES",
            Self::AuditRoot => "PETVERIFY_AUDIT_ROOT",
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration resolution failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment value is not valid UTF-8.
    #[error("environment value for {key} is not valid UTF-8")]
    InvalidUnicode {
        /// Offending environment key.
        key: &'static str,
    },
    /// An environment value is present but empty.
    #[error("environment value for {key} is empty")]
    EmptyValue {
        /// Offending environment key.
        key: &'static str,
    },
    /// A numeric value failed to parse or violated its range.
    #[error("invalid value for {key}: {message}")]
    InvalidNumber {
        /// Offending environment key.
        key: &'static str,
        /// Parse or range failure description.
        message: String,
    },
    /// The base URL is not a valid absolute URL.
    #[error("invalid base url `{value}`: {message}")]
    InvalidBaseUrl {
        /// Offending value.
        value: String,
        /// Parse failure description.
        message: String,
    },
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Immutable harness configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Base endpoint the client resolves paths against.
    pub base_url: String,
    /// Per-request timeout enforced by the transport.
    pub timeout: Duration,
    /// Retry budget applied only to transport errors, never to HTTP
    /// statuses, so contract-signal codes (400/404) are never masked.
    pub transport_retries: u32,
    /// Root directory for audit artifacts.
    pub audit_root: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            transport_retries: 0,
            audit_root: PathBuf::from(DEFAULT_AUDIT_ROOT),
        }
    }
}

/// Partial configuration from one source, overlaid onto a base config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Optional base URL override.
    pub base_url: Option<String>,
    /// Optional timeout override.
    pub timeout: Option<Duration>,
    /// Optional transport retry override.
    pub transport_retries: Option<u32>,
    /// Optional audit root override.
    pub audit_root: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Reads overrides from the `PETVERIFY_*` environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is present but empty, not
    /// valid UTF-8, or fails numeric validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = read_env(HarnessEnv::BaseUrl)?;
        let timeout = read_env(HarnessEnv::TimeoutSeconds)?
            .map(|raw| parse_timeout(HarnessEnv::TimeoutSeconds.as_str(), &raw))
            .transpose()?;
        let transport_retries = read_env(HarnessEnv::TransportRetries)?
            .map(|raw| parse_retries(HarnessEnv::TransportRetries.as_str(), &raw))
            .transpose()?;
        let audit_root = read_env(HarnessEnv::AuditRoot)?.map(PathBuf::from);
        Ok(Self {
            base_url,
            timeout,
            transport_retries,
            audit_root,
        })
    }
}

impl HarnessConfig {
    /// Resolves the final configuration from overlay sources in
    /// precedence order (later sources win).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the resolved base URL is invalid or
    /// the resolved timeout is zero.
    pub fn resolve(sources: &[ConfigOverrides]) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for source in sources {
            if let Some(base_url) = &source.base_url {
                config.base_url = base_url.clone();
            }
            if let Some(timeout) = source.timeout {
                config.timeout = timeout;
            }
            if let Some(retries) = source.transport_retries {
                config.transport_retries = retries;
            }
            if let Some(audit_root) = &source.audit_root {
                config.audit_root = audit_root.clone();
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from defaults overlaid with the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on strict-parse or validation failure.
    pub fn load() -> Result<Self, ConfigError> {
        Self::resolve(&[ConfigOverrides::from_env()?])
    }

    /// Validates the resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the base URL is not absolute or the
    /// timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.base_url).map_err(|err| ConfigError::InvalidBaseUrl {
            value: self.base_url.clone(),
            message: err.to_string(),
        })?;
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidNumber {
                key: HarnessEnv::TimeoutSeconds.as_str(),
                message: "timeout must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Strict Env Parsing
// ============================================================================

/// Reads one environment value with strict UTF-8 and non-empty checks.
fn read_env(key: HarnessEnv) -> Result<Option<String>, ConfigError> {
    let Some(raw) = env::var_os(key.as_str()) else {
        return Ok(None);
    };
    let value = raw.into_string().map_err(|_| ConfigError::InvalidUnicode {
        key: key.as_str(),
    })?;
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyValue {
            key: key.as_str(),
        });
    }
    Ok(Some(value.trim().to_string()))
}

/// Parses a positive integer number of seconds.
fn parse_timeout(key: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        message: format!("`{raw}` is not a positive integer number of seconds"),
    })?;
    if secs == 0 {
        return Err(ConfigError::InvalidNumber {
            key,
            message: "timeout must be greater than zero".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

/// Parses a non-negative retry count.
fn parse_retries(key: &'static str, raw: &str) -> Result<u32, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        message: format!("`{raw}` is not a non-negative integer"),
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
