// system-tests/src/config.rs
// ============================================================================
// Module: System Test Configuration
// Description: Environment-backed timeout configuration for system tests.
// Purpose: Centralize env parsing with strict validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed strictly to avoid silent
//! misconfiguration: invalid UTF-8, empty values, and malformed integers
//! fail closed. The timeout override acts as a minimum so it can never
//! shorten an explicitly longer test timeout.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::time::Duration;

// ============================================================================
// SECTION: Environment Keys
// ============================================================================

/// Timeout override in seconds for system-test operations.
pub const ENV_TIMEOUT_SECS: &str = "PETVERIFY_SYSTEM_TEST_TIMEOUT_SEC";

// ============================================================================
// SECTION: Timeout Resolution
// ============================================================================

/// Returns the effective timeout, honoring the environment override.
///
/// The override acts as a minimum to avoid shortening explicitly longer
/// test timeouts.
///
/// # Errors
///
/// Returns an error when the override is present but not a positive
/// integer number of seconds.
pub fn resolve_timeout(requested: Duration) -> Result<Duration, String> {
    match env::var_os(ENV_TIMEOUT_SECS) {
        None => Ok(requested),
        Some(raw) => {
            let value = raw
                .into_string()
                .map_err(|_| format!("{ENV_TIMEOUT_SECS} is not valid UTF-8"))?;
            let floor = parse_timeout_secs(&value)
                .map_err(|err| format!("{ENV_TIMEOUT_SECS} {err}"))?;
            Ok(std::cmp::max(requested, floor))
        }
    }
}

/// Parses a strictly positive integer number of seconds.
fn parse_timeout_secs(raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("must be a positive integer number of seconds".to_string());
    }
    let secs: u64 =
        trimmed.parse().map_err(|_| "must be a positive integer number of seconds".to_string())?;
    if secs == 0 {
        return Err("must be greater than zero".to_string());
    }
    Ok(Duration::from_secs(secs))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
