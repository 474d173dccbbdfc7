// crates/petverify-core/src/error.rs
// ============================================================================
// Module: Error Taxonomy
// Description: Harness error types separating environment faults from
//              contract violations.
// Purpose: Map every failure to a stable, classifiable variant.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! The taxonomy keeps two families apart: environment faults
//! ([`TransportError`], [`FixtureSetupError`]) abort a case as `Errored`,
//! while contract violations ([`ContractViolation`], including
//! [`ValidationError`]) mark it `Failed`. No error affects sibling cases,
//! and none is swallowed: every path terminates in an outcome or an audit
//! note.
//!
//! Invariants:
//! - Variants are stable for programmatic handling.
//! - Types are data-only; transport crates convert into them at the edge.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Transport Errors
// ============================================================================

/// Network-level failure; an environment fault, not a contract violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request exceeded the configured timeout.
    #[error("request timed out after {timeout:?}")]
    Timeout {
        /// Configured timeout that expired.
        timeout: Duration,
    },
    /// The connection could not be established.
    #[error("connection failed: {message}")]
    Connect {
        /// Underlying connection failure description.
        message: String,
    },
    /// Any other transport failure (DNS, protocol, body read).
    #[error("transport failure: {message}")]
    Other {
        /// Underlying failure description.
        message: String,
    },
}

// ============================================================================
// SECTION: Fixture Errors
// ============================================================================

/// Fixture creation failed; the case cannot proceed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixtureSetupError {
    /// The create request returned a non-2xx status.
    #[error("fixture create returned status {status}: {text}")]
    CreateRejected {
        /// Observed status code.
        status: u16,
        /// Raw response text.
        text: String,
    },
    /// The create response carried no usable identity.
    #[error("fixture create response carried no id: {text}")]
    MissingIdentity {
        /// Raw response text.
        text: String,
    },
}

// ============================================================================
// SECTION: Validation Errors
// ============================================================================

/// First structural violation found while walking a schema.
///
/// Validation is fail-fast: the walker reports one violation with its
/// field path and stops, so the first break is the actionable one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent.
    #[error("missing required field `{path}`")]
    MissingField {
        /// Dotted/indexed path of the missing field.
        path: String,
    },
    /// A declared field carries the wrong type.
    #[error("field `{path}` expected {expected}, found {actual}")]
    TypeMismatch {
        /// Dotted/indexed path of the offending field.
        path: String,
        /// Expected kind label.
        expected: String,
        /// Rendering of the actual value.
        actual: String,
    },
    /// A closed schema encountered an undeclared field.
    #[error("unexpected field `{path}` in closed schema")]
    UnexpectedField {
        /// Dotted/indexed path of the undeclared field.
        path: String,
    },
    /// A schema reference did not resolve in the registry.
    #[error("unknown schema `{name}`")]
    UnknownSchema {
        /// Missing schema name.
        name: String,
    },
}

// ============================================================================
// SECTION: Contract Violations
// ============================================================================

/// Observed service behavior diverging from the declared contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractViolation {
    /// The status code did not match the expectation.
    #[error("expected status {expected}, observed {observed}")]
    StatusMismatch {
        /// Declared expected status.
        expected: u16,
        /// Observed status.
        observed: u16,
    },
    /// The raw response text did not match the expectation.
    #[error("expected body text `{expected}`, observed `{observed}`")]
    BodyTextMismatch {
        /// Declared expected text.
        expected: String,
        /// Observed text.
        observed: String,
    },
    /// A JSON field did not match the expected value.
    #[error("expected field `{path}` = {expected}, observed {observed}")]
    FieldMismatch {
        /// Dotted path of the field.
        path: String,
        /// Declared expected value.
        expected: Value,
        /// Observed value (`null` when absent).
        observed: Value,
    },
    /// The body was expected to be a JSON sequence and was not.
    #[error("expected a JSON sequence body, observed `{observed}`")]
    NotASequence {
        /// Observed raw text, truncated by the caller when needed.
        observed: String,
    },
    /// A schema check required a JSON body and none parsed.
    #[error("expected a JSON body, response text was `{text}`")]
    MissingBody {
        /// Raw response text.
        text: String,
    },
    /// The body failed structural schema validation.
    #[error(transparent)]
    Schema(#[from] ValidationError),
}

// ============================================================================
// SECTION: Case Error Union
// ============================================================================

/// Union of everything that can terminate a case before `Passed`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CaseError {
    /// Environment fault inside the transport.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Fixture creation precondition failed.
    #[error(transparent)]
    FixtureSetup(#[from] FixtureSetupError),
    /// The service violated its contract.
    #[error(transparent)]
    Contract(#[from] ContractViolation),
}

impl CaseError {
    /// Returns `true` when the error marks a contract violation rather
    /// than a harness or environment fault.
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Contract(_))
    }
}

impl From<ValidationError> for CaseError {
    fn from(err: ValidationError) -> Self {
        Self::Contract(ContractViolation::Schema(err))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
