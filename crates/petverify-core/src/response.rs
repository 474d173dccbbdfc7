// crates/petverify-core/src/response.rs
// ============================================================================
// Module: Response Record
// Description: Uniform capture of one HTTP response.
// Purpose: Give assertions and the validator a transport-neutral view.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every network round trip produces exactly one [`ResponseRecord`]. The
//! record is immutable and carries both the parsed JSON body (when the
//! response text parses) and the raw text, so exact-text contract checks
//! such as `Pet deleted` remain possible alongside structural checks.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Response Record
// ============================================================================

/// Transport-neutral record of a single HTTP response.
///
/// # Invariants
/// - Produced once per request and never mutated.
/// - `body` is `None` when the raw text is not valid JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// HTTP status code.
    pub status: u16,
    /// Parsed JSON body, absent when the text is not JSON.
    pub body: Option<Value>,
    /// Raw response text.
    pub text: String,
}

impl ResponseRecord {
    /// Builds a record from a status code and raw text, parsing the body.
    #[must_use]
    pub fn from_text(status: u16, text: String) -> Self {
        let body = serde_json::from_str(&text).ok();
        Self {
            status,
            body,
            text,
        }
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
