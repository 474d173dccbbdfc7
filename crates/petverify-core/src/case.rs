// crates/petverify-core/src/case.rs
// ============================================================================
// Module: Case Model
// Description: Declarative test cases, case families, and outcomes.
// Purpose: Model contract checks as immutable data driven by the runner.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Test cases are declared as data and never mutated after declaration.
//! A [`CaseFamily`] groups cases sharing a path template; parametrized
//! families are built from `(input, expected)` pairs rather than from
//! per-case types. Execution order within a family is declaration order.
//!
//! Invariants:
//! - A case's expectations are fixed at declaration time.
//! - Outcomes distinguish contract violations from harness faults.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: HTTP Method
// ============================================================================

/// HTTP methods the harness issues against the service under test.
///
/// # Invariants
/// - Variants are stable for audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP DELETE.
    Delete,
}

impl HttpMethod {
    /// Returns the canonical wire name of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

// ============================================================================
// SECTION: Expected Body
// ============================================================================

/// Expected response-body assertion attached to a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpectedBody {
    /// The raw response text must match exactly.
    Text(String),
    /// Each `(pointer, value)` pair must match the parsed JSON body.
    /// Pointers use dotted paths (`category.name`).
    Fields(Vec<(String, Value)>),
    /// The parsed JSON body must be an array.
    Sequence,
}

// ============================================================================
// SECTION: Test Case
// ============================================================================

/// A single declarative contract check.
///
/// # Invariants
/// - Immutable once declared; families share templates, never instances.
/// - `path` may contain `{id}`, substituted from the case fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// Human-readable case title, unique within a family.
    pub title: String,
    /// HTTP method to issue.
    pub method: HttpMethod,
    /// Path template resolved against the configured base endpoint.
    pub path: String,
    /// Optional JSON request payload.
    pub payload: Option<Value>,
    /// Query parameters appended to the request URL.
    pub query: Vec<(String, String)>,
    /// Expected HTTP status code.
    pub expected_status: u16,
    /// Optional response-body assertion.
    pub expected_body: Option<ExpectedBody>,
    /// Optional schema name the response body must validate against.
    pub schema: Option<String>,
    /// Optional creation payload; when present the runner creates a
    /// fixture first and substitutes its identity into `path`.
    pub fixture: Option<Value>,
}

impl TestCase {
    /// Creates a minimal case with only a method, path, and expected status.
    #[must_use]
    pub fn new(title: &str, method: HttpMethod, path: &str, expected_status: u16) -> Self {
        Self {
            title: title.to_string(),
            method,
            path: path.to_string(),
            payload: None,
            query: Vec::new(),
            expected_status,
            expected_body: None,
            schema: None,
            fixture: None,
        }
    }

    /// Attaches a JSON request payload.
    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Attaches a response-body assertion.
    #[must_use]
    pub fn with_expected_body(mut self, expected: ExpectedBody) -> Self {
        self.expected_body = Some(expected);
        self
    }

    /// Requires the response body to validate against a named schema.
    #[must_use]
    pub fn with_schema(mut self, schema: &str) -> Self {
        self.schema = Some(schema.to_string());
        self
    }

    /// Requires a fixture created from `payload` before the request runs.
    #[must_use]
    pub fn with_fixture(mut self, payload: Value) -> Self {
        self.fixture = Some(payload);
        self
    }
}

// ============================================================================
// SECTION: Case Family
// ============================================================================

/// A named group of cases sharing a template, run in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseFamily {
    /// Family name used in reports and audit artifacts.
    pub name: String,
    /// Member cases, executed in declaration order.
    pub cases: Vec<TestCase>,
}

impl CaseFamily {
    /// Creates a family from explicit cases.
    #[must_use]
    pub fn new(name: &str, cases: Vec<TestCase>) -> Self {
        Self {
            name: name.to_string(),
            cases,
        }
    }

    /// Builds a parametrized family: one case per `(input, expected)` pair.
    ///
    /// The builder receives each input and produces the member case; the
    /// family varies only in parameter values and expected outcomes.
    #[must_use]
    pub fn parametrized<I, F>(name: &str, inputs: Vec<I>, build: F) -> Self
    where
        F: Fn(&I) -> TestCase,
    {
        let cases = inputs.iter().map(build).collect();
        Self::new(name, cases)
    }
}

// ============================================================================
// SECTION: Case Phases
// ============================================================================

/// Execution phases of a single case, used for step labeling.
///
/// # Invariants
/// - Variants are stable for audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CasePhase {
    /// Case declared, not yet started.
    Declared,
    /// Fixture creation before the request.
    FixtureSetup,
    /// The network round trip.
    Requesting,
    /// Status, body, and schema checks.
    Validating,
    /// Fixture removal after a terminal state.
    FixtureTeardown,
}

impl CasePhase {
    /// Returns a stable label for the phase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Declared => "declared",
            Self::FixtureSetup => "fixture_setup",
            Self::Requesting => "requesting",
            Self::Validating => "validating",
            Self::FixtureTeardown => "fixture_teardown",
        }
    }
}

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Terminal outcome of a case.
///
/// `Failed` marks a contract violation by the service under test;
/// `Errored` marks a harness or environment fault that prevented the
/// case from completing. The two are surfaced separately so contract
/// bugs are distinguishable from environment bugs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// All assertions held.
    Passed,
    /// An assertion or schema check found a contract violation.
    Failed(String),
    /// The harness could not complete the case.
    Errored(String),
}

impl Outcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed(_) => "failed",
            Self::Errored(_) => "errored",
        }
    }

    /// Returns `true` when the case passed.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
