// crates/petverify-harness/src/lib.rs
// ============================================================================
// Module: Petverify Harness
// Description: Execution engine for the petstore contract suite.
// Purpose: Drive declarative cases through transport, fixtures, and
//          validation with auditable step traces.
// Dependencies: petverify-core, reqwest, tokio, serde_jcs, url
// ============================================================================

//! ## Overview
//! The harness executes [`petverify_core`] cases against a configured
//! endpoint: the [`client`] adapter performs one round trip per attempt,
//! the [`fixture`] manager scopes remote resources with guaranteed
//! teardown, the [`runner`] applies assertions and schema validation, and
//! the [`recorder`] emits step events to the audit backend.
//!
//! Cases run sequentially; a case completes (including teardown) before
//! the next begins. Parallel execution is sound only when every
//! concurrent case owns its own fixture identity, since the remote
//! service provides no per-test isolation.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod config;
pub mod fixture;
pub mod recorder;
pub mod runner;
pub mod suite;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use client::ApiClient;
pub use config::ConfigError;
pub use config::ConfigOverrides;
pub use config::HarnessConfig;
pub use fixture::Fixture;
pub use fixture::FixtureManager;
pub use recorder::JsonAuditSink;
pub use recorder::NullRecorder;
pub use recorder::StepEvent;
pub use recorder::StepRecorder;
pub use recorder::StepStatus;
pub use runner::CaseReport;
pub use runner::SuiteReport;
pub use runner::SuiteRunner;
pub use suite::petstore_suite;
