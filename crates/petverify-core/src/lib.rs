// crates/petverify-core/src/lib.rs
// ============================================================================
// Module: Petverify Core
// Description: Domain types for the petstore contract-verification harness.
// Purpose: Define cases, responses, schemas, and the error taxonomy.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Dependency-light domain crate for the petstore contract harness. It holds
//! the declarative case model, the uniform response record, the structural
//! schema registry and validator, and the error taxonomy that separates
//! environment faults from contract violations.
//!
//! Transport and scheduling live in `petverify-harness`; this crate performs
//! no I/O.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod case;
pub mod error;
pub mod pet;
pub mod response;
pub mod schema;
pub mod validate;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use case::CaseFamily;
pub use case::CasePhase;
pub use case::ExpectedBody;
pub use case::HttpMethod;
pub use case::Outcome;
pub use case::TestCase;
pub use error::CaseError;
pub use error::ContractViolation;
pub use error::FixtureSetupError;
pub use error::TransportError;
pub use error::ValidationError;
pub use pet::Category;
pub use pet::Pet;
pub use pet::PetStatus;
pub use pet::Tag;
pub use response::ResponseRecord;
pub use schema::FieldKind;
pub use schema::FieldSpec;
pub use schema::SchemaDefinition;
pub use schema::SchemaRegistry;
pub use schema::petstore_registry;
pub use validate::validate;
