// crates/petverify-core/src/schema.rs
// ============================================================================
// Module: Schema Registry
// Description: Named structural schemas for response-body contracts.
// Purpose: Author resource contracts as static data consumed by the
//          validator.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`SchemaDefinition`] is a structural lower bound on a response body:
//! ordered field specs with a kind and a required flag. Nested entities are
//! referenced by name through the [`SchemaRegistry`], never inlined, so
//! related schemas (`category`, `tag`) stay authored once. Schemas are
//! built at startup and read-only afterwards.
//!
//! Invariants:
//! - Field order is declaration order; the validator reports the first
//!   violation deterministically.
//! - A schema is an open contract unless `closed` is set.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Field Kinds
// ============================================================================

/// Structural kind a declared field must satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// JSON string.
    String,
    /// JSON integer (no fractional part).
    Integer,
    /// Any JSON number.
    Number,
    /// JSON boolean.
    Boolean,
    /// JSON object validating against a named schema.
    Object(String),
    /// JSON array whose every element satisfies the inner kind.
    Array(Box<FieldKind>),
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Integer => f.write_str("integer"),
            Self::Number => f.write_str("number"),
            Self::Boolean => f.write_str("boolean"),
            Self::Object(name) => write!(f, "object `{name}`"),
            Self::Array(inner) => write!(f, "array of {inner}"),
        }
    }
}

// ============================================================================
// SECTION: Field Specs
// ============================================================================

/// One declared field of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name as it appears on the wire.
    pub name: String,
    /// Structural kind the field must satisfy when present.
    pub kind: FieldKind,
    /// Whether the field must be present.
    pub required: bool,
}

impl FieldSpec {
    /// Declares a required field.
    #[must_use]
    pub fn required(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: true,
        }
    }

    /// Declares an optional field, type-checked only when present.
    #[must_use]
    pub fn optional(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: false,
        }
    }
}

// ============================================================================
// SECTION: Schema Definition
// ============================================================================

/// A named structural contract for one resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    /// Registry name of the schema.
    pub name: String,
    /// Declared fields, in declaration order.
    pub fields: Vec<FieldSpec>,
    /// When set, undeclared fields are violations; otherwise the contract
    /// is a lower bound and extra fields are permitted.
    pub closed: bool,
}

impl SchemaDefinition {
    /// Creates an open schema (extra fields permitted).
    #[must_use]
    pub fn open(name: &str, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.to_string(),
            fields,
            closed: false,
        }
    }

    /// Creates a closed schema (undeclared fields rejected).
    #[must_use]
    pub fn closed(name: &str, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.to_string(),
            fields,
            closed: true,
        }
    }
}

// ============================================================================
// SECTION: Schema Registry
// ============================================================================

/// Named map from resource type to schema, read-only after startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaRegistry {
    /// Registered schemas keyed by name.
    schemas: BTreeMap<String, SchemaDefinition>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema under its own name, replacing any previous entry.
    pub fn register(&mut self, schema: SchemaDefinition) {
        self.schemas.insert(schema.name.clone(), schema);
    }

    /// Looks up a schema by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SchemaDefinition> {
        self.schemas.get(name)
    }

    /// Returns registered schema names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }
}

// ============================================================================
// SECTION: Petstore Schemas
// ============================================================================

/// Builds the static petstore registry: `pet`, `category`, and `tag`.
///
/// The `pet` schema requires `id`, `name`, and `status`; category, photo
/// URLs, and tags are declared optional so minimal and full creation
/// payloads both validate against the same contract.
#[must_use]
pub fn petstore_registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    registry.register(SchemaDefinition::open(
        "category",
        vec![
            FieldSpec::required("id", FieldKind::Integer),
            FieldSpec::required("name", FieldKind::String),
        ],
    ));
    registry.register(SchemaDefinition::open(
        "tag",
        vec![
            FieldSpec::required("id", FieldKind::Integer),
            FieldSpec::required("name", FieldKind::String),
        ],
    ));
    registry.register(SchemaDefinition::open(
        "pet",
        vec![
            FieldSpec::required("id", FieldKind::Integer),
            FieldSpec::required("name", FieldKind::String),
            FieldSpec::optional("category", FieldKind::Object("category".to_string())),
            FieldSpec::optional("photoUrls", FieldKind::Array(Box::new(FieldKind::String))),
            FieldSpec::optional("tags", FieldKind::Array(Box::new(FieldKind::Object("tag".to_string())))),
            FieldSpec::required("status", FieldKind::String),
        ],
    ));
    registry
}

// ============================================================================
// SECTION: Tests
// ============================================================================
