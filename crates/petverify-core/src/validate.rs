// crates/petverify-core/src/validate.rs
// ============================================================================
// Module: Schema Validator
// Description: Structural walk of a JSON body against a registered schema.
// Purpose: Report the first contract break with a field-path diagnostic.
// Dependencies: crate::schema, crate::error, serde_json
// ============================================================================

//! ## Overview
//! The validator walks a schema's declared fields in declaration order and
//! stops at the first violation, reporting its dotted/indexed path
//! (`category.name`, `tags[0].id`), the expected kind, and the actual
//! value. Open schemas tolerate undeclared fields; closed schemas report
//! the first undeclared key. The body is never mutated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use crate::error::ValidationError;
use crate::schema::FieldKind;
use crate::schema::SchemaDefinition;
use crate::schema::SchemaRegistry;

// ============================================================================
// SECTION: Public Entry Point
// ============================================================================

/// Validates `body` against the named schema in `registry`.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found: a missing required field,
/// a type mismatch, an undeclared field in a closed schema, or an
/// unresolved schema reference.
pub fn validate(
    body: &Value,
    schema_name: &str,
    registry: &SchemaRegistry,
) -> Result<(), ValidationError> {
    let schema = registry.get(schema_name).ok_or_else(|| ValidationError::UnknownSchema {
        name: schema_name.to_string(),
    })?;
    validate_object(body, schema, registry, "")
}

// ============================================================================
// SECTION: Structural Walk
// ============================================================================

/// Validates one object value against a schema, prefixing paths with `at`.
fn validate_object(
    value: &Value,
    schema: &SchemaDefinition,
    registry: &SchemaRegistry,
    at: &str,
) -> Result<(), ValidationError> {
    let Value::Object(map) = value else {
        return Err(ValidationError::TypeMismatch {
            path: root_path(at),
            expected: format!("object `{}`", schema.name),
            actual: render(value),
        });
    };
    for field in &schema.fields {
        let path = join_path(at, &field.name);
        match map.get(&field.name) {
            None if field.required => {
                return Err(ValidationError::MissingField {
                    path,
                });
            }
            None => {}
            Some(child) => validate_kind(child, &field.kind, registry, &path)?,
        }
    }
    if schema.closed {
        check_closed(map, schema, at)?;
    }
    Ok(())
}

/// Validates one value against a field kind, recursing into nested shapes.
fn validate_kind(
    value: &Value,
    kind: &FieldKind,
    registry: &SchemaRegistry,
    path: &str,
) -> Result<(), ValidationError> {
    let matches = match kind {
        FieldKind::String => value.is_string(),
        FieldKind::Integer => value.is_i64() || value.is_u64(),
        FieldKind::Number => value.is_number(),
        FieldKind::Boolean => value.is_boolean(),
        FieldKind::Object(name) => {
            let schema = registry.get(name).ok_or_else(|| ValidationError::UnknownSchema {
                name: name.clone(),
            })?;
            return validate_object(value, schema, registry, path);
        }
        FieldKind::Array(inner) => {
            let Value::Array(items) = value else {
                return Err(mismatch(path, kind, value));
            };
            for (index, item) in items.iter().enumerate() {
                let item_path = format!("{path}[{index}]");
                validate_kind(item, inner, registry, &item_path)?;
            }
            return Ok(());
        }
    };
    if matches {
        Ok(())
    } else {
        Err(mismatch(path, kind, value))
    }
}

/// Reports the first undeclared key of a closed schema.
fn check_closed(
    map: &Map<String, Value>,
    schema: &SchemaDefinition,
    at: &str,
) -> Result<(), ValidationError> {
    for key in map.keys() {
        if !schema.fields.iter().any(|field| field.name == *key) {
            return Err(ValidationError::UnexpectedField {
                path: join_path(at, key),
            });
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Diagnostics
// ============================================================================

/// Builds a type-mismatch error for a path.
fn mismatch(path: &str, kind: &FieldKind, value: &Value) -> ValidationError {
    ValidationError::TypeMismatch {
        path: path.to_string(),
        expected: kind.to_string(),
        actual: render(value),
    }
}

/// Renders a value for diagnostics, truncating long bodies.
fn render(value: &Value) -> String {
    const MAX_RENDERED: usize = 120;
    let mut text = value.to_string();
    if text.len() > MAX_RENDERED {
        text.truncate(MAX_RENDERED);
        text.push_str("...");
    }
    text
}

/// Joins a parent path and a field name with a dot.
fn join_path(at: &str, name: &str) -> String {
    if at.is_empty() {
        name.to_string()
    } else {
        format!("{at}.{name}")
    }
}

/// Renders the root path label for non-object roots.
fn root_path(at: &str) -> String {
    if at.is_empty() {
        "$".to_string()
    } else {
        at.to_string()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
