// system-tests/tests/suites/contract.rs
// ============================================================================
// Module: Contract Tests
// Description: Schema conformance validation for pet responses.
// Purpose: Ensure creation responses match the structural pet contract.
// Dependencies: petverify-core, petverify-harness, jsonschema
// ============================================================================

//! ## Overview
//! Schema conformance validation for pet responses. The hand-walked
//! validator is cross-checked against an independently authored draft
//! 2020-12 JSON Schema so the two contract renderings cannot drift apart
//! silently.

use petverify_core::HttpMethod;
use petverify_core::Pet;
use petverify_core::PetStatus;
use petverify_core::petstore_registry;
use petverify_core::validate;
use serde_json::Value;
use serde_json::json;

use crate::helpers::harness::harness_for;
use crate::helpers::petstore_stub::spawn_petstore_stub;

/// Draft 2020-12 rendering of the pet contract, authored independently
/// of the registry so the cross-check is meaningful.
fn pet_json_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "required": ["id", "name", "status"],
        "properties": {
            "id": {"type": "integer"},
            "name": {"type": "string"},
            "category": {"$ref": "#/$defs/category"},
            "photoUrls": {"type": "array", "items": {"type": "string"}},
            "tags": {"type": "array", "items": {"$ref": "#/$defs/tag"}},
            "status": {"type": "string"}
        },
        "$defs": {
            "category": {
                "type": "object",
                "required": ["id", "name"],
                "properties": {
                    "id": {"type": "integer"},
                    "name": {"type": "string"}
                }
            },
            "tag": {
                "type": "object",
                "required": ["id", "name"],
                "properties": {
                    "id": {"type": "integer"},
                    "name": {"type": "string"}
                }
            }
        }
    })
}

fn compile_pet_schema() -> jsonschema::Validator {
    jsonschema::options()
        .with_draft(jsonschema::Draft::Draft202012)
        .build(&pet_json_schema())
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn creation_responses_validate_minimal_and_full() -> Result<(), String> {
    let stub = spawn_petstore_stub()?;
    let harness = harness_for(stub.base_url())?;
    let registry = petstore_registry();
    let draft = compile_pet_schema();

    let minimal = json!({"id": 1, "name": "Buddy", "status": "available"});
    let full = Pet::full(
        "doggie",
        PetStatus::Available,
        petverify_core::Category {
            id: 1,
            name: "Dogs".to_string(),
        },
        vec![petverify_core::Tag {
            id: 0,
            name: "string".to_string(),
        }],
    )
    .to_value();

    for payload in [minimal, full] {
        let record = harness
            .client
            .send(HttpMethod::Post, "/pet", Some(&payload), &[])
            .await
            .map_err(|err| err.to_string())?;
        assert_eq!(record.status, 200);
        let body = record.body.as_ref().ok_or("creation response was not JSON")?;
        validate(body, "pet", &registry).map_err(|err| err.to_string())?;
        let draft_errors: Vec<String> = draft.iter_errors(body).map(|err| err.to_string()).collect();
        assert!(draft_errors.is_empty(), "draft validator disagreed: {}", draft_errors.join("; "));
    }
    Ok(())
}

#[test]
fn hand_walker_and_draft_validator_agree() {
    let registry = petstore_registry();
    let draft = compile_pet_schema();
    let bodies = [
        json!({"id": 1, "name": "Buddy", "status": "available"}),
        json!({
            "id": 10,
            "name": "doggie",
            "category": {"id": 1, "name": "Dogs"},
            "photoUrls": ["string"],
            "tags": [{"id": 0, "name": "string"}],
            "status": "available"
        }),
        json!({"id": 1, "status": "available"}),
        json!({"id": 1, "name": "Buddy", "category": {"id": 1, "name": 7}, "status": "available"}),
        json!({"id": 1, "name": "Buddy", "status": "available", "extra": "ignored"}),
        json!({"id": "one", "name": "Buddy", "status": "available"}),
    ];
    for body in &bodies {
        let walked = validate(body, "pet", &registry).is_ok();
        let drafted = draft.iter_errors(body).next().is_none();
        assert_eq!(walked, drafted, "validators disagree on {body}");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn creation_family_passes_through_the_runner() -> Result<(), String> {
    let stub = spawn_petstore_stub()?;
    let harness = harness_for(stub.base_url())?;
    let reports = harness.runner.run_family(&petverify_harness::suite::creation_family()).await;
    for report in &reports {
        assert!(
            report.outcome.is_passed(),
            "case `{}` did not pass: {:?}",
            report.title,
            report.outcome
        );
    }
    Ok(())
}
