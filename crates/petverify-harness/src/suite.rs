// crates/petverify-harness/src/suite.rs
// ============================================================================
// Module: Petstore Suite
// Description: The shipped declarative contract families for the pet
//              resource.
// Purpose: Declare the contract checks as data driven by the runner.
// Dependencies: petverify-core, serde_json
// ============================================================================

//! ## Overview
//! The shipped suite covers the pet resource contract: behavior for
//! nonexistent identities, creation with minimal and full payloads, a
//! fixture-scoped read, and the parametrized `findByStatus` matrix. Case
//! families are plain data; varying a parameter means adding an
//! `(input, expected)` pair, not a new type.

// ============================================================================
// SECTION: Imports
// ============================================================================

use petverify_core::CaseFamily;
use petverify_core::Category;
use petverify_core::ExpectedBody;
use petverify_core::HttpMethod;
use petverify_core::Pet;
use petverify_core::PetStatus;
use petverify_core::Tag;
use petverify_core::TestCase;
use serde_json::json;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Pet identity assumed to never exist on the service under test.
pub const MISSING_PET_ID: i64 = 9999;

/// Acknowledgement text the service returns for a pet deletion.
pub const DELETE_ACK_TEXT: &str = "Pet deleted";

/// Body text the service returns when a pet is not found.
pub const NOT_FOUND_TEXT: &str = "Pet not found";

// ============================================================================
// SECTION: Suite Assembly
// ============================================================================

/// Builds the full shipped suite in execution order.
#[must_use]
pub fn petstore_suite() -> Vec<CaseFamily> {
    vec![
        nonexistent_pet_family(),
        creation_family(),
        fixture_read_family(),
        find_by_status_family(),
    ]
}

/// Contract checks against identities that were never created.
///
/// The delete acknowledgement pairing (200 + `Pet deleted` even for a
/// nonexistent pet) is a property of this service's documented contract,
/// verified here rather than assumed by the harness.
#[must_use]
pub fn nonexistent_pet_family() -> CaseFamily {
    CaseFamily::new(
        "nonexistent-pet",
        vec![
            TestCase::new(
                "get nonexistent pet returns 404",
                HttpMethod::Get,
                &format!("/pet/{MISSING_PET_ID}"),
                404,
            ),
            TestCase::new("update nonexistent pet returns 404", HttpMethod::Put, "/pet", 404)
                .with_payload(json!({
                    "id": MISSING_PET_ID,
                    "name": "Non-existent Pet",
                    "status": "available"
                }))
                .with_expected_body(ExpectedBody::Text(NOT_FOUND_TEXT.to_string())),
            TestCase::new(
                "delete nonexistent pet is acknowledged",
                HttpMethod::Delete,
                &format!("/pet/{MISSING_PET_ID}"),
                200,
            )
            .with_expected_body(ExpectedBody::Text(DELETE_ACK_TEXT.to_string())),
        ],
    )
}

/// Creation checks: minimal and full payloads both satisfy the schema.
#[must_use]
pub fn creation_family() -> CaseFamily {
    let full = Pet::full(
        "doggie",
        PetStatus::Available,
        Category {
            id: 1,
            name: "Dogs".to_string(),
        },
        vec![Tag {
            id: 0,
            name: "string".to_string(),
        }],
    );
    CaseFamily::new(
        "pet-creation",
        vec![
            TestCase::new("create pet with minimal payload", HttpMethod::Post, "/pet", 200)
                .with_payload(json!({"id": 1, "name": "Buddy", "status": "available"}))
                .with_schema("pet"),
            TestCase::new("create pet with full payload", HttpMethod::Post, "/pet", 200)
                .with_payload(full.to_value())
                .with_schema("pet"),
        ],
    )
}

/// Fixture-scoped read: the created pet is retrievable and well-shaped.
#[must_use]
pub fn fixture_read_family() -> CaseFamily {
    CaseFamily::new(
        "fixture-read",
        vec![
            TestCase::new("created pet is retrievable", HttpMethod::Get, "/pet/{id}", 200)
                .with_fixture(json!({"name": "Scoped", "status": "available"}))
                .with_schema("pet")
                .with_expected_body(ExpectedBody::Fields(vec![(
                    "name".to_string(),
                    json!("Scoped"),
                )])),
        ],
    )
}

/// Parametrized `findByStatus` matrix over valid, invalid, empty, and
/// absent filters.
#[must_use]
pub fn find_by_status_family() -> CaseFamily {
    let mut inputs: Vec<(Option<String>, u16, bool)> = PetStatus::ALL
        .iter()
        .map(|status| (Some(status.as_str().to_string()), 200, true))
        .collect();
    inputs.push((Some(String::new()), 400, false));
    inputs.push((Some("adopted".to_string()), 400, false));
    inputs.push((None, 400, false));
    CaseFamily::parametrized("find-by-status", inputs, |(status, expected, is_sequence)| {
        let title = match status {
            None => "find without a status filter is rejected".to_string(),
            Some(status) if status.is_empty() => "find by empty status is rejected".to_string(),
            Some(status) => format!("find by status `{status}` (expect {expected})"),
        };
        let mut case = TestCase::new(&title, HttpMethod::Get, "/pet/findByStatus", *expected);
        if let Some(status) = status {
            case = case.with_query("status", status);
        }
        if *is_sequence {
            case = case.with_expected_body(ExpectedBody::Sequence);
        }
        case
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
