// system-tests/tests/suites/functional.rs
// ============================================================================
// Module: Functional Tests
// Description: Pet-resource behavior checks through the harness.
// Purpose: Verify the round-trip property and the shipped families.
// Dependencies: petverify-core, petverify-harness, helpers
// ============================================================================

//! ## Overview
//! Functional coverage for the pet surface: the create/get/update/get/
//! delete/get round trip, the nonexistent-identity contract, and the
//! parametrized find-by-status matrix, all executed end to end against
//! the in-process stub.

use petverify_core::HttpMethod;
use petverify_harness::suite::find_by_status_family;
use petverify_harness::suite::nonexistent_pet_family;
use petverify_harness::suite::petstore_suite;
use serde_json::json;

use crate::helpers::harness::harness_for;
use crate::helpers::petstore_stub::spawn_petstore_stub;

#[tokio::test(flavor = "multi_thread")]
async fn round_trip_create_get_update_delete() -> Result<(), String> {
    let stub = spawn_petstore_stub()?;
    let harness = harness_for(stub.base_url())?;
    let client = &harness.client;

    let payload = json!({"name": "Rex", "status": "available"});
    let pet_id = harness
        .runner
        .fixtures()
        .with_fixture(payload, |fixture| async move {
            let path = format!("/pet/{}", fixture.pet_id);

            // get returns the created shape
            let created = client.send(HttpMethod::Get, &path, None, &[]).await?;
            assert_eq!(created.status, 200);
            let body = created.body.clone().unwrap_or_default();
            assert_eq!(body["name"], json!("Rex"));
            assert_eq!(body["status"], json!("available"));

            // get after update reflects updated fields exactly
            let updated_payload =
                json!({"id": fixture.pet_id, "name": "Rex II", "status": "sold"});
            let updated =
                client.send(HttpMethod::Put, "/pet", Some(&updated_payload), &[]).await?;
            assert_eq!(updated.status, 200);
            let after_update = client.send(HttpMethod::Get, &path, None, &[]).await?;
            assert_eq!(after_update.body, Some(updated_payload));

            // get after delete returns not-found
            let deleted = client.send(HttpMethod::Delete, &path, None, &[]).await?;
            assert_eq!(deleted.status, 200);
            assert_eq!(deleted.text, "Pet deleted");
            let after_delete = client.send(HttpMethod::Get, &path, None, &[]).await?;
            assert_eq!(after_delete.status, 404);

            Ok(fixture.pet_id)
        })
        .await
        .map_err(|err| err.to_string())?;

    // The body deleted the pet itself; teardown still ran and was
    // tolerated by the service's delete acknowledgement.
    assert!(!stub.pet_exists(pet_id));
    assert_eq!(stub.delete_count(pet_id), 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn nonexistent_pet_family_passes() -> Result<(), String> {
    let stub = spawn_petstore_stub()?;
    let harness = harness_for(stub.base_url())?;
    let reports = harness.runner.run_family(&nonexistent_pet_family()).await;
    assert_eq!(reports.len(), 3);
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

#[tokio::test(flavor = "multi_thread")]
async fn find_by_status_matrix_passes() -> Result<(), String> {
    let stub = spawn_petstore_stub()?;
    stub.seed_pet(1, "Buddy", "available");
    stub.seed_pet(2, "Max", "pending");
    stub.seed_pet(3, "Luna", "sold");
    let harness = harness_for(stub.base_url())?;
    let reports = harness.runner.run_family(&find_by_status_family()).await;
    assert_eq!(reports.len(), 6);
    for report in &reports {
        assert!(
            report.outcome.is_passed(),
            "case `{}` did not pass: {:?}",
            report.title,
            report.outcome
        );
    }
    // The rejection of a request without any status filter is part of
    // the matrix, not just empty/invalid values.
    assert!(
        reports.iter().any(|report| report.title == "find without a status filter is rejected")
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn full_shipped_suite_passes() -> Result<(), String> {
    let stub = spawn_petstore_stub()?;
    let harness = harness_for(stub.base_url())?;
    let report = harness.runner.run_suite(&petstore_suite()).await;
    assert_eq!(report.cases.len(), 12);
    assert!(report.all_passed(), "suite summary:\n{}", report.to_markdown());
    assert_eq!(report.passed(), 12);

    // The audit trail is flushed as canonical JSON next to the run.
    let path = harness.sink.flush("steps.json").map_err(|err| err.to_string())?;
    let written = std::fs::read_to_string(path).map_err(|err| err.to_string())?;
    assert!(written.contains("check response"));
    Ok(())
}
