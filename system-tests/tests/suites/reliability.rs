// system-tests/tests/suites/reliability.rs
// ============================================================================
// Module: Reliability Tests
// Description: Fixture-lifecycle and fault-path checks for the harness.
// Purpose: Verify teardown guarantees and environment-fault mapping.
// Dependencies: petverify-core, petverify-harness, helpers
// ============================================================================

//! ## Overview
//! Reliability coverage for the harness itself: teardown fires exactly
//! once even when the case body fails, setup failure skips teardown,
//! transport faults and timeouts surface as `Errored` rather than
//! `Failed`, and HTTP statuses are never retried.

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use petverify_core::CaseError;
use petverify_core::CasePhase;
use petverify_core::ContractViolation;
use petverify_core::HttpMethod;
use petverify_core::Outcome;
use petverify_core::TestCase;
use petverify_core::TransportError;
use petverify_harness::HarnessConfig;
use serde_json::json;
use tokio::time::sleep;
use tokio::time::timeout;

use crate::helpers::harness::harness_for;
use crate::helpers::harness::harness_with_config;
use crate::helpers::petstore_stub::StubOptions;
use crate::helpers::petstore_stub::spawn_petstore_stub;
use crate::helpers::petstore_stub::spawn_petstore_stub_with_options;

#[tokio::test(flavor = "multi_thread")]
async fn teardown_fires_exactly_once_when_body_fails() -> Result<(), String> {
    let stub = spawn_petstore_stub()?;
    let harness = harness_for(stub.base_url())?;
    let seen_id = Arc::new(Mutex::new(None::<i64>));
    let captured = Arc::clone(&seen_id);

    let result: Result<(), CaseError> = harness
        .runner
        .fixtures()
        .with_fixture(json!({"name": "Doomed", "status": "available"}), |fixture| {
            let captured = Arc::clone(&captured);
            async move {
                if let Ok(mut slot) = captured.lock() {
                    *slot = Some(fixture.pet_id);
                }
                // Forced assertion failure inside the fixture scope.
                Err(ContractViolation::StatusMismatch {
                    expected: 200,
                    observed: 500,
                }
                .into())
            }
        })
        .await;

    assert!(matches!(result, Err(CaseError::Contract(_))));
    let pet_id = seen_id.lock().map_err(|_| "seen_id poisoned")?.ok_or("fixture id not seen")?;
    assert!(!stub.pet_exists(pet_id));
    assert_eq!(stub.delete_count(pet_id), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn cancelled_fixture_scope_still_tears_down() -> Result<(), String> {
    let stub = spawn_petstore_stub()?;
    let harness = harness_for(stub.base_url())?;
    let seen_id = Arc::new(Mutex::new(None::<i64>));
    let captured = Arc::clone(&seen_id);

    // Drop the scope mid-body, as a suite interruption would.
    let scoped = harness.runner.fixtures().with_fixture(
        json!({"name": "Interrupted", "status": "available"}),
        |fixture| {
            let captured = Arc::clone(&captured);
            async move {
                if let Ok(mut slot) = captured.lock() {
                    *slot = Some(fixture.pet_id);
                }
                sleep(Duration::from_secs(30)).await;
                Ok(())
            }
        },
    );
    let cancelled: Result<Result<(), CaseError>, _> =
        timeout(Duration::from_millis(300), scoped).await;
    assert!(cancelled.is_err(), "body was expected to outlive the timeout");

    let pet_id = seen_id.lock().map_err(|_| "seen_id poisoned")?.ok_or("fixture id not seen")?;
    // The detached teardown task needs a moment to reach the stub.
    for _ in 0..100 {
        if stub.delete_count(pet_id) > 0 {
            break;
        }
        sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(stub.delete_count(pet_id), 1);
    assert!(!stub.pet_exists(pet_id));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn fixture_setup_failure_skips_teardown() -> Result<(), String> {
    let stub = spawn_petstore_stub_with_options(StubOptions {
        reject_creates: true,
        ..StubOptions::default()
    })?;
    let harness = harness_for(stub.base_url())?;

    let result: Result<(), CaseError> = harness
        .runner
        .fixtures()
        .with_fixture(json!({"name": "Unborn", "status": "available"}), |_fixture| async move {
            Ok(())
        })
        .await;

    assert!(matches!(result, Err(CaseError::FixtureSetup(_))));
    // Only the rejected create reached the stub; no delete was attempted.
    assert_eq!(stub.request_total(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn fixture_case_with_rejected_setup_maps_to_errored() -> Result<(), String> {
    let stub = spawn_petstore_stub_with_options(StubOptions {
        reject_creates: true,
        ..StubOptions::default()
    })?;
    let harness = harness_for(stub.base_url())?;
    let case = TestCase::new("read scoped pet", HttpMethod::Get, "/pet/{id}", 200)
        .with_fixture(json!({"name": "Unborn", "status": "available"}));
    let report = harness.runner.run_case("reliability", &case).await;
    assert!(matches!(report.outcome, Outcome::Errored(_)));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn transport_fault_marks_case_errored() -> Result<(), String> {
    // Port 1 on loopback is expected to refuse connections.
    let harness = harness_for("http://127.0.0.1:1")?;
    let case = TestCase::new("get pet", HttpMethod::Get, "/pet/1", 200);
    let report = harness.runner.run_case("reliability", &case).await;
    assert!(matches!(report.outcome, Outcome::Errored(_)));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn timeout_is_enforced_by_the_adapter() -> Result<(), String> {
    let stub = spawn_petstore_stub_with_options(StubOptions {
        response_delay: Duration::from_millis(900),
        ..StubOptions::default()
    })?;
    let config = HarnessConfig {
        base_url: stub.base_url().to_string(),
        timeout: Duration::from_millis(200),
        ..HarnessConfig::default()
    };
    let harness = harness_with_config(&config)?;
    let err = harness
        .client
        .send(HttpMethod::Get, "/pet/1", None, &[])
        .await
        .expect_err("expected a timeout");
    assert!(matches!(err, TransportError::Timeout { .. }));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn http_statuses_are_never_retried() -> Result<(), String> {
    let stub = spawn_petstore_stub()?;
    let config = HarnessConfig {
        base_url: stub.base_url().to_string(),
        transport_retries: 2,
        ..HarnessConfig::default()
    };
    let harness = harness_with_config(&config)?;
    let record = harness
        .client
        .send(HttpMethod::Get, "/pet/9999", None, &[])
        .await
        .map_err(|err| err.to_string())?;
    assert_eq!(record.status, 404);
    // The 404 is a contract signal, not a transport fault: one round trip.
    assert_eq!(stub.request_total(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn teardown_transport_fault_is_tolerated() -> Result<(), String> {
    let stub = spawn_petstore_stub()?;
    let harness = harness_for(stub.base_url())?;
    let fixture = harness
        .runner
        .fixtures()
        .create(json!({"name": "Orphan", "status": "available"}))
        .await
        .map_err(|err| err.to_string())?;

    // Tear down through a client whose endpoint is unreachable.
    let unreachable = harness_for("http://127.0.0.1:1")?;
    unreachable.runner.fixtures().teardown(&fixture).await;

    let events = unreachable.sink.events();
    let teardown_note = events
        .iter()
        .find(|event| event.phase == CasePhase::FixtureTeardown)
        .ok_or("no teardown note recorded")?;
    let detail = teardown_note.detail.as_deref().unwrap_or_default();
    assert!(detail.contains("tolerated"), "unexpected teardown note: {detail}");
    Ok(())
}
