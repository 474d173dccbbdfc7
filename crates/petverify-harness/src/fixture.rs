// crates/petverify-harness/src/fixture.rs
// ============================================================================
// Module: Fixture Manager
// Description: Scoped remote resources with guaranteed teardown.
// Purpose: Keep cases independent on a shared remote service.
// Dependencies: petverify-core, crate::client, crate::recorder
// ============================================================================

//! ## Overview
//! A fixture is an ephemeral pet created solely for one case. The manager
//! creates it, yields its service-assigned identity to the case body, and
//! deletes it on every exit path, including body failures and
//! cancellation of the scope's future. Teardown failure (the pet was
//! already removed by the body itself) is tolerated and recorded as an
//! audit note, never escalated: double-deletion does not reflect a
//! service contract violation by the test.
//!
//! Invariants:
//! - Teardown is attempted for every created fixture; cancellation mid
//!   scope spawns the delete as a detached best-effort task.
//! - If creation fails, nothing was created and teardown is skipped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::future::Future;
use std::sync::Arc;

use petverify_core::CaseError;
use petverify_core::CasePhase;
use petverify_core::FixtureSetupError;
use petverify_core::HttpMethod;
use serde_json::Value;
use tokio::runtime::Handle;

use crate::client::ApiClient;
use crate::recorder::StepRecorder;
use crate::recorder::note;
use crate::recorder::step;

// ============================================================================
// SECTION: Fixture
// ============================================================================

/// An ephemeral remote pet owned by one case execution.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    /// Service-assigned pet identity.
    pub pet_id: i64,
    /// Payload the pet was created from.
    pub payload: Value,
}

// ============================================================================
// SECTION: Fixture Manager
// ============================================================================

/// Creates and tears down fixtures through the client adapter.
#[derive(Clone)]
pub struct FixtureManager {
    /// Shared client adapter.
    client: Arc<ApiClient>,
    /// Audit sink for setup/teardown steps.
    recorder: Arc<dyn StepRecorder>,
}

impl FixtureManager {
    /// Creates a manager over a shared client and recorder.
    #[must_use]
    pub fn new(client: Arc<ApiClient>, recorder: Arc<dyn StepRecorder>) -> Self {
        Self {
            client,
            recorder,
        }
    }

    /// Creates a fixture, runs `body` with it, and tears the fixture down
    /// on every exit path before returning the body's result.
    ///
    /// If the returned future is dropped mid-scope (case cancellation or
    /// suite interruption), a guard spawns the delete as a detached task
    /// so the fixture still gets cleaned up best-effort.
    ///
    /// # Errors
    ///
    /// Returns the creation error when setup fails (teardown skipped) or
    /// the body's own error. Teardown failures are audit notes only.
    pub async fn with_fixture<T, F, Fut>(&self, payload: Value, body: F) -> Result<T, CaseError>
    where
        F: FnOnce(Fixture) -> Fut,
        Fut: Future<Output = Result<T, CaseError>>,
    {
        let fixture = self.create(payload).await?;
        let mut guard = TeardownGuard::new(self.clone(), fixture.clone());
        let result = body(fixture.clone()).await;
        self.teardown(&fixture).await;
        guard.disarm();
        result
    }

    /// Creates the remote pet and extracts its assigned identity.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::Transport`] on network failure and
    /// [`CaseError::FixtureSetup`] when the create is rejected or the
    /// response carries no usable identity.
    pub async fn create(&self, payload: Value) -> Result<Fixture, CaseError> {
        step(self.recorder.as_ref(), CasePhase::FixtureSetup, "create fixture pet", async {
            let record =
                self.client.send(HttpMethod::Post, "/pet", Some(&payload), &[]).await?;
            if !record.is_success() {
                return Err(CaseError::FixtureSetup(FixtureSetupError::CreateRejected {
                    status: record.status,
                    text: record.text,
                }));
            }
            let pet_id = record
                .body
                .as_ref()
                .and_then(|body| body.get("id"))
                .and_then(Value::as_i64)
                .ok_or(FixtureSetupError::MissingIdentity {
                    text: record.text,
                })?;
            Ok(Fixture {
                pet_id,
                payload,
            })
        })
        .await
    }

    /// Deletes the fixture pet, tolerating failure.
    ///
    /// The delete is attempted exactly once; any failure (transport fault
    /// or a non-2xx response, typically because the body already deleted
    /// the pet) is recorded as an audit note.
    pub async fn teardown(&self, fixture: &Fixture) {
        let path = format!("/pet/{}", fixture.pet_id);
        let outcome = self.client.send(HttpMethod::Delete, &path, None, &[]).await;
        let detail = match outcome {
            Ok(record) if record.is_success() => {
                format!("fixture pet {} deleted", fixture.pet_id)
            }
            Ok(record) => format!(
                "fixture pet {} teardown tolerated status {}: {}",
                fixture.pet_id, record.status, record.text
            ),
            Err(err) => {
                format!("fixture pet {} teardown tolerated transport fault: {err}", fixture.pet_id)
            }
        };
        note(self.recorder.as_ref(), CasePhase::FixtureTeardown, "delete fixture pet", detail);
    }
}

// ============================================================================
// SECTION: Teardown Guard
// ============================================================================

/// Guard ensuring teardown is attempted even when the fixture scope's
/// future is dropped before completing.
///
/// Armed from creation until the normal awaited teardown finishes; when
/// dropped armed, the delete is spawned as a detached task on the current
/// runtime. A duplicate delete after an interrupted teardown is tolerated
/// by the service's delete acknowledgement.
struct TeardownGuard {
    /// Manager performing the deferred teardown.
    manager: FixtureManager,
    /// Fixture to release.
    fixture: Fixture,
    /// Cleared once the awaited teardown has run.
    armed: bool,
}

impl TeardownGuard {
    /// Arms a guard for a freshly created fixture.
    fn new(manager: FixtureManager, fixture: Fixture) -> Self {
        Self {
            manager,
            fixture,
            armed: true,
        }
    }

    /// Disarms the guard after the awaited teardown completed.
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for TeardownGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let Ok(handle) = Handle::try_current() else {
            return;
        };
        let manager = self.manager.clone();
        let fixture = self.fixture.clone();
        let _ = handle.spawn(async move {
            manager.teardown(&fixture).await;
        });
    }
}
