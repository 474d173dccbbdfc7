// crates/petverify-harness/src/recorder.rs
// ============================================================================
// Module: Step Recorder
// Description: Scoped step annotations emitted to the audit backend.
// Purpose: Capture start, label, and outcome per logical step without
//          touching pass/fail logic.
// Dependencies: petverify-core, serde, serde_jcs
// ============================================================================

//! ## Overview
//! Step recording is a pure side channel: [`step`] times the enclosed unit
//! of work, emits one [`StepEvent`], and propagates the result unchanged.
//! Recorders never alter control flow or suppress failures. The
//! [`JsonAuditSink`] buffers events and flushes them as canonical JCS JSON
//! under a per-run directory for the external report renderer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fs;
use std::future::Future;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use petverify_core::CasePhase;
use serde::Serialize;

// ============================================================================
// SECTION: Step Events
// ============================================================================

/// Outcome of one recorded step.
///
/// # Invariants
/// - Variants are stable for audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepStatus {
    /// The enclosed unit returned success.
    Succeeded,
    /// The enclosed unit returned an error.
    Failed,
}

/// One audit event: a labeled step with start/end boundaries.
///
/// Events carry no pass/fail authority; outcomes are decided by the
/// runner independently of what the recorder observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepEvent {
    /// Human-readable step label.
    pub label: String,
    /// Case phase the step belongs to.
    pub phase: CasePhase,
    /// Start boundary, milliseconds since the Unix epoch.
    pub started_at_ms: u64,
    /// End boundary, milliseconds since the Unix epoch.
    pub ended_at_ms: u64,
    /// Step outcome.
    pub status: StepStatus,
    /// Optional diagnostic detail (error rendering, teardown note).
    pub detail: Option<String>,
}

/// Current wall clock in milliseconds since the Unix epoch.
///
/// Saturates instead of truncating so timestamps stay canonical-JSON
/// representable.
fn now_millis() -> u64 {
    let millis = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
    u64::try_from(millis).unwrap_or(u64::MAX)
}

// ============================================================================
// SECTION: Recorder Trait
// ============================================================================

/// Sink for step events, consumed by the external report renderer.
pub trait StepRecorder: Send + Sync {
    /// Records one completed step event.
    fn record(&self, event: StepEvent);
}

/// Recorder that drops every event; used when auditing is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRecorder;

impl StepRecorder for NullRecorder {
    fn record(&self, _event: StepEvent) {}
}

// ============================================================================
// SECTION: Step Wrapper
// ============================================================================

/// Runs `unit` as a recorded step and propagates its result unchanged.
///
/// # Errors
///
/// Returns exactly the error produced by `unit`; the recorder never
/// suppresses or rewrites failures.
pub async fn step<T, E, F>(
    recorder: &dyn StepRecorder,
    phase: CasePhase,
    label: &str,
    unit: F,
) -> Result<T, E>
where
    E: fmt::Display,
    F: Future<Output = Result<T, E>>,
{
    let started_at_ms = now_millis();
    let result = unit.await;
    let (status, detail) = match &result {
        Ok(_) => (StepStatus::Succeeded, None),
        Err(err) => (StepStatus::Failed, Some(err.to_string())),
    };
    recorder.record(StepEvent {
        label: label.to_string(),
        phase,
        started_at_ms,
        ended_at_ms: now_millis(),
        status,
        detail,
    });
    result
}

/// Records an instantaneous note outside any unit of work.
pub fn note(recorder: &dyn StepRecorder, phase: CasePhase, label: &str, detail: String) {
    let now = now_millis();
    recorder.record(StepEvent {
        label: label.to_string(),
        phase,
        started_at_ms: now,
        ended_at_ms: now,
        status: StepStatus::Succeeded,
        detail: Some(detail),
    });
}

// ============================================================================
// SECTION: JSON Audit Sink
// ============================================================================

/// Buffering recorder that flushes canonical JSON artifacts per run.
#[derive(Debug)]
pub struct JsonAuditSink {
    /// Run directory the artifacts land in.
    root: PathBuf,
    /// Buffered events in arrival order.
    events: Mutex<Vec<StepEvent>>,
}

impl JsonAuditSink {
    /// Creates the sink and its per-run directory under `audit_root`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the run directory cannot be created.
    pub fn new(audit_root: &Path) -> io::Result<Self> {
        let root = audit_root.join(format!("run_{}", now_millis()));
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            events: Mutex::new(Vec::new()),
        })
    }

    /// Returns the run directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns a snapshot of the buffered events.
    #[must_use]
    pub fn events(&self) -> Vec<StepEvent> {
        self.events.lock().map_or_else(|_| Vec::new(), |events| events.clone())
    }

    /// Flushes buffered events as canonical JCS JSON.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when serialization or the write fails.
    pub fn flush(&self, name: &str) -> io::Result<PathBuf> {
        let events = self.events();
        let path = self.root.join(name);
        let bytes = serde_jcs::to_vec(&events).map_err(io::Error::other)?;
        fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Writes an arbitrary JSON artifact next to the step trace.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when serialization or the write fails.
    pub fn write_json<T: Serialize>(&self, name: &str, value: &T) -> io::Result<PathBuf> {
        let path = self.root.join(name);
        let bytes = serde_jcs::to_vec(value).map_err(io::Error::other)?;
        fs::write(&path, bytes)?;
        Ok(path)
    }
}

impl StepRecorder for JsonAuditSink {
    fn record(&self, event: StepEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
