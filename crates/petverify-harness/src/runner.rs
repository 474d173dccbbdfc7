// crates/petverify-harness/src/runner.rs
// ============================================================================
// Module: Test Matrix Runner
// Description: Sequential execution of declarative case families.
// Purpose: Drive each case through fixtures, transport, and validation
//          into a terminal outcome.
// Dependencies: petverify-core, crate::client, crate::fixture,
//               crate::recorder
// ============================================================================

//! ## Overview
//! The runner drives one case at a time through its phases:
//! `Declared -> FixtureSetup? -> Requesting -> Validating -> terminal`,
//! with fixture teardown always running when setup ran. Contract
//! violations mark the case `Failed`; transport and fixture-setup faults
//! mark it `Errored`, so service bugs stay distinguishable from
//! environment bugs. Cases share no mutable state except through the
//! fixture manager's deliberate scoping.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::sync::Arc;

use petverify_core::CaseError;
use petverify_core::CaseFamily;
use petverify_core::CasePhase;
use petverify_core::ContractViolation;
use petverify_core::ExpectedBody;
use petverify_core::Outcome;
use petverify_core::ResponseRecord;
use petverify_core::SchemaRegistry;
use petverify_core::TestCase;
use petverify_core::validate;
use serde::Serialize;
use serde_json::Value;

use crate::client::ApiClient;
use crate::fixture::FixtureManager;
use crate::recorder::StepRecorder;
use crate::recorder::note;
use crate::recorder::step;

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Terminal record of one executed case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseReport {
    /// Family the case belongs to.
    pub family: String,
    /// Case title.
    pub title: String,
    /// Terminal outcome.
    pub outcome: Outcome,
}

/// Aggregated results for a full suite run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    /// Per-case reports in execution order.
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    /// Number of passed cases.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Passed))
    }

    /// Number of failed cases (contract violations).
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Failed(_)))
    }

    /// Number of errored cases (harness or environment faults).
    #[must_use]
    pub fn errored(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Errored(_)))
    }

    /// Returns `true` when every case passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.cases.iter().all(|case| case.outcome.is_passed())
    }

    /// Counts cases matching a predicate over their outcome.
    fn count(&self, matcher: impl Fn(&Outcome) -> bool) -> usize {
        self.cases.iter().filter(|case| matcher(&case.outcome)).count()
    }

    /// Renders a human-readable markdown summary.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Contract Suite Summary\n\n");
        let _ = writeln!(
            out,
            "- Cases: {} (passed {}, failed {}, errored {})",
            self.cases.len(),
            self.passed(),
            self.failed(),
            self.errored()
        );
        out.push_str("\n## Cases\n\n");
        for case in &self.cases {
            let detail = match &case.outcome {
                Outcome::Passed => String::new(),
                Outcome::Failed(reason) | Outcome::Errored(reason) => format!(": {reason}"),
            };
            let _ = writeln!(
                out,
                "- [{}] {} / {}{detail}",
                case.outcome.as_str(),
                case.family,
                case.title
            );
        }
        out
    }
}

// ============================================================================
// SECTION: Suite Runner
// ============================================================================

/// Sequential runner over declarative case families.
#[derive(Clone)]
pub struct SuiteRunner {
    /// Shared client adapter.
    client: Arc<ApiClient>,
    /// Fixture manager scoping remote resources per case.
    fixtures: FixtureManager,
    /// Audit sink for step events.
    recorder: Arc<dyn StepRecorder>,
    /// Read-only schema registry.
    registry: SchemaRegistry,
    /// Families registered for a full run, in registration order.
    families: Vec<CaseFamily>,
}

impl SuiteRunner {
    /// Creates a runner over a client, recorder, and schema registry.
    #[must_use]
    pub fn new(
        client: Arc<ApiClient>,
        recorder: Arc<dyn StepRecorder>,
        registry: SchemaRegistry,
    ) -> Self {
        let fixtures = FixtureManager::new(Arc::clone(&client), Arc::clone(&recorder));
        Self {
            client,
            fixtures,
            recorder,
            registry,
            families: Vec::new(),
        }
    }

    /// Returns the fixture manager for cases that need manual scoping.
    #[must_use]
    pub const fn fixtures(&self) -> &FixtureManager {
        &self.fixtures
    }

    /// Registers a case family for the next full run.
    pub fn register(&mut self, family: CaseFamily) {
        self.families.push(family);
    }

    /// Runs every registered family in registration order.
    pub async fn run_registered(&self) -> SuiteReport {
        self.run_suite(&self.families).await
    }

    /// Runs every family sequentially and aggregates the reports.
    pub async fn run_suite(&self, families: &[CaseFamily]) -> SuiteReport {
        let mut report = SuiteReport::default();
        for family in families {
            report.cases.extend(self.run_family(family).await);
        }
        report
    }

    /// Runs one family's cases in declaration order.
    pub async fn run_family(&self, family: &CaseFamily) -> Vec<CaseReport> {
        let mut reports = Vec::with_capacity(family.cases.len());
        for case in &family.cases {
            reports.push(self.run_case(&family.name, case).await);
        }
        reports
    }

    /// Runs one case to a terminal outcome.
    pub async fn run_case(&self, family: &str, case: &TestCase) -> CaseReport {
        note(
            self.recorder.as_ref(),
            CasePhase::Declared,
            &case.title,
            format!("family {family}"),
        );
        let outcome = match self.execute(case).await {
            Ok(()) => Outcome::Passed,
            Err(CaseError::Contract(violation)) => Outcome::Failed(violation.to_string()),
            Err(err) => Outcome::Errored(err.to_string()),
        };
        CaseReport {
            family: family.to_string(),
            title: case.title.clone(),
            outcome,
        }
    }

    /// Executes the case body, scoping a fixture when one is declared.
    async fn execute(&self, case: &TestCase) -> Result<(), CaseError> {
        if let Some(payload) = &case.fixture {
            self.fixtures
                .with_fixture(payload.clone(), |fixture| async move {
                    let path = case.path.replace("{id}", &fixture.pet_id.to_string());
                    self.perform(case, &path).await
                })
                .await
        } else {
            self.perform(case, &case.path).await
        }
    }

    /// Issues the request and applies the case's assertions.
    async fn perform(&self, case: &TestCase, path: &str) -> Result<(), CaseError> {
        let label = format!("{} {path}", case.method.as_str());
        let record = step(self.recorder.as_ref(), CasePhase::Requesting, &label, async {
            self.client.send(case.method, path, case.payload.as_ref(), &case.query).await
        })
        .await?;
        step(self.recorder.as_ref(), CasePhase::Validating, "check response", async {
            self.check(case, &record)
        })
        .await?;
        Ok(())
    }

    /// Applies status, body, and schema assertions to a response.
    fn check(&self, case: &TestCase, record: &ResponseRecord) -> Result<(), CaseError> {
        if record.status != case.expected_status {
            return Err(ContractViolation::StatusMismatch {
                expected: case.expected_status,
                observed: record.status,
            }
            .into());
        }
        if let Some(expected) = &case.expected_body {
            check_body(expected, record)?;
        }
        if let Some(schema) = &case.schema {
            let body = record.body.as_ref().ok_or_else(|| ContractViolation::MissingBody {
                text: record.text.clone(),
            })?;
            validate(body, schema, &self.registry).map_err(ContractViolation::Schema)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Body Assertions
// ============================================================================

/// Checks one expected-body assertion against a response record.
fn check_body(expected: &ExpectedBody, record: &ResponseRecord) -> Result<(), ContractViolation> {
    match expected {
        ExpectedBody::Text(text) => {
            if record.text == *text {
                Ok(())
            } else {
                Err(ContractViolation::BodyTextMismatch {
                    expected: text.clone(),
                    observed: record.text.clone(),
                })
            }
        }
        ExpectedBody::Fields(fields) => {
            let body = record.body.as_ref().ok_or_else(|| ContractViolation::MissingBody {
                text: record.text.clone(),
            })?;
            for (path, value) in fields {
                let observed = lookup(body, path).cloned().unwrap_or(Value::Null);
                if observed != *value {
                    return Err(ContractViolation::FieldMismatch {
                        path: path.clone(),
                        expected: value.clone(),
                        observed,
                    });
                }
            }
            Ok(())
        }
        ExpectedBody::Sequence => match &record.body {
            Some(Value::Array(_)) => Ok(()),
            _ => Err(ContractViolation::NotASequence {
                observed: record.text.clone(),
            }),
        },
    }
}

/// Resolves a dotted path (`category.name`) inside a JSON body.
fn lookup<'a>(body: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = body;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
