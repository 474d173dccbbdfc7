// crates/petverify-cli/src/main.rs
// ============================================================================
// Module: Petverify CLI Entry Point
// Description: Runs the petstore contract suite against a configured
//              endpoint.
// Purpose: Resolve configuration, execute the suite, and report outcomes.
// Dependencies: clap, petverify-core, petverify-harness, tokio, toml
// ============================================================================

//! ## Overview
//! The `petverify` binary resolves configuration (flags over environment
//! over optional TOML file over defaults), runs the shipped contract
//! suite sequentially, writes audit artifacts, and exits nonzero when any
//! case failed or errored. Contract violations and harness faults are
//! reported separately in the summary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use petverify_core::petstore_registry;
use petverify_harness::ApiClient;
use petverify_harness::ConfigOverrides;
use petverify_harness::HarnessConfig;
use petverify_harness::JsonAuditSink;
use petverify_harness::SuiteRunner;
use petverify_harness::petstore_suite;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Arguments
// ============================================================================

/// Contract-verification harness for the petstore API.
#[derive(Debug, Parser)]
#[command(name = "petverify", version, about)]
struct Args {
    /// Base endpoint URL of the service under test.
    #[arg(long)]
    base_url: Option<String>,
    /// Request timeout in seconds.
    #[arg(long)]
    timeout_sec: Option<u64>,
    /// Retry budget for transport errors (HTTP statuses are never retried).
    #[arg(long)]
    retries: Option<u32>,
    /// Root directory for audit artifacts.
    #[arg(long)]
    audit_root: Option<PathBuf>,
    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    /// Converts flag values into a config overlay.
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            timeout: self.timeout_sec.map(Duration::from_secs),
            transport_retries: self.retries,
            audit_root: self.audit_root.clone(),
        }
    }
}

// ============================================================================
// SECTION: File Configuration
// ============================================================================

/// TOML configuration file shape.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    /// Base endpoint URL.
    base_url: Option<String>,
    /// Request timeout in seconds.
    timeout_sec: Option<u64>,
    /// Transport-only retry budget.
    transport_retries: Option<u32>,
    /// Audit artifact root.
    audit_root: Option<PathBuf>,
}

impl FileConfig {
    /// Loads the file when a path was given.
    fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|err| CliError::ConfigFile {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        toml::from_str(&text).map_err(|err| CliError::ConfigFile {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }

    /// Converts file values into a config overlay.
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            timeout: self.timeout_sec.map(Duration::from_secs),
            transport_retries: self.transport_retries,
            audit_root: self.audit_root.clone(),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Top-level CLI failure.
#[derive(Debug, Error)]
enum CliError {
    /// The configuration file could not be read or parsed.
    #[error("config file {path}: {message}")]
    ConfigFile {
        /// Offending path.
        path: String,
        /// Failure description.
        message: String,
    },
    /// Configuration resolution failed.
    #[error(transparent)]
    Config(#[from] petverify_harness::ConfigError),
    /// The client adapter could not be constructed.
    #[error(transparent)]
    Transport(#[from] petverify_core::TransportError),
    /// Audit artifacts could not be written.
    #[error("audit artifacts: {0}")]
    Audit(#[from] io::Error),
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Entry point: parse flags, run the suite, map the report to an exit code.
#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let mut stdout = io::stdout().lock();
    match run(&args, &mut stdout).await {
        Ok(all_passed) => {
            if all_passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            let mut stderr = io::stderr().lock();
            let _ = writeln!(stderr, "petverify: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Resolves configuration, runs the suite, and writes the summary.
async fn run(args: &Args, out: &mut impl Write) -> Result<bool, CliError> {
    let file = FileConfig::load(args.config.as_deref())?;
    let config = HarnessConfig::resolve(&[
        file.overrides(),
        ConfigOverrides::from_env()?,
        args.overrides(),
    ])?;

    let client = Arc::new(ApiClient::new(&config)?);
    let sink = Arc::new(JsonAuditSink::new(&config.audit_root)?);
    let recorder: Arc<dyn petverify_harness::StepRecorder> = sink.clone();
    let mut runner = SuiteRunner::new(client, recorder, petstore_registry());
    for family in petstore_suite() {
        runner.register(family);
    }
    let report = runner.run_registered().await;

    sink.flush("steps.json")?;
    sink.write_json("report.json", &report)?;

    writeln!(out, "{}", report.to_markdown())?;
    writeln!(out, "audit artifacts: {}", sink.root().display())?;
    Ok(report.all_passed())
}
