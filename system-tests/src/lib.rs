// system-tests/src/lib.rs
// ============================================================================
// Module: Petverify System Tests Library
// Description: Shared configuration for system test scenarios.
// Purpose: Provide common utilities for the petverify system-test binaries.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration utilities used by the petverify
//! system-test binaries in `system-tests/tests`. Suites run against an
//! in-process petstore stub by default; timeouts honor environment
//! overrides so slow CI environments can stretch them.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
