// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for petverify system-tests.
// Purpose: Re-export stub and harness helpers for suites.
// Dependencies: helpers/*
// ============================================================================
