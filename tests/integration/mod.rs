//! Integration tests for the alert rule lookup
//!
//! These tests drive the HTTP API against a mock source, and the resolver
//! against a mock ThousandEyes API.

mod api_tests;
