//! Integration tests for the credential and session-token flow.

mod bearer_test;
mod helpers;
mod session_test;
