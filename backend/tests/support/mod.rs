//! Shared fixtures for integration tests.

pub mod stub_classify;
