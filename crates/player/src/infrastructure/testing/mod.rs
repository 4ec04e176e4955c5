//! Shared fixtures for unit tests and downstream integration tests.

pub mod fixtures;
