//! Common test utilities and helpers
//!
//! Shared fixtures for driving the `xdock` binary against a local catalog.

pub mod test_fixtures;
