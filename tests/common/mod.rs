//! Shared helpers for the stagehand integration tests
//!
//! Every test works against a real git repository in a temporary directory and a
//! private settings directory, so nothing leaks into the user's configuration.

pub mod assertions;
pub mod fixtures;
pub mod repository;
