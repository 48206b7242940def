//! Test modules for the Ad Locator.
//!
//! This module contains the crate-level tests:
//! - Configuration loading and validation
//! - Error types and reporting
//! - Store behavior, including property-based normalization tests
//! - Shared fixtures and strategies

pub mod config_tests;

pub use test_utils::{raw_location_strategy, segment_strategy, TestFixture};
