//! Common test utilities for the core integration tests.
//!
//! This module provides shared functionality across the tests:
//! - Test fixtures (progress events, recorded streams, config roots)
//! - Assertions over render items

pub mod assertions;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
