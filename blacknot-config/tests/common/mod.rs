//! Test infrastructure for the config parser
//!
//! Provides fixture loading, stochastic document generation, and a
//! recording sink with assertion helpers.

#![allow(dead_code, unused_imports)]

mod generators;
mod harness;

pub use generators::{escape, Gen};
pub use harness::{collect, run_test, run_with_variations, Recorded, E};
pub use loader::{load_fixtures_by_name, ExpectedError, ExpectedEvent, TestCase};
