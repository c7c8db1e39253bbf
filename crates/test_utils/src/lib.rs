//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claim forecast test suite.
//!
//! # Modules
//!
//! - `fixtures`: Reference claims, training metadata and fitted models
//! - `fakes`: Stand-in models with fixed or failing behaviour
//! - `builders`: Builder for model bundles with selective overrides
//! - `assertions`: Assertion helpers for predictions and feature frames
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod fakes;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use fakes::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
