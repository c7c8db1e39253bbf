//! Core Kernel - Foundational types shared by the claim forecast crates
//!
//! This crate provides the building blocks used across the domain modules:
//! - Claim date parsing and calendar feature derivation
//! - Strongly-typed identifiers
//! - The kernel error type

pub mod temporal;
pub mod identifiers;
pub mod error;

pub use temporal::{CalendarFeatures, TemporalError, parse_claim_date, days_since_epoch};
pub use identifiers::PredictionId;
pub use error::CoreError;
