//! Claims Domain
//!
//! This crate models the claim record submitted for an amount prediction.
//! Categorical attributes are closed enumerations and medical codes are
//! validated on construction, so a `ClaimRecord` that exists is one the
//! inference pipeline can accept.

pub mod claim;
pub mod code;
pub mod error;

pub use claim::{
    ClaimRecord, ClaimRecordBuilder, Gender, MaritalStatus, EmploymentStatus, ClaimType,
    ClaimStatus, SubmissionMethod, ProviderSpecialty,
};
pub use code::MedicalCode;
pub use error::ClaimError;
