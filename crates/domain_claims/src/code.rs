//! Procedure and diagnosis codes

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::ClaimError;

/// A medical code of the form two ASCII letters followed by three ASCII digits
/// (`AB123`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MedicalCode(String);

impl MedicalCode {
    /// Validates and wraps a code. `field` names the attribute in the error.
    pub fn parse(field: &'static str, value: &str) -> Result<Self, ClaimError> {
        if Self::is_valid(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(ClaimError::InvalidCode {
                field,
                value: value.to_string(),
            })
        }
    }

    /// Checks the `^[A-Za-z]{2}[0-9]{3}$` pattern
    pub fn is_valid(value: &str) -> bool {
        let bytes = value.as_bytes();
        bytes.len() == 5
            && bytes[..2].iter().all(u8::is_ascii_alphabetic)
            && bytes[2..].iter().all(u8::is_ascii_digit)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MedicalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MedicalCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_named("MedicalCode", deserializer)
    }
}

fn deserialize_named<'de, D>(field: &'static str, deserializer: D) -> Result<MedicalCode, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    MedicalCode::parse(field, &s).map_err(serde::de::Error::custom)
}

pub(crate) fn deserialize_procedure_code<'de, D>(deserializer: D) -> Result<MedicalCode, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_named("ProcedureCode", deserializer)
}

pub(crate) fn deserialize_diagnosis_code<'de, D>(deserializer: D) -> Result<MedicalCode, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_named("DiagnosisCode", deserializer)
}
