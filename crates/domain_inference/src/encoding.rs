//! Category encoding table
//!
//! The ordinal code of a category is its position in the field's label list,
//! and position 0 is the reference category that drop-first one-hot encoding
//! omits. The table is persisted with the model metadata and carries a
//! version, so the codes used at serving time are the ones fixed at training
//! time rather than derived from whatever values a request happens to hold.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use domain_claims::{
    ClaimStatus, ClaimType, EmploymentStatus, Gender, MaritalStatus, ProviderSpecialty,
    SubmissionMethod,
};

use crate::error::PipelineError;

/// Version tag of the table produced by [`CategoryEncoding::sorted_labels`]
pub const SORTED_LABELS_VERSION: &str = "sorted-labels-v1";

/// What to do with a category whose indicator column the model never saw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnseenCategoryPolicy {
    /// Fail with `SchemaMismatch`
    #[default]
    Reject,
    /// Leave every indicator of the field at zero, as if the reference
    /// category had been given
    ZeroFill,
}

/// Versioned category-to-ordinal table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEncoding {
    pub version: String,
    pub fields: BTreeMap<String, Vec<String>>,
}

impl CategoryEncoding {
    pub fn new(version: impl Into<String>, fields: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            version: version.into(),
            fields,
        }
    }

    /// Table for every closed categorical attribute, labels in ascending
    /// byte order
    ///
    /// This is the order a sorted categorical encoder assigns:
    ///
    /// | field | codes |
    /// |-------|-------|
    /// | ClaimType | Emergency 0, Inpatient 1, Outpatient 2, Routine 3 |
    /// | PatientEmploymentStatus | Employed 0, Retired 1, Student 2, Unemployed 3 |
    /// | PatientGender | F 0, M 1 |
    /// | PatientMaritalStatus | Divorced 0, Married 1, Single 2, Widowed 3 |
    /// | ClaimStatus | Approved 0, Denied 1, Pending 2 |
    /// | ClaimSubmissionMethod | Online 0, Paper 1, Phone 2 |
    /// | ProviderSpecialty | Cardiology 0, General Practice 1, Neurology 2, Orthopedics 3, Pediatrics 4 |
    pub fn sorted_labels() -> Self {
        fn sorted(labels: impl Iterator<Item = &'static str>) -> Vec<String> {
            let mut labels: Vec<String> = labels.map(str::to_string).collect();
            labels.sort();
            labels
        }

        let mut fields = BTreeMap::new();
        fields.insert(Gender::FIELD.to_string(), sorted(Gender::ALL.iter().map(|c| c.label())));
        fields.insert(
            MaritalStatus::FIELD.to_string(),
            sorted(MaritalStatus::ALL.iter().map(|c| c.label())),
        );
        fields.insert(
            EmploymentStatus::FIELD.to_string(),
            sorted(EmploymentStatus::ALL.iter().map(|c| c.label())),
        );
        fields.insert(ClaimType::FIELD.to_string(), sorted(ClaimType::ALL.iter().map(|c| c.label())));
        fields.insert(
            ClaimStatus::FIELD.to_string(),
            sorted(ClaimStatus::ALL.iter().map(|c| c.label())),
        );
        fields.insert(
            SubmissionMethod::FIELD.to_string(),
            sorted(SubmissionMethod::ALL.iter().map(|c| c.label())),
        );
        fields.insert(
            ProviderSpecialty::FIELD.to_string(),
            sorted(ProviderSpecialty::ALL.iter().map(|c| c.label())),
        );

        Self::new(SORTED_LABELS_VERSION, fields)
    }

    /// Labels of a field in code order, if the field is encoded
    pub fn labels(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Ordinal code of `label` within `field`
    pub fn ordinal(&self, field: &str, label: &str) -> Result<usize, PipelineError> {
        let labels = self.labels(field).ok_or_else(|| {
            PipelineError::schema(format!(
                "encoding {} has no entry for field {field}",
                self.version
            ))
        })?;

        labels.iter().position(|l| l == label).ok_or_else(|| {
            PipelineError::schema(format!(
                "encoding {} has no code for {field}={label}",
                self.version
            ))
        })
    }

    /// Indicator columns a field expands to under drop-first encoding
    pub fn indicator_columns(&self, field: &str) -> Option<Vec<String>> {
        self.labels(field).map(|labels| {
            labels
                .iter()
                .skip(1)
                .map(|label| indicator_name(field, label))
                .collect()
        })
    }
}

impl Default for CategoryEncoding {
    fn default() -> Self {
        Self::sorted_labels()
    }
}

/// Column name of the one-hot indicator for `field = label`
pub fn indicator_name(field: &str, label: &str) -> String {
    format!("{field}_{label}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_labels_codes() {
        let encoding = CategoryEncoding::sorted_labels();

        assert_eq!(encoding.ordinal("ClaimType", "Emergency").unwrap(), 0);
        assert_eq!(encoding.ordinal("ClaimType", "Routine").unwrap(), 3);
        assert_eq!(encoding.ordinal("PatientEmploymentStatus", "Employed").unwrap(), 0);
        assert_eq!(encoding.ordinal("PatientEmploymentStatus", "Unemployed").unwrap(), 3);
        assert_eq!(encoding.ordinal("PatientGender", "F").unwrap(), 0);
        assert_eq!(encoding.ordinal("ProviderSpecialty", "General Practice").unwrap(), 1);
        assert_eq!(encoding.version, SORTED_LABELS_VERSION);
    }

    #[test]
    fn test_unknown_field_or_label_is_schema_mismatch() {
        let encoding = CategoryEncoding::sorted_labels();

        assert!(matches!(
            encoding.ordinal("ProviderLocation", "Boston"),
            Err(PipelineError::SchemaMismatch(_))
        ));
        assert!(matches!(
            encoding.ordinal("ClaimType", "Dental"),
            Err(PipelineError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_indicator_columns_drop_reference_category() {
        let encoding = CategoryEncoding::sorted_labels();
        let columns = encoding.indicator_columns("ClaimSubmissionMethod").unwrap();

        assert_eq!(columns, vec!["ClaimSubmissionMethod_Paper", "ClaimSubmissionMethod_Phone"]);
        assert!(encoding.indicator_columns("ProviderLocation").is_none());
    }

    #[test]
    fn test_policy_serializes_snake_case() {
        let json = serde_json::to_string(&UnseenCategoryPolicy::ZeroFill).unwrap();
        assert_eq!(json, "\"zero_fill\"");
        assert_eq!(UnseenCategoryPolicy::default(), UnseenCategoryPolicy::Reject);
    }
}
