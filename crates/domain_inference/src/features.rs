//! Feature engineering
//!
//! Turns a claim record into named model inputs: the record's own columns,
//! calendar columns derived from the claim date, and two interaction columns
//! built from ordinal codes. Categorical columns are then expanded into
//! drop-first one-hot indicators.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use core_kernel::CalendarFeatures;
use domain_claims::{ClaimRecord, ClaimType, EmploymentStatus};

use crate::encoding::{CategoryEncoding, indicator_name};
use crate::error::PipelineError;
use crate::schema::TrainedSchema;

pub const PATIENT_AGE: &str = "PatientAge";
pub const PATIENT_INCOME: &str = "PatientIncome";
pub const PATIENT_GENDER: &str = "PatientGender";
pub const PATIENT_MARITAL_STATUS: &str = "PatientMaritalStatus";
pub const PATIENT_EMPLOYMENT_STATUS: &str = "PatientEmploymentStatus";
pub const CLAIM_TYPE: &str = "ClaimType";
pub const CLAIM_STATUS: &str = "ClaimStatus";
pub const CLAIM_SUBMISSION_METHOD: &str = "ClaimSubmissionMethod";
pub const PROVIDER_SPECIALTY: &str = "ProviderSpecialty";
pub const PROVIDER_LOCATION: &str = "ProviderLocation";
pub const DIAGNOSIS_CODE: &str = "DiagnosisCode";
pub const PROCEDURE_CODE: &str = "ProcedureCode";

pub const YEAR: &str = "Year";
pub const MONTH: &str = "Month";
pub const DAY_OF_WEEK: &str = "DayOfWeek";
pub const IS_WEEKEND: &str = "is_weekend";
pub const QUARTER: &str = "quarter";
pub const WEEK_OF_YEAR: &str = "weekofyear";

pub const AGE_CLAIM_TYPE: &str = "Age_ClaimType";
pub const INCOME_EMPLOYMENT: &str = "Income_Employment";

/// Value of one engineered source column
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Numeric(f64),
    Category(String),
}

/// Engineered source columns of one claim, before one-hot expansion
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawFeatures {
    columns: BTreeMap<String, FeatureValue>,
}

impl RawFeatures {
    fn numeric(&mut self, name: &str, value: f64) {
        self.columns.insert(name.to_string(), FeatureValue::Numeric(value));
    }

    fn category(&mut self, name: &str, value: &str) {
        self.columns
            .insert(name.to_string(), FeatureValue::Category(value.to_string()));
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.columns.get(name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Derives every source column of a claim
///
/// `date` is the already-parsed claim date. The interaction columns multiply
/// age by the ordinal code of the claim type and income by the ordinal code
/// of the employment status, both taken from `encoding`. A product that
/// overflows is a schema mismatch naming the column.
pub fn engineer(
    record: &ClaimRecord,
    date: NaiveDate,
    encoding: &CategoryEncoding,
) -> Result<RawFeatures, PipelineError> {
    let mut raw = RawFeatures::default();

    raw.numeric(PATIENT_AGE, record.age);
    raw.numeric(PATIENT_INCOME, record.income);
    raw.category(PATIENT_GENDER, record.gender.label());
    raw.category(PATIENT_MARITAL_STATUS, record.marital_status.label());
    raw.category(PATIENT_EMPLOYMENT_STATUS, record.employment_status.label());
    raw.category(CLAIM_TYPE, record.claim_type.label());
    raw.category(CLAIM_STATUS, record.claim_status.label());
    raw.category(CLAIM_SUBMISSION_METHOD, record.submission_method.label());
    raw.category(PROVIDER_SPECIALTY, record.provider_specialty.label());
    raw.category(PROVIDER_LOCATION, &record.provider_location);
    raw.category(DIAGNOSIS_CODE, record.diagnosis_code.as_str());
    raw.category(PROCEDURE_CODE, record.procedure_code.as_str());

    let calendar = CalendarFeatures::from_date(date);
    raw.numeric(YEAR, f64::from(calendar.year));
    raw.numeric(MONTH, f64::from(calendar.month));
    raw.numeric(DAY_OF_WEEK, f64::from(calendar.day_of_week));
    raw.numeric(IS_WEEKEND, if calendar.is_weekend { 1.0 } else { 0.0 });
    raw.numeric(QUARTER, f64::from(calendar.quarter));
    raw.numeric(WEEK_OF_YEAR, f64::from(calendar.week_of_year));

    let claim_type_code = encoding.ordinal(ClaimType::FIELD, record.claim_type.label())?;
    let employment_code =
        encoding.ordinal(EmploymentStatus::FIELD, record.employment_status.label())?;
    let interactions = [
        (AGE_CLAIM_TYPE, record.age * claim_type_code as f64),
        (INCOME_EMPLOYMENT, record.income * employment_code as f64),
    ];
    for (name, value) in interactions {
        if !value.is_finite() {
            return Err(PipelineError::schema(format!("interaction column {name} is not finite")));
        }
        raw.numeric(name, value);
    }

    Ok(raw)
}

/// Ordered, uniquely named feature columns
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureFrame {
    columns: Vec<(String, f64)>,
}

impl FeatureFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column; a repeated name is a schema mismatch
    pub fn push(&mut self, name: impl Into<String>, value: f64) -> Result<(), PipelineError> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(PipelineError::schema(format!("duplicate feature column {name}")));
        }
        self.columns.push((name, value));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| *value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> Vec<f64> {
        self.columns.iter().map(|(_, value)| *value).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Selects `features` and applies drop-first one-hot encoding
///
/// Numeric columns keep their name. An encoded categorical column expands to
/// one indicator per non-reference label. A categorical column without an
/// encoding entry (free text such as the provider location) becomes a single
/// indicator named after its value, which survives alignment only if the
/// model was trained with it.
pub fn expand(
    raw: &RawFeatures,
    features: &[String],
    encoding: &CategoryEncoding,
) -> Result<FeatureFrame, PipelineError> {
    let mut frame = FeatureFrame::new();

    for feature in features {
        let value = raw
            .get(feature)
            .ok_or_else(|| PipelineError::schema(format!("unknown feature column {feature}")))?;

        match value {
            FeatureValue::Numeric(v) => frame.push(feature.as_str(), *v)?,
            FeatureValue::Category(label) => match encoding.labels(feature) {
                Some(labels) => {
                    for candidate in labels.iter().skip(1) {
                        let hot = if candidate == label { 1.0 } else { 0.0 };
                        frame.push(indicator_name(feature, candidate), hot)?;
                    }
                }
                None => frame.push(indicator_name(feature, label), 1.0)?,
            },
        }
    }

    Ok(frame)
}

/// Indicator columns the record activates but the schema does not contain
///
/// Only encoded fields are checked, and the reference category never counts
/// since it has no indicator. A label missing from the encoding table is
/// reported too.
pub fn unseen_indicators(
    raw: &RawFeatures,
    features: &[String],
    encoding: &CategoryEncoding,
    schema: &TrainedSchema,
) -> Vec<String> {
    features
        .iter()
        .filter_map(|feature| match (raw.get(feature), encoding.labels(feature)) {
            (Some(FeatureValue::Category(label)), Some(labels)) => {
                if labels.first() == Some(label) {
                    return None;
                }
                let column = indicator_name(feature, label);
                let known = labels.contains(label) && schema.contains(&column);
                (!known).then_some(column)
            }
            _ => None,
        })
        .collect()
}
