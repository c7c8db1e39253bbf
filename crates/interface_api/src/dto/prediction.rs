//! Prediction DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use domain_claims::{
    ClaimError, ClaimRecord, ClaimStatus, ClaimType, EmploymentStatus, Gender, MaritalStatus,
    MedicalCode, ProviderSpecialty, SubmissionMethod,
};
use domain_inference::PredictionResult;

/// Body of `POST /predict/`
///
/// Categorical fields deserialize straight into their closed enumerations,
/// so an out-of-set value is rejected before validation runs.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct PredictRequest {
    #[serde(rename = "PatientAge")]
    #[validate(range(min = 0.0))]
    pub patient_age: f64,
    #[serde(rename = "PatientIncome")]
    #[validate(range(min = 0.0))]
    pub patient_income: f64,
    #[serde(rename = "PatientGender")]
    pub patient_gender: Gender,
    #[serde(rename = "PatientMaritalStatus")]
    pub patient_marital_status: MaritalStatus,
    #[serde(rename = "ClaimType")]
    pub claim_type: ClaimType,
    #[serde(rename = "PatientEmploymentStatus")]
    pub patient_employment_status: EmploymentStatus,
    #[serde(rename = "ClaimDate")]
    pub claim_date: String,
    #[serde(rename = "DiagnosisCode")]
    #[validate(custom(function = "validate_medical_code"))]
    pub diagnosis_code: String,
    #[serde(rename = "ProcedureCode")]
    #[validate(custom(function = "validate_medical_code"))]
    pub procedure_code: String,
    #[serde(rename = "ProviderSpecialty")]
    pub provider_specialty: ProviderSpecialty,
    #[serde(rename = "ClaimStatus")]
    pub claim_status: ClaimStatus,
    #[serde(rename = "ProviderLocation")]
    pub provider_location: String,
    #[serde(rename = "ClaimSubmissionMethod")]
    pub claim_submission_method: SubmissionMethod,
}

fn validate_medical_code(code: &str) -> Result<(), ValidationError> {
    if MedicalCode::is_valid(code) {
        Ok(())
    } else {
        let mut error = ValidationError::new("medical_code");
        error.message = Some("must be two letters followed by three digits".into());
        Err(error)
    }
}

impl TryFrom<PredictRequest> for ClaimRecord {
    type Error = ClaimError;

    fn try_from(request: PredictRequest) -> Result<Self, Self::Error> {
        let record = ClaimRecord {
            age: request.patient_age,
            income: request.patient_income,
            gender: request.patient_gender,
            marital_status: request.patient_marital_status,
            employment_status: request.patient_employment_status,
            claim_type: request.claim_type,
            claim_status: request.claim_status,
            submission_method: request.claim_submission_method,
            provider_specialty: request.provider_specialty,
            provider_location: request.provider_location,
            procedure_code: MedicalCode::parse("ProcedureCode", &request.procedure_code)?,
            diagnosis_code: MedicalCode::parse("DiagnosisCode", &request.diagnosis_code)?,
            claim_date: request.claim_date,
        };
        record.validate()?;
        Ok(record)
    }
}

/// Body of a successful prediction
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub status: String,
    pub prediction_id: String,
    pub predictions: PredictionResult,
    pub timestamp: DateTime<Utc>,
}

impl PredictResponse {
    pub fn success(prediction_id: impl Into<String>, predictions: PredictionResult) -> Self {
        Self {
            status: "success".to_string(),
            prediction_id: prediction_id.into(),
            predictions,
            timestamp: Utc::now(),
        }
    }
}
