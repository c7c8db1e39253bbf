//! Claim record submitted for prediction

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::code::{MedicalCode, deserialize_diagnosis_code, deserialize_procedure_code};
use crate::error::ClaimError;

macro_rules! define_category {
    (
        $(#[$meta:meta])*
        $name:ident, $field:tt {
            $($variant:ident => $label:tt),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Column name of this attribute in the training data
            pub const FIELD: &'static str = $field;

            /// The wire literal of this category
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = ClaimError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    _ => Err(ClaimError::UnknownCategory {
                        field: $field,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

define_category!(
    /// Patient gender
    Gender, "PatientGender" {
        Male => "M",
        Female => "F",
    }
);

define_category!(
    /// Patient marital status
    MaritalStatus, "PatientMaritalStatus" {
        Married => "Married",
        Single => "Single",
        Divorced => "Divorced",
        Widowed => "Widowed",
    }
);

define_category!(
    /// Patient employment status
    EmploymentStatus, "PatientEmploymentStatus" {
        Retired => "Retired",
        Student => "Student",
        Employed => "Employed",
        Unemployed => "Unemployed",
    }
);

define_category!(
    /// Kind of care the claim covers
    ClaimType, "ClaimType" {
        Routine => "Routine",
        Emergency => "Emergency",
        Inpatient => "Inpatient",
        Outpatient => "Outpatient",
    }
);

define_category!(
    /// Processing status of the claim at submission
    ClaimStatus, "ClaimStatus" {
        Pending => "Pending",
        Approved => "Approved",
        Denied => "Denied",
    }
);

define_category!(
    /// Channel the claim was submitted through
    SubmissionMethod, "ClaimSubmissionMethod" {
        Paper => "Paper",
        Online => "Online",
        Phone => "Phone",
    }
);

define_category!(
    /// Specialty of the treating provider
    ProviderSpecialty, "ProviderSpecialty" {
        Cardiology => "Cardiology",
        Pediatrics => "Pediatrics",
        Neurology => "Neurology",
        GeneralPractice => "General Practice",
        Orthopedics => "Orthopedics",
    }
);

/// A claim submitted for amount prediction
///
/// Field names on the wire are the column names of the training data.
/// The claim date is kept as received; parsing it is the pipeline's first
/// step so that a malformed date surfaces as a typed pipeline failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    #[serde(rename = "PatientAge")]
    pub age: f64,
    #[serde(rename = "PatientIncome")]
    pub income: f64,
    #[serde(rename = "PatientGender")]
    pub gender: Gender,
    #[serde(rename = "PatientMaritalStatus")]
    pub marital_status: MaritalStatus,
    #[serde(rename = "PatientEmploymentStatus")]
    pub employment_status: EmploymentStatus,
    #[serde(rename = "ClaimType")]
    pub claim_type: ClaimType,
    #[serde(rename = "ClaimStatus")]
    pub claim_status: ClaimStatus,
    #[serde(rename = "ClaimSubmissionMethod")]
    pub submission_method: SubmissionMethod,
    #[serde(rename = "ProviderSpecialty")]
    pub provider_specialty: ProviderSpecialty,
    #[serde(rename = "ProviderLocation")]
    pub provider_location: String,
    #[serde(rename = "ProcedureCode", deserialize_with = "deserialize_procedure_code")]
    pub procedure_code: MedicalCode,
    #[serde(rename = "DiagnosisCode", deserialize_with = "deserialize_diagnosis_code")]
    pub diagnosis_code: MedicalCode,
    #[serde(rename = "ClaimDate")]
    pub claim_date: String,
}

impl ClaimRecord {
    /// Checks the numeric attributes
    ///
    /// Categorical attributes and codes are already valid by construction.
    pub fn validate(&self) -> Result<(), ClaimError> {
        check_non_negative("PatientAge", self.age)?;
        check_non_negative("PatientIncome", self.income)?;
        Ok(())
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ClaimError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ClaimError::InvalidNumeric { field, value })
    }
}

/// Builder for claim records
///
/// Starts from the defaults the claim entry form pre-fills.
#[derive(Debug, Clone)]
pub struct ClaimRecordBuilder {
    age: f64,
    income: f64,
    gender: Gender,
    marital_status: MaritalStatus,
    employment_status: EmploymentStatus,
    claim_type: ClaimType,
    claim_status: ClaimStatus,
    submission_method: SubmissionMethod,
    provider_specialty: ProviderSpecialty,
    provider_location: String,
    procedure_code: String,
    diagnosis_code: String,
    claim_date: String,
}

impl ClaimRecordBuilder {
    /// Creates a builder with the form defaults and today's date
    ///
    /// Each selection defaults to its first option on the form.
    pub fn new() -> Self {
        Self {
            age: 40.0,
            income: 50_000.0,
            gender: Gender::Male,
            marital_status: MaritalStatus::Married,
            employment_status: EmploymentStatus::Retired,
            claim_type: ClaimType::Routine,
            claim_status: ClaimStatus::Pending,
            submission_method: SubmissionMethod::Paper,
            provider_specialty: ProviderSpecialty::Cardiology,
            provider_location: "New York".to_string(),
            procedure_code: "Hc219".to_string(),
            diagnosis_code: "Hc219".to_string(),
            claim_date: Utc::now().date_naive().format("%Y-%m-%d").to_string(),
        }
    }

    pub fn age(mut self, age: f64) -> Self {
        self.age = age;
        self
    }

    pub fn income(mut self, income: f64) -> Self {
        self.income = income;
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn marital_status(mut self, status: MaritalStatus) -> Self {
        self.marital_status = status;
        self
    }

    pub fn employment_status(mut self, status: EmploymentStatus) -> Self {
        self.employment_status = status;
        self
    }

    pub fn claim_type(mut self, claim_type: ClaimType) -> Self {
        self.claim_type = claim_type;
        self
    }

    pub fn claim_status(mut self, status: ClaimStatus) -> Self {
        self.claim_status = status;
        self
    }

    pub fn submission_method(mut self, method: SubmissionMethod) -> Self {
        self.submission_method = method;
        self
    }

    pub fn provider_specialty(mut self, specialty: ProviderSpecialty) -> Self {
        self.provider_specialty = specialty;
        self
    }

    pub fn provider_location(mut self, location: impl Into<String>) -> Self {
        self.provider_location = location.into();
        self
    }

    pub fn procedure_code(mut self, code: impl Into<String>) -> Self {
        self.procedure_code = code.into();
        self
    }

    pub fn diagnosis_code(mut self, code: impl Into<String>) -> Self {
        self.diagnosis_code = code.into();
        self
    }

    /// Sets the claim date as received (not parsed here)
    pub fn claim_date(mut self, date: impl Into<String>) -> Self {
        self.claim_date = date.into();
        self
    }

    /// Builds the record, validating codes and numeric attributes
    pub fn build(self) -> Result<ClaimRecord, ClaimError> {
        let record = ClaimRecord {
            age: self.age,
            income: self.income,
            gender: self.gender,
            marital_status: self.marital_status,
            employment_status: self.employment_status,
            claim_type: self.claim_type,
            claim_status: self.claim_status,
            submission_method: self.submission_method,
            provider_specialty: self.provider_specialty,
            provider_location: self.provider_location,
            procedure_code: MedicalCode::parse("ProcedureCode", &self.procedure_code)?,
            diagnosis_code: MedicalCode::parse("DiagnosisCode", &self.diagnosis_code)?,
            claim_date: self.claim_date,
        };
        record.validate()?;
        Ok(record)
    }
}

impl Default for ClaimRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}
