//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating claim records that satisfy
//! the input validation rules.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use domain_claims::{
    ClaimRecord, ClaimRecordBuilder, ClaimStatus, ClaimType, EmploymentStatus, Gender,
    MaritalStatus, ProviderSpecialty, SubmissionMethod,
};

/// Strategy picking any variant of a closed category
fn category<T: Copy + std::fmt::Debug + 'static>(all: &'static [T]) -> impl Strategy<Value = T> {
    proptest::sample::select(all)
}

/// Strategy for claim dates between 1990 and 2060
pub fn claim_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..25_567).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default() + Duration::days(offset)
    })
}

/// Strategy for medical codes matching the two-letters-three-digits pattern
pub fn medical_code_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z]{2}[0-9]{3}"
}

/// Strategy for valid claim records
pub fn claim_record_strategy() -> impl Strategy<Value = ClaimRecord> {
    (
        (0.0f64..110.0, 0.0f64..500_000.0, claim_date_strategy()),
        (
            category(Gender::ALL),
            category(MaritalStatus::ALL),
            category(EmploymentStatus::ALL),
            category(ClaimType::ALL),
        ),
        (
            category(ClaimStatus::ALL),
            category(SubmissionMethod::ALL),
            category(ProviderSpecialty::ALL),
        ),
        (medical_code_strategy(), medical_code_strategy(), "[A-Za-z ]{1,20}"),
    )
        .prop_map(
            |(
                (age, income, date),
                (gender, marital, employment, claim_type),
                (status, method, specialty),
                (procedure, diagnosis, location),
            )| {
                ClaimRecordBuilder::new()
                    .age(age)
                    .income(income)
                    .claim_date(date.format("%Y-%m-%d").to_string())
                    .gender(gender)
                    .marital_status(marital)
                    .employment_status(employment)
                    .claim_type(claim_type)
                    .claim_status(status)
                    .submission_method(method)
                    .provider_specialty(specialty)
                    .procedure_code(procedure)
                    .diagnosis_code(diagnosis)
                    .provider_location(location)
                    .build()
                    .expect("generated claim is valid")
            },
        )
}
