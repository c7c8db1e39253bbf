//! Tests for feature engineering, one-hot expansion and alignment

use chrono::NaiveDate;
use proptest::prelude::*;

use domain_claims::{ClaimType, EmploymentStatus, ClaimRecordBuilder, Gender, ProviderSpecialty};
use domain_inference::features::*;
use domain_inference::{CategoryEncoding, FeatureFrame, FeatureValue, PipelineError, TrainedSchema, align};
use test_utils::{ClaimFixtures, ModelFixtures, assert_column, assert_frame_matches_schema};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn frame(columns: &[(&str, f64)]) -> FeatureFrame {
    let mut frame = FeatureFrame::new();
    for (name, value) in columns {
        frame.push(*name, *value).unwrap();
    }
    frame
}

fn schema(columns: &[&str]) -> TrainedSchema {
    TrainedSchema::new(columns.iter().map(|c| c.to_string()).collect()).unwrap()
}

// ============================================================================
// Engineering Tests
// ============================================================================

mod engineering {
    use super::*;

    #[test]
    fn test_calendar_columns_for_saturday() {
        let record = ClaimFixtures::weekend_emergency_claim();
        let raw = engineer(&record, date(2024, 3, 2), &CategoryEncoding::sorted_labels()).unwrap();

        assert_eq!(raw.get(YEAR), Some(&FeatureValue::Numeric(2024.0)));
        assert_eq!(raw.get(MONTH), Some(&FeatureValue::Numeric(3.0)));
        assert_eq!(raw.get(DAY_OF_WEEK), Some(&FeatureValue::Numeric(5.0)));
        assert_eq!(raw.get(IS_WEEKEND), Some(&FeatureValue::Numeric(1.0)));
        assert_eq!(raw.get(QUARTER), Some(&FeatureValue::Numeric(1.0)));
        assert_eq!(raw.get(WEEK_OF_YEAR), Some(&FeatureValue::Numeric(9.0)));
    }

    #[test]
    fn test_interaction_columns_use_sorted_label_codes() {
        // Routine = 3, Employed = 0
        let record = ClaimFixtures::reference_claim();
        let raw = engineer(&record, date(2024, 1, 15), &CategoryEncoding::sorted_labels()).unwrap();

        assert_eq!(raw.get(AGE_CLAIM_TYPE), Some(&FeatureValue::Numeric(120.0)));
        assert_eq!(raw.get(INCOME_EMPLOYMENT), Some(&FeatureValue::Numeric(0.0)));
    }

    #[test]
    fn test_interaction_columns_follow_encoding_table() {
        let record = ClaimRecordBuilder::new()
            .age(50.0)
            .income(1_000.0)
            .claim_type(ClaimType::Outpatient)
            .employment_status(EmploymentStatus::Student)
            .build()
            .unwrap();
        let raw = engineer(&record, date(2024, 1, 15), &CategoryEncoding::sorted_labels()).unwrap();

        // Outpatient = 2, Student = 2
        assert_eq!(raw.get(AGE_CLAIM_TYPE), Some(&FeatureValue::Numeric(100.0)));
        assert_eq!(raw.get(INCOME_EMPLOYMENT), Some(&FeatureValue::Numeric(2_000.0)));
    }

    #[test]
    fn test_overflowing_interaction_is_schema_mismatch() {
        // Routine = 3, so the product exceeds f64::MAX
        let record = ClaimRecordBuilder::new()
            .age(1e308)
            .claim_type(ClaimType::Routine)
            .build()
            .unwrap();
        let result = engineer(&record, date(2024, 1, 15), &CategoryEncoding::sorted_labels());

        assert!(matches!(
            result,
            Err(PipelineError::SchemaMismatch(msg)) if msg.contains(AGE_CLAIM_TYPE)
        ));
    }

    #[test]
    fn test_missing_encoding_entry_is_schema_mismatch() {
        let mut encoding = CategoryEncoding::sorted_labels();
        encoding.fields.remove("ClaimType");

        let result = engineer(&ClaimFixtures::reference_claim(), date(2024, 1, 15), &encoding);
        assert!(matches!(result, Err(PipelineError::SchemaMismatch(_))));
    }

    #[test]
    fn test_record_columns_carry_wire_labels() {
        let record = ClaimRecordBuilder::new()
            .gender(Gender::Female)
            .provider_specialty(ProviderSpecialty::GeneralPractice)
            .provider_location("Boston")
            .build()
            .unwrap();
        let raw = engineer(&record, date(2024, 1, 15), &CategoryEncoding::sorted_labels()).unwrap();

        assert_eq!(raw.get(PATIENT_GENDER), Some(&FeatureValue::Category("F".into())));
        assert_eq!(
            raw.get(PROVIDER_SPECIALTY),
            Some(&FeatureValue::Category("General Practice".into()))
        );
        assert_eq!(raw.get(PROVIDER_LOCATION), Some(&FeatureValue::Category("Boston".into())));
        assert_eq!(raw.get(PROCEDURE_CODE), Some(&FeatureValue::Category("Hc219".into())));
        assert!(raw.get("ClaimDate").is_none());
    }
}

// ============================================================================
// Expansion Tests
// ============================================================================

mod expansion {
    use super::*;

    fn expanded(features: &[&str]) -> Result<FeatureFrame, PipelineError> {
        let encoding = CategoryEncoding::sorted_labels();
        let raw = engineer(&ClaimFixtures::reference_claim(), date(2024, 1, 15), &encoding)?;
        let features: Vec<String> = features.iter().map(|f| f.to_string()).collect();
        expand(&raw, &features, &encoding)
    }

    #[test]
    fn test_drop_first_one_hot() {
        let frame = expanded(&[CLAIM_TYPE]).unwrap();
        let names: Vec<&str> = frame.names().collect();

        assert_eq!(names, vec!["ClaimType_Inpatient", "ClaimType_Outpatient", "ClaimType_Routine"]);
        assert_column(&frame, "ClaimType_Routine", 1.0);
        assert_column(&frame, "ClaimType_Inpatient", 0.0);
    }

    #[test]
    fn test_reference_category_is_all_zero() {
        // Employed is the reference category of PatientEmploymentStatus
        let frame = expanded(&[PATIENT_EMPLOYMENT_STATUS]).unwrap();

        assert_eq!(frame.len(), 3);
        assert!(frame.values().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_numeric_columns_pass_through() {
        let frame = expanded(&[PATIENT_AGE, PATIENT_INCOME]).unwrap();
        assert_eq!(frame.values(), vec![40.0, 50_000.0]);
    }

    #[test]
    fn test_free_text_becomes_value_indicator() {
        let frame = expanded(&[PROVIDER_LOCATION]).unwrap();
        assert_column(&frame, "ProviderLocation_New York", 1.0);
        assert_eq!(frame.len(), 1);
    }

    #[test]
    fn test_only_selected_features_are_expanded() {
        let frame = expanded(&[PATIENT_AGE]).unwrap();
        assert_eq!(frame.len(), 1);
        assert!(frame.get(YEAR).is_none());
    }

    #[test]
    fn test_unknown_feature_is_schema_mismatch() {
        assert!(matches!(
            expanded(&[PATIENT_AGE, "PatientHeight"]),
            Err(PipelineError::SchemaMismatch(msg)) if msg.contains("PatientHeight")
        ));
    }

    #[test]
    fn test_repeated_feature_is_schema_mismatch() {
        assert!(matches!(
            expanded(&[PATIENT_AGE, PATIENT_AGE]),
            Err(PipelineError::SchemaMismatch(_))
        ));
    }
}

// ============================================================================
// Alignment Tests
// ============================================================================

mod alignment {
    use super::*;

    #[test]
    fn test_reorders_to_schema() {
        let input = frame(&[("b", 2.0), ("a", 1.0)]);
        let aligned = align(&input, &schema(&["a", "b"]));

        assert_eq!(aligned.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(aligned.values(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_missing_columns_are_zero_filled() {
        let input = frame(&[("a", 1.0)]);
        let aligned = align(&input, &schema(&["a", "ClaimType_Inpatient", "c"]));

        assert_eq!(aligned.values(), vec![1.0, 0.0, 0.0]);
        assert_column(&aligned, "ClaimType_Inpatient", 0.0);
    }

    #[test]
    fn test_extra_columns_are_dropped() {
        let input = frame(&[("a", 1.0), ("ProviderLocation_Boston", 1.0)]);
        let aligned = align(&input, &schema(&["a"]));

        assert_eq!(aligned.len(), 1);
        assert!(aligned.get("ProviderLocation_Boston").is_none());
    }

    #[test]
    fn test_empty_frame_aligns_to_all_zero() {
        let aligned = align(&FeatureFrame::new(), &schema(&["x", "y"]));
        assert_eq!(aligned.values(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_full_fixture_pipeline_matches_schema() {
        let encoding = CategoryEncoding::sorted_labels();
        let raw = engineer(&ClaimFixtures::reference_claim(), date(2024, 1, 15), &encoding).unwrap();
        let expanded = expand(&raw, &ModelFixtures::features(), &encoding).unwrap();
        let trained = TrainedSchema::new(ModelFixtures::train_columns()).unwrap();

        let aligned = align(&expanded, &trained);

        assert_eq!(trained.len(), 28);
        assert_frame_matches_schema(&aligned, &trained);
        assert_column(&aligned, "PatientGender_M", 1.0);
        assert_column(&aligned, "PatientMaritalStatus_Married", 1.0);
        assert_column(&aligned, "ClaimStatus_Pending", 1.0);
        assert_column(&aligned, "ProviderSpecialty_Neurology", 0.0);
    }
}

// ============================================================================
// Properties
// ============================================================================

fn arbitrary_frame() -> impl Strategy<Value = FeatureFrame> {
    proptest::collection::btree_map("[a-e]{1,2}", -1e6f64..1e6, 0..12)
        .prop_map(|columns| {
            let mut frame = FeatureFrame::new();
            for (name, value) in columns {
                frame.push(name, value).unwrap();
            }
            frame
        })
}

fn arbitrary_schema() -> impl Strategy<Value = TrainedSchema> {
    proptest::collection::btree_set("[a-e]{1,2}", 1..12)
        .prop_map(|columns| TrainedSchema::new(columns.into_iter().collect()).unwrap())
}

proptest! {
    #[test]
    fn prop_aligned_length_equals_schema_length(frame in arbitrary_frame(), schema in arbitrary_schema()) {
        let aligned = align(&frame, &schema);
        prop_assert_eq!(aligned.len(), schema.len());
    }

    #[test]
    fn prop_align_is_idempotent(frame in arbitrary_frame(), schema in arbitrary_schema()) {
        let once = align(&frame, &schema);
        let twice = align(&once, &schema);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_absent_columns_are_exactly_zero(frame in arbitrary_frame(), schema in arbitrary_schema()) {
        let aligned = align(&frame, &schema);
        for (name, value) in aligned.iter() {
            match frame.get(name) {
                Some(original) => {
                    prop_assert_eq!(value, original);
                }
                None => {
                    prop_assert_eq!(value, 0.0);
                }
            }
        }
    }

    #[test]
    fn prop_fixture_expansion_always_aligns(record in test_utils::claim_record_strategy()) {
        let encoding = CategoryEncoding::sorted_labels();
        let date = core_kernel::parse_claim_date(&record.claim_date).unwrap();
        let raw = engineer(&record, date, &encoding).unwrap();
        let expanded = expand(&raw, &ModelFixtures::features(), &encoding).unwrap();
        let trained = TrainedSchema::new(ModelFixtures::train_columns()).unwrap();

        // every closed-category indicator is a trained column
        prop_assert_eq!(expanded.len(), trained.len());
        prop_assert_eq!(align(&expanded, &trained).len(), trained.len());
    }
}
