//! HTTP tests for the prediction API

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::time::Duration;

use domain_inference::{ClaimFeaturePipeline, ModelBundle};
use interface_api::{config::ApiConfig, create_router};
use test_utils::*;

fn server_with(bundle: ModelBundle, config: ApiConfig) -> TestServer {
    TestServer::new(create_router(ClaimFeaturePipeline::new(bundle), config))
        .expect("test server starts")
}

fn fixture_server() -> TestServer {
    server_with(ModelFixtures::bundle(), ApiConfig::default())
}

fn reference_body() -> Value {
    serde_json::to_value(ClaimFixtures::reference_claim()).expect("claim serializes")
}

fn body_with(field: &str, value: Value) -> Value {
    let mut body = reference_body();
    body[field] = value;
    body
}

fn failing_bundle() -> ModelBundle {
    TestBundleBuilder::new()
        .regressor(FailingRegressor {
            n_features: ModelFixtures::train_columns().len(),
        })
        .build()
}

// ============================================================================
// Prediction
// ============================================================================

mod predict {
    use super::*;

    #[tokio::test]
    async fn test_reference_claim_succeeds() {
        let server = fixture_server();

        let response = server.post("/predict/").json(&reference_body()).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "success");
        assert!(body["prediction_id"].as_str().unwrap().starts_with("PRD-"));

        let predictions = &body["predictions"];
        assert_close(predictions["prophet"].as_f64().unwrap(), 5_897.155_835_623_591, 1e-6);
        assert_close(predictions["residual"].as_f64().unwrap(), 21.535_485_670_660_066, 1e-6);
        assert_close(predictions["final"].as_f64().unwrap(), 5_918.691_321_294_251, 1e-6);
    }

    #[tokio::test]
    async fn test_route_without_trailing_slash() {
        let server = fixture_server();

        let response = server.post("/predict").json(&reference_body()).await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_each_prediction_gets_its_own_id() {
        let server = fixture_server();

        let first: Value = server.post("/predict/").json(&reference_body()).await.json();
        let second: Value = server.post("/predict/").json(&reference_body()).await.json();

        assert_ne!(first["prediction_id"], second["prediction_id"]);
        assert_eq!(first["predictions"], second["predictions"]);
    }

    #[tokio::test]
    async fn test_final_is_sum_of_parts_with_fake_models() {
        let bundle = TestBundleBuilder::new()
            .forecaster(ConstantForecaster(1_000.0))
            .regressor(ConstantRegressor::new(ModelFixtures::train_columns().len(), -25.5))
            .build();
        let server = server_with(bundle, ApiConfig::default());

        let body: Value = server.post("/predict/").json(&reference_body()).await.json();

        assert_eq!(body["predictions"]["prophet"], json!(1_000.0));
        assert_eq!(body["predictions"]["residual"], json!(-25.5));
        assert_eq!(body["predictions"]["final"], json!(974.5));
    }
}

// ============================================================================
// Request validation
// ============================================================================

mod validation {
    use super::*;

    async fn assert_rejected(body: Value) {
        let response = fixture_server().post("/predict/").json(&body).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let error: Value = response.json();
        assert_eq!(error["status"], "error");
        assert_eq!(error["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_negative_age_rejected() {
        assert_rejected(body_with("PatientAge", json!(-1.0))).await;
    }

    #[tokio::test]
    async fn test_negative_income_rejected() {
        assert_rejected(body_with("PatientIncome", json!(-0.01))).await;
    }

    #[tokio::test]
    async fn test_malformed_diagnosis_code_rejected() {
        assert_rejected(body_with("DiagnosisCode", json!("A1234"))).await;
    }

    #[tokio::test]
    async fn test_malformed_procedure_code_rejected() {
        assert_rejected(body_with("ProcedureCode", json!("XY45"))).await;
    }

    #[tokio::test]
    async fn test_unknown_claim_type_rejected() {
        assert_rejected(body_with("ClaimType", json!("Dental"))).await;
    }

    #[tokio::test]
    async fn test_unknown_gender_rejected() {
        assert_rejected(body_with("PatientGender", json!("X"))).await;
    }

    #[tokio::test]
    async fn test_missing_field_rejected() {
        let mut body = reference_body();
        body.as_object_mut().unwrap().remove("ClaimDate");

        assert_rejected(body).await;
    }

    #[tokio::test]
    async fn test_string_age_rejected() {
        assert_rejected(body_with("PatientAge", json!("forty"))).await;
    }
}

// ============================================================================
// Pipeline failures
// ============================================================================

mod failures {
    use super::*;

    #[tokio::test]
    async fn test_invalid_date_is_bad_request() {
        let response = fixture_server()
            .post("/predict/")
            .json(&body_with("ClaimDate", json!("2024-13-45")))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert_eq!(error["error"], "invalid_date");
        assert!(error["message"].as_str().unwrap().contains("2024-13-45"));
    }

    #[tokio::test]
    async fn test_inference_failure_hides_detail_by_default() {
        let server = server_with(failing_bundle(), ApiConfig::default());

        let response = server.post("/predict/").json(&reference_body()).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let error: Value = response.json();
        assert_eq!(error["error"], "inference_failure");
        assert_eq!(error["message"], "Inference failure: Prediction failed");
    }

    #[tokio::test]
    async fn test_inference_failure_detail_when_exposed() {
        let config = ApiConfig {
            expose_error_details: true,
            ..ApiConfig::default()
        };
        let server = server_with(failing_bundle(), config);

        let response = server.post("/predict/").json(&reference_body()).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let error: Value = response.json();
        assert!(error["message"].as_str().unwrap().contains("residual model"));
    }

    #[tokio::test]
    async fn test_forecaster_failure_is_server_error() {
        let bundle = TestBundleBuilder::new().forecaster(FailingForecaster).build();
        let server = server_with(bundle, ApiConfig::default());

        let response = server.post("/predict/").json(&reference_body()).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unseen_location_is_zero_filled() {
        let response = fixture_server()
            .post("/predict/")
            .json(&body_with("ProviderLocation", json!("Atlantis")))
            .await;

        // Free-text locations are zero-filled, never rejected
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_slow_prediction_times_out() {
        let bundle = TestBundleBuilder::new()
            .forecaster(SlowForecaster {
                delay: Duration::from_millis(500),
                baseline: 1_000.0,
            })
            .build();
        let config = ApiConfig {
            predict_timeout_ms: Some(20),
            ..ApiConfig::default()
        };
        let server = server_with(bundle, config);

        let response = server.post("/predict/").json(&reference_body()).await;

        response.assert_status(StatusCode::GATEWAY_TIMEOUT);
        let error: Value = response.json();
        assert_eq!(error["error"], "timeout");
    }

    #[tokio::test]
    async fn test_generous_timeout_succeeds() {
        let config = ApiConfig {
            predict_timeout_ms: Some(10_000),
            ..ApiConfig::default()
        };
        let server = server_with(ModelFixtures::bundle(), config);

        let response = server.post("/predict/").json(&reference_body()).await;

        response.assert_status_ok();
    }
}

// ============================================================================
// Health
// ============================================================================

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let response = fixture_server().get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_reports_models() {
        let response = fixture_server().get("/health/ready").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ready");
        assert_eq!(body["features"], json!(ModelFixtures::features().len()));
        assert_eq!(body["train_columns"], json!(28));
        assert_eq!(body["encoding_version"], "sorted-labels-v1");
    }
}
