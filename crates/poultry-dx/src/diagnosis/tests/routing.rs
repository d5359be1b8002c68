use super::common::*;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::diagnosis::domain::EvidenceInput;
use crate::diagnosis::extractor::SpecimenImages;
use crate::diagnosis::router::{evidence_handler, specimen_handler};
use crate::diagnosis::DiagnosisResponse;

#[tokio::test]
async fn evidence_handler_returns_ranked_report() {
    let service = fixed_service(EvidenceInput::at_age(10.0));

    let response = evidence_handler(State(service), axum::Json(bloody_evidence())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let report = &payload["report"];
    assert_eq!(report["result"]["top_disease"]["disease_id"], json!("coccidiosis"));
    assert_eq!(report["result"]["top_disease"]["probability"], json!(95));
    assert_eq!(
        report["result"]["alternatives"]
            .as_array()
            .map(Vec::len),
        Some(3)
    );
    assert!(payload.get("generated_at").is_some());
}

#[tokio::test]
async fn evidence_handler_rejects_negative_age() {
    let service = fixed_service(EvidenceInput::at_age(10.0));

    let response =
        evidence_handler(State(service), axum::Json(EvidenceInput::at_age(-1.0))).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("age_weeks"));
}

#[tokio::test]
async fn evidence_handler_reports_configuration_failures() {
    let response = evidence_handler(State(empty_service()), axum::Json(bloody_evidence())).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn specimen_handler_maps_missing_images_to_unprocessable() {
    let response = specimen_handler(
        State(simulated_service()),
        axum::Json(SpecimenImages::default()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], Value::from("missing chicken image"));
}

#[tokio::test]
async fn specimen_handler_maps_unavailable_extractor_to_service_unavailable() {
    let response = specimen_handler(State(offline_service()), axum::Json(specimens())).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn specimen_route_is_repeatable_for_the_same_upload() {
    let mut reports = Vec::new();
    for _ in 0..2 {
        let response = simulated_router()
            .oneshot(
                axum::http::Request::post("/api/v1/diagnoses/specimens")
                    .header(axum::http::header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(
                        serde_json::to_vec(&specimens()).unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);

        let payload = read_json_body(response).await;
        let body: DiagnosisResponse = serde_json::from_value(payload).expect("typed response");
        reports.push(body.report);
    }

    assert_eq!(reports[0], reports[1]);
    assert!(reports[0].breed.is_some());
    assert!(reports[0].weight.is_some());
    assert!(!reports[0].symptoms.is_empty());
}

#[tokio::test]
async fn diagnoses_route_ignores_unknown_tags() {
    let response = simulated_router()
        .oneshot(
            axum::http::Request::post("/api/v1/diagnoses")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    json!({
                        "feces_symptoms": ["blood", "glitter"],
                        "feces_consistency": "normal",
                        "chicken_symptoms": ["hiccups"],
                        "age_weeks": 4
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["report"]["result"]["evidence_summary"]["feces_symptoms"],
        json!(["blood"])
    );
    assert_eq!(
        payload["report"]["result"]["evidence_summary"]["chicken_symptoms"],
        json!([])
    );
}

#[tokio::test]
async fn diseases_route_lists_table_in_order() {
    let response = simulated_router()
        .oneshot(
            axum::http::Request::get("/api/v1/diseases")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let diseases = payload["diseases"].as_array().cloned().unwrap_or_default();
    assert_eq!(diseases.len(), 12);
    assert_eq!(diseases[0]["id"], Value::from("coccidiosis"));
    assert_eq!(payload["breeds"].as_array().map(Vec::len), Some(3));
    assert_eq!(payload["feces_colors"].as_array().map(Vec::len), Some(6));
    assert_eq!(payload["neck_conditions"].as_array().map(Vec::len), Some(8));
}

#[tokio::test]
async fn disease_route_returns_one_profile_or_not_found() {
    let get = |uri: &'static str| {
        simulated_router().oneshot(
            axum::http::Request::get(uri)
                .body(axum::body::Body::empty())
                .unwrap(),
        )
    };

    let response = get("/api/v1/diseases/necrotic_enteritis")
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["name"]["en"], Value::from("Necrotic enteritis"));
    assert!(payload.get("treatment").is_some());

    let response = get("/api/v1/diseases/fowl_pox")
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], Value::from("unknown disease 'fowl_pox'"));
}
