use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{DiseaseId, EvidenceInput};
use super::engine::DiagnosisError;
use super::extractor::{EvidenceExtractor, ExtractionError, SpecimenImages};
use super::report::DiagnosisReport;
use super::service::{DiagnosisService, DiagnosisServiceError};

/// Envelope returned by the diagnosis endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisResponse {
    pub generated_at: DateTime<Utc>,
    pub report: DiagnosisReport,
}

/// Router builder exposing the knowledge base and diagnosis endpoints.
pub fn diagnosis_router<X>(service: Arc<DiagnosisService<X>>) -> Router
where
    X: EvidenceExtractor + 'static,
{
    Router::new()
        .route("/api/v1/diseases", get(knowledge_handler::<X>))
        .route("/api/v1/diseases/:disease_id", get(disease_handler::<X>))
        .route("/api/v1/diagnoses", post(evidence_handler::<X>))
        .route("/api/v1/diagnoses/specimens", post(specimen_handler::<X>))
        .with_state(service)
}

pub(crate) async fn knowledge_handler<X>(
    State(service): State<Arc<DiagnosisService<X>>>,
) -> Response
where
    X: EvidenceExtractor + 'static,
{
    (StatusCode::OK, axum::Json(service.knowledge_base().clone())).into_response()
}

pub(crate) async fn disease_handler<X>(
    State(service): State<Arc<DiagnosisService<X>>>,
    Path(disease_id): Path<String>,
) -> Response
where
    X: EvidenceExtractor + 'static,
{
    let disease_id = DiseaseId::new(disease_id);
    match service.knowledge_base().disease(&disease_id) {
        Some(profile) => (StatusCode::OK, axum::Json(profile.clone())).into_response(),
        None => {
            let payload = json!({
                "error": format!("unknown disease '{disease_id}'"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn evidence_handler<X>(
    State(service): State<Arc<DiagnosisService<X>>>,
    axum::Json(evidence): axum::Json<EvidenceInput>,
) -> Response
where
    X: EvidenceExtractor + 'static,
{
    respond(service.assess(&evidence))
}

pub(crate) async fn specimen_handler<X>(
    State(service): State<Arc<DiagnosisService<X>>>,
    axum::Json(specimens): axum::Json<SpecimenImages>,
) -> Response
where
    X: EvidenceExtractor + 'static,
{
    respond(service.diagnose_specimens(&specimens))
}

fn respond(outcome: Result<DiagnosisReport, DiagnosisServiceError>) -> Response {
    match outcome {
        Ok(report) => {
            let body = DiagnosisResponse {
                generated_at: Utc::now(),
                report,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => {
            let status = match &error {
                DiagnosisServiceError::Diagnosis(DiagnosisError::InvalidEvidence(_))
                | DiagnosisServiceError::Extraction(ExtractionError::MissingSpecimen(_)) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                DiagnosisServiceError::Extraction(ExtractionError::Unavailable(_)) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                DiagnosisServiceError::Diagnosis(DiagnosisError::Configuration(_)) => {
                    tracing::error!(%error, "diagnosis configuration failure");
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            let payload = json!({
                "error": error.to_string(),
            });
            (status, axum::Json(payload)).into_response()
        }
    }
}
