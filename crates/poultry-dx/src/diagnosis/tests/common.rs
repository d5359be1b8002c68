use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::diagnosis::domain::{EvidenceInput, FecesSymptom};
use crate::diagnosis::extractor::{
    ExtractedEvidence, ExtractionError, EvidenceExtractor, FixedEvidenceExtractor,
    SimulatedEvidenceExtractor, SpecimenImage, SpecimenImages,
};
use crate::diagnosis::knowledge::KnowledgeBase;
use crate::diagnosis::{diagnosis_router, DiagnosisService};

pub(super) fn bloody_evidence() -> EvidenceInput {
    EvidenceInput::at_age(4.0).with_feces_symptom(FecesSymptom::Blood)
}

pub(super) fn specimens() -> SpecimenImages {
    SpecimenImages {
        chicken: Some(SpecimenImage {
            name: "bird.jpg".to_string(),
            storage_key: "uploads/farm-7/bird.jpg".to_string(),
        }),
        feces: Some(SpecimenImage {
            name: "droppings.jpg".to_string(),
            storage_key: "uploads/farm-7/droppings.jpg".to_string(),
        }),
    }
}

pub(super) fn fixed_service(
    evidence: EvidenceInput,
) -> Arc<DiagnosisService<FixedEvidenceExtractor>> {
    Arc::new(DiagnosisService::new(
        Arc::new(KnowledgeBase::standard()),
        Arc::new(FixedEvidenceExtractor::new(evidence)),
    ))
}

pub(super) fn simulated_service() -> Arc<DiagnosisService<SimulatedEvidenceExtractor>> {
    let knowledge = Arc::new(KnowledgeBase::standard());
    let extractor = Arc::new(SimulatedEvidenceExtractor::new(42, &knowledge));
    Arc::new(DiagnosisService::new(knowledge, extractor))
}

pub(super) fn simulated_router() -> axum::Router {
    diagnosis_router(simulated_service())
}

pub(super) fn empty_service() -> Arc<DiagnosisService<FixedEvidenceExtractor>> {
    let knowledge = KnowledgeBase::new(Vec::new(), Vec::new()).expect("empty table allowed");
    Arc::new(DiagnosisService::new(
        Arc::new(knowledge),
        Arc::new(FixedEvidenceExtractor::new(bloody_evidence())),
    ))
}

pub(super) struct OfflineExtractor;

impl EvidenceExtractor for OfflineExtractor {
    fn extract(&self, _specimens: &SpecimenImages) -> Result<ExtractedEvidence, ExtractionError> {
        Err(ExtractionError::Unavailable("gpu node offline".to_string()))
    }
}

pub(super) fn offline_service() -> Arc<DiagnosisService<OfflineExtractor>> {
    Arc::new(DiagnosisService::new(
        Arc::new(KnowledgeBase::standard()),
        Arc::new(OfflineExtractor),
    ))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 512 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
