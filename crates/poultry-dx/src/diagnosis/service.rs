use std::sync::Arc;

use super::domain::EvidenceInput;
use super::engine::{DiagnosisEngine, DiagnosisError};
use super::extractor::{EvidenceExtractor, ExtractionError, SpecimenImages};
use super::knowledge::KnowledgeBase;
use super::report::{CareGuidance, DiagnosisReport};

/// Service composing the evidence extractor, engine, and care guidance.
pub struct DiagnosisService<X> {
    extractor: Arc<X>,
    engine: DiagnosisEngine,
    guidance: CareGuidance,
}

impl<X> DiagnosisService<X>
where
    X: EvidenceExtractor + 'static,
{
    pub fn new(knowledge: Arc<KnowledgeBase>, extractor: Arc<X>) -> Self {
        Self {
            extractor,
            engine: DiagnosisEngine::new(knowledge),
            guidance: CareGuidance,
        }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        self.engine.knowledge_base()
    }

    /// Diagnose from evidence the caller already has.
    pub fn assess(
        &self,
        evidence: &EvidenceInput,
    ) -> Result<DiagnosisReport, DiagnosisServiceError> {
        let result = self.engine.evaluate(evidence)?;
        Ok(self.guidance.report(self.knowledge_base(), result, None))
    }

    /// Extract evidence from specimen images, then diagnose.
    pub fn diagnose_specimens(
        &self,
        specimens: &SpecimenImages,
    ) -> Result<DiagnosisReport, DiagnosisServiceError> {
        let extracted = self.extractor.extract(specimens)?;
        let result = self.engine.evaluate(&extracted.evidence)?;
        tracing::info!(
            top_disease = %result.top_disease.disease_id,
            probability = result.top_disease.probability,
            "specimen diagnosis completed"
        );
        Ok(self
            .guidance
            .report(self.knowledge_base(), result, Some(&extracted)))
    }
}

/// Error raised by the diagnosis service.
#[derive(Debug, thiserror::Error)]
pub enum DiagnosisServiceError {
    #[error(transparent)]
    Diagnosis(#[from] DiagnosisError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}
