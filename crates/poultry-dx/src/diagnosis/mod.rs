//! Disease knowledge, evidence scoring and flock-care reporting.
//!
//! Evidence goes in through [`EvidenceInput`] (or an [`EvidenceExtractor`]
//! reading specimen images), is scored against every [`DiseaseProfile`] in
//! the [`KnowledgeBase`] by [`DiagnosisEngine`], and comes out as a ranked
//! [`DiagnosisResult`] wrapped in a [`DiagnosisReport`].

pub mod cases;
pub mod domain;
pub mod engine;
pub mod extractor;
pub mod knowledge;
pub mod reference;
pub mod report;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use cases::{CaseImportError, CaseImporter, CaseRecord};
pub use domain::{
    BreedProfile, ChickenSymptom, DiseaseId, DiseaseProfile, EvidenceInput, FecesColor,
    FecesConsistency, FecesSymptom, FecesTexture, LocalizedText, TreatmentPlan, WeightRange,
};
pub use engine::{
    capped_probability, DiagnosisEngine, DiagnosisError, DiagnosisResult, DiseaseScore,
    EvidenceRule, FiredFactor, RankedDisease, MAX_ALTERNATIVES, MAX_REPORTED_PROBABILITY,
};
pub use extractor::{
    BreedEstimate, EvidenceExtractor, ExtractedEvidence, ExtractionError,
    FixedEvidenceExtractor, SimulatedEvidenceExtractor, SpecimenImage, SpecimenImages,
    SpecimenKind, WeightEstimate,
};
pub use knowledge::{KnowledgeBase, KnowledgeBaseError};
pub use reference::{FecesColorGuide, NeckCondition, RiskEntry, Severity};
pub use report::{BreedFinding, CareGuidance, DiagnosisReport, ReasoningTrail};
pub use router::{diagnosis_router, DiagnosisResponse};
pub use service::{DiagnosisService, DiagnosisServiceError};
