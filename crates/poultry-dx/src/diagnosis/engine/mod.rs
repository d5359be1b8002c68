mod ranking;
mod rules;

pub use ranking::{capped_probability, MAX_ALTERNATIVES, MAX_REPORTED_PROBABILITY};
pub use rules::EvidenceRule;

use super::domain::{DiseaseId, DiseaseProfile, EvidenceInput, LocalizedText};
use super::knowledge::{KnowledgeBase, KnowledgeBaseError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Stateless scorer that applies evidence rules to an injected knowledge base.
///
/// Cloning is cheap and every call to [`DiagnosisEngine::evaluate`] works on
/// its own scores, so one engine can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct DiagnosisEngine {
    knowledge: Arc<KnowledgeBase>,
}

impl DiagnosisEngine {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Seeded and adjusted scores for every disease, in table order.
    pub fn scores(&self, evidence: &EvidenceInput) -> Result<Vec<DiseaseScore>, DiagnosisError> {
        validate_evidence(evidence)?;
        if self.knowledge.is_empty() {
            return Err(DiagnosisError::Configuration(KnowledgeBaseError::Empty));
        }

        let mut scores = rules::seed_scores(self.knowledge.diseases());
        rules::apply_adjustments(&mut scores, evidence);
        Ok(scores)
    }

    pub fn evaluate(&self, evidence: &EvidenceInput) -> Result<DiagnosisResult, DiagnosisError> {
        let scores = self.scores(evidence)?;
        let profiles = self.knowledge.diseases();

        let top = ranking::select_top(&scores)
            .ok_or(DiagnosisError::Configuration(KnowledgeBaseError::Empty))?;
        let alternatives = ranking::rank_alternatives(&scores, top)
            .into_iter()
            .map(|index| RankedDisease::from_score(&scores[index], &profiles[index]))
            .collect();

        let result = DiagnosisResult {
            overall_confidence: ranking::overall_confidence(&scores),
            top_disease: RankedDisease::from_score(&scores[top], &profiles[top]),
            alternatives,
            evidence_summary: evidence.clone(),
        };

        debug!(
            top_disease = %result.top_disease.disease_id,
            probability = result.top_disease.probability,
            overall_confidence = result.overall_confidence,
            fired = result.top_disease.fired_factors.len(),
            "diagnosis evaluated"
        );

        Ok(result)
    }
}

fn validate_evidence(evidence: &EvidenceInput) -> Result<(), DiagnosisError> {
    if !evidence.age_weeks.is_finite() || evidence.age_weeks < 0.0 {
        return Err(DiagnosisError::InvalidEvidence(format!(
            "age_weeks must be a non-negative number, got {}",
            evidence.age_weeks
        )));
    }
    Ok(())
}

/// One matched evidence rule, kept for the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiredFactor {
    pub rule: EvidenceRule,
    pub multiplier: f64,
    pub reason: LocalizedText,
}

/// Working score for one disease during a single evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseScore {
    pub disease_id: DiseaseId,
    pub base_probability: f64,
    pub adjusted_probability: f64,
    pub fired_factors: Vec<FiredFactor>,
}

/// A scored disease enriched with its profile for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDisease {
    pub disease_id: DiseaseId,
    /// Adjusted probability rounded and capped at [`MAX_REPORTED_PROBABILITY`].
    pub probability: u8,
    pub base_probability: f64,
    pub adjusted_probability: f64,
    pub fired_factors: Vec<FiredFactor>,
    pub profile: DiseaseProfile,
}

impl RankedDisease {
    fn from_score(score: &DiseaseScore, profile: &DiseaseProfile) -> Self {
        Self {
            disease_id: score.disease_id.clone(),
            probability: capped_probability(score.adjusted_probability),
            base_probability: score.base_probability,
            adjusted_probability: score.adjusted_probability,
            fired_factors: score.fired_factors.clone(),
            profile: profile.clone(),
        }
    }
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    /// Table-wide mean of adjusted probabilities, rounded and capped.
    pub overall_confidence: u8,
    pub top_disease: RankedDisease,
    pub alternatives: Vec<RankedDisease>,
    pub evidence_summary: EvidenceInput,
}

impl DiagnosisResult {
    /// Top disease followed by the alternatives, in rank order.
    pub fn candidates(&self) -> impl Iterator<Item = &RankedDisease> {
        std::iter::once(&self.top_disease).chain(self.alternatives.iter())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DiagnosisError {
    #[error("diagnosis configuration error: {0}")]
    Configuration(#[from] KnowledgeBaseError),
    #[error("invalid evidence: {0}")]
    InvalidEvidence(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::domain::{FecesConsistency, FecesSymptom};
    use crate::diagnosis::knowledge::ids;

    fn engine() -> DiagnosisEngine {
        DiagnosisEngine::new(Arc::new(KnowledgeBase::standard()))
    }

    #[test]
    fn empty_knowledge_base_is_a_configuration_error() {
        let knowledge = KnowledgeBase::new(Vec::new(), Vec::new()).expect("empty allowed");
        let engine = DiagnosisEngine::new(Arc::new(knowledge));

        let error = engine
            .evaluate(&EvidenceInput::at_age(4.0))
            .expect_err("nothing to select");
        assert!(matches!(
            error,
            DiagnosisError::Configuration(KnowledgeBaseError::Empty)
        ));
    }

    #[test]
    fn negative_and_non_finite_ages_are_rejected() {
        let engine = engine();
        for age in [-1.0, f64::NAN, f64::INFINITY] {
            let error = engine
                .evaluate(&EvidenceInput::at_age(age))
                .expect_err("invalid age");
            assert!(matches!(error, DiagnosisError::InvalidEvidence(_)));
        }
    }

    #[test]
    fn zero_age_is_accepted_and_favours_viral_enteritis() {
        let engine = engine();
        let scores = engine.scores(&EvidenceInput::at_age(0.0)).expect("scores");
        let viral = scores
            .iter()
            .find(|score| score.disease_id.as_str() == ids::VIRAL_ENTERITIS)
            .expect("viral enteritis scored");
        assert!((viral.adjusted_probability - 7.5 * 1.3).abs() < 1e-9);
    }

    #[test]
    fn candidates_lists_top_first() {
        let engine = engine();
        let evidence = EvidenceInput::at_age(15.0)
            .with_consistency(FecesConsistency::Watery)
            .with_feces_symptom(FecesSymptom::Blood);
        let result = engine.evaluate(&evidence).expect("evaluates");

        let ranked: Vec<&str> = result
            .candidates()
            .map(|candidate| candidate.disease_id.as_str())
            .collect();
        assert_eq!(ranked.len(), 4);
        assert_eq!(ranked[0], ids::COCCIDIOSIS);
        assert_eq!(ranked[1], ids::NECROTIC_ENTERITIS);
        assert_eq!(ranked[2], ids::SALMONELLOSIS);
    }
}
