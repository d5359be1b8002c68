use super::super::domain::{
    ChickenSymptom, DiseaseProfile, EvidenceInput, FecesConsistency, FecesSymptom,
    LocalizedText,
};
use super::super::knowledge::ids;
use super::{DiseaseScore, FiredFactor};
use serde::{Deserialize, Serialize};

/// Evidence conditions that adjust disease probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceRule {
    BloodyFeces,
    MucoidFeces,
    WateryFeces,
    WeightLoss,
    GaitDisorder,
    AgeThreeToSixWeeks,
    AgeUnderTwoWeeks,
}

impl EvidenceRule {
    /// Application order: feces evidence, then chicken evidence, then age.
    pub const fn ordered() -> [Self; 7] {
        [
            Self::BloodyFeces,
            Self::MucoidFeces,
            Self::WateryFeces,
            Self::WeightLoss,
            Self::GaitDisorder,
            Self::AgeThreeToSixWeeks,
            Self::AgeUnderTwoWeeks,
        ]
    }

    pub fn matches(self, evidence: &EvidenceInput) -> bool {
        match self {
            Self::BloodyFeces => evidence.has_feces_symptom(FecesSymptom::Blood),
            Self::MucoidFeces => evidence.has_feces_symptom(FecesSymptom::Mucus),
            Self::WateryFeces => evidence.feces_consistency == FecesConsistency::Watery,
            Self::WeightLoss => evidence.has_chicken_symptom(ChickenSymptom::WeightLoss),
            Self::GaitDisorder => evidence.has_chicken_symptom(ChickenSymptom::GaitDisorder),
            Self::AgeThreeToSixWeeks => (3.0..=6.0).contains(&evidence.age_weeks),
            Self::AgeUnderTwoWeeks => evidence.age_weeks < 2.0,
        }
    }

    /// Target disease ids and the multiplier applied to each.
    pub fn adjustments(self) -> &'static [(&'static str, f64)] {
        match self {
            Self::BloodyFeces => &[(ids::COCCIDIOSIS, 1.3), (ids::NECROTIC_ENTERITIS, 1.2)],
            Self::MucoidFeces => &[(ids::COCCIDIOSIS, 1.2)],
            Self::WateryFeces => &[(ids::SALMONELLOSIS, 1.3), (ids::VIRAL_ENTERITIS, 1.2)],
            Self::WeightLoss => &[(ids::HELMINTHIASIS, 1.3), (ids::MYCOTOXICOSIS, 1.2)],
            Self::GaitDisorder => &[(ids::NECROTIC_ENTERITIS, 1.1)],
            Self::AgeThreeToSixWeeks => &[(ids::COCCIDIOSIS, 1.4)],
            Self::AgeUnderTwoWeeks => &[(ids::VIRAL_ENTERITIS, 1.3)],
        }
    }

    pub fn reason(self) -> LocalizedText {
        match self {
            Self::BloodyFeces => LocalizedText::en_ar("Bloody feces", "براز دموي"),
            Self::MucoidFeces => LocalizedText::en_ar("Mucus in feces", "مخاط في البراز"),
            Self::WateryFeces => LocalizedText::en_ar("Watery feces", "براز مائي"),
            Self::WeightLoss => LocalizedText::en_ar("Weight loss", "انخفاض الوزن"),
            Self::GaitDisorder => LocalizedText::en_ar("Walking disorder", "اختلال في المشي"),
            Self::AgeThreeToSixWeeks => LocalizedText::en_ar("Age 3-6 weeks", "عمر 3-6 أسابيع"),
            Self::AgeUnderTwoWeeks => {
                LocalizedText::en_ar("Age under 2 weeks", "عمر أقل من أسبوعين")
            }
        }
    }
}

pub(crate) fn seed_scores<'a>(
    profiles: impl IntoIterator<Item = &'a DiseaseProfile>,
) -> Vec<DiseaseScore> {
    profiles
        .into_iter()
        .map(|profile| {
            let base = profile.base_probability();
            DiseaseScore {
                disease_id: profile.id.clone(),
                base_probability: base,
                adjusted_probability: base,
                fired_factors: Vec::new(),
            }
        })
        .collect()
}

/// Multiplies each matching rule into its target scores, compounding when
/// several rules hit the same disease. Targets missing from the table are
/// skipped.
pub(crate) fn apply_adjustments(scores: &mut [DiseaseScore], evidence: &EvidenceInput) {
    for rule in EvidenceRule::ordered() {
        if !rule.matches(evidence) {
            continue;
        }

        for &(target, multiplier) in rule.adjustments() {
            if let Some(score) = scores
                .iter_mut()
                .find(|score| score.disease_id.as_str() == target)
            {
                score.adjusted_probability *= multiplier;
                score.fired_factors.push(FiredFactor {
                    rule,
                    multiplier,
                    reason: rule.reason(),
                });
            }
        }
    }
}
