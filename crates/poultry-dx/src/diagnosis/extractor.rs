use super::domain::{
    ChickenSymptom, EvidenceInput, FecesColor, FecesConsistency, FecesSymptom, FecesTexture,
    LocalizedText, WeightRange,
};
use super::knowledge::KnowledgeBase;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Opaque reference to an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecimenImage {
    pub name: String,
    pub storage_key: String,
}

/// The photos submitted for one comprehensive diagnosis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecimenImages {
    #[serde(default)]
    pub chicken: Option<SpecimenImage>,
    #[serde(default)]
    pub feces: Option<SpecimenImage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecimenKind {
    Chicken,
    Feces,
}

impl fmt::Display for SpecimenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecimenKind::Chicken => f.write_str("chicken"),
            SpecimenKind::Feces => f.write_str("feces"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedEstimate {
    pub breed_id: String,
    pub confidence: u8,
}

/// Live weight read off the chicken image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEstimate {
    pub kg: f64,
    /// Plus or minus, as a percentage of `kg`.
    pub error_margin_pct: u8,
    pub method: LocalizedText,
}

pub const WEIGHT_ERROR_MARGIN_PCT: u8 = 15;

/// Used when no breed was recognized.
pub const DEFAULT_WEIGHT_RANGE_KG: WeightRange = WeightRange { min: 2.5, max: 3.5 };

/// Everything an extractor could read off the specimens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEvidence {
    pub evidence: EvidenceInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<BreedEstimate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<WeightEstimate>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("missing {0} image")]
    MissingSpecimen(SpecimenKind),
    #[error("classifier unavailable: {0}")]
    Unavailable(String),
}

/// Turns specimen images into evidence. The diagnosis engine only consumes
/// evidence; swapping a real classifier in means implementing this trait.
pub trait EvidenceExtractor: Send + Sync {
    fn extract(&self, specimens: &SpecimenImages) -> Result<ExtractedEvidence, ExtractionError>;
}

/// Returns the same evidence for every request.
#[derive(Debug, Clone)]
pub struct FixedEvidenceExtractor {
    extracted: ExtractedEvidence,
}

impl FixedEvidenceExtractor {
    pub fn new(evidence: EvidenceInput) -> Self {
        Self {
            extracted: ExtractedEvidence {
                evidence,
                breed: None,
                weight: None,
            },
        }
    }

    pub fn with_breed(mut self, breed: BreedEstimate) -> Self {
        self.extracted.breed = Some(breed);
        self
    }

    pub fn with_weight(mut self, weight: WeightEstimate) -> Self {
        self.extracted.weight = Some(weight);
        self
    }
}

impl EvidenceExtractor for FixedEvidenceExtractor {
    fn extract(&self, _specimens: &SpecimenImages) -> Result<ExtractedEvidence, ExtractionError> {
        Ok(self.extracted.clone())
    }
}

/// Placeholder classifier producing plausible random evidence.
///
/// The generator is seeded from the configured seed and the specimens'
/// storage keys, so resubmitting the same images gives the same evidence.
#[derive(Debug, Clone)]
pub struct SimulatedEvidenceExtractor {
    seed: u64,
    breeds: Vec<(String, WeightRange)>,
}

impl SimulatedEvidenceExtractor {
    pub fn new(seed: u64, knowledge: &KnowledgeBase) -> Self {
        Self {
            seed,
            breeds: knowledge
                .breeds()
                .iter()
                .map(|breed| (breed.id.clone(), breed.weight_range_kg.clone()))
                .collect(),
        }
    }

    fn rng_for(&self, chicken: &SpecimenImage, feces: &SpecimenImage) -> StdRng {
        let mut hash = FNV_OFFSET;
        for key in [&chicken.storage_key, &feces.storage_key] {
            for byte in key.bytes().chain(std::iter::once(0)) {
                hash ^= u64::from(byte);
                hash = hash.wrapping_mul(FNV_PRIME);
            }
        }
        StdRng::seed_from_u64(self.seed ^ hash)
    }
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

impl EvidenceExtractor for SimulatedEvidenceExtractor {
    fn extract(&self, specimens: &SpecimenImages) -> Result<ExtractedEvidence, ExtractionError> {
        let chicken = specimens
            .chicken
            .as_ref()
            .ok_or(ExtractionError::MissingSpecimen(SpecimenKind::Chicken))?;
        let feces = specimens
            .feces
            .as_ref()
            .ok_or(ExtractionError::MissingSpecimen(SpecimenKind::Feces))?;

        let mut rng = self.rng_for(chicken, feces);

        let (breed, weight_range) = if self.breeds.is_empty() {
            (None, &DEFAULT_WEIGHT_RANGE_KG)
        } else {
            let (breed_id, range) = &self.breeds[rng.gen_range(0..self.breeds.len())];
            let estimate = BreedEstimate {
                breed_id: breed_id.clone(),
                confidence: rng.gen_range(75..95),
            };
            (Some(estimate), range)
        };

        let chicken_count = rng.gen_range(1..=3);
        let chicken_symptoms: BTreeSet<ChickenSymptom> = ChickenSymptom::ordered()
            .into_iter()
            .take(chicken_count)
            .collect();
        let age_weeks = f64::from(rng.gen_range(1u8..=20));

        let feces_count = rng.gen_range(1..=2);
        let feces_symptoms: BTreeSet<FecesSymptom> = FecesSymptom::ordered()
            .into_iter()
            .take(feces_count)
            .collect();
        let consistencies = FecesConsistency::ordered();
        let feces_consistency = consistencies[rng.gen_range(0..consistencies.len())];
        let colors = FecesColor::ordered();
        let feces_color = colors[rng.gen_range(0..colors.len())];
        let textures = FecesTexture::ordered();
        let feces_texture = textures[rng.gen_range(0..textures.len())];

        let kg = rng.gen_range(weight_range.min..=weight_range.max);
        let weight = WeightEstimate {
            kg: (kg * 10.0).round() / 10.0,
            error_margin_pct: WEIGHT_ERROR_MARGIN_PCT,
            method: LocalizedText::en_ar(
                "Camera-based morphological comparison",
                "مقارنة شكلية من صورة الكاميرا",
            ),
        };

        tracing::debug!(
            chicken = %chicken.name,
            feces = %feces.name,
            age_weeks,
            "simulated evidence extracted"
        );

        Ok(ExtractedEvidence {
            evidence: EvidenceInput {
                feces_symptoms,
                feces_consistency,
                chicken_symptoms,
                age_weeks,
                feces_color: Some(feces_color),
                feces_texture: Some(feces_texture),
            },
            breed,
            weight: Some(weight),
        })
    }
}
