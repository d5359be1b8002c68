use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Text keyed by language code. The engine stores and returns it untouched;
/// picking a language is the caller's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// English/Arabic pair, the two languages the standard tables ship with.
    pub fn en_ar(en: &str, ar: &str) -> Self {
        Self::new().with("en", en).with("ar", ar)
    }

    pub fn with(mut self, language: &str, text: impl Into<String>) -> Self {
        self.0.insert(language.to_string(), text.into());
        self
    }

    pub fn get(&self, language: &str) -> Option<&str> {
        self.0.get(language).map(String::as_str)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiseaseId(pub String);

impl DiseaseId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DiseaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static description of one disease and its prior-probability range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseProfile {
    pub id: DiseaseId,
    pub name: LocalizedText,
    pub min_base_accuracy: f64,
    pub max_base_accuracy: f64,
    pub description: LocalizedText,
    #[serde(default)]
    pub clues: Vec<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment: Option<TreatmentPlan>,
}

impl DiseaseProfile {
    /// Prior probability used before any evidence is applied.
    pub fn base_probability(&self) -> f64 {
        (self.min_base_accuracy + self.max_base_accuracy) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentPlan {
    pub medication: LocalizedText,
    pub dosage: LocalizedText,
    pub duration: LocalizedText,
    pub warnings: LocalizedText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: f64,
    pub max: f64,
}

/// Reference data for a commercial breed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedProfile {
    pub id: String,
    pub name: LocalizedText,
    pub weight_range_kg: WeightRange,
    #[serde(default)]
    pub characteristics: Vec<LocalizedText>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FecesSymptom {
    Blood,
    Mucus,
    Diarrhea,
    AbnormalColor,
}

impl FecesSymptom {
    pub const fn ordered() -> [Self; 4] {
        [Self::Diarrhea, Self::Mucus, Self::Blood, Self::AbnormalColor]
    }

    /// Accepts the snake_case tag and the short tags older clients send.
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_tag(raw).as_str() {
            "blood" | "bloody" => Some(Self::Blood),
            "mucus" | "mucoid" => Some(Self::Mucus),
            "diarrhea" => Some(Self::Diarrhea),
            "abnormal_color" | "color" => Some(Self::AbnormalColor),
            _ => None,
        }
    }

    pub fn label(self) -> LocalizedText {
        match self {
            Self::Blood => LocalizedText::en_ar("Blood", "دم"),
            Self::Mucus => LocalizedText::en_ar("Mucus", "مخاط"),
            Self::Diarrhea => LocalizedText::en_ar("Diarrhea", "إسهال"),
            Self::AbnormalColor => LocalizedText::en_ar("Abnormal color", "لون غير طبيعي"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChickenSymptom {
    WeightLoss,
    GaitDisorder,
    FeatherRuffling,
    AbnormalPosture,
}

impl ChickenSymptom {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::GaitDisorder,
            Self::WeightLoss,
            Self::FeatherRuffling,
            Self::AbnormalPosture,
        ]
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_tag(raw).as_str() {
            "weight_loss" | "weight" => Some(Self::WeightLoss),
            "gait_disorder" | "walking" | "walking_disorder" => Some(Self::GaitDisorder),
            "feather_ruffling" | "feathers" => Some(Self::FeatherRuffling),
            "abnormal_posture" | "posture" => Some(Self::AbnormalPosture),
            _ => None,
        }
    }

    pub fn label(self) -> LocalizedText {
        match self {
            Self::WeightLoss => LocalizedText::en_ar("Weight loss", "انخفاض الوزن"),
            Self::GaitDisorder => LocalizedText::en_ar("Walking disorder", "اختلال في المشي"),
            Self::FeatherRuffling => LocalizedText::en_ar("Feather ruffling", "انتفاش الريش"),
            Self::AbnormalPosture => LocalizedText::en_ar("Abnormal posture", "وضعية غير طبيعية"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FecesConsistency {
    #[default]
    Normal,
    Soft,
    Watery,
    Hard,
}

impl FecesConsistency {
    pub const fn ordered() -> [Self; 4] {
        [Self::Normal, Self::Soft, Self::Watery, Self::Hard]
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_tag(raw).as_str() {
            "normal" => Some(Self::Normal),
            "soft" => Some(Self::Soft),
            "watery" => Some(Self::Watery),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Soft => "soft",
            Self::Watery => "watery",
            Self::Hard => "hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FecesColor {
    Brown,
    Green,
    Yellow,
    Red,
    White,
}

impl FecesColor {
    pub const fn ordered() -> [Self; 5] {
        [Self::Brown, Self::Green, Self::Yellow, Self::Red, Self::White]
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_tag(raw).as_str() {
            "brown" => Some(Self::Brown),
            "green" => Some(Self::Green),
            "yellow" => Some(Self::Yellow),
            "red" => Some(Self::Red),
            "white" => Some(Self::White),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Brown => "brown",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::White => "white",
        }
    }
}

/// Texture read from a droppings image, finer-grained than consistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FecesTexture {
    Normal,
    Watery,
    Mucoid,
    Bloody,
}

impl FecesTexture {
    pub const fn ordered() -> [Self; 4] {
        [Self::Normal, Self::Watery, Self::Mucoid, Self::Bloody]
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_tag(raw).as_str() {
            "normal" => Some(Self::Normal),
            "watery" => Some(Self::Watery),
            "mucoid" | "mucus" => Some(Self::Mucoid),
            "bloody" | "blood" => Some(Self::Bloody),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Watery => "watery",
            Self::Mucoid => "mucoid",
            Self::Bloody => "bloody",
        }
    }
}

/// Observations for a single diagnosis request.
///
/// Symptom tags outside the known vocabularies are dropped while
/// deserializing, so the engine only ever sees recognized evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceInput {
    #[serde(default, deserialize_with = "deserialize_feces_symptoms")]
    pub feces_symptoms: BTreeSet<FecesSymptom>,
    #[serde(default)]
    pub feces_consistency: FecesConsistency,
    #[serde(default, deserialize_with = "deserialize_chicken_symptoms")]
    pub chicken_symptoms: BTreeSet<ChickenSymptom>,
    pub age_weeks: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feces_color: Option<FecesColor>,
    /// Reported only; no scoring rule reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feces_texture: Option<FecesTexture>,
}

impl EvidenceInput {
    /// Evidence with no symptoms, normal consistency and the given age.
    pub fn at_age(age_weeks: f64) -> Self {
        Self {
            feces_symptoms: BTreeSet::new(),
            feces_consistency: FecesConsistency::Normal,
            chicken_symptoms: BTreeSet::new(),
            age_weeks,
            feces_color: None,
            feces_texture: None,
        }
    }

    pub fn with_feces_symptom(mut self, symptom: FecesSymptom) -> Self {
        self.feces_symptoms.insert(symptom);
        self
    }

    pub fn with_chicken_symptom(mut self, symptom: ChickenSymptom) -> Self {
        self.chicken_symptoms.insert(symptom);
        self
    }

    pub fn with_consistency(mut self, consistency: FecesConsistency) -> Self {
        self.feces_consistency = consistency;
        self
    }

    pub fn with_color(mut self, color: FecesColor) -> Self {
        self.feces_color = Some(color);
        self
    }

    pub fn with_texture(mut self, texture: FecesTexture) -> Self {
        self.feces_texture = Some(texture);
        self
    }

    pub fn has_feces_symptom(&self, symptom: FecesSymptom) -> bool {
        self.feces_symptoms.contains(&symptom)
    }

    pub fn has_chicken_symptom(&self, symptom: ChickenSymptom) -> bool {
        self.chicken_symptoms.contains(&symptom)
    }
}

/// Parses free-form tags, returning the recognized symptoms and the raw
/// values that did not match the vocabulary.
pub fn parse_tags<T, F>(
    raw: impl IntoIterator<Item = impl AsRef<str>>,
    parse: F,
) -> (BTreeSet<T>, Vec<String>)
where
    T: Ord,
    F: Fn(&str) -> Option<T>,
{
    let mut recognized = BTreeSet::new();
    let mut unknown = Vec::new();
    for tag in raw {
        let tag = tag.as_ref().trim();
        if tag.is_empty() {
            continue;
        }
        match parse(tag) {
            Some(value) => {
                recognized.insert(value);
            }
            None => unknown.push(tag.to_string()),
        }
    }
    (recognized, unknown)
}

fn normalize_tag(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    for (index, ch) in raw.trim().chars().enumerate() {
        if ch == '-' || ch == ' ' {
            normalized.push('_');
        } else if ch.is_ascii_uppercase() {
            if index > 0 && !normalized.ends_with('_') {
                normalized.push('_');
            }
            normalized.push(ch.to_ascii_lowercase());
        } else {
            normalized.push(ch);
        }
    }
    normalized
}

fn deserialize_feces_symptoms<'de, D>(deserializer: D) -> Result<BTreeSet<FecesSymptom>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    let (symptoms, unknown) = parse_tags(raw, FecesSymptom::parse);
    if !unknown.is_empty() {
        tracing::warn!(?unknown, "ignoring unrecognized feces symptom tags");
    }
    Ok(symptoms)
}

fn deserialize_chicken_symptoms<'de, D>(
    deserializer: D,
) -> Result<BTreeSet<ChickenSymptom>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    let (symptoms, unknown) = parse_tags(raw, ChickenSymptom::parse);
    if !unknown.is_empty() {
        tracing::warn!(?unknown, "ignoring unrecognized chicken symptom tags");
    }
    Ok(symptoms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symptom_parsing_accepts_legacy_and_camel_case_tags() {
        assert_eq!(ChickenSymptom::parse("walking"), Some(ChickenSymptom::GaitDisorder));
        assert_eq!(ChickenSymptom::parse("weightLoss"), Some(ChickenSymptom::WeightLoss));
        assert_eq!(ChickenSymptom::parse("weight-loss"), Some(ChickenSymptom::WeightLoss));
        assert_eq!(FecesSymptom::parse(" Blood "), Some(FecesSymptom::Blood));
        assert_eq!(FecesSymptom::parse("color"), Some(FecesSymptom::AbnormalColor));
        assert_eq!(FecesSymptom::parse("worms"), None);
    }

    #[test]
    fn evidence_deserialization_drops_unknown_tags() {
        let evidence: EvidenceInput = serde_json::from_str(
            r#"{
                "feces_symptoms": ["blood", "glitter"],
                "feces_consistency": "watery",
                "chicken_symptoms": ["gaitDisorder", "sneezing"],
                "age_weeks": 4
            }"#,
        )
        .expect("evidence parses");

        assert_eq!(evidence.feces_symptoms.len(), 1);
        assert!(evidence.has_feces_symptom(FecesSymptom::Blood));
        assert!(evidence.has_chicken_symptom(ChickenSymptom::GaitDisorder));
        assert_eq!(evidence.chicken_symptoms.len(), 1);
        assert_eq!(evidence.feces_consistency, FecesConsistency::Watery);
        assert_eq!(evidence.feces_color, None);
        assert_eq!(evidence.feces_texture, None);
    }

    #[test]
    fn texture_accepts_symptom_style_aliases() {
        assert_eq!(FecesTexture::parse("Mucus"), Some(FecesTexture::Mucoid));
        assert_eq!(FecesTexture::parse("blood"), Some(FecesTexture::Bloody));
        assert_eq!(FecesTexture::parse("chalky"), None);

        let evidence: EvidenceInput =
            serde_json::from_str(r#"{ "age_weeks": 2, "feces_texture": "watery" }"#)
                .expect("evidence parses");
        assert_eq!(evidence.feces_texture, Some(FecesTexture::Watery));
    }

    #[test]
    fn missing_optional_fields_default_to_no_evidence() {
        let evidence: EvidenceInput =
            serde_json::from_str(r#"{ "age_weeks": 10 }"#).expect("evidence parses");
        assert_eq!(evidence, EvidenceInput::at_age(10.0));
    }

    #[test]
    fn base_probability_is_range_midpoint() {
        let profile = DiseaseProfile {
            id: DiseaseId::new("coccidiosis"),
            name: LocalizedText::new().with("en", "Coccidiosis"),
            min_base_accuracy: 75.0,
            max_base_accuracy: 90.0,
            description: LocalizedText::new(),
            clues: Vec::new(),
            treatment: None,
        };
        assert_eq!(profile.base_probability(), 82.5);
    }
}
