use super::domain::{BreedProfile, EvidenceInput, LocalizedText, TreatmentPlan};
use super::engine::DiagnosisResult;
use super::extractor::{BreedEstimate, ExtractedEvidence, WeightEstimate};
use super::knowledge::KnowledgeBase;
use super::reference::FecesColorGuide;
use serde::{Deserialize, Serialize};

/// A diagnosis result packaged with follow-up guidance for the flock owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisReport {
    pub result: DiagnosisResult,
    /// Chicken symptoms first, then droppings symptoms.
    pub symptoms: Vec<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<BreedFinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<WeightEstimate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_guide: Option<FecesColorGuide>,
    pub confirmation: Vec<LocalizedText>,
    pub treatment: TreatmentPlan,
    pub prevention: Vec<LocalizedText>,
    pub reasoning: ReasoningTrail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedFinding {
    pub profile: BreedProfile,
    pub confidence: u8,
    pub alternatives: Vec<String>,
}

/// Explains how the reported probability was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningTrail {
    pub base_probability: u8,
    pub reported_probability: u8,
    pub applied_factors: Vec<LocalizedText>,
    pub observations: Vec<LocalizedText>,
    pub disclaimer: LocalizedText,
}

/// Builds [`DiagnosisReport`]s from engine results.
#[derive(Debug, Default, Clone, Copy)]
pub struct CareGuidance;

impl CareGuidance {
    /// `extracted` carries what an image extractor read beyond the evidence
    /// itself (breed and weight); pass `None` for manually entered evidence.
    pub fn report(
        &self,
        knowledge: &KnowledgeBase,
        result: DiagnosisResult,
        extracted: Option<&ExtractedEvidence>,
    ) -> DiagnosisReport {
        let treatment = result
            .top_disease
            .profile
            .treatment
            .clone()
            .unwrap_or_else(generic_treatment);
        let reasoning = reasoning_trail(&result);
        let symptoms = symptom_labels(&result.evidence_summary);
        let color_guide = result
            .evidence_summary
            .feces_color
            .and_then(|color| knowledge.feces_color_guide(color))
            .cloned();
        let breed = extracted
            .and_then(|extracted| extracted.breed.as_ref())
            .and_then(|estimate| breed_finding(knowledge, estimate));
        let weight = extracted.and_then(|extracted| extracted.weight.clone());

        DiagnosisReport {
            result,
            symptoms,
            breed,
            weight,
            color_guide,
            confirmation: confirmation_strategies(),
            treatment,
            prevention: prevention_measures(),
            reasoning,
        }
    }
}

fn breed_finding(knowledge: &KnowledgeBase, estimate: &BreedEstimate) -> Option<BreedFinding> {
    let Some(profile) = knowledge.breed(&estimate.breed_id) else {
        tracing::warn!(breed = %estimate.breed_id, "breed estimate not in knowledge base");
        return None;
    };

    let alternatives = knowledge
        .breeds()
        .iter()
        .filter(|breed| breed.id != profile.id)
        .take(2)
        .map(|breed| breed.id.clone())
        .collect();

    Some(BreedFinding {
        profile: profile.clone(),
        confidence: estimate.confidence.min(100),
        alternatives,
    })
}

fn symptom_labels(evidence: &EvidenceInput) -> Vec<LocalizedText> {
    let chicken = evidence.chicken_symptoms.iter().map(|symptom| symptom.label());
    let feces = evidence.feces_symptoms.iter().map(|symptom| symptom.label());
    chicken.chain(feces).collect()
}

fn reasoning_trail(result: &DiagnosisResult) -> ReasoningTrail {
    let top = &result.top_disease;
    ReasoningTrail {
        base_probability: top.base_probability.round().clamp(0.0, 100.0) as u8,
        reported_probability: top.probability,
        applied_factors: top
            .fired_factors
            .iter()
            .map(|factor| factor.reason.clone())
            .collect(),
        observations: observations(&result.evidence_summary),
        disclaimer: LocalizedText::en_ar(
            "These results are indicative and based on image analysis only. Final diagnosis should be made by a specialized veterinarian based on accurate laboratory tests.",
            "هذه النتائج استرشادية وتستند إلى تحليل الصور فقط. التشخيص النهائي يجب أن يتم بواسطة طبيب بيطري متخصص بناءً على فحوصات معملية دقيقة.",
        ),
    }
}

fn observations(evidence: &EvidenceInput) -> Vec<LocalizedText> {
    let age = format_age(evidence.age_weeks);
    let consistency = evidence.feces_consistency.label();
    let mut observations = vec![
        LocalizedText::new()
            .with("en", format!("Estimated age: {age} weeks"))
            .with("ar", format!("العمر التقديري: {age} أسبوع")),
        LocalizedText::new()
            .with("en", format!("Feces consistency: {consistency}"))
            .with("ar", format!("قوام البراز: {consistency}")),
    ];

    if let Some(color) = evidence.feces_color {
        let color = color.label();
        observations.push(
            LocalizedText::new()
                .with("en", format!("Feces color: {color}"))
                .with("ar", format!("لون البراز: {color}")),
        );
    }

    if let Some(texture) = evidence.feces_texture {
        let texture = texture.label();
        observations.push(
            LocalizedText::new()
                .with("en", format!("Feces texture: {texture}"))
                .with("ar", format!("ملمس البراز: {texture}")),
        );
    }

    observations
}

fn format_age(age_weeks: f64) -> String {
    if age_weeks.fract() == 0.0 {
        format!("{age_weeks:.0}")
    } else {
        format!("{age_weeks:.1}")
    }
}

fn generic_treatment() -> TreatmentPlan {
    TreatmentPlan {
        medication: LocalizedText::en_ar("Consult veterinarian", "استشر الطبيب البيطري"),
        dosage: LocalizedText::en_ar("Based on accurate diagnosis", "حسب التشخيص الدقيق"),
        duration: LocalizedText::en_ar("Depending on condition", "حسب الحالة"),
        warnings: LocalizedText::en_ar(
            "Accurate diagnosis required before treatment",
            "التشخيص الدقيق ضروري قبل العلاج",
        ),
    }
}

fn confirmation_strategies() -> Vec<LocalizedText> {
    vec![
        LocalizedText::en_ar("Microscopic examination of feces", "فحص البراز مجهرياً"),
        LocalizedText::en_ar("Bacterial culture", "زراعة بكتيرية"),
        LocalizedText::en_ar("PCR testing if necessary", "اختبار PCR عند الحاجة"),
        LocalizedText::en_ar("Necropsy in case of death", "التشريح في حالة النفوق"),
    ]
}

fn prevention_measures() -> Vec<LocalizedText> {
    vec![
        LocalizedText::en_ar("Isolate infected birds", "عزل الطيور المصابة"),
        LocalizedText::en_ar("Improve hygiene and disinfection", "تحسين النظافة والتطهير"),
        LocalizedText::en_ar("Review feed quality", "مراجعة جودة العلف"),
        LocalizedText::en_ar(
            "Implement appropriate vaccination program",
            "تطبيق برنامج تحصين مناسب",
        ),
        LocalizedText::en_ar("Regular flock monitoring", "مراقبة القطيع بانتظام"),
    ]
}
