use crate::infra::localized;
use poultry_dx::diagnosis::{
    CaseRecord, DiagnosisReport, DiagnosisResult, KnowledgeBase, RankedDisease,
};
use std::collections::BTreeMap;

pub(crate) fn render_report(report: &DiagnosisReport, language: &str) -> String {
    let result = &report.result;
    let top = &result.top_disease;
    let mut lines = vec![format!(
        "Most likely: {} ({}%)",
        localized(&top.profile.name, language),
        top.probability
    )];
    if !top.profile.description.is_empty() {
        lines.push(format!("  {}", localized(&top.profile.description, language)));
    }
    lines.push(format!("Overall confidence: {}%", result.overall_confidence));

    if !report.symptoms.is_empty() {
        let symptoms: Vec<&str> = report
            .symptoms
            .iter()
            .map(|symptom| localized(symptom, language))
            .collect();
        lines.push(format!("Symptoms: {}", symptoms.join(", ")));
    }

    if let Some(breed) = &report.breed {
        lines.push(format!(
            "Breed: {} ({}% confidence)",
            localized(&breed.profile.name, language),
            breed.confidence
        ));
    }

    if let Some(weight) = &report.weight {
        lines.push(format!(
            "Estimated weight: {:.1} kg (±{}%, {})",
            weight.kg,
            weight.error_margin_pct,
            localized(&weight.method, language)
        ));
    }

    if !result.alternatives.is_empty() {
        lines.push("Alternatives:".to_string());
        for alternative in &result.alternatives {
            lines.push(format!("  - {}", ranked_line(alternative, language)));
        }
    }

    let reasoning = &report.reasoning;
    lines.push(format!(
        "Reasoning: base {}% -> reported {}%",
        reasoning.base_probability, reasoning.reported_probability
    ));
    for factor in &reasoning.applied_factors {
        lines.push(format!("  + {}", localized(factor, language)));
    }
    for observation in &reasoning.observations {
        lines.push(format!("  * {}", localized(observation, language)));
    }

    let treatment = &report.treatment;
    lines.push(format!(
        "Treatment: {} | {} | {}",
        localized(&treatment.medication, language),
        localized(&treatment.dosage, language),
        localized(&treatment.duration, language)
    ));
    lines.push(format!("  ! {}", localized(&treatment.warnings, language)));

    if let Some(guide) = &report.color_guide {
        lines.push(format!(
            "Droppings color: {}",
            localized(&guide.name, language)
        ));
        for entry in guide.diseases.iter().chain(&guide.conditions) {
            lines.push(format!("  - {} {}%", localized(&entry.name, language), entry.risk));
        }
        lines.push(format!("  ! {}", localized(&guide.intervention, language)));
    }

    lines.push("Confirm with:".to_string());
    for step in &report.confirmation {
        lines.push(format!("  - {}", localized(step, language)));
    }
    lines.push("Prevention:".to_string());
    for step in &report.prevention {
        lines.push(format!("  - {}", localized(step, language)));
    }
    lines.push(localized(&reasoning.disclaimer, language).to_string());

    lines.join("\n")
}

fn ranked_line(ranked: &RankedDisease, language: &str) -> String {
    format!(
        "{} {}%",
        localized(&ranked.profile.name, language),
        ranked.probability
    )
}

pub(crate) fn render_knowledge_base(knowledge: &KnowledgeBase, language: &str) -> String {
    let mut lines = vec![format!("Diseases ({})", knowledge.diseases().len())];
    for disease in knowledge.diseases() {
        lines.push(format!(
            "  {:<22} {:<28} base {:>5.1}% (range {}-{})",
            disease.id.as_str(),
            localized(&disease.name, language),
            disease.base_probability(),
            disease.min_base_accuracy,
            disease.max_base_accuracy
        ));
    }

    if !knowledge.breeds().is_empty() {
        lines.push(format!("Breeds ({})", knowledge.breeds().len()));
        for breed in knowledge.breeds() {
            lines.push(format!(
                "  {:<22} {:.1}-{:.1} kg",
                localized(&breed.name, language),
                breed.weight_range_kg.min,
                breed.weight_range_kg.max
            ));
        }
    }

    if !knowledge.feces_colors().is_empty() {
        lines.push(format!("Droppings colors ({})", knowledge.feces_colors().len()));
        for guide in knowledge.feces_colors() {
            let top_risk = guide
                .diseases
                .iter()
                .max_by_key(|entry| entry.risk)
                .map(|entry| format!("{} {}%", localized(&entry.name, language), entry.risk))
                .unwrap_or_default();
            lines.push(format!(
                "  {:<22} {}",
                localized(&guide.name, language),
                top_risk
            ));
        }
    }

    if !knowledge.neck_conditions().is_empty() {
        lines.push(format!("Neck conditions ({})", knowledge.neck_conditions().len()));
        for condition in knowledge.neck_conditions() {
            lines.push(format!(
                "  {:<32} {:?}",
                localized(&condition.name, language),
                condition.severity
            ));
        }
    }

    lines.join("\n")
}

pub(crate) fn render_batch(cases: &[(CaseRecord, DiagnosisResult)], language: &str) -> String {
    let mut lines = vec![format!("Diagnosed {} case(s)", cases.len())];
    let mut tally: BTreeMap<&str, usize> = BTreeMap::new();

    for (case, result) in cases {
        let observed = case
            .observed_on
            .map(|date| format!(" [{date}]"))
            .unwrap_or_default();
        let runner_up = result
            .alternatives
            .first()
            .map(|alternative| format!(" | next: {}", ranked_line(alternative, language)))
            .unwrap_or_default();
        lines.push(format!(
            "  {}{}: {}{}",
            case.case_id,
            observed,
            ranked_line(&result.top_disease, language),
            runner_up
        ));
        *tally
            .entry(localized(&result.top_disease.profile.name, language))
            .or_default() += 1;
    }

    if !tally.is_empty() {
        lines.push("Top diagnoses:".to_string());
        for (name, count) in tally {
            lines.push(format!("  {name}: {count}"));
        }
    }

    lines.join("\n")
}
