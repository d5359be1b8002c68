use std::sync::Arc;
use std::thread;

use poultry_dx::diagnosis::knowledge::ids;
use poultry_dx::diagnosis::{
    ChickenSymptom, DiagnosisEngine, DiagnosisError, DiagnosisResult, DiseaseId, DiseaseProfile,
    EvidenceInput, EvidenceRule, FecesConsistency, FecesSymptom, KnowledgeBase, LocalizedText,
};

fn standard_engine() -> DiagnosisEngine {
    DiagnosisEngine::new(Arc::new(KnowledgeBase::standard()))
}

fn profile(id: &str, min: f64, max: f64) -> DiseaseProfile {
    DiseaseProfile {
        id: DiseaseId::new(id),
        name: LocalizedText::en_ar(id, id),
        min_base_accuracy: min,
        max_base_accuracy: max,
        description: LocalizedText::default(),
        clues: Vec::new(),
        treatment: None,
    }
}

fn engine_with(profiles: Vec<DiseaseProfile>) -> DiagnosisEngine {
    let knowledge = KnowledgeBase::new(profiles, Vec::new()).expect("valid table");
    DiagnosisEngine::new(Arc::new(knowledge))
}

fn ids_of(result: &DiagnosisResult) -> Vec<&str> {
    result
        .alternatives
        .iter()
        .map(|ranked| ranked.disease_id.as_str())
        .collect()
}

fn every_evidence_combination() -> Vec<EvidenceInput> {
    let mut combos = Vec::new();
    for age in [0.0, 1.5, 2.0, 3.0, 4.5, 6.0, 6.5, 20.0] {
        for consistency in FecesConsistency::ordered() {
            for mask in 0u8..16 {
                let mut evidence = EvidenceInput::at_age(age).with_consistency(consistency);
                if mask & 1 != 0 {
                    evidence = evidence.with_feces_symptom(FecesSymptom::Blood);
                }
                if mask & 2 != 0 {
                    evidence = evidence.with_feces_symptom(FecesSymptom::Mucus);
                }
                if mask & 4 != 0 {
                    evidence = evidence.with_chicken_symptom(ChickenSymptom::WeightLoss);
                }
                if mask & 8 != 0 {
                    evidence = evidence.with_chicken_symptom(ChickenSymptom::GaitDisorder);
                }
                combos.push(evidence);
            }
        }
    }
    combos
}

#[test]
fn no_evidence_ranks_by_base_probability() {
    let result = standard_engine()
        .evaluate(&EvidenceInput::at_age(10.0))
        .expect("evaluates");

    let top = &result.top_disease;
    assert_eq!(top.disease_id.as_str(), ids::COCCIDIOSIS);
    assert_eq!(top.base_probability, 82.5);
    assert_eq!(top.adjusted_probability, 82.5);
    assert_eq!(top.probability, 83);
    assert!(top.fired_factors.is_empty());

    assert_eq!(
        ids_of(&result),
        vec![ids::NECROTIC_ENTERITIS, ids::SALMONELLOSIS, ids::HISTOMONIASIS]
    );
    assert_eq!(result.overall_confidence, 21);
}

#[test]
fn bloody_feces_at_four_weeks_caps_coccidiosis() {
    let evidence = EvidenceInput::at_age(4.0).with_feces_symptom(FecesSymptom::Blood);
    let result = standard_engine().evaluate(&evidence).expect("evaluates");

    let top = &result.top_disease;
    assert_eq!(top.disease_id.as_str(), ids::COCCIDIOSIS);
    assert!((top.adjusted_probability - 150.15).abs() < 1e-9);
    assert_eq!(top.probability, 95);
    let rules: Vec<EvidenceRule> = top.fired_factors.iter().map(|factor| factor.rule).collect();
    assert_eq!(
        rules,
        vec![EvidenceRule::BloodyFeces, EvidenceRule::AgeThreeToSixWeeks]
    );
    assert_eq!(
        top.fired_factors[0].reason.get("en"),
        Some("Bloody feces")
    );

    let necrotic = &result.alternatives[0];
    assert_eq!(necrotic.disease_id.as_str(), ids::NECROTIC_ENTERITIS);
    assert!((necrotic.adjusted_probability - 48.0).abs() < 1e-9);
    assert_eq!(result.overall_confidence, 27);
}

#[test]
fn watery_feces_do_not_overtake_coccidiosis() {
    let evidence = EvidenceInput::at_age(15.0).with_consistency(FecesConsistency::Watery);
    let engine = standard_engine();
    let result = engine.evaluate(&evidence).expect("evaluates");

    assert_eq!(result.top_disease.disease_id.as_str(), ids::COCCIDIOSIS);
    assert_eq!(result.top_disease.probability, 83);

    let salmonella = &result.alternatives[1];
    assert_eq!(salmonella.disease_id.as_str(), ids::SALMONELLOSIS);
    assert!((salmonella.adjusted_probability - 22.75).abs() < 1e-9);
    assert_eq!(salmonella.probability, 23);

    let scores = engine.scores(&evidence).expect("scores");
    let viral = scores
        .iter()
        .find(|score| score.disease_id.as_str() == ids::VIRAL_ENTERITIS)
        .expect("viral enteritis scored");
    assert!((viral.adjusted_probability - 9.0).abs() < 1e-9);
}

#[test]
fn evaluation_is_deterministic() {
    let engine = standard_engine();
    let evidence = EvidenceInput::at_age(1.0)
        .with_feces_symptom(FecesSymptom::Mucus)
        .with_chicken_symptom(ChickenSymptom::WeightLoss)
        .with_consistency(FecesConsistency::Watery);

    let first = engine.evaluate(&evidence).expect("evaluates");
    let second = engine.evaluate(&evidence).expect("evaluates");
    assert_eq!(first, second);
}

#[test]
fn reported_probabilities_stay_within_bounds() {
    let engine = standard_engine();
    for evidence in every_evidence_combination() {
        let result = engine.evaluate(&evidence).expect("evaluates");
        assert!(result.overall_confidence <= 95);
        for ranked in result.candidates() {
            assert!(ranked.probability <= 95);
            assert!(ranked.adjusted_probability >= ranked.base_probability);
        }
    }
}

#[test]
fn adding_evidence_never_lowers_a_score() {
    let engine = standard_engine();
    let baseline = engine.scores(&EvidenceInput::at_age(8.0)).expect("scores");
    let enriched = engine
        .scores(
            &EvidenceInput::at_age(8.0)
                .with_feces_symptom(FecesSymptom::Blood)
                .with_feces_symptom(FecesSymptom::Mucus)
                .with_chicken_symptom(ChickenSymptom::WeightLoss)
                .with_chicken_symptom(ChickenSymptom::GaitDisorder)
                .with_consistency(FecesConsistency::Watery),
        )
        .expect("scores");

    for (before, after) in baseline.iter().zip(&enriched) {
        assert_eq!(before.disease_id, after.disease_id);
        assert!(after.adjusted_probability >= before.adjusted_probability);
    }
}

#[test]
fn ranking_is_consistent_with_probabilities() {
    let engine = standard_engine();
    for evidence in every_evidence_combination() {
        let result = engine.evaluate(&evidence).expect("evaluates");
        let top = result.top_disease.probability;
        let mut previous = u8::MAX;
        for alternative in &result.alternatives {
            assert!(alternative.probability <= top);
            assert!(alternative.probability <= previous);
            assert_ne!(alternative.disease_id, result.top_disease.disease_id);
            previous = alternative.probability;
        }
        assert_eq!(result.alternatives.len(), 3);
    }
}

#[test]
fn small_tables_limit_alternatives() {
    let engine = engine_with(vec![profile("alpha", 10.0, 20.0), profile("beta", 30.0, 40.0)]);
    let result = engine.evaluate(&EvidenceInput::at_age(10.0)).expect("evaluates");
    assert_eq!(result.top_disease.disease_id.as_str(), "beta");
    assert_eq!(ids_of(&result), vec!["alpha"]);

    let engine = engine_with(vec![
        profile("alpha", 10.0, 20.0),
        profile("beta", 30.0, 40.0),
        profile("gamma", 0.0, 10.0),
    ]);
    let result = engine.evaluate(&EvidenceInput::at_age(10.0)).expect("evaluates");
    assert_eq!(ids_of(&result), vec!["alpha", "gamma"]);
}

#[test]
fn single_disease_table_has_no_alternatives() {
    let engine = engine_with(vec![profile("only", 40.0, 60.0)]);
    let result = engine.evaluate(&EvidenceInput::at_age(3.0)).expect("evaluates");
    assert_eq!(result.top_disease.disease_id.as_str(), "only");
    assert!(result.alternatives.is_empty());
    assert_eq!(result.overall_confidence, 50);
}

#[test]
fn ties_resolve_to_table_order() {
    let engine = engine_with(vec![
        profile("first", 20.0, 40.0),
        profile("second", 25.0, 35.0),
        profile("third", 30.0, 30.0),
    ]);
    let result = engine.evaluate(&EvidenceInput::at_age(10.0)).expect("evaluates");
    assert_eq!(result.top_disease.disease_id.as_str(), "first");
    assert_eq!(ids_of(&result), vec!["second", "third"]);
}

#[test]
fn injected_tables_coexist() {
    let standard = standard_engine();
    let custom = engine_with(vec![profile(ids::SALMONELLOSIS, 90.0, 95.0)]);
    let evidence = EvidenceInput::at_age(10.0).with_consistency(FecesConsistency::Watery);

    let standard_result = standard.evaluate(&evidence).expect("evaluates");
    let custom_result = custom.evaluate(&evidence).expect("evaluates");

    assert_eq!(standard_result.top_disease.disease_id.as_str(), ids::COCCIDIOSIS);
    assert_eq!(custom_result.top_disease.disease_id.as_str(), ids::SALMONELLOSIS);
    assert_eq!(custom_result.top_disease.probability, 95);
}

#[test]
fn empty_table_is_rejected() {
    let engine = engine_with(Vec::new());
    let error = engine
        .evaluate(&EvidenceInput::at_age(4.0))
        .expect_err("no diseases");
    assert!(matches!(error, DiagnosisError::Configuration(_)));
}

#[test]
fn results_survive_a_json_round_trip() {
    let evidence = EvidenceInput::at_age(4.0)
        .with_feces_symptom(FecesSymptom::Blood)
        .with_chicken_symptom(ChickenSymptom::GaitDisorder);
    let result = standard_engine().evaluate(&evidence).expect("evaluates");

    let encoded = serde_json::to_string(&result).expect("serializes");
    let decoded: DiagnosisResult = serde_json::from_str(&encoded).expect("deserializes");

    assert_eq!(decoded, result);
    assert_eq!(
        decoded.top_disease.adjusted_probability.to_bits(),
        result.top_disease.adjusted_probability.to_bits()
    );
}

#[test]
fn concurrent_evaluations_share_one_engine() {
    let engine = standard_engine();
    let evidence = EvidenceInput::at_age(4.0).with_feces_symptom(FecesSymptom::Blood);
    let expected = engine.evaluate(&evidence).expect("evaluates");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = engine.clone();
            let evidence = evidence.clone();
            thread::spawn(move || engine.evaluate(&evidence).expect("evaluates"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread completes"), expected);
    }
}
