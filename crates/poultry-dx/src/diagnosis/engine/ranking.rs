use super::DiseaseScore;

/// Reported probabilities never claim certainty.
pub const MAX_REPORTED_PROBABILITY: f64 = 95.0;

pub const MAX_ALTERNATIVES: usize = 3;

/// Rounds an adjusted probability and clamps it to the reporting ceiling.
pub fn capped_probability(adjusted: f64) -> u8 {
    adjusted.round().clamp(0.0, MAX_REPORTED_PROBABILITY) as u8
}

/// Index of the highest adjusted probability; the earliest entry wins ties.
pub(crate) fn select_top(scores: &[DiseaseScore]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, score) in scores.iter().enumerate() {
        let improves = match best {
            Some(current) => score.adjusted_probability > scores[current].adjusted_probability,
            None => true,
        };
        if improves {
            best = Some(index);
        }
    }
    best
}

/// Indices of the runners-up ordered by capped probability, descending.
/// The sort is stable so equal scores keep table order.
pub(crate) fn rank_alternatives(scores: &[DiseaseScore], top: usize) -> Vec<usize> {
    let mut candidates: Vec<usize> = (0..scores.len()).filter(|index| *index != top).collect();
    candidates.sort_by(|a, b| {
        let a = capped_probability(scores[*a].adjusted_probability);
        let b = capped_probability(scores[*b].adjusted_probability);
        b.cmp(&a)
    });
    candidates.truncate(MAX_ALTERNATIVES);
    candidates
}

/// Mean of the uncapped adjusted probabilities across the whole table,
/// rounded and capped. This tracks the evidence set as a whole rather than
/// the strength of the winning diagnosis.
pub(crate) fn overall_confidence(scores: &[DiseaseScore]) -> u8 {
    if scores.is_empty() {
        return 0;
    }
    let total: f64 = scores.iter().map(|score| score.adjusted_probability).sum();
    capped_probability(total / scores.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::domain::DiseaseId;

    fn score(id: &str, adjusted: f64) -> DiseaseScore {
        DiseaseScore {
            disease_id: DiseaseId::new(id),
            base_probability: adjusted,
            adjusted_probability: adjusted,
            fired_factors: Vec::new(),
        }
    }

    #[test]
    fn capping_rounds_half_up_and_clamps() {
        assert_eq!(capped_probability(150.15), 95);
        assert_eq!(capped_probability(95.4), 95);
        assert_eq!(capped_probability(22.75), 23);
        assert_eq!(capped_probability(22.5), 23);
        assert_eq!(capped_probability(9.0), 9);
        assert_eq!(capped_probability(0.0), 0);
    }

    #[test]
    fn top_selection_prefers_first_on_ties() {
        let scores = vec![score("a", 40.0), score("b", 60.0), score("c", 60.0)];
        assert_eq!(select_top(&scores), Some(1));
        assert_eq!(select_top(&[]), None);
    }

    #[test]
    fn top_selection_handles_all_zero_scores() {
        let scores = vec![score("a", 0.0), score("b", 0.0)];
        assert_eq!(select_top(&scores), Some(0));
    }

    #[test]
    fn alternatives_use_capped_scores_with_stable_ties() {
        // 95.4 and 120 both cap to 95, so table order decides.
        let scores = vec![
            score("top", 200.0),
            score("low", 10.0),
            score("capped-a", 95.4),
            score("capped-b", 120.0),
            score("mid", 50.0),
        ];
        let alternatives = rank_alternatives(&scores, 0);
        assert_eq!(alternatives, vec![2, 3, 4]);
    }

    #[test]
    fn alternatives_shrink_with_small_tables() {
        let scores = vec![score("a", 10.0), score("b", 20.0)];
        assert_eq!(rank_alternatives(&scores, 1), vec![0]);
        assert!(rank_alternatives(&scores[..1], 0).is_empty());
    }

    #[test]
    fn overall_confidence_averages_uncapped_values() {
        let scores = vec![score("a", 150.0), score("b", 10.0)];
        assert_eq!(overall_confidence(&scores), 80);

        let scores = vec![score("a", 300.0), score("b", 100.0)];
        assert_eq!(overall_confidence(&scores), 95);
    }
}
