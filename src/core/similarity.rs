use crate::domain::model::{
    SimilarityResult, TraitDetail, TraitDirection, TraitKind, TraitProfile, TraitWeights,
};
use std::collections::BTreeMap;

/// Threshold beyond neutral a score must clear before it counts as an
/// extreme direction.
const DIRECTION_THRESHOLD: f64 = 1.0;

/// Trait scores live in [-5, 5], so two qualifying scores are at most
/// 10 apart.
const MAX_SCORE_SPREAD: f64 = 10.0;

/// Compare two trait profiles using the positive-overlap rule.
///
/// A trait contributes only when both people sit strictly on the same
/// extreme side of neutral (both above +1 or both below -1). Qualifying
/// traits contribute closeness x weight x mean confidence; everything else
/// contributes zero. The denominator always uses every trait's weight, so
/// a perfect score needs every trait to qualify.
pub fn similarity(a: &TraitProfile, b: &TraitProfile, weights: &TraitWeights) -> SimilarityResult {
    let max_possible = weights.total();
    let mut accumulated = 0.0;
    let mut breakdown = BTreeMap::new();

    for kind in TraitKind::ALL {
        let score_a = a.get_or_neutral(kind);
        let score_b = b.get_or_neutral(kind);
        let (sa, sb) = (score_a.value, score_b.value);

        let both_high = sa > DIRECTION_THRESHOLD && sb > DIRECTION_THRESHOLD;
        let both_low = sa < -DIRECTION_THRESHOLD && sb < -DIRECTION_THRESHOLD;

        let detail = if both_high || both_low {
            let trait_similarity = (1.0 - (sa - sb).abs() / MAX_SCORE_SPREAD).max(0.0);
            let avg_confidence = (score_a.confidence + score_b.confidence) / 2.0;
            let contribution = trait_similarity * weights.get(kind) * avg_confidence;
            accumulated += contribution;

            tracing::debug!(
                "{}: same direction, contribution {:.3}",
                kind,
                contribution
            );

            TraitDetail {
                direction: if both_high {
                    TraitDirection::HighVice
                } else {
                    TraitDirection::HighVirtue
                },
                score_a: sa,
                score_b: sb,
                contribution,
            }
        } else {
            TraitDetail {
                direction: TraitDirection::Divergent,
                score_a: sa,
                score_b: sb,
                contribution: 0.0,
            }
        };

        breakdown.insert(kind, detail);
    }

    let score = if max_possible > 0.0 {
        100.0 * accumulated / max_possible
    } else {
        0.0
    };

    SimilarityResult { score, breakdown }
}

pub fn interpret(score: f64) -> &'static str {
    if score >= 70.0 {
        "Strong perceived similarity - aligned temperaments"
    } else if score >= 40.0 {
        "Moderate perceived similarity - some shared tendencies"
    } else if score >= 15.0 {
        "Mild perceived similarity - mostly independent temperaments"
    } else {
        "Low perceived similarity - divergent temperaments"
    }
}
