use crate::domain::model::{AggregateWeights, ComponentBreakdown, ComponentScore, OverallResult};
use crate::utils::error::Result;
use crate::utils::validation::{clamp, validate_weight_sum};

/// Fuse the three component scores into one overall figure.
///
/// Weights are percentages and must sum to 100; a bad weight set is a
/// caller configuration error, never silently renormalized. Component
/// scores are clamped to [0, 100] since upstream output is not fully
/// trusted. The overall score is kept at full precision; rounding is a
/// display concern.
pub fn aggregate(
    visual_score: f64,
    personality_score: f64,
    genetic_score: f64,
    weights: &AggregateWeights,
) -> Result<OverallResult> {
    validate_weight_sum(&[weights.visual, weights.personality, weights.genetic])?;

    let visual = clamp(visual_score, 0.0, 100.0);
    let personality = clamp(personality_score, 0.0, 100.0);
    let genetic = clamp(genetic_score, 0.0, 100.0);

    let overall_score = visual * weights.visual / 100.0
        + personality * weights.personality / 100.0
        + genetic * weights.genetic / 100.0;

    tracing::debug!(
        "Overall {:.1} (visual {:.1}, personality {:.1}, genetic {:.1})",
        overall_score,
        visual,
        personality,
        genetic
    );

    Ok(OverallResult {
        overall_score,
        components: ComponentBreakdown {
            visual: ComponentScore {
                score: visual,
                weight: weights.visual,
            },
            personality: ComponentScore {
                score: personality,
                weight: weights.personality,
            },
            genetic: ComponentScore {
                score: genetic,
                weight: weights.genetic,
            },
        },
    })
}
