use crate::utils::validation::clamp;

/// Peak of the attraction curve: partners around 55% genetic dissimilarity
/// rate each other highest (Wedekind 1995 t-shirt study).
pub const DEFAULT_OPTIMAL_DISSIMILARITY: f64 = 0.55;

/// Substitute score when no genetic comparison was possible.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Map aggregate dissimilarity onto a 0-100 compatibility score.
///
/// The curve peaks at `optimal` and falls off linearly on both sides:
/// dissimilarity 0 and 2x optimal both score 0. Deliberately
/// non-monotonic; more dissimilar is not always better.
pub fn to_score(aggregate_dissimilarity: f64, optimal: f64) -> f64 {
    let distance = (aggregate_dissimilarity - optimal).abs();
    clamp(100.0 * (1.0 - distance / optimal), 0.0, 100.0)
}

/// Map an optional aggregate, substituting the neutral default for the
/// no-data sentinel instead of dividing by a zero-weight denominator.
pub fn to_score_or_neutral(aggregate: Option<f64>, optimal: f64) -> f64 {
    match aggregate {
        Some(d) => to_score(d, optimal),
        None => {
            tracing::info!("No genetic data to score; using neutral baseline");
            NEUTRAL_SCORE
        }
    }
}

pub fn interpret(score: f64) -> &'static str {
    if score >= 80.0 {
        "Excellent genetic diversity - strong potential for natural chemistry"
    } else if score >= 60.0 {
        "Good genetic diversity - likely positive olfactory attraction"
    } else if score >= 40.0 {
        "Moderate genetic overlap - neutral chemistry baseline"
    } else {
        "High genetic similarity - chemistry may develop through other factors"
    }
}
