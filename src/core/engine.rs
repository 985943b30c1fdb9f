use crate::core::{aggregate, allele, curve, dissimilarity, similarity};
use crate::domain::model::{GeneticCompatibility, GeneticInput, MatchOutcome, TraitCompatibility, TraitProfile};
use crate::domain::ports::ScoringConfigProvider;
use crate::utils::error::Result;

/// Runs the full scoring pipeline: genetic dissimilarity through the
/// attraction curve, trait similarity, and the weighted three-way fusion.
/// Stateless apart from its configuration; every call is independent.
pub struct MatchEngine<C: ScoringConfigProvider> {
    config: C,
}

impl<C: ScoringConfigProvider> MatchEngine<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    /// Compare two people from raw genetic text plus resolved trait
    /// profiles and an externally computed visual score.
    pub fn compare_raw(
        &self,
        genetic_a: &str,
        genetic_b: &str,
        traits_a: &TraitProfile,
        traits_b: &TraitProfile,
        visual_score: f64,
    ) -> Result<MatchOutcome> {
        let parsed_a = allele::parse(genetic_a);
        let parsed_b = allele::parse(genetic_b);
        self.compare(&parsed_a, &parsed_b, traits_a, traits_b, visual_score)
    }

    /// Compare two people from already-parsed inputs.
    pub fn compare(
        &self,
        genetic_a: &GeneticInput,
        genetic_b: &GeneticInput,
        traits_a: &TraitProfile,
        traits_b: &TraitProfile,
        visual_score: f64,
    ) -> Result<MatchOutcome> {
        tracing::info!("Calculating genetic dissimilarity...");
        let genetic = self.genetic_compatibility(genetic_a, genetic_b);
        tracing::info!("Genetic compatibility: {:.1}", genetic.score);

        tracing::info!("Calculating trait similarity...");
        let personality = self.trait_compatibility(traits_a, traits_b);
        tracing::info!("Personality similarity: {:.1}", personality.score);

        let overall = aggregate::aggregate(
            visual_score,
            personality.score,
            genetic.score,
            self.config.aggregate_weights(),
        )?;
        tracing::info!("Overall compatibility: {:.1}", overall.rounded());

        Ok(MatchOutcome {
            overall,
            genetic,
            personality,
            generated_at: chrono::Utc::now(),
        })
    }

    /// Genetic signal only: dissimilarity mapped through the attraction
    /// curve, neutral 50.0 when there is nothing to compare.
    pub fn genetic_compatibility(
        &self,
        a: &GeneticInput,
        b: &GeneticInput,
    ) -> GeneticCompatibility {
        let result = dissimilarity::dissimilarity(a, b, self.config.locus_weights());
        let score =
            curve::to_score_or_neutral(result.aggregate, self.config.optimal_dissimilarity());
        GeneticCompatibility {
            score,
            dissimilarity: result.aggregate,
            interpretation: curve::interpret(score).to_string(),
            breakdown: result.per_locus,
        }
    }

    /// Personality signal only.
    pub fn trait_compatibility(&self, a: &TraitProfile, b: &TraitProfile) -> TraitCompatibility {
        let result = similarity::similarity(a, b, self.config.trait_weights());
        TraitCompatibility {
            interpretation: similarity::interpret(result.score).to_string(),
            score: result.score,
            breakdown: result.breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        AggregateWeights, LocusWeights, TraitKind, TraitScore, TraitWeights,
    };

    struct FixedConfig {
        optimal: f64,
        locus_weights: LocusWeights,
        trait_weights: TraitWeights,
        aggregate_weights: AggregateWeights,
    }

    impl Default for FixedConfig {
        fn default() -> Self {
            Self {
                optimal: 0.55,
                locus_weights: LocusWeights::default(),
                trait_weights: TraitWeights::default(),
                aggregate_weights: AggregateWeights::default(),
            }
        }
    }

    impl ScoringConfigProvider for FixedConfig {
        fn optimal_dissimilarity(&self) -> f64 {
            self.optimal
        }
        fn locus_weights(&self) -> &LocusWeights {
            &self.locus_weights
        }
        fn trait_weights(&self) -> &TraitWeights {
            &self.trait_weights
        }
        fn aggregate_weights(&self) -> &AggregateWeights {
            &self.aggregate_weights
        }
    }

    #[test]
    fn empty_genetic_input_scores_neutral() {
        let engine = MatchEngine::new(FixedConfig::default());
        let genetic = engine.genetic_compatibility(&GeneticInput::Empty, &GeneticInput::Empty);
        assert_eq!(genetic.score, 50.0);
        assert_eq!(genetic.dissimilarity, None);
    }

    #[test]
    fn compare_raw_runs_full_pipeline() {
        let engine = MatchEngine::new(FixedConfig::default());
        let mut traits_a = TraitProfile::new();
        traits_a.insert(TraitKind::Wrath, TraitScore::new(3.0, 0.8));
        let mut traits_b = TraitProfile::new();
        traits_b.insert(TraitKind::Wrath, TraitScore::new(3.5, 0.9));

        let outcome = engine
            .compare_raw(
                "HLA-A*02:01 HLA-B*07:02",
                "HLA-A*02:01 HLA-B*44:03",
                &traits_a,
                &traits_b,
                80.0,
            )
            .unwrap();

        assert!(outcome.genetic.dissimilarity.is_some());
        assert!(outcome.personality.score > 0.0);
        assert_eq!(outcome.overall.components.visual.score, 80.0);
        assert!(outcome.overall.overall_score > 0.0 && outcome.overall.overall_score <= 100.0);
    }

    #[test]
    fn bad_aggregate_weights_surface_as_error() {
        let config = FixedConfig {
            aggregate_weights: AggregateWeights {
                visual: 60.0,
                personality: 60.0,
                genetic: 60.0,
            },
            ..FixedConfig::default()
        };
        let engine = MatchEngine::new(config);
        let result = engine.compare(
            &GeneticInput::Empty,
            &GeneticInput::Empty,
            &TraitProfile::new(),
            &TraitProfile::new(),
            50.0,
        );
        assert!(result.is_err());
    }
}
