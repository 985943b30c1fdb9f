use crate::config::CliConfig;
use crate::core::curve::DEFAULT_OPTIMAL_DISSIMILARITY;
use crate::domain::model::{AggregateWeights, LocusWeights, TraitKind, TraitWeights};
use crate::domain::ports::ScoringConfigProvider;
use crate::utils::error::{Result, ScoreError};
use crate::utils::validation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// On-disk shape of the tunable scoring constants. Every section and field
/// is optional; anything absent falls back to the research defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringToml {
    pub genetic: Option<GeneticSection>,
    pub traits: Option<TraitSection>,
    pub aggregate: Option<AggregateSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneticSection {
    pub optimal_dissimilarity: Option<f64>,
    pub locus_weights: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraitSection {
    pub weights: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateSection {
    pub visual: Option<f64>,
    pub personality: Option<f64>,
    pub genetic: Option<f64>,
}

impl ScoringToml {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScoreError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ScoreError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }
}

/// Substitute ${VAR_NAME} references with environment values; unknown
/// variables are left verbatim.
fn substitute_env_vars(content: &str) -> String {
    use regex::Regex;
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}

/// Fully materialized scoring constants, handed to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringSettings {
    pub optimal_dissimilarity: f64,
    pub locus_weights: LocusWeights,
    pub trait_weights: TraitWeights,
    pub aggregate_weights: AggregateWeights,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            optimal_dissimilarity: DEFAULT_OPTIMAL_DISSIMILARITY,
            locus_weights: LocusWeights::default(),
            trait_weights: TraitWeights::default(),
            aggregate_weights: AggregateWeights::default(),
        }
    }
}

impl ScoringSettings {
    /// Layer a TOML file over the defaults.
    pub fn from_toml(toml: &ScoringToml) -> Self {
        let mut settings = Self::default();

        if let Some(genetic) = &toml.genetic {
            if let Some(optimal) = genetic.optimal_dissimilarity {
                settings.optimal_dissimilarity = optimal;
            }
            if let Some(weights) = &genetic.locus_weights {
                settings.locus_weights = weights
                    .iter()
                    .map(|(locus, w)| (locus.clone(), *w))
                    .collect();
            }
        }

        if let Some(traits) = &toml.traits {
            if let Some(weights) = &traits.weights {
                // Unknown trait names are ignored, matching how unknown
                // loci are treated in the genetic table.
                settings.trait_weights = weights
                    .iter()
                    .filter_map(|(name, w)| {
                        name.parse::<TraitKind>()
                            .map_err(|e| tracing::warn!("Skipping trait weight: {}", e))
                            .ok()
                            .map(|kind| (kind, *w))
                    })
                    .collect();
            }
        }

        if let Some(aggregate) = &toml.aggregate {
            let defaults = AggregateWeights::default();
            settings.aggregate_weights = AggregateWeights {
                visual: aggregate.visual.unwrap_or(defaults.visual),
                personality: aggregate.personality.unwrap_or(defaults.personality),
                genetic: aggregate.genetic.unwrap_or(defaults.genetic),
            };
        }

        settings
    }

    /// Layer individual CLI flag overrides over whatever was loaded.
    pub fn apply_cli_overrides(mut self, cli: &CliConfig) -> Self {
        if let Some(optimal) = cli.optimal {
            self.optimal_dissimilarity = optimal;
        }
        if let Some(w) = cli.visual_weight {
            self.aggregate_weights.visual = w;
        }
        if let Some(w) = cli.personality_weight {
            self.aggregate_weights.personality = w;
        }
        if let Some(w) = cli.genetic_weight {
            self.aggregate_weights.genetic = w;
        }
        self
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_range(
            "genetic.optimal_dissimilarity",
            self.optimal_dissimilarity,
            0.01,
            1.0,
        )?;

        for (locus, weight) in self.locus_weights.iter() {
            validation::validate_positive_weight(&format!("genetic.locus_weights.{}", locus), weight)?;
        }

        for (kind, weight) in self.trait_weights.iter() {
            validation::validate_positive_weight(&format!("traits.weights.{}", kind), weight)?;
        }

        validation::validate_weight_sum(&[
            self.aggregate_weights.visual,
            self.aggregate_weights.personality,
            self.aggregate_weights.genetic,
        ])?;

        Ok(())
    }
}

impl ScoringConfigProvider for ScoringSettings {
    fn optimal_dissimilarity(&self) -> f64 {
        self.optimal_dissimilarity
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
