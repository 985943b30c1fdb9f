pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "harmonia")]
#[command(about = "Multi-factor compatibility scoring between two people")]
pub struct CliConfig {
    /// Raw genetic data for person A (manual HLA notation or DNA export)
    #[arg(long)]
    pub genetic_a: Option<PathBuf>,

    /// Raw genetic data for person B
    #[arg(long)]
    pub genetic_b: Option<PathBuf>,

    /// JSON file with both people's trait profiles
    #[arg(long)]
    pub profiles: Option<PathBuf>,

    /// Externally computed visual attraction score (0-100)
    #[arg(long, default_value = "50.0")]
    pub visual_score: f64,

    /// Scoring constants TOML file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the visual component weight (percent)
    #[arg(long)]
    pub visual_weight: Option<f64>,

    /// Override the personality component weight (percent)
    #[arg(long)]
    pub personality_weight: Option<f64>,

    /// Override the genetic component weight (percent)
    #[arg(long)]
    pub genetic_weight: Option<f64>,

    /// Override the optimal genetic dissimilarity (0-1)
    #[arg(long)]
    pub optimal: Option<f64>,

    /// Write the JSON result here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_range("visual_score", self.visual_score, 0.0, 100.0)?;

        if let Some(optimal) = self.optimal {
            validation::validate_range("optimal", optimal, 0.01, 1.0)?;
        }

        for (name, weight) in [
            ("visual_weight", self.visual_weight),
            ("personality_weight", self.personality_weight),
            ("genetic_weight", self.genetic_weight),
        ] {
            if let Some(w) = weight {
                validation::validate_range(name, w, 0.0, 100.0)?;
            }
        }

        Ok(())
    }
}
