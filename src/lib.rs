pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::toml_config::{ScoringSettings, ScoringToml};
pub use crate::config::CliConfig;
pub use crate::core::{engine::MatchEngine, MatchOutcome};
pub use crate::domain::model::{GeneticInput, PersonProfile, TraitKind, TraitProfile, TraitScore};
pub use crate::utils::error::{Result, ScoreError};
