pub mod aggregate;
pub mod allele;
pub mod curve;
pub mod dissimilarity;
pub mod engine;
pub mod similarity;

pub use crate::core::engine::MatchEngine;
pub use crate::domain::model::{DissimilarityResult, GeneticInput, MatchOutcome, SimilarityResult};
pub use crate::domain::ports::ScoringConfigProvider;
pub use crate::utils::error::Result;
