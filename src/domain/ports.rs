use crate::domain::model::{
    AggregateWeights, LocusWeights, PersonProfile, TraitAssessment, TraitWeights,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Tunable scoring constants, decoupled from where they were loaded
/// (CLI flags, TOML file, defaults).
pub trait ScoringConfigProvider: Send + Sync {
    fn optimal_dissimilarity(&self) -> f64;
    fn locus_weights(&self) -> &LocusWeights;
    fn trait_weights(&self) -> &TraitWeights;
    fn aggregate_weights(&self) -> &AggregateWeights;
}

/// Profile storage seam. Implementations must provide atomic get/put; the
/// scoring core only ever consumes the snapshot it is handed.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<PersonProfile>>;
    async fn put(&self, profile: PersonProfile) -> Result<()>;
}

/// External personality classifier. One call scores a single
/// (question, answer) pair across all seven traits; the engine never sees
/// partial failures, only a resolved assessment or an error.
#[async_trait]
pub trait TraitClassifier: Send + Sync {
    async fn classify(&self, question: &str, answer: &str) -> Result<TraitAssessment>;
}

/// External vision collaborator. Returns an opaque mutual-attraction score
/// in [0, 100]; the scoring core never inspects how it was produced.
#[async_trait]
pub trait VisualAnalyzer: Send + Sync {
    async fn mutual_attraction(
        &self,
        features_a: &serde_json::Value,
        features_b: &serde_json::Value,
    ) -> Result<f64>;
}
