// Adapters layer: concrete implementations of the domain ports used by the
// CLI and tests. The external classifier/vision services themselves live
// outside this crate.

use crate::domain::model::{PersonProfile, TraitAssessment, TraitKind, TraitProfile, TraitScore};
use crate::domain::ports::{ProfileRepository, TraitClassifier};
use crate::utils::error::{Result, ScoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local profile store with atomic get/put semantics.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<String, PersonProfile>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileStore {
    async fn get(&self, id: &str) -> Result<Option<PersonProfile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(id).cloned())
    }

    async fn put(&self, profile: PersonProfile) -> Result<()> {
        let mut profiles = self.profiles.write().await;
        profiles.insert(profile.id.clone(), profile);
        Ok(())
    }
}

/// Ordered list of classifier providers; the first one that succeeds wins.
/// When every provider fails the caller gets a single
/// [`ScoreError::ClassifierUnavailable`] and treats the traits as missing
/// data, never a partial result.
pub struct ClassifierChain {
    providers: Vec<Box<dyn TraitClassifier>>,
}

impl ClassifierChain {
    pub fn new(providers: Vec<Box<dyn TraitClassifier>>) -> Self {
        Self { providers }
    }
}

#[async_trait]
impl TraitClassifier for ClassifierChain {
    async fn classify(&self, question: &str, answer: &str) -> Result<TraitAssessment> {
        for (index, provider) in self.providers.iter().enumerate() {
            match provider.classify(question, answer).await {
                Ok(assessment) => {
                    if index > 0 {
                        tracing::info!("Classifier fallback #{} succeeded", index + 1);
                    }
                    return Ok(assessment);
                }
                Err(e) => {
                    tracing::warn!("Classifier provider #{} failed: {}", index + 1, e);
                }
            }
        }
        Err(ScoreError::ClassifierUnavailable {
            attempts: self.providers.len(),
        })
    }
}

/// Average per-question assessments into one profile: mean value and mean
/// confidence per trait. Traits no assessment mentions stay absent and
/// fall back to neutral at comparison time.
pub fn profile_from_assessments(assessments: &[TraitAssessment]) -> TraitProfile {
    let mut profile = TraitProfile::new();
    for kind in TraitKind::ALL {
        let scored: Vec<&TraitScore> = assessments.iter().filter_map(|a| a.get(kind)).collect();
        if scored.is_empty() {
            continue;
        }
        let n = scored.len() as f64;
        let value = scored.iter().map(|s| s.value).sum::<f64>() / n;
        let confidence = scored.iter().map(|s| s.confidence).sum::<f64>() / n;
        profile.insert(kind, TraitScore::new(value, confidence));
    }
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingClassifier;
    struct FixedClassifier(f64);

    #[async_trait]
    impl TraitClassifier for FailingClassifier {
        async fn classify(&self, _question: &str, _answer: &str) -> Result<TraitAssessment> {
            Err(ScoreError::ProcessingError {
                message: "model overloaded".to_string(),
            })
        }
    }

    #[async_trait]
    impl TraitClassifier for FixedClassifier {
        async fn classify(&self, _question: &str, _answer: &str) -> Result<TraitAssessment> {
            let mut assessment = TraitAssessment::new();
            assessment.insert(TraitKind::Pride, TraitScore::new(self.0, 0.9));
            Ok(assessment)
        }
    }

    #[tokio::test]
    async fn store_roundtrips_profiles() {
        let store = InMemoryProfileStore::new();
        assert!(store.get("alice").await.unwrap().is_none());

        store
            .put(PersonProfile {
                id: "alice".to_string(),
                name: Some("Alice".to_string()),
                traits: TraitProfile::new(),
                genetic: None,
                visual_features: None,
            })
            .await
            .unwrap();

        let fetched = store.get("alice").await.unwrap().unwrap();
        assert_eq!(fetched.name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn put_replaces_existing_profile() {
        let store = InMemoryProfileStore::new();
        for name in ["old", "new"] {
            store
                .put(PersonProfile {
                    id: "bob".to_string(),
                    name: Some(name.to_string()),
                    traits: TraitProfile::new(),
                    genetic: None,
                    visual_features: None,
                })
                .await
                .unwrap();
        }
        let fetched = store.get("bob").await.unwrap().unwrap();
        assert_eq!(fetched.name.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn chain_returns_first_success() {
        let chain = ClassifierChain::new(vec![
            Box::new(FailingClassifier),
            Box::new(FixedClassifier(2.0)),
            Box::new(FixedClassifier(4.0)),
        ]);
        let assessment = chain.classify("q", "a").await.unwrap();
        assert_eq!(assessment.get(TraitKind::Pride).unwrap().value, 2.0);
    }

    #[tokio::test]
    async fn chain_with_all_failures_is_unavailable() {
        let chain =
            ClassifierChain::new(vec![Box::new(FailingClassifier), Box::new(FailingClassifier)]);
        match chain.classify("q", "a").await {
            Err(ScoreError::ClassifierUnavailable { attempts }) => assert_eq!(attempts, 2),
            other => panic!("expected ClassifierUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn assessments_average_per_trait() {
        let mut first = TraitAssessment::new();
        first.insert(TraitKind::Greed, TraitScore::new(2.0, 0.8));
        let mut second = TraitAssessment::new();
        second.insert(TraitKind::Greed, TraitScore::new(4.0, 0.6));
        second.insert(TraitKind::Envy, TraitScore::new(-1.0, 0.9));

        let profile = profile_from_assessments(&[first, second]);
        let greed = profile.get(TraitKind::Greed).unwrap();
        assert_eq!(greed.value, 3.0);
        assert!((greed.confidence - 0.7).abs() < 1e-9);
        assert_eq!(profile.get(TraitKind::Envy).unwrap().value, -1.0);
        assert!(profile.get(TraitKind::Wrath).is_none());
    }
}
