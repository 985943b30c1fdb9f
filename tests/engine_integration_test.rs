use harmonia::adapters::{profile_from_assessments, ClassifierChain, InMemoryProfileStore};
use harmonia::domain::model::TraitAssessment;
use harmonia::domain::ports::{ProfileRepository, TraitClassifier};
use harmonia::{
    GeneticInput, MatchEngine, PersonProfile, ScoringSettings, ScoringToml, TraitKind,
    TraitProfile, TraitScore,
};
use tempfile::TempDir;

fn full_profile(value: f64, confidence: f64) -> TraitProfile {
    let mut profile = TraitProfile::new();
    for kind in TraitKind::ALL {
        profile.insert(kind, TraitScore::new(value, confidence));
    }
    profile
}

#[test]
fn identical_people_score_zero_genetic_and_full_personality() {
    let engine = MatchEngine::new(ScoringSettings::default());
    let genetic = "HLA-A*02:01, HLA-B*07:02, HLA-C*04:01";
    let traits = full_profile(3.0, 1.0);

    let outcome = engine
        .compare_raw(genetic, genetic, &traits, &traits, 80.0)
        .unwrap();

    // Zero dissimilarity sits at the far end of the attraction curve.
    assert_eq!(outcome.genetic.dissimilarity, Some(0.0));
    assert_eq!(outcome.genetic.score, 0.0);
    assert!((outcome.personality.score - 100.0).abs() < 1e-9);

    // 80*0.5 + 100*0.35 + 0*0.15 = 75.0
    assert!((outcome.overall.overall_score - 75.0).abs() < 1e-9);
    assert_eq!(outcome.overall.rounded(), 75.0);
}

#[test]
fn fully_disjoint_single_locus_scores_near_eighteen() {
    let engine = MatchEngine::new(ScoringSettings::default());
    let outcome = engine
        .compare_raw(
            "HLA-B*07:02",
            "HLA-B*44:03",
            &TraitProfile::new(),
            &TraitProfile::new(),
            50.0,
        )
        .unwrap();

    assert_eq!(outcome.genetic.dissimilarity, Some(1.0));
    assert!((outcome.genetic.score - 18.18).abs() < 0.01);
}

#[test]
fn missing_genetic_data_falls_back_to_neutral_baseline() {
    let engine = MatchEngine::new(ScoringSettings::default());
    let outcome = engine
        .compare_raw("", "", &TraitProfile::new(), &TraitProfile::new(), 70.0)
        .unwrap();

    assert_eq!(outcome.genetic.dissimilarity, None);
    assert_eq!(outcome.genetic.score, 50.0);
    assert!(outcome.genetic.breakdown.is_empty());

    // 70*0.5 + 0*0.35 + 50*0.15 = 42.5
    assert!((outcome.overall.overall_score - 42.5).abs() < 1e-9);
}

#[test]
fn snp_export_files_flow_through_the_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let path_a = temp_dir.path().join("person_a.txt");
    let path_b = temp_dir.path().join("person_b.csv");

    std::fs::write(
        &path_a,
        "# 23andMe export\n\
         rsid\tchromosome\tposition\tgenotype\n\
         rs2523393\t6\t29910000\tAG\n\
         rs2596542\t6\t31350000\tTT\n\
         rs9277535\t6\t33050000\tCC\n\
         rs999\t1\t29910000\tAA\n",
    )
    .unwrap();
    std::fs::write(
        &path_b,
        "rsid,chromosome,position,allele1,allele2\n\
         rs2523393,6,29910000,A,G\n\
         rs2596542,6,31350000,T,C\n\
         rs9277535,6,33050000,C,C\n",
    )
    .unwrap();

    let raw_a = std::fs::read_to_string(&path_a).unwrap();
    let raw_b = std::fs::read_to_string(&path_b).unwrap();

    let engine = MatchEngine::new(ScoringSettings::default());
    let outcome = engine
        .compare_raw(&raw_a, &raw_b, &TraitProfile::new(), &TraitProfile::new(), 50.0)
        .unwrap();

    // HLA-A matches (AG), HLA-B mismatches (TT vs TC), HLA-DPB1 matches.
    let weights = harmonia::domain::model::LocusWeights::default();
    let expected = (0.0 * weights.get("HLA-A").unwrap()
        + 1.0 * weights.get("HLA-B").unwrap()
        + 0.0 * weights.get("HLA-DPB1").unwrap())
        / (weights.get("HLA-A").unwrap()
            + weights.get("HLA-B").unwrap()
            + weights.get("HLA-DPB1").unwrap());
    let dissim = outcome.genetic.dissimilarity.unwrap();
    assert!((dissim - expected).abs() < 1e-9);
    assert_eq!(outcome.genetic.breakdown.len(), 3);
}

#[test]
fn toml_config_reshapes_the_aggregation() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("scoring.toml");
    std::fs::write(
        &config_path,
        "[aggregate]\nvisual = 0.0\npersonality = 0.0\ngenetic = 100.0\n",
    )
    .unwrap();

    let toml = ScoringToml::from_file(&config_path).unwrap();
    let settings = ScoringSettings::from_toml(&toml);
    settings.validate_config().unwrap();

    let engine = MatchEngine::new(settings);
    let outcome = engine
        .compare_raw("", "", &full_profile(3.0, 1.0), &full_profile(3.0, 1.0), 90.0)
        .unwrap();

    // Only the (neutral) genetic component counts now.
    assert!((outcome.overall.overall_score - 50.0).abs() < 1e-9);
}

#[test]
fn outcome_serializes_with_breakdowns_and_statuses() {
    let engine = MatchEngine::new(ScoringSettings::default());
    let mut traits_a = TraitProfile::new();
    traits_a.insert(TraitKind::Wrath, TraitScore::new(3.0, 0.8));
    let mut traits_b = TraitProfile::new();
    traits_b.insert(TraitKind::Wrath, TraitScore::new(-3.0, 0.8));

    let outcome = engine
        .compare_raw(
            "HLA-A*02:01 HLA-B*07:02",
            "HLA-A*02:01",
            &traits_a,
            &traits_b,
            60.0,
        )
        .unwrap();

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["genetic"]["breakdown"]["HLA-B"]["status"], "no_data");
    assert_eq!(
        json["personality"]["breakdown"]["wrath"]["direction"],
        "divergent"
    );
    assert!(json["overall"]["components"]["visual"]["weight"].is_number());
    assert!(json["generated_at"].is_string());
}

struct StubClassifier {
    wrath: f64,
}

#[async_trait::async_trait]
impl TraitClassifier for StubClassifier {
    async fn classify(&self, _question: &str, _answer: &str) -> harmonia::Result<TraitAssessment> {
        let mut assessment = TraitAssessment::new();
        assessment.insert(TraitKind::Wrath, TraitScore::new(self.wrath, 0.9));
        Ok(assessment)
    }
}

#[tokio::test]
async fn classified_profiles_stored_and_compared() {
    let store = InMemoryProfileStore::new();
    let chain = ClassifierChain::new(vec![Box::new(StubClassifier { wrath: 3.2 })]);

    let mut assessments = Vec::new();
    for (question, answer) in [
        ("How do you argue?", "Loudly."),
        ("Last time you lost your temper?", "This morning."),
    ] {
        assessments.push(chain.classify(question, answer).await.unwrap());
    }

    let traits = profile_from_assessments(&assessments);
    store
        .put(PersonProfile {
            id: "alice".to_string(),
            name: None,
            traits: traits.clone(),
            genetic: Some(GeneticInput::Empty),
            visual_features: None,
        })
        .await
        .unwrap();

    let alice = store.get("alice").await.unwrap().unwrap();
    let engine = MatchEngine::new(ScoringSettings::default());
    let outcome = engine
        .compare(
            &GeneticInput::Empty,
            &GeneticInput::Empty,
            &alice.traits,
            &traits,
            50.0,
        )
        .unwrap();

    // Same stored profile on both sides: wrath qualifies at full closeness.
    let wrath = &outcome.personality.breakdown[&TraitKind::Wrath];
    assert!(wrath.contribution > 0.0);
    assert_eq!(wrath.score_a, wrath.score_b);
}
