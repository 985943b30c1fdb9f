use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Per-locus allele sets parsed from manual HLA notation
/// (e.g. "HLA-B*07:02"). Order-irrelevant, duplicates collapsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlleleSet(BTreeMap<String, BTreeSet<String>>);

impl AlleleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, locus: String, allele: String) {
        self.0.entry(locus).or_default().insert(allele);
    }

    pub fn alleles(&self, locus: &str) -> Option<&BTreeSet<String>> {
        self.0.get(locus)
    }

    pub fn loci(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// One SNP row from a raw chromosome-6 export, restricted to the HLA region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnpRecord {
    pub rsid: String,
    pub position: u64,
    pub genotype: String,
    pub locus: String,
}

/// A person's genetic profile as produced by the allele parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum GeneticInput {
    Manual { alleles: AlleleSet },
    Snp { records: Vec<SnpRecord> },
    Empty,
}

impl GeneticInput {
    pub fn is_empty(&self) -> bool {
        match self {
            GeneticInput::Manual { alleles } => alleles.is_empty(),
            GeneticInput::Snp { records } => records.is_empty(),
            GeneticInput::Empty => true,
        }
    }
}

/// The seven canonical personality dimensions. The vice/virtue naming is
/// a presentation detail; the engine only cares about the fixed slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitKind {
    Wrath,
    Sloth,
    Pride,
    Lust,
    Greed,
    Gluttony,
    Envy,
}

impl TraitKind {
    pub const ALL: [TraitKind; 7] = [
        TraitKind::Wrath,
        TraitKind::Sloth,
        TraitKind::Pride,
        TraitKind::Lust,
        TraitKind::Greed,
        TraitKind::Gluttony,
        TraitKind::Envy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TraitKind::Wrath => "wrath",
            TraitKind::Sloth => "sloth",
            TraitKind::Pride => "pride",
            TraitKind::Lust => "lust",
            TraitKind::Greed => "greed",
            TraitKind::Gluttony => "gluttony",
            TraitKind::Envy => "envy",
        }
    }
}

impl fmt::Display for TraitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TraitKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wrath" => Ok(TraitKind::Wrath),
            "sloth" => Ok(TraitKind::Sloth),
            "pride" => Ok(TraitKind::Pride),
            "lust" => Ok(TraitKind::Lust),
            "greed" => Ok(TraitKind::Greed),
            "gluttony" => Ok(TraitKind::Gluttony),
            "envy" => Ok(TraitKind::Envy),
            other => Err(format!("unknown trait name: {}", other)),
        }
    }
}

/// One classified trait: signed magnitude in [-5, 5] plus classifier
/// confidence in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitScore {
    pub value: f64,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl TraitScore {
    pub fn new(value: f64, confidence: f64) -> Self {
        Self {
            value,
            confidence,
            evidence: None,
        }
    }

    /// Substitute for a trait the classifier never scored.
    pub fn neutral() -> Self {
        Self::new(0.0, 0.5)
    }

    /// Classifier output is not fully trusted; out-of-range values are
    /// clamped rather than rejected.
    pub fn clamped(&self) -> Self {
        Self {
            value: crate::utils::validation::clamp(self.value, -5.0, 5.0),
            confidence: crate::utils::validation::clamp(self.confidence, 0.0, 1.0),
            evidence: self.evidence.clone(),
        }
    }
}

/// One person's personality profile over the seven canonical traits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitProfile(BTreeMap<TraitKind, TraitScore>);

impl TraitProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: TraitKind, score: TraitScore) {
        self.0.insert(kind, score);
    }

    pub fn get(&self, kind: TraitKind) -> Option<&TraitScore> {
        self.0.get(&kind)
    }

    /// Missing trait data is neutral (score 0, confidence 0.5), never an error.
    pub fn get_or_neutral(&self, kind: TraitKind) -> TraitScore {
        self.0
            .get(&kind)
            .map(|s| s.clamped())
            .unwrap_or_else(TraitScore::neutral)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(TraitKind, TraitScore)> for TraitProfile {
    fn from_iter<I: IntoIterator<Item = (TraitKind, TraitScore)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One classifier invocation's output for a single (question, answer) pair.
/// Several assessments get averaged into a final [`TraitProfile`].
pub type TraitAssessment = TraitProfile;

/// Relative importance of each HLA locus. Class I loci (A, B, C) carry
/// materially more weight than Class II, HLA-B most of all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocusWeights(BTreeMap<String, f64>);

impl LocusWeights {
    pub fn get(&self, locus: &str) -> Option<f64> {
        self.0.get(locus).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, f64)> {
        self.0.iter().map(|(k, v)| (k, *v))
    }
}

impl Default for LocusWeights {
    fn default() -> Self {
        Self(BTreeMap::from([
            ("HLA-A".to_string(), 1.0),
            ("HLA-B".to_string(), 1.5),
            ("HLA-C".to_string(), 1.2),
            ("HLA-DRB1".to_string(), 0.6),
            ("HLA-DQB1".to_string(), 0.5),
            ("HLA-DPB1".to_string(), 0.4),
        ]))
    }
}

impl FromIterator<(String, f64)> for LocusWeights {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Relative relationship importance of each trait. Conflict handling
/// (wrath) dominates; jealousy (envy) matters least.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitWeights(BTreeMap<TraitKind, f64>);

impl TraitWeights {
    pub fn get(&self, kind: TraitKind) -> f64 {
        self.0.get(&kind).copied().unwrap_or(0.0)
    }

    /// Denominator for the similarity score: every trait's weight counts,
    /// qualifying or not.
    pub fn total(&self) -> f64 {
        TraitKind::ALL.iter().map(|k| self.get(*k)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TraitKind, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

impl Default for TraitWeights {
    fn default() -> Self {
        Self(BTreeMap::from([
            (TraitKind::Wrath, 1.5),
            (TraitKind::Sloth, 1.3),
            (TraitKind::Pride, 1.2),
            (TraitKind::Lust, 1.0),
            (TraitKind::Greed, 0.9),
            (TraitKind::Gluttony, 0.8),
            (TraitKind::Envy, 0.7),
        ]))
    }
}

impl FromIterator<(TraitKind, f64)> for TraitWeights {
    fn from_iter<I: IntoIterator<Item = (TraitKind, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Percentage weights for the final three-way aggregation; must sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateWeights {
    pub visual: f64,
    pub personality: f64,
    pub genetic: f64,
}

impl Default for AggregateWeights {
    fn default() -> Self {
        Self {
            visual: 50.0,
            personality: 35.0,
            genetic: 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocusStatus {
    Compared,
    NoData,
    NoSharedSnps,
}

/// Per-locus entry in the genetic breakdown. Excluded loci keep their
/// status but carry no dissimilarity or weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocusDetail {
    pub status: LocusStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dissimilarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_used: Option<f64>,
    pub shared: usize,
    pub total: usize,
}

/// Output of the locus dissimilarity calculator. `aggregate: None` is the
/// no-data sentinel; callers substitute the neutral default score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DissimilarityResult {
    pub aggregate: Option<f64>,
    pub per_locus: BTreeMap<String, LocusDetail>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitDirection {
    HighVice,
    HighVirtue,
    Divergent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitDetail {
    pub direction: TraitDirection,
    pub score_a: f64,
    pub score_b: f64,
    pub contribution: f64,
}

/// Output of the trait similarity calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub score: f64,
    pub breakdown: BTreeMap<TraitKind, TraitDetail>,
}

/// The genetic component with its curve-mapped score and interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneticCompatibility {
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dissimilarity: Option<f64>,
    pub interpretation: String,
    pub breakdown: BTreeMap<String, LocusDetail>,
}

/// The personality component with its similarity score and interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitCompatibility {
    pub score: f64,
    pub interpretation: String,
    pub breakdown: BTreeMap<TraitKind, TraitDetail>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub score: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentBreakdown {
    pub visual: ComponentScore,
    pub personality: ComponentScore,
    pub genetic: ComponentScore,
}

/// Final weighted fusion of the three signals. `overall_score` is kept at
/// full precision; use [`OverallResult::rounded`] for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallResult {
    pub overall_score: f64,
    pub components: ComponentBreakdown,
}

impl OverallResult {
    pub fn rounded(&self) -> f64 {
        (self.overall_score * 10.0).round() / 10.0
    }
}

/// Everything one comparison run produces, for the report/API layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub overall: OverallResult,
    pub genetic: GeneticCompatibility,
    pub personality: TraitCompatibility,
    pub generated_at: DateTime<Utc>,
}

/// One stored person, as the repository port hands it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonProfile {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub traits: TraitProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genetic: Option<GeneticInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_features: Option<serde_json::Value>,
}
