use crate::domain::model::{
    DissimilarityResult, GeneticInput, LocusDetail, LocusStatus, LocusWeights, SnpRecord,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Compare two genetic profiles and produce a weighted aggregate
/// dissimilarity in [0, 1].
///
/// Loci without data on either side are excluded from the weighted sum,
/// never defaulted to an extreme value. Loci missing from the weight table
/// (e.g. "HLA-OTHER") are ignored. When nothing is comparable the aggregate
/// is `None` and the caller substitutes the neutral default score.
pub fn dissimilarity(
    a: &GeneticInput,
    b: &GeneticInput,
    weights: &LocusWeights,
) -> DissimilarityResult {
    let per_locus = match (a, b) {
        (GeneticInput::Manual { alleles: a }, GeneticInput::Manual { alleles: b }) => {
            compare_allele_sets(a, b, weights)
        }
        (GeneticInput::Snp { records: a }, GeneticInput::Snp { records: b }) => {
            compare_snp_records(a, b, weights)
        }
        // Mixed or empty inputs cannot be compared locus by locus.
        _ => {
            tracing::warn!("Genetic inputs missing or in different formats; no comparison");
            BTreeMap::new()
        }
    };

    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for detail in per_locus.values() {
        if let (Some(d), Some(w)) = (detail.dissimilarity, detail.weight_used) {
            weighted_sum += d * w;
            weight_total += w;
        }
    }

    let aggregate = if weight_total > 0.0 {
        Some(weighted_sum / weight_total)
    } else {
        None
    };

    if let Some(agg) = aggregate {
        tracing::debug!(
            "Aggregate dissimilarity {:.3} over {} loci",
            agg,
            per_locus.len()
        );
    }

    DissimilarityResult {
        aggregate,
        per_locus,
    }
}

/// Manual mode: per-locus Jaccard dissimilarity over allele sets.
fn compare_allele_sets(
    a: &crate::domain::model::AlleleSet,
    b: &crate::domain::model::AlleleSet,
    weights: &LocusWeights,
) -> BTreeMap<String, LocusDetail> {
    let mut per_locus = BTreeMap::new();

    for (locus, weight) in weights.iter() {
        let set_a = a.alleles(locus);
        let set_b = b.alleles(locus);

        let (set_a, set_b) = match (set_a, set_b) {
            (Some(sa), Some(sb)) if !sa.is_empty() && !sb.is_empty() => (sa, sb),
            _ => {
                per_locus.insert(
                    locus.clone(),
                    LocusDetail {
                        status: LocusStatus::NoData,
                        dissimilarity: None,
                        weight_used: None,
                        shared: 0,
                        total: 0,
                    },
                );
                continue;
            }
        };

        let intersection = set_a.intersection(set_b).count();
        let union = set_a.union(set_b).count();
        let dissim = 1.0 - intersection as f64 / union as f64;

        per_locus.insert(
            locus.clone(),
            LocusDetail {
                status: LocusStatus::Compared,
                dissimilarity: Some(dissim),
                weight_used: Some(weight),
                shared: intersection,
                total: union,
            },
        );
    }

    per_locus
}

/// SNP mode: per-locus genotype mismatch rate over rsids present in both
/// exports. Loci with no shared SNPs are excluded.
fn compare_snp_records(
    a: &[SnpRecord],
    b: &[SnpRecord],
    weights: &LocusWeights,
) -> BTreeMap<String, LocusDetail> {
    let lookup_b: HashMap<&str, &SnpRecord> =
        b.iter().map(|snp| (snp.rsid.as_str(), snp)).collect();

    let mut shared: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for snp_a in a {
        let Some(snp_b) = lookup_b.get(snp_a.rsid.as_str()) else {
            continue;
        };
        let entry = shared.entry(snp_a.locus.as_str()).or_insert((0, 0));
        entry.1 += 1;
        if snp_a.genotype != snp_b.genotype {
            entry.0 += 1;
        }
    }

    let loci_seen: BTreeSet<&str> = a
        .iter()
        .chain(b.iter())
        .map(|snp| snp.locus.as_str())
        .collect();

    let mut per_locus = BTreeMap::new();
    for locus in loci_seen {
        let Some(weight) = weights.get(locus) else {
            // Unknown locus (e.g. HLA-OTHER): ignored, not an error.
            continue;
        };

        match shared.get(locus) {
            Some((mismatches, total)) if *total > 0 => {
                per_locus.insert(
                    locus.to_string(),
                    LocusDetail {
                        status: LocusStatus::Compared,
                        dissimilarity: Some(*mismatches as f64 / *total as f64),
                        weight_used: Some(weight),
                        shared: *total,
                        total: *total,
                    },
                );
            }
            _ => {
                per_locus.insert(
                    locus.to_string(),
                    LocusDetail {
                        status: LocusStatus::NoSharedSnps,
                        dissimilarity: None,
                        weight_used: None,
                        shared: 0,
                        total: 0,
                    },
                );
            }
        }
    }

    per_locus
}
