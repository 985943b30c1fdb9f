use crate::domain::model::{AlleleSet, GeneticInput, SnpRecord};
use regex::Regex;

/// HLA region on chromosome 6 (GRCh37), in base pairs.
const HLA_REGION_START: u64 = 29_000_000;
const HLA_REGION_END: u64 = 33_500_000;

const EXPECTED_CHROMOSOME: &str = "6";

/// Approximate locus positions on GRCh37. Checked in order; first match wins.
const LOCUS_RANGES: &[(&str, u64, u64)] = &[
    ("HLA-A", 29_900_000, 30_000_000),
    ("HLA-C", 31_200_000, 31_300_000),
    ("HLA-B", 31_300_000, 31_450_000),
    ("HLA-DRB1", 32_500_000, 32_650_000),
    ("HLA-DQB1", 32_700_000, 32_800_000),
    ("HLA-DPB1", 33_030_000, 33_070_000),
];

const ALLELE_PATTERN: &str = r"(?i)(?:HLA-)?([A-Z][A-Z0-9]*)\*([0-9]+):([0-9]+)";

/// Inputs shorter than this cannot contain anything parseable.
const MIN_INPUT_LEN: usize = 10;

/// Parse raw genetic input into a structured profile.
///
/// Auto-detects the format: explicit allele notation ("HLA-B*07:02") is
/// treated as manual input; delimited rows with a chromosome column are
/// treated as a raw genomic export (23andMe, Ancestry, MyHeritage).
/// Anything unrecognizable yields [`GeneticInput::Empty`], never an error.
pub fn parse(raw: &str) -> GeneticInput {
    let trimmed = raw.trim();
    if trimmed.len() < MIN_INPUT_LEN {
        tracing::warn!("Genetic input too short to parse ({} chars)", trimmed.len());
        return GeneticInput::Empty;
    }

    let allele_re = Regex::new(ALLELE_PATTERN).unwrap();
    if allele_re.is_match(trimmed) {
        let alleles = parse_manual(trimmed, &allele_re);
        tracing::info!("Parsed {} HLA loci from manual notation", alleles.len());
        if alleles.is_empty() {
            return GeneticInput::Empty;
        }
        return GeneticInput::Manual { alleles };
    }

    if trimmed.contains('\t') || trimmed.contains(',') {
        let records = parse_export(trimmed);
        tracing::info!("Extracted {} HLA-region SNPs from export", records.len());
        if records.is_empty() {
            return GeneticInput::Empty;
        }
        return GeneticInput::Snp { records };
    }

    tracing::warn!("Unrecognized genetic input format ({} chars)", trimmed.len());
    GeneticInput::Empty
}

/// Extract every `LOCUS*group:specific` token and normalize the locus name
/// to `HLA-<LOCUS>`. Set semantics; duplicates collapse.
fn parse_manual(raw: &str, re: &Regex) -> AlleleSet {
    let mut alleles = AlleleSet::new();
    for caps in re.captures_iter(raw) {
        let locus = format!("HLA-{}", caps[1].to_uppercase());
        let allele = format!("{}:{}", &caps[2], &caps[3]);
        alleles.insert(locus, allele);
    }
    alleles
}

/// Extract chromosome-6 HLA-region SNPs from a tab- or comma-delimited
/// export. A malformed row is skipped, never fatal.
fn parse_export(raw: &str) -> Vec<SnpRecord> {
    let delimiter = detect_delimiter(raw);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(raw.as_bytes());

    let mut records = Vec::new();
    for (line_num, row) in reader.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                tracing::debug!("Skipping unreadable row {}: {}", line_num + 1, e);
                continue;
            }
        };

        if let Some(record) = parse_export_row(&row) {
            records.push(record);
        }
    }
    records
}

fn detect_delimiter(raw: &str) -> u8 {
    // The first data line decides; exports never mix delimiters.
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.contains('\t') {
            return b'\t';
        }
        return b',';
    }
    b','
}

fn parse_export_row(row: &csv::StringRecord) -> Option<SnpRecord> {
    if row.len() < 4 {
        return None;
    }

    let rsid = row.get(0)?.trim();
    if rsid.is_empty() || rsid.to_lowercase().starts_with("rsid") {
        // Header row.
        return None;
    }

    let chromosome = row
        .get(1)?
        .trim()
        .trim_start_matches("chr")
        .trim_start_matches("Chr");
    if chromosome != EXPECTED_CHROMOSOME {
        return None;
    }

    let position: u64 = row.get(2)?.trim().parse().ok()?;
    if !(HLA_REGION_START..=HLA_REGION_END).contains(&position) {
        return None;
    }

    // 4 columns: combined genotype. 5 columns: one allele per column.
    let genotype = if row.len() >= 5 {
        format!("{}{}", row.get(3)?.trim(), row.get(4)?.trim()).to_uppercase()
    } else {
        row.get(3)?.trim().to_uppercase()
    };
    if genotype.is_empty() || genotype == "--" || genotype == "00" {
        return None;
    }

    Some(SnpRecord {
        rsid: rsid.to_string(),
        position,
        genotype,
        locus: position_to_locus(position).to_string(),
    })
}

pub fn position_to_locus(position: u64) -> &'static str {
    for (locus, start, end) in LOCUS_RANGES {
        if (*start..=*end).contains(&position) {
            return locus;
        }
    }
    "HLA-OTHER"
}
