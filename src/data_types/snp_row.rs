
use serde::{Deserialize, Deserializer, Serialize};

/// Marker show-snps writes in a substitution column for a gap
pub const GAP_MARKER: &str = ".";

/// Strand value used when the input does not carry a strand column
fn default_strand() -> i8 {
    1
}

/// Reads a substitution column, turning the gap marker into an empty string so indels are never SNPs
fn deserialize_substitution<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let substitution = String::deserialize(deserializer)?;
    if substitution == GAP_MARKER {
        Ok(String::new())
    } else {
        Ok(substitution)
    }
}

/// One aligned mismatch column from a pairwise whole-genome alignment.
/// Column names follow the `show-snps -rlTC -x` output of MUMmer.
/// Only the chromosome, position, and substitution columns are required in a table;
/// the remaining columns are carried through for downstream probe generation.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct SnpRow {
    /// 1-based position in the reference genome
    pub ref_pos: u64,
    /// Substituted base(s) in the reference, empty for an insertion in the query
    #[serde(deserialize_with = "deserialize_substitution")]
    pub ref_sub: String,
    /// Substituted base(s) in the query, empty for a deletion in the query
    #[serde(deserialize_with = "deserialize_substitution")]
    pub query_sub: String,
    /// 1-based position in the query genome
    pub query_pos: u64,
    /// Distance to the nearest mismatch (BUFF)
    #[serde(default)]
    pub nearest_mismatch: u64,
    /// Distance to the nearest sequence end (DIST)
    #[serde(default)]
    pub nearest_end: u64,
    /// Length of the reference sequence
    #[serde(default)]
    pub ref_len: u64,
    /// Length of the query sequence
    #[serde(default)]
    pub query_len: u64,
    /// Flanking context around the reference position
    #[serde(default)]
    pub ref_context: String,
    /// Flanking context around the query position
    #[serde(default)]
    pub query_context: String,
    /// Alignment frame in the reference, 1 or -1
    #[serde(default = "default_strand")]
    pub ref_strand: i8,
    /// Alignment frame in the query, 1 or -1
    #[serde(default = "default_strand")]
    pub query_strand: i8,
    /// Reference chromosome
    pub ref_chrom: String,
    /// Query chromosome
    pub query_chrom: String,
}

impl SnpRow {
    /// Convenience constructor for the columns the deduplication uses; everything else is defaulted.
    /// # Arguments
    /// * `ref_chrom` - reference chromosome
    /// * `ref_pos` - reference position, 1-based
    /// * `ref_sub` - reference substitution
    /// * `query_chrom` - query chromosome
    /// * `query_pos` - query position, 1-based
    /// * `query_sub` - query substitution
    pub fn new(
        ref_chrom: &str, ref_pos: u64, ref_sub: &str,
        query_chrom: &str, query_pos: u64, query_sub: &str
    ) -> Self {
        Self {
            ref_pos,
            ref_sub: ref_sub.to_string(),
            query_sub: query_sub.to_string(),
            query_pos,
            ref_strand: default_strand(),
            query_strand: default_strand(),
            ref_chrom: ref_chrom.to_string(),
            query_chrom: query_chrom.to_string(),
            ..Default::default()
        }
    }

    /// Returns true if both sides are a single base substitution.
    /// Indels and multi-base blocks are not SNPs.
    pub fn is_snp(&self) -> bool {
        self.ref_sub.len() == 1 && self.query_sub.len() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_snp() {
        assert!(SnpRow::new("chrom_1", 1, "A", "chrom_2", 2, "C").is_snp());
        assert!(!SnpRow::new("chrom_1", 1, "", "chrom_2", 2, "C").is_snp());
        assert!(!SnpRow::new("chrom_1", 1, "A", "chrom_2", 2, "").is_snp());
        assert!(!SnpRow::new("chrom_1", 1, "A", "chrom_2", 2, "CC").is_snp());
        assert!(!SnpRow::new("chrom_1", 1, "AA", "chrom_2", 2, "CC").is_snp());
        assert!(!SnpRow::new("chrom_1", 1, "AA", "chrom_2", 2, "C").is_snp());
    }

    #[test]
    fn test_gap_marker() {
        let content = "ref_pos\tref_sub\tquery_sub\tquery_pos\tref_chrom\tquery_chrom\n39\tG\t.\t38\tchr1\tctg_7\n";
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_reader(content.as_bytes());
        let rows: Vec<SnpRow> = csv_reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows, vec![SnpRow::new("chr1", 39, "G", "ctg_7", 38, "")]);
        assert!(!rows[0].is_snp());
    }

    #[test]
    fn test_default_strand() {
        let row = SnpRow::new("chrom_1", 1, "A", "chrom_2", 2, "C");
        assert_eq!(row.ref_strand, 1);
        assert_eq!(row.query_strand, 1);
        assert!(row.ref_context.is_empty());
    }
}
