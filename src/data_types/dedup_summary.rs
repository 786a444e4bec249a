
use serde::{Deserialize, Serialize};

/// Counters collected across one deduplication run
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct DeduplicationSummary {
    /// Number of pairwise comparisons ingested
    pub comparisons: u64,
    /// Total rows across all comparison tables
    pub total_rows: u64,
    /// Rows that are a single base substitution on both sides
    pub snp_rows: u64,
    /// Distinct pairwise variations, i.e. graph nodes
    pub graph_nodes: u64,
    /// Graph edges
    pub graph_edges: u64,
    /// Connected components, one per pangenome variation
    pub pangenome_variations: u64,
    /// Pangenome variations that passed the consistency filter
    pub consistent_variations: u64,
    /// Pangenome variations that failed the consistency filter
    pub inconsistent_variations: u64,
    /// Annotated rows present in a consistent pangenome variation
    pub present_rows: u64,
    /// Annotated rows not present in any consistent pangenome variation
    pub absent_rows: u64,
    /// Alleles that belong to a consistent pangenome variation
    pub consistent_alleles: u64,
}

impl DeduplicationSummary {
    /// Fraction of pangenome variations that are consistent, if there are any
    pub fn consistent_fraction(&self) -> Option<f64> {
        let denom = self.consistent_variations + self.inconsistent_variations;
        if denom > 0 {
            Some(self.consistent_variations as f64 / denom as f64)
        } else {
            None
        }
    }

    /// Fraction of SNP rows that survived deduplication as present rows, if there are any
    pub fn present_fraction(&self) -> Option<f64> {
        if self.snp_rows > 0 {
            Some(self.present_rows as f64 / self.snp_rows as f64)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    #[test]
    fn test_fractions() {
        let summary = DeduplicationSummary {
            snp_rows: 8,
            consistent_variations: 3,
            inconsistent_variations: 1,
            present_rows: 6,
            absent_rows: 4,
            ..Default::default()
        };
        assert_approx_eq!(summary.consistent_fraction().unwrap(), 0.75);
        assert_approx_eq!(summary.present_fraction().unwrap(), 0.75);

        let empty = DeduplicationSummary::default();
        assert!(empty.consistent_fraction().is_none());
        assert!(empty.present_fraction().is_none());
    }
}
