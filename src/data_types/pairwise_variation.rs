
use log::trace;
use std::hash::{Hash, Hasher};

use crate::data_types::allele::Allele;
use crate::data_types::snp_row::SnpRow;

/// One SNP observed in one pairwise comparison, stored as an unordered pair of alleles.
/// The pair is normalized so `allele_1 <= allele_2`, which makes construction commutative.
/// The orientation of the comparison (which allele was the reference side) is kept
/// separately and does not take part in equality or hashing.
#[derive(Clone, Debug)]
pub struct PairwiseVariation {
    /// The lesser of the two alleles
    allele_1: Allele,
    /// The greater of the two alleles
    allele_2: Allele,
    /// if true, the reference-side allele is `allele_2`
    swapped: bool,
}

impl PairwiseVariation {
    /// Creates a pairwise variation from the two sides of one aligned mismatch
    /// # Arguments
    /// * `ref_allele` - the allele on the reference side of the comparison
    /// * `query_allele` - the allele on the query side of the comparison
    pub fn new(ref_allele: Allele, query_allele: Allele) -> Self {
        if query_allele < ref_allele {
            Self {
                allele_1: query_allele,
                allele_2: ref_allele,
                swapped: true
            }
        } else {
            Self {
                allele_1: ref_allele,
                allele_2: query_allele,
                swapped: false
            }
        }
    }

    /// Converts a single table row into a pairwise variation.
    /// Returns None if the row is not a SNP on both sides, which is expected and not an error.
    /// # Arguments
    /// * `ref_genome` - label of the reference genome of this comparison
    /// * `query_genome` - label of the query genome of this comparison
    /// * `row` - the aligned mismatch
    pub fn from_snp_row(ref_genome: &str, query_genome: &str, row: &SnpRow) -> Option<Self> {
        let ref_allele = Allele::new(ref_genome, &row.ref_chrom, row.ref_pos, &row.ref_sub);
        let query_allele = Allele::new(query_genome, &row.query_chrom, row.query_pos, &row.query_sub);
        match (ref_allele, query_allele) {
            (Ok(r), Ok(q)) => Some(Self::new(r, q)),
            (Err(e), _) | (_, Err(e)) => {
                trace!("Skipping non-SNP row {ref_genome}:{}:{} -> {query_genome}:{}:{}: {e}",
                    row.ref_chrom, row.ref_pos, row.query_chrom, row.query_pos);
                None
            }
        }
    }

    /// Lazily converts the rows of one pairwise comparison, silently dropping rows that are not SNPs.
    /// # Arguments
    /// * `ref_genome` - label of the reference genome of this comparison
    /// * `query_genome` - label of the query genome of this comparison
    /// * `rows` - all rows of the comparison table
    pub fn from_snp_rows<'a>(ref_genome: &'a str, query_genome: &'a str, rows: &'a [SnpRow]) -> impl Iterator<Item = PairwiseVariation> + 'a {
        rows.iter()
            .filter_map(move |row| Self::from_snp_row(ref_genome, query_genome, row))
    }

    /// Returns true if the two variations have at least one allele in common
    pub fn shares_allele(&self, other: &PairwiseVariation) -> bool {
        self.allele_1 == other.allele_1 || self.allele_1 == other.allele_2 ||
            self.allele_2 == other.allele_1 || self.allele_2 == other.allele_2
    }

    // getters
    pub fn allele_1(&self) -> &Allele {
        &self.allele_1
    }

    pub fn allele_2(&self) -> &Allele {
        &self.allele_2
    }

    /// The allele from the reference side of the comparison that produced this variation
    pub fn ref_allele(&self) -> &Allele {
        if self.swapped { &self.allele_2 } else { &self.allele_1 }
    }

    /// The allele from the query side of the comparison that produced this variation
    pub fn query_allele(&self) -> &Allele {
        if self.swapped { &self.allele_1 } else { &self.allele_2 }
    }
}

impl PartialEq for PairwiseVariation {
    fn eq(&self, other: &Self) -> bool {
        self.allele_1 == other.allele_1 && self.allele_2 == other.allele_2
    }
}

impl Eq for PairwiseVariation {}

impl Hash for PairwiseVariation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.allele_1.hash(state);
        self.allele_2.hash(state);
    }
}

impl std::fmt::Display for PairwiseVariation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.allele_1, self.allele_2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(pv: &PairwiseVariation) -> u64 {
        let mut hasher = DefaultHasher::new();
        pv.hash(&mut hasher);
        hasher.finish()
    }

    fn allele(genome: &str, chrom: &str, pos: u64, base: &str) -> Allele {
        Allele::new(genome, chrom, pos, base).unwrap()
    }

    #[test]
    fn test_ordered_alleles() {
        let a1 = allele("genome_1", "chrom_1", 10, "A");
        let a2 = allele("genome_2", "chrom_2", 20, "A");
        let pv = PairwiseVariation::new(a1.clone(), a2.clone());
        assert_eq!(pv.allele_1(), &a1);
        assert_eq!(pv.allele_2(), &a2);
        assert_eq!(pv.ref_allele(), &a1);
        assert_eq!(pv.query_allele(), &a2);
    }

    #[test]
    fn test_unordered_alleles() {
        let a1 = allele("genome_2", "chrom_2", 20, "A");
        let a2 = allele("genome_1", "chrom_1", 10, "A");
        let pv = PairwiseVariation::new(a1.clone(), a2.clone());
        assert_eq!(pv.allele_1(), &a2);
        assert_eq!(pv.allele_2(), &a1);

        // the original orientation is still available
        assert_eq!(pv.ref_allele(), &a1);
        assert_eq!(pv.query_allele(), &a2);
    }

    #[test]
    fn test_commutative() {
        let a1 = allele("genome_2", "chrom_2", 20, "A");
        let a2 = allele("genome_1", "chrom_1", 10, "C");
        let pv1 = PairwiseVariation::new(a1.clone(), a2.clone());
        let pv2 = PairwiseVariation::new(a2, a1);
        assert_eq!(pv1, pv2);
        assert_eq!(hash_of(&pv1), hash_of(&pv2));

        // orientation differs even though they are equal
        assert_ne!(pv1.ref_allele(), pv2.ref_allele());
    }

    #[test]
    fn test_different_variations() {
        let a1 = allele("genome_2", "chrom_2", 20, "A");
        let a2 = allele("genome_1", "chrom_1", 10, "A");
        let a3 = allele("genome_1", "chrom_1", 11, "A");
        let pv1 = PairwiseVariation::new(a1.clone(), a2);
        let pv2 = PairwiseVariation::new(a1, a3);
        assert_ne!(pv1, pv2);
        assert_ne!(hash_of(&pv1), hash_of(&pv2));
    }

    #[test]
    fn test_shares_allele() {
        let a1 = allele("genome_1", "chrom_1", 1, "A");
        let a2 = allele("genome_1", "chrom_1", 2, "A");
        let a3 = allele("genome_1", "chrom_1", 3, "A");
        let a4 = allele("genome_1", "chrom_1", 4, "A");

        // nothing shared
        let pv12 = PairwiseVariation::new(a1.clone(), a2.clone());
        let pv34 = PairwiseVariation::new(a3.clone(), a4);
        assert!(!pv12.shares_allele(&pv34));

        // one shared
        let pv23 = PairwiseVariation::new(a2.clone(), a3);
        assert!(pv12.shares_allele(&pv23));
        assert!(pv23.shares_allele(&pv12));

        // both shared
        let pv21 = PairwiseVariation::new(a2, a1);
        assert!(pv12.shares_allele(&pv21));
    }

    #[test]
    fn test_from_snp_rows() {
        let rows = vec![
            SnpRow::new("chrom_10", 10, "G", "chrom_20", 20, "T"),
            SnpRow::new("chrom_1", 1, "", "chrom_2", 2, "C"),
            SnpRow::new("chrom_1", 1, "A", "chrom_2", 2, "CC"),
            SnpRow::new("chrom_1", 1, "A", "chrom_2", 2, "C"),
            SnpRow::new("chrom_1", 1, "AA", "chrom_2", 2, "CC"),
            SnpRow::new("chrom_1", 1, "AA", "chrom_2", 2, "C"),
        ];
        let pvs: Vec<PairwiseVariation> = PairwiseVariation::from_snp_rows("genome_1", "genome_2", &rows).collect();
        assert_eq!(pvs, vec![
            PairwiseVariation::new(allele("genome_1", "chrom_10", 10, "G"), allele("genome_2", "chrom_20", 20, "T")),
            PairwiseVariation::new(allele("genome_1", "chrom_1", 1, "A"), allele("genome_2", "chrom_2", 2, "C")),
        ]);

        // single row interface matches
        assert!(PairwiseVariation::from_snp_row("genome_1", "genome_2", &rows[1]).is_none());
        let pv = PairwiseVariation::from_snp_row("genome_2", "genome_1", &rows[3]).unwrap();
        assert_eq!(pv.ref_allele(), &allele("genome_2", "chrom_1", 1, "A"));
        assert_eq!(pv.query_allele(), &allele("genome_1", "chrom_2", 2, "C"));
    }
}
