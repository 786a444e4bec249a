/*!
# Consistent Pangenome Variations
Filters pangenome variations down to the ones where every genome agrees on a single locus,
and resolves pairwise variations back to the consistent pangenome variation they belong to.
Once built, everything here is read-only and can be shared across threads for annotation.
*/
use log::debug;
use rustc_hash::FxHashMap as HashMap;

use crate::data_types::allele::Allele;
use crate::data_types::annotated_snp_row::{AnnotatedSnpRow, VariationAnnotation};
use crate::data_types::pairwise_variation::PairwiseVariation;
use crate::data_types::pangenome_variation::{PangenomeVariation, PangenomeVariations};
use crate::data_types::snp_row::SnpRow;
use crate::deduplication_graph::DeduplicationError;

/// The consistent subset of all pangenome variations, with a reverse allele lookup
#[derive(Debug, Default)]
pub struct ConsistentPangenomeVariations {
    /// Consistent variations, keeping their original IDs
    pangenome_variations: Vec<PangenomeVariation>,
    /// Lookup from an allele to the index in `pangenome_variations` that contains it
    allele_to_variation: HashMap<Allele, usize>,
    /// Number of variations that were dropped
    num_inconsistent: usize,
}

impl ConsistentPangenomeVariations {
    /// Keeps only the consistent variations and indexes their alleles.
    /// Alleles of inconsistent variations are absent from the index.
    pub fn new(pangenome_variations: PangenomeVariations) -> Self {
        let total = pangenome_variations.len();
        let pangenome_variations: Vec<PangenomeVariation> = pangenome_variations.into_iter()
            .filter(|pv| pv.is_consistent())
            .collect();
        let num_inconsistent = total - pangenome_variations.len();

        let mut allele_to_variation: HashMap<Allele, usize> = Default::default();
        for (index, pv) in pangenome_variations.iter().enumerate() {
            for allele in pv.alleles() {
                // components are disjoint, so an allele cannot be claimed twice
                let previous = allele_to_variation.insert(allele.clone(), index);
                debug_assert!(previous.is_none());
            }
        }
        debug!("Kept {} consistent pangenome variations, dropped {num_inconsistent}", pangenome_variations.len());

        Self {
            pangenome_variations,
            allele_to_variation,
            num_inconsistent
        }
    }

    /// Returns the consistent pangenome variation containing `allele`, if any
    pub fn get(&self, allele: &Allele) -> Option<&PangenomeVariation> {
        self.allele_to_variation.get(allele)
            .map(|&index| &self.pangenome_variations[index])
    }

    /// Finds the consistent pangenome variation that a pairwise variation belongs to.
    /// Returns None when neither allele is indexed, and also when only one is, which means the variation was never part of the graph.
    /// # Errors
    /// * if the two alleles map to two different pangenome variations, which means the graph was built incorrectly
    pub fn resolve(&self, pairwise_variation: &PairwiseVariation) -> Result<Option<&PangenomeVariation>, DeduplicationError> {
        let index_1 = self.allele_to_variation.get(pairwise_variation.allele_1());
        let index_2 = self.allele_to_variation.get(pairwise_variation.allele_2());
        match (index_1, index_2) {
            (Some(&i1), Some(&i2)) => {
                if i1 == i2 {
                    Ok(Some(&self.pangenome_variations[i1]))
                } else {
                    Err(DeduplicationError::InconsistentPangenomeVariation {
                        pairwise_variation: pairwise_variation.to_string(),
                        id_1: self.pangenome_variations[i1].id(),
                        id_2: self.pangenome_variations[i2].id()
                    })
                }
            },
            _ => Ok(None)
        }
    }

    /// Returns true if the pairwise variation is part of a consistent pangenome variation
    /// # Errors
    /// * see `resolve(...)`
    pub fn contains(&self, pairwise_variation: &PairwiseVariation) -> Result<bool, DeduplicationError> {
        Ok(self.resolve(pairwise_variation)?.is_some())
    }

    /// Annotates every row of one comparison with its pangenome variation, preserving row order.
    /// Rows that are not SNPs or do not resolve are marked as absent.
    /// # Arguments
    /// * `ref_genome` - label of the reference genome in this comparison
    /// * `query_genome` - label of the query genome in this comparison
    /// * `rows` - the same comparison table that was added to the graph
    /// # Errors
    /// * if any row resolves to two different pangenome variations
    pub fn annotate_comparison(&self, ref_genome: &str, query_genome: &str, rows: &[SnpRow]) -> Result<Vec<AnnotatedSnpRow>, DeduplicationError> {
        rows.iter()
            .map(|row| {
                let annotation = match PairwiseVariation::from_snp_row(ref_genome, query_genome, row) {
                    Some(pairwise_variation) => {
                        self.resolve(&pairwise_variation)?
                            .and_then(|pv| VariationAnnotation::new(&pairwise_variation, pv))
                    },
                    None => None
                };
                Ok(AnnotatedSnpRow::new(row, annotation))
            })
            .collect()
    }

    /// Per-row presence flags for one comparison, in row order
    /// # Errors
    /// * see `annotate_comparison(...)`
    pub fn presence_vector(&self, ref_genome: &str, query_genome: &str, rows: &[SnpRow]) -> Result<Vec<bool>, DeduplicationError> {
        rows.iter()
            .map(|row| {
                match PairwiseVariation::from_snp_row(ref_genome, query_genome, row) {
                    Some(pairwise_variation) => self.contains(&pairwise_variation),
                    None => Ok(false)
                }
            })
            .collect()
    }

    // getters
    pub fn pangenome_variations(&self) -> &[PangenomeVariation] {
        &self.pangenome_variations
    }

    pub fn len(&self) -> usize {
        self.pangenome_variations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pangenome_variations.is_empty()
    }

    pub fn num_inconsistent(&self) -> usize {
        self.num_inconsistent
    }

    pub fn num_indexed_alleles(&self) -> usize {
        self.allele_to_variation.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deduplication_graph::DeduplicationGraph;

    fn allele(genome: &str, chrom: &str, pos: u64, base: &str) -> Allele {
        Allele::new(genome, chrom, pos, base).unwrap()
    }

    /// Two consistent variations (ids 0, 2) around one inconsistent variation (id 1)
    fn mixed_variations() -> PangenomeVariations {
        PangenomeVariations::new(vec![
            PangenomeVariation::new(0, vec![allele("genome_1", "chrom_1", 1, "A"), allele("genome_2", "chrom_1", 1, "C")]),
            PangenomeVariation::new(1, vec![
                allele("genome_1", "chrom_1", 5, "A"), allele("genome_2", "chrom_1", 5, "C"),
                allele("genome_1", "chrom_1", 6, "A"),
            ]),
            PangenomeVariation::new(2, vec![allele("genome_1", "chrom_2", 9, "G"), allele("genome_3", "chrom_2", 9, "T")]),
        ])
    }

    #[test]
    fn test_constructor() {
        let consistent = ConsistentPangenomeVariations::new(mixed_variations());
        assert_eq!(consistent.len(), 2);
        assert_eq!(consistent.num_inconsistent(), 1);
        let ids: Vec<usize> = consistent.pangenome_variations().iter().map(|pv| pv.id()).collect();
        assert_eq!(ids, vec![0, 2]);
        assert_eq!(consistent.num_indexed_alleles(), 4);

        // alleles from the dropped variation are unknown
        assert!(consistent.get(&allele("genome_1", "chrom_1", 5, "A")).is_none());
        assert_eq!(consistent.get(&allele("genome_3", "chrom_2", 9, "T")).unwrap().id(), 2);
    }

    #[test]
    fn test_empty() {
        let consistent = ConsistentPangenomeVariations::new(PangenomeVariations::default());
        assert!(consistent.is_empty());
        assert_eq!(consistent.num_inconsistent(), 0);
        let pv = PairwiseVariation::new(allele("genome_1", "chrom_1", 1, "A"), allele("genome_2", "chrom_1", 1, "C"));
        assert_eq!(consistent.resolve(&pv).unwrap(), None);
    }

    #[test]
    fn test_resolve() {
        let consistent = ConsistentPangenomeVariations::new(mixed_variations());

        // both alleles in the same variation
        let pv = PairwiseVariation::new(allele("genome_2", "chrom_1", 1, "C"), allele("genome_1", "chrom_1", 1, "A"));
        assert_eq!(consistent.resolve(&pv).unwrap().unwrap().id(), 0);
        assert!(consistent.contains(&pv).unwrap());

        // neither allele is indexed
        let pv = PairwiseVariation::new(allele("genome_1", "chrom_1", 5, "A"), allele("genome_2", "chrom_1", 5, "C"));
        assert_eq!(consistent.resolve(&pv).unwrap(), None);
        assert!(!consistent.contains(&pv).unwrap());

        // only one allele is indexed
        let pv = PairwiseVariation::new(allele("genome_1", "chrom_1", 1, "A"), allele("genome_9", "chrom_1", 1, "C"));
        assert_eq!(consistent.resolve(&pv).unwrap(), None);
        let pv = PairwiseVariation::new(allele("genome_0", "chrom_1", 1, "A"), allele("genome_2", "chrom_1", 1, "C"));
        assert_eq!(consistent.resolve(&pv).unwrap(), None);
    }

    #[test]
    fn test_resolve_across_variations_is_fatal() {
        let consistent = ConsistentPangenomeVariations::new(mixed_variations());
        let pv = PairwiseVariation::new(allele("genome_1", "chrom_1", 1, "A"), allele("genome_3", "chrom_2", 9, "T"));
        let err = consistent.resolve(&pv).unwrap_err();
        assert_eq!(err, DeduplicationError::InconsistentPangenomeVariation {
            pairwise_variation: pv.to_string(),
            id_1: 0,
            id_2: 2
        });
        assert!(consistent.contains(&pv).is_err());

        // the annotation pass aborts instead of picking a side
        let rows = vec![SnpRow::new("chrom_1", 1, "A", "chrom_2", 9, "T")];
        assert!(consistent.annotate_comparison("genome_1", "genome_3", &rows).is_err());
    }

    #[test]
    fn test_annotate_comparison() {
        let g2_rows = vec![SnpRow::new("chrom_1", 1, "A", "chrom_2", 2, "C")];
        let g5_rows = vec![
            SnpRow::new("chrom_1", 1, "A", "chrom_1", 7, "T"),
            SnpRow::new("chrom_1", 1, "A", "chrom_1", 8, "T"),
        ];
        let mut graph = DeduplicationGraph::default();
        graph.add_variants_from_comparison("genome_1", "genome_2", &g2_rows).unwrap();
        graph.add_variants_from_comparison("genome_3", "genome_2", &g2_rows).unwrap();
        // genome_5 places the variant at two loci, so this variation is inconsistent
        graph.add_variants_from_comparison("genome_4", "genome_5", &g5_rows).unwrap();
        graph.build_edges();
        let consistent = ConsistentPangenomeVariations::new(graph.get_pangenome_variations().unwrap());
        assert_eq!(consistent.len(), 1);
        assert_eq!(consistent.num_inconsistent(), 1);

        // genome_3 is the reference here, alleles sort as genome_1, genome_2, genome_3
        let mixed_rows = vec![
            SnpRow::new("chrom_1", 1, "", "chrom_2", 2, "C"),
            SnpRow::new("chrom_1", 1, "A", "chrom_2", 2, "C"),
            SnpRow::new("chrom_1", 1, "AC", "chrom_2", 2, "C"),
        ];
        let annotated = consistent.annotate_comparison("genome_3", "genome_2", &mixed_rows).unwrap();
        assert_eq!(annotated.len(), 3);
        assert!(!annotated[0].present_in_consistent_variation);
        assert!(!annotated[2].present_in_consistent_variation);
        assert_eq!(annotated[2].ref_sub, "AC");

        let row = &annotated[1];
        assert!(row.present_in_consistent_variation);
        assert_eq!(row.pangenome_variation_id, Some(0));
        assert_eq!(row.number_of_alleles, Some(3));
        assert_eq!(row.ref_allele_id, Some(2));
        assert_eq!(row.query_allele_id, Some(1));
        assert_eq!(row.number_of_different_allele_sequences, Some(2));
        assert_eq!(row.ref_allele_sequence_id, Some(0));
        assert_eq!(row.query_allele_sequence_id, Some(1));

        // rows from the inconsistent variation are absent
        let annotated = consistent.annotate_comparison("genome_4", "genome_5", &g5_rows).unwrap();
        assert!(annotated.iter().all(|r| !r.present_in_consistent_variation && r.pangenome_variation_id.is_none()));

        assert_eq!(
            consistent.presence_vector("genome_3", "genome_2", &mixed_rows).unwrap(),
            vec![false, true, false]
        );
    }
}
