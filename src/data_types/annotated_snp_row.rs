
use serde::{Deserialize, Serialize};

use crate::data_types::pairwise_variation::PairwiseVariation;
use crate::data_types::pangenome_variation::PangenomeVariation;
use crate::data_types::snp_row::SnpRow;

/// Where one pairwise variation sits inside its pangenome variation
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VariationAnnotation {
    /// Identifier of the pangenome variation
    pub pangenome_variation_id: usize,
    /// Total distinct alleles in the pangenome variation
    pub number_of_alleles: usize,
    /// Index of the reference-side allele in the pangenome variation
    pub ref_allele_id: usize,
    /// Index of the query-side allele in the pangenome variation
    pub query_allele_id: usize,
    /// Total distinct bases in the pangenome variation
    pub number_of_different_allele_sequences: usize,
    /// Index of the reference-side base among the distinct bases
    pub ref_allele_sequence_id: usize,
    /// Index of the query-side base among the distinct bases
    pub query_allele_sequence_id: usize,
}

impl VariationAnnotation {
    /// Locates both sides of `pairwise_variation` in `pangenome_variation`.
    /// Returns None if either allele is not part of it.
    pub fn new(pairwise_variation: &PairwiseVariation, pangenome_variation: &PangenomeVariation) -> Option<Self> {
        let ref_allele = pairwise_variation.ref_allele();
        let query_allele = pairwise_variation.query_allele();
        Some(Self {
            pangenome_variation_id: pangenome_variation.id(),
            number_of_alleles: pangenome_variation.number_of_alleles(),
            ref_allele_id: pangenome_variation.allele_index(ref_allele)?,
            query_allele_id: pangenome_variation.allele_index(query_allele)?,
            number_of_different_allele_sequences: pangenome_variation.number_of_different_allele_sequences(),
            ref_allele_sequence_id: pangenome_variation.allele_sequence_index(ref_allele.base())?,
            query_allele_sequence_id: pangenome_variation.allele_sequence_index(query_allele.base())?,
        })
    }
}

/// A comparison table row extended with its deduplication result.
/// Rows that are not part of a consistent pangenome variation have empty annotation fields.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct AnnotatedSnpRow {
    pub ref_pos: u64,
    pub ref_sub: String,
    pub query_sub: String,
    pub query_pos: u64,
    pub nearest_mismatch: u64,
    pub nearest_end: u64,
    pub ref_len: u64,
    pub query_len: u64,
    pub ref_context: String,
    pub query_context: String,
    pub ref_strand: i8,
    pub query_strand: i8,
    pub ref_chrom: String,
    pub query_chrom: String,
    pub present_in_consistent_variation: bool,
    pub pangenome_variation_id: Option<usize>,
    pub number_of_alleles: Option<usize>,
    pub ref_allele_id: Option<usize>,
    pub query_allele_id: Option<usize>,
    pub number_of_different_allele_sequences: Option<usize>,
    pub ref_allele_sequence_id: Option<usize>,
    pub query_allele_sequence_id: Option<usize>,
}

impl AnnotatedSnpRow {
    /// Combines an input row with its annotation, if any
    pub fn new(row: &SnpRow, annotation: Option<VariationAnnotation>) -> Self {
        Self {
            ref_pos: row.ref_pos,
            ref_sub: row.ref_sub.clone(),
            query_sub: row.query_sub.clone(),
            query_pos: row.query_pos,
            nearest_mismatch: row.nearest_mismatch,
            nearest_end: row.nearest_end,
            ref_len: row.ref_len,
            query_len: row.query_len,
            ref_context: row.ref_context.clone(),
            query_context: row.query_context.clone(),
            ref_strand: row.ref_strand,
            query_strand: row.query_strand,
            ref_chrom: row.ref_chrom.clone(),
            query_chrom: row.query_chrom.clone(),
            present_in_consistent_variation: annotation.is_some(),
            pangenome_variation_id: annotation.map(|a| a.pangenome_variation_id),
            number_of_alleles: annotation.map(|a| a.number_of_alleles),
            ref_allele_id: annotation.map(|a| a.ref_allele_id),
            query_allele_id: annotation.map(|a| a.query_allele_id),
            number_of_different_allele_sequences: annotation.map(|a| a.number_of_different_allele_sequences),
            ref_allele_sequence_id: annotation.map(|a| a.ref_allele_sequence_id),
            query_allele_sequence_id: annotation.map(|a| a.query_allele_sequence_id),
        }
    }
}
