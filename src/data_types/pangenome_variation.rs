
use itertools::Itertools;
use rustc_hash::FxHashMap as HashMap;
use serde::Serialize;

use crate::data_types::allele::Allele;

/// One true variant site across the whole genome collection.
/// Built from one connected component of the deduplication graph and immutable afterwards.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PangenomeVariation {
    /// Enumeration index of the source component
    id: usize,
    /// All distinct alleles in the component, sorted
    alleles: Vec<Allele>,
    /// Sorted distinct bases among `alleles`
    unique_allele_sequences: Vec<u8>,
}

impl PangenomeVariation {
    /// Creates a new pangenome variation; duplicate alleles are collapsed.
    /// # Arguments
    /// * `id` - the component index
    /// * `alleles` - every allele referenced by the component, duplicates allowed
    pub fn new(id: usize, alleles: impl IntoIterator<Item = Allele>) -> Self {
        let alleles: Vec<Allele> = alleles.into_iter()
            .sorted()
            .dedup()
            .collect();
        let unique_allele_sequences: Vec<u8> = alleles.iter()
            .map(|a| a.base())
            .sorted()
            .dedup()
            .collect();
        Self {
            id,
            alleles,
            unique_allele_sequences
        }
    }

    /// A variation is consistent if every genome that contributes alleles places them at a single (chrom, pos).
    pub fn is_consistent(&self) -> bool {
        let mut genome_locus: HashMap<&str, (&str, u64)> = Default::default();
        for allele in self.alleles.iter() {
            let locus = allele.locus();
            if *genome_locus.entry(allele.genome()).or_insert(locus) != locus {
                return false;
            }
        }
        true
    }

    /// Returns the index of `allele` in the sorted allele list, or None if it is not part of this variation
    pub fn allele_index(&self, allele: &Allele) -> Option<usize> {
        self.alleles.binary_search(allele).ok()
    }

    /// Returns the index of `base` in the sorted distinct allele sequences, or None if it is not present
    pub fn allele_sequence_index(&self, base: u8) -> Option<usize> {
        self.unique_allele_sequences.binary_search(&base).ok()
    }

    /// Returns true if `allele` is part of this variation
    pub fn contains(&self, allele: &Allele) -> bool {
        self.allele_index(allele).is_some()
    }

    /// The distinct genomes contributing to this variation, sorted
    pub fn genomes(&self) -> Vec<&str> {
        // alleles are sorted by genome first, so a simple dedup is enough
        self.alleles.iter()
            .map(|a| a.genome())
            .dedup()
            .collect()
    }

    // getters
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn alleles(&self) -> &[Allele] {
        &self.alleles
    }

    pub fn number_of_alleles(&self) -> usize {
        self.alleles.len()
    }

    pub fn unique_allele_sequences(&self) -> &[u8] {
        &self.unique_allele_sequences
    }

    pub fn number_of_different_allele_sequences(&self) -> usize {
        self.unique_allele_sequences.len()
    }
}

/// Collection of all pangenome variations in component enumeration order
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct PangenomeVariations {
    pangenome_variations: Vec<PangenomeVariation>,
}

impl PangenomeVariations {
    pub fn new(pangenome_variations: Vec<PangenomeVariation>) -> Self {
        Self {
            pangenome_variations
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PangenomeVariation> {
        self.pangenome_variations.iter()
    }

    pub fn len(&self) -> usize {
        self.pangenome_variations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pangenome_variations.is_empty()
    }

    pub fn pangenome_variations(&self) -> &[PangenomeVariation] {
        &self.pangenome_variations
    }
}

impl IntoIterator for PangenomeVariations {
    type Item = PangenomeVariation;
    type IntoIter = std::vec::IntoIter<PangenomeVariation>;

    fn into_iter(self) -> Self::IntoIter {
        self.pangenome_variations.into_iter()
    }
}
