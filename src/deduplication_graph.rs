/*!
# Deduplication Graph
Merges the SNPs observed across many pairwise genome comparisons into pangenome variations.

Every distinct `PairwiseVariation` is a node, and two nodes are connected if they share an `Allele`.
Each connected component is one true variant site across the genome collection.
Rather than comparing all node pairs, each allele keeps the list of nodes that reference it and
those nodes are chained into a path, so edge construction is linear in the number of nodes.

The graph is built in strict phases:
1. `add_variants_from_comparison(...)` for every comparison
2. `build_edges()`
3. `connected_components()` / `get_pangenome_variations()`

## Example usage
```rust
use snpdedup::data_types::snp_row::SnpRow;
use snpdedup::deduplication_graph::DeduplicationGraph;

// the same reference-side allele in genome g2 is seen against three other genomes
let rows = vec![SnpRow::new("chrom_1", 1, "A", "chrom_2", 2, "C")];
let mut graph = DeduplicationGraph::default();
for other in ["g1", "g3", "g4"] {
    graph.add_variants_from_comparison(other, "g2", &rows).unwrap();
}
graph.build_edges();

let pangenome_variations = graph.get_pangenome_variations().unwrap();
assert_eq!(pangenome_variations.len(), 1);
assert_eq!(pangenome_variations.pangenome_variations()[0].number_of_alleles(), 4);
assert!(pangenome_variations.pangenome_variations()[0].is_consistent());
```
*/
use indexmap::IndexSet;
use itertools::Itertools;
use log::debug;
use rustc_hash::{FxBuildHasher, FxHashMap as HashMap};

use crate::data_types::allele::Allele;
use crate::data_types::pairwise_variation::PairwiseVariation;
use crate::data_types::pangenome_variation::{PangenomeVariation, PangenomeVariations};
use crate::data_types::snp_row::SnpRow;
use crate::util::union_find::UnionFind;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum DeduplicationError {
    #[error("cannot add pairwise variations after the graph edges are built")]
    GraphFinalized,
    #[error("graph edges must be built before computing connected components")]
    EdgesNotBuilt,
    #[error("alleles of pairwise variation {pairwise_variation} belong to different pangenome variations ({id_1} and {id_2})")]
    InconsistentPangenomeVariation { pairwise_variation: String, id_1: usize, id_2: usize },
}

/// Graph of pairwise variations, connected when they share an allele
#[derive(Debug, Default)]
pub struct DeduplicationGraph {
    /// Distinct pairwise variations; the position in the set is the node index
    nodes: IndexSet<PairwiseVariation, FxBuildHasher>,
    /// Lookup from an allele to every node index that references it, in insertion order
    allele_index: HashMap<Allele, Vec<usize>>,
    /// Undirected edges as node index pairs
    edges: Vec<(usize, usize)>,
    /// Set once `build_edges()` has run, freezes the node set
    edges_built: bool,
}

impl DeduplicationGraph {
    /// Adds a single pairwise variation. Returns true if this created a new node.
    /// Re-adding an existing variation, e.g. from another comparison, leaves the graph unchanged.
    /// # Errors
    /// * if the edges were already built
    pub fn add_pairwise_variation(&mut self, pairwise_variation: PairwiseVariation) -> Result<bool, DeduplicationError> {
        if self.edges_built {
            return Err(DeduplicationError::GraphFinalized);
        }

        let (node_index, is_new) = self.nodes.insert_full(pairwise_variation);
        if is_new {
            let pv = &self.nodes[node_index];
            self.allele_index.entry(pv.allele_1().clone()).or_default().push(node_index);
            if pv.allele_2() != pv.allele_1() {
                self.allele_index.entry(pv.allele_2().clone()).or_default().push(node_index);
            }
        }
        Ok(is_new)
    }

    /// Adds all SNPs from one pairwise comparison; rows that are not SNPs are skipped.
    /// Returns the number of SNP rows that were processed.
    /// # Arguments
    /// * `ref_genome` - label of the reference genome in this comparison
    /// * `query_genome` - label of the query genome in this comparison
    /// * `rows` - the comparison table
    /// # Errors
    /// * if the edges were already built
    pub fn add_variants_from_comparison(&mut self, ref_genome: &str, query_genome: &str, rows: &[SnpRow]) -> Result<usize, DeduplicationError> {
        let mut snp_count = 0;
        let mut new_count = 0;
        for pairwise_variation in PairwiseVariation::from_snp_rows(ref_genome, query_genome, rows) {
            snp_count += 1;
            if self.add_pairwise_variation(pairwise_variation)? {
                new_count += 1;
            }
        }
        debug!("Comparison {ref_genome} vs {query_genome}: {} rows, {snp_count} SNPs, {new_count} new nodes", rows.len());
        Ok(snp_count)
    }

    /// Connects every group of nodes that share an allele with a path through the group.
    /// Must be called once all comparisons are added; no nodes can be added afterwards.
    /// Returns the number of edges.
    pub fn build_edges(&mut self) -> usize {
        // iterate alleles in a fixed order so the edge list is reproducible
        let mut shared: Vec<(&Allele, &Vec<usize>)> = self.allele_index.iter()
            .filter(|(_allele, node_indices)| node_indices.len() > 1)
            .collect();
        shared.sort_unstable_by(|a, b| a.0.cmp(b.0));

        self.edges = shared.into_iter()
            .flat_map(|(_allele, node_indices)| node_indices.iter().copied().tuple_windows())
            .collect();
        self.edges_built = true;
        debug!("Built {} edges over {} nodes", self.edges.len(), self.nodes.len());
        self.edges.len()
    }

    /// Partitions the node indices into connected components.
    /// Components are ordered by their first-inserted node, and indices within a component are ascending.
    fn component_indices(&self) -> Result<Vec<Vec<usize>>, DeduplicationError> {
        if !self.edges_built {
            return Err(DeduplicationError::EdgesNotBuilt);
        }

        let mut union_find = UnionFind::new(self.nodes.len());
        for &(a, b) in self.edges.iter() {
            union_find.union(a, b);
        }
        Ok(union_find.groups())
    }

    /// Returns the maximal connected subsets of nodes.
    /// # Errors
    /// * if `build_edges()` was not called first
    pub fn connected_components(&self) -> Result<Vec<Vec<&PairwiseVariation>>, DeduplicationError> {
        let components = self.component_indices()?
            .into_iter()
            .map(|indices| {
                indices.into_iter()
                    .map(|i| &self.nodes[i])
                    .collect()
            })
            .collect();
        Ok(components)
    }

    /// Converts each connected component into a pangenome variation, with IDs in component order.
    /// # Errors
    /// * if `build_edges()` was not called first
    pub fn get_pangenome_variations(&self) -> Result<PangenomeVariations, DeduplicationError> {
        let pangenome_variations: Vec<PangenomeVariation> = self.connected_components()?
            .into_iter()
            .enumerate()
            .map(|(component_index, component)| {
                let alleles = component.into_iter()
                    .flat_map(|pv| [pv.allele_1().clone(), pv.allele_2().clone()]);
                PangenomeVariation::new(component_index, alleles)
            })
            .collect();
        debug!("Derived {} pangenome variations", pangenome_variations.len());
        Ok(PangenomeVariations::new(pangenome_variations))
    }

    // getters
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
}
