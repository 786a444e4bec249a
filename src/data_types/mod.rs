
/// A single-base observation at one position of one genome
pub mod allele;
/// Comparison table rows extended with their deduplication result
pub mod annotated_snp_row;
/// Counters for a full deduplication run
pub mod dedup_summary;
/// An unordered pair of alleles observed to differ in one comparison
pub mod pairwise_variation;
/// A deduplicated variant site spanning many genomes
pub mod pangenome_variation;
/// One row of a pairwise comparison table
pub mod snp_row;
