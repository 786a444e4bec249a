/*!
# Writers module
Contains the logic for writing the output files of the deduplicate command.
*/
/// Writes the per-comparison annotated SNP tables
pub mod annotated_snps;
/// Generates the pangenome variation file; each line corresponds to one variation
pub mod pangenome_summary;
