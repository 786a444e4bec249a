/// Command line interface functionality
pub mod cli;
/// Filters pangenome variations to the consistent ones and annotates comparisons against them
pub mod consistent_variations;
/// Contains various shared data types
pub mod data_types;
/// Graph of pairwise variations linked by shared alleles
pub mod deduplication_graph;
/// Tooling for parsing input files into meaningful structs / data
pub mod parsing;
/// End-to-end run of the deduplicate command
pub mod pipeline;
/// Various utility functions that tend to be very generic
pub mod util;
/// All output writers
pub mod writers;
