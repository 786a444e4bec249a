/*!
# Parsing module
Contains the logic for parsing input files into meaningful structs / data.
*/
/// Derives the genome labels of a comparison from its file name
pub mod comparison_name;
/// Loads file-of-filenames inputs
pub mod input_list;
/// Loads pairwise comparison tables, either delimited tables or raw show-snps output
pub mod snps_table;
