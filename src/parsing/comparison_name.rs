
use std::path::Path;

/// Recognized comparison file suffixes, most specific first
const KNOWN_SUFFIXES: [&str; 6] = [
    ".snps_df.tsv.gz",
    ".snps_df.csv.gz",
    ".snps_df.tsv",
    ".snps_df.csv",
    ".snps.gz",
    ".snps",
];

/// Separator between the two genome labels in a comparison file name
const GENOME_SEPARATOR: &str = "_and_";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ComparisonNameError {
    #[error("path has no file name: {path:?}")]
    MissingFilename { path: String },
    #[error("file name {filename:?} does not end with a known comparison suffix")]
    UnknownSuffix { filename: String },
    #[error("file name {filename:?} does not match <ref>_and_<query>")]
    MissingSeparator { filename: String },
}

/// The two genome labels of a pairwise comparison
#[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct ComparisonName {
    /// Reference genome label
    ref_genome: String,
    /// Query genome label
    query_genome: String,
}

impl ComparisonName {
    pub fn new(ref_genome: String, query_genome: String) -> Self {
        Self {
            ref_genome,
            query_genome
        }
    }

    /// Parses `<ref>_and_<query>.<suffix>` from the file name of `path`.
    /// If `_and_` occurs more than once, the last occurrence splits the labels.
    /// # Errors
    /// * if the path has no file name, an unknown suffix, or no separator
    pub fn from_path(path: &Path) -> Result<Self, ComparisonNameError> {
        let filename = path.file_name()
            .and_then(|f| f.to_str())
            .ok_or_else(|| ComparisonNameError::MissingFilename { path: format!("{path:?}") })?;

        let stem = KNOWN_SUFFIXES.iter()
            .find_map(|suffix| filename.strip_suffix(suffix))
            .ok_or_else(|| ComparisonNameError::UnknownSuffix { filename: filename.to_string() })?;

        match stem.rsplit_once(GENOME_SEPARATOR) {
            Some((ref_genome, query_genome)) if !ref_genome.is_empty() && !query_genome.is_empty() => {
                Ok(Self::new(ref_genome.to_string(), query_genome.to_string()))
            },
            _ => Err(ComparisonNameError::MissingSeparator { filename: filename.to_string() })
        }
    }

    /// The base name used for this comparison's output files
    pub fn output_stem(&self) -> String {
        format!("{}{GENOME_SEPARATOR}{}", self.ref_genome, self.query_genome)
    }

    // getters
    pub fn ref_genome(&self) -> &str {
        &self.ref_genome
    }

    pub fn query_genome(&self) -> &str {
        &self.query_genome
    }
}

impl std::fmt::Display for ComparisonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} vs {}", self.ref_genome, self.query_genome)
    }
}
