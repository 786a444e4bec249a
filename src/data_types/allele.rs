
use serde::Serialize;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum AlleleError {
    #[error("sequence {sequence:?} is not a SNP, expected exactly 1 base")]
    NotASnp { sequence: String },
}

/// A single observed base at a genome locus.
/// Equality, hashing, and ordering cover all four fields, compared in the order
/// `(genome, chrom, pos, base)`, so the same locus observed with two different
/// bases yields two different alleles.
#[derive(Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize)]
pub struct Allele {
    /// Genome label this allele was observed in
    genome: String,
    /// Chromosome (contig) within the genome
    chrom: String,
    /// 1-based position on the chromosome
    pos: u64,
    /// The observed base
    base: u8,
}

impl Allele {
    /// Creates a new allele from a substitution sequence.
    /// # Arguments
    /// * `genome` - the genome label
    /// * `chrom` - the chromosome in the genome
    /// * `pos` - 1-based position on `chrom`
    /// * `sequence` - the observed substitution, must be exactly one base
    /// # Errors
    /// * if `sequence` is empty (deletion) or longer than one base
    pub fn new(genome: &str, chrom: &str, pos: u64, sequence: &str) -> Result<Allele, AlleleError> {
        let base = match sequence.as_bytes() {
            &[b] => b,
            _ => return Err(AlleleError::NotASnp { sequence: sequence.to_string() })
        };

        Ok(Allele {
            genome: genome.to_string(),
            chrom: chrom.to_string(),
            pos,
            base
        })
    }

    // getters
    pub fn genome(&self) -> &str {
        &self.genome
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn pos(&self) -> u64 {
        self.pos
    }

    pub fn base(&self) -> u8 {
        self.base
    }

    /// Returns the (chrom, pos) locus within this allele's genome
    pub fn locus(&self) -> (&str, u64) {
        (&self.chrom, self.pos)
    }
}

impl std::fmt::Display for Allele {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}:{}", self.genome, self.chrom, self.pos, self.base as char)
    }
}
