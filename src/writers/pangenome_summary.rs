
use itertools::Itertools;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

use crate::data_types::pangenome_variation::PangenomeVariation;

/// Separator between alleles in the `alleles` column
const ALLELE_SEPARATOR: &str = ";";

/// This is a wrapper for writing out one line per pangenome variation
pub struct PangenomeSummaryWriter {
    /// Handle on the writer
    csv_writer: csv::Writer<File>,
    /// Number of rows written so far
    rows_written: usize
}

/// Contains all the data written to each row of the pangenome variation file
#[derive(Serialize)]
struct PangenomeSummaryRow {
    /// Identifier of the variation
    pangenome_variation_id: usize,
    /// True if every genome contributes a single locus
    consistent: bool,
    /// Number of distinct genomes in the variation
    number_of_genomes: usize,
    /// Number of distinct alleles
    number_of_alleles: usize,
    /// Distinct bases, concatenated in sorted order
    unique_allele_sequences: String,
    /// All alleles as `genome:chrom:pos:base`, in sorted order
    alleles: String
}

impl PangenomeSummaryRow {
    /// Creates a new row from a pangenome variation
    fn new(pangenome_variation: &PangenomeVariation) -> Self {
        Self {
            pangenome_variation_id: pangenome_variation.id(),
            consistent: pangenome_variation.is_consistent(),
            number_of_genomes: pangenome_variation.genomes().len(),
            number_of_alleles: pangenome_variation.number_of_alleles(),
            unique_allele_sequences: String::from_utf8_lossy(pangenome_variation.unique_allele_sequences()).to_string(),
            alleles: pangenome_variation.alleles().iter().join(ALLELE_SEPARATOR)
        }
    }
}

impl PangenomeSummaryWriter {
    /// Creates a new writer for the pangenome variations
    /// # Arguments
    /// * `filename` - path to the filename that will get opened, must be .csv/.tsv
    pub fn new(filename: &Path) -> csv::Result<Self> {
        // modify the delimiter to "," if it ends with .csv
        let is_csv: bool = filename.extension().unwrap_or_default() == "csv";
        let delimiter: u8 = if is_csv { b',' } else { b'\t' };
        let csv_writer: csv::Writer<File> = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_path(filename)?;
        Ok(Self {
            csv_writer,
            rows_written: 0
        })
    }

    /// Writes a single pangenome variation
    pub fn write_variation(&mut self, pangenome_variation: &PangenomeVariation) -> csv::Result<()> {
        let row = PangenomeSummaryRow::new(pangenome_variation);
        self.csv_writer.serialize(&row)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Writes every variation in the given order
    pub fn write_variations<'a>(&mut self, pangenome_variations: impl IntoIterator<Item = &'a PangenomeVariation>) -> csv::Result<()> {
        for pangenome_variation in pangenome_variations {
            self.write_variation(pangenome_variation)?;
        }
        Ok(())
    }

    /// Flushes the output and returns the number of rows written
    pub fn finalize(mut self) -> csv::Result<usize> {
        self.csv_writer.flush()?;
        Ok(self.rows_written)
    }
}
