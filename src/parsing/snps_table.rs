
use anyhow::{bail, Context};
use log::debug;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use strum_macros::EnumString;

use crate::data_types::snp_row::SnpRow;

/// The column header line of show-snps output starts with `[P1]`
const SHOW_SNPS_HEADER_COMMENT: u8 = b'[';
/// The header block of show-snps is at most this many lines
const SHOW_SNPS_MAX_HEADER_LINES: u64 = 4;
/// Number of columns produced by `show-snps -rlTC -x`
const SHOW_SNPS_COLUMNS: usize = 14;

/// Supported layouts for a pairwise comparison table
#[derive(Clone, Copy, Default, Debug, Eq, PartialEq, strum_macros::Display, EnumString, Serialize, clap::ValueEnum)]
pub enum SnpTableFormat {
    /// Pick based on the file name; `.snps` is show-snps output, anything else is a table
    #[default]
    #[strum(ascii_case_insensitive, serialize = "auto")]
    #[clap(name = "auto")]
    Auto,
    /// Delimited table with a header row naming the columns
    #[strum(ascii_case_insensitive, serialize = "table")]
    #[clap(name = "table")]
    Table,
    /// Raw output of `show-snps -rlTC -x <context>`
    #[strum(ascii_case_insensitive, serialize = "show-snps")]
    #[clap(name = "show-snps")]
    ShowSnps,
}

impl SnpTableFormat {
    /// Converts `Auto` into a concrete format for the given file
    pub fn resolve(self, filename: &Path) -> SnpTableFormat {
        match self {
            SnpTableFormat::Auto => {
                let name = filename.to_string_lossy();
                if name.ends_with(".snps") || name.ends_with(".snps.gz") {
                    SnpTableFormat::ShowSnps
                } else {
                    SnpTableFormat::Table
                }
            },
            other => other
        }
    }
}

/// Opens a file for buffered reading, decompressing if it ends with .gz
fn open_reader(filename: &Path) -> anyhow::Result<Box<dyn Read>> {
    let file = File::open(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;
    let reader: Box<dyn Read> = if filename.extension().unwrap_or_default() == "gz" {
        Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(reader)
}

/// Loads every row of one pairwise comparison into memory, in file order.
/// # Arguments
/// * `filename` - the comparison file, optionally gzipped
/// * `format` - the layout of the file
/// # Errors
/// * if the file cannot be opened or a row fails to parse
pub fn load_snp_table(filename: &Path, format: SnpTableFormat) -> anyhow::Result<Vec<SnpRow>> {
    let format = format.resolve(filename);
    let reader = open_reader(filename)?;
    let rows = match format {
        SnpTableFormat::ShowSnps => parse_show_snps(reader),
        SnpTableFormat::Auto | SnpTableFormat::Table => {
            // comma if it is a .csv, optionally gzipped
            let is_csv = filename.to_string_lossy().trim_end_matches(".gz").ends_with(".csv");
            parse_table(reader, if is_csv { b',' } else { b'\t' })
        }
    }.with_context(|| format!("Error while parsing {filename:?}:"))?;

    debug!("Loaded {} rows from {filename:?} as {format}", rows.len());
    Ok(rows)
}

/// Parses a delimited table with a header row.
/// # Arguments
/// * `reader` - the table content
/// * `delimiter` - the field delimiter
pub fn parse_table<R: Read>(reader: R, delimiter: u8) -> anyhow::Result<Vec<SnpRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(reader);

    csv_reader.deserialize::<SnpRow>()
        .enumerate()
        .map(|(i, result)| result.with_context(|| format!("Error while reading table row #{}", i + 1)))
        .collect()
}

/// Parses raw `show-snps -rlTC -x` output. The header block is skipped if present (`-H` removes it).
/// Columns are in the same order as the fields of `SnpRow`, so each line deserializes by position.
pub fn parse_show_snps<R: std::io::Read>(reader: R) -> anyhow::Result<Vec<SnpRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false) // the column header line is a comment, see below
        .comment(Some(SHOW_SNPS_HEADER_COMMENT))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = vec![];
    for result in csv_reader.records() {
        let record = result.context("Error while reading show-snps output")?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        // the file names and the alignment program are single-field lines at the top
        if line <= SHOW_SNPS_MAX_HEADER_LINES && record.len() == 1 {
            continue;
        }
        if record.len() != SHOW_SNPS_COLUMNS {
            bail!("Expected {SHOW_SNPS_COLUMNS} columns on show-snps line #{line}, found {}", record.len());
        }

        let row: SnpRow = record.deserialize(None)
            .with_context(|| format!("Error while parsing show-snps line #{line}: {record:?}"))?;
        rows.push(row);
    }
    Ok(rows)
}
