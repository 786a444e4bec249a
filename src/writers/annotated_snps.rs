
use anyhow::Context;
use std::fs::File;
use std::path::Path;

use crate::data_types::annotated_snp_row::AnnotatedSnpRow;

/// Writes the annotated rows of one comparison in input order.
/// Absent rows have empty annotation fields.
/// # Arguments
/// * `filename` - output path, comma-delimited if it ends with .csv, otherwise tab-delimited
/// * `rows` - the annotated rows
/// * `exclude_absent` - if true, rows not present in a consistent variation are dropped
/// # Errors
/// * if the file cannot be created or a row fails to serialize
pub fn write_annotated_rows(filename: &Path, rows: &[AnnotatedSnpRow], exclude_absent: bool) -> anyhow::Result<usize> {
    // modify the delimiter to "," if it ends with .csv
    let is_csv: bool = filename.extension().unwrap_or_default() == "csv";
    let delimiter: u8 = if is_csv { b',' } else { b'\t' };
    let mut csv_writer: csv::Writer<File> = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(filename)
        .with_context(|| format!("Error while creating {filename:?}:"))?;

    let mut rows_written = 0;
    for row in rows.iter().filter(|r| !exclude_absent || r.present_in_consistent_variation) {
        csv_writer.serialize(row)
            .with_context(|| format!("Error while writing row to {filename:?}:"))?;
        rows_written += 1;
    }

    csv_writer.flush()
        .with_context(|| format!("Error while flushing output to {filename:?}:"))?;
    Ok(rows_written)
}
