
use anyhow::Context;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Returns true if the path should be treated as gzip compressed
fn is_gzipped(filename: &Path) -> bool {
    filename.extension().unwrap_or_default() == "gz"
}

/// Loads a JSON file into any deserializable type, decompressing if the path ends with .gz
/// # Arguments
/// * `filename` - the file path to open and parse
/// # Errors
/// * if the file does not open properly
/// * if the deserialization throws errors
pub fn load_json<T: serde::de::DeserializeOwned>(filename: &Path) -> anyhow::Result<T> {
    let file = File::open(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;
    let reader: Box<dyn Read> = if is_gzipped(filename) {
        Box::new(flate2::read::MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };
    serde_json::from_reader(BufReader::new(reader))
        .with_context(|| format!("Error while deserializing {filename:?}:"))
}

/// Saves a serializable struct as pretty JSON, compressing if the path ends with .gz
/// # Arguments
/// * `data` - the data in memory
/// * `out_filename` - path to write to
/// # Errors
/// * if opening or writing to the file throw errors
/// * if JSON serialization throws errors
pub fn save_json<T: serde::Serialize>(data: &T, out_filename: &Path) -> anyhow::Result<()> {
    let file = File::create(out_filename)
        .with_context(|| format!("Error while creating {out_filename:?}:"))?;
    let writer: Box<dyn Write> = if is_gzipped(out_filename) {
        Box::new(flate2::write::GzEncoder::new(file, flate2::Compression::best()))
    } else {
        Box::new(file)
    };
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, data)
        .with_context(|| format!("Error while serializing {out_filename:?}:"))?;
    writer.flush()
        .with_context(|| format!("Error while flushing output to {out_filename:?}:"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::dedup_summary::DeduplicationSummary;

    #[test]
    fn test_summary_json() {
        let out_folder = std::env::temp_dir().join(format!("snpdedup_json_io_{}", std::process::id()));
        std::fs::create_dir_all(&out_folder).unwrap();

        let summary = DeduplicationSummary {
            comparisons: 3,
            snp_rows: 6,
            present_rows: 3,
            ..Default::default()
        };
        for name in ["summary.json", "summary.json.gz"] {
            let out_fn = out_folder.join(name);
            save_json(&summary, &out_fn).unwrap();
            let loaded: DeduplicationSummary = load_json(&out_fn).unwrap();
            assert_eq!(loaded, summary);
        }

        // plain output is readable text
        let content = std::fs::read_to_string(out_folder.join("summary.json")).unwrap();
        assert!(content.contains("\"comparisons\": 3"));

        std::fs::remove_dir_all(&out_folder).unwrap();
    }
}
