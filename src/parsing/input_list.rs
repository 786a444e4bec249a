
use anyhow::{anyhow, Context};
use std::path::{Path, PathBuf};

/// Lines starting with this are ignored in an input list
const COMMENT_PREFIX: u8 = b'#';

/// Loads a file-of-filenames with one comparison file per line.
/// Blank lines and lines starting with `#` are ignored, and only the first tab-separated column is used.
/// Relative paths are resolved against the folder containing the list.
/// # Errors
/// * if the list cannot be opened or read
pub fn load_input_list(list_fn: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false) // no headers in the file, disable so we do not skip first row
        .comment(Some(COMMENT_PREFIX))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(list_fn)
        .with_context(|| format!("Error while opening {list_fn:?}:"))?;

    let list_folder = match list_fn.parent() {
        Some(parent) => parent.to_path_buf(),
        None => PathBuf::default()
    };

    let mut filenames = vec![];
    for result in csv_reader.records() {
        let row = result.with_context(|| format!("Error while reading {list_fn:?}"))?;
        let filename = row.get(0).ok_or(anyhow!("Missing filename on row: {row:?}"))?;
        if filename.is_empty() {
            continue;
        }

        let raw_path = PathBuf::from(filename);
        let full_path = if raw_path.has_root() {
            raw_path
        } else {
            list_folder.join(raw_path)
        };
        filenames.push(full_path);
    }
    Ok(filenames)
}
