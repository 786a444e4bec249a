
use anyhow::bail;
use clap::{Parser, Subcommand};
use chrono::Datelike;
use lazy_static::lazy_static;
use std::path::Path;

use crate::cli::deduplicate::DeduplicateSettings;

lazy_static! {
    /// Stores the full version string we plan to use, which is generated in build.rs
    /// # Examples
    /// * `0.3.1-6bb9635-dirty` - while on a dirty branch
    /// * `0.3.1-6bb9635` - with a fresh commit
    pub static ref FULL_VERSION: String = format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("VERGEN_GIT_DESCRIBE"));

    /// Shared after help string with the license notice.
    pub static ref AFTER_HELP: String = format!("Copyright (C) 2023-{}     snpdedup authors, MIT License.
This program comes with ABSOLUTELY NO WARRANTY.", chrono::Utc::now().year());
}

#[derive(Parser)]
#[clap(author,
    version = &**FULL_VERSION,
    about,
    after_help = &**AFTER_HELP)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

/// snpdedup, collapses pairwise SNP calls into pangenome variations.
/// Select a subcommand to see more usage information:
#[derive(Subcommand)]
pub enum Commands {
    /// Deduplicates SNPs from many pairwise genome comparisons and annotates each comparison
    Deduplicate(Box<DeduplicateSettings>)
}

pub fn get_cli() -> Cli {
    Cli::parse()
}

/// Checks if a file exists and will otherwise exit
/// # Arguments
/// * `filename` - the file path to check for
/// * `label` - the label to use for error messages
pub fn check_required_filename(filename: &Path, label: &str) -> anyhow::Result<()> {
    if !filename.exists() {
        bail!("{} does not exist: \"{}\"", label, filename.display());
    }
    Ok(())
}

/// Checks if an optional file exists and will otherwise exit
/// # Arguments
/// * `opt_filename` - the file path to check for, if provided
/// * `label` - the label to use for error messages
pub fn check_optional_filename(opt_filename: Option<&Path>, label: &str) -> anyhow::Result<()> {
    if let Some(filename) = opt_filename {
        check_required_filename(filename, label)?;
    }

    // file either was not specified OR it exists
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_filename_checks() {
        let exists = PathBuf::from("test_data/pipeline/comparisons.fofn");
        let missing = PathBuf::from("test_data/pipeline/missing.fofn");
        assert!(check_required_filename(&exists, "List").is_ok());
        let err = check_required_filename(&missing, "List").unwrap_err();
        assert_eq!(err.to_string(), "List does not exist: \"test_data/pipeline/missing.fofn\"");
        assert!(check_optional_filename(None, "List").is_ok());
        assert!(check_optional_filename(Some(&missing), "List").is_err());
    }
}
