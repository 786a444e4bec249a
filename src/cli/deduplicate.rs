
use anyhow::{bail, Context};
use clap::Args;
use log::info;
use rustc_hash::FxHashMap as HashMap;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::core::{check_optional_filename, check_required_filename, AFTER_HELP, FULL_VERSION};
use crate::parsing::comparison_name::ComparisonName;
use crate::parsing::input_list::load_input_list;
use crate::parsing::snps_table::SnpTableFormat;

#[derive(Args, Clone, Default, Serialize)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct DeduplicateSettings {
    #[clap(default_value = "")]
    #[clap(hide = true)]
    pub snpdedup_version: String,

    /// Pairwise comparison file named <ref>_and_<query>.<suffix>; can be specified multiple times
    #[clap(short = 'i')]
    #[clap(long = "input")]
    #[clap(value_name = "FILE")]
    #[clap(help_heading = Some("Input/Output"))]
    pub input_filenames: Vec<PathBuf>,

    /// File-of-filenames with one pairwise comparison file per line
    #[clap(long = "input-list")]
    #[clap(value_name = "FOFN")]
    #[clap(help_heading = Some("Input/Output"))]
    pub input_list: Option<PathBuf>,

    /// Layout of the comparison files
    #[clap(long = "input-format")]
    #[clap(value_name = "FORMAT")]
    #[clap(help_heading = Some("Input/Output"))]
    #[clap(default_value = "auto")]
    pub input_format: SnpTableFormat,

    /// Output directory containing the pangenome variations and annotated comparisons
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-dir")]
    #[clap(value_name = "DIR")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_folder: PathBuf,

    /// Optional output debug folder
    #[clap(long = "output-debug")]
    #[clap(value_name = "DIR")]
    #[clap(help_heading = Some("Input/Output"))]
    pub debug_folder: Option<PathBuf>,

    /// Only write rows that are present in a consistent pangenome variation
    #[clap(long = "exclude-absent")]
    #[clap(help_heading = Some("Output options"))]
    pub exclude_absent: bool,

    /// Number of threads to use for loading and annotation
    #[clap(long = "threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    pub threads: usize,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

pub fn check_deduplicate_settings(mut settings: DeduplicateSettings) -> anyhow::Result<DeduplicateSettings> {
    // hard code the version in
    settings.snpdedup_version = FULL_VERSION.clone();
    info!("snpdedup version: {:?}", &settings.snpdedup_version);
    info!("Sub-command: deduplicate");
    info!("Inputs:");

    // pull in anything from the list
    check_optional_filename(settings.input_list.as_deref(), "Input list")?;
    if let Some(list_fn) = settings.input_list.as_deref() {
        info!("\tInput list: {list_fn:?}");
        let listed = load_input_list(list_fn)
            .with_context(|| format!("Error while loading input list {list_fn:?}:"))?;
        settings.input_filenames.extend(listed);
    }

    if settings.input_filenames.is_empty() {
        bail!("At least one comparison must be provided with --input or --input-list");
    }

    // every comparison must exist and have a parseable name; two files may not describe the same pair
    let mut seen_pairs: HashMap<String, PathBuf> = Default::default();
    for filename in settings.input_filenames.iter() {
        check_required_filename(filename, "Comparison file")?;
        let comparison = ComparisonName::from_path(filename)
            .with_context(|| format!("Error while parsing comparison name from {filename:?}:"))?;
        if let Some(previous) = seen_pairs.insert(comparison.output_stem(), filename.clone()) {
            bail!("Comparison {comparison} is provided twice: {previous:?} and {filename:?}");
        }
        info!("\t{comparison}: {filename:?}");
    }
    info!("\tComparisons: {}", settings.input_filenames.len());
    info!("\tInput format: {}", settings.input_format);

    // outputs
    info!("Outputs:");
    info!("\tOutput folder: {:?}", &settings.output_folder);
    if let Some(debug_folder) = settings.debug_folder.as_ref() {
        info!("\tDebug folder: {debug_folder:?}");
    }
    if settings.exclude_absent {
        info!("\tAbsent rows: EXCLUDED");
    }

    if settings.threads == 0 {
        settings.threads = 1;
    }
    info!("Processing threads: {}", settings.threads);

    Ok(settings)
}
