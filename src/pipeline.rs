/*!
# Deduplication pipeline
Runs a full deduplication from comparison files on disk to annotated outputs:
1. all comparison tables are loaded in parallel
2. every SNP is ingested into a single graph, one comparison at a time
3. edges are built and the connected components become pangenome variations
4. inconsistent variations are dropped
5. every comparison is annotated in parallel against the read-only consistent set and written out
*/
use anyhow::Context;
use indicatif::{ParallelProgressIterator, ProgressBar};
use log::{debug, info};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::cli::deduplicate::DeduplicateSettings;
use crate::consistent_variations::ConsistentPangenomeVariations;
use crate::data_types::dedup_summary::DeduplicationSummary;
use crate::data_types::snp_row::SnpRow;
use crate::deduplication_graph::DeduplicationGraph;
use crate::parsing::comparison_name::ComparisonName;
use crate::parsing::snps_table::{load_snp_table, SnpTableFormat};
use crate::util::json_io::save_json;
use crate::util::progress_bar::get_progress_style;
use crate::writers::annotated_snps::write_annotated_rows;
use crate::writers::pangenome_summary::PangenomeSummaryWriter;

/// File with one line per pangenome variation
pub const PANGENOME_VARIATIONS_FN: &str = "pangenome_variations.tsv";
/// Run summary
pub const SUMMARY_FN: &str = "summary.json";
/// Sub-folder with one annotated table per comparison
pub const ANNOTATED_FOLDER: &str = "deduplicated_snps";
/// Suffix appended to `<ref>_and_<query>` for each annotated table
pub const ANNOTATED_SUFFIX: &str = ".snps_df.annotated.tsv";
/// Debug output with the full detail of every pangenome variation
pub const DEBUG_VARIATIONS_FN: &str = "pangenome_variations.json.gz";

/// One comparison table held in memory
struct LoadedComparison {
    name: ComparisonName,
    rows: Vec<SnpRow>
}

/// Path of the annotated output for a comparison
pub fn annotated_filename(output_folder: &Path, name: &ComparisonName) -> PathBuf {
    output_folder
        .join(ANNOTATED_FOLDER)
        .join(format!("{}{ANNOTATED_SUFFIX}", name.output_stem()))
}

/// Loads every comparison in parallel, keeping input order
fn load_comparisons(input_filenames: &[PathBuf], input_format: SnpTableFormat) -> anyhow::Result<Vec<LoadedComparison>> {
    let progress = ProgressBar::new(input_filenames.len() as u64)
        .with_style(get_progress_style())
        .with_message("Loading");
    let loaded = input_filenames.par_iter()
        .map(|filename| -> anyhow::Result<LoadedComparison> {
            let name = ComparisonName::from_path(filename)
                .with_context(|| format!("Error while parsing comparison name from {filename:?}:"))?;
            let rows = load_snp_table(filename, input_format)?;
            debug!("{name}: {} rows loaded", rows.len());
            Ok(LoadedComparison { name, rows })
        })
        .progress_with(progress)
        .collect::<anyhow::Result<Vec<LoadedComparison>>>()?;
    Ok(loaded)
}

/// Runs the full deduplication described by `settings` and writes every output.
/// # Arguments
/// * `settings` - validated settings, see `check_deduplicate_settings(...)`
/// # Errors
/// * if any input fails to load or any output fails to write
/// * `DeduplicationError` (reachable through `anyhow::Error::downcast_ref`) if an internal invariant is broken
pub fn run_deduplication(settings: &DeduplicateSettings) -> anyhow::Result<DeduplicationSummary> {
    let mut summary = DeduplicationSummary::default();

    info!("Loading {} comparisons...", settings.input_filenames.len());
    let comparisons = load_comparisons(&settings.input_filenames, settings.input_format)?;
    summary.comparisons = comparisons.len() as u64;

    // ingestion is sequential, the graph has a single owner
    info!("Building deduplication graph...");
    let mut graph = DeduplicationGraph::default();
    for comparison in comparisons.iter() {
        let snp_count = graph.add_variants_from_comparison(
            comparison.name.ref_genome(), comparison.name.query_genome(), &comparison.rows
        )?;
        summary.total_rows += comparison.rows.len() as u64;
        summary.snp_rows += snp_count as u64;
    }
    let num_edges = graph.build_edges();
    summary.graph_nodes = graph.num_nodes() as u64;
    summary.graph_edges = num_edges as u64;
    info!("Graph nodes: {}", summary.graph_nodes);
    info!("Graph edges: {}", summary.graph_edges);

    let pangenome_variations = graph.get_pangenome_variations()?;
    summary.pangenome_variations = pangenome_variations.len() as u64;
    info!("Pangenome variations: {}", summary.pangenome_variations);

    // the graph is no longer needed
    drop(graph);

    std::fs::create_dir_all(settings.output_folder.join(ANNOTATED_FOLDER))
        .with_context(|| format!("Error while creating output folder {:?}:", settings.output_folder))?;

    let variations_fn = settings.output_folder.join(PANGENOME_VARIATIONS_FN);
    info!("Saving pangenome variations to {variations_fn:?}...");
    let mut variation_writer = PangenomeSummaryWriter::new(&variations_fn)
        .with_context(|| format!("Error while creating {variations_fn:?}:"))?;
    variation_writer.write_variations(pangenome_variations.iter())
        .with_context(|| format!("Error while writing {variations_fn:?}:"))?;
    variation_writer.finalize()
        .with_context(|| format!("Error while flushing output to {variations_fn:?}:"))?;

    if let Some(debug_folder) = settings.debug_folder.as_deref() {
        let debug_fn = debug_folder.join(DEBUG_VARIATIONS_FN);
        debug!("Saving full pangenome variations to {debug_fn:?}...");
        save_json(&pangenome_variations, &debug_fn)?;
    }

    let consistent_variations = ConsistentPangenomeVariations::new(pangenome_variations);
    summary.consistent_variations = consistent_variations.len() as u64;
    summary.inconsistent_variations = consistent_variations.num_inconsistent() as u64;
    summary.consistent_alleles = consistent_variations.num_indexed_alleles() as u64;
    info!("Consistent pangenome variations: {}", summary.consistent_variations);
    info!("Inconsistent pangenome variations: {}", summary.inconsistent_variations);
    info!("Alleles in consistent variations: {}", summary.consistent_alleles);

    // annotation only reads the consistent set, so comparisons are independent
    info!("Annotating comparisons...");
    let progress = ProgressBar::new(comparisons.len() as u64)
        .with_style(get_progress_style())
        .with_message("Annotating");
    let row_counts: Vec<(u64, u64)> = comparisons.par_iter()
        .map(|comparison| -> anyhow::Result<(u64, u64)> {
            let annotated_rows = consistent_variations.annotate_comparison(
                comparison.name.ref_genome(), comparison.name.query_genome(), &comparison.rows
            ).with_context(|| format!("Error while annotating {}:", comparison.name))?;
            let present = annotated_rows.iter()
                .filter(|r| r.present_in_consistent_variation)
                .count() as u64;
            let absent = annotated_rows.len() as u64 - present;

            let out_fn = annotated_filename(&settings.output_folder, &comparison.name);
            write_annotated_rows(&out_fn, &annotated_rows, settings.exclude_absent)?;
            debug!("{}: {present} present, {absent} absent", comparison.name);
            Ok((present, absent))
        })
        .progress_with(progress)
        .collect::<anyhow::Result<_>>()?;

    for (present, absent) in row_counts {
        summary.present_rows += present;
        summary.absent_rows += absent;
    }
    info!("Present rows: {}", summary.present_rows);
    info!("Absent rows: {}", summary.absent_rows);

    let summary_fn = settings.output_folder.join(SUMMARY_FN);
    info!("Saving run summary to {summary_fn:?}...");
    save_json(&summary, &summary_fn)?;

    Ok(summary)
}
