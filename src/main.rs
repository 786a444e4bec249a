
use log::{LevelFilter, error, info};
use std::time::Instant;

use snpdedup::cli::core::{Commands, get_cli};
use snpdedup::cli::deduplicate::{DeduplicateSettings, check_deduplicate_settings};
use snpdedup::deduplication_graph::DeduplicationError;
use snpdedup::pipeline::run_deduplication;
use snpdedup::util::json_io::save_json;

fn run_deduplicate(settings: DeduplicateSettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    let filter_level: LevelFilter = match settings.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();

    let settings = match check_deduplicate_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    // set up the number of threads for rayon
    match rayon::ThreadPoolBuilder::new().num_threads(settings.threads).build_global() {
        Ok(()) => {},
        Err(e) => {
            error!("Error while building thread pool: {e}");
            std::process::exit(exitcode::OSERR);
        }
    };

    // create the primary output folder
    info!("Creating output folder at {:?}...", settings.output_folder);
    match std::fs::create_dir_all(&settings.output_folder) {
        Ok(()) => {},
        Err(e) => {
            error!("Error while creating output folder: {e}");
            std::process::exit(exitcode::IOERR);
        }
    }

    // create a debug folder if specified, files might get created in sub-routines
    if let Some(debug_folder) = settings.debug_folder.as_ref() {
        info!("Creating debug folder at {debug_folder:?}...");
        match std::fs::create_dir_all(debug_folder) {
            Ok(()) => {},
            Err(e) => {
                error!("Error while creating debug folder: {e}");
                std::process::exit(exitcode::IOERR);
            }
        }

        // save the CLI options
        let cli_json = debug_folder.join("cli_settings.json");
        info!("Saving CLI options to {cli_json:?}...");
        if let Err(e) = save_json(&settings, &cli_json) {
            error!("Error while saving CLI options: {e}");
            std::process::exit(exitcode::IOERR);
        }
    }

    let summary = match run_deduplication(&settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while deduplicating SNPs: {e:#}");
            if e.downcast_ref::<DeduplicationError>().is_some() {
                // broken invariant rather than bad input
                std::process::exit(exitcode::SOFTWARE);
            } else {
                std::process::exit(exitcode::IOERR);
            }
        }
    };

    info!("Comparisons: {}", summary.comparisons);
    info!("SNP rows: {} / {}", summary.snp_rows, summary.total_rows);
    info!("Consistent:inconsistent variations: {} : {}", summary.consistent_variations, summary.inconsistent_variations);
    info!("\tConsistent fraction: {:?}", summary.consistent_fraction());
    info!("Present:absent rows: {} : {}", summary.present_rows, summary.absent_rows);
    info!("\tPresent fraction of SNP rows: {:?}", summary.present_fraction());

    info!("Deduplication completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Deduplicate(settings) => {
            run_deduplicate(*settings);
        }
    }

    info!("Process finished successfully.");
}
