// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use acq_oscillation_report::batch::{run_batch, BatchConfig};
use acq_oscillation_report::constants::{
    DEFAULT_DATA_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_PARAMS_FILE, DEFAULT_REPORT_NAME,
    RECORDING_EXTENSION,
};
use acq_oscillation_report::crate_version;
use acq_oscillation_report::data_input::parameters::ParameterStore;
use acq_oscillation_report::plot_functions::plot_oscillations::{
    DiagnosticRenderer, NullRenderer, PngRenderer,
};
use acq_oscillation_report::report::spreadsheet::XlsxReport;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Peak/valley oscillation analysis of acquisition exports, with plots and an Excel report"
)]
struct Args {
    /// Folder holding the recordings to analyse
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
    /// JSON file with per-channel peak_prominence and peak_min_distance
    #[arg(long, default_value = DEFAULT_PARAMS_FILE)]
    params: PathBuf,
    /// Folder receiving the report and one plot folder per recording
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
    /// Report file name, written inside the output folder
    #[arg(long, default_value = DEFAULT_REPORT_NAME)]
    report_name: String,
    /// Recording file extension (without the dot)
    #[arg(long, default_value = RECORDING_EXTENSION)]
    extension: String,
    /// Skip the diagnostic PNG plots
    #[arg(long, default_value_t = false)]
    no_plots: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    info!("acq_oscillation_report {}", crate_version());

    let parameters = ParameterStore::load(&args.params).with_context(|| {
        format!(
            "cannot run without detection parameters from '{}'",
            args.params.display()
        )
    })?;

    let config = BatchConfig {
        data_dir: args.data_dir,
        output_dir: args.output_dir.clone(),
        extension: args.extension,
    };
    let renderer: &dyn DiagnosticRenderer = if args.no_plots {
        &NullRenderer
    } else {
        &PngRenderer
    };
    let mut report = XlsxReport::new(args.output_dir.join(&args.report_name));

    let summary = run_batch(&config, &parameters, renderer, &mut report)
        .with_context(|| format!("batch over '{}' failed", config.data_dir.display()))?;

    println!(
        "Files: {} found, {} processed, {} failed. Channels: {} processed, {} skipped. Rows written: {}",
        summary.files_discovered,
        summary.files_processed,
        summary.files_failed,
        summary.channels_processed,
        summary.channels_skipped,
        summary.rows_written
    );
    Ok(())
}

// src/main.rs
