// src/batch.rs

use log::{debug, error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::data_analysis::channel_validation::validate_channels;
use crate::data_analysis::oscillation::detect_oscillations;
use crate::data_input::acq_parser::parse_acq_file;
use crate::data_input::parameters::ParameterStore;
use crate::error::{BatchError, FileError};
use crate::plot_functions::plot_oscillations::{DiagnosticRenderer, OscillationPlot};
use crate::report::spreadsheet::ReportSink;
use crate::report::ResultRow;

/// Where to read recordings from and where to put the per-file plot folders.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Recording file extension without the dot, matched case-insensitively.
    pub extension: String,
}

/// Counters for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub files_discovered: usize,
    pub files_processed: usize,
    pub files_failed: usize,
    pub channels_processed: usize,
    pub channels_skipped: usize,
    pub rows_written: usize,
}

/// Rows and channel counts produced by one recording.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileOutcome {
    pub rows: Vec<ResultRow>,
    pub channels_processed: usize,
    pub channels_skipped: usize,
}

/// Lists recordings in `data_dir` (not recursive) whose extension matches, sorted by
/// file name.
pub fn discover_recordings(data_dir: &Path, extension: &str) -> Result<Vec<PathBuf>, BatchError> {
    let list_error = |source| BatchError::InputDir {
        path: data_dir.to_path_buf(),
        source,
    };

    let mut recordings = Vec::new();
    for entry in fs::read_dir(data_dir).map_err(list_error)? {
        let path = entry.map_err(list_error)?.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches && path.is_file() {
            recordings.push(path);
        }
    }
    recordings.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(recordings)
}

/// Plot file name for a channel. Path separators in channel names would otherwise
/// escape the per-file folder.
pub fn plot_file_name(channel: &str) -> String {
    let sanitized: String = channel
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{sanitized}.png")
}

/// Reads one recording and analyses every configured channel it provides.
///
/// Channel-level problems (missing channel, no valleys, plot failure) are logged and
/// never fail the file.
pub fn process_file(
    path: &Path,
    parameters: &ParameterStore,
    output_dir: &Path,
    renderer: &dyn DiagnosticRenderer,
) -> Result<FileOutcome, FileError> {
    let recording = parse_acq_file(path)?;
    let file_label = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    debug!(
        "{file_label}: {} samples at {:.1} Hz, channels {:?}",
        recording.len(),
        recording.sample_rate_hz(),
        recording.channel_names()
    );

    let file_output_dir = output_dir.join(&file_label);
    fs::create_dir_all(&file_output_dir).map_err(|source| FileError::OutputDir {
        path: file_output_dir.clone(),
        source,
    })?;

    let selection = validate_channels(parameters.channel_names(), recording.channel_names());
    let mut outcome = FileOutcome {
        channels_skipped: selection.ignored.len(),
        ..Default::default()
    };

    let time = recording.time();
    for channel in &selection.valid {
        let (Some(params), Some(signal)) = (parameters.get(channel), recording.channel(channel))
        else {
            outcome.channels_skipped += 1;
            continue;
        };

        let analysis = match detect_oscillations(signal, time, params) {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!("{file_label}: skipping channel [{channel}]: {e}");
                outcome.channels_skipped += 1;
                continue;
            }
        };
        debug!(
            "{file_label} [{channel}]: {} peaks, {} valleys, {} pairs",
            analysis.peaks.len(),
            analysis.valleys.len(),
            analysis.pairs.len()
        );

        let plot = OscillationPlot {
            channel,
            time: time.reborrow(),
            signal: signal.reborrow(),
            analysis: &analysis,
        };
        let plot_path = file_output_dir.join(plot_file_name(channel));
        if let Err(e) = renderer.render(&plot, &plot_path) {
            warn!("{file_label}: plot for channel [{channel}] not written: {e}");
        }

        outcome
            .rows
            .extend(analysis.cycles.iter().enumerate().map(|(i, cycle)| ResultRow {
                file: file_label.clone(),
                channel: channel.clone(),
                pair: i + 1,
                max: cycle.max_height,
                min: cycle.min_height,
                amplitude: cycle.amplitude,
            }));
        outcome.channels_processed += 1;
    }

    Ok(outcome)
}

/// Processes every recording in `config.data_dir`, then hands all rows to `report`
/// in one call. A failing file is logged and skipped; an empty batch writes no report.
pub fn run_batch(
    config: &BatchConfig,
    parameters: &ParameterStore,
    renderer: &dyn DiagnosticRenderer,
    report: &mut dyn ReportSink,
) -> Result<BatchSummary, BatchError> {
    fs::create_dir_all(&config.output_dir).map_err(|source| BatchError::OutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let recordings = discover_recordings(&config.data_dir, &config.extension)?;
    let mut summary = BatchSummary {
        files_discovered: recordings.len(),
        ..Default::default()
    };
    if recordings.is_empty() {
        warn!(
            "No .{} files found in {}",
            config.extension,
            config.data_dir.display()
        );
    }

    let mut rows: Vec<ResultRow> = Vec::new();
    for path in &recordings {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("Processing file: {name}");

        match process_file(path, parameters, &config.output_dir, renderer) {
            Ok(outcome) => {
                summary.files_processed += 1;
                summary.channels_processed += outcome.channels_processed;
                summary.channels_skipped += outcome.channels_skipped;
                rows.extend(outcome.rows);
            }
            Err(e) => {
                error!("Skipping file {name}: {e}");
                summary.files_failed += 1;
            }
        }
    }

    if rows.is_empty() {
        info!("No data to save.");
        return Ok(summary);
    }

    report.write_rows(&rows)?;
    summary.rows_written = rows.len();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot_functions::plot_oscillations::PngRenderer;
    use tempfile::tempdir;

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempdir().unwrap();
        for name in ["b.acq", "a.ACQ", "notes.txt", "c.acq.bak"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("nested.acq")).unwrap();

        let found = discover_recordings(dir.path(), "acq").unwrap();
        let names: Vec<String> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.ACQ", "b.acq"]);
    }

    #[test]
    fn test_discover_missing_dir_is_error() {
        let dir = tempdir().unwrap();
        let result = discover_recordings(&dir.path().join("absent"), "acq");
        assert!(matches!(result, Err(BatchError::InputDir { .. })));
    }

    #[test]
    fn test_process_file_renders_channel_png() {
        let dir = tempdir().unwrap();
        let recording = dir.path().join("session.acq");
        let mut text = String::from("10 msec/sample\nsec\tRESP\n\tVolts\n");
        for i in 0..120 {
            let value = (2.0 * std::f64::consts::PI * i as f64 / 40.0).sin();
            text.push_str(&format!("{:.2}\t{value:.6}\n", i as f64 * 0.01));
        }
        fs::write(&recording, text).unwrap();
        let parameters = ParameterStore::from_json_str(
            r#"{ "RESP": { "peak_prominence": 0.5, "peak_min_distance": 5 } }"#,
        )
        .unwrap();
        let output_dir = dir.path().join("Output");

        let outcome = process_file(&recording, &parameters, &output_dir, &PngRenderer).unwrap();

        assert_eq!(outcome.channels_processed, 1);
        assert_eq!(outcome.rows.len(), 3);
        let plot_path = output_dir.join("session").join("RESP.png");
        assert!(plot_path.is_file());
        assert!(fs::metadata(&plot_path).unwrap().len() > 0);
    }

    #[test]
    fn test_plot_file_name_replaces_separators() {
        assert_eq!(plot_file_name("RESP"), "RESP.png");
        assert_eq!(plot_file_name("EMG 1/2"), "EMG 1_2.png");
        assert_eq!(plot_file_name("a\\b"), "a_b.png");
    }
}

// src/batch.rs
