// src/data_input/acq_parser.rs

use csv::ReaderBuilder;
use log::{debug, info, warn};
use ndarray::Array1;
use std::fs;
use std::path::Path;

use crate::constants::{HEADER_TRAILING_LINES, SAMPLE_INTERVAL_MARKER, TIME_COLUMN_LABEL};
use crate::data_input::recording::Recording;
use crate::error::RecordingError;

/// Parses an acquisition text export into a [`Recording`].
///
/// Layout expected:
/// 1. A metadata line containing `msec/sample`, whose first token is the sample interval in ms.
/// 2. A header line starting with `sec`, tab-separated column names.
/// 3. One units line, skipped.
/// 4. Tab-separated sample rows. Blank or unparsable cells become NaN.
pub fn parse_acq_file(input_file_path: &Path) -> Result<Recording, RecordingError> {
    let content = fs::read_to_string(input_file_path).map_err(|source| RecordingError::Io {
        path: input_file_path.to_path_buf(),
        source,
    })?;
    parse_acq_str(&content)
}

pub fn parse_acq_str(content: &str) -> Result<Recording, RecordingError> {
    let lines: Vec<&str> = content.lines().collect();

    // --- Metadata Extraction ---
    let sample_interval_s = extract_sample_interval_s(&lines)?;

    let header_line = lines
        .iter()
        .position(|line| line.starts_with(TIME_COLUMN_LABEL))
        .ok_or(RecordingError::MissingHeader(TIME_COLUMN_LABEL))?;

    let headers: Vec<String> = lines[header_line]
        .trim()
        .split('\t')
        .map(|h| h.trim().to_string())
        .collect();
    debug!("Headers found in recording: {headers:?}");

    let time_index = headers
        .iter()
        .position(|h| h == TIME_COLUMN_LABEL)
        .ok_or(RecordingError::MissingTimeColumn(TIME_COLUMN_LABEL))?;

    // --- Data Reading and Storage ---
    let data_start = header_line + 1 + HEADER_TRAILING_LINES;
    let csv_content = lines
        .iter()
        .skip(data_start)
        .filter(|line| !line.trim().is_empty())
        .copied()
        .collect::<Vec<&str>>()
        .join("\n");

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
    let mut unparsable_cells = 0usize;
    {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(csv_content.as_bytes());

        for result in reader.records() {
            let record = result?;
            for (col_idx, column) in columns.iter_mut().enumerate() {
                let value = match record.get(col_idx) {
                    Some(cell) if !cell.is_empty() => cell.parse::<f64>().unwrap_or_else(|_| {
                        unparsable_cells += 1;
                        f64::NAN
                    }),
                    _ => f64::NAN,
                };
                column.push(value);
            }
        }
    }
    if unparsable_cells > 0 {
        warn!("{unparsable_cells} non-numeric cell(s) read as NaN");
    }

    let mut time: Option<Array1<f64>> = None;
    let mut named_channels: Vec<(String, Array1<f64>)> = Vec::with_capacity(headers.len());
    for (col_idx, (name, samples)) in headers.into_iter().zip(columns).enumerate() {
        if col_idx == time_index {
            time = Some(Array1::from(samples));
        } else {
            named_channels.push((name, Array1::from(samples)));
        }
    }
    let time = time.ok_or(RecordingError::MissingTimeColumn(TIME_COLUMN_LABEL))?;

    info!(
        "Read {} samples x {} channel(s) at {:.2} Hz",
        time.len(),
        named_channels.len(),
        1.0 / sample_interval_s
    );

    Recording::new(sample_interval_s, time, named_channels)
}

/// Finds the first `msec/sample` line and converts its leading number to seconds.
fn extract_sample_interval_s(lines: &[&str]) -> Result<f64, RecordingError> {
    let line = lines
        .iter()
        .find(|line| line.contains(SAMPLE_INTERVAL_MARKER))
        .ok_or(RecordingError::MissingSampleInterval)?;
    let token = line.split_whitespace().next().unwrap_or_default();
    match token.parse::<f64>() {
        Ok(msec) if msec.is_finite() && msec > 0.0 => Ok(msec / 1000.0),
        _ => Err(RecordingError::InvalidSampleInterval(token.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_EXPORT: &str = "session_01.acq\n\
        0.5 msec/sample\n\
        2 channels\n\
        ECG\n\
        mV\n\
        RESP\n\
        Volts\n\
        sec\tECG\tRESP\n\
        \tmV\tVolts\n\
        0.0000\t0.10\t1.0\n\
        0.0005\t0.20\t\n\
        \n\
        0.0010\tn/a\t3.0\t99\n\
        0.0015\t0.40\n";

    #[test]
    fn test_parses_metadata_header_and_rows() {
        let rec = parse_acq_str(SAMPLE_EXPORT).unwrap();

        assert!((rec.sample_interval_s - 0.0005).abs() < 1e-12);
        assert!((rec.sample_rate_hz() - 2000.0).abs() < 1e-6);
        assert_eq!(rec.channel_names(), ["ECG".to_string(), "RESP".to_string()]);
        assert_eq!(rec.len(), 4);

        let time = rec.time();
        assert_eq!(time[0], 0.0);
        assert_eq!(time[3], 0.0015);

        let ecg = rec.channel("ECG").unwrap();
        assert_eq!(ecg[0], 0.10);
        assert!(ecg[2].is_nan()); // "n/a"

        let resp = rec.channel("RESP").unwrap();
        assert!(resp[1].is_nan()); // blank cell
        assert_eq!(resp[2], 3.0); // extra trailing cell dropped
        assert!(resp[3].is_nan()); // short row padded
    }

    #[test]
    fn test_missing_sample_interval() {
        let content = "sec\tECG\n\tmV\n0.0\t1.0\n";
        assert!(matches!(
            parse_acq_str(content),
            Err(RecordingError::MissingSampleInterval)
        ));
    }

    #[test]
    fn test_invalid_sample_interval() {
        let content = "fast msec/sample\nsec\tECG\n\tmV\n0.0\t1.0\n";
        assert!(matches!(
            parse_acq_str(content),
            Err(RecordingError::InvalidSampleInterval(ref t)) if t == "fast"
        ));
    }

    #[test]
    fn test_missing_header_line() {
        let content = "1 msec/sample\ntime\tECG\n0.0\t1.0\n";
        assert!(matches!(
            parse_acq_str(content),
            Err(RecordingError::MissingHeader("sec"))
        ));
    }

    #[test]
    fn test_header_only_export_is_empty() {
        let content = "1 msec/sample\nsec\tECG\n\tmV\n";
        let rec = parse_acq_str(content).unwrap();
        assert!(rec.is_empty());
        assert_eq!(rec.channel("ECG").unwrap().len(), 0);
    }
}

// src/data_input/acq_parser.rs
