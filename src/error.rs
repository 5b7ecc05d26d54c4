// src/error.rs

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading one recording export. Always skip-file.
#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("failed to read recording '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no 'msec/sample' metadata line found")]
    MissingSampleInterval,
    #[error("invalid 'msec/sample' value '{0}'")]
    InvalidSampleInterval(String),
    #[error("no header line starting with '{0}' found")]
    MissingHeader(&'static str),
    #[error("header line has no '{0}' column")]
    MissingTimeColumn(&'static str),
    #[error("channel [{channel}] has {found} samples, time axis has {expected}")]
    ColumnLengthMismatch {
        channel: String,
        expected: usize,
        found: usize,
    },
    #[error("malformed data section: {0}")]
    Csv(#[from] csv::Error),
}

/// Failures while loading the per-channel detection parameters. Always fatal.
#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("the parameter file '{path}' could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("the parameter file '{path}' is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid parameters for channel [{channel}]: {reason}")]
    InvalidEntry { channel: String, reason: String },
    #[error("the parameter file '{0}' defines no channels")]
    Empty(PathBuf),
}

/// Channel-scoped detection failures. The orchestrator skips the channel.
#[derive(Debug, Error, PartialEq)]
pub enum OscillationError {
    #[error("{peaks} peak(s) detected but no valleys to pair them with")]
    NoValleys { peaks: usize },
    #[error("signal has {signal} samples but time has {time}")]
    LengthMismatch { signal: usize, time: usize },
}

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("failed to create plot directory '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to render plot: {0}")]
    Render(String),
}

impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for PlotError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        PlotError::Render(format!("{value:?}"))
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write spreadsheet: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("report has {0} rows, more than a worksheet can hold")]
    TooManyRows(usize),
}

/// Batch-level failures. Everything narrower is handled per file or per channel.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to list input directory '{path}': {source}")]
    InputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create output directory '{path}': {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Skip-file failures collected by the orchestrator.
#[derive(Debug, Error)]
pub enum FileError {
    #[error(transparent)]
    Recording(#[from] RecordingError),
    #[error("failed to create output folder '{path}': {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
