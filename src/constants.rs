// src/constants.rs

// Import specific colors needed
use plotters::style::colors::full_palette::{BLUE, GREEN, RED};
use plotters::style::{RGBAColor, RGBColor};

// --- Recording export layout ---
pub const SAMPLE_INTERVAL_MARKER: &str = "msec/sample";
pub const TIME_COLUMN_LABEL: &str = "sec";
pub const RECORDING_EXTENSION: &str = "acq";

// Lines after the header line that carry no samples (units row).
pub const HEADER_TRAILING_LINES: usize = 1;

// --- Oscillation analysis ---
// Number of peak/valley pairs tabulated per channel per file.
pub const MAX_PAIRS_PER_CHANNEL: usize = 5;

// --- Default locations (relative to the working directory) ---
pub const DEFAULT_DATA_DIR: &str = "Data";
pub const DEFAULT_PARAMS_FILE: &str = "parametros.json";
pub const DEFAULT_OUTPUT_DIR: &str = "Output";
pub const DEFAULT_REPORT_NAME: &str = "resultados.xlsx";

// --- Report ---
pub const REPORT_HEADERS: [&str; 6] = ["File", "Channel", "Pair", "Max", "Min", "Amplitude"];
pub const REPORT_COLUMN_WIDTHS: [f64; 6] = [28.0, 16.0, 8.0, 14.0, 14.0, 14.0];
pub const REPORT_SHEET_NAME: &str = "Results";
// Worksheet holds 1,048,576 rows; one is the header.
pub const REPORT_MAX_DATA_ROWS: usize = 1_048_575;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1000;
pub const PLOT_HEIGHT: u32 = 600;

// --- Plot Color Assignments ---
pub const COLOR_SIGNAL: &RGBColor = &BLUE;
pub const COLOR_PEAK_MARKER: &RGBColor = &RED;
pub const COLOR_VALLEY_MARKER: &RGBColor = &GREEN;
pub const COLOR_PAIR_CONNECTOR: RGBAColor = RGBAColor(0, 0, 0, 0.5);

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_LEGEND: u32 = 2;

// Marker radius in pixels for detected extrema.
pub const MARKER_RADIUS_PX: i32 = 4;

// Number of dashes drawn along each peak/valley connector.
pub const CONNECTOR_DASH_SEGMENTS: usize = 8;

// Font sizes
pub const FONT_SIZE_CHART_TITLE: i32 = 22;
pub const FONT_SIZE_AXIS_LABEL: i32 = 14;
pub const FONT_SIZE_LEGEND: i32 = 14;
pub const FONT_SIZE_MESSAGE: i32 = 20;

// src/constants.rs
