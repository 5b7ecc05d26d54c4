// src/report/spreadsheet.rs

use log::info;
use rust_xlsxwriter::{ColNum, Format, FormatAlign, RowNum, Workbook, Worksheet};
use std::path::{Path, PathBuf};

use super::layout::{MergeSpan, ReportLayout};
use super::ResultRow;
use crate::constants::{
    REPORT_COLUMN_WIDTHS, REPORT_HEADERS, REPORT_MAX_DATA_ROWS, REPORT_SHEET_NAME,
};
use crate::error::ReportError;

const COL_FILE: ColNum = 0;
const COL_CHANNEL: ColNum = 1;
const COL_PAIR: ColNum = 2;
const COL_MAX: ColNum = 3;
const COL_MIN: ColNum = 4;
const COL_AMPLITUDE: ColNum = 5;

/// Destination for the accumulated result rows. Called once per batch.
pub trait ReportSink {
    fn write_rows(&mut self, rows: &[ResultRow]) -> Result<(), ReportError>;
}

/// Writes the rows to a single-sheet `.xlsx` workbook with vertically merged
/// File and Channel cells.
#[derive(Debug, Clone)]
pub struct XlsxReport {
    path: PathBuf,
}

impl XlsxReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        XlsxReport { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for XlsxReport {
    fn write_rows(&mut self, rows: &[ResultRow]) -> Result<(), ReportError> {
        check_row_capacity(rows.len())?;

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(REPORT_SHEET_NAME)?;
        write_sheet(worksheet, rows)?;
        workbook.save(&self.path)?;

        info!("Results saved to {}", self.path.display());
        Ok(())
    }
}

fn check_row_capacity(rows: usize) -> Result<(), ReportError> {
    if rows > REPORT_MAX_DATA_ROWS {
        return Err(ReportError::TooManyRows(rows));
    }
    Ok(())
}

/// File and Channel spans as `(column, span)`, File column first.
fn column_spans(layout: &ReportLayout) -> impl Iterator<Item = (ColNum, &MergeSpan)> {
    let files = layout.file_spans.iter().map(|span| (COL_FILE, span));
    let channels = layout.channel_spans.iter().map(|span| (COL_CHANNEL, span));
    files.chain(channels)
}

fn write_sheet(worksheet: &mut Worksheet, rows: &[ResultRow]) -> Result<(), ReportError> {
    let header_format = Format::new().set_bold();
    let centered = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    for (col, (header, width)) in REPORT_HEADERS.iter().zip(REPORT_COLUMN_WIDTHS).enumerate() {
        let col = col as ColNum;
        worksheet.write_string_with_format(0, col, *header, &header_format)?;
        worksheet.set_column_width(col, width)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (i, result) in rows.iter().enumerate() {
        let row = (i + 1) as RowNum;
        worksheet.write_number(row, COL_PAIR, result.pair as f64)?;
        write_value(worksheet, row, COL_MAX, result.max)?;
        write_value(worksheet, row, COL_MIN, result.min)?;
        write_value(worksheet, row, COL_AMPLITUDE, result.amplitude)?;
    }

    let layout = ReportLayout::from_rows(rows);
    for (col, span) in column_spans(&layout) {
        let row = &rows[span.first_row - 1];
        let label = if col == COL_FILE {
            row.file.as_str()
        } else {
            row.channel.as_str()
        };
        write_span(worksheet, span, col, label, &centered)?;
    }
    Ok(())
}

fn write_span(
    worksheet: &mut Worksheet,
    span: &MergeSpan,
    col: ColNum,
    label: &str,
    format: &Format,
) -> Result<(), ReportError> {
    let first = span.first_row as RowNum;
    let last = span.last_row as RowNum;
    if span.is_merged() {
        worksheet.merge_range(first, col, last, col, label, format)?;
    } else {
        worksheet.write_string_with_format(first, col, label, format)?;
    }
    Ok(())
}

/// Spreadsheets have no NaN or infinity; those are written as text.
fn write_value(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    value: f64,
) -> Result<(), ReportError> {
    if value.is_finite() {
        worksheet.write_number(row, col, value)?;
    } else {
        worksheet.write_string(row, col, &value.to_string())?;
    }
    Ok(())
}

/// Collects rows in memory instead of writing a file.
#[derive(Debug, Default, Clone)]
pub struct MemoryReport {
    pub rows: Vec<ResultRow>,
    pub writes: usize,
}

impl ReportSink for MemoryReport {
    fn write_rows(&mut self, rows: &[ResultRow]) -> Result<(), ReportError> {
        self.rows.extend_from_slice(rows);
        self.writes += 1;
        Ok(())
    }
}


// src/report/spreadsheet.rs
