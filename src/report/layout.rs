// src/report/layout.rs

use super::ResultRow;

/// Inclusive range of worksheet rows sharing one value. Row 0 is the header, so the
/// first data row is 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeSpan {
    pub first_row: usize,
    pub last_row: usize,
}

impl MergeSpan {
    pub fn row_count(&self) -> usize {
        self.last_row - self.first_row + 1
    }

    /// Single-row spans are written as plain cells rather than merged ranges.
    pub fn is_merged(&self) -> bool {
        self.last_row > self.first_row
    }
}

/// Vertical merge groups for the File and Channel columns.
///
/// Each column is grouped on its own: a run of equal adjacent values forms one span,
/// whatever the neighbouring column does. Equal values that are not adjacent land in
/// separate spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportLayout {
    pub file_spans: Vec<MergeSpan>,
    pub channel_spans: Vec<MergeSpan>,
}

impl ReportLayout {
    pub fn from_rows(rows: &[ResultRow]) -> Self {
        ReportLayout {
            file_spans: adjacent_runs(rows.iter().map(|r| r.file.as_str())),
            channel_spans: adjacent_runs(rows.iter().map(|r| r.channel.as_str())),
        }
    }
}

fn adjacent_runs<'a>(values: impl Iterator<Item = &'a str>) -> Vec<MergeSpan> {
    let mut spans: Vec<MergeSpan> = Vec::new();
    let mut previous: Option<&str> = None;
    for (i, value) in values.enumerate() {
        let row = i + 1;
        match spans.last_mut() {
            Some(span) if previous == Some(value) => span.last_row = row,
            _ => spans.push(MergeSpan {
                first_row: row,
                last_row: row,
            }),
        }
        previous = Some(value);
    }
    spans
}


// src/report/layout.rs
