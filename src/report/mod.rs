// src/report/mod.rs

pub mod layout;
pub mod spreadsheet;

/// One tabulated peak/valley pair of one channel of one recording.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub file: String,
    pub channel: String,
    /// 1-based pair number within the channel.
    pub pair: usize,
    pub max: f64,
    pub min: f64,
    pub amplitude: f64,
}

// src/report/mod.rs
