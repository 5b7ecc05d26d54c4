// src/data_analysis/oscillation.rs

use ndarray::ArrayView1;

use crate::constants::MAX_PAIRS_PER_CHANNEL;
use crate::data_analysis::peak_detection::{find_peaks, find_valleys, PeakCriteria};
use crate::data_input::parameters::ChannelParameters;
use crate::error::OscillationError;

/// A peak and the valley nearest to it in time. Valleys may repeat across pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OscillationPair {
    pub peak_index: usize,
    pub valley_index: usize,
}

/// Amplitude statistics of one pair. `amplitude` is negative when the paired
/// valley sits above its peak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleResult {
    pub max_height: f64,
    pub min_height: f64,
    pub amplitude: f64,
}

/// Everything detected on one channel. `pairs` is the full list (used for plotting);
/// `cycles` holds only the first [`MAX_PAIRS_PER_CHANNEL`] of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OscillationAnalysis {
    pub peaks: Vec<usize>,
    pub valleys: Vec<usize>,
    pub pairs: Vec<OscillationPair>,
    pub cycles: Vec<CycleResult>,
}

impl From<&ChannelParameters> for PeakCriteria {
    fn from(params: &ChannelParameters) -> Self {
        PeakCriteria {
            prominence: params.peak_prominence,
            min_distance: params.peak_min_distance,
        }
    }
}

/// Detects peaks and valleys on `signal`, pairs every peak with its nearest valley in
/// `time`, and computes amplitude statistics for the first pairs.
pub fn detect_oscillations(
    signal: ArrayView1<f64>,
    time: ArrayView1<f64>,
    params: &ChannelParameters,
) -> Result<OscillationAnalysis, OscillationError> {
    if signal.len() != time.len() {
        return Err(OscillationError::LengthMismatch {
            signal: signal.len(),
            time: time.len(),
        });
    }

    let criteria = PeakCriteria::from(params);
    let peaks = find_peaks(signal, &criteria);
    let valleys = find_valleys(signal, &criteria);

    if peaks.is_empty() {
        return Ok(OscillationAnalysis {
            peaks,
            valleys,
            ..Default::default()
        });
    }

    let pairs = pair_nearest_valleys(&peaks, &valleys, time)?;
    let cycles = pairs
        .iter()
        .take(MAX_PAIRS_PER_CHANNEL)
        .map(|pair| cycle_result(signal, pair))
        .collect();

    Ok(OscillationAnalysis {
        peaks,
        valleys,
        pairs,
        cycles,
    })
}

/// For each peak (ascending), picks the valley with the smallest absolute time
/// difference; the earliest valley wins a tie. This is a per-peak nearest-neighbour
/// choice, not a one-to-one matching.
pub fn pair_nearest_valleys(
    peaks: &[usize],
    valleys: &[usize],
    time: ArrayView1<f64>,
) -> Result<Vec<OscillationPair>, OscillationError> {
    if valleys.is_empty() && !peaks.is_empty() {
        return Err(OscillationError::NoValleys { peaks: peaks.len() });
    }

    let pairs = peaks
        .iter()
        .filter_map(|&peak_index| {
            let peak_time = time[peak_index];
            let mut best: Option<(usize, f64)> = None;
            for &valley_index in valleys {
                let diff = (time[valley_index] - peak_time).abs();
                if best.map_or(true, |(_, best_diff)| diff < best_diff) {
                    best = Some((valley_index, diff));
                }
            }
            best.map(|(valley_index, _)| OscillationPair {
                peak_index,
                valley_index,
            })
        })
        .collect();
    Ok(pairs)
}

fn cycle_result(signal: ArrayView1<f64>, pair: &OscillationPair) -> CycleResult {
    let max_height = signal[pair.peak_index];
    let min_height = signal[pair.valley_index];
    CycleResult {
        max_height,
        min_height,
        amplitude: max_height - min_height,
    }
}


// src/data_analysis/oscillation.rs
