// src/data_analysis/peak_detection.rs

use ndarray::ArrayView1;
use std::cmp::Ordering;

/// Acceptance thresholds for a detected extremum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakCriteria {
    /// Minimum topographic prominence.
    pub prominence: f64,
    /// Minimum index separation between accepted extrema, in samples (>= 1).
    pub min_distance: usize,
}

/// Finds local maxima that satisfy `criteria`, in ascending index order.
///
/// Candidates are filtered by distance first (higher samples win, ties go to the
/// earliest index), then by prominence.
pub fn find_peaks(signal: ArrayView1<f64>, criteria: &PeakCriteria) -> Vec<usize> {
    let candidates = local_maxima(signal);
    let spaced = select_by_distance(signal, &candidates, criteria.min_distance);
    let prominences = peak_prominences(signal, &spaced);

    spaced
        .into_iter()
        .zip(prominences)
        .filter(|&(_, prominence)| prominence >= criteria.prominence)
        .map(|(peak, _)| peak)
        .collect()
}

/// Finds local minima by running [`find_peaks`] on the negated signal.
pub fn find_valleys(signal: ArrayView1<f64>, criteria: &PeakCriteria) -> Vec<usize> {
    let negated = signal.mapv(|v| -v);
    find_peaks(negated.view(), criteria)
}

/// Indices of every local maximum. A flat top resolves to its midpoint
/// (rounded down); the first and last samples are never maxima.
pub fn local_maxima(signal: ArrayView1<f64>) -> Vec<usize> {
    let n = signal.len();
    let mut maxima = Vec::new();
    if n < 3 {
        return maxima;
    }

    let mut i = 1;
    while i < n - 1 {
        if signal[i - 1] < signal[i] {
            // Walk across a possible plateau.
            let mut i_ahead = i + 1;
            while i_ahead < n - 1 && signal[i_ahead] == signal[i] {
                i_ahead += 1;
            }
            if signal[i_ahead] < signal[i] {
                let left_edge = i;
                let right_edge = i_ahead - 1;
                maxima.push((left_edge + right_edge) / 2);
                i = i_ahead;
            }
        }
        i += 1;
    }
    maxima
}

/// Keeps the highest candidates and drops any lower one closer than `min_distance`.
/// Returns the survivors in ascending index order.
pub fn select_by_distance(signal: ArrayView1<f64>, peaks: &[usize], min_distance: usize) -> Vec<usize> {
    if min_distance <= 1 || peaks.len() < 2 {
        return peaks.to_vec();
    }

    // Positions into `peaks`, highest sample first, earliest index on ties.
    let mut by_priority: Vec<usize> = (0..peaks.len()).collect();
    by_priority.sort_by(|&a, &b| {
        signal[peaks[b]]
            .partial_cmp(&signal[peaks[a]])
            .unwrap_or(Ordering::Equal)
            .then(peaks[a].cmp(&peaks[b]))
    });

    let mut keep = vec![true; peaks.len()];
    for &j in &by_priority {
        if !keep[j] {
            continue;
        }
        let mut k = j;
        while k > 0 && peaks[j] - peaks[k - 1] < min_distance {
            keep[k - 1] = false;
            k -= 1;
        }
        let mut k = j + 1;
        while k < peaks.len() && peaks[k] - peaks[j] < min_distance {
            keep[k] = false;
            k += 1;
        }
    }

    peaks
        .iter()
        .zip(keep)
        .filter(|&(_, kept)| kept)
        .map(|(&peak, _)| peak)
        .collect()
}

/// Topographic prominence of each peak over the whole sequence: the peak height minus
/// the higher of the lowest samples reached scanning left and right until a strictly
/// higher sample, a NaN, or the sequence end.
pub fn peak_prominences(signal: ArrayView1<f64>, peaks: &[usize]) -> Vec<f64> {
    peaks
        .iter()
        .map(|&peak| {
            let peak_val = signal[peak];

            let mut left_min = peak_val;
            let mut i = peak;
            loop {
                let v = signal[i];
                // NaN ends the scan like a higher sample does.
                if v.is_nan() || v > peak_val {
                    break;
                }
                if v < left_min {
                    left_min = v;
                }
                if i == 0 {
                    break;
                }
                i -= 1;
            }

            let mut right_min = peak_val;
            for &v in signal.iter().skip(peak) {
                if v.is_nan() || v > peak_val {
                    break;
                }
                if v < right_min {
                    right_min = v;
                }
            }

            peak_val - left_min.max(right_min)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    fn criteria(prominence: f64, min_distance: usize) -> PeakCriteria {
        PeakCriteria {
            prominence,
            min_distance,
        }
    }

    #[test]
    fn test_local_maxima_plateau_and_edges() {
        // Edges are high but never count; the plateau 3..=5 resolves to 4.
        let x = array![9.0, 1.0, 3.0, 5.0, 5.0, 5.0, 2.0, 4.0, 9.0];
        assert_eq!(local_maxima(x.view()), vec![4]);

        // A plateau that rises again is not a maximum.
        let rising = array![0.0, 2.0, 2.0, 3.0, 0.0];
        assert_eq!(local_maxima(rising.view()), vec![3]);

        let short = array![0.0, 1.0];
        assert!(local_maxima(short.view()).is_empty());
    }

    #[test]
    fn test_prominence_uses_higher_base() {
        // Peak at 3 (value 5): left min 0, right scan stops at 8 with min 2 -> base 2.
        let x = array![0.0, 1.0, 0.0, 5.0, 2.0, 8.0, 1.0];
        let prominences = peak_prominences(x.view(), &[3, 5]);
        assert!((prominences[0] - 3.0).abs() < 1e-12);
        // Peak at 5 is the global max: left min 0, right min 1 -> base 1.
        assert!((prominences[1] - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_prominence_scan_stops_at_nan() {
        // The deep -5 sits behind a gap; the right base is 1, not -5.
        let x = array![0.0, 3.0, 1.0, f64::NAN, -5.0, 8.0, 0.0];
        let prominences = peak_prominences(x.view(), &[1]);
        assert!((prominences[0] - 2.0).abs() < 1e-12);

        // The 3.0 peak would clear 2.5 only by looking past the gap.
        assert_eq!(find_peaks(x.view(), &criteria(2.5, 1)), vec![5]);
    }

    #[test]
    fn test_distance_prefers_higher_then_earlier() {
        let x = array![0.0, 3.0, 0.0, 5.0, 0.0, 5.0, 0.0, 1.0, 0.0];
        let candidates = local_maxima(x.view());
        assert_eq!(candidates, vec![1, 3, 5, 7]);

        // Index 3 outranks its tie at 5 and removes it, and also removes 1.
        assert_eq!(select_by_distance(x.view(), &candidates, 3), vec![3, 7]);
        // Distance 1 keeps everything.
        assert_eq!(select_by_distance(x.view(), &candidates, 1), candidates);
    }

    #[test]
    fn test_find_peaks_filters_by_prominence() {
        let x = array![0.0, 1.0, 0.8, 1.1, 0.0, 4.0, 0.0];
        // The 1.0 bump only rises 0.2 above its base.
        assert_eq!(find_peaks(x.view(), &criteria(0.5, 1)), vec![3, 5]);
        assert_eq!(find_peaks(x.view(), &criteria(0.1, 1)), vec![1, 3, 5]);
        assert_eq!(find_peaks(x.view(), &criteria(2.0, 1)), vec![5]);
    }

    #[test]
    fn test_find_valleys_on_negated_signal() {
        let x = array![5.0, 1.0, 5.0, 4.0, 5.0, -2.0, 5.0];
        assert_eq!(find_valleys(x.view(), &criteria(0.5, 1)), vec![1, 3, 5]);
        assert_eq!(find_valleys(x.view(), &criteria(2.0, 1)), vec![1, 5]);
    }

    #[test]
    fn test_no_extrema_on_ramp_or_small_wiggles() {
        let ramp = Array1::linspace(0.0, 10.0, 50);
        assert!(find_peaks(ramp.view(), &criteria(0.1, 1)).is_empty());
        assert!(find_valleys(ramp.view(), &criteria(0.1, 1)).is_empty());

        let wiggle = Array1::from_iter((0..200).map(|i| 0.05 * (i as f64 * 0.7).sin()));
        assert!(find_peaks(wiggle.view(), &criteria(1.0, 1)).is_empty());
        assert!(find_valleys(wiggle.view(), &criteria(1.0, 1)).is_empty());
    }
}

// src/data_analysis/peak_detection.rs
