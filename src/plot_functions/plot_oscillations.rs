// src/plot_functions/plot_oscillations.rs

use ndarray::ArrayView1;
use ndarray_stats::QuantileExt;
use std::fs;
use std::path::Path;

use crate::constants::{
    COLOR_PAIR_CONNECTOR, COLOR_PEAK_MARKER, COLOR_SIGNAL, COLOR_VALLEY_MARKER, LINE_WIDTH_PLOT,
    MARKER_RADIUS_PX,
};
use crate::data_analysis::oscillation::OscillationAnalysis;
use crate::error::PlotError;
use crate::plot_framework::{
    calculate_range, draw_single_chart, MarkerSeries, PlotConfig, PlotSeries, SegmentSeries,
};
use crate::types::{PlotPoint, PlotSegment};

/// Inputs for one channel's diagnostic image.
pub struct OscillationPlot<'a> {
    pub channel: &'a str,
    pub time: ArrayView1<'a, f64>,
    pub signal: ArrayView1<'a, f64>,
    pub analysis: &'a OscillationAnalysis,
}

/// Side channel that turns a channel's detection result into a diagnostic image.
pub trait DiagnosticRenderer {
    fn render(&self, plot: &OscillationPlot<'_>, output_path: &Path) -> Result<(), PlotError>;
}

/// Writes a PNG with the signal, every detected extremum and every pairing.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngRenderer;

impl DiagnosticRenderer for PngRenderer {
    fn render(&self, plot: &OscillationPlot<'_>, output_path: &Path) -> Result<(), PlotError> {
        plot_oscillations(plot, output_path)
    }
}

/// Renders nothing; used when plots are switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl DiagnosticRenderer for NullRenderer {
    fn render(&self, _plot: &OscillationPlot<'_>, _output_path: &Path) -> Result<(), PlotError> {
        Ok(())
    }
}

/// Generates the "Detected Peaks and Valleys" plot for one channel.
///
/// Connectors are drawn for the full pair list, not only the tabulated pairs.
pub fn plot_oscillations(plot: &OscillationPlot<'_>, output_path: &Path) -> Result<(), PlotError> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(|source| PlotError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let plot_config = build_plot_config(plot);
    draw_single_chart(output_path, &plot_config)
}

/// Assembles the chart description: one signal line, peak and valley markers, and a
/// dashed connector per pair. Non-finite samples are left out.
pub fn build_plot_config(plot: &OscillationPlot<'_>) -> PlotConfig {
    let time = plot.time;
    let signal = plot.signal;
    let point = |i: usize| (time[i], signal[i]);
    let is_finite = |&(x, y): &PlotPoint| x.is_finite() && y.is_finite();

    let signal_data: Vec<PlotPoint> = (0..signal.len().min(time.len()))
        .map(point)
        .filter(is_finite)
        .collect();

    let (y_min, y_max) = calculate_range(*signal.min_skipnan(), *signal.max_skipnan());
    let x_range = if signal_data.is_empty() {
        0.0..0.0
    } else {
        *time.min_skipnan()..*time.max_skipnan()
    };

    let extrema = |indices: &[usize]| -> Vec<PlotPoint> {
        indices.iter().map(|&i| point(i)).filter(is_finite).collect()
    };
    let peak_points = extrema(&plot.analysis.peaks);
    let valley_points = extrema(&plot.analysis.valleys);
    let connectors: Vec<PlotSegment> = plot
        .analysis
        .pairs
        .iter()
        .map(|pair| (point(pair.peak_index), point(pair.valley_index)))
        .filter(|(a, b)| is_finite(a) && is_finite(b))
        .collect();

    PlotConfig {
        title: format!("Detected Peaks and Valleys for {}", plot.channel),
        x_range,
        y_range: y_min..y_max,
        series: vec![PlotSeries {
            data: signal_data,
            label: "Signal".to_string(),
            color: *COLOR_SIGNAL,
            stroke_width: LINE_WIDTH_PLOT,
        }],
        markers: vec![
            MarkerSeries {
                points: peak_points,
                label: "Detected Peaks".to_string(),
                color: *COLOR_PEAK_MARKER,
                radius: MARKER_RADIUS_PX,
            },
            MarkerSeries {
                points: valley_points,
                label: "Detected Valleys".to_string(),
                color: *COLOR_VALLEY_MARKER,
                radius: MARKER_RADIUS_PX,
            },
        ],
        segments: Some(SegmentSeries {
            segments: connectors,
            label: "Peak/Valley Pairs".to_string(),
            color: COLOR_PAIR_CONNECTOR,
        }),
        x_label: "Time (s)".to_string(),
        y_label: "Amplitude".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_analysis::oscillation::OscillationPair;
    use ndarray::array;

    #[test]
    fn test_config_keeps_every_pair() {
        let time = array![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let signal = array![0.0, 2.0, -1.0, 2.0, -1.0, 2.0, 0.0];
        let pairs: Vec<OscillationPair> = [(1, 2), (3, 2), (5, 4)]
            .iter()
            .map(|&(peak_index, valley_index)| OscillationPair {
                peak_index,
                valley_index,
            })
            .collect();
        let analysis = OscillationAnalysis {
            peaks: vec![1, 3, 5],
            valleys: vec![2, 4],
            pairs,
            cycles: Vec::new(),
        };
        let plot = OscillationPlot {
            channel: "RESP",
            time: time.view(),
            signal: signal.view(),
            analysis: &analysis,
        };

        let config = build_plot_config(&plot);

        assert_eq!(config.title, "Detected Peaks and Valleys for RESP");
        assert_eq!(config.series[0].data.len(), 7);
        assert_eq!(config.markers[0].points, vec![(1.0, 2.0), (3.0, 2.0), (5.0, 2.0)]);
        assert_eq!(config.markers[1].points, vec![(2.0, -1.0), (4.0, -1.0)]);
        let segments = config.segments.unwrap();
        assert_eq!(segments.segments.len(), 3);
        assert_eq!(segments.segments[1], ((3.0, 2.0), (2.0, -1.0)));
        assert_eq!(config.x_range, 0.0..6.0);
        assert!(config.y_range.start < -1.0 && config.y_range.end > 2.0);
    }

    #[test]
    fn test_config_skips_nan_samples() {
        let time = array![0.0, 1.0, 2.0];
        let signal = array![0.0, f64::NAN, 1.0];
        let analysis = OscillationAnalysis::default();
        let plot = OscillationPlot {
            channel: "EDA",
            time: time.view(),
            signal: signal.view(),
            analysis: &analysis,
        };

        let config = build_plot_config(&plot);
        assert_eq!(config.series[0].data, vec![(0.0, 0.0), (2.0, 1.0)]);
        assert!(config.y_range.start.is_finite());
    }
}

// src/plot_functions/plot_oscillations.rs
