// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, PathElement, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBAColor, RGBColor};

use std::ops::Range;
use std::path::Path;

use crate::constants::{
    CONNECTOR_DASH_SEGMENTS, FONT_SIZE_MESSAGE, LINE_WIDTH_LEGEND, LINE_WIDTH_PLOT, PLOT_HEIGHT,
    PLOT_WIDTH,
};
use crate::error::PlotError;
use crate::font_config::{
    FONT_TUPLE_AXIS_LABEL, FONT_TUPLE_CHART_TITLE, FONT_TUPLE_LEGEND, FONT_TUPLE_MESSAGE,
};
use crate::types::{PlotPoint, PlotSegment};

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Y-axis tick text: "k"/"M" suffixes for large magnitudes, two decimals for small
/// fractional values (typical of mV-scale channels), integers otherwise.
pub fn format_axis_value(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if magnitude >= 1000.0 {
        format!("{:.0}k", value / 1000.0)
    } else if magnitude < 10.0 && value.fract() != 0.0 {
        format!("{value:.2}")
    } else {
        format!("{value:.0}")
    }
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    subject: &str,
    reason: &str,
) -> Result<(), PlotError> {
    // Constants for text rendering
    const CHAR_WIDTH_RATIO: f32 = 0.6; // Approximate character width relative to font size

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (x_range.end - x_range.start, y_range.end - y_range.start);
    let message = format!("{subject} Data Unavailable: {reason}");

    let estimated_char_width = (FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_text_width = (message.len() as i32).saturating_mul(estimated_char_width);

    let center_x = (width / 2 - estimated_text_width / 2).max(0);
    let center_y = height / 2 - FONT_SIZE_MESSAGE / 2;

    let text_style = FONT_TUPLE_MESSAGE.into_font().color(&RED);
    area.draw(&Text::new(message, (center_x, center_y), text_style))?;
    Ok(())
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: Vec<PlotPoint>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
}

/// Filled circle markers at individual points (detected extrema).
#[derive(Clone)]
pub struct MarkerSeries {
    pub points: Vec<PlotPoint>,
    pub label: String,
    pub color: RGBColor,
    pub radius: i32,
}

/// Dashed straight segments between point pairs (peak/valley connectors).
#[derive(Clone)]
pub struct SegmentSeries {
    pub segments: Vec<PlotSegment>,
    pub label: String,
    pub color: RGBAColor,
}

#[derive(Clone)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub markers: Vec<MarkerSeries>,
    pub segments: Option<SegmentSeries>,
    pub x_label: String,
    pub y_label: String,
}

/// Splits a segment into `dashes` evenly spaced dashes with equal gaps between them.
pub fn dash_segment(start: PlotPoint, end: PlotPoint, dashes: usize) -> Vec<[PlotPoint; 2]> {
    if dashes == 0 {
        return Vec::new();
    }
    let parts = (2 * dashes - 1) as f64;
    let lerp = |t: f64| (start.0 + (end.0 - start.0) * t, start.1 + (end.1 - start.1) * t);
    (0..dashes)
        .map(|k| {
            let t0 = (2 * k) as f64 / parts;
            let t1 = (2 * k + 1) as f64 / parts;
            [lerp(t0), lerp(t1)]
        })
        .collect()
}

/// Renders one chart to `output_path` as PNG. The bitmap backend lives only for the
/// duration of this call.
pub fn draw_single_chart(output_path: &Path, plot_config: &PlotConfig) -> Result<(), PlotError> {
    let root_area = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;

    let has_data = plot_config.series.iter().any(|s| !s.data.is_empty());
    let x_range = plot_config.x_range.clone();
    let y_range = plot_config.y_range.clone();
    let valid_ranges = x_range.end > x_range.start && y_range.end > y_range.start;
    if !(has_data && valid_ranges) {
        let reason = if !has_data {
            "No data points"
        } else {
            "Invalid ranges"
        };
        draw_unavailable_message(&root_area, &plot_config.title, reason)?;
        root_area.present()?;
        return Ok(());
    }

    let mut chart = ChartBuilder::on(&root_area)
        .caption(&plot_config.title, FONT_TUPLE_CHART_TITLE)
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(20)
        .y_labels(10)
        .y_label_formatter(&|y| format_axis_value(*y))
        .light_line_style(WHITE.mix(0.7))
        .label_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;

    let mut legend_series_count = 0;

    for s in plot_config.series.iter().filter(|s| !s.data.is_empty()) {
        let series = chart.draw_series(LineSeries::new(
            s.data.iter().cloned(),
            s.color.stroke_width(s.stroke_width),
        ))?;
        if !s.label.is_empty() {
            series.label(&s.label).legend(move |(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + 20, y)],
                    s.color.stroke_width(LINE_WIDTH_LEGEND),
                )
            });
            legend_series_count += 1;
        }
    }

    // Connectors go under the markers so the extrema stay visible.
    if let Some(segments) = &plot_config.segments {
        let color = segments.color;
        let dashes = segments.segments.iter().flat_map(|&(start, end)| {
            dash_segment(start, end, CONNECTOR_DASH_SEGMENTS)
                .into_iter()
                .map(move |dash| {
                    PathElement::new(dash.to_vec(), color.stroke_width(LINE_WIDTH_PLOT))
                })
        });
        let drawn = chart.draw_series(dashes)?;
        if !segments.segments.is_empty() && !segments.label.is_empty() {
            drawn.label(&segments.label).legend(move |(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + 20, y)],
                    color.stroke_width(LINE_WIDTH_LEGEND),
                )
            });
            legend_series_count += 1;
        }
    }

    for m in plot_config.markers.iter() {
        let color = m.color;
        let radius = m.radius;
        let drawn = chart.draw_series(
            m.points
                .iter()
                .map(|&point| Circle::new(point, radius, color.filled())),
        )?;
        if !m.label.is_empty() {
            drawn
                .label(&m.label)
                .legend(move |(x, y)| Circle::new((x + 10, y), radius, color.filled()));
            legend_series_count += 1;
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(FONT_TUPLE_LEGEND)
            .draw()?;
    }

    root_area.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_range_pads_and_orders() {
        let (lo, hi) = calculate_range(10.0, 0.0);
        assert!((lo + 1.5).abs() < 1e-12);
        assert!((hi - 11.5).abs() < 1e-12);

        let (lo, hi) = calculate_range(3.0, 3.0);
        assert_eq!((lo, hi), (2.5, 3.5));
    }

    #[test]
    fn test_dash_segment_splits_evenly() {
        let close = |a: (f64, f64), b: (f64, f64)| (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9;

        let dashes = dash_segment((0.0, 0.0), (7.0, 14.0), 4);
        assert_eq!(dashes.len(), 4);
        assert!(close(dashes[0][0], (0.0, 0.0)));
        assert!(close(dashes[0][1], (1.0, 2.0)));
        assert!(close(dashes[1][0], (2.0, 4.0)));
        assert!(close(dashes[3][1], (7.0, 14.0)));
        assert!(dash_segment((0.0, 0.0), (1.0, 1.0), 0).is_empty());
    }
}

// src/plot_framework.rs
