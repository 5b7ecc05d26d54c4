// src/types.rs
// Type aliases to reduce complexity warnings

// One (time, value) sample in plot coordinates.
pub type PlotPoint = (f64, f64);

// Straight line between two plot points (peak to valley connector).
pub type PlotSegment = (PlotPoint, PlotPoint);
