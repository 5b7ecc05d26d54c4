// src/data_analysis/mod.rs

pub mod channel_validation;
pub mod oscillation;
pub mod peak_detection;

// src/data_analysis/mod.rs
