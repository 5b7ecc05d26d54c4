// src/lib.rs - Library interface for internal module access

pub mod batch;
pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod error;
pub mod font_config;
pub mod plot_framework;
pub mod plot_functions;
pub mod report;
pub mod types;

// Expose crate version at compile time.
pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
