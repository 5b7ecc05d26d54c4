// src/plot_functions/mod.rs

pub mod plot_oscillations;

// src/plot_functions/mod.rs
