// src/data_input/mod.rs

pub mod acq_parser;
pub mod parameters;
pub mod recording;

// src/data_input/mod.rs
