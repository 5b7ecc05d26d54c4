// src/data_input/parameters.rs

use log::info;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::error::ParameterError;

/// Peak-detection thresholds for one channel, as written in the parameter file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ChannelParameters {
    pub peak_prominence: f64,
    pub peak_min_distance: usize,
}

impl ChannelParameters {
    fn validate(&self, channel: &str) -> Result<(), ParameterError> {
        if !(self.peak_prominence.is_finite() && self.peak_prominence > 0.0) {
            return Err(ParameterError::InvalidEntry {
                channel: channel.to_string(),
                reason: format!(
                    "peak_prominence must be a positive number, got {}",
                    self.peak_prominence
                ),
            });
        }
        if self.peak_min_distance < 1 {
            return Err(ParameterError::InvalidEntry {
                channel: channel.to_string(),
                reason: "peak_min_distance must be at least 1 sample".to_string(),
            });
        }
        Ok(())
    }
}

/// Detection parameters keyed by channel name, kept in file order.
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    entries: Vec<(String, ChannelParameters)>,
}

impl ParameterStore {
    /// Loads and validates the JSON parameter file. Any failure here is fatal for the run.
    pub fn load(path: &Path) -> Result<Self, ParameterError> {
        let contents = fs::read_to_string(path).map_err(|source| ParameterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::parse(&contents, path)?;
        info!(
            "Loaded detection parameters for {} channel(s) from '{}'",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    /// Parses parameters from an in-memory JSON document.
    pub fn from_json_str(contents: &str) -> Result<Self, ParameterError> {
        Self::parse(contents, Path::new("<inline>"))
    }

    fn parse(contents: &str, origin: &Path) -> Result<Self, ParameterError> {
        let raw: Map<String, Value> =
            serde_json::from_str(contents).map_err(|source| ParameterError::Json {
                path: origin.to_path_buf(),
                source,
            })?;

        let mut entries = Vec::with_capacity(raw.len());
        for (channel, value) in raw {
            let params: ChannelParameters =
                serde_json::from_value(value).map_err(|e| ParameterError::InvalidEntry {
                    channel: channel.clone(),
                    reason: e.to_string(),
                })?;
            params.validate(&channel)?;
            entries.push((channel, params));
        }

        if entries.is_empty() {
            return Err(ParameterError::Empty(origin.to_path_buf()));
        }
        Ok(Self { entries })
    }

    pub fn get(&self, channel: &str) -> Option<&ChannelParameters> {
        self.entries
            .iter()
            .find(|(name, _)| name == channel)
            .map(|(_, params)| params)
    }

    /// Channel names in file order.
    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}


// src/data_input/parameters.rs
