// src/data_input/recording.rs

use ndarray::{Array1, ArrayView1};

use crate::error::RecordingError;

/// One parsed acquisition export: the time axis plus every named channel,
/// all of equal length.
#[derive(Debug, Clone)]
pub struct Recording {
    pub sample_interval_s: f64, // Seconds per sample (from the msec/sample metadata).
    time: Array1<f64>,          // Time axis in seconds ('sec' column).
    channel_names: Vec<String>, // Channel names in header order, time column excluded.
    channels: Vec<Array1<f64>>, // Samples, parallel to `channel_names`.
}

impl Recording {
    /// Builds a recording from already column-split data.
    /// Every channel must have exactly as many samples as the time axis.
    pub fn new(
        sample_interval_s: f64,
        time: Array1<f64>,
        named_channels: Vec<(String, Array1<f64>)>,
    ) -> Result<Self, RecordingError> {
        if let Some((name, samples)) = named_channels.iter().find(|(_, c)| c.len() != time.len()) {
            return Err(RecordingError::ColumnLengthMismatch {
                channel: name.clone(),
                expected: time.len(),
                found: samples.len(),
            });
        }
        let (channel_names, channels) = named_channels.into_iter().unzip();
        Ok(Self {
            sample_interval_s,
            time,
            channel_names,
            channels,
        })
    }

    pub fn sample_rate_hz(&self) -> f64 {
        1.0 / self.sample_interval_s
    }

    pub fn time(&self) -> ArrayView1<'_, f64> {
        self.time.view()
    }

    pub fn channel_names(&self) -> &[String] {
        &self.channel_names
    }

    pub fn channel(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.channel_names
            .iter()
            .position(|n| n == name)
            .map(|i| self.channels[i].view())
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_ragged_channels() {
        let time = Array1::from(vec![0.0, 0.001, 0.002]);
        let result = Recording::new(
            0.001,
            time,
            vec![("CH1".to_string(), Array1::from(vec![1.0, 2.0]))],
        );
        assert!(matches!(
            result,
            Err(RecordingError::ColumnLengthMismatch { expected: 3, found: 2, .. })
        ));
    }

    #[test]
    fn test_channel_lookup_and_rate() {
        let time = Array1::from(vec![0.0, 0.002]);
        let rec = Recording::new(
            0.002,
            time,
            vec![
                ("ECG".to_string(), Array1::from(vec![1.0, 2.0])),
                ("RESP".to_string(), Array1::from(vec![3.0, 4.0])),
            ],
        )
        .unwrap();

        assert_eq!(rec.len(), 2);
        assert_eq!(rec.channel_names(), ["ECG".to_string(), "RESP".to_string()]);
        assert!((rec.sample_rate_hz() - 500.0).abs() < 1e-9);
        assert_eq!(rec.channel("RESP").unwrap()[1], 4.0);
        assert!(rec.channel("EMG").is_none());
    }
}
