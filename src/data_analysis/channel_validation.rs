// src/data_analysis/channel_validation.rs

use log::warn;

/// Outcome of matching configured channels against a recording's columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSelection {
    /// Requested channels present in the recording, in request order.
    pub valid: Vec<String>,
    /// Requested channels missing from the recording, in request order.
    pub ignored: Vec<String>,
}

/// Keeps every requested channel that the recording provides. Missing ones are
/// reported and dropped; this never fails.
pub fn validate_channels<'a, I>(requested: I, available: &[String]) -> ChannelSelection
where
    I: IntoIterator<Item = &'a str>,
{
    let mut selection = ChannelSelection::default();
    for channel in requested {
        if available.iter().any(|a| a == channel) {
            selection.valid.push(channel.to_string());
        } else {
            warn!("Channel [{channel}] does not exist in the recording and will be ignored");
            selection.ignored.push(channel.to_string());
        }
    }
    selection
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_drops_missing_and_keeps_request_order() {
        let available = names(&["C", "A"]);
        let selection = validate_channels(["A", "B", "C"], &available);

        assert_eq!(selection.valid, names(&["A", "C"]));
        assert_eq!(selection.ignored, names(&["B"]));
    }

    #[test]
    fn test_nothing_available() {
        let selection = validate_channels(["A"], &[]);
        assert!(selection.valid.is_empty());
        assert_eq!(selection.ignored, names(&["A"]));
    }

    #[test]
    fn test_extra_recording_channels_are_not_selected() {
        let available = names(&["A", "B", "EXTRA"]);
        let selection = validate_channels(["B", "A"], &available);
        assert_eq!(selection.valid, names(&["B", "A"]));
        assert!(selection.ignored.is_empty());
    }
}
