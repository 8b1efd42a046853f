use serde::{Deserialize, Serialize};

/// Playback configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Wall-clock seconds for one full sweep through the dataset
    pub total_duration_secs: f64,
    /// How many recent frames the live trace keeps behind the last body
    pub trace_tail_frames: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            total_duration_secs: 10.0,
            trace_tail_frames: 80,
        }
    }
}
