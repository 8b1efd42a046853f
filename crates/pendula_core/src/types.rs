use serde::{Deserialize, Serialize};
use std::fmt;

/// A solved multi-body trajectory, immutable once received.
///
/// Field names on the wire match the simulation service payload: `n`
/// bodies, a spatial `limit` (half-width of the physical region shown),
/// and one `positions` entry per sampled instant holding interleaved
/// `[x0, y0, x1, y1, ...]` coordinates, body 0 first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectoryDataset {
    #[serde(rename = "n")]
    pub body_count: usize,
    #[serde(rename = "limit")]
    pub spatial_limit: f64,
    #[serde(rename = "positions")]
    pub frames: Vec<Vec<f64>>,
}

impl TrajectoryDataset {
    /// Check the structural invariants: at least one frame, every frame
    /// exactly `2 * body_count` wide, a positive finite spatial limit.
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.body_count == 0 {
            return Err(DatasetError::NoBodies);
        }
        if self.frames.is_empty() {
            return Err(DatasetError::EmptyFrames);
        }
        if !(self.spatial_limit.is_finite() && self.spatial_limit > 0.0) {
            return Err(DatasetError::BadLimit(self.spatial_limit));
        }
        let expected = 2 * self.body_count;
        for (i, frame) in self.frames.iter().enumerate() {
            if frame.len() != expected {
                return Err(DatasetError::FrameWidth {
                    frame: i,
                    expected,
                    got: frame.len(),
                });
            }
        }
        Ok(())
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Position of body `k` at `frame`, in physical coordinates.
    /// Indices must be in range (enforced by `validate` + callers).
    pub fn body_position(&self, frame: usize, k: usize) -> (f64, f64) {
        let f = &self.frames[frame];
        (f[2 * k], f[2 * k + 1])
    }
}

/// Structural problems in a received dataset
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetError {
    NoBodies,
    EmptyFrames,
    BadLimit(f64),
    FrameWidth {
        frame: usize,
        expected: usize,
        got: usize,
    },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::NoBodies => write!(f, "dataset has zero bodies"),
            DatasetError::EmptyFrames => write!(f, "dataset has no frames"),
            DatasetError::BadLimit(l) => {
                write!(f, "spatial limit {l} is not a positive finite number")
            }
            DatasetError::FrameWidth {
                frame,
                expected,
                got,
            } => write!(
                f,
                "frame {frame} has {got} coordinates, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for DatasetError {}
