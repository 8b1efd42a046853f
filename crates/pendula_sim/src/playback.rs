use bevy::prelude::*;
use pendula_core::{PlaybackConfig, TrajectoryDataset};

/// Playback state, tracked as a Bevy Resource.
///
/// The clock exclusively owns this value; renderers read it through
/// `Res<PlaybackState>` and never mutate it. While playing, the frame
/// index is always recomputed from the origin timestamp, never
/// incremented, so the visible frame tracks wall-clock time exactly,
/// across pause/resume and regardless of the refresh cadence.
#[derive(Resource)]
pub struct PlaybackState {
    /// Loaded trajectory, absent before the first successful run
    pub dataset: Option<TrajectoryDataset>,
    /// Current frame, `0 <= frame_index < frames.len()`
    pub frame_index: usize,
    /// Whether the clock is advancing
    pub playing: bool,
    /// Wall-clock zero-point (app seconds) for elapsed-time computation
    pub origin_secs: f64,
    /// Static render configuration
    pub config: PlaybackConfig,
}

impl PlaybackState {
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            dataset: None,
            frame_index: 0,
            playing: false,
            origin_secs: 0.0,
            config,
        }
    }

    /// Fraction of one sweep represented by the frozen frame index.
    fn progress_fraction(&self) -> f64 {
        match &self.dataset {
            Some(ds) => self.frame_index as f64 / ds.frame_count() as f64,
            None => 0.0,
        }
    }

    /// Replace the dataset and start playing from frame 0.
    ///
    /// A malformed dataset is a precondition violation by the caller:
    /// the load is refused (logged, nothing mutated) rather than risking
    /// a mid-draw panic later.
    pub fn load(&mut self, dataset: TrajectoryDataset, now: f64) {
        if let Err(e) = dataset.validate() {
            warn!("refusing to load dataset: {e}");
            return;
        }
        info!(
            "dataset loaded: {} bodies, {} frames, limit {:.2}",
            dataset.body_count,
            dataset.frame_count(),
            dataset.spatial_limit
        );
        self.dataset = Some(dataset);
        self.frame_index = 0;
        self.playing = true;
        self.origin_secs = now;
    }

    /// Pause, or resume from the exact visual position.
    ///
    /// Resuming rebuilds the origin from the frozen progress fraction so
    /// the frame shown never jumps across a pause/resume pair.
    pub fn toggle(&mut self, now: f64) {
        if self.dataset.is_none() {
            return;
        }
        if self.playing {
            self.playing = false;
        } else {
            self.origin_secs = now - self.progress_fraction() * self.config.total_duration_secs;
            self.playing = true;
        }
    }

    /// Rewind to frame 0. When playing, the time base restarts too, so
    /// the next tick does not immediately jump forward again.
    pub fn reset(&mut self, now: f64) {
        self.frame_index = 0;
        if self.playing {
            self.origin_secs = now;
        }
    }

    /// Recompute the frame index from wall-clock time. No-op while
    /// paused: the frozen index is what a redraw after a resize shows.
    /// Playback loops; the progress fraction wraps modulo 1.
    pub fn tick(&mut self, now: f64) {
        if !self.playing {
            return;
        }
        let Some(ds) = &self.dataset else {
            return;
        };
        let frames = ds.frame_count();
        let fraction =
            ((now - self.origin_secs) / self.config.total_duration_secs).rem_euclid(1.0);
        self.frame_index = ((fraction * frames as f64) as usize).min(frames - 1);
    }
}

/// Run condition: a dataset is loaded and playback systems have work.
pub fn dataset_loaded(playback: Res<PlaybackState>) -> bool {
    playback.dataset.is_some()
}
