use bevy::prelude::*;

use crate::playback::{dataset_loaded, PlaybackState};

/// Bevy plugin for the playback clock
pub struct PlaybackPlugin;

impl Plugin for PlaybackPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, playback_tick.run_if(dataset_loaded));
    }
}

/// Advance the clock once per scheduled pass. The render passes read the
/// frame index this system computed; ordering is enforced where they are
/// registered (`.after(playback_tick)`).
pub fn playback_tick(mut playback: ResMut<PlaybackState>, time: Res<Time>) {
    let now = time.elapsed_secs_f64();
    playback.tick(now);
}
