use bevy::prelude::*;

/// Top-level application flow.
///
/// `Idle` means no run has produced a dataset yet; `Solving` means a
/// simulation request is outstanding (the run trigger is inert until it
/// settles); `Playback` means a dataset is loaded and animating.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    Idle,
    Solving,
    Playback,
}
