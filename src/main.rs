use bevy::prelude::*;
use pendula_core::PlaybackConfig;
use pendula_render::plugin::PendulaRenderPlugin;
use pendula_sim::pipeline::PlaybackPlugin;
use pendula_sim::playback::PlaybackState;
use pendula_sim::state::AppState;

fn main() {
    let config = PlaybackConfig::default();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Pendula — N-Pendulum Playback".into(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.04)))
        .insert_resource(PlaybackState::new(config))
        .init_state::<AppState>()
        .add_plugins(PlaybackPlugin)
        .add_plugins(PendulaRenderPlugin)
        .run();
}
