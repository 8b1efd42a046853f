use bevy::prelude::*;
use pendula_sim::pipeline::playback_tick;
use pendula_sim::playback::dataset_loaded;
use pendula_sim::state::AppState;

use super::controls;
use super::scene;
use super::surface;
use super::trajectory;
use super::ui;

/// Main render plugin for the Pendula playback engine
pub struct PendulaRenderPlugin;

impl Plugin for PendulaRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<surface::SurfacePanels>()
            .init_resource::<controls::SolveParams>()
            .init_resource::<ui::StatusLine>()
            .init_resource::<ui::HudThrottle>()
            .add_systems(
                Startup,
                (spawn_camera, surface::spawn_backdrops, ui::spawn_hud, controls::spawn_controls),
            )
            .add_systems(
                Update,
                (
                    surface::sync_panels,
                    ui::playback_key_system,
                    ui::update_hud,
                    ui::update_status,
                    controls::param_edit_system.run_if(not(in_state(AppState::Solving))),
                    controls::run_trigger_system.run_if(not(in_state(AppState::Solving))),
                    controls::solve_poll_system.run_if(in_state(AppState::Solving)),
                ),
            )
            // the draw passes read the frame index the clock computed this pass
            .add_systems(
                Update,
                (scene::draw_scene, trajectory::draw_trajectories)
                    .after(playback_tick)
                    .run_if(dataset_loaded),
            )
            .add_systems(OnEnter(AppState::Solving), controls::spawn_solving_overlay)
            .add_systems(OnExit(AppState::Solving), controls::despawn_solving_overlay)
            .add_systems(OnEnter(AppState::Idle), controls::spawn_idle_hint)
            .add_systems(OnExit(AppState::Idle), controls::despawn_idle_hint);
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
