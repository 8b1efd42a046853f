use bevy::prelude::*;
use bevy::tasks::{block_on, poll_once, AsyncComputeTaskPool, Task};
use pendula_core::constants::{LARGE_CHAIN_WARN, MAX_BODIES, MIN_BODIES};
use pendula_physics::SolveError;
use pendula_sim::playback::PlaybackState;
use pendula_sim::service::{run_simulation, SimRequest, SimResponse};
use pendula_sim::state::AppState;

use crate::ui::StatusLine;

// --- Parameter bounds ---

const MIN_POINTS: usize = 50;
const MAX_POINTS: usize = 20_000;
const POINTS_STEP: usize = 250;
const MIN_T_MAX: f64 = 1.0;
const MAX_T_MAX: f64 = 120.0;

const BUTTON_BG: Color = Color::srgba(0.0, 0.35, 0.15, 0.9);
const BUTTON_BG_DISABLED: Color = Color::srgba(0.15, 0.18, 0.15, 0.9);

// --- Resources ---

/// Editable run parameters. Masses, lengths and angles are uniform; the
/// request carries them comma-joined, as the service expects.
#[derive(Resource, Debug, Clone)]
pub struct SolveParams {
    pub n: usize,
    pub t_max: f64,
    pub n_points: usize,
}

impl Default for SolveParams {
    fn default() -> Self {
        Self {
            n: 3,
            t_max: 10.0,
            n_points: 1000,
        }
    }
}

impl SolveParams {
    pub fn to_request(&self) -> SimRequest {
        SimRequest {
            n: self.n,
            masses: vec!["1"; self.n].join(","),
            lengths: vec!["1"; self.n].join(","),
            initial_angles: vec!["120"; self.n].join(","),
            t_max: self.t_max,
            n_points: self.n_points,
        }
    }
}

/// The outstanding simulation request, if any. Its presence is what
/// makes the run trigger inert: a second request cannot race the first.
#[derive(Resource)]
pub struct SolveTask(Task<Result<SimResponse, SolveError>>);

// --- Markers ---

#[derive(Component)]
pub struct RunButton;

#[derive(Component)]
pub struct SolvingRoot;

#[derive(Component)]
pub struct IdleHintRoot;

// --- Control bar ---

pub fn spawn_controls(mut commands: Commands) {
    commands
        .spawn((
            Button,
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(12.0),
                left: Val::Px(12.0),
                width: Val::Px(140.0),
                height: Val::Px(40.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_BG),
            RunButton,
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new("Solve & Play"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// Launch a run from the button or the Enter key. Inert while a request
/// is outstanding (this system only runs outside `AppState::Solving`).
pub fn run_trigger_system(
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
    params: Res<SolveParams>,
    keyboard: Res<ButtonInput<KeyCode>>,
    button_q: Query<&Interaction, (Changed<Interaction>, With<RunButton>)>,
) {
    let clicked = button_q.iter().any(|i| *i == Interaction::Pressed);
    if !clicked && !keyboard.just_pressed(KeyCode::Enter) {
        return;
    }

    let req = params.to_request();
    info!(
        "run requested: n={} t_max={}s points={}",
        req.n, req.t_max, req.n_points
    );
    let pool = AsyncComputeTaskPool::get();
    let task = pool.spawn(async move { run_simulation(&req) });
    commands.insert_resource(SolveTask(task));
    next_state.set(AppState::Solving);
}

/// Keyboard parameter editing: Up/Down adjusts the body count (clamped),
/// Left/Right the sample count, [ and ] the simulated duration.
pub fn param_edit_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut params: ResMut<SolveParams>,
    mut status: ResMut<StatusLine>,
) {
    let mut touched = false;

    if keyboard.just_pressed(KeyCode::ArrowUp) {
        params.n = (params.n + 1).min(MAX_BODIES);
        touched = true;
    }
    if keyboard.just_pressed(KeyCode::ArrowDown) {
        params.n = params.n.saturating_sub(1).max(MIN_BODIES);
        touched = true;
    }
    if keyboard.just_pressed(KeyCode::ArrowRight) {
        params.n_points = (params.n_points + POINTS_STEP).min(MAX_POINTS);
        touched = true;
    }
    if keyboard.just_pressed(KeyCode::ArrowLeft) {
        params.n_points = params.n_points.saturating_sub(POINTS_STEP).max(MIN_POINTS);
        touched = true;
    }
    if keyboard.just_pressed(KeyCode::BracketRight) {
        params.t_max = (params.t_max + 1.0).min(MAX_T_MAX);
        touched = true;
    }
    if keyboard.just_pressed(KeyCode::BracketLeft) {
        params.t_max = (params.t_max - 1.0).max(MIN_T_MAX);
        touched = true;
    }

    if touched && params.n > LARGE_CHAIN_WARN {
        status.warn(format!(
            "{} bodies: the solve may take a while",
            params.n
        ));
    } else if touched {
        status.clear();
    }
}

// --- Solving overlay ---

pub fn spawn_solving_overlay(
    mut commands: Commands,
    mut button_q: Query<&mut BackgroundColor, With<RunButton>>,
) {
    for mut bg in &mut button_q {
        bg.0 = BUTTON_BG_DISABLED;
    }
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            SolvingRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Solving..."),
                TextFont {
                    font_size: 32.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 0.82, 0.30, 0.9)),
            ));
        });
}

pub fn despawn_solving_overlay(
    mut commands: Commands,
    mut button_q: Query<&mut BackgroundColor, With<RunButton>>,
    query: Query<Entity, With<SolvingRoot>>,
) {
    for mut bg in &mut button_q {
        bg.0 = BUTTON_BG;
    }
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

/// Poll the outstanding request. On success the dataset replaces the old
/// one via `load`; on any failure nothing is mutated: the prior dataset
/// and frame position survive so the user can retry.
pub fn solve_poll_system(
    mut commands: Commands,
    task: Option<ResMut<SolveTask>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut playback: ResMut<PlaybackState>,
    mut status: ResMut<StatusLine>,
    time: Res<Time>,
) {
    let Some(mut solve_task) = task else {
        return;
    };
    let Some(result) = block_on(poll_once(&mut solve_task.0)) else {
        return;
    };
    commands.remove_resource::<SolveTask>();

    let failure = match result {
        Ok(SimResponse {
            success: true,
            animation_data: Some(dataset),
            ..
        }) => {
            playback.load(dataset, time.elapsed_secs_f64());
            status.clear();
            next_state.set(AppState::Playback);
            return;
        }
        Ok(resp) => resp
            .message
            .unwrap_or_else(|| "simulation failed".to_string()),
        Err(e) => format!("simulation backend error: {e}"),
    };

    error!("run failed: {failure}");
    status.error(failure);
    // fall back to whatever was on screen before the request
    next_state.set(if playback.dataset.is_some() {
        AppState::Playback
    } else {
        AppState::Idle
    });
}

// --- Idle hint ---

pub fn spawn_idle_hint(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            IdleHintRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("No trajectory yet - press Enter or click Solve & Play"),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgba(0.6, 0.65, 0.75, 0.8)),
            ));
        });
}

pub fn despawn_idle_hint(mut commands: Commands, query: Query<Entity, With<IdleHintRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
