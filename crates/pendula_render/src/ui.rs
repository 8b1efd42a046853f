use bevy::prelude::*;
use pendula_sim::playback::PlaybackState;

use crate::controls::SolveParams;

/// Marker for the HUD text (top-left)
#[derive(Component)]
pub struct HudText;

/// Marker for the status line (top-right)
#[derive(Component)]
pub struct StatusText;

/// One-line status surfaced to the user: run errors, warnings, hints.
/// Errors stay visible until the next run replaces them.
#[derive(Resource, Default)]
pub struct StatusLine {
    pub message: String,
    pub is_error: bool,
}

impl StatusLine {
    pub fn error(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.is_error = true;
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.is_error = false;
    }

    pub fn clear(&mut self) {
        self.message.clear();
        self.is_error = false;
    }
}

/// HUD frame counter for throttling
#[derive(Resource, Default)]
pub struct HudThrottle {
    pub frame: u32,
}

/// Spawn the HUD overlay
pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Text::new("Pendula"),
        TextFont {
            font_size: 15.0,
            ..default()
        },
        TextColor(Color::srgba(0.75, 0.85, 0.95, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        HudText,
    ));

    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 15.0,
            ..default()
        },
        TextColor(Color::srgba(1.0, 0.5, 0.4, 0.95)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            right: Val::Px(10.0),
            max_width: Val::Px(480.0),
            ..default()
        },
        StatusText,
    ));
}

/// Update HUD text every 10th frame (string formatting is expensive)
pub fn update_hud(
    playback: Res<PlaybackState>,
    params: Res<SolveParams>,
    mut throttle: ResMut<HudThrottle>,
    mut hud_query: Query<&mut Text, With<HudText>>,
) {
    throttle.frame = throttle.frame.wrapping_add(1);
    if throttle.frame % 10 != 0 {
        return;
    }
    let Ok(mut text) = hud_query.get_single_mut() else {
        return;
    };

    let playback_line = match &playback.dataset {
        Some(ds) => {
            let mode = if playback.playing { "playing" } else { "paused" };
            format!(
                "{} bodies | frame {}/{} [{}]",
                ds.body_count,
                playback.frame_index + 1,
                ds.frame_count(),
                mode
            )
        }
        None => "no trajectory loaded".to_string(),
    };

    **text = format!(
        "PENDULA | {}\n\
         next run: {} bodies, {:.0}s, {} samples\n\
         \n\
         [Enter] Solve  [Space] Play/Pause  [R] Restart\n\
         [Up/Down] Bodies  [Left/Right] Samples  [ [ ] ] Duration",
        playback_line, params.n, params.t_max, params.n_points,
    );
}

/// Push status line changes into the overlay text
pub fn update_status(status: Res<StatusLine>, mut query: Query<(&mut Text, &mut TextColor), With<StatusText>>) {
    if !status.is_changed() {
        return;
    }
    let Ok((mut text, mut color)) = query.get_single_mut() else {
        return;
    };
    **text = status.message.clone();
    color.0 = if status.is_error {
        Color::srgba(1.0, 0.45, 0.35, 0.95)
    } else {
        Color::srgba(1.0, 0.82, 0.30, 0.95)
    };
}

/// Handle keyboard input for playback controls
pub fn playback_key_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut playback: ResMut<PlaybackState>,
) {
    let now = time.elapsed_secs_f64();
    if keyboard.just_pressed(KeyCode::Space) {
        playback.toggle(now);
        if playback.dataset.is_some() {
            info!(
                "playback {}",
                if playback.playing { "resumed" } else { "paused" }
            );
        }
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        playback.reset(now);
    }
}
