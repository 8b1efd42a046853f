use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::project::project;

// --- Layout constants ---

const PANEL_GUTTER: f32 = 16.0;
/// Vertical band reserved for the HUD at the top of the window
const HUD_RESERVE: f32 = 96.0;
/// Vertical band reserved for the control bar at the bottom
const CONTROL_RESERVE: f32 = 64.0;
const MIN_PANEL_SIDE: f32 = 64.0;

const SCENE_BG: Color = Color::srgb(0.03, 0.03, 0.06);
const PLOT_BG: Color = Color::srgb(0.05, 0.05, 0.09);

/// One square drawing surface, positioned in world coordinates
/// (camera at the origin, y up, one world unit per logical pixel).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Panel {
    pub center: Vec2,
    pub size: f32,
}

impl Panel {
    /// Convert a surface-pixel coordinate (origin top-left, y down) into
    /// world coordinates.
    pub fn to_world(&self, sx: f64, sy: f64) -> Vec2 {
        Vec2::new(
            self.center.x - self.size / 2.0 + sx as f32,
            self.center.y + self.size / 2.0 - sy as f32,
        )
    }

    /// Project a physical point straight into world coordinates.
    pub fn project_to_world(&self, x: f64, y: f64, scale: f64) -> Vec2 {
        let (sx, sy) = project(x, y, scale, self.size as f64, self.size as f64);
        self.to_world(sx, sy)
    }
}

/// The two drawing surfaces: live scene on the left, trajectory plot on
/// the right. Kept in sync with the primary window by [`sync_panels`].
#[derive(Resource, Debug, Default, PartialEq)]
pub struct SurfacePanels {
    pub scene: Panel,
    pub plot: Panel,
    window_size: Vec2,
}

/// Marker for the live-scene backdrop sprite
#[derive(Component)]
pub struct SceneBackdrop;

/// Marker for the trajectory-plot backdrop sprite
#[derive(Component)]
pub struct PlotBackdrop;

/// Compute the two panel squares for a window size. Each surface is as
/// large a square as fits its half of the window after the HUD and
/// control bands are reserved.
pub fn layout(width: f32, height: f32) -> (Panel, Panel) {
    let avail_h = height - HUD_RESERVE - CONTROL_RESERVE - 2.0 * PANEL_GUTTER;
    let avail_w = width / 2.0 - 1.5 * PANEL_GUTTER;
    let side = avail_w.min(avail_h).max(MIN_PANEL_SIDE);
    let center_y = (CONTROL_RESERVE - HUD_RESERVE) / 2.0;
    let dx = side / 2.0 + PANEL_GUTTER / 2.0;
    (
        Panel {
            center: Vec2::new(-dx, center_y),
            size: side,
        },
        Panel {
            center: Vec2::new(dx, center_y),
            size: side,
        },
    )
}

/// Spawn the backdrop sprites behind the two surfaces. Their size and
/// position are corrected by [`sync_panels`] on the first pass.
pub fn spawn_backdrops(mut commands: Commands) {
    commands.spawn((
        Sprite::from_color(SCENE_BG, Vec2::splat(MIN_PANEL_SIDE)),
        Transform::from_xyz(0.0, 0.0, -1.0),
        SceneBackdrop,
    ));
    commands.spawn((
        Sprite::from_color(PLOT_BG, Vec2::splat(MIN_PANEL_SIDE)),
        Transform::from_xyz(0.0, 0.0, -1.0),
        PlotBackdrop,
    ));
}

/// Keep the panel layout and backdrop sprites matched to the window.
///
/// The draw passes re-issue the current frame every schedule pass, so a
/// resize while paused re-renders at the frozen frame index with no
/// special casing; only the clock moves the frame.
pub fn sync_panels(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut panels: ResMut<SurfacePanels>,
    mut scene_q: Query<
        (&mut Sprite, &mut Transform),
        (With<SceneBackdrop>, Without<PlotBackdrop>),
    >,
    mut plot_q: Query<(&mut Sprite, &mut Transform), (With<PlotBackdrop>, Without<SceneBackdrop>)>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let size = Vec2::new(window.width(), window.height());
    if panels.window_size == size {
        return;
    }

    let (scene, plot) = layout(size.x, size.y);
    panels.scene = scene;
    panels.plot = plot;
    panels.window_size = size;

    if let Ok((mut sprite, mut transform)) = scene_q.get_single_mut() {
        sprite.custom_size = Some(Vec2::splat(scene.size));
        transform.translation = scene.center.extend(-1.0);
    }
    if let Ok((mut sprite, mut transform)) = plot_q.get_single_mut() {
        sprite.custom_size = Some(Vec2::splat(plot.size));
        transform.translation = plot.center.extend(-1.0);
    }

    info!(
        "surfaces resized: {}x{} window, {:.0}px panels",
        size.x, size.y, scene.size
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panels_are_square_and_disjoint() {
        let (scene, plot) = layout(1280.0, 720.0);
        assert_eq!(scene.size, plot.size);
        assert!(scene.size > MIN_PANEL_SIDE);
        // separated horizontally by the gutter
        let scene_right = scene.center.x + scene.size / 2.0;
        let plot_left = plot.center.x - plot.size / 2.0;
        assert!(scene_right < plot_left);
    }

    #[test]
    fn test_wider_window_grows_panels() {
        let (before, _) = layout(400.0, 2000.0);
        let (after, _) = layout(800.0, 2000.0);
        assert!(after.size > before.size);
    }

    #[test]
    fn test_to_world_corners() {
        let panel = Panel {
            center: Vec2::new(100.0, -50.0),
            size: 200.0,
        };
        // surface origin is the top-left corner
        assert_eq!(panel.to_world(0.0, 0.0), Vec2::new(0.0, 50.0));
        // surface center is the panel center
        assert_eq!(panel.to_world(100.0, 100.0), panel.center);
        // y grows downward on the surface
        assert_eq!(panel.to_world(200.0, 200.0), Vec2::new(200.0, -150.0));
    }

    #[test]
    fn test_project_to_world_centers_origin() {
        let panel = Panel {
            center: Vec2::new(-30.0, 10.0),
            size: 400.0,
        };
        assert_eq!(panel.project_to_world(0.0, 0.0, 100.0), panel.center);
    }
}
