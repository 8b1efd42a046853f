use bevy::prelude::*;
use pendula_core::TrajectoryDataset;
use pendula_sim::playback::PlaybackState;

use crate::grid;
use crate::project::scale_for;
use crate::surface::{Panel, SurfacePanels};
use crate::trajectory::body_color;

const TRACE_COLOR: Color = Color::srgba(1.0, 0.82, 0.30, 0.35);
const ROD_COLOR: Color = Color::srgba(0.85, 0.90, 1.00, 1.0);
const PIVOT_COLOR: Color = Color::srgba(0.95, 0.95, 1.00, 1.0);
const PIVOT_RADIUS: f32 = 3.0;
const BODY_RADIUS: f32 = 5.0;

/// World-space points of the trace: the last body's path over the most
/// recent `tail` frames, up to and including `frame_index`. Clamped at
/// frame 0, so early frames simply have a shorter tail.
pub fn trace_points(
    ds: &TrajectoryDataset,
    frame_index: usize,
    tail: usize,
    scale: f64,
    panel: &Panel,
) -> Vec<Vec2> {
    let k = ds.body_count - 1;
    let start = frame_index.saturating_sub(tail);
    (start..=frame_index)
        .map(|f| {
            let (x, y) = ds.body_position(f, k);
            panel.project_to_world(x, y, scale)
        })
        .collect()
}

/// World-space points of the rod polyline: the fixed pivot followed by
/// every body position in chain order.
pub fn rod_points(
    ds: &TrajectoryDataset,
    frame_index: usize,
    scale: f64,
    panel: &Panel,
) -> Vec<Vec2> {
    let mut pts = Vec::with_capacity(ds.body_count + 1);
    pts.push(panel.project_to_world(0.0, 0.0, scale));
    for k in 0..ds.body_count {
        let (x, y) = ds.body_position(frame_index, k);
        pts.push(panel.project_to_world(x, y, scale));
    }
    pts
}

/// Live scene pass: faint grid, decaying endpoint trace, rods, then the
/// markers so they sit on top.
pub fn draw_scene(mut gizmos: Gizmos, playback: Res<PlaybackState>, panels: Res<SurfacePanels>) {
    let Some(ds) = &playback.dataset else {
        return;
    };
    let panel = &panels.scene;
    let Some(scale) = scale_for(panel.size as f64, ds.spatial_limit) else {
        return;
    };

    grid::draw_grid(&mut gizmos, panel, scale, false);

    let trace = trace_points(
        ds,
        playback.frame_index,
        playback.config.trace_tail_frames,
        scale,
        panel,
    );
    if trace.len() > 1 {
        gizmos.linestrip_2d(trace, TRACE_COLOR);
    }

    let rods = rod_points(ds, playback.frame_index, scale, panel);
    gizmos.linestrip_2d(rods.iter().copied(), ROD_COLOR);

    gizmos.circle_2d(Isometry2d::from_translation(rods[0]), PIVOT_RADIUS, PIVOT_COLOR);
    for (k, p) in rods.iter().skip(1).enumerate() {
        gizmos.circle_2d(Isometry2d::from_translation(*p), BODY_RADIUS, body_color(k));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(bodies: usize, frames: usize) -> TrajectoryDataset {
        TrajectoryDataset {
            body_count: bodies,
            spatial_limit: 2.0,
            frames: (0..frames)
                .map(|f| (0..2 * bodies).map(|c| (f * 10 + c) as f64 * 0.01).collect())
                .collect(),
        }
    }

    fn panel() -> Panel {
        Panel {
            center: Vec2::ZERO,
            size: 400.0,
        }
    }

    #[test]
    fn test_trace_length_clamped_at_start() {
        let ds = dataset(2, 50);
        // frame_index < tail: trace reaches back to frame 0 only
        assert_eq!(trace_points(&ds, 3, 10, 100.0, &panel()).len(), 4);
        // frame_index >= tail: full tail plus the current frame
        assert_eq!(trace_points(&ds, 30, 10, 100.0, &panel()).len(), 11);
        // at frame 0 the trace is a single point
        assert_eq!(trace_points(&ds, 0, 10, 100.0, &panel()).len(), 1);
    }

    #[test]
    fn test_rod_polyline_starts_at_pivot() {
        let ds = dataset(3, 5);
        let pts = rod_points(&ds, 2, 100.0, &panel());
        assert_eq!(pts.len(), 4, "pivot + one point per body");
        // pivot is the physical origin, i.e. the panel center
        assert_eq!(pts[0], panel().center);
    }

    #[test]
    fn test_resize_while_paused_keeps_frame() {
        use pendula_core::PlaybackConfig;
        use pendula_sim::playback::PlaybackState;

        let ds = TrajectoryDataset {
            body_count: 1,
            spatial_limit: 2.0,
            frames: vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![-1.0, 0.0]],
        };
        let mut pb = PlaybackState::new(PlaybackConfig::default());
        pb.load(ds.clone(), 0.0);
        pb.tick(5.0);
        pb.toggle(5.0); // pause at frame 1
        assert_eq!(pb.frame_index, 1);

        let small = Panel {
            center: Vec2::ZERO,
            size: 400.0,
        };
        let before = rod_points(&ds, pb.frame_index, 100.0, &small);

        // window grows 400 -> 800 while paused: ticks stay inert,
        // the same frame re-renders at the doubled scale
        pb.tick(99.0);
        assert_eq!(pb.frame_index, 1);
        let large = Panel {
            center: Vec2::ZERO,
            size: 800.0,
        };
        let after = rod_points(&ds, pb.frame_index, 200.0, &large);
        assert_eq!(after[1], before[1] * 2.0);
    }

    #[test]
    fn test_rod_points_follow_frame() {
        let ds = TrajectoryDataset {
            body_count: 1,
            spatial_limit: 2.0,
            frames: vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![-1.0, 0.0]],
        };
        let p = panel();
        // scale (400/2)/2 = 100; body at (-1, 0) maps 100px left of center
        let pts = rod_points(&ds, 2, 100.0, &p);
        assert_eq!(pts[1], Vec2::new(-100.0, 0.0));
    }
}
