use bevy::prelude::*;
use pendula_core::constants::BODY_PALETTE;
use pendula_core::TrajectoryDataset;
use pendula_sim::playback::PlaybackState;

use crate::grid;
use crate::project::scale_for;
use crate::surface::{Panel, SurfacePanels};

/// Color assigned to body `k`: the palette, wrapped.
pub fn body_color(k: usize) -> Color {
    let c = BODY_PALETTE[k % BODY_PALETTE.len()];
    Color::srgba(c[0], c[1], c[2], c[3])
}

/// World-space path of body `k` from frame 0 through `frame_index`,
/// inclusive: always `frame_index + 1` points.
pub fn body_path(
    ds: &TrajectoryDataset,
    k: usize,
    frame_index: usize,
    scale: f64,
    panel: &Panel,
) -> Vec<Vec2> {
    (0..=frame_index)
        .map(|f| {
            let (x, y) = ds.body_position(f, k);
            panel.project_to_world(x, y, scale)
        })
        .collect()
}

/// Trajectory plot pass: ruled grid, then every body's full path so far.
///
/// The paths are rebuilt from frame 0 each pass. That is O(bodies ×
/// frames) per redraw, bounded by the display refresh rate; the paths
/// only ever grow, so there is nothing to invalidate and nothing cached.
pub fn draw_trajectories(
    mut gizmos: Gizmos,
    playback: Res<PlaybackState>,
    panels: Res<SurfacePanels>,
) {
    let Some(ds) = &playback.dataset else {
        return;
    };
    let panel = &panels.plot;
    let Some(scale) = scale_for(panel.size as f64, ds.spatial_limit) else {
        return;
    };

    grid::draw_grid(&mut gizmos, panel, scale, true);

    for k in 0..ds.body_count {
        let path = body_path(ds, k, playback.frame_index, scale, panel);
        if path.len() > 1 {
            gizmos.linestrip_2d(path, body_color(k));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> TrajectoryDataset {
        TrajectoryDataset {
            body_count: 2,
            spatial_limit: 2.0,
            frames: (0..20)
                .map(|f| vec![f as f64 * 0.1, 0.0, 0.0, f as f64 * -0.1])
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
    fn test_path_has_frame_index_plus_one_points() {
        let ds = dataset();
        for f in [0usize, 1, 7, 19] {
            for k in 0..ds.body_count {
                assert_eq!(body_path(&ds, k, f, 100.0, &panel()).len(), f + 1);
            }
        }
    }

    #[test]
    fn test_path_tracks_single_body() {
        let ds = dataset();
        let path = body_path(&ds, 0, 2, 100.0, &panel());
        // body 0 moves +0.1 physical per frame: 10px per frame at scale 100
        assert_eq!(path[0], Vec2::new(0.0, 0.0));
        assert_eq!(path[1], Vec2::new(10.0, 0.0));
        assert_eq!(path[2], Vec2::new(20.0, 0.0));
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(body_color(0), body_color(BODY_PALETTE.len()));
    }
}
