use bevy::prelude::*;
use pendula_core::constants::MINOR_GRID_DIVISIONS;

use crate::surface::Panel;

/// Gridlines thinner than this spacing would smear into a solid wash
const MIN_GRID_STEP: f32 = 2.0;

/// Stroke the background grid of a panel. The solid fill underneath is
/// the panel's backdrop sprite.
///
/// Non-detailed (live scene): just the two axes, faint. Detailed
/// (trajectory plot): stronger axes, a minor grid at one fifth of a
/// physical unit aligned to the center, and a border: graph paper for
/// reading coordinates off.
pub fn draw_grid(gizmos: &mut Gizmos, panel: &Panel, scale: f64, detailed: bool) {
    let half = panel.size / 2.0;
    let c = panel.center;

    if detailed && scale > 0.0 {
        let minor = Color::srgba(0.30, 0.35, 0.45, 0.35);
        let step = (scale / MINOR_GRID_DIVISIONS) as f32;
        for off in minor_offsets(panel.size, step) {
            gizmos.line_2d(
                Vec2::new(c.x + off, c.y - half),
                Vec2::new(c.x + off, c.y + half),
                minor,
            );
            gizmos.line_2d(
                Vec2::new(c.x - half, c.y + off),
                Vec2::new(c.x + half, c.y + off),
                minor,
            );
        }
    }

    let axis = if detailed {
        Color::srgba(0.55, 0.60, 0.70, 0.90)
    } else {
        Color::srgba(0.35, 0.40, 0.50, 0.45)
    };
    gizmos.line_2d(Vec2::new(c.x - half, c.y), Vec2::new(c.x + half, c.y), axis);
    gizmos.line_2d(Vec2::new(c.x, c.y - half), Vec2::new(c.x, c.y + half), axis);

    if detailed {
        gizmos.rect_2d(
            Isometry2d::from_translation(c),
            Vec2::splat(panel.size),
            Color::srgba(0.60, 0.65, 0.75, 0.90),
        );
    }
}

/// Signed offsets of the minor gridlines from the panel center. Offset 0
/// is excluded (the axes already sit there). Empty when the spacing is
/// too fine to be legible.
pub fn minor_offsets(size: f32, step: f32) -> Vec<f32> {
    let mut offs = Vec::new();
    if step < MIN_GRID_STEP {
        return offs;
    }
    let half = size / 2.0;
    let mut off = step;
    while off <= half {
        offs.push(off);
        offs.push(-off);
        off += step;
    }
    offs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_align_to_center() {
        let offs = minor_offsets(200.0, 25.0);
        // ±25, ±50, ±75, ±100
        assert_eq!(offs.len(), 8);
        for off in &offs {
            assert!(off.abs() <= 100.0);
            assert!(off.abs() % 25.0 == 0.0);
            assert!(*off != 0.0, "axes already cover offset 0");
        }
        // symmetric around the center
        let sum: f32 = offs.iter().sum();
        assert_eq!(sum, 0.0);
    }

    #[test]
    fn test_offsets_empty_when_too_fine() {
        assert!(minor_offsets(400.0, 0.5).is_empty());
    }

    #[test]
    fn test_offsets_empty_when_step_exceeds_half() {
        assert!(minor_offsets(100.0, 60.0).is_empty());
    }
}
