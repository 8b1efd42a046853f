//! Physical space to surface space.
//!
//! Surface coordinates have their origin at the top-left corner with y
//! growing downward; physical coordinates are centered on the pivot with
//! y growing upward.

/// Map a physical point onto a surface of the given pixel dimensions.
/// Pure: `px = x·scale + w/2`, `py = −y·scale + h/2`.
pub fn project(x: f64, y: f64, scale: f64, width: f64, height: f64) -> (f64, f64) {
    (x * scale + width / 2.0, -y * scale + height / 2.0)
}

/// Pixels per physical unit for a surface dimension and a spatial limit.
/// A non-positive or non-finite limit has no defined scale; callers skip
/// drawing instead of dividing by zero.
pub fn scale_for(dimension: f64, limit: f64) -> Option<f64> {
    if limit.is_finite() && limit > 0.0 {
        Some((dimension / 2.0) / limit)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_to_center() {
        for (w, h) in [(400.0, 400.0), (800.0, 600.0), (123.0, 457.0)] {
            let (px, py) = project(0.0, 0.0, 77.0, w, h);
            assert_eq!((px, py), (w / 2.0, h / 2.0));
        }
    }

    #[test]
    fn test_y_axis_inverted() {
        // physical "up" lands above the center, i.e. at a smaller py
        let (_, py) = project(0.0, 1.0, 50.0, 400.0, 400.0);
        assert_eq!(py, 150.0);
    }

    #[test]
    fn test_known_frame_mapping() {
        // body at (-1, 0), limit 2, 400x400 surface: scale 100, pixel (100, 200)
        let scale = scale_for(400.0, 2.0).unwrap();
        assert_eq!(scale, 100.0);
        assert_eq!(project(-1.0, 0.0, scale, 400.0, 400.0), (100.0, 200.0));
    }

    #[test]
    fn test_degenerate_limit_has_no_scale() {
        assert_eq!(scale_for(400.0, 0.0), None);
        assert_eq!(scale_for(400.0, -1.0), None);
        assert_eq!(scale_for(400.0, f64::NAN), None);
        assert_eq!(scale_for(400.0, f64::INFINITY), None);
    }
}
