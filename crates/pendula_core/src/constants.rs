// Units: physical space is measured in rod lengths (metres for the default
// parameters), screen space in logical pixels. One playback sweep always
// spans PlaybackConfig::total_duration_secs of wall-clock time, independent
// of the simulated duration.

/// Gravitational acceleration (m/s^2)
pub const GRAVITY: f64 = 9.81;

/// Hard bounds on the body count accepted from the UI
pub const MIN_BODIES: usize = 1;
pub const MAX_BODIES: usize = 150;

/// Above this many bodies the solve gets noticeably slow; the UI warns
pub const LARGE_CHAIN_WARN: usize = 20;

/// Padding added around the fully extended chain when deriving the
/// displayed spatial limit
pub const DISPLAY_MARGIN: f64 = 0.5;

/// Minor gridline spacing is one fifth of a physical unit, in pixels
pub const MINOR_GRID_DIVISIONS: f64 = 5.0;

/// Per-body trajectory colors [r, g, b, a]; assigned by body index modulo
/// the palette length
pub const BODY_PALETTE: [[f32; 4]; 8] = [
    [0.30, 0.75, 1.00, 1.0], // sky blue
    [1.00, 0.45, 0.35, 1.0], // coral
    [0.40, 0.90, 0.45, 1.0], // green
    [1.00, 0.80, 0.25, 1.0], // amber
    [0.80, 0.50, 1.00, 1.0], // violet
    [0.35, 0.95, 0.90, 1.0], // teal
    [1.00, 0.55, 0.80, 1.0], // pink
    [0.75, 0.85, 0.95, 1.0], // silver
];
