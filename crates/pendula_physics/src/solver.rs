//! RK4 integration of a [`PendulumChain`] and conversion of the angular
//! solution into the interleaved Cartesian frames the renderers consume.

use nalgebra::DVector;
use pendula_core::constants::DISPLAY_MARGIN;
use std::fmt;

use crate::dynamics::PendulumChain;

/// Errors that can occur while integrating a chain.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The mass matrix became singular and `M·α = −(C+G)` has no solution.
    Singular { step: usize },
    /// The state left the finite range (the integration blew up).
    NonFinite { step: usize },
    /// Fewer than two sample points requested.
    TooFewPoints { requested: usize },
    /// Initial state does not match the chain's body count.
    DimensionMismatch { expected: usize, got: usize },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Singular { step } => {
                write!(f, "mass matrix is singular at step {step}")
            }
            SolveError::NonFinite { step } => {
                write!(f, "state became non-finite at step {step}")
            }
            SolveError::TooFewPoints { requested } => {
                write!(f, "need at least 2 sample points, got {requested}")
            }
            SolveError::DimensionMismatch { expected, got } => {
                write!(f, "initial state has {got} angles, chain has {expected} bodies")
            }
        }
    }
}

impl std::error::Error for SolveError {}

/// Angular accelerations `α = M⁻¹·(−C − G)` at one instant.
pub fn accelerations(
    chain: &PendulumChain,
    angles: &[f64],
    ang_vels: &[f64],
    step: usize,
) -> Result<DVector<f64>, SolveError> {
    let m = chain.mass_matrix(angles);
    let rhs = -(chain.centripetal_vector(angles, ang_vels) + chain.gravity_vector(angles));
    m.lu().solve(&rhs).ok_or(SolveError::Singular { step })
}

/// Time derivative of the state `y = [θ_0..θ_{n−1}, ω_0..ω_{n−1}]`.
fn deriv(chain: &PendulumChain, y: &DVector<f64>, step: usize) -> Result<DVector<f64>, SolveError> {
    let n = chain.n();
    let angles: Vec<f64> = y.iter().take(n).copied().collect();
    let ang_vels: Vec<f64> = y.iter().skip(n).take(n).copied().collect();
    let alpha = accelerations(chain, &angles, &ang_vels, step)?;

    let mut dydt = DVector::zeros(2 * n);
    dydt.rows_mut(0, n).copy_from(&y.rows(n, n));
    dydt.rows_mut(n, n).copy_from(&alpha);
    Ok(dydt)
}

/// Classic RK4 step.
fn rk4_step(
    chain: &PendulumChain,
    y: &DVector<f64>,
    dt: f64,
    step: usize,
) -> Result<DVector<f64>, SolveError> {
    let k1 = deriv(chain, y, step)?;
    let k2 = deriv(chain, &(y + &k1 * (dt * 0.5)), step)?;
    let k3 = deriv(chain, &(y + &k2 * (dt * 0.5)), step)?;
    let k4 = deriv(chain, &(y + &k3 * dt), step)?;
    Ok(y + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0))
}

/// Integrate from `initial_angles` (radians, at rest) over `t_max` seconds,
/// returning `n_points` equally spaced states including the initial one.
pub fn solve_chain(
    chain: &PendulumChain,
    initial_angles: &[f64],
    t_max: f64,
    n_points: usize,
) -> Result<Vec<DVector<f64>>, SolveError> {
    if n_points < 2 {
        return Err(SolveError::TooFewPoints {
            requested: n_points,
        });
    }
    let n = chain.n();
    if initial_angles.len() != n {
        return Err(SolveError::DimensionMismatch {
            expected: n,
            got: initial_angles.len(),
        });
    }
    let dt = t_max / (n_points - 1) as f64;

    let mut y = DVector::zeros(2 * n);
    for (i, angle) in initial_angles.iter().enumerate() {
        y[i] = *angle;
    }

    let mut states = Vec::with_capacity(n_points);
    for step in 0..n_points {
        if !y.iter().all(|v| v.is_finite()) {
            return Err(SolveError::NonFinite { step });
        }
        states.push(y.clone());
        if step + 1 < n_points {
            y = rk4_step(chain, &y, dt, step)?;
        }
    }
    Ok(states)
}

/// Fold the angular states into per-frame interleaved Cartesian
/// coordinates `[x0, y0, x1, y1, ...]`, pivot at the origin, y up.
pub fn to_cartesian(states: &[DVector<f64>], lengths: &[f64]) -> Vec<Vec<f64>> {
    let n = lengths.len();
    states
        .iter()
        .map(|state| {
            let mut frame = Vec::with_capacity(2 * n);
            let (mut x, mut y) = (0.0, 0.0);
            for (k, len) in lengths.iter().enumerate() {
                let theta = state[k];
                x += len * theta.sin();
                y -= len * theta.cos();
                frame.push(x);
                frame.push(y);
            }
            frame
        })
        .collect()
}

/// Half-width of the region the renderers display: the fully extended
/// chain plus a fixed margin.
pub fn display_limit(lengths: &[f64]) -> f64 {
    lengths.iter().sum::<f64>() + DISPLAY_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use pendula_core::constants::GRAVITY;
    use std::f64::consts::PI;

    #[test]
    fn test_equilibrium_stays_put() {
        // Hanging straight down at rest: every derivative is exactly zero.
        let chain = PendulumChain::new(vec![1.0; 3], vec![1.0; 3]).unwrap();
        let states = solve_chain(&chain, &[0.0; 3], 5.0, 200).unwrap();
        assert_eq!(states.len(), 200);
        let last = states.last().unwrap();
        for v in last.iter() {
            assert!(v.abs() < 1e-12, "drifted off equilibrium: {v}");
        }
    }

    #[test]
    fn test_small_angle_period() {
        // A single pendulum with θ0 = 0.01 rad behaves harmonically:
        // after one period T = 2π√(l/g) it is back near θ0.
        let chain = PendulumChain::new(vec![1.0], vec![1.0]).unwrap();
        let theta0 = 0.01;
        let period = 2.0 * PI * (1.0 / GRAVITY).sqrt();
        let states = solve_chain(&chain, &[theta0], period, 2001).unwrap();
        let final_angle = states.last().unwrap()[0];
        assert!(
            (final_angle - theta0).abs() < 1e-4,
            "after one period θ = {final_angle}, want ≈ {theta0}"
        );
    }

    #[test]
    fn test_solve_rejects_too_few_points() {
        let chain = PendulumChain::new(vec![1.0], vec![1.0]).unwrap();
        assert_eq!(
            solve_chain(&chain, &[0.1], 1.0, 1),
            Err(SolveError::TooFewPoints { requested: 1 })
        );
    }

    #[test]
    fn test_to_cartesian_folds_chain() {
        let chain = PendulumChain::new(vec![1.0, 1.0], vec![1.0, 2.0]).unwrap();
        // Hanging straight down: body 0 at (0,-1), body 1 at (0,-3).
        let states = solve_chain(&chain, &[0.0, 0.0], 0.1, 2).unwrap();
        let frames = to_cartesian(&states, chain.lengths());
        assert_eq!(frames.len(), 2);
        let f0 = &frames[0];
        assert_eq!(f0.len(), 4);
        assert!((f0[0] - 0.0).abs() < 1e-12 && (f0[1] + 1.0).abs() < 1e-12);
        assert!((f0[2] - 0.0).abs() < 1e-12 && (f0[3] + 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_to_cartesian_horizontal() {
        let chain = PendulumChain::new(vec![1.0], vec![2.0]).unwrap();
        let states = solve_chain(&chain, &[PI / 2.0], 0.01, 2).unwrap();
        let frames = to_cartesian(&states, chain.lengths());
        // θ = π/2 puts the body at (l, 0)
        assert!((frames[0][0] - 2.0).abs() < 1e-12);
        assert!(frames[0][1].abs() < 1e-12);
    }

    #[test]
    fn test_display_limit_adds_margin() {
        assert!((display_limit(&[1.0, 2.0, 0.5]) - 4.0).abs() < 1e-12);
    }
}
