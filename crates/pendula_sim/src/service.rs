//! The simulation collaborator: turns a parameter request into a solved
//! [`TrajectoryDataset`], or an explanation of why it could not.
//!
//! The exchange is request/response shaped. Input problems come back as a
//! `success: false` payload with a message; a solver fault (singular
//! system, numerical blow-up) surfaces as a hard `Err`, the equivalent of
//! the transport failing. Callers fold all three outcomes into a single
//! human-readable status string and must mutate nothing on failure.

use pendula_core::constants::{MAX_BODIES, MIN_BODIES};
use pendula_core::TrajectoryDataset;
use pendula_physics::{display_limit, solve_chain, to_cartesian, PendulumChain, SolveError};
use serde::{Deserialize, Serialize};

/// Simulation run parameters. The numeric lists are comma-joined, exactly
/// as the parameter form produces them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimRequest {
    /// Number of bodies in the chain
    pub n: usize,
    /// Comma-separated masses (kg)
    pub masses: String,
    /// Comma-separated rod lengths (m)
    pub lengths: String,
    /// Comma-separated initial angles (degrees from vertical)
    pub initial_angles: String,
    /// Simulated duration (s)
    pub t_max: f64,
    /// Number of sampled frames
    pub n_points: usize,
}

/// Simulation outcome payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimResponse {
    pub success: bool,
    pub animation_data: Option<TrajectoryDataset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SimResponse {
    fn ok(dataset: TrajectoryDataset) -> Self {
        Self {
            success: true,
            animation_data: Some(dataset),
            message: None,
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            animation_data: None,
            message: Some(message.into()),
        }
    }
}

/// Parse a comma-separated list of reals, skipping blank or malformed
/// entries; the count check downstream catches anything dropped.
pub fn parse_csv(s: &str) -> Vec<f64> {
    s.split(',')
        .filter_map(|x| x.trim().parse::<f64>().ok())
        .collect()
}

/// Run one simulation request to completion.
pub fn run_simulation(req: &SimRequest) -> Result<SimResponse, SolveError> {
    if !(MIN_BODIES..=MAX_BODIES).contains(&req.n) {
        return Ok(SimResponse::fail(format!(
            "body count must be in [{MIN_BODIES}, {MAX_BODIES}], got {}",
            req.n
        )));
    }
    if !(req.t_max.is_finite() && req.t_max > 0.0) {
        return Ok(SimResponse::fail(format!(
            "duration must be positive, got {}",
            req.t_max
        )));
    }
    if req.n_points < 2 {
        return Ok(SimResponse::fail(format!(
            "need at least 2 sample points, got {}",
            req.n_points
        )));
    }

    let masses = parse_csv(&req.masses);
    let lengths = parse_csv(&req.lengths);
    let angles_deg = parse_csv(&req.initial_angles);
    if masses.len() != req.n || lengths.len() != req.n || angles_deg.len() != req.n {
        return Ok(SimResponse::fail(format!(
            "input length mismatch: expected {}, got masses {}, lengths {}, angles {}",
            req.n,
            masses.len(),
            lengths.len(),
            angles_deg.len()
        )));
    }
    if masses.iter().any(|&m| m <= 0.0) || lengths.iter().any(|&l| l <= 0.0) {
        return Ok(SimResponse::fail(
            "masses and lengths must all be positive",
        ));
    }

    let limit = display_limit(&lengths);
    let initial: Vec<f64> = angles_deg.iter().map(|d| d.to_radians()).collect();
    let Some(chain) = PendulumChain::new(masses, lengths) else {
        return Ok(SimResponse::fail("masses and lengths disagree in length"));
    };

    let states = solve_chain(&chain, &initial, req.t_max, req.n_points)?;
    let frames = to_cartesian(&states, chain.lengths());

    Ok(SimResponse::ok(TrajectoryDataset {
        body_count: req.n,
        spatial_limit: limit,
        frames,
    }))
}
