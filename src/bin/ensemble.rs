//! Headless divergence study over an ensemble of chains.
//! Focus: how fast nearly identical initial conditions separate.
//!
//! Usage: ensemble [n] [runs] [t_max] [n_points]

use pendula_physics::{solve_chain, to_cartesian, PendulumChain};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::env;
use std::process::exit;

/// Size of the initial-angle perturbation, radians
const PERTURBATION: f64 = 1e-5;

fn arg<T: std::str::FromStr>(args: &[String], i: usize, default: T) -> T {
    args.get(i).and_then(|s| s.parse().ok()).unwrap_or(default)
}

/// Distance between the last body's positions in two frames
fn endpoint_gap(a: &[f64], b: &[f64]) -> f64 {
    let i = a.len() - 2;
    ((a[i] - b[i]).powi(2) + (a[i + 1] - b[i + 1]).powi(2)).sqrt()
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let n = arg(&args, 1, 3usize);
    let runs = arg(&args, 2, 8usize);
    let t_max = arg(&args, 3, 10.0f64);
    let n_points = arg(&args, 4, 1000usize);

    let Some(chain) = PendulumChain::new(vec![1.0; n], vec![1.0; n]) else {
        eprintln!("need at least one body");
        exit(1);
    };
    let base_angles = vec![120f64.to_radians(); n];

    let base = match solve_chain(&chain, &base_angles, t_max, n_points) {
        Ok(states) => to_cartesian(&states, chain.lengths()),
        Err(e) => {
            eprintln!("base solve failed: {e}");
            exit(1);
        }
    };

    println!(
        "ensemble: {} bodies, {} runs, {:.1}s, {} samples, ±{:.0e} rad perturbation",
        n, runs, t_max, n_points, PERTURBATION
    );
    println!("endpoint separation from the base run:");
    println!("{:>4} {:>12} {:>12} {:>12} {:>12}", "run", "25%", "50%", "75%", "100%");

    let checkpoints = [n_points / 4, n_points / 2, 3 * n_points / 4, n_points - 1];
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for run in 1..runs {
        let perturbed: Vec<f64> = base_angles
            .iter()
            .map(|a| a + rng.gen_range(-PERTURBATION..PERTURBATION))
            .collect();

        let frames = match solve_chain(&chain, &perturbed, t_max, n_points) {
            Ok(states) => to_cartesian(&states, chain.lengths()),
            Err(e) => {
                eprintln!("run {run} failed: {e}");
                continue;
            }
        };

        let gaps: Vec<f64> = checkpoints
            .iter()
            .map(|&c| endpoint_gap(&base[c], &frames[c]))
            .collect();
        println!(
            "{:>4} {:>12.3e} {:>12.3e} {:>12.3e} {:>12.3e}",
            run, gaps[0], gaps[1], gaps[2], gaps[3]
        );
    }
}
