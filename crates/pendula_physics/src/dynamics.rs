use nalgebra::{DMatrix, DVector};
use pendula_core::constants::GRAVITY;

/// A chain of point masses on rigid massless rods, hung from a fixed pivot.
///
/// The Lagrangian equations of motion are `M·α + C + G = 0` where α are the
/// angular accelerations. Angles are measured from the downward vertical;
/// all indexing is 0-based with body 0 attached to the pivot.
#[derive(Debug, Clone)]
pub struct PendulumChain {
    masses: Vec<f64>,
    lengths: Vec<f64>,
}

impl PendulumChain {
    /// `masses` and `lengths` must be the same (non-zero) length.
    pub fn new(masses: Vec<f64>, lengths: Vec<f64>) -> Option<Self> {
        if masses.is_empty() || masses.len() != lengths.len() {
            return None;
        }
        Some(Self { masses, lengths })
    }

    pub fn n(&self) -> usize {
        self.masses.len()
    }

    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    /// Sum of the masses carried at or below rod `k`
    fn tail_mass(&self, k: usize) -> f64 {
        self.masses[k..].iter().sum()
    }

    /// Mass matrix: `M[i][j] = (Σ_{k≥max(i,j)} m_k) · l_i · l_j · cos(θ_i − θ_j)`
    pub fn mass_matrix(&self, angles: &[f64]) -> DMatrix<f64> {
        let n = self.n();
        DMatrix::from_fn(n, n, |i, j| {
            self.tail_mass(i.max(j))
                * self.lengths[i]
                * self.lengths[j]
                * (angles[i] - angles[j]).cos()
        })
    }

    /// Centripetal coupling vector:
    /// `C[i] = Σ_j (Σ_{k≥max(i,j)} m_k) · l_i · l_j · sin(θ_i − θ_j) · ω_j²`
    pub fn centripetal_vector(&self, angles: &[f64], ang_vels: &[f64]) -> DVector<f64> {
        let n = self.n();
        DVector::from_fn(n, |i, _| {
            (0..n)
                .map(|j| {
                    self.tail_mass(i.max(j))
                        * self.lengths[i]
                        * self.lengths[j]
                        * (angles[i] - angles[j]).sin()
                        * ang_vels[j]
                        * ang_vels[j]
                })
                .sum()
        })
    }

    /// Gravity torque vector: `G[i] = (Σ_{k≥i} m_k) · g · l_i · sin(θ_i)`
    pub fn gravity_vector(&self, angles: &[f64]) -> DVector<f64> {
        let n = self.n();
        DVector::from_fn(n, |i, _| {
            self.tail_mass(i) * GRAVITY * self.lengths[i] * angles[i].sin()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(n: usize) -> PendulumChain {
        PendulumChain::new(vec![1.0; n], vec![1.0; n]).unwrap()
    }

    #[test]
    fn test_new_rejects_mismatched_inputs() {
        assert!(PendulumChain::new(vec![], vec![]).is_none());
        assert!(PendulumChain::new(vec![1.0], vec![1.0, 1.0]).is_none());
    }

    #[test]
    fn test_single_body_mass_matrix() {
        let chain = PendulumChain::new(vec![2.0], vec![3.0]).unwrap();
        let m = chain.mass_matrix(&[0.7]);
        // M = m·l² regardless of angle
        assert!((m[(0, 0)] - 2.0 * 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_mass_matrix_symmetric() {
        let chain = uniform(3);
        let angles = [0.3, -0.8, 1.2];
        let m = chain.mass_matrix(&angles);
        for i in 0..3 {
            for j in 0..3 {
                assert!(
                    (m[(i, j)] - m[(j, i)]).abs() < 1e-12,
                    "M[{i}][{j}] != M[{j}][{i}]"
                );
            }
        }
    }

    #[test]
    fn test_gravity_vanishes_at_bottom() {
        let chain = uniform(4);
        let g = chain.gravity_vector(&[0.0; 4]);
        for i in 0..4 {
            assert_eq!(g[i], 0.0, "G[{i}] = {}", g[i]);
        }
    }

    #[test]
    fn test_centripetal_vanishes_at_rest() {
        let chain = uniform(3);
        let c = chain.centripetal_vector(&[0.5, 1.0, -0.3], &[0.0; 3]);
        for i in 0..3 {
            assert_eq!(c[i], 0.0, "C[{i}] = {}", c[i]);
        }
    }
}
