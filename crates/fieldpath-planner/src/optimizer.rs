//! Bounded derivative-free minimization.
//!
//! A Nelder-Mead simplex search with box constraints: every point the
//! simplex proposes is clamped into `[lower, upper]` before evaluation,
//! so bound violations are corrected rather than ignored. Iteration is
//! bounded; there are no wall-clock timeouts.

use tracing::debug;

/// Result of a bounded minimization.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    pub point: Vec<f64>,
    pub value: f64,
}

/// Nelder-Mead with box constraints.
pub struct BoundedNelderMead {
    lower: Vec<f64>,
    upper: Vec<f64>,
    max_iterations: usize,
    tolerance: f64,
}

impl BoundedNelderMead {
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Self {
        debug_assert_eq!(lower.len(), upper.len());
        Self {
            lower,
            upper,
            max_iterations: 200,
            tolerance: 1e-8,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    fn clamp(&self, point: &mut [f64]) {
        for (i, value) in point.iter_mut().enumerate() {
            *value = value.clamp(self.lower[i], self.upper[i]);
        }
    }

    /// Minimize `objective` starting from `initial` (clamped into the
    /// box). Deterministic for a given objective and starting point.
    pub fn optimize(
        &self,
        objective: impl Fn(&[f64]) -> f64,
        initial: &[f64],
    ) -> OptimizationResult {
        let n = initial.len();

        let mut start = initial.to_vec();
        self.clamp(&mut start);

        // Initial simplex: the start point plus one vertex per dimension,
        // stepped by 5% of that dimension's range.
        let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
        simplex.push(start.clone());
        for i in 0..n {
            let mut vertex = start.clone();
            let range = self.upper[i] - self.lower[i];
            let step = if range > 0.0 { 0.05 * range } else { 0.1 };
            vertex[i] += step;
            self.clamp(&mut vertex);
            simplex.push(vertex);
        }

        let mut values: Vec<f64> = simplex.iter().map(|v| objective(v)).collect();

        const ALPHA: f64 = 1.0; // reflection
        const GAMMA: f64 = 2.0; // expansion
        const RHO: f64 = 0.5; // contraction
        const SIGMA: f64 = 0.5; // shrink

        for iteration in 0..self.max_iterations {
            // Order vertices by objective value.
            let mut order: Vec<usize> = (0..=n).collect();
            order.sort_by(|&a, &b| {
                values[a]
                    .partial_cmp(&values[b])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            let reordered: Vec<Vec<f64>> = order.iter().map(|&i| simplex[i].clone()).collect();
            let reordered_values: Vec<f64> = order.iter().map(|&i| values[i]).collect();
            simplex = reordered;
            values = reordered_values;

            if (values[n] - values[0]).abs() < self.tolerance {
                debug!(iteration, best = values[0], "simplex converged");
                break;
            }

            // Centroid of all but the worst vertex.
            let mut centroid = vec![0.0; n];
            for vertex in simplex.iter().take(n) {
                for (c, v) in centroid.iter_mut().zip(vertex) {
                    *c += v / n as f64;
                }
            }

            let propose = |coefficient: f64| -> Vec<f64> {
                let mut point: Vec<f64> = centroid
                    .iter()
                    .zip(&simplex[n])
                    .map(|(c, w)| c + coefficient * (c - w))
                    .collect();
                self.clamp(&mut point);
                point
            };

            let reflected = propose(ALPHA);
            let reflected_value = objective(&reflected);

            if reflected_value < values[0] {
                let expanded = propose(GAMMA);
                let expanded_value = objective(&expanded);
                if expanded_value < reflected_value {
                    simplex[n] = expanded;
                    values[n] = expanded_value;
                } else {
                    simplex[n] = reflected;
                    values[n] = reflected_value;
                }
                continue;
            }

            if reflected_value < values[n - 1] {
                simplex[n] = reflected;
                values[n] = reflected_value;
                continue;
            }

            let contracted = propose(-RHO);
            let contracted_value = objective(&contracted);
            if contracted_value < values[n] {
                simplex[n] = contracted;
                values[n] = contracted_value;
                continue;
            }

            // Shrink toward the best vertex.
            let best = simplex[0].clone();
            for i in 1..=n {
                for (v, b) in simplex[i].iter_mut().zip(&best) {
                    *v = b + SIGMA * (*v - b);
                }
                self.clamp(&mut simplex[i]);
                values[i] = objective(&simplex[i]);
            }
        }

        let mut best_index = 0;
        for i in 1..=n {
            if values[i] < values[best_index] {
                best_index = i;
            }
        }

        OptimizationResult {
            point: simplex[best_index].clone(),
            value: values[best_index],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimizes_quadratic_within_bounds() {
        let optimizer = BoundedNelderMead::new(vec![-10.0, -10.0], vec![10.0, 10.0]);
        let result = optimizer.optimize(
            |p| (p[0] - 3.0).powi(2) + (p[1] + 2.0).powi(2),
            &[0.0, 0.0],
        );
        assert!((result.point[0] - 3.0).abs() < 1e-3);
        assert!((result.point[1] + 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_clamps_to_active_bound() {
        // Unconstrained minimum at x = 5 sits outside the box.
        let optimizer = BoundedNelderMead::new(vec![0.0], vec![2.0]);
        let result = optimizer.optimize(|p| (p[0] - 5.0).powi(2), &[1.0]);
        assert!(result.point[0] <= 2.0);
        assert!((result.point[0] - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_out_of_bounds_start_is_clamped() {
        let optimizer = BoundedNelderMead::new(vec![0.0, 0.0], vec![1.0, 1.0]);
        let result = optimizer.optimize(|p| p[0] + p[1], &[5.0, -5.0]);
        for v in &result.point {
            assert!((0.0..=1.0).contains(v));
        }
    }
}
