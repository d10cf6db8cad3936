//! Nelder-Mead downhill simplex.
//!
//! Derivative-free like [`super::Powell`], but without line searches: the
//! simplex reflects, expands, contracts or shrinks once per iteration.

use tracing::debug;

use super::{Counted, OptimizationResult, Optimizer};

const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Nelder-Mead optimizer configuration.
#[derive(Debug, Clone)]
pub struct NelderMead {
    /// Defaults to `200 * n` when unset.
    pub maxiter: Option<usize>,
    /// Largest vertex distance from the best vertex at convergence.
    pub xatol: f64,
    /// Largest value spread across the simplex at convergence.
    pub fatol: f64,
    /// Relative size of the initial simplex along each axis.
    pub initial_step: f64,
    /// Smallest absolute offset of an initial vertex.
    pub min_step: f64,
}

impl Default for NelderMead {
    fn default() -> Self {
        Self {
            maxiter: None,
            xatol: 1e-4,
            fatol: 1e-4,
            initial_step: 0.05,
            min_step: 0.05,
        }
    }
}

impl NelderMead {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both `xatol` and `fatol`.
    #[must_use]
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.xatol = tol;
        self.fatol = tol;
        self
    }

    #[must_use]
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = Some(maxiter);
        self
    }

    #[must_use]
    pub fn with_initial_step(mut self, step: f64) -> Self {
        self.initial_step = step;
        self
    }

    #[must_use]
    pub fn with_min_step(mut self, step: f64) -> Self {
        self.min_step = step;
        self
    }

    /// Vertex `i + 1` moves `x0[i]` by `max(|x0[i]| * initial_step, min_step)`.
    fn initial_simplex(&self, x0: &[f64]) -> Vec<Vec<f64>> {
        let mut simplex = vec![x0.to_vec()];
        for i in 0..x0.len() {
            let mut point = x0.to_vec();
            point[i] += (point[i].abs() * self.initial_step).max(self.min_step);
            simplex.push(point);
        }
        simplex
    }
}

/// `a + t * (a - b)` element-wise.
fn away(a: &[f64], b: &[f64], t: f64) -> Vec<f64> {
    a.iter().zip(b).map(|(a, b)| a + t * (a - b)).collect()
}

impl Optimizer for NelderMead {
    fn minimize<F>(&self, objective: F, initial_params: Vec<f64>) -> OptimizationResult
    where
        F: FnMut(&[f64]) -> f64,
    {
        let n = initial_params.len();
        let maxiter = self.maxiter.unwrap_or(n * 200);

        let mut f = Counted::new(objective);
        let mut simplex = self.initial_simplex(&initial_params);
        let mut values: Vec<f64> = simplex.iter().map(|p| f.call(p)).collect();
        let mut history = vec![values[0]];
        let mut iterations = 0;
        let mut converged = false;

        loop {
            // Sort vertices by value, NaN last.
            let mut order: Vec<usize> = (0..=n).collect();
            order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
            simplex = order.iter().map(|&i| simplex[i].clone()).collect();
            values = order.iter().map(|&i| values[i]).collect();

            let x_spread = simplex[1..]
                .iter()
                .flat_map(|p| p.iter().zip(&simplex[0]).map(|(a, b)| (a - b).abs()))
                .fold(0.0, f64::max);
            let f_spread = values[1..]
                .iter()
                .map(|v| (v - values[0]).abs())
                .fold(0.0, f64::max);
            if x_spread <= self.xatol && f_spread <= self.fatol {
                converged = true;
                break;
            }
            if iterations >= maxiter || !values[0].is_finite() {
                break;
            }
            iterations += 1;

            #[allow(clippy::cast_precision_loss)]
            let centroid: Vec<f64> = (0..n)
                .map(|j| simplex[..n].iter().map(|p| p[j]).sum::<f64>() / n as f64)
                .collect();

            let reflected = away(&centroid, &simplex[n], REFLECT);
            let f_reflected = f.call(&reflected);

            if f_reflected < values[0] {
                let expanded = away(&centroid, &simplex[n], REFLECT * EXPAND);
                let f_expanded = f.call(&expanded);
                if f_expanded < f_reflected {
                    simplex[n] = expanded;
                    values[n] = f_expanded;
                } else {
                    simplex[n] = reflected;
                    values[n] = f_reflected;
                }
            } else if f_reflected < values[n - 1] {
                simplex[n] = reflected;
                values[n] = f_reflected;
            } else {
                let (candidate, f_candidate) = if f_reflected < values[n] {
                    let outside = away(&centroid, &simplex[n], CONTRACT * REFLECT);
                    let v = f.call(&outside);
                    (outside, v)
                } else {
                    let inside = away(&centroid, &simplex[n], -CONTRACT);
                    let v = f.call(&inside);
                    (inside, v)
                };

                if f_candidate < values[n].min(f_reflected) {
                    simplex[n] = candidate;
                    values[n] = f_candidate;
                } else {
                    let best = simplex[0].clone();
                    for k in 1..=n {
                        simplex[k] = best
                            .iter()
                            .zip(&simplex[k])
                            .map(|(b, p)| b + SHRINK * (p - b))
                            .collect();
                        values[k] = f.call(&simplex[k]);
                    }
                }
            }

            let best = values.iter().copied().fold(f64::INFINITY, f64::min);
            history.push(best);
        }

        debug!(
            iterations,
            evaluations = f.calls(),
            value = values[0],
            converged,
            "nelder-mead finished"
        );

        OptimizationResult {
            optimal_params: simplex.swap_remove(0),
            optimal_value: values[0],
            num_evaluations: f.calls(),
            num_iterations: iterations,
            history,
            converged,
        }
    }
}
