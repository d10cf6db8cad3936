//! Derivative-free classical optimizers.

pub mod nelder_mead;
pub mod powell;

pub use nelder_mead::NelderMead;
pub use powell::Powell;

use serde::{Deserialize, Serialize};

/// Result of an optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Optimal parameter values.
    pub optimal_params: Vec<f64>,
    /// Optimal objective value.
    pub optimal_value: f64,
    /// Number of function evaluations.
    pub num_evaluations: usize,
    /// Number of iterations.
    pub num_iterations: usize,
    /// Best objective value after each iteration.
    pub history: Vec<f64>,
    /// Whether the tolerance test was met before the iteration or
    /// evaluation limit.
    pub converged: bool,
}

/// A minimizer of `f: ℝⁿ → ℝ` that only samples function values.
pub trait Optimizer {
    fn minimize<F>(&self, objective: F, initial_params: Vec<f64>) -> OptimizationResult
    where
        F: FnMut(&[f64]) -> f64;
}

/// Objective wrapper that counts calls.
pub(crate) struct Counted<F> {
    objective: F,
    calls: usize,
}

impl<F: FnMut(&[f64]) -> f64> Counted<F> {
    pub(crate) fn new(objective: F) -> Self {
        Self {
            objective,
            calls: 0,
        }
    }

    pub(crate) fn call(&mut self, x: &[f64]) -> f64 {
        self.calls += 1;
        (self.objective)(x)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls
    }
}
