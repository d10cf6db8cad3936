//! VQE (Variational Quantum Eigensolver) runner.
//!
//! VQE is a hybrid classical-quantum algorithm: a classical optimizer
//! proposes ansatz parameters, a simulator estimates the energy, and the
//! loop repeats until the optimizer converges.

use std::f64::consts::FRAC_PI_2;

use anyhow::{Context, Result, bail};
use bellvqe_adapter_sim::SimulatorBackend;
use bellvqe_sim::{
    ExpectationProvider, Hamiltonian, SampledExpectation, SimError, StatevectorExpectation,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::circuits::ansatz::NUM_PARAMETERS;
use crate::config::{EstimatorKind, OptimizerKind, VqeConfig};
use crate::energy::EnergyFunction;
use crate::optimizers::{NelderMead, OptimizationResult, Optimizer, Powell};

/// Result of a VQE run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VqeResult {
    /// Optimal energy found.
    pub optimal_energy: f64,
    /// Optimal parameters.
    pub optimal_params: [f64; NUM_PARAMETERS],
    /// Starting parameters.
    pub initial_params: [f64; NUM_PARAMETERS],
    /// Exact ground-state energy of the Hamiltonian.
    pub reference_energy: f64,
    /// `optimal_energy - reference_energy`.
    pub energy_error: f64,
    /// Number of optimizer iterations.
    pub iterations: usize,
    /// Number of energy evaluations.
    pub function_evaluations: usize,
    /// Energy history during optimization.
    pub energy_history: Vec<f64>,
    /// Whether optimization converged.
    pub converged: bool,
    /// Name of the expectation provider.
    pub estimator: String,
}

/// Seed of the shot sampler derived from the run seed.
///
/// The initial-parameter RNG is seeded with `seed` itself, so the sampler
/// gets a different stream.
pub fn sampler_seed(seed: u64) -> u64 {
    seed.wrapping_add(1)
}

/// Build the expectation provider selected by `config`.
pub fn provider_for(config: &VqeConfig) -> Box<dyn ExpectationProvider> {
    match config.estimator {
        EstimatorKind::Statevector => Box::new(StatevectorExpectation::new()),
        EstimatorKind::Sampling => {
            let backend = config.seed.map_or_else(SimulatorBackend::new, |seed| {
                SimulatorBackend::with_seed(sampler_seed(seed))
            });
            Box::new(SampledExpectation::new(backend).with_shots(config.shots))
        }
    }
}

/// Drives the optimizer over the energy function of one Hamiltonian.
pub struct VqeRunner {
    hamiltonian: Hamiltonian,
    config: VqeConfig,
    reference_energy: f64,
}

impl VqeRunner {
    /// Create a runner; computes the reference energy up front.
    pub fn new(hamiltonian: Hamiltonian, config: VqeConfig) -> Result<Self> {
        config.validate()?;
        let reference_energy = hamiltonian
            .ground_state_energy()
            .context("failed to diagonalize Hamiltonian")?;
        Ok(Self {
            hamiltonian,
            config,
            reference_energy,
        })
    }

    /// Runner for the Hamiltonian described by the configuration.
    pub fn from_config(config: VqeConfig) -> Result<Self> {
        Self::new(config.hamiltonian(), config)
    }

    pub fn hamiltonian(&self) -> &Hamiltonian {
        &self.hamiltonian
    }

    pub fn config(&self) -> &VqeConfig {
        &self.config
    }

    pub fn reference_energy(&self) -> f64 {
        self.reference_energy
    }

    /// Parameters drawn uniformly from [-π/2, π/2).
    pub fn initial_params<R: Rng + ?Sized>(rng: &mut R) -> [f64; NUM_PARAMETERS] {
        std::array::from_fn(|_| rng.gen_range(-FRAC_PI_2..FRAC_PI_2))
    }

    /// Run VQE with random initial parameters.
    pub fn run<P, R>(&self, provider: &mut P, rng: &mut R) -> Result<VqeResult>
    where
        P: ExpectationProvider + ?Sized,
        R: Rng + ?Sized,
    {
        let params = Self::initial_params(rng);
        self.run_with_params(provider, params)
    }

    /// Run VQE with specified initial parameters.
    pub fn run_with_params<P>(
        &self,
        provider: &mut P,
        initial_params: [f64; NUM_PARAMETERS],
    ) -> Result<VqeResult>
    where
        P: ExpectationProvider + ?Sized,
    {
        let estimator = provider.name().to_string();
        let mut energy = EnergyFunction::new(&self.hamiltonian, provider)?;
        info!(
            estimator = %estimator,
            theta1 = initial_params[0],
            theta2 = initial_params[1],
            "starting VQE"
        );

        let mut failure: Option<SimError> = None;
        let objective = |x: &[f64]| -> f64 {
            if failure.is_some() {
                return f64::NAN;
            }
            match energy.evaluate(&[x[0], x[1]]) {
                Ok(e) => e,
                Err(err) => {
                    failure = Some(err);
                    f64::NAN
                }
            }
        };

        let result = self.optimize(objective, initial_params.to_vec());
        if let Some(err) = failure {
            return Err(err).context("energy evaluation failed");
        }
        if !result.converged {
            warn!(
                iterations = result.num_iterations,
                "optimizer stopped before converging"
            );
        }

        let optimal_params = match result.optimal_params.as_slice() {
            &[a, b] => [a, b],
            other => bail!("optimizer returned {} parameters", other.len()),
        };
        info!(
            energy = result.optimal_value,
            evaluations = result.num_evaluations,
            "VQE finished"
        );

        Ok(VqeResult {
            optimal_energy: result.optimal_value,
            optimal_params,
            initial_params,
            reference_energy: self.reference_energy,
            energy_error: result.optimal_value - self.reference_energy,
            iterations: result.num_iterations,
            function_evaluations: result.num_evaluations,
            energy_history: result.history,
            converged: result.converged,
            estimator,
        })
    }

    /// Best of `config.restarts` runs from independent random starts.
    ///
    /// `on_run` is called after each run with its index and result.
    pub fn run_multistart<P, R>(
        &self,
        provider: &mut P,
        rng: &mut R,
        mut on_run: impl FnMut(usize, &VqeResult),
    ) -> Result<VqeResult>
    where
        P: ExpectationProvider + ?Sized,
        R: Rng + ?Sized,
    {
        let mut best: Option<VqeResult> = None;
        for index in 0..self.config.restarts {
            let result = self.run(provider, rng)?;
            on_run(index, &result);
            if best
                .as_ref()
                .is_none_or(|b| result.optimal_energy < b.optimal_energy)
            {
                best = Some(result);
            }
        }
        best.context("no VQE runs were performed")
    }

    fn optimize<F>(&self, objective: F, x0: Vec<f64>) -> OptimizationResult
    where
        F: FnMut(&[f64]) -> f64,
    {
        match self.config.optimizer {
            OptimizerKind::Powell => {
                let mut optimizer = Powell::new().with_tol(self.config.tol);
                optimizer.maxiter = self.config.max_iterations;
                optimizer.minimize(objective, x0)
            }
            OptimizerKind::NelderMead => {
                let mut optimizer = NelderMead::new().with_tol(self.config.tol);
                optimizer.maxiter = self.config.max_iterations;
                optimizer.minimize(objective, x0)
            }
        }
    }
}
