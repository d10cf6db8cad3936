//! Run configuration.
//!
//! ```yaml
//! estimator: sampling
//! shots: 8192
//! tol: 1.0e-4
//! optimizer: powell
//! restarts: 3
//! seed: 7
//! coefficients: { identity: 0.5, zz: 0.5, xx: -0.5, yy: -0.5 }
//! ```

use std::path::Path;

use anyhow::{Context, Result, bail};
use bellvqe_sim::{DEFAULT_SHOTS, Hamiltonian};
use serde::{Deserialize, Serialize};

/// How term expectations are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EstimatorKind {
    /// Exact values from the statevector.
    #[default]
    Statevector,
    /// Parity averages over sampled shots.
    Sampling,
}

/// Which classical optimizer drives the parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OptimizerKind {
    #[default]
    Powell,
    NelderMead,
}

/// Coefficients of II, ZZ, XX and YY.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coefficients {
    pub identity: f64,
    pub zz: f64,
    pub xx: f64,
    pub yy: f64,
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            identity: 0.5,
            zz: 0.5,
            xx: -0.5,
            yy: -0.5,
        }
    }
}

/// Settings for one VQE run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VqeConfig {
    pub estimator: EstimatorKind,
    /// Shots per term for the sampling estimator.
    pub shots: u32,
    /// Optimizer tolerance, used for both position and value tests.
    pub tol: f64,
    pub optimizer: OptimizerKind,
    /// Optimizer iteration cap; the optimizer's own default when unset.
    pub max_iterations: Option<usize>,
    /// Number of random starting points.
    pub restarts: usize,
    /// Seed for initial parameters and shot sampling; OS entropy when unset.
    pub seed: Option<u64>,
    pub coefficients: Coefficients,
}

impl Default for VqeConfig {
    fn default() -> Self {
        Self {
            estimator: EstimatorKind::Statevector,
            shots: DEFAULT_SHOTS,
            tol: 1e-4,
            optimizer: OptimizerKind::Powell,
            max_iterations: None,
            restarts: 1,
            seed: None,
            coefficients: Coefficients::default(),
        }
    }
}

impl VqeConfig {
    /// Parse YAML; missing fields take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).context("invalid VQE configuration")
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.shots == 0 {
            bail!("shots must be at least 1");
        }
        if !(self.tol.is_finite() && self.tol > 0.0) {
            bail!("tol must be a positive number, got {}", self.tol);
        }
        if self.restarts == 0 {
            bail!("restarts must be at least 1");
        }
        if self.max_iterations == Some(0) {
            bail!("max_iterations must be at least 1 when set");
        }
        let c = &self.coefficients;
        if ![c.identity, c.zz, c.xx, c.yy].iter().all(|v| v.is_finite()) {
            bail!("coefficients must be finite");
        }
        Ok(())
    }

    /// The Hamiltonian described by [`Self::coefficients`].
    pub fn hamiltonian(&self) -> Hamiltonian {
        let c = &self.coefficients;
        Hamiltonian::two_qubit(c.identity, c.zz, c.xx, c.yy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VqeConfig::default();
        assert_eq!(config.shots, 8192);
        assert_eq!(config.tol, 1e-4);
        assert_eq!(config.estimator, EstimatorKind::Statevector);
        assert_eq!(config.optimizer, OptimizerKind::Powell);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml() {
        let config = VqeConfig::from_yaml_str("estimator: sampling\nseed: 7\n").unwrap();
        assert_eq!(config.estimator, EstimatorKind::Sampling);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.shots, DEFAULT_SHOTS);
        assert_eq!(config.coefficients, Coefficients::default());
    }

    #[test]
    fn test_full_yaml() {
        let yaml = "\
estimator: statevector
shots: 1000
tol: 1.0e-6
optimizer: nelder-mead
max_iterations: 50
restarts: 4
coefficients:
  identity: 1.0
  zz: 1.0
  xx: -1.0
  yy: -1.0
";
        let config = VqeConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.optimizer, OptimizerKind::NelderMead);
        assert_eq!(config.max_iterations, Some(50));
        assert_eq!(config.restarts, 4);
        assert_eq!(config.hamiltonian().label_coefficients()[2], ("XX".to_string(), -1.0));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(VqeConfig::from_yaml_str("shotz: 10\n").is_err());
    }

    #[test]
    fn test_validation() {
        let bad = [
            VqeConfig {
                shots: 0,
                ..VqeConfig::default()
            },
            VqeConfig {
                tol: 0.0,
                ..VqeConfig::default()
            },
            VqeConfig {
                restarts: 0,
                ..VqeConfig::default()
            },
            VqeConfig {
                coefficients: Coefficients {
                    zz: f64::INFINITY,
                    ..Coefficients::default()
                },
                ..VqeConfig::default()
            },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{config:?} should be rejected");
        }
    }
}
