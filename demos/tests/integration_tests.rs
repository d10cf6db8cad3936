//! Integration tests for the VQE demo.
//!
//! These tests run the full loop (ansatz, expectation provider, energy,
//! optimizer, reference check) against the local simulator with fixed
//! seeds.

use approx::assert_abs_diff_eq;
use bellvqe_adapter_sim::SimulatorBackend;
use bellvqe_demos::circuits::state_preparation;
use bellvqe_demos::config::{EstimatorKind, VqeConfig};
use bellvqe_demos::energy::EnergyFunction;
use bellvqe_demos::runners::{VqeRunner, provider_for};
use bellvqe_sim::{
    ExpectationProvider, Hamiltonian, MeasurementBasis, SampledExpectation, StatevectorExpectation,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::f64::consts::PI;

fn closed_form(a: f64, b: f64) -> f64 {
    0.5 + 0.5 * (a.cos() * b.cos() + a.cos() - b.cos())
}

/// The reference eigenvalue of the default Hamiltonian is -1.
#[test]
fn test_reference_energy() {
    let runner = VqeRunner::from_config(VqeConfig::default()).unwrap();
    assert_abs_diff_eq!(runner.reference_energy(), -1.0, epsilon = 1e-10);
}

/// The identity term is exactly 1 for both providers.
#[test]
fn test_identity_expectation_is_one() {
    let circuit = state_preparation(&[0.7, -2.1]).unwrap();
    let mut exact = StatevectorExpectation::new();
    let mut sampled = SampledExpectation::new(SimulatorBackend::with_seed(1));
    assert_eq!(exact.expectation(&circuit, MeasurementBasis::II).unwrap(), 1.0);
    assert_eq!(sampled.expectation(&circuit, MeasurementBasis::II).unwrap(), 1.0);
}

/// θ = (0, 0) is the Bell state: ZZ = XX = 1, YY = -1, E = 1.
#[test]
fn test_bell_point_energy() {
    let mut energy =
        EnergyFunction::new(&Hamiltonian::vqe_default(), StatevectorExpectation::new()).unwrap();
    assert_abs_diff_eq!(energy.evaluate(&[0.0, 0.0]).unwrap(), 1.0, epsilon = 1e-12);
}

/// `evaluate` equals Σ coeff × expectation recomputed term by term.
#[test]
fn test_energy_matches_brute_force() {
    let h = Hamiltonian::vqe_default();
    let mut energy = EnergyFunction::new(&h, StatevectorExpectation::new()).unwrap();
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..8 {
        let params = VqeRunner::initial_params(&mut rng);
        let expectations = energy.term_expectations(&params).unwrap();
        let brute: f64 = h
            .terms()
            .iter()
            .zip(&expectations)
            .map(|(term, (_, value))| term.coeff * value)
            .sum();
        assert_abs_diff_eq!(energy.evaluate(&params).unwrap(), brute, epsilon = 1e-12);
        assert_abs_diff_eq!(brute, closed_form(params[0], params[1]), epsilon = 1e-10);
    }
}

/// Several random starts all reach the ground state on the exact path.
#[test]
fn test_vqe_reaches_ground_state_from_random_starts() {
    let runner = VqeRunner::from_config(VqeConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut provider = StatevectorExpectation::new();

    for _ in 0..5 {
        let result = runner.run(&mut provider, &mut rng).unwrap();
        assert!(
            (result.optimal_energy - runner.reference_energy()).abs() < 0.01,
            "start {:?} ended at {}",
            result.initial_params,
            result.optimal_energy
        );
        assert!(result.optimal_energy >= runner.reference_energy() - 1e-9);
    }
}

/// Same start, same provider kind: same answer.
#[test]
fn test_statevector_runs_are_reproducible() {
    let runner = VqeRunner::from_config(VqeConfig::default()).unwrap();
    let a = runner
        .run_with_params(&mut StatevectorExpectation::new(), [0.9, -0.2])
        .unwrap();
    let b = runner
        .run_with_params(&mut StatevectorExpectation::new(), [0.9, -0.2])
        .unwrap();
    assert!((a.optimal_energy - b.optimal_energy).abs() < 1e-4);
    assert_eq!(a.function_evaluations, b.function_evaluations);
}

/// Seeded sampling runs are bit-for-bit repeatable.
#[test]
fn test_seeded_sampling_is_reproducible() {
    let config = VqeConfig {
        estimator: EstimatorKind::Sampling,
        shots: 1024,
        seed: Some(5),
        max_iterations: Some(3),
        ..VqeConfig::default()
    };
    let runner = VqeRunner::from_config(config.clone()).unwrap();
    let a = runner
        .run_with_params(&mut provider_for(&config), [0.3, 0.3])
        .unwrap();
    let b = runner
        .run_with_params(&mut provider_for(&config), [0.3, 0.3])
        .unwrap();
    assert_eq!(a.optimal_energy, b.optimal_energy);
    assert_eq!(a.optimal_params, b.optimal_params);
}

/// The sampled energy agrees with the exact energy within shot noise.
#[test]
fn test_sampled_energy_within_shot_noise() {
    let h = Hamiltonian::vqe_default();
    let mut exact = EnergyFunction::new(&h, StatevectorExpectation::new()).unwrap();
    let mut sampled =
        EnergyFunction::new(&h, SampledExpectation::new(SimulatorBackend::with_seed(8))).unwrap();

    for params in [[0.0, 0.0], [PI / 3.0, 0.4], [2.5, -1.0], [PI, 0.0]] {
        let e = exact.evaluate(&params).unwrap();
        let s = sampled.evaluate(&params).unwrap();
        assert!((e - s).abs() < 0.05, "exact {e} vs sampled {s} at {params:?}");
    }
}

/// The sampling path also finds the ground state, up to shot noise.
#[test]
fn test_sampled_vqe_near_ground_state() {
    let config = VqeConfig {
        estimator: EstimatorKind::Sampling,
        seed: Some(11),
        ..VqeConfig::default()
    };
    let runner = VqeRunner::from_config(config.clone()).unwrap();
    let result = runner
        .run_with_params(&mut provider_for(&config), [0.5, 0.5])
        .unwrap();
    assert!(result.optimal_energy < -0.9, "got {}", result.optimal_energy);
}

/// A bundled configuration file parses and validates.
#[test]
fn test_bundled_config() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/configs/vqe.yaml");
    let config = VqeConfig::from_yaml_file(path).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.estimator, EstimatorKind::Sampling);
    assert_eq!(config.shots, 8192);
}

/// The JSON result carries the reported fields.
#[test]
fn test_result_serializes() {
    let runner = VqeRunner::from_config(VqeConfig::default()).unwrap();
    let result = runner
        .run_with_params(&mut StatevectorExpectation::new(), [0.1, 0.2])
        .unwrap();
    let json: serde_json::Value = serde_json::to_value(&result).unwrap();
    assert!(json["optimal_energy"].is_number());
    assert_eq!(json["optimal_params"].as_array().unwrap().len(), 2);
    assert_eq!(json["estimator"], "statevector");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn energy_stays_within_spectrum(a in -PI..PI, b in -PI..PI) {
        let mut energy =
            EnergyFunction::new(&Hamiltonian::vqe_default(), StatevectorExpectation::new()).unwrap();
        let e = energy.evaluate(&[a, b]).unwrap();
        prop_assert!(e >= -1.0 - 1e-10 && e <= 1.0 + 1e-10);
        prop_assert!((e - closed_form(a, b)).abs() < 1e-10);
    }
}
