//! Tests for Hamiltonian data structures and the reference spectrum.

use approx::assert_abs_diff_eq;
use bellvqe_sim::hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};
use bellvqe_sim::{MeasurementBasis, SimError};
use num_complex::Complex64;

// ---------------------------------------------------------------------------
// PauliString
// ---------------------------------------------------------------------------

#[test]
fn pauli_string_drops_identity() {
    let ps = PauliString::from_ops([(0, PauliOp::I), (1, PauliOp::Z)]);
    assert_eq!(ps.ops(), &[(1, PauliOp::Z)]);
}

#[test]
fn pauli_string_sorted_by_qubit() {
    let ps = PauliString::from_ops([(3, PauliOp::X), (1, PauliOp::Z), (0, PauliOp::Y)]);
    let qubits: Vec<u32> = ps.ops().iter().map(|(q, _)| *q).collect();
    assert_eq!(qubits, vec![0, 1, 3]);
}

#[test]
fn pauli_string_labels() {
    let ps = PauliString::from_label("XZ").unwrap();
    assert_eq!(ps.op_at(0), PauliOp::X);
    assert_eq!(ps.op_at(1), PauliOp::Z);
    assert_eq!(ps.label(3), "XZI");
    assert!(PauliString::from_label("XQ").is_none());
    assert!(PauliString::from_label("II").unwrap().is_identity());
}

#[test]
fn pauli_string_matrix_orders_qubit_zero_last() {
    // Z on qubit 0 flips the sign of odd basis indices.
    let m = PauliString::from_ops([(0, PauliOp::Z)]).matrix(2);
    let diag: Vec<f64> = (0..4).map(|i| m[(i, i)].re).collect();
    assert_eq!(diag, vec![1.0, -1.0, 1.0, -1.0]);

    // X on qubit 1 swaps |00⟩ and |10⟩ (indices 0 and 2).
    let m = PauliString::from_ops([(1, PauliOp::X)]).matrix(2);
    assert_eq!(m[(0, 2)], Complex64::new(1.0, 0.0));
    assert_eq!(m[(0, 1)], Complex64::new(0.0, 0.0));
}

// ---------------------------------------------------------------------------
// Hamiltonian
// ---------------------------------------------------------------------------

#[test]
fn default_hamiltonian_terms_in_order() {
    let h = Hamiltonian::vqe_default();
    assert_eq!(h.n_terms(), 4);
    assert_eq!(h.n_qubits(), 2);
    assert_eq!(
        h.label_coefficients(),
        vec![
            ("II".to_string(), 0.5),
            ("ZZ".to_string(), 0.5),
            ("XX".to_string(), -0.5),
            ("YY".to_string(), -0.5),
        ]
    );
    assert_abs_diff_eq!(h.lambda(), 2.0);
}

#[test]
fn default_hamiltonian_dense_matrix() {
    let m = Hamiltonian::vqe_default().to_matrix();
    let expected = [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, -1.0, 0.0],
        [0.0, -1.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];
    for (r, row) in expected.iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            assert_abs_diff_eq!(m[(r, c)].re, value, epsilon = 1e-15);
            assert_abs_diff_eq!(m[(r, c)].im, 0.0, epsilon = 1e-15);
        }
    }
}

#[test]
fn default_hamiltonian_spectrum() {
    let h = Hamiltonian::vqe_default();
    let values = h.eigenvalues().unwrap();
    assert_eq!(values.len(), 4);
    for (got, want) in values.iter().zip([-1.0, 1.0, 1.0, 1.0]) {
        assert_abs_diff_eq!(*got, want, epsilon = 1e-10);
    }
    assert_abs_diff_eq!(h.ground_state_energy().unwrap(), -1.0, epsilon = 1e-10);
}

#[test]
fn scaled_coefficients_scale_spectrum() {
    let h = Hamiltonian::two_qubit(1.0, 1.0, -1.0, -1.0);
    assert_abs_diff_eq!(h.ground_state_energy().unwrap(), -2.0, epsilon = 1e-10);
}

#[test]
fn single_pauli_spectrum() {
    let h = Hamiltonian::from_terms(vec![HamiltonianTerm::new(
        0.7,
        PauliString::from_ops([(0, PauliOp::Y)]),
    )]);
    let values = h.eigenvalues().unwrap();
    assert_abs_diff_eq!(values[0], -0.7, epsilon = 1e-12);
    assert_abs_diff_eq!(values[1], 0.7, epsilon = 1e-12);
}

#[test]
fn empty_hamiltonian_rejected() {
    let h = Hamiltonian::from_terms(vec![]);
    assert!(matches!(h.eigenvalues(), Err(SimError::EmptyHamiltonian)));
}

#[test]
fn non_finite_coefficient_rejected() {
    let h = Hamiltonian::two_qubit(0.5, f64::NAN, 0.0, 0.0);
    assert!(matches!(
        h.ground_state_energy(),
        Err(SimError::NonFiniteCoefficient { label, .. }) if label == "ZZ"
    ));
}

#[test]
fn from_iterator_sizes_register() {
    let h: Hamiltonian = [
        HamiltonianTerm::identity(1.0),
        HamiltonianTerm::pair(PauliOp::Z, 0, 2, 0.5),
    ]
    .into_iter()
    .collect();
    assert_eq!(h.n_qubits(), 3);
    assert_eq!(h.to_matrix().nrows(), 8);
}

#[test]
fn display_lists_terms() {
    let text = Hamiltonian::vqe_default().to_string();
    assert!(text.starts_with("Hamiltonian (4 terms, 2 qubits):"));
    assert!(text.contains("-0.5000 XX"));
    assert!(text.contains("+0.5000 II"));
}

// ---------------------------------------------------------------------------
// Terms to bases
// ---------------------------------------------------------------------------

#[test]
fn every_default_term_has_a_basis() {
    let bases: Vec<MeasurementBasis> = Hamiltonian::vqe_default()
        .terms()
        .iter()
        .map(|t| MeasurementBasis::for_pauli(&t.pauli).unwrap())
        .collect();
    assert_eq!(bases, MeasurementBasis::ALL.to_vec());
}
