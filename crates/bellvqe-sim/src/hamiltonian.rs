//! Hamiltonian data structures.
//!
//! A Hamiltonian is a sum of weighted Pauli strings:
//!
//!   H = Σ_k  c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators
//! (I, X, Y, Z) and c_k ∈ ℝ.
//!
//! # Example
//!
//! ```rust
//! use bellvqe_sim::hamiltonian::Hamiltonian;
//!
//! // H = 0.5·II + 0.5·ZZ − 0.5·XX − 0.5·YY
//! let h = Hamiltonian::vqe_default();
//! assert_eq!(h.n_terms(), 4);
//! assert!((h.ground_state_energy().unwrap() + 1.0).abs() < 1e-12);
//! ```

use nalgebra::{DMatrix, SymmetricEigen};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SimError, SimResult};

/// Entries of H − H† above this are treated as non-Hermitian.
const HERMITIAN_TOLERANCE: f64 = 1e-12;

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    pub fn symbol(self) -> char {
        match self {
            PauliOp::I => 'I',
            PauliOp::X => 'X',
            PauliOp::Y => 'Y',
            PauliOp::Z => 'Z',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'I' => Some(PauliOp::I),
            'X' => Some(PauliOp::X),
            'Y' => Some(PauliOp::Y),
            'Z' => Some(PauliOp::Z),
            _ => None,
        }
    }

    /// The 2x2 matrix of this operator.
    pub fn matrix(self) -> DMatrix<Complex64> {
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        let data = match self {
            PauliOp::I => [one, zero, zero, one],
            PauliOp::X => [zero, one, one, zero],
            PauliOp::Y => [zero, -i, i, zero],
            PauliOp::Z => [one, zero, zero, -one],
        };
        DMatrix::from_row_slice(2, 2, &data)
    }
}

/// A tensor product of Pauli operators on indexed qubits.
///
/// Stored as a sorted `Vec<(qubit_index, PauliOp)>` with identities
/// omitted. Qubits not listed are implicitly I.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauliString {
    ops: Vec<(u32, PauliOp)>,
}

impl PauliString {
    /// Build from (qubit, op) pairs. Identities are dropped and the rest
    /// sorted by qubit.
    pub fn from_ops(ops: impl IntoIterator<Item = (u32, PauliOp)>) -> Self {
        let mut v: Vec<(u32, PauliOp)> = ops
            .into_iter()
            .filter(|(_, op)| *op != PauliOp::I)
            .collect();
        v.sort_by_key(|(q, _)| *q);
        Self { ops: v }
    }

    /// The identity string.
    pub fn identity() -> Self {
        Self { ops: vec![] }
    }

    /// The same operator on every listed qubit, e.g. X⊗X.
    pub fn uniform(op: PauliOp, qubits: impl IntoIterator<Item = u32>) -> Self {
        Self::from_ops(qubits.into_iter().map(|q| (q, op)))
    }

    /// Parse a label such as `"ZZ"`; character `k` is the operator on qubit `k`.
    pub fn from_label(label: &str) -> Option<Self> {
        let ops = label
            .chars()
            .enumerate()
            .map(|(q, c)| PauliOp::from_symbol(c).map(|op| (q as u32, op)))
            .collect::<Option<Vec<_>>>()?;
        Some(Self::from_ops(ops))
    }

    /// Non-identity (qubit, op) pairs, sorted by qubit index.
    pub fn ops(&self) -> &[(u32, PauliOp)] {
        &self.ops
    }

    /// Operator acting on `qubit`.
    pub fn op_at(&self, qubit: u32) -> PauliOp {
        self.ops
            .iter()
            .find(|(q, _)| *q == qubit)
            .map_or(PauliOp::I, |(_, op)| *op)
    }

    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// The highest qubit index referenced, or `None` for an identity string.
    pub fn max_qubit(&self) -> Option<u32> {
        self.ops.last().map(|(q, _)| *q)
    }

    /// Label over `n_qubits` qubits, qubit 0 first.
    pub fn label(&self, n_qubits: u32) -> String {
        (0..n_qubits).map(|q| self.op_at(q).symbol()).collect()
    }

    /// Dense `2^n × 2^n` matrix. Qubit 0 is the least significant index bit.
    pub fn matrix(&self, n_qubits: u32) -> DMatrix<Complex64> {
        let mut acc = DMatrix::from_element(1, 1, Complex64::new(1.0, 0.0));
        for q in (0..n_qubits).rev() {
            acc = acc.kronecker(&self.op_at(q).matrix());
        }
        acc
    }
}

/// A single weighted Pauli term: `coeff · pauli`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HamiltonianTerm {
    /// Real coefficient.
    pub coeff: f64,
    /// The Pauli string.
    pub pauli: PauliString,
}

impl HamiltonianTerm {
    pub fn new(coeff: f64, pauli: PauliString) -> Self {
        Self { coeff, pauli }
    }

    /// Shorthand: scalar multiple of the identity.
    pub fn identity(coeff: f64) -> Self {
        Self::new(coeff, PauliString::identity())
    }

    /// Shorthand: `op ⊗ op` on two qubits.
    pub fn pair(op: PauliOp, q0: u32, q1: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::uniform(op, [q0, q1]))
    }
}

/// A sum-of-Pauli-strings Hamiltonian.
///
/// H = Σ_k  c_k · P_k
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hamiltonian {
    terms: Vec<HamiltonianTerm>,
    n_qubits: u32,
}

impl Hamiltonian {
    /// Create from a list of terms, sized to the highest qubit they touch.
    pub fn from_terms(terms: Vec<HamiltonianTerm>) -> Self {
        let n_qubits = terms
            .iter()
            .filter_map(|t| t.pauli.max_qubit())
            .max()
            .map_or(0, |q| q + 1);
        Self { terms, n_qubits }
    }

    /// Widen the register so identity-only terms still span `n_qubits`.
    #[must_use]
    pub fn with_qubits(mut self, n_qubits: u32) -> Self {
        self.n_qubits = self.n_qubits.max(n_qubits);
        self
    }

    /// H = i·(I⊗I) + z·(Z⊗Z) + x·(X⊗X) + y·(Y⊗Y), in that term order.
    pub fn two_qubit(i: f64, z: f64, x: f64, y: f64) -> Self {
        Self::from_terms(vec![
            HamiltonianTerm::identity(i),
            HamiltonianTerm::pair(PauliOp::Z, 0, 1, z),
            HamiltonianTerm::pair(PauliOp::X, 0, 1, x),
            HamiltonianTerm::pair(PauliOp::Y, 0, 1, y),
        ])
        .with_qubits(2)
    }

    /// The experiment's Hamiltonian: 0.5·II + 0.5·ZZ − 0.5·XX − 0.5·YY.
    pub fn vqe_default() -> Self {
        Self::two_qubit(0.5, 0.5, -0.5, -0.5)
    }

    pub fn terms(&self) -> &[HamiltonianTerm] {
        &self.terms
    }

    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    pub fn n_qubits(&self) -> u32 {
        self.n_qubits
    }

    /// Σ |c_k|, an upper bound on the spectral norm.
    pub fn lambda(&self) -> f64 {
        self.terms.iter().map(|t| t.coeff.abs()).sum()
    }

    /// Ordered (label, coefficient) pairs, e.g. `("ZZ", 0.5)`.
    pub fn label_coefficients(&self) -> Vec<(String, f64)> {
        self.terms
            .iter()
            .map(|t| (t.pauli.label(self.n_qubits), t.coeff))
            .collect()
    }

    /// Dense matrix Σ c_k · P_k.
    pub fn to_matrix(&self) -> DMatrix<Complex64> {
        let dim = 1usize << self.n_qubits;
        let mut m = DMatrix::from_element(dim, dim, Complex64::new(0.0, 0.0));
        for term in &self.terms {
            m += term.pauli.matrix(self.n_qubits) * Complex64::new(term.coeff, 0.0);
        }
        m
    }

    /// Eigenvalues of the dense matrix, ascending.
    pub fn eigenvalues(&self) -> SimResult<Vec<f64>> {
        if self.terms.is_empty() {
            return Err(SimError::EmptyHamiltonian);
        }
        if let Some(term) = self.terms.iter().find(|t| !t.coeff.is_finite()) {
            return Err(SimError::NonFiniteCoefficient {
                label: term.pauli.label(self.n_qubits),
                coeff: term.coeff,
            });
        }

        let matrix = self.to_matrix();
        let deviation = (&matrix - matrix.adjoint())
            .iter()
            .map(|c| c.norm())
            .fold(0.0, f64::max);
        if deviation > HERMITIAN_TOLERANCE {
            return Err(SimError::NonHermitian { deviation });
        }

        let mut values: Vec<f64> = SymmetricEigen::new(matrix).eigenvalues.iter().copied().collect();
        values.sort_by(f64::total_cmp);
        Ok(values)
    }

    /// Exact minimum eigenvalue.
    pub fn ground_state_energy(&self) -> SimResult<f64> {
        self.eigenvalues()?
            .first()
            .copied()
            .ok_or(SimError::EmptyHamiltonian)
    }
}

impl FromIterator<HamiltonianTerm> for Hamiltonian {
    fn from_iter<T: IntoIterator<Item = HamiltonianTerm>>(iter: T) -> Self {
        Self::from_terms(iter.into_iter().collect())
    }
}

impl fmt::Display for Hamiltonian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Hamiltonian ({} terms, {} qubits):",
            self.n_terms(),
            self.n_qubits
        )?;
        for (label, coeff) in self.label_coefficients() {
            writeln!(f, "  {coeff:+.4} {label}")?;
        }
        Ok(())
    }
}
