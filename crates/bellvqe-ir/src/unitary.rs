//! 2x2 unitary matrices for single-qubit gates.
//!
//! Every single-qubit [`StandardGate`](crate::gate::StandardGate) has a
//! matrix here; the statevector engine applies gates through them.

use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

/// Tolerance for matrix comparisons.
const EPSILON: f64 = 1e-10;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A 2x2 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a new 2x2 matrix from its row-major elements.
    pub const fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// A diagonal matrix diag(a, d).
    const fn diag(a: Complex64, d: Complex64) -> Self {
        Self::new(a, ZERO, ZERO, d)
    }

    pub const fn identity() -> Self {
        Self::diag(ONE, ONE)
    }

    /// Hadamard.
    pub fn h() -> Self {
        let s = Complex64::new(FRAC_1_SQRT_2, 0.0);
        Self::new(s, s, s, -s)
    }

    /// Pauli-X.
    pub const fn x() -> Self {
        Self::new(ZERO, ONE, ONE, ZERO)
    }

    /// Pauli-Y.
    pub const fn y() -> Self {
        Self::new(ZERO, Complex64::new(0.0, -1.0), Complex64::new(0.0, 1.0), ZERO)
    }

    /// Pauli-Z.
    pub const fn z() -> Self {
        Self::diag(ONE, Complex64::new(-1.0, 0.0))
    }

    /// S = sqrt(Z).
    pub const fn s() -> Self {
        Self::diag(ONE, Complex64::new(0.0, 1.0))
    }

    /// S-dagger.
    pub const fn sdg() -> Self {
        Self::diag(ONE, Complex64::new(0.0, -1.0))
    }

    /// RX(θ) = exp(-iθX/2).
    pub fn rx(theta: f64) -> Self {
        let (s, c) = (theta / 2.0).sin_cos();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(0.0, -s),
            Complex64::new(0.0, -s),
            Complex64::new(c, 0.0),
        )
    }

    /// RY(θ) = exp(-iθY/2).
    pub fn ry(theta: f64) -> Self {
        let (s, c) = (theta / 2.0).sin_cos();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(-s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(c, 0.0),
        )
    }

    /// RZ(θ) = exp(-iθZ/2).
    pub fn rz(theta: f64) -> Self {
        Self::diag(
            Complex64::from_polar(1.0, -theta / 2.0),
            Complex64::from_polar(1.0, theta / 2.0),
        )
    }

    /// Phase gate P(λ) = diag(1, e^{iλ}).
    pub fn p(lambda: f64) -> Self {
        Self::diag(ONE, Complex64::from_polar(1.0, lambda))
    }

    /// U(θ, φ, λ) in the OpenQASM convention.
    pub fn u(theta: f64, phi: f64, lambda: f64) -> Self {
        let (s, c) = (theta / 2.0).sin_cos();
        Self::new(
            Complex64::new(c, 0.0),
            -Complex64::from_polar(s, lambda),
            Complex64::from_polar(s, phi),
            Complex64::from_polar(c, phi + lambda),
        )
    }

    /// U2(φ, λ) = U(π/2, φ, λ).
    ///
    /// `u2(0, π)` is the Hadamard and `u2(0, π/2)` is `H·S†`.
    pub fn u2(phi: f64, lambda: f64) -> Self {
        Self::u(std::f64::consts::FRAC_PI_2, phi, lambda)
    }

    /// Matrix product `self * other`.
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Self {
        let [a, b, c, d] = self.data;
        Self::new(a.conj(), c.conj(), b.conj(), d.conj())
    }

    /// Apply the matrix to the amplitude pair `(|0⟩, |1⟩)`.
    #[inline]
    pub fn apply(&self, amp0: Complex64, amp1: Complex64) -> (Complex64, Complex64) {
        let [a, b, c, d] = self.data;
        (a * amp0 + b * amp1, c * amp0 + d * amp1)
    }

    /// Whether `U†U` is the identity.
    pub fn is_unitary(&self) -> bool {
        self.dagger().mul(self).approx_eq(&Self::identity(), EPSILON)
    }

    /// Element-wise equality within `tol`.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(x, y)| (x - y).norm() < tol)
    }

    /// Equality up to a global phase, within `tol`.
    pub fn approx_eq_up_to_phase(&self, other: &Self, tol: f64) -> bool {
        // |Tr(A†B)| = 2 exactly when A and B differ only by a phase.
        let overlap = self.dagger().mul(other);
        let trace = overlap.data[0] + overlap.data[3];
        (trace.norm() - 2.0).abs() < tol
    }
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Unitary2x2::mul(&self, &rhs)
    }
}
