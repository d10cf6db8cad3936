//! Quantum gate types.

use serde::{Deserialize, Serialize};

use crate::unitary::Unitary2x2;

/// Standard gates with known semantics. Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate.
    P(f64),
    /// U2(φ, λ), the basis-change gate of the OpenQASM 2 `u2`.
    U2(f64, f64),
    /// Universal single-qubit gate U(θ, φ, λ).
    U(f64, f64, f64),

    // Two-qubit gates
    /// Controlled-X (CNOT), control first.
    CX,
    /// Controlled-Z gate.
    CZ,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::H => "h",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::U2(_, _) => "u2",
            StandardGate::U(_, _, _) => "u",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::CX | StandardGate::CZ => 2,
            _ => 1,
        }
    }

    /// Get the angle parameters of this gate.
    pub fn parameters(&self) -> Vec<f64> {
        match *self {
            StandardGate::Rx(p) | StandardGate::Ry(p) | StandardGate::Rz(p) | StandardGate::P(p) => {
                vec![p]
            }
            StandardGate::U2(phi, lambda) => vec![phi, lambda],
            StandardGate::U(theta, phi, lambda) => vec![theta, phi, lambda],
            _ => vec![],
        }
    }

    /// The 2x2 matrix of a single-qubit gate, `None` for two-qubit gates.
    pub fn unitary(&self) -> Option<Unitary2x2> {
        let u = match *self {
            StandardGate::H => Unitary2x2::h(),
            StandardGate::X => Unitary2x2::x(),
            StandardGate::Y => Unitary2x2::y(),
            StandardGate::Z => Unitary2x2::z(),
            StandardGate::S => Unitary2x2::s(),
            StandardGate::Sdg => Unitary2x2::sdg(),
            StandardGate::Rx(theta) => Unitary2x2::rx(theta),
            StandardGate::Ry(theta) => Unitary2x2::ry(theta),
            StandardGate::Rz(theta) => Unitary2x2::rz(theta),
            StandardGate::P(lambda) => Unitary2x2::p(lambda),
            StandardGate::U2(phi, lambda) => Unitary2x2::u2(phi, lambda),
            StandardGate::U(theta, phi, lambda) => Unitary2x2::u(theta, phi, lambda),
            StandardGate::CX | StandardGate::CZ => return None,
        };
        Some(u)
    }
}

/// A gate with associated metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    pub kind: StandardGate,
    /// Optional label for the gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    /// Create a new gate from a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: gate,
            label: None,
        }
    }

    /// Add a label to the gate.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }

    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::U2(0.0, PI).num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);

        assert!(StandardGate::H.parameters().is_empty());
        assert_eq!(StandardGate::Rx(0.5).parameters(), vec![0.5]);
        assert_eq!(StandardGate::U2(0.0, PI).parameters(), vec![0.0, PI]);
    }

    #[test]
    fn test_unitary_only_for_single_qubit_gates() {
        assert!(StandardGate::Ry(0.1).unitary().is_some());
        assert!(StandardGate::CX.unitary().is_none());
        assert!(StandardGate::CZ.unitary().is_none());
    }

    #[test]
    fn test_gate_creation() {
        let h = Gate::standard(StandardGate::H);
        assert_eq!(h.name(), "h");
        assert_eq!(h.num_qubits(), 1);
        assert!(h.label.is_none());

        let labeled = Gate::from(StandardGate::U2(0.0, PI)).with_label("x_basis");
        assert_eq!(labeled.name(), "u2");
        assert_eq!(labeled.label.as_deref(), Some("x_basis"));
    }
}
