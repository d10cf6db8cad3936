//! Two-parameter entangling ansatz.
//!
//! The circuit prepares a Bell pair and then rotates qubit 0:
//!
//! ```text
//!   q0: ─H──●──RX(θ₁)──RY(θ₂)─
//!           │
//!   q1: ────X─────────────────
//! ```
//!
//! At θ₁ = θ₂ = 0 the state is (|00⟩ + |11⟩)/√2.

use bellvqe_ir::{Circuit, IrResult};

/// Number of variational parameters.
pub const NUM_PARAMETERS: usize = 2;

/// Build the state-preparation circuit for `[θ₁, θ₂]`.
///
/// The circuit has a 2-qubit register `q` and a 2-bit register `c` and no
/// measurements; measurement bases append their own.
pub fn state_preparation(params: &[f64; NUM_PARAMETERS]) -> IrResult<Circuit> {
    let [theta1, theta2] = *params;

    let mut circuit = Circuit::new("vqe_ansatz");
    let q = circuit.add_qreg("q", 2);
    circuit.add_creg("c", 2);

    circuit
        .h(q[0])?
        .cx(q[0], q[1])?
        .rx(theta1, q[0])?
        .ry(theta2, q[0])?;
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bellvqe_ir::{InstructionKind, QubitId, StandardGate};

    #[test]
    fn test_ansatz_structure() {
        let circuit = state_preparation(&[0.3, -1.2]).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);
        assert!(!circuit.has_measurements());
        assert_eq!(circuit.depth(), 4);

        let gates: Vec<_> = circuit
            .instructions()
            .filter_map(|i| match &i.kind {
                InstructionKind::Gate(g) => Some((g.kind, i.qubits.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(
            gates,
            vec![
                (StandardGate::H, vec![QubitId(0)]),
                (StandardGate::CX, vec![QubitId(0), QubitId(1)]),
                (StandardGate::Rx(0.3), vec![QubitId(0)]),
                (StandardGate::Ry(-1.2), vec![QubitId(0)]),
            ]
        );
    }

    #[test]
    fn test_ansatz_registers() {
        let circuit = state_preparation(&[0.0, 0.0]).unwrap();
        assert_eq!(circuit.qubits()[1].to_string(), "q[1]");
        assert_eq!(circuit.clbits()[0].to_string(), "c[0]");
    }
}
