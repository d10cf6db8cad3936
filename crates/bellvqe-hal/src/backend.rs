//! Backend trait.
//!
//! ```text
//!   capabilities() ──→ validate() ──→ run()
//! ```
//!
//! Execution is synchronous: `run` returns once every shot has been taken.
//! `run` takes `&mut self` so that backends can own their random state.

use bellvqe_ir::{Circuit, InstructionKind};
use tracing::debug;

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::result::ExecutionResult;

/// Something that executes circuits and returns measurement counts.
pub trait Backend {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend, cached at construction.
    fn capabilities(&self) -> &Capabilities;

    /// Run `circuit` for `shots` shots.
    fn run(&mut self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult>;

    /// Check a circuit and shot count against [`Self::capabilities`].
    fn validate(&self, circuit: &Circuit, shots: u32) -> HalResult<ValidationResult> {
        let caps = self.capabilities();
        let mut reasons = vec![];

        if circuit.num_qubits() > caps.num_qubits as usize {
            reasons.push(format!(
                "circuit has {} qubits, backend supports {}",
                circuit.num_qubits(),
                caps.num_qubits
            ));
        }
        if shots == 0 || shots > caps.max_shots {
            reasons.push(format!(
                "{shots} shots outside 1..={}",
                caps.max_shots
            ));
        }
        for inst in circuit.instructions() {
            if let InstructionKind::Gate(gate) = &inst.kind {
                if !caps.gate_set.contains(gate.name()) {
                    reasons.push(format!("gate '{}' not supported", gate.name()));
                }
            }
        }

        debug!(backend = self.name(), problems = reasons.len(), "validated circuit");
        if reasons.is_empty() {
            Ok(ValidationResult::Valid)
        } else {
            Ok(ValidationResult::Invalid { reasons })
        }
    }
}

/// Outcome of [`Backend::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Circuit can be run as-is.
    Valid,
    /// Circuit cannot run on this backend.
    Invalid {
        /// Reasons the circuit is invalid.
        reasons: Vec<String>,
    },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Turn an invalid result into [`HalError::InvalidCircuit`].
    pub fn into_result(self) -> HalResult<()> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid { reasons } => {
                Err(HalError::InvalidCircuit(reasons.join("; ")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Counts;
    use bellvqe_ir::QubitId;

    struct Recorder {
        capabilities: Capabilities,
        runs: u32,
    }

    impl Backend for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.capabilities
        }

        fn run(&mut self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
            self.validate(circuit, shots)?.into_result()?;
            self.runs += 1;
            Ok(ExecutionResult::new(Counts::new(), shots))
        }
    }

    fn recorder(num_qubits: u32) -> Recorder {
        Recorder {
            capabilities: Capabilities::simulator(num_qubits).with_max_shots(1000),
            runs: 0,
        }
    }

    #[test]
    fn test_validate_accepts_bell() {
        let backend = recorder(2);
        let circuit = Circuit::bell().unwrap();
        assert!(backend.validate(&circuit, 100).unwrap().is_valid());
    }

    #[test]
    fn test_validate_rejects_oversized_circuit() {
        let backend = recorder(1);
        let circuit = Circuit::bell().unwrap();
        let result = backend.validate(&circuit, 100).unwrap();
        assert!(!result.is_valid());
    }

    #[test]
    fn test_validate_rejects_shot_budget() {
        let backend = recorder(2);
        let circuit = Circuit::bell().unwrap();
        assert!(!backend.validate(&circuit, 0).unwrap().is_valid());
        assert!(!backend.validate(&circuit, 1001).unwrap().is_valid());
    }

    #[test]
    fn test_validate_rejects_unknown_gate() {
        let mut backend = recorder(2);
        backend.capabilities.gate_set.two_qubit.clear();
        let mut circuit = Circuit::with_size("cz", 2, 0);
        circuit.cz(QubitId(0), QubitId(1)).unwrap();

        let err = backend.run(&circuit, 10).unwrap_err();
        assert!(matches!(err, HalError::InvalidCircuit(msg) if msg.contains("'cz'")));
        assert_eq!(backend.runs, 0);
    }
}
