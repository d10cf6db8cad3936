//! Measurement bases for two-qubit Pauli parity terms.
//!
//! Every term of the two-qubit Hamiltonian is the same Pauli operator on
//! both qubits, so its expectation is a parity after a local basis change:
//!
//! ```text
//!   II   no circuit, ⟨II⟩ = 1
//!   ZZ   measure q0→c0, q1→c1
//!   XX   U2(0, π)   on both qubits, then measure
//!   YY   U2(0, π/2) on both qubits, then measure
//! ```

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use bellvqe_ir::{Circuit, ClbitId, QubitId};

use crate::error::{SimError, SimResult};
use crate::hamiltonian::{PauliOp, PauliString};

/// U2(φ, λ) applied to both qubits before measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasisRotation {
    pub phi: f64,
    pub lambda: f64,
}

/// How measured outcomes turn into eigenvalues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignRule {
    /// The operator is the identity; every outcome has eigenvalue +1.
    Constant,
    /// (-1)^(number of 1 bits).
    Parity,
}

/// One row of the basis table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasisSpec {
    pub label: &'static str,
    pub pauli: PauliOp,
    pub rotation: Option<BasisRotation>,
    pub sign: SignRule,
}

const BASIS_TABLE: [BasisSpec; 4] = [
    BasisSpec {
        label: "II",
        pauli: PauliOp::I,
        rotation: None,
        sign: SignRule::Constant,
    },
    BasisSpec {
        label: "ZZ",
        pauli: PauliOp::Z,
        rotation: None,
        sign: SignRule::Parity,
    },
    BasisSpec {
        label: "XX",
        pauli: PauliOp::X,
        rotation: Some(BasisRotation {
            phi: 0.0,
            lambda: PI,
        }),
        sign: SignRule::Parity,
    },
    BasisSpec {
        label: "YY",
        pauli: PauliOp::Y,
        rotation: Some(BasisRotation {
            phi: 0.0,
            lambda: FRAC_PI_2,
        }),
        sign: SignRule::Parity,
    },
];

/// A two-qubit Pauli term measured as a parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasurementBasis {
    II,
    ZZ,
    XX,
    YY,
}

impl MeasurementBasis {
    /// All bases in Hamiltonian term order.
    pub const ALL: [MeasurementBasis; 4] = [
        MeasurementBasis::II,
        MeasurementBasis::ZZ,
        MeasurementBasis::XX,
        MeasurementBasis::YY,
    ];

    /// Table row for this basis.
    pub fn spec(self) -> &'static BasisSpec {
        &BASIS_TABLE[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }

    pub fn rotation(self) -> Option<BasisRotation> {
        self.spec().rotation
    }

    pub fn is_identity(self) -> bool {
        self.spec().sign == SignRule::Constant
    }

    /// Parse `"II"`, `"ZZ"`, `"XX"` or `"YY"`.
    pub fn from_label(label: &str) -> SimResult<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.label().eq_ignore_ascii_case(label))
            .ok_or_else(|| SimError::UnknownBasis(label.to_string()))
    }

    /// Basis that measures `pauli`, which must be the identity or the same
    /// operator on qubits 0 and 1 only.
    pub fn for_pauli(pauli: &PauliString) -> SimResult<Self> {
        if pauli.is_identity() {
            return Ok(MeasurementBasis::II);
        }
        let unsupported = || SimError::UnsupportedTerm(pauli.label(pauli.max_qubit().map_or(0, |q| q + 1)));
        match pauli.ops() {
            [(0, a), (1, b)] if a == b => Self::ALL
                .into_iter()
                .find(|basis| basis.spec().pauli == *a)
                .ok_or_else(unsupported),
            _ => Err(unsupported()),
        }
    }

    /// Copy of `prepared` with the basis change and both measurements
    /// appended. `None` for the identity term.
    pub fn measurement_circuit(self, prepared: &Circuit) -> SimResult<Option<Circuit>> {
        if self.is_identity() {
            return Ok(None);
        }
        if prepared.num_qubits() != 2 {
            return Err(SimError::UnsupportedCircuit(format!(
                "{} measurement needs 2 qubits, circuit '{}' has {}",
                self.label(),
                prepared.name(),
                prepared.num_qubits()
            )));
        }
        if prepared.has_measurements() {
            return Err(SimError::UnsupportedCircuit(format!(
                "circuit '{}' is already measured",
                prepared.name()
            )));
        }

        let mut circuit = prepared.clone();
        while circuit.num_clbits() < 2 {
            circuit.add_clbit();
        }
        let (q0, q1) = (QubitId(0), QubitId(1));
        if let Some(BasisRotation { phi, lambda }) = self.rotation() {
            circuit.u2(phi, lambda, q0)?.u2(phi, lambda, q1)?;
        }
        circuit
            .measure(q0, ClbitId(0))?
            .measure(q1, ClbitId(1))?;
        Ok(Some(circuit))
    }
}

impl fmt::Display for MeasurementBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MeasurementBasis {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Self> {
        Self::from_label(s)
    }
}

/// Eigenvalue sign of a measured bitstring: (-1)^(number of '1' characters).
pub fn parity(bitstring: &str) -> SimResult<f64> {
    let mut ones = 0usize;
    for c in bitstring.chars() {
        match c {
            '0' => {}
            '1' => ones += 1,
            _ => return Err(SimError::InvalidOutcome(bitstring.to_string())),
        }
    }
    if bitstring.is_empty() {
        return Err(SimError::InvalidOutcome(bitstring.to_string()));
    }
    Ok(if ones % 2 == 0 { 1.0 } else { -1.0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bellvqe_ir::{InstructionKind, StandardGate};

    fn prepared() -> Circuit {
        let mut c = Circuit::with_size("prep", 2, 2);
        c.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
        c
    }

    #[test]
    fn test_table_order_matches_enum() {
        for basis in MeasurementBasis::ALL {
            assert_eq!(basis.label(), format!("{basis:?}"));
        }
    }

    #[test]
    fn test_from_label() {
        assert_eq!(MeasurementBasis::from_label("XX").unwrap(), MeasurementBasis::XX);
        assert_eq!("yy".parse::<MeasurementBasis>().unwrap(), MeasurementBasis::YY);
        assert!(matches!(
            MeasurementBasis::from_label("XZ"),
            Err(SimError::UnknownBasis(_))
        ));
    }

    #[test]
    fn test_for_pauli() {
        let zz = PauliString::uniform(PauliOp::Z, [0, 1]);
        assert_eq!(MeasurementBasis::for_pauli(&zz).unwrap(), MeasurementBasis::ZZ);
        assert_eq!(
            MeasurementBasis::for_pauli(&PauliString::identity()).unwrap(),
            MeasurementBasis::II
        );

        let xz = PauliString::from_ops([(0, PauliOp::X), (1, PauliOp::Z)]);
        assert!(matches!(
            MeasurementBasis::for_pauli(&xz),
            Err(SimError::UnsupportedTerm(label)) if label == "XZ"
        ));
        let z0 = PauliString::from_ops([(0, PauliOp::Z)]);
        assert!(MeasurementBasis::for_pauli(&z0).is_err());
    }

    #[test]
    fn test_identity_has_no_circuit() {
        assert!(MeasurementBasis::II.measurement_circuit(&prepared()).unwrap().is_none());
    }

    #[test]
    fn test_zz_circuit_measures_only() {
        let circuit = MeasurementBasis::ZZ.measurement_circuit(&prepared()).unwrap().unwrap();
        let names: Vec<_> = circuit.instructions().map(|i| i.name()).collect();
        assert_eq!(names, ["h", "cx", "measure", "measure"]);
    }

    #[test]
    fn test_xx_circuit_rotates_both_qubits() {
        let circuit = MeasurementBasis::XX.measurement_circuit(&prepared()).unwrap().unwrap();
        let rotations: Vec<_> = circuit
            .instructions()
            .filter_map(|i| match &i.kind {
                InstructionKind::Gate(g) if g.name() == "u2" => Some((g.kind, i.qubits[0])),
                _ => None,
            })
            .collect();
        assert_eq!(
            rotations,
            [
                (StandardGate::U2(0.0, PI), QubitId(0)),
                (StandardGate::U2(0.0, PI), QubitId(1)),
            ]
        );
        let measures: Vec<_> = circuit
            .instructions()
            .filter(|i| i.is_measure())
            .map(|i| (i.qubits[0], i.clbits[0]))
            .collect();
        assert_eq!(measures, [(QubitId(0), ClbitId(0)), (QubitId(1), ClbitId(1))]);
    }

    #[test]
    fn test_prepared_circuit_is_untouched() {
        let prep = prepared();
        let _ = MeasurementBasis::YY.measurement_circuit(&prep).unwrap();
        assert!(!prep.has_measurements());
        assert_eq!(prep.instructions().count(), 2);
    }

    #[test]
    fn test_clbits_added_when_missing() {
        let mut prep = Circuit::with_size("bare", 2, 0);
        prep.h(QubitId(0)).unwrap();
        let circuit = MeasurementBasis::ZZ.measurement_circuit(&prep).unwrap().unwrap();
        assert_eq!(circuit.num_clbits(), 2);
    }

    #[test]
    fn test_wrong_width_rejected() {
        let prep = Circuit::with_size("three", 3, 3);
        assert!(matches!(
            MeasurementBasis::XX.measurement_circuit(&prep),
            Err(SimError::UnsupportedCircuit(_))
        ));
    }

    #[test]
    fn test_parity() {
        assert_eq!(parity("00").unwrap(), 1.0);
        assert_eq!(parity("11").unwrap(), 1.0);
        assert_eq!(parity("01").unwrap(), -1.0);
        assert_eq!(parity("10").unwrap(), -1.0);
        assert!(parity("0x").is_err());
        assert!(parity("").is_err());
    }
}
