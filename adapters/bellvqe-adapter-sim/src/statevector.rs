//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};

use bellvqe_hal::{HalError, HalResult};
use bellvqe_ir::{Circuit, Instruction, InstructionKind, QubitId, StandardGate};

/// Largest register the engine will allocate.
pub const MAX_QUBITS: usize = 20;

/// A pure state of `n` qubits as `2^n` complex amplitudes.
///
/// Bit `k` of an amplitude index is the value of qubit `k`.
#[derive(Debug, Clone)]
pub struct Statevector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Evolve |0...0⟩ through every gate of `circuit`.
    ///
    /// Measurements must be terminal: a gate acting on an already measured
    /// qubit is rejected.
    pub fn from_circuit(circuit: &Circuit) -> HalResult<Self> {
        let num_qubits = circuit.num_qubits();
        if num_qubits > MAX_QUBITS {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {num_qubits} qubits but the statevector engine supports {MAX_QUBITS}"
            )));
        }

        let mut sv = Self::new(num_qubits);
        let mut measured: FxHashSet<QubitId> = FxHashSet::default();
        for inst in circuit.instructions() {
            if inst.is_gate() {
                if let Some(q) = inst.qubits.iter().find(|q| measured.contains(*q)) {
                    return Err(HalError::Unsupported(format!(
                        "gate '{}' on {q} after its measurement",
                        inst.name()
                    )));
                }
            } else if inst.is_measure() {
                measured.extend(inst.qubits.iter().copied());
            }
            sv.apply(inst)?;
        }
        Ok(sv)
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Apply the unitary part of an instruction. Measurements and barriers
    /// leave the state untouched.
    pub fn apply(&mut self, instruction: &Instruction) -> HalResult<()> {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let qubits: Vec<usize> = instruction.qubits.iter().map(|q| q.0 as usize).collect();
                self.apply_gate(&gate.kind, &qubits)
            }
            InstructionKind::Measure | InstructionKind::Barrier => Ok(()),
        }
    }

    fn apply_gate(&mut self, gate: &StandardGate, qubits: &[usize]) -> HalResult<()> {
        if let Some(&q) = qubits.iter().find(|&&q| q >= self.num_qubits) {
            return Err(HalError::InvalidCircuit(format!(
                "gate '{}' addresses qubit {q} of a {}-qubit state",
                gate.name(),
                self.num_qubits
            )));
        }
        match (gate, qubits) {
            (StandardGate::CX, &[control, target]) => self.apply_cx(control, target),
            (StandardGate::CZ, &[control, target]) => self.apply_cz(control, target),
            (_, &[qubit]) => {
                let u = gate.unitary().ok_or_else(|| {
                    HalError::Unsupported(format!("gate '{}' has no 2x2 matrix", gate.name()))
                })?;
                self.apply_single(&u, qubit);
            }
            _ => {
                return Err(HalError::InvalidCircuit(format!(
                    "gate '{}' applied to {} qubits",
                    gate.name(),
                    qubits.len()
                )));
            }
        }
        Ok(())
    }

    fn apply_single(&mut self, u: &bellvqe_ir::Unitary2x2, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let (a, b) = u.apply(self.amplitudes[i], self.amplitudes[j]);
                self.amplitudes[i] = a;
                self.amplitudes[j] = b;
            }
        }
    }

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    fn apply_cz(&mut self, control: usize, target: usize) {
        let both = (1 << control) | (1 << target);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & both == both {
                *amp = -*amp;
            }
        }
    }

    /// Born-rule probability of each basis index.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Sample a basis index.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let r: f64 = rng.gen_range(0.0..1.0);
        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }
        // Rounding can leave the total just under 1.
        self.amplitudes
            .iter()
            .rposition(|a| a.norm_sqr() > 0.0)
            .unwrap_or(0)
    }

    /// Bitstring of a basis index, qubit 0 first.
    pub fn outcome_to_bitstring(&self, outcome: usize) -> String {
        format!("{:0width$b}", outcome, width = self.num_qubits)
            .chars()
            .rev()
            .collect()
    }
}

/// Where each measured qubit lands in the classical register.
///
/// Bitstrings produced by [`MeasurementLayout::bitstring`] have one
/// character per classical bit, clbit 0 first; unmeasured clbits read `0`.
/// A circuit without measurements reads every qubit into the clbit of the
/// same index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementLayout {
    pairs: Vec<(usize, usize)>,
    width: usize,
}

impl MeasurementLayout {
    pub fn from_circuit(circuit: &Circuit) -> Self {
        let mut pairs = vec![];
        for inst in circuit.instructions().filter(|i| i.is_measure()) {
            for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                pairs.push((q.0 as usize, c.0 as usize));
            }
        }
        if pairs.is_empty() {
            let n = circuit.num_qubits();
            return Self {
                pairs: (0..n).map(|q| (q, q)).collect(),
                width: n,
            };
        }
        Self {
            pairs,
            width: circuit.num_clbits(),
        }
    }

    /// Number of characters in each bitstring.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Classical readout of basis index `outcome`.
    pub fn bitstring(&self, outcome: usize) -> String {
        let mut bits = vec![b'0'; self.width];
        for &(qubit, clbit) in &self.pairs {
            if outcome & (1 << qubit) != 0 {
                bits[clbit] = b'1';
            }
        }
        bits.into_iter().map(char::from).collect()
    }

    /// Exact probability of each classical readout of `state`.
    pub fn distribution(&self, state: &Statevector) -> FxHashMap<String, f64> {
        let mut dist = FxHashMap::default();
        for (outcome, p) in state.probabilities().into_iter().enumerate() {
            if p > 0.0 {
                *dist.entry(self.bitstring(outcome)).or_insert(0.0) += p;
            }
        }
        dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bellvqe_ir::ClbitId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes()[0], Complex64::new(1.0, 0.0)));
        assert!(sv.amplitudes()[1..].iter().all(|a| a.norm() < 1e-15));
    }

    #[test]
    fn test_bell_state() {
        let mut circuit = Circuit::with_size("bell", 2, 0);
        circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
        let sv = Statevector::from_circuit(&circuit).unwrap();

        let s = Complex64::new(FRAC_1_SQRT_2, 0.0);
        assert!(approx_eq(sv.amplitudes()[0], s));
        assert!(approx_eq(sv.amplitudes()[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes()[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes()[3], s));
    }

    #[test]
    fn test_x_flips_qubit_zero_to_low_bit() {
        let mut circuit = Circuit::with_size("x", 2, 0);
        circuit.x(QubitId(0)).unwrap();
        let sv = Statevector::from_circuit(&circuit).unwrap();
        assert_abs_diff_eq!(sv.probabilities()[1], 1.0, epsilon = 1e-12);
        assert_eq!(sv.outcome_to_bitstring(1), "10");
    }

    #[test]
    fn test_cz_phase() {
        let mut circuit = Circuit::with_size("cz", 2, 0);
        circuit
            .x(QubitId(0))
            .unwrap()
            .x(QubitId(1))
            .unwrap()
            .cz(QubitId(0), QubitId(1))
            .unwrap();
        let sv = Statevector::from_circuit(&circuit).unwrap();
        assert!(approx_eq(sv.amplitudes()[3], Complex64::new(-1.0, 0.0)));
    }

    #[test]
    fn test_y_basis_rotation() {
        // S·H|0⟩ is the +1 eigenstate of Y; U2(0, π/2) maps it to |0⟩.
        let mut circuit = Circuit::with_size("y", 1, 0);
        circuit
            .h(QubitId(0))
            .unwrap()
            .s(QubitId(0))
            .unwrap()
            .u2(0.0, FRAC_PI_2, QubitId(0))
            .unwrap();
        let sv = Statevector::from_circuit(&circuit).unwrap();
        assert_abs_diff_eq!(sv.probabilities()[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_x_basis_rotation() {
        let mut circuit = Circuit::with_size("x", 1, 0);
        circuit
            .h(QubitId(0))
            .unwrap()
            .u2(0.0, PI, QubitId(0))
            .unwrap();
        let sv = Statevector::from_circuit(&circuit).unwrap();
        assert_abs_diff_eq!(sv.probabilities()[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gate_after_measure_rejected() {
        let mut circuit = Circuit::with_size("late", 1, 1);
        circuit
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .h(QubitId(0))
            .unwrap();
        assert!(matches!(
            Statevector::from_circuit(&circuit),
            Err(HalError::Unsupported(_))
        ));
    }

    #[test]
    fn test_sample_deterministic() {
        let mut circuit = Circuit::with_size("one", 1, 0);
        circuit.x(QubitId(0)).unwrap();
        let sv = Statevector::from_circuit(&circuit).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(sv.sample(&mut rng), 1);
        }
    }

    #[test]
    fn test_layout_follows_clbits() {
        let mut circuit = Circuit::with_size("swap_read", 2, 2);
        circuit
            .x(QubitId(0))
            .unwrap()
            .measure(QubitId(0), ClbitId(1))
            .unwrap()
            .measure(QubitId(1), ClbitId(0))
            .unwrap();
        let layout = MeasurementLayout::from_circuit(&circuit);
        assert_eq!(layout.width(), 2);
        assert_eq!(layout.bitstring(0b01), "01");
    }

    #[test]
    fn test_layout_without_measurements_reads_all_qubits() {
        let circuit = Circuit::with_size("plain", 3, 0);
        let layout = MeasurementLayout::from_circuit(&circuit);
        assert_eq!(layout.width(), 3);
        assert_eq!(layout.bitstring(0b100), "001");
    }

    #[test]
    fn test_distribution_of_bell_state() {
        let circuit = Circuit::bell().unwrap();
        let sv = Statevector::from_circuit(&circuit).unwrap();
        let dist = MeasurementLayout::from_circuit(&circuit).distribution(&sv);
        assert_eq!(dist.len(), 2);
        assert_abs_diff_eq!(dist["00"], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(dist["11"], 0.5, epsilon = 1e-12);
    }
}
