//! Shot-sampling simulator backend.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::{debug, instrument};

use bellvqe_hal::{Backend, Capabilities, Counts, ExecutionResult, HalResult};
use bellvqe_ir::Circuit;

use crate::statevector::{MAX_QUBITS, MeasurementLayout, Statevector};

/// Local simulator backend.
///
/// Each run evolves the statevector once, then draws every shot from the
/// resulting distribution with the backend's own [`StdRng`]. Two backends
/// built with the same seed produce identical counts for the same sequence
/// of runs.
pub struct SimulatorBackend {
    capabilities: Capabilities,
    rng: StdRng,
}

impl SimulatorBackend {
    /// Create a simulator seeded from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a simulator with a reproducible shot sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let capabilities = Capabilities::simulator(MAX_QUBITS as u32);
        Self { capabilities, rng }
    }

    /// Limit the number of qubits accepted by [`Backend::run`].
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.capabilities.num_qubits = max_qubits;
        self
    }

    /// Limit the shot count accepted by [`Backend::run`].
    #[must_use]
    pub fn with_max_shots(mut self, max_shots: u32) -> Self {
        self.capabilities.max_shots = max_shots;
        self
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run(&mut self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        self.validate(circuit, shots)?.into_result()?;
        let start = Instant::now();

        debug!(
            "Starting simulation: {} qubits, {} shots",
            circuit.num_qubits(),
            shots
        );

        let state = Statevector::from_circuit(circuit)?;
        let layout = MeasurementLayout::from_circuit(circuit);

        let mut counts = Counts::new();
        for _ in 0..shots {
            let outcome = state.sample(&mut self.rng);
            counts.insert(layout.bitstring(outcome), 1);
        }

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        #[allow(clippy::cast_possible_truncation)]
        let millis = elapsed.as_millis() as u64;
        Ok(ExecutionResult::new(counts, shots).with_execution_time(millis))
    }
}
