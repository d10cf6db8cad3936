//! Pauli-term expectation values.
//!
//! Two providers share the [`ExpectationProvider`] interface:
//!
//! - [`StatevectorExpectation`]: exact ⟨P⟩ from the simulated state,
//! - [`SampledExpectation`]: parity average over shots from a [`Backend`].

use bellvqe_adapter_sim::{MeasurementLayout, Statevector};
use bellvqe_hal::{Backend, Counts};
use bellvqe_ir::Circuit;
use tracing::debug;

use crate::basis::{MeasurementBasis, parity};
use crate::error::{SimError, SimResult};

/// Shot budget used by [`SampledExpectation::new`].
pub const DEFAULT_SHOTS: u32 = 8192;

/// Frequency-weighted parity of a counts histogram.
///
/// `"00"` and `"11"` count +1, `"01"` and `"10"` count -1.
#[allow(clippy::cast_precision_loss)]
pub fn parity_expectation(counts: &Counts) -> SimResult<f64> {
    let total = counts.total_shots();
    if total == 0 {
        return Err(SimError::EmptyCounts);
    }
    let mut signed = 0i64;
    for (bitstring, &count) in counts.iter() {
        #[allow(clippy::cast_possible_wrap)]
        let count = count as i64;
        if parity(bitstring)? > 0.0 {
            signed += count;
        } else {
            signed -= count;
        }
    }
    Ok(signed as f64 / total as f64)
}

/// Estimates ⟨P⟩ of a two-qubit parity term on a prepared state.
pub trait ExpectationProvider {
    /// Short name used in logs and reports.
    fn name(&self) -> &str;

    /// Expectation of `basis` on the state produced by `prepared`.
    ///
    /// `prepared` must be unmeasured. [`MeasurementBasis::II`] is exactly 1.
    fn expectation(&mut self, prepared: &Circuit, basis: MeasurementBasis) -> SimResult<f64>;
}

impl<P: ExpectationProvider + ?Sized> ExpectationProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn expectation(&mut self, prepared: &Circuit, basis: MeasurementBasis) -> SimResult<f64> {
        (**self).expectation(prepared, basis)
    }
}

impl<P: ExpectationProvider + ?Sized> ExpectationProvider for &mut P {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn expectation(&mut self, prepared: &Circuit, basis: MeasurementBasis) -> SimResult<f64> {
        (**self).expectation(prepared, basis)
    }
}

/// Exact expectation from the final statevector.
#[derive(Debug, Clone, Default)]
pub struct StatevectorExpectation {
    evaluations: u64,
}

impl StatevectorExpectation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of simulated measurement circuits so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }
}

impl ExpectationProvider for StatevectorExpectation {
    fn name(&self) -> &str {
        "statevector"
    }

    fn expectation(&mut self, prepared: &Circuit, basis: MeasurementBasis) -> SimResult<f64> {
        let Some(circuit) = basis.measurement_circuit(prepared)? else {
            return Ok(1.0);
        };
        let state = Statevector::from_circuit(&circuit)?;
        let distribution = MeasurementLayout::from_circuit(&circuit).distribution(&state);
        self.evaluations += 1;

        let mut value = 0.0;
        for (bitstring, p) in &distribution {
            value += parity(bitstring)? * p;
        }
        debug!(basis = %basis, value, "exact expectation");
        Ok(value)
    }
}

/// Shot-sampled expectation from a [`Backend`].
pub struct SampledExpectation<B: Backend> {
    backend: B,
    shots: u32,
    name: String,
}

impl<B: Backend> SampledExpectation<B> {
    /// Sample [`DEFAULT_SHOTS`] shots per term.
    pub fn new(backend: B) -> Self {
        let name = format!("sampling({})", backend.name());
        Self {
            backend,
            shots: DEFAULT_SHOTS,
            name,
        }
    }

    #[must_use]
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    pub fn shots(&self) -> u32 {
        self.shots
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: Backend> ExpectationProvider for SampledExpectation<B> {
    fn name(&self) -> &str {
        &self.name
    }

    fn expectation(&mut self, prepared: &Circuit, basis: MeasurementBasis) -> SimResult<f64> {
        let Some(circuit) = basis.measurement_circuit(prepared)? else {
            return Ok(1.0);
        };
        let result = self.backend.run(&circuit, self.shots)?;
        let value = parity_expectation(&result.counts)?;
        debug!(basis = %basis, shots = self.shots, value, "sampled expectation");
        Ok(value)
    }
}
