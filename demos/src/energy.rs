//! Energy function E(θ) = Σ_k c_k ⟨P_k⟩.

use bellvqe_sim::{ExpectationProvider, Hamiltonian, MeasurementBasis, SimResult};
use tracing::debug;

use crate::circuits::ansatz::{NUM_PARAMETERS, state_preparation};

/// Maps ansatz parameters to the Hamiltonian's expectation value.
///
/// Terms are evaluated in Hamiltonian order with a fresh state preparation
/// per call; nothing is cached between calls.
pub struct EnergyFunction<P: ExpectationProvider> {
    terms: Vec<(MeasurementBasis, f64)>,
    provider: P,
    evaluations: usize,
}

impl<P: ExpectationProvider> EnergyFunction<P> {
    /// Fails with `UnsupportedTerm` if a term has no parity basis.
    pub fn new(hamiltonian: &Hamiltonian, provider: P) -> SimResult<Self> {
        let terms = hamiltonian
            .terms()
            .iter()
            .map(|t| Ok((MeasurementBasis::for_pauli(&t.pauli)?, t.coeff)))
            .collect::<SimResult<Vec<_>>>()?;
        Ok(Self {
            terms,
            provider,
            evaluations: 0,
        })
    }

    pub fn terms(&self) -> &[(MeasurementBasis, f64)] {
        &self.terms
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Number of completed [`Self::evaluate`] calls.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// ⟨P_k⟩ for every term, in term order.
    pub fn term_expectations(
        &mut self,
        params: &[f64; NUM_PARAMETERS],
    ) -> SimResult<Vec<(MeasurementBasis, f64)>> {
        let prepared = state_preparation(params)?;
        self.terms
            .iter()
            .map(|&(basis, _)| Ok((basis, self.provider.expectation(&prepared, basis)?)))
            .collect()
    }

    /// Σ_k c_k ⟨P_k⟩ at `params`.
    pub fn evaluate(&mut self, params: &[f64; NUM_PARAMETERS]) -> SimResult<f64> {
        let prepared = state_preparation(params)?;
        let mut energy = 0.0;
        for &(basis, coeff) in &self.terms {
            energy += coeff * self.provider.expectation(&prepared, basis)?;
        }
        self.evaluations += 1;
        debug!(
            theta1 = params[0],
            theta2 = params[1],
            energy,
            provider = self.provider.name(),
            "energy evaluation"
        );
        Ok(energy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bellvqe_sim::{HamiltonianTerm, PauliOp, PauliString, SimError, StatevectorExpectation};
    use std::f64::consts::PI;

    fn exact() -> EnergyFunction<StatevectorExpectation> {
        EnergyFunction::new(&Hamiltonian::vqe_default(), StatevectorExpectation::new()).unwrap()
    }

    #[test]
    fn test_terms_follow_hamiltonian_order() {
        let f = exact();
        assert_eq!(
            f.terms(),
            &[
                (MeasurementBasis::II, 0.5),
                (MeasurementBasis::ZZ, 0.5),
                (MeasurementBasis::XX, -0.5),
                (MeasurementBasis::YY, -0.5),
            ]
        );
    }

    #[test]
    fn test_bell_point() {
        let mut f = exact();
        assert_abs_diff_eq!(f.evaluate(&[0.0, 0.0]).unwrap(), 1.0, epsilon = 1e-12);
        let values: Vec<f64> = f
            .term_expectations(&[0.0, 0.0])
            .unwrap()
            .into_iter()
            .map(|(_, v)| v)
            .collect();
        for (got, want) in values.iter().zip([1.0, 1.0, 1.0, -1.0]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_minimum_point() {
        let mut f = exact();
        assert_abs_diff_eq!(f.evaluate(&[PI, 0.0]).unwrap(), -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(f.evaluate(&[-PI, 0.0]).unwrap(), -1.0, epsilon = 1e-12);
        assert_eq!(f.evaluations(), 2);
    }

    #[test]
    fn test_unmeasurable_term_rejected() {
        let h = Hamiltonian::from_terms(vec![HamiltonianTerm::new(
            1.0,
            PauliString::from_ops([(0, PauliOp::X), (1, PauliOp::Z)]),
        )]);
        assert!(matches!(
            EnergyFunction::new(&h, StatevectorExpectation::new()),
            Err(SimError::UnsupportedTerm(_))
        ));
    }
}
