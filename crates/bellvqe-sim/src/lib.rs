//! bellvqe Hamiltonians and expectation estimators
//!
//! This crate connects a Pauli-sum Hamiltonian to circuit execution:
//!
//! - [`hamiltonian`]: Pauli strings, weighted terms, the dense matrix and its
//!   exact spectrum,
//! - [`basis`]: the two-qubit parity measurement table (II, ZZ, XX, YY),
//! - [`expectation`]: exact and shot-sampled expectation providers.
//!
//! # Example
//!
//! ```
//! use bellvqe_ir::{Circuit, QubitId};
//! use bellvqe_sim::{ExpectationProvider, Hamiltonian, MeasurementBasis, StatevectorExpectation};
//!
//! let mut prep = Circuit::with_size("bell", 2, 2);
//! prep.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
//!
//! let h = Hamiltonian::vqe_default();
//! let mut provider = StatevectorExpectation::new();
//! let mut energy = 0.0;
//! for term in h.terms() {
//!     let basis = MeasurementBasis::for_pauli(&term.pauli)?;
//!     energy += term.coeff * provider.expectation(&prep, basis)?;
//! }
//! assert!((energy - 1.0).abs() < 1e-12);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod basis;
pub mod error;
pub mod expectation;
pub mod hamiltonian;

pub use basis::{BasisRotation, BasisSpec, MeasurementBasis, SignRule, parity};
pub use error::{SimError, SimResult};
pub use expectation::{
    DEFAULT_SHOTS, ExpectationProvider, SampledExpectation, StatevectorExpectation,
    parity_expectation,
};
pub use hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};
