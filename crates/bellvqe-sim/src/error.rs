//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced while building Hamiltonians or estimating expectations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Hamiltonian contains no terms.
    #[error("Hamiltonian is empty")]
    EmptyHamiltonian,

    /// A coefficient is NaN or infinite.
    #[error("Hamiltonian coefficient {coeff} of term {label} is not finite")]
    NonFiniteCoefficient {
        /// Label of the offending term.
        label: String,
        /// The coefficient.
        coeff: f64,
    },

    /// Dense matrix is not Hermitian.
    #[error("Hamiltonian matrix is not Hermitian (max deviation {deviation:e})")]
    NonHermitian {
        /// Largest |H - H†| entry.
        deviation: f64,
    },

    /// Counts histogram has no shots.
    #[error("Cannot estimate an expectation from empty counts")]
    EmptyCounts,

    /// Outcome bitstring contains something other than '0' and '1'.
    #[error("Invalid measurement outcome '{0}'")]
    InvalidOutcome(String),

    /// Label does not name a measurement basis.
    #[error("Unknown measurement basis '{0}' (expected II, ZZ, XX or YY)")]
    UnknownBasis(String),

    /// Hamiltonian term has no measurement basis.
    #[error("Hamiltonian term {0} cannot be measured in a parity basis")]
    UnsupportedTerm(String),

    /// Circuit shape does not fit the measurement scheme.
    #[error("Unsupported circuit: {0}")]
    UnsupportedCircuit(String),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] bellvqe_ir::IrError),

    /// Simulator returned an error.
    #[error("Simulator error: {0}")]
    Hal(#[from] bellvqe_hal::HalError),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
