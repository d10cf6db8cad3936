//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur in HAL operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Invalid circuit.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Circuit exceeds backend capabilities.
    #[error("Circuit exceeds backend capabilities: {0}")]
    CircuitTooLarge(String),

    /// Unsupported gate or instruction.
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Circuit construction failed.
    #[error("Circuit error: {0}")]
    Ir(#[from] bellvqe_ir::IrError),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
