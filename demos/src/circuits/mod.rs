//! Circuit generators.

pub mod ansatz;

pub use ansatz::{NUM_PARAMETERS, state_preparation};
