//! bellvqe simulator abstraction layer
//!
//! A small, synchronous interface between circuits and whatever executes
//! them:
//! - the [`Backend`] trait for running a circuit for a number of shots
//! - [`Capabilities`] describing qubit limits and the supported gate set
//! - [`ExecutionResult`] and [`Counts`] for measurement histograms
//!
//! # Example: Implementing a Backend
//!
//! ```
//! use bellvqe_hal::{Backend, Capabilities, Counts, ExecutionResult, HalResult};
//! use bellvqe_ir::Circuit;
//!
//! struct AlwaysZero {
//!     capabilities: Capabilities,
//! }
//!
//! impl Backend for AlwaysZero {
//!     fn name(&self) -> &str {
//!         "always_zero"
//!     }
//!
//!     fn capabilities(&self) -> &Capabilities {
//!         &self.capabilities
//!     }
//!
//!     fn run(&mut self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
//!         self.validate(circuit, shots)?.into_result()?;
//!         let mut counts = Counts::new();
//!         counts.insert("0".repeat(circuit.num_qubits()), u64::from(shots));
//!         Ok(ExecutionResult::new(counts, shots))
//!     }
//! }
//!
//! let mut backend = AlwaysZero { capabilities: Capabilities::simulator(2) };
//! let result = backend.run(&Circuit::bell().unwrap(), 10).unwrap();
//! assert_eq!(result.counts.get("00"), 10);
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod result;

pub use backend::{Backend, ValidationResult};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use result::{Counts, ExecutionResult};
