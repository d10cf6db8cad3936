//! bellvqe local statevector simulator
//!
//! Exact statevector evolution for small circuits, plus a
//! [`SimulatorBackend`] that turns the final state into measurement
//! counts by seeded sampling.
//!
//! # Example
//!
//! ```
//! use bellvqe_adapter_sim::SimulatorBackend;
//! use bellvqe_hal::Backend;
//! use bellvqe_ir::Circuit;
//!
//! let mut backend = SimulatorBackend::with_seed(7);
//! let result = backend.run(&Circuit::bell().unwrap(), 1000).unwrap();
//!
//! // Only |00⟩ and |11⟩ appear.
//! assert_eq!(result.counts.get("00") + result.counts.get("11"), 1000);
//! ```

mod simulator;
mod statevector;

pub use simulator::SimulatorBackend;
pub use statevector::{MAX_QUBITS, MeasurementLayout, Statevector};
