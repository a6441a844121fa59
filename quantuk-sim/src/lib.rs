//! Session-level quantum register simulator
//!
//! This crate ties the gate library and the register together behind the
//! API a web front end talks to: one [`Simulator`] per request, named gate
//! entry points that return the applied operator, measurement with a
//! request-scoped random source, and snapshot import/export for carrying the
//! register to the next request.
//!
//! # Features
//!
//! - **Named gates**: `had`, `x`, `y`, `z`, `qnot`, `root_not`, `root_z`,
//!   `s`, `t`, `phase`, `rx`, `ry`, `rz` on any subset of qubits
//! - **Controlled gates**: `cnot`, `ccnot`, `chad`, `cz`, `cphase`, `crx`,
//!   `cry`, `crz`, `swap`, `cswap`, and arbitrary multi-controlled gates
//! - **Measurement**: full register or single qubit, in the computational,
//!   X, Y, Z, Hadamard or a custom basis
//! - **Instructions**: name-keyed requests that can be parsed from form data
//!   or JSON and executed in order
//!
//! # Logging
//!
//! Operations emit `tracing` events (`debug` for operator application,
//! `info` for measurement outcomes and resets, `warn` for renormalized
//! input). The crate does not install a subscriber.
//!
//! # Example
//!
//! ```
//! use quantuk_sim::{Basis, Simulator, SimulatorConfig};
//!
//! let mut sim = Simulator::with_config(3, SimulatorConfig::deterministic(42)).unwrap();
//! sim.write(1, 1).unwrap();
//! sim.swap(1, 3).unwrap();
//!
//! let reading = sim.read(None, Basis::Computational).unwrap();
//! assert_eq!(reading.to_string(), "Measured state |100>.");
//!
//! let json = sim.to_json().unwrap();
//! let restored = Simulator::from_json(&json, SimulatorConfig::default()).unwrap();
//! assert_eq!(restored.num_qubits(), 3);
//! ```

pub mod config;
pub mod error;
pub mod instruction;
pub mod simulator;

pub use config::SimulatorConfig;
pub use error::{Result, SimulatorError};
pub use instruction::{Instruction, Outcome};
pub use simulator::{Reading, Simulator};

pub use quantuk_gates::{Angle, Gate, Operator};
pub use quantuk_state::{Basis, Register, Snapshot};
