//! Dense quantum register, measurement and snapshots for QuanTUK
//!
//! This crate holds the mutable side of the simulator: the amplitude vector
//! of an n-qubit register, the projective measurements that sample and
//! collapse it, and the magnitude/phase snapshot used to carry a register
//! across stateless requests.
//!
//! # Invariant
//!
//! After every gate application, measurement or write the register has unit
//! norm within [`NORM_TOLERANCE`]. Writes of unnormalized amplitudes are
//! rescaled and reported via [`Renormalization`].
//!
//! # Example
//!
//! ```
//! use quantuk_gates::Gate;
//! use quantuk_state::{Basis, Register};
//!
//! let mut reg = Register::new(2).unwrap();
//! reg.apply_gate(&Gate::Hadamard, &[1]).unwrap();
//! reg.apply_controlled(&Gate::PauliX, &[1], 2).unwrap();
//!
//! let reading = reg.measure_all(Basis::Computational, &mut || 0.7).unwrap();
//! assert_eq!(reading.bits, "11");
//!
//! let snapshot = reg.snapshot();
//! assert_eq!(snapshot.n, 2);
//! ```

pub mod codec;
pub mod error;
pub mod measurement;
pub mod register;

pub use codec::Snapshot;
pub use error::{Result, StateError};
pub use measurement::{
    Basis, FullRegister, Measurement, QubitReading, RegisterReading, SingleQubit,
};
pub use register::{Register, Renormalization, MAX_QUBITS, NORM_TOLERANCE};
