//! Gate library and operator builder for QuanTUK
//!
//! This crate turns named single-qubit gates into full-register unitaries.
//! Every operator is a dense 2^n×2^n matrix obtained as an iterated tensor
//! (Kronecker) product of per-qubit 2×2 factors.
//!
//! # Features
//!
//! - **Gate families**: Identity, Hadamard, Pauli X/Y/Z, √X, √Z, Phase(φ),
//!   Rx(φ), Ry(φ), Rz(φ), with angles given in degrees
//! - **Operator builder**: single-qubit gates on any subset of qubits,
//!   multi-controlled gates, and measurement projectors
//! - **Parallel apply**: matrix-vector products run on rayon for larger
//!   registers (feature `parallel`, on by default)
//!
//! # Qubit numbering
//!
//! Qubits are numbered from 1. Qubit `q` is tensor factor `n - q` from the
//! most significant side, i.e. bit `q - 1` of the basis-state index.
//!
//! # Example
//!
//! ```
//! use quantuk_gates::operator::{embed_controlled_gate, embed_single_qubit_gate};
//! use quantuk_gates::Gate;
//!
//! let h = Gate::Hadamard.matrix();
//! let op = embed_single_qubit_gate(&h, 2, &[1]).unwrap();
//! assert!(op.is_unitary(1e-10));
//!
//! let cnot = embed_controlled_gate(&Gate::PauliX.matrix(), 2, &[1], 2).unwrap();
//! assert_eq!(cnot.dimension(), 4);
//! ```

pub mod error;
pub mod gate;
pub mod matrices;
pub mod matrix_ops;
pub mod operator;

pub use error::{GateError, Result};
pub use gate::{Angle, Gate};
pub use matrices::Matrix2;
pub use matrix_ops::Operator;
pub use num_complex::Complex64;
pub use operator::{
    embed_controlled_gate, embed_projector, embed_single_qubit_gate, validate_qubits, FactorList,
};
