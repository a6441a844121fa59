//! Error types for register operations

use quantuk_gates::GateError;
use thiserror::Error;

/// Errors that can occur during register operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Register with zero qubits
    #[error("Register must have at least one qubit")]
    InvalidQubitCount,

    /// Dense representation would be too large
    #[error("{num_qubits} qubits exceeds the dense register limit of {max}")]
    TooManyQubits { num_qubits: usize, max: usize },

    /// Integer does not fit into the qubits from `start` upwards
    #[error("Value {value} does not fit into the {capacity} qubit(s) starting at qubit {start}")]
    ValueOutOfRange {
        value: usize,
        start: usize,
        capacity: usize,
    },

    /// Input vector has the wrong length
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Per-qubit probability outside [0, 1]
    #[error("Probability {value} for qubit {qubit} is outside [0, 1]")]
    InvalidProbability { qubit: usize, value: f64 },

    /// Amplitude vector has zero norm and cannot be normalized
    #[error("Amplitude vector has zero norm")]
    ZeroNorm,

    /// Measurement branch probabilities do not sum to one; the register was
    /// corrupted by an earlier operation
    #[error(
        "Internal invariant violated measuring qubit {qubit}: p(0) + p(1) = {p0} + {p1} != 1"
    )]
    InvariantViolation { qubit: usize, p0: f64, p1: f64 },

    /// Measurement basis label not recognised
    #[error("Unknown measurement basis '{0}' (expected one of c, x, y, z, h)")]
    UnknownBasis(String),

    /// Snapshot fields are inconsistent
    #[error("Corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    /// Snapshot JSON could not be read or written
    #[error("Snapshot JSON error: {0}")]
    Json(String),

    /// Operand or operator error from the gate layer
    #[error(transparent)]
    Gate(#[from] GateError),
}

impl StateError {
    /// Whether this error reports invalid caller input (as opposed to an
    /// internal invariant violation)
    pub fn is_domain_error(&self) -> bool {
        !matches!(self, StateError::InvariantViolation { .. })
    }
}

/// Result type for register operations
pub type Result<T> = std::result::Result<T, StateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_error_is_transparent() {
        let err: StateError = GateError::DuplicateQubit(2).into();
        assert_eq!(err.to_string(), "Duplicate qubit 2 in operand list");
        assert!(err.is_domain_error());
    }

    #[test]
    fn test_invariant_violation_is_not_domain() {
        let err = StateError::InvariantViolation {
            qubit: 1,
            p0: 0.4,
            p1: 0.4,
        };
        assert!(!err.is_domain_error());
        assert!(err.to_string().contains("qubit 1"));
    }
}
