//! Error types for gate construction and operator embedding

use thiserror::Error;

/// Errors raised while building gates or embedding them into a register
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GateError {
    /// Qubit number outside `1..=num_qubits`
    #[error("Invalid qubit {qubit} for {num_qubits}-qubit register (qubits are numbered from 1)")]
    InvalidQubit { qubit: usize, num_qubits: usize },

    /// The same qubit appears twice in one operand list
    #[error("Duplicate qubit {0} in operand list")]
    DuplicateQubit(usize),

    /// An operand list that must name at least one qubit is empty
    #[error("Operand list must contain at least one qubit")]
    EmptyQubitList,

    /// Target qubit is also listed as a control
    #[error("Target qubit {0} is also a control qubit")]
    ControlTargetCollision(usize),

    /// Gate name not recognised
    #[error("Unknown gate '{0}'")]
    UnknownGate(String),

    /// Parameterized gate requested without an angle
    #[error("Gate '{0}' requires an angle")]
    MissingAngle(String),

    /// Operator and vector (or two operators) have different dimensions
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl GateError {
    /// Create an invalid qubit error
    pub fn invalid_qubit(qubit: usize, num_qubits: usize) -> Self {
        Self::InvalidQubit { qubit, num_qubits }
    }
}

/// Result type for gate operations
pub type Result<T> = std::result::Result<T, GateError>;
