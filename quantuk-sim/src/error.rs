//! Error types for the simulator

use quantuk_gates::GateError;
use quantuk_state::StateError;
use thiserror::Error;

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Errors that can occur during a simulator session
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulatorError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Register larger than the session allows
    #[error("Too many qubits: {num_qubits} (session maximum: {max_qubits})")]
    TooManyQubits { num_qubits: usize, max_qubits: usize },

    /// Instruction is malformed (wrong operand count, missing angle, ...)
    #[error("Invalid instruction '{name}': {reason}")]
    InvalidInstruction { name: String, reason: String },

    /// Register, measurement or snapshot failure
    #[error(transparent)]
    State(#[from] StateError),

    /// Gate lookup or embedding failure
    #[error(transparent)]
    Gate(#[from] GateError),
}

impl SimulatorError {
    /// Create an invalid instruction error
    pub fn invalid_instruction(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInstruction {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Whether the request itself was at fault, as opposed to an internal
    /// invariant violation that indicates a prior bug
    pub fn is_domain_error(&self) -> bool {
        match self {
            SimulatorError::State(e) => e.is_domain_error(),
            _ => true,
        }
    }
}
