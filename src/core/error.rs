//! Error handling logic

use super::color::VertexColor;
use super::register::Qubit;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QcolorError>;

/// Error types raised while constructing or simulating circuits.
///
/// Every variant describes a violated precondition. Construction fails eagerly
/// at the point where the offending block or register is built; there is no
/// partially constructed state to recover.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QcolorError {
    /// A fixed-arity block received the wrong number of qubits.
    #[error("Dimension mismatch in {context}: expected {expected} qubits, got {actual}")]
    DimensionMismatch {
        /// Block or operand that rejected the input
        context: String,
        /// Required width
        expected: usize,
        /// Supplied width
        actual: usize,
    },

    /// A register or qubit pool is too small for the requested computation.
    #[error("Insufficient register '{register}': need {required} qubits, got {available}")]
    InsufficientRegister {
        /// Name of the register (or pool) that is too small
        register: String,
        /// Number of qubits needed
        required: usize,
        /// Number of qubits supplied
        available: usize,
    },

    /// The graph description violates a structural bound or references unknown vertices.
    #[error("Invalid graph: {message}")]
    InvalidGraph {
        /// InvalidGraph failure message
        message: String,
    },

    /// Two adjacent vertices were given the same fixed color.
    #[error("Inconsistent coloring: adjacent vertices '{first}' and '{second}' are both fixed to {color}")]
    InconsistentColoring {
        /// First endpoint of the offending edge
        first: String,
        /// Second endpoint of the offending edge
        second: String,
        /// The shared color
        color: VertexColor,
    },

    /// A qubit handle does not resolve inside the circuit it is used with.
    #[error("Invalid qubit {qubit}: {message}")]
    InvalidQubit {
        /// The unresolved handle
        qubit: Qubit,
        /// InvalidQubit failure message
        message: String,
    },

    /// An operation is inconsistent with the circuit it is added to.
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },

    /// General error encountered during the simulation process itself.
    #[error("Simulation error: {message}")]
    SimulationError {
        /// SimulationError failure message
        message: String,
    },

    /// A state failed a validation check (normalization, ancilla restoration).
    #[error("Incoherence: {message}")]
    Incoherence {
        /// Incoherence failure message
        message: String,
    },

    /// A configuration document could not be parsed.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// InvalidConfig failure message
        message: String,
    },
}

impl From<serde_json::Error> for QcolorError {
    fn from(err: serde_json::Error) -> Self {
        QcolorError::InvalidConfig { message: err.to_string() }
    }
}
