//! Error handling logic

use thiserror::Error;

/// Error types raised by the tableau, the gate rules, measurement and the executor.
///
/// Every variant aborts the operation that raised it before any tableau row is
/// touched, so a caller observing an error can rely on the tableau being in the
/// state it was in before the failing call.
#[derive(Error, Debug, Clone, PartialEq, Eq)] // Eq useful for testing error variants
pub enum StabError {
    /// Non-positive qubit count at construction.
    #[error("Invalid size: a tableau needs at least one qubit, got {num_qubits}")]
    InvalidSize {
        /// Requested qubit count
        num_qubits: usize,
    },

    /// Qubit index outside `[0, n)`.
    #[error("Invalid qubit {qubit} for a {num_qubits}-qubit tableau")]
    InvalidQubit {
        /// Offending qubit index
        qubit: usize,
        /// Qubit count of the tableau
        num_qubits: usize,
    },

    /// Structurally invalid gate arguments (e.g. CNOT with control = target).
    #[error("Invalid gate: {message}")]
    InvalidGate {
        /// InvalidGate failure message
        message: String,
    },

    /// A gate name that does not map onto any known gate.
    #[error("Unsupported gate: {name}")]
    UnsupportedGate {
        /// The name as given by the caller
        name: String,
    },

    /// The injected random source could not supply another bit.
    #[error("Random source exhausted while drawing a measurement outcome")]
    RandomSourceExhausted,

    /// Row index outside `[0, 2n)`.
    #[error("Row {row} out of range for a tableau with {rows} rows")]
    InvalidRow {
        /// Offending row
        row: usize,
        /// Number of rows (2n)
        rows: usize,
    },

    /// Column index outside `[0, 2n]`.
    #[error("Column {column} out of range for a tableau with {columns} columns")]
    InvalidColumn {
        /// Offending column
        column: usize,
        /// Number of columns (2n + 1)
        columns: usize,
    },

    /// The executor already reached a terminal state.
    #[error("Executor is {state} and does not accept further operations")]
    ExecutorClosed {
        /// Name of the terminal state
        state: String,
    },

    /// Text that does not describe a signed Pauli string.
    #[error("Invalid Pauli string: {message}")]
    InvalidPauliString {
        /// InvalidPauliString failure message
        message: String,
    },

    /// An operation of a replayed record failed; carries the run's progress.
    #[error("Operation {index} failed after {} recorded outcome(s): {source}", .outcomes.len())]
    OperationFailed {
        /// Position of the failing operation in the record
        index: usize,
        /// Position of the last operation applied successfully, if any
        last_applied: Option<usize>,
        /// Outcomes recorded before the failure, in request order
        outcomes: Vec<bool>,
        /// The error raised by the failing operation
        source: Box<StabError>,
    },

    /// One of the tableau invariants no longer holds.
    #[error("Invariant violation: {message}")]
    InvariantViolation {
        /// InvariantViolation failure message
        message: String,
    },
}

impl StabError {
    /// The underlying error, looking through `OperationFailed` wrappers.
    pub fn root_cause(&self) -> &StabError {
        match self {
            StabError::OperationFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StabError>;
