//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit operand outside the circuit's width.
    #[error("Qubit {qubit} out of range for circuit with {width} qubits")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Number of qubits in the circuit.
        width: u32,
    },

    /// Classical bit operand outside the circuit's width.
    #[error("Classical bit {clbit} out of range for circuit with {width} bits")]
    ClbitOutOfRange {
        /// The offending classical bit.
        clbit: ClbitId,
        /// Number of classical bits in the circuit.
        width: u32,
    },

    /// Instruction index outside the circuit's gate sequence.
    #[error("Instruction index {index} out of range (circuit has {len} instructions)")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of instructions in the circuit.
        len: usize,
    },

    /// Gate requires a different number of qubit operands.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Duplicate qubit operand in one instruction.
    #[error("Duplicate qubit {qubit} in operation '{gate_name}'")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Name of the operation.
        gate_name: String,
    },

    /// Sequential composition of circuits with different qubit counts.
    #[error("Cannot compose circuits of width {got} into circuit of width {expected}")]
    WidthMismatch {
        /// Qubit count of the first part.
        expected: usize,
        /// Qubit count of the offending part.
        got: usize,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
