//! Error types for the evolution crate.

use alsvid_ir::IrError;
use thiserror::Error;

/// Errors that can occur in evolutionary operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EvoError {
    /// The gate pool has no descriptors.
    #[error("Gate pool is empty")]
    EmptyPool,

    /// Bounded rejection sampling ran out of draws.
    ///
    /// Only reachable when a draw bound is configured; the default unbounded
    /// mode keeps redrawing instead.
    #[error("No compatible descriptor drawn after {attempts} attempts")]
    DrawsExhausted {
        /// Number of draws that were attempted.
        attempts: usize,
    },

    /// No pool descriptor fits the remaining free width of a layer.
    #[error("No pool descriptor fits within {width} free qubits")]
    NoFittingDescriptor {
        /// Number of still-uncovered qubits.
        width: usize,
    },

    /// Structural error propagated from the circuit IR.
    #[error(transparent)]
    Ir(#[from] IrError),
}

/// Result type for evolutionary operations.
pub type EvoResult<T> = Result<T, EvoError>;
