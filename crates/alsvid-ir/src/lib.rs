//! Alsvid Circuit Intermediate Representation
//!
//! This crate provides the core data structures for representing quantum
//! circuits in Alsvid. The evolutionary variation operators in `alsvid-evo`
//! are built on top of it.
//!
//! # Overview
//!
//! A [`Circuit`] is an ordered instruction sequence over a fixed qubit/bit
//! width. The sequence form is deliberate: evolutionary operators address
//! gates by position, replace them in place, and slice circuits by depth or
//! by gate count, so positions must be stable and cheap to address. Depth is
//! still the graph notion — the longest dependency chain through
//! instructions sharing a wire — it is just computed from the sequence
//! rather than stored as one.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`]
//! - **Gates**: [`StandardGate`] with declared arities and named parameters
//! - **Parameters**: [`ParameterExpression`] for symbolic angles in
//!   variational circuits
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] builder, indexed access, slicing, composition
//!
//! # Example
//!
//! ```rust
//! use alsvid_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2, 0);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.depth(), 2);
//! let (head, tail) = circuit.split_at_depth(1);
//! assert_eq!(head.num_gates(), 1);
//! assert_eq!(tail.num_gates(), 1);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use parameter::ParameterExpression;
pub use qubit::{ClbitId, QubitId};
