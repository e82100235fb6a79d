//! High-level circuit builder API.
//!
//! A [`Circuit`] is an ordered instruction sequence over a fixed set of
//! qubits and classical bits. The sequence order is the program order; the
//! depth is the longest dependency chain through instructions sharing a wire.
//! Evolutionary operators address instructions by position, so the sequence
//! supports indexed access and validated in-place replacement.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::parameter::ParameterExpression;
use crate::qubit::{ClbitId, QubitId};

/// A wire carrying a dependency chain through the circuit.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum Wire {
    Qubit(u32),
    Clbit(u32),
}

/// A quantum circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Number of classical bits.
    num_clbits: u32,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit with no qubits.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_size(name, 0, 0)
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: vec![],
        }
    }

    /// Append an instruction after validating its operands.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<()> {
        self.validate(&instruction)?;
        self.instructions.push(instruction);
        Ok(())
    }

    /// Replace the instruction at `index`, validating the replacement.
    ///
    /// This is the in-place edit the mutation operators use; an out-of-range
    /// index is a boundary violation surfaced directly.
    pub fn replace(&mut self, index: usize, instruction: Instruction) -> IrResult<()> {
        if index >= self.instructions.len() {
            return Err(IrError::IndexOutOfRange {
                index,
                len: self.instructions.len(),
            });
        }
        self.validate(&instruction)?;
        self.instructions[index] = instruction;
        Ok(())
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        for (i, &qubit) in instruction.qubits.iter().enumerate() {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit,
                    width: self.num_qubits,
                });
            }
            if instruction.qubits[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: instruction.name().to_string(),
                });
            }
        }
        for &clbit in &instruction.clbits {
            if clbit.0 >= self.num_clbits {
                return Err(IrError::ClbitOutOfRange {
                    clbit,
                    width: self.num_clbits,
                });
            }
        }
        if let InstructionKind::Gate(gate) = &instruction.kind {
            let expected = gate.num_qubits();
            let got = u32::try_from(instruction.qubits.len()).unwrap_or(u32::MAX);
            if expected != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected,
                    got,
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Y, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Z, qubit))?;
        Ok(self)
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::S, qubit))?;
        Ok(self)
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::T, qubit))?;
        Ok(self)
    }

    /// Apply Rx rotation gate.
    pub fn rx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Rx(theta.into()),
            qubit,
        ))?;
        Ok(self)
    }

    /// Apply Ry rotation gate.
    pub fn ry(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Ry(theta.into()),
            qubit,
        ))?;
        Ok(self)
    }

    /// Apply Rz rotation gate.
    pub fn rz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Rz(theta.into()),
            qubit,
        ))?;
        Ok(self)
    }

    /// Apply phase gate.
    pub fn p(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::P(theta.into()),
            qubit,
        ))?;
        Ok(self)
    }

    /// Apply universal U gate.
    pub fn u(
        &mut self,
        theta: impl Into<ParameterExpression>,
        phi: impl Into<ParameterExpression>,
        lambda: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::U(theta.into(), phi.into(), lambda.into()),
            qubit,
        ))?;
        Ok(self)
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CX, control, target))?;
        Ok(self)
    }

    /// Apply CY gate.
    pub fn cy(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CY, control, target))?;
        Ok(self)
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CZ, control, target))?;
        Ok(self)
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))?;
        Ok(self)
    }

    /// Apply controlled-Rz gate.
    pub fn crz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CRz(theta.into()),
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply controlled-phase gate.
    pub fn cp(
        &mut self,
        theta: impl Into<ParameterExpression>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CP(theta.into()),
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CCX, [c1, c2, target]))?;
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))?;
        Ok(self)
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::reset(qubit))?;
        Ok(self)
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))?;
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// Get the number of instructions.
    pub fn num_gates(&self) -> usize {
        self.instructions.len()
    }

    /// Check whether the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Get the instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Get the instruction at `index`, if in range.
    pub fn instruction(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// Calculate the circuit depth.
    ///
    /// Depth is the longest dependency chain: every instruction advances the
    /// frontier of each wire it touches to one past the deepest of them.
    pub fn depth(&self) -> usize {
        self.instruction_depths().into_iter().max().unwrap_or(0)
    }

    /// Chain depth of every instruction, in program order (1-based).
    fn instruction_depths(&self) -> Vec<usize> {
        let mut frontier: FxHashMap<Wire, usize> = FxHashMap::default();
        let mut depths = Vec::with_capacity(self.instructions.len());
        for instruction in &self.instructions {
            let wires = instruction
                .qubits
                .iter()
                .map(|q| Wire::Qubit(q.0))
                .chain(instruction.clbits.iter().map(|c| Wire::Clbit(c.0)));
            let depth = wires
                .clone()
                .map(|w| frontier.get(&w).copied().unwrap_or(0))
                .max()
                .unwrap_or(0)
                + 1;
            for wire in wires {
                frontier.insert(wire, depth);
            }
            depths.push(depth);
        }
        depths
    }

    // =========================================================================
    // Slicing and composition
    // =========================================================================

    /// Split into (head, tail) at a depth bound.
    ///
    /// The head receives every instruction whose chain depth is at most
    /// `depth`; the tail receives the rest. Both halves keep this circuit's
    /// width and relative instruction order. Instructions at depth ≤ d form a
    /// prefix-closed set, so both halves are well-formed.
    pub fn split_at_depth(&self, depth: usize) -> (Circuit, Circuit) {
        let depths = self.instruction_depths();
        let mut head = Circuit::with_size(self.name.clone(), self.num_qubits, self.num_clbits);
        let mut tail = Circuit::with_size(self.name.clone(), self.num_qubits, self.num_clbits);
        for (instruction, d) in self.instructions.iter().zip(depths) {
            if d <= depth {
                head.instructions.push(instruction.clone());
            } else {
                tail.instructions.push(instruction.clone());
            }
        }
        (head, tail)
    }

    /// Split into (head, tail) at an instruction-count bound: the head is the
    /// first `count` instructions, the tail the rest.
    pub fn split_at_gates(&self, count: usize) -> (Circuit, Circuit) {
        let at = count.min(self.instructions.len());
        let mut head = Circuit::with_size(self.name.clone(), self.num_qubits, self.num_clbits);
        let mut tail = Circuit::with_size(self.name.clone(), self.num_qubits, self.num_clbits);
        head.instructions.extend_from_slice(&self.instructions[..at]);
        tail.instructions.extend_from_slice(&self.instructions[at..]);
        (head, tail)
    }

    /// Sequentially compose circuits into one.
    ///
    /// All parts must have the same qubit count; the classical width of the
    /// result is the widest part's.
    pub fn compose(
        name: impl Into<String>,
        parts: impl IntoIterator<Item = Circuit>,
    ) -> IrResult<Circuit> {
        let mut parts = parts.into_iter();
        let Some(first) = parts.next() else {
            return Ok(Circuit::new(name));
        };
        let mut composed = Circuit {
            name: name.into(),
            ..first
        };
        for part in parts {
            if part.num_qubits != composed.num_qubits {
                return Err(IrError::WidthMismatch {
                    expected: composed.num_qubits as usize,
                    got: part.num_qubits as usize,
                });
            }
            composed.num_clbits = composed.num_clbits.max(part.num_clbits);
            composed.instructions.extend(part.instructions);
        }
        Ok(composed)
    }
}
