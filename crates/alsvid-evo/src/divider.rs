//! Circuit dividers: split a circuit into (head, tail) at a structural bound.
//!
//! All dividers preserve relative instruction order in both halves and keep
//! the parent circuit's width. The normalizers keep the head; callers wanting
//! the remainder use the tail.

use alsvid_ir::{Circuit, Instruction};

/// Split at a depth bound; the head holds every instruction with chain depth
/// at most `depth`.
pub fn by_depth(circuit: &Circuit, depth: usize) -> (Circuit, Circuit) {
    circuit.split_at_depth(depth)
}

/// Split at an instruction-count bound.
pub fn by_num_gates(circuit: &Circuit, count: usize) -> (Circuit, Circuit) {
    circuit.split_at_gates(count)
}

/// Split before the (`max_cnots` + 1)-th CX gate; the head is the longest
/// prefix containing at most `max_cnots` CX gates.
pub fn by_num_cnot(circuit: &Circuit, max_cnots: usize) -> (Circuit, Circuit) {
    split_before_nth(circuit, max_cnots, Instruction::is_cnot)
}

/// Split before the (`max_rotations` + 1)-th rotation gate (rx, ry, rz).
pub fn by_num_rotation_gate(circuit: &Circuit, max_rotations: usize) -> (Circuit, Circuit) {
    split_before_nth(circuit, max_rotations, Instruction::is_rotation_gate)
}

fn split_before_nth(
    circuit: &Circuit,
    bound: usize,
    matches: fn(&Instruction) -> bool,
) -> (Circuit, Circuit) {
    let mut seen = 0usize;
    for (index, instruction) in circuit.instructions().iter().enumerate() {
        if matches(instruction) {
            seen += 1;
            if seen > bound {
                return circuit.split_at_gates(index);
            }
        }
    }
    circuit.split_at_gates(circuit.num_gates())
}
