//! Normalization policies: crop a circuit to a structural bound.
//!
//! A [`Normalizer`] is the post-mutation hook the bitflip operator accepts
//! and the depth-restoration step the layerflip operator uses internally.
//! Each provided policy delegates to a divider and keeps the head.

use alsvid_ir::Circuit;

use crate::divider;

/// A policy cropping a circuit to satisfy a structural bound.
pub trait Normalizer: Send + Sync {
    /// Get the name of this normalizer.
    fn name(&self) -> &str;

    /// Crop `circuit` in place. Cropping never fails; a circuit already
    /// within the bound may pass through untouched.
    fn normalize(&self, circuit: &mut Circuit);
}

/// Crop to a maximum depth.
pub struct ByDepth {
    max_depth: usize,
}

impl ByDepth {
    /// Create a by-depth normalizer.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl Normalizer for ByDepth {
    fn name(&self) -> &'static str {
        "ByDepth"
    }

    fn normalize(&self, circuit: &mut Circuit) {
        if circuit.depth() <= self.max_depth {
            return;
        }
        let (head, _) = divider::by_depth(circuit, self.max_depth);
        *circuit = head;
    }
}

/// Crop to a maximum number of CX gates.
pub struct ByNumCnot {
    max_cnots: usize,
}

impl ByNumCnot {
    /// Create a by-num-cnot normalizer.
    pub fn new(max_cnots: usize) -> Self {
        Self { max_cnots }
    }
}

impl Normalizer for ByNumCnot {
    fn name(&self) -> &'static str {
        "ByNumCnot"
    }

    fn normalize(&self, circuit: &mut Circuit) {
        let (head, _) = divider::by_num_cnot(circuit, self.max_cnots);
        *circuit = head;
    }
}

/// Crop to a maximum number of rotation gates (rx, ry, rz).
pub struct ByNumRotationGate {
    max_rotations: usize,
}

impl ByNumRotationGate {
    /// Create a by-num-rotation-gate normalizer.
    pub fn new(max_rotations: usize) -> Self {
        Self { max_rotations }
    }
}

impl Normalizer for ByNumRotationGate {
    fn name(&self) -> &'static str {
        "ByNumRotationGate"
    }

    fn normalize(&self, circuit: &mut Circuit) {
        let rotations = circuit
            .instructions()
            .iter()
            .filter(|i| i.is_rotation_gate())
            .count();
        if rotations <= self.max_rotations {
            return;
        }
        let (head, _) = divider::by_num_rotation_gate(circuit, self.max_rotations);
        *circuit = head;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::QubitId;

    fn deep(num_layers: usize) -> Circuit {
        let mut circuit = Circuit::with_size("deep", 2, 0);
        for _ in 0..num_layers {
            circuit.h(QubitId(0)).unwrap();
            circuit.h(QubitId(1)).unwrap();
        }
        circuit
    }

    #[test]
    fn test_by_depth_crops() {
        let mut circuit = deep(5);
        ByDepth::new(3).normalize(&mut circuit);
        assert_eq!(circuit.depth(), 3);
        assert_eq!(circuit.num_gates(), 6);
    }

    #[test]
    fn test_by_depth_within_bound_is_identity() {
        let mut circuit = deep(2);
        let before = circuit.clone();
        ByDepth::new(5).normalize(&mut circuit);
        assert_eq!(circuit, before);
    }

    #[test]
    fn test_by_num_cnot_crops() {
        let mut circuit = Circuit::with_size("cx", 2, 0);
        for _ in 0..4 {
            circuit.cx(QubitId(0), QubitId(1)).unwrap();
        }
        ByNumCnot::new(2).normalize(&mut circuit);
        assert_eq!(circuit.num_gates(), 2);
    }

    #[test]
    fn test_by_num_rotation_gate() {
        let mut circuit = Circuit::with_size("rot", 1, 0);
        circuit
            .rx(0.1, QubitId(0))
            .unwrap()
            .ry(0.2, QubitId(0))
            .unwrap()
            .rz(0.3, QubitId(0))
            .unwrap();

        let mut within = circuit.clone();
        ByNumRotationGate::new(3).normalize(&mut within);
        assert_eq!(within, circuit);

        ByNumRotationGate::new(1).normalize(&mut circuit);
        assert_eq!(circuit.num_gates(), 1);
    }

    #[test]
    fn test_names() {
        assert_eq!(ByDepth::new(1).name(), "ByDepth");
        assert_eq!(ByNumCnot::new(1).name(), "ByNumCnot");
        assert_eq!(ByNumRotationGate::new(1).name(), "ByNumRotationGate");
    }
}
