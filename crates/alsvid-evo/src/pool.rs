//! Gate pools: the candidate vocabulary for mutation and generation.
//!
//! A [`GatePool`] is an ordered collection of [`GateDescriptor`]s. Each
//! descriptor pairs a gate constructor with its declared qubit arity and
//! parameter count; the operators draw descriptors uniformly and instantiate
//! them with fresh symbolic parameters.

use alsvid_ir::{ParameterExpression, StandardGate};
use rand::Rng;
use rand::seq::SliceRandom;

/// Classification of a descriptor's gate, fixed at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateClass {
    /// Single-qubit rotation gate (rx, ry, rz).
    Rotation,
    /// Anything else.
    Other,
}

/// Gate constructor invoked with exactly the descriptor's declared parameter
/// count.
pub type Constructor = fn(Vec<ParameterExpression>) -> StandardGate;

/// A candidate gate in the pool.
///
/// Authoring invariant: the constructor, invoked with `num_params`
/// parameters, must yield a gate whose arity equals `num_qubits`. The
/// mutation operators rely on this without checking it.
#[derive(Debug, Clone)]
pub struct GateDescriptor {
    constructor: Constructor,
    num_qubits: u32,
    num_params: usize,
    class: GateClass,
    name: &'static str,
}

impl GateDescriptor {
    /// Create a descriptor, probing the constructor once to fix the gate's
    /// name and class.
    pub fn new(num_qubits: u32, num_params: usize, constructor: Constructor) -> Self {
        let probe = constructor(symbolic_params(0, num_params));
        let class = if probe.is_rotation() {
            GateClass::Rotation
        } else {
            GateClass::Other
        };
        Self {
            constructor,
            num_qubits,
            num_params,
            class,
            name: probe.name(),
        }
    }

    /// Instantiate the gate with symbolic parameters derived from `tag`.
    ///
    /// Tagging by the target position keeps parameter names unique across a
    /// circuit's positions.
    pub fn instantiate(&self, tag: usize) -> StandardGate {
        (self.constructor)(symbolic_params(tag, self.num_params))
    }

    /// Declared qubit arity.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Declared parameter count.
    pub fn num_params(&self) -> usize {
        self.num_params
    }

    /// Gate class fixed at construction.
    pub fn class(&self) -> GateClass {
        self.class
    }

    /// Name of the constructed gate.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Symbolic parameter list for a descriptor instantiation.
///
/// One parameter gets the bare tag; a vector gets indexed names.
fn symbolic_params(tag: usize, count: usize) -> Vec<ParameterExpression> {
    match count {
        0 => vec![],
        1 => vec![ParameterExpression::symbol(format!("p{tag}"))],
        n => (0..n)
            .map(|k| ParameterExpression::symbol(format!("p{tag}_{k}")))
            .collect(),
    }
}

/// An ordered pool of candidate gate descriptors.
#[derive(Debug, Clone)]
pub struct GatePool {
    descriptors: Vec<GateDescriptor>,
}

impl GatePool {
    /// Create a pool from descriptors.
    pub fn new(descriptors: Vec<GateDescriptor>) -> Self {
        Self { descriptors }
    }

    /// The default variational-search pool: single-qubit Cliffords and
    /// rotations plus the CX/CZ entanglers.
    pub fn standard() -> Self {
        Self::new(vec![
            GateDescriptor::new(1, 0, |_| StandardGate::H),
            GateDescriptor::new(1, 0, |_| StandardGate::X),
            GateDescriptor::new(1, 0, |_| StandardGate::Z),
            GateDescriptor::new(1, 1, |mut p| StandardGate::Rx(p.remove(0))),
            GateDescriptor::new(1, 1, |mut p| StandardGate::Ry(p.remove(0))),
            GateDescriptor::new(1, 1, |mut p| StandardGate::Rz(p.remove(0))),
            GateDescriptor::new(2, 0, |_| StandardGate::CX),
            GateDescriptor::new(2, 0, |_| StandardGate::CZ),
        ])
    }

    /// The descriptors in pool order.
    pub fn descriptors(&self) -> &[GateDescriptor] {
        &self.descriptors
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Check whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Draw a descriptor uniformly at random.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> Option<&GateDescriptor> {
        self.descriptors.choose(rng)
    }
}
