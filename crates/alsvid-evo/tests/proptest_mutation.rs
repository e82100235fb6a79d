//! Property-based tests for the mutation operators.
//!
//! Drives the operators with generated circuits and seeds and checks the
//! structural guarantees: arity preservation, probability-0 identity,
//! probability-1 coverage, the rotation floor, and the layerflip depth
//! invariant.

use alsvid_evo::normalizer::ByDepth;
use alsvid_evo::{
    BitflipMutation, GateDescriptor, GatePool, GateSubstitution, LayerflipMutation,
    RotationFloorSubstitution,
};
use alsvid_ir::{Circuit, QubitId, StandardGate};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Gate operations that can be applied to a circuit.
#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    X(u32),
    Rx(u32),
    Ry(u32),
    Rz(u32),
    CX(u32, u32),
    CZ(u32, u32),
}

impl GateOp {
    /// Apply to `circuit`; two-qubit operands are encoded as (control, skew)
    /// so the targets are always distinct.
    fn apply(self, circuit: &mut Circuit) {
        match self {
            GateOp::H(q) => {
                let _ = circuit.h(QubitId(q));
            }
            GateOp::X(q) => {
                let _ = circuit.x(QubitId(q));
            }
            GateOp::Rx(q) => {
                let _ = circuit.rx(0.25, QubitId(q));
            }
            GateOp::Ry(q) => {
                let _ = circuit.ry(0.5, QubitId(q));
            }
            GateOp::Rz(q) => {
                let _ = circuit.rz(0.75, QubitId(q));
            }
            GateOp::CX(c, skew) => {
                let target = if skew >= c { skew + 1 } else { skew };
                let _ = circuit.cx(QubitId(c), QubitId(target));
            }
            GateOp::CZ(c, skew) => {
                let target = if skew >= c { skew + 1 } else { skew };
                let _ = circuit.cz(QubitId(c), QubitId(target));
            }
        }
    }
}

fn arb_gate_op(num_qubits: u32) -> impl Strategy<Value = GateOp> {
    prop_oneof![
        (0..num_qubits).prop_map(GateOp::H),
        (0..num_qubits).prop_map(GateOp::X),
        (0..num_qubits).prop_map(GateOp::Rx),
        (0..num_qubits).prop_map(GateOp::Ry),
        (0..num_qubits).prop_map(GateOp::Rz),
        (0..num_qubits, 0..num_qubits - 1).prop_map(|(c, s)| GateOp::CX(c, s)),
        (0..num_qubits, 0..num_qubits - 1).prop_map(|(c, s)| GateOp::CZ(c, s)),
    ]
}

/// Generate a random circuit with 2-5 qubits and 1-12 gates.
fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (2u32..=5).prop_flat_map(|num_qubits| {
        prop::collection::vec(arb_gate_op(num_qubits), 1..=12).prop_map(move |ops| {
            let mut circuit = Circuit::with_size("test", num_qubits, 0);
            for op in ops {
                op.apply(&mut circuit);
            }
            circuit
        })
    })
}

/// Pool with exactly one descriptor per arity, so a probability-1 sweep has
/// an exact expected outcome.
fn marker_pool() -> GatePool {
    GatePool::new(vec![
        GateDescriptor::new(1, 0, |_| StandardGate::X),
        GateDescriptor::new(2, 0, |_| StandardGate::CZ),
    ])
}

fn rotation_count(circuit: &Circuit) -> usize {
    circuit
        .instructions()
        .iter()
        .filter(|i| i.is_rotation_gate())
        .count()
}

proptest! {
    #[test]
    fn substitution_preserves_arity(
        (circuit, index) in arb_circuit().prop_flat_map(|c| {
            let len = c.num_gates();
            (Just(c), 0..len)
        }),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut mutated = circuit.clone();
        GateSubstitution::new(GatePool::standard())
            .apply_at(&mut mutated, index, &mut rng)
            .unwrap();

        prop_assert_eq!(mutated.num_gates(), circuit.num_gates());
        prop_assert_eq!(
            mutated.instruction(index).unwrap().num_qubits(),
            circuit.instruction(index).unwrap().num_qubits()
        );
        // Untouched positions are untouched.
        for i in (0..circuit.num_gates()).filter(|&i| i != index) {
            prop_assert_eq!(mutated.instruction(i), circuit.instruction(i));
        }
    }

    #[test]
    fn bitflip_probability_zero_is_identity(circuit in arb_circuit(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut mutated = circuit.clone();
        BitflipMutation::new(GatePool::standard(), 0.0)
            .apply(&mut mutated, &mut rng)
            .unwrap();
        prop_assert_eq!(mutated, circuit);
    }

    #[test]
    fn bitflip_probability_one_rewrites_every_position(
        circuit in arb_circuit(),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut mutated = circuit.clone();
        BitflipMutation::new(marker_pool(), 1.0)
            .apply(&mut mutated, &mut rng)
            .unwrap();

        prop_assert_eq!(mutated.num_gates(), circuit.num_gates());
        for (after, before) in mutated.instructions().iter().zip(circuit.instructions()) {
            let expected = if before.num_qubits() == 1 { "x" } else { "cz" };
            prop_assert_eq!(after.name(), expected);
        }
    }

    #[test]
    fn rotation_floor_holds_once_established(
        circuit in arb_circuit(),
        seed in any::<u64>(),
    ) {
        let mut circuit = circuit;
        // Establish the floor: one rotation per qubit.
        let floor = circuit.num_qubits();
        for q in 0..floor {
            circuit.rx(0.5, QubitId(q as u32)).unwrap();
        }
        prop_assert!(rotation_count(&circuit) >= floor);

        let mut rng = StdRng::seed_from_u64(seed);
        let site = RotationFloorSubstitution::new(GatePool::standard(), floor)
            .with_max_draws(10_000);
        for step in 0..20 {
            let index = (step * 13) % circuit.num_gates();
            site.apply_at(&mut circuit, index, &mut rng).unwrap();
            prop_assert!(rotation_count(&circuit) >= floor);
        }
    }

    #[test]
    fn layerflip_preserves_depth(
        circuit in arb_circuit(),
        prob in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut mutated = circuit.clone();
        LayerflipMutation::new(GatePool::standard(), prob)
            .apply(&mut mutated, &mut rng)
            .unwrap();
        prop_assert_eq!(mutated.depth(), circuit.depth());
        prop_assert_eq!(mutated.num_qubits(), circuit.num_qubits());
    }

    #[test]
    fn split_compose_round_trip(circuit in arb_circuit(), depth in 0usize..8) {
        let (head, tail) = circuit.split_at_depth(depth);
        let rejoined = Circuit::compose(circuit.name(), [head, tail]).unwrap();
        prop_assert_eq!(rejoined.instructions(), circuit.instructions());
    }

    #[test]
    fn bitflip_normalizer_bounds_depth(
        circuit in arb_circuit(),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut mutated = circuit.clone();
        BitflipMutation::new(GatePool::standard(), 0.5)
            .with_normalizer(ByDepth::new(2))
            .apply(&mut mutated, &mut rng)
            .unwrap();
        prop_assert!(mutated.depth() <= 2);
    }
}
