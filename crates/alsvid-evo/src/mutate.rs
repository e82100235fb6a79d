//! Structural mutation operators over circuits.
//!
//! Three levels of variation, each a configuration struct with a stateless
//! `apply` taking the circuit and a random number generator:
//!
//! - [`GateSubstitution`] / [`RotationFloorSubstitution`] replace the gate at
//!   one position with an arity-compatible draw from the pool.
//! - [`BitflipMutation`] / [`RotationFloorBitflip`] sweep every position,
//!   substituting each with a configured probability.
//! - [`LayerflipMutation`] replaces whole depth-layers with freshly generated
//!   ones, preserving the circuit's depth.
//!
//! All operators mutate the circuit in place behind the `&mut` borrow they
//! hold for the duration of the call; callers needing the pre-mutation
//! circuit must clone it first.

use alsvid_ir::{Circuit, Instruction, IrError, QubitId, StandardGate};
use rand::Rng;
use tracing::debug;

use crate::error::{EvoError, EvoResult};
use crate::normalizer::{ByDepth, Normalizer};
use crate::pool::{GateClass, GateDescriptor, GatePool};
use crate::random::RandomCircuit;

/// Rejection-sample a pool gate matching `arity`, with an extra acceptance
/// predicate on the drawn descriptor.
///
/// With `max_draws = None` this loops until a draw is accepted; a pool with
/// no descriptor for an arity present in the circuit therefore never
/// terminates. That hazard is the caller's responsibility; configure a draw
/// bound to turn it into a [`EvoError::DrawsExhausted`] error instead.
fn draw_compatible<R: Rng>(
    pool: &GatePool,
    arity: usize,
    tag: usize,
    max_draws: Option<usize>,
    accept: &dyn Fn(&GateDescriptor) -> bool,
    rng: &mut R,
) -> EvoResult<StandardGate> {
    let mut draws = 0usize;
    loop {
        if let Some(max) = max_draws {
            if draws >= max {
                return Err(EvoError::DrawsExhausted { attempts: max });
            }
        }
        draws += 1;
        let descriptor = pool.choose(rng).ok_or(EvoError::EmptyPool)?;
        let gate = descriptor.instantiate(tag);
        if gate.num_qubits() as usize == arity && accept(descriptor) {
            return Ok(gate);
        }
    }
}

/// Single-site gate substitution.
///
/// Replaces the operation at a given position with one drawn uniformly from
/// the pool, redrawing until the qubit arity matches the existing operation.
/// The atomic primitive the probabilistic operators build on.
pub struct GateSubstitution {
    pool: GatePool,
    max_draws: Option<usize>,
}

impl GateSubstitution {
    /// Create a substitution operator over `pool` with unbounded redraws.
    pub fn new(pool: GatePool) -> Self {
        Self {
            pool,
            max_draws: None,
        }
    }

    /// Bound the rejection-sampling loop to `max_draws` attempts.
    #[must_use]
    pub fn with_max_draws(mut self, max_draws: usize) -> Self {
        self.max_draws = Some(max_draws);
        self
    }

    /// Replace the operation at `index` in place.
    ///
    /// The replacement keeps the position's qubit binding: a single-qubit
    /// replacement takes the first operand, a two-qubit replacement the first
    /// two. An out-of-range index is a boundary violation surfaced directly.
    pub fn apply_at<R: Rng>(
        &self,
        circuit: &mut Circuit,
        index: usize,
        rng: &mut R,
    ) -> EvoResult<()> {
        let Some(current) = circuit.instruction(index) else {
            return Err(IrError::IndexOutOfRange {
                index,
                len: circuit.num_gates(),
            }
            .into());
        };
        let arity = current.num_qubits();
        let qubits = current.qubits.clone();

        let gate = draw_compatible(&self.pool, arity, index, self.max_draws, &|_| true, rng)?;

        // A two-qubit acceptance implies a two-operand placement; the take(2)
        // shortfall branch only fires when arity bookkeeping upstream is
        // already broken, and then replace() rejects the placement.
        let rebound: Vec<QubitId> = match gate.num_qubits() {
            1 => vec![qubits[0]],
            2 => qubits.iter().copied().take(2).collect(),
            _ => qubits.clone(),
        };
        debug!(index, gate = gate.name(), "substituted gate");
        circuit.replace(index, Instruction::gate(gate, rebound))?;
        Ok(())
    }
}

/// Single-site gate substitution holding a rotation-gate floor.
///
/// Accepts a draw only if it is itself a rotation gate, or if the position
/// being replaced is not a rotation gate and the circuit already holds at
/// least `rotation_floor` rotation gates elsewhere. Once the floor is
/// reached, the rotation-gate count never drops below it.
pub struct RotationFloorSubstitution {
    pool: GatePool,
    rotation_floor: usize,
    max_draws: Option<usize>,
}

impl RotationFloorSubstitution {
    /// Create a floor-holding substitution operator; the floor is the
    /// circuit's qubit count in intended use.
    pub fn new(pool: GatePool, rotation_floor: usize) -> Self {
        Self {
            pool,
            rotation_floor,
            max_draws: None,
        }
    }

    /// Bound the rejection-sampling loop to `max_draws` attempts.
    #[must_use]
    pub fn with_max_draws(mut self, max_draws: usize) -> Self {
        self.max_draws = Some(max_draws);
        self
    }

    /// Replace the operation at `index` in place, holding the floor.
    ///
    /// The replacement reuses the position's operand list unmodified; the
    /// acceptance loop already guarantees arity equality.
    pub fn apply_at<R: Rng>(
        &self,
        circuit: &mut Circuit,
        index: usize,
        rng: &mut R,
    ) -> EvoResult<()> {
        let rotations = circuit
            .instructions()
            .iter()
            .filter(|i| i.is_rotation_gate())
            .count();
        let Some(current) = circuit.instruction(index) else {
            return Err(IrError::IndexOutOfRange {
                index,
                len: circuit.num_gates(),
            }
            .into());
        };
        let current_is_rotation = current.is_rotation_gate();
        let arity = current.num_qubits();
        let qubits = current.qubits.clone();

        let floor_met = rotations >= self.rotation_floor;
        let gate = draw_compatible(
            &self.pool,
            arity,
            index,
            self.max_draws,
            &|descriptor| {
                descriptor.class() == GateClass::Rotation || (!current_is_rotation && floor_met)
            },
            rng,
        )?;
        debug!(
            index,
            gate = gate.name(),
            rotations,
            floor = self.rotation_floor,
            "substituted gate under rotation floor"
        );
        circuit.replace(index, Instruction::gate(gate, qubits))?;
        Ok(())
    }
}

/// Whole-circuit probabilistic gate substitution.
///
/// Sweeps every position in order, substituting each with probability
/// `prob`; the visit set is fixed before the first edit. An optional
/// normalizer runs once on the final circuit.
pub struct BitflipMutation {
    site: GateSubstitution,
    prob: f64,
    normalizer: Option<Box<dyn Normalizer>>,
}

impl BitflipMutation {
    /// Create a bitflip operator over `pool` with per-position probability
    /// `prob`.
    ///
    /// # Panics
    ///
    /// Panics if `prob` is not in `[0, 1]`.
    pub fn new(pool: GatePool, prob: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&prob),
            "Mutation probability must be in [0, 1]"
        );
        Self {
            site: GateSubstitution::new(pool),
            prob,
            normalizer: None,
        }
    }

    /// Run `normalizer` on the circuit after the sweep.
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: impl Normalizer + 'static) -> Self {
        self.normalizer = Some(Box::new(normalizer));
        self
    }

    /// Bound the per-site rejection-sampling loop.
    #[must_use]
    pub fn with_max_draws(mut self, max_draws: usize) -> Self {
        self.site = self.site.with_max_draws(max_draws);
        self
    }

    /// Mutate `circuit` in place.
    pub fn apply<R: Rng>(&self, circuit: &mut Circuit, rng: &mut R) -> EvoResult<()> {
        let num_gates = circuit.num_gates();
        for index in 0..num_gates {
            let u: f64 = rng.r#gen();
            if u < self.prob {
                self.site.apply_at(circuit, index, rng)?;
            }
        }
        if let Some(normalizer) = &self.normalizer {
            normalizer.normalize(circuit);
        }
        Ok(())
    }
}

/// Whole-circuit probabilistic substitution holding a rotation-gate floor.
///
/// The constrained counterpart of [`BitflipMutation`]: every substitution
/// goes through [`RotationFloorSubstitution`], and the normalizer always
/// runs.
pub struct RotationFloorBitflip {
    site: RotationFloorSubstitution,
    prob: f64,
    normalizer: Box<dyn Normalizer>,
}

impl RotationFloorBitflip {
    /// Create a floor-holding bitflip operator.
    ///
    /// # Panics
    ///
    /// Panics if `prob` is not in `[0, 1]`.
    pub fn new(
        pool: GatePool,
        prob: f64,
        rotation_floor: usize,
        normalizer: impl Normalizer + 'static,
    ) -> Self {
        assert!(
            (0.0..=1.0).contains(&prob),
            "Mutation probability must be in [0, 1]"
        );
        Self {
            site: RotationFloorSubstitution::new(pool, rotation_floor),
            prob,
            normalizer: Box::new(normalizer),
        }
    }

    /// Bound the per-site rejection-sampling loop.
    #[must_use]
    pub fn with_max_draws(mut self, max_draws: usize) -> Self {
        self.site = self.site.with_max_draws(max_draws);
        self
    }

    /// Mutate `circuit` in place.
    pub fn apply<R: Rng>(&self, circuit: &mut Circuit, rng: &mut R) -> EvoResult<()> {
        let num_gates = circuit.num_gates();
        for index in 0..num_gates {
            let u: f64 = rng.r#gen();
            if u < self.prob {
                self.site.apply_at(circuit, index, rng)?;
            }
        }
        self.normalizer.normalize(circuit);
        Ok(())
    }
}

/// Layer-level substitution.
///
/// For each depth offset of the circuit, with probability `prob`, excises
/// the layer at that offset, splices in a freshly generated one, and
/// truncates back to the depth the circuit had on entry. Accepted
/// replacements accumulate: each operates on the result of the previous one,
/// but the depth budget never drifts because truncation always targets the
/// entry depth.
pub struct LayerflipMutation {
    prob: f64,
    source: RandomCircuit,
}

impl LayerflipMutation {
    /// Create a layerflip operator generating replacement layers from `pool`.
    ///
    /// # Panics
    ///
    /// Panics if `prob` is not in `[0, 1]`.
    pub fn new(pool: GatePool, prob: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&prob),
            "Mutation probability must be in [0, 1]"
        );
        Self {
            prob,
            source: RandomCircuit::new(pool),
        }
    }

    /// Mutate `circuit` in place.
    pub fn apply<R: Rng>(&self, circuit: &mut Circuit, rng: &mut R) -> EvoResult<()> {
        let standard_depth = circuit.depth();
        for index in 0..standard_depth {
            let u: f64 = rng.r#gen();
            if u >= self.prob {
                continue;
            }
            let (head, tail) = circuit.split_at_depth(index);
            // The suffix's own first layer is the one being replaced.
            let (_, rest) = tail.split_at_depth(1);
            let layer = self
                .source
                .generate(circuit.num_qubits() as u32, 1, rng)?;
            let mut composed = Circuit::compose(circuit.name(), [head, layer, rest])?;
            ByDepth::new(standard_depth).normalize(&mut composed);
            debug!(offset = index, depth = standard_depth, "replaced layer");
            *circuit = composed;
        }
        Ok(())
    }
}
