//! Alsvid Evolutionary Variation Operators
//!
//! This crate provides the genetic-variation primitives of the Alsvid
//! evolutionary search: structural mutation operators over `alsvid-ir`
//! circuits, plus the gate pools, dividers, normalizers, and random-circuit
//! generation they are built from. Selection, fitness evaluation, and
//! population management live in the outer loop driving these operators.
//!
//! # Operators
//!
//! - [`GateSubstitution`] — replace the gate at one position with an
//!   arity-compatible draw from a [`GatePool`].
//! - [`RotationFloorSubstitution`] — the same, holding a minimum
//!   rotation-gate count.
//! - [`BitflipMutation`] / [`RotationFloorBitflip`] — probabilistic sweep
//!   over every position, with an optional (resp. mandatory) [`Normalizer`].
//! - [`LayerflipMutation`] — replace whole depth-layers with freshly
//!   generated ones, preserving circuit depth.
//!
//! Every operator takes the circuit by `&mut` (mutation is in place) and an
//! injected `rand::Rng`, so seeded runs are fully reproducible.
//!
//! # Example
//!
//! ```rust
//! use alsvid_evo::{BitflipMutation, GatePool, normalizer::ByDepth};
//! use alsvid_ir::{Circuit, QubitId};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut circuit = Circuit::with_size("candidate", 2, 0);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let mutation = BitflipMutation::new(GatePool::standard(), 0.3)
//!     .with_normalizer(ByDepth::new(4));
//! let mut rng = StdRng::seed_from_u64(42);
//! mutation.apply(&mut circuit, &mut rng).unwrap();
//!
//! assert_eq!(circuit.num_gates(), 2);
//! ```
//!
//! # Hazards
//!
//! The site substitution loop rejection-samples the pool until an
//! arity-compatible draw is accepted. A pool missing a descriptor for an
//! arity present in the circuit therefore never terminates (likewise a pool
//! with no rotation descriptors once the rotation floor binds). Configure
//! [`GateSubstitution::with_max_draws`] to turn the hazard into an explicit
//! [`EvoError::DrawsExhausted`] error when working with restrictive pools.

pub mod divider;
pub mod error;
pub mod mutate;
pub mod normalizer;
pub mod pool;
pub mod random;

pub use error::{EvoError, EvoResult};
pub use mutate::{
    BitflipMutation, GateSubstitution, LayerflipMutation, RotationFloorBitflip,
    RotationFloorSubstitution,
};
pub use normalizer::Normalizer;
pub use pool::{GateClass, GateDescriptor, GatePool};
pub use random::RandomCircuit;
