//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - Time windows measured on a host-supplied monotonic millisecond clock
//! - No rendering or platform dependencies

pub mod drop;
pub mod entity;
pub mod loss;
pub mod merge;
pub mod physics;
pub mod progression;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod testbed;

pub use drop::{DropController, DropOutcome};
pub use entity::{Entity, EntityId, EntityRegistry, EntityView, Tier, TierInfo};
pub use loss::LossDetector;
pub use merge::{MergeCandidate, MergeCommit, MergeEngine};
pub use physics::{BodyHandle, BodyState, ContactPair, ContactPhase, PhysicsPort};
pub use progression::ProgressionSelector;
pub use rng::GameRng;
pub use scoring::{MergeScore, ScoreBoard};
pub use session::{GameEvent, GameSession};
pub use testbed::TestbedPhysics;
