//! Boundary to the rigid-body physics engine
//!
//! The core never inspects simulation internals. It consumes contact-pair
//! notifications and on-demand body state, and issues three commands back:
//! create, remove, impulse. Anything implementing [`PhysicsPort`] can host a
//! session, including the in-memory [`crate::sim::TestbedPhysics`].

use glam::Vec2;

use super::entity::Tier;

/// Opaque, stable identity of a simulated body. Owned by the physics engine;
/// the core only compares handles for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub u64);

/// Snapshot of the body state the core is allowed to see
#[derive(Debug, Clone, Copy)]
pub struct BodyState {
    /// Center position (y grows downward)
    pub pos: Vec2,
    /// Magnitude of linear velocity
    pub linear_speed: f32,
    /// Magnitude of angular velocity
    pub angular_speed: f32,
}

/// Whether a contact was just detected or is carrying over from earlier ticks
///
/// Merge eligibility treats both phases identically: a same-tier pair may
/// rest against each other for several ticks before the resolution pass runs,
/// and the first-frame event can be missed entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    Began,
    Persisted,
}

/// One collision-pair notification from the physics engine
#[derive(Debug, Clone, Copy)]
pub struct ContactPair {
    pub a: BodyHandle,
    pub b: BodyHandle,
    pub phase: ContactPhase,
}

/// Minimal physics capability the core depends on
pub trait PhysicsPort {
    /// Create a body for a piece of the given tier at `pos`, returning its handle
    fn spawn_body(&mut self, tier: Tier, pos: Vec2) -> BodyHandle;

    /// Remove a body. Removing an unknown handle is a no-op.
    fn remove_body(&mut self, body: BodyHandle);

    /// Apply a one-shot impulse to a body
    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec2);

    /// Current state of a body, `None` if the handle is unknown
    fn body_state(&self, body: BodyHandle) -> Option<BodyState>;
}
