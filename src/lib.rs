//! Melon Drop - merge-resolution core for a drop-and-merge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (merge resolution, progression, scoring)
//! - `tuning`: Data-driven game balance
//!
//! The crate sits between a 2D rigid-body physics engine and the screen. The
//! physics engine is an injected capability ([`sim::PhysicsPort`]); rendering,
//! audio, and best-score persistence are host concerns fed by [`sim::GameEvent`]s.
//!
//! Coordinate convention: screen space, y grows downward. "Upward" impulses
//! and offsets are negative y.

pub mod sim;
pub mod tuning;

pub use sim::{GameEvent, GameSession, PhysicsPort, Tier};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the testbed and demo (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Highest tier a piece can reach; merging two of these caps out
    pub const MAX_TIER: u8 = 11;

    /// Playfield dimensions (simulation units)
    pub const FIELD_WIDTH: f32 = 480.0;
    pub const FIELD_HEIGHT: f32 = 640.0;

    /// Height at which fresh pieces enter the field
    pub const SPAWN_Y: f32 = 60.0;
    /// Pieces resting with their top edge above this line are overflowing
    pub const LOSS_LINE_Y: f32 = 110.0;

    /// Post-merge grace period before a new piece may merge again (ms)
    pub const MERGE_COOLDOWN_MS: f64 = 150.0;
    /// Rolling window during which consecutive merges build a combo (ms)
    pub const COMBO_WINDOW_MS: f64 = 500.0;
    /// Minimum spacing between accepted drops (ms)
    pub const DROP_COOLDOWN_MS: f64 = 200.0;
    /// How long an overflow must hold before the run is lost (ms)
    pub const LOSS_DEBOUNCE_MS: f64 = 1000.0;

    /// Successor pieces spawn this far above the contact point
    pub const MERGE_LIFT: f32 = 6.0;
    /// Upward impulse applied to a freshly merged piece
    pub const MERGE_POP_IMPULSE: f32 = 90.0;

    /// Linear speed below which a piece counts as resting
    pub const REST_SPEED_EPS: f32 = 2.0;
    /// Angular speed below which a piece counts as resting
    pub const REST_SPIN_EPS: f32 = 0.35;

    /// Combo bonus per extra merge inside the window
    pub const COMBO_STEP: f32 = 0.10;
    /// Combo bonus ceiling
    pub const COMBO_CAP: f32 = 0.5;

    /// Repeated-entry bag the next-piece tier is drawn from. Low tiers
    /// dominate; tiers above 5 only ever arise from merges.
    pub const SPAWN_BAG: [u8; 9] = [1, 1, 1, 2, 2, 3, 3, 4, 5];
}
