//! Game pieces and the registry that tracks them
//!
//! The registry is the single source of truth mapping live physics bodies to
//! game metadata. Only the merge engine and the drop controller mutate it;
//! everything else (loss detector, renderer) reads.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::{BodyHandle, BodyState, PhysicsPort};
use crate::consts::MAX_TIER;

/// Fixed attributes of one tier
#[derive(Debug, Clone, Copy)]
pub struct TierInfo {
    /// Display/collision radius in simulation units
    pub radius: f32,
    /// Base mass factor handed to the physics engine
    pub mass: f32,
    /// Sprite/palette identity (0xRRGGBB)
    pub color: u32,
}

/// Per-tier attribute table, smallest piece first
const TIERS: [TierInfo; MAX_TIER as usize] = [
    TierInfo { radius: 13.0, mass: 1.0, color: 0xE5484D },
    TierInfo { radius: 17.0, mass: 1.7, color: 0xF76B15 },
    TierInfo { radius: 23.0, mass: 3.1, color: 0xA969F0 },
    TierInfo { radius: 30.0, mass: 5.3, color: 0xFFC53D },
    TierInfo { radius: 38.0, mass: 8.5, color: 0xFF8037 },
    TierInfo { radius: 47.0, mass: 13.0, color: 0xD6409F },
    TierInfo { radius: 57.0, mass: 19.2, color: 0xFFE066 },
    TierInfo { radius: 68.0, mass: 27.3, color: 0xFFADC4 },
    TierInfo { radius: 80.0, mass: 37.8, color: 0xF5D90A },
    TierInfo { radius: 93.0, mass: 51.1, color: 0x9BE564 },
    TierInfo { radius: 107.0, mass: 67.7, color: 0x2F9E44 },
];

/// Discrete size/value rank of a piece, 1..=[`MAX_TIER`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tier(pub u8);

impl Tier {
    pub const MIN: Tier = Tier(1);
    pub const MAX: Tier = Tier(MAX_TIER);

    /// Attribute row for this tier
    pub fn info(self) -> TierInfo {
        TIERS[(self.0 - 1) as usize]
    }

    /// Display/collision radius
    pub fn radius(self) -> f32 {
        self.info().radius
    }

    /// Tier produced when two pieces of this tier merge. Caps at [`Tier::MAX`]:
    /// two max-tier pieces collapse into a single max-tier piece.
    pub fn successor(self) -> Tier {
        Tier((self.0 + 1).min(MAX_TIER))
    }

    pub fn is_max(self) -> bool {
        self.0 == MAX_TIER
    }
}

/// Stable identity of a piece. Monotonically increasing, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// One live game piece
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub tier: Tier,
    /// Handle of the owning physics body (opaque to the core)
    pub body: BodyHandle,
    /// When this piece was created by a merge, if it was. Drives the
    /// anti-cascade cooldown.
    pub last_merged_at: Option<f64>,
}

impl Entity {
    /// Whether the post-merge cooldown is still running at `now_ms`
    pub fn in_merge_cooldown(&self, now_ms: f64, cooldown_ms: f64) -> bool {
        matches!(self.last_merged_at, Some(t) if now_ms - t < cooldown_ms)
    }

    /// Position snapshot from the physics engine, if the body still exists
    pub fn state(&self, physics: &dyn PhysicsPort) -> Option<BodyState> {
        physics.body_state(self.body)
    }
}

/// Read-only view of a piece for renderers
#[derive(Debug, Clone, Copy)]
pub struct EntityView {
    pub id: EntityId,
    pub tier: Tier,
    pub pos: Vec2,
}

/// Live pieces, kept sorted by id for deterministic iteration
#[derive(Debug)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    next_id: u64,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Register a new piece and return its id. Ids increase monotonically, so
    /// the backing vector stays sorted by construction.
    pub fn spawn(&mut self, tier: Tier, body: BodyHandle, last_merged_at: Option<f64>) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.push(Entity {
            id,
            tier,
            body,
            last_merged_at,
        });
        id
    }

    /// Remove and return a piece. `None` if already gone.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Resolve a physics body back to its piece. `None` for non-piece bodies
    /// such as walls and the floor.
    pub fn by_body(&self, body: BodyHandle) -> Option<&Entity> {
        self.entities.iter().find(|e| e.body == body)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop every piece (round reset). Does not touch physics bodies; the
    /// caller removes those through the port.
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Renderer snapshot: id, tier and position of every live piece
    pub fn views(&self, physics: &dyn PhysicsPort) -> Vec<EntityView> {
        self.entities
            .iter()
            .filter_map(|e| {
                let state = e.state(physics)?;
                Some(EntityView {
                    id: e.id,
                    tier: e.tier,
                    pos: state.pos,
                })
            })
            .collect()
    }
}
