//! Merge resolution engine
//!
//! Contact pairs stream in from the physics engine all tick long; commits
//! happen in one batch per tick. The two-phase shape is what keeps the
//! simulation consistent: the eligibility filter runs against live state as
//! events arrive, the resolution pass re-validates against whatever is left
//! when it finally runs. A candidate that lost its entities to an earlier
//! candidate in the same pass is dropped silently, not an error.
//!
//! Within one pass candidates commit in strict FIFO order. When three or
//! more equal-tier pieces touch in the same tick, the earliest-detected
//! contact wins and exactly one merge commits; the order is part of the
//! engine's contract.

use std::collections::{HashSet, VecDeque};

use glam::Vec2;

use super::entity::{EntityId, EntityRegistry, Tier};
use super::physics::{ContactPair, PhysicsPort};

/// A provisional pairing of two same-tier pieces detected via contact
#[derive(Debug, Clone, Copy)]
pub struct MergeCandidate {
    pub a: EntityId,
    pub b: EntityId,
    /// Approximate contact point (midpoint of the two piece centers)
    pub contact: Vec2,
}

/// One committed merge, reported back to the session
#[derive(Debug, Clone, Copy)]
pub struct MergeCommit {
    /// Tier of the piece the merge created
    pub successor: Tier,
    /// Where the merge happened (for floating score text / sound panning)
    pub contact: Vec2,
    /// The piece the merge created
    pub created: EntityId,
}

/// Queues merge candidates between resolution passes and commits them
#[derive(Debug)]
pub struct MergeEngine {
    queue: VecDeque<MergeCandidate>,
    /// Pieces already staged in the current queue. A piece can only be
    /// spent once, so a reserved piece is ineligible for further candidates
    /// until the pass ends.
    reserved: HashSet<EntityId>,
    cooldown_ms: f64,
    lift: f32,
    pop_impulse: f32,
}

impl MergeEngine {
    pub fn new(cooldown_ms: f64, lift: f32, pop_impulse: f32) -> Self {
        Self {
            queue: VecDeque::new(),
            reserved: HashSet::new(),
            cooldown_ms,
            lift,
            pop_impulse,
        }
    }

    /// Number of candidates waiting for the next resolution pass
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Eligibility filter and enqueue. Called for every contact pair the
    /// physics engine reports, begin and persist phases alike.
    pub fn observe_contact(
        &mut self,
        pair: &ContactPair,
        registry: &EntityRegistry,
        physics: &dyn PhysicsPort,
        now_ms: f64,
    ) {
        // Non-piece bodies (walls, floor) resolve to nothing and are ignored
        let Some(a) = registry.by_body(pair.a) else {
            return;
        };
        let Some(b) = registry.by_body(pair.b) else {
            return;
        };
        if a.id == b.id || a.tier != b.tier {
            return;
        }
        // Pieces fresh out of a merge sit overlapping their neighbors for a
        // few frames; the cooldown keeps them from chaining instantly.
        if a.in_merge_cooldown(now_ms, self.cooldown_ms)
            || b.in_merge_cooldown(now_ms, self.cooldown_ms)
        {
            return;
        }
        // A piece staged in the current queue cannot be committed twice
        if self.reserved.contains(&a.id) || self.reserved.contains(&b.id) {
            return;
        }

        let (Some(sa), Some(sb)) = (physics.body_state(a.body), physics.body_state(b.body)) else {
            return;
        };

        self.reserved.insert(a.id);
        self.reserved.insert(b.id);
        self.queue.push_back(MergeCandidate {
            a: a.id,
            b: b.id,
            contact: (sa.pos + sb.pos) * 0.5,
        });
    }

    /// Resolution pass: drain every queued candidate in FIFO order and
    /// commit the ones that survive re-validation. Runs once per tick,
    /// after the physics step.
    pub fn resolve(
        &mut self,
        registry: &mut EntityRegistry,
        physics: &mut dyn PhysicsPort,
        now_ms: f64,
    ) -> Vec<MergeCommit> {
        let mut commits = Vec::new();

        while let Some(candidate) = self.queue.pop_front() {
            // Either piece may have been spent by an earlier candidate in
            // this same drain; tiers are immutable, so the equality check
            // mostly guards against exactly that.
            let (Some(a), Some(b)) = (registry.get(candidate.a), registry.get(candidate.b)) else {
                continue;
            };
            if a.tier != b.tier {
                continue;
            }

            let successor = a.tier.successor();
            let (body_a, body_b) = (a.body, b.body);

            registry.remove(candidate.a);
            registry.remove(candidate.b);
            physics.remove_body(body_a);
            physics.remove_body(body_b);

            // Spawn slightly above the contact point and pop upward so the
            // new piece separates from remaining neighbors instead of
            // instantly re-contacting.
            let spawn = candidate.contact + Vec2::new(0.0, -self.lift);
            let body = physics.spawn_body(successor, spawn);
            let created = registry.spawn(successor, body, Some(now_ms));
            physics.apply_impulse(body, Vec2::new(0.0, -self.pop_impulse));

            commits.push(MergeCommit {
                successor,
                contact: candidate.contact,
                created,
            });
        }

        self.reserved.clear();
        commits
    }

    /// Forget queued candidates and reservations (round reset)
    pub fn clear(&mut self) {
        self.queue.clear();
        self.reserved.clear();
    }
}
