//! Player drop handling
//!
//! Rate-limits drop requests and hands accepted pieces to the physics
//! engine at the aim position. Rejected requests are silent no-ops: the
//! progression selector is untouched and no body is created.

use glam::Vec2;

use super::entity::{EntityId, EntityRegistry, Tier};
use super::physics::PhysicsPort;
use super::progression::ProgressionSelector;
use super::rng::GameRng;

/// Result of an accepted drop
#[derive(Debug, Clone, Copy)]
pub struct DropOutcome {
    pub id: EntityId,
    pub tier: Tier,
    /// Clamped x the piece actually spawned at
    pub x: f32,
}

/// Accepts or rejects player drop requests
#[derive(Debug)]
pub struct DropController {
    cooldown_ms: f64,
    spawn_y: f32,
    field_width: f32,
    last_drop_ms: Option<f64>,
}

impl DropController {
    pub fn new(cooldown_ms: f64, spawn_y: f32, field_width: f32) -> Self {
        Self {
            cooldown_ms,
            spawn_y,
            field_width,
            last_drop_ms: None,
        }
    }

    /// Try to drop the current piece at `aim_x`. Returns `None` while the
    /// anti-spam cooldown is running.
    pub fn request_drop(
        &mut self,
        aim_x: f32,
        now_ms: f64,
        selector: &mut ProgressionSelector,
        rng: &mut GameRng,
        registry: &mut EntityRegistry,
        physics: &mut dyn PhysicsPort,
    ) -> Option<DropOutcome> {
        if matches!(self.last_drop_ms, Some(t) if now_ms - t < self.cooldown_ms) {
            return None;
        }

        let tier = selector.advance(rng);
        // Keep the new piece clear of both walls
        let radius = tier.radius();
        let x = aim_x.clamp(radius, self.field_width - radius);

        let body = physics.spawn_body(tier, Vec2::new(x, self.spawn_y));
        let id = registry.spawn(tier, body, None);
        self.last_drop_ms = Some(now_ms);

        Some(DropOutcome { id, tier, x })
    }

    /// Forget the last drop timestamp (round reset)
    pub fn clear(&mut self) {
        self.last_drop_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DROP_COOLDOWN_MS, FIELD_WIDTH, SPAWN_Y};
    use crate::sim::testbed::TestbedPhysics;

    fn setup() -> (
        DropController,
        ProgressionSelector,
        GameRng,
        EntityRegistry,
        TestbedPhysics,
    ) {
        (
            DropController::new(DROP_COOLDOWN_MS, SPAWN_Y, FIELD_WIDTH),
            ProgressionSelector::new(),
            GameRng::seeded(11),
            EntityRegistry::new(),
            TestbedPhysics::new(FIELD_WIDTH, 640.0),
        )
    }

    #[test]
    fn test_accepted_drop_spawns_current_tier() {
        let (mut dropper, mut sel, mut rng, mut registry, mut physics) = setup();

        let out = dropper
            .request_drop(240.0, 0.0, &mut sel, &mut rng, &mut registry, &mut physics)
            .unwrap();
        assert_eq!(out.tier, Tier(1));
        assert_eq!(registry.len(), 1);

        let piece = registry.get(out.id).unwrap();
        assert_eq!(piece.tier, Tier(1));
        assert!(piece.last_merged_at.is_none());

        let state = physics.body_state(piece.body).unwrap();
        assert!((state.pos.x - 240.0).abs() < 1e-3);
        assert!((state.pos.y - SPAWN_Y).abs() < 1e-3);
    }

    #[test]
    fn test_rapid_second_drop_is_a_no_op() {
        let (mut dropper, mut sel, mut rng, mut registry, mut physics) = setup();

        assert!(
            dropper
                .request_drop(240.0, 0.0, &mut sel, &mut rng, &mut registry, &mut physics)
                .is_some()
        );
        let preview = (sel.current(), sel.next());

        // 199 ms later: rejected, selector untouched, nothing spawned
        let rejected =
            dropper.request_drop(240.0, 199.0, &mut sel, &mut rng, &mut registry, &mut physics);
        assert!(rejected.is_none());
        assert_eq!((sel.current(), sel.next()), preview);
        assert_eq!(registry.len(), 1);

        // 200 ms later: accepted again
        assert!(
            dropper
                .request_drop(240.0, 200.0, &mut sel, &mut rng, &mut registry, &mut physics)
                .is_some()
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_aim_clamped_to_walls_for_spawned_tier() {
        let (mut dropper, mut sel, mut rng, mut registry, mut physics) = setup();

        let left = dropper
            .request_drop(-50.0, 0.0, &mut sel, &mut rng, &mut registry, &mut physics)
            .unwrap();
        assert!((left.x - left.tier.radius()).abs() < 1e-3);

        let right = dropper
            .request_drop(
                FIELD_WIDTH + 50.0,
                300.0,
                &mut sel,
                &mut rng,
                &mut registry,
                &mut physics,
            )
            .unwrap();
        assert!((right.x - (FIELD_WIDTH - right.tier.radius())).abs() < 1e-3);
    }
}
