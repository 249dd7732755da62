//! Property coverage for the arithmetic-heavy corners of the core

use proptest::prelude::*;

use melon_drop::consts::{DROP_COOLDOWN_MS, FIELD_WIDTH, SPAWN_Y};
use melon_drop::sim::{
    DropController, EntityRegistry, GameRng, ProgressionSelector, ScoreBoard, TestbedPhysics, Tier,
};

proptest! {
    /// Combo-boosted deltas never leave [base, 1.5 * base], and the total
    /// never decreases, whatever the merge timing looks like.
    #[test]
    fn merge_deltas_bounded_and_total_monotone(
        gaps in prop::collection::vec(0.0f64..2000.0, 1..40),
        tier in 1u8..=11,
    ) {
        let mut board = ScoreBoard::new(0, 500.0);
        let base = (1u64 << tier) * 10;
        let mut now = 0.0;
        let mut prev_total = 0;

        for gap in gaps {
            now += gap;
            let s = board.register_merge(Tier(tier), now);
            prop_assert!(s.delta >= base);
            prop_assert!(s.delta <= (base as f32 * 1.5).round() as u64);
            prop_assert!(s.total > prev_total);
            prev_total = s.total;
        }
    }

    /// Whatever the seed, fresh pieces only ever come from the low-tier bag.
    #[test]
    fn progression_only_spawns_bag_tiers(seed in any::<u64>()) {
        let mut rng = GameRng::seeded(seed);
        let mut sel = ProgressionSelector::new();
        for _ in 0..200 {
            let t = sel.advance(&mut rng);
            prop_assert!((1..=5).contains(&t.0));
            prop_assert!((1..=5).contains(&sel.next().0));
        }
    }

    /// Accepted drops always spawn clear of both walls, whatever the aim.
    #[test]
    fn drops_spawn_inside_walls(aim in -1000.0f32..1000.0, seed in any::<u64>()) {
        let mut dropper = DropController::new(DROP_COOLDOWN_MS, SPAWN_Y, FIELD_WIDTH);
        let mut sel = ProgressionSelector::new();
        let mut rng = GameRng::seeded(seed);
        let mut registry = EntityRegistry::new();
        let mut physics = TestbedPhysics::new(FIELD_WIDTH, 640.0);

        let out = dropper
            .request_drop(aim, 0.0, &mut sel, &mut rng, &mut registry, &mut physics)
            .unwrap();
        let radius = out.tier.radius();
        prop_assert!(out.x >= radius);
        prop_assert!(out.x <= FIELD_WIDTH - radius);
    }
}
