//! Data-driven game balance
//!
//! Every time window and playfield knob the core uses, gathered in one
//! serializable struct so hosts can rebalance without code changes.
//! Defaults come from [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance knobs for one game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Rolling combo window (ms)
    pub combo_window_ms: f64,
    /// Post-merge anti-cascade cooldown (ms)
    pub merge_cooldown_ms: f64,
    /// Minimum spacing between accepted drops (ms)
    pub drop_cooldown_ms: f64,
    /// How long an overflow must hold before the run ends (ms)
    pub loss_debounce_ms: f64,

    /// Playfield dimensions (simulation units)
    pub field_width: f32,
    pub field_height: f32,
    /// Height fresh pieces spawn at
    pub spawn_y: f32,
    /// Overflow line near the spawn area
    pub loss_line_y: f32,

    /// Upward offset applied to merge-created pieces
    pub merge_lift: f32,
    /// Upward impulse applied to merge-created pieces
    pub merge_pop_impulse: f32,

    /// Rest thresholds for loss detection
    pub rest_speed_eps: f32,
    pub rest_spin_eps: f32,

    /// Repeated-entry bag fresh piece tiers are drawn from
    pub spawn_bag: Vec<u8>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            combo_window_ms: COMBO_WINDOW_MS,
            merge_cooldown_ms: MERGE_COOLDOWN_MS,
            drop_cooldown_ms: DROP_COOLDOWN_MS,
            loss_debounce_ms: LOSS_DEBOUNCE_MS,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            spawn_y: SPAWN_Y,
            loss_line_y: LOSS_LINE_Y,
            merge_lift: MERGE_LIFT,
            merge_pop_impulse: MERGE_POP_IMPULSE,
            rest_speed_eps: REST_SPEED_EPS,
            rest_spin_eps: REST_SPIN_EPS,
            spawn_bag: SPAWN_BAG.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bag_spawns_low_tiers_only() {
        let tuning = Tuning::default();
        assert!(!tuning.spawn_bag.is_empty());
        assert!(tuning.spawn_bag.iter().all(|&t| (1..=5).contains(&t)));
    }
}
