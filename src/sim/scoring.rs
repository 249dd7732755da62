//! Score accumulation and the combo multiplier
//!
//! Each resolved merge is worth `2^tier * 10` points, boosted by a rolling
//! combo window: +10% per extra merge landed within 500 ms of the window's
//! start, capped at +50%. The window state machine is either idle or
//! `active(start, count)`; expiry is evaluated lazily on the next merge.

use serde::{Deserialize, Serialize};

use super::entity::Tier;
use crate::consts::{COMBO_CAP, COMBO_STEP};

/// An in-flight combo. `merges >= 1` whenever this exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct ComboWindow {
    start_ms: f64,
    merges: u32,
}

/// Outcome of registering one merge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeScore {
    /// Points awarded for this merge (combo bonus included)
    pub delta: u64,
    /// Session total after the award
    pub total: u64,
    /// True when the session total just passed the known best score
    pub new_best: bool,
}

/// Session score, combo state, and the best-score high-water mark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBoard {
    score: u64,
    best: u64,
    combo: Option<ComboWindow>,
    window_ms: f64,
}

impl ScoreBoard {
    /// Fresh board. `best` is the persisted high score the host loaded at
    /// startup; the board only reports when the session beats it.
    pub fn new(best: u64, window_ms: f64) -> Self {
        Self {
            score: 0,
            best,
            combo: None,
            window_ms,
        }
    }

    /// Session score so far. Monotonically non-decreasing.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Best score known to this session (persisted value or better)
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Consecutive merges in the active combo window, 0 when idle
    pub fn combo_count(&self) -> u32 {
        self.combo.map_or(0, |c| c.merges)
    }

    /// Record a merge into `successor` at `now_ms` and return the award
    pub fn register_merge(&mut self, successor: Tier, now_ms: f64) -> MergeScore {
        let merges = match self.combo {
            Some(ref mut w) if now_ms - w.start_ms <= self.window_ms => {
                w.merges += 1;
                w.merges
            }
            _ => {
                self.combo = Some(ComboWindow {
                    start_ms: now_ms,
                    merges: 1,
                });
                1
            }
        };

        let base = (1u64 << successor.0) * 10;
        let bonus = ((merges - 1) as f32 * COMBO_STEP).min(COMBO_CAP);
        let delta = (base as f32 * (1.0 + bonus)).round() as u64;

        self.score += delta;
        let new_best = self.score > self.best;
        if new_best {
            self.best = self.score;
        }

        MergeScore {
            delta,
            total: self.score,
            new_best,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::COMBO_WINDOW_MS;

    fn board() -> ScoreBoard {
        ScoreBoard::new(0, COMBO_WINDOW_MS)
    }

    #[test]
    fn test_isolated_merge_base_value() {
        // 2^3 * 10 = 80 for a tier-3 successor with no combo
        let mut b = board();
        assert_eq!(b.register_merge(Tier(3), 0.0).delta, 80);
    }

    #[test]
    fn test_combo_ramp_within_window() {
        // Merges at t=0,100,200,300 into tier 2 (base 40): 0/10/20/30% bonus
        let mut b = board();
        assert_eq!(b.register_merge(Tier(2), 0.0).delta, 40);
        assert_eq!(b.register_merge(Tier(2), 100.0).delta, 44);
        assert_eq!(b.register_merge(Tier(2), 200.0).delta, 48);
        assert_eq!(b.register_merge(Tier(2), 300.0).delta, 52);
    }

    #[test]
    fn test_combo_resets_after_gap() {
        let mut b = board();
        b.register_merge(Tier(2), 0.0);
        b.register_merge(Tier(2), 100.0);
        b.register_merge(Tier(2), 200.0);
        b.register_merge(Tier(2), 300.0);
        // 600 ms after the window started at t=0: fresh window, 0% bonus
        assert_eq!(b.register_merge(Tier(2), 900.0).delta, 40);
        assert_eq!(b.combo_count(), 1);
    }

    #[test]
    fn test_combo_measured_from_window_start() {
        // The window anchors at its first merge; a merge 501 ms after the
        // start restarts even if the previous merge was recent.
        let mut b = board();
        b.register_merge(Tier(1), 0.0);
        b.register_merge(Tier(1), 450.0);
        let s = b.register_merge(Tier(1), 501.0);
        assert_eq!(s.delta, 20);
        assert_eq!(b.combo_count(), 1);
    }

    #[test]
    fn test_bonus_caps_at_fifty_percent() {
        let mut b = board();
        let mut last = 0;
        for i in 0..10 {
            last = b.register_merge(Tier(1), i as f64 * 10.0).delta;
        }
        // base 20, capped at +50%
        assert_eq!(last, 30);
    }

    #[test]
    fn test_score_monotonic_and_best_flag() {
        let mut b = ScoreBoard::new(100, COMBO_WINDOW_MS);
        let s1 = b.register_merge(Tier(2), 0.0); // 40
        assert!(!s1.new_best);
        let s2 = b.register_merge(Tier(3), 1000.0); // 80 -> 120
        assert!(s2.new_best);
        assert_eq!(b.best(), 120);
        assert!(s2.total > s1.total);
    }
}
