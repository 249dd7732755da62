//! Overflow detection
//!
//! A run ends when a piece has come to rest with its top edge above the
//! loss line and stayed that way. Transient spawn-time overlap crosses the
//! line every drop, so the raw condition is debounced: the breach must hold
//! continuously for the full debounce window before the detector reports
//! loss. The report is level-triggered; the session edge-triggers the
//! game-over event.

use super::entity::EntityRegistry;
use super::physics::PhysicsPort;

/// Watches pieces near the spawn line for sustained rest
#[derive(Debug)]
pub struct LossDetector {
    line_y: f32,
    speed_eps: f32,
    spin_eps: f32,
    debounce_ms: f64,
    /// First moment the current continuous breach was observed
    breach_since: Option<f64>,
}

impl LossDetector {
    pub fn new(line_y: f32, speed_eps: f32, spin_eps: f32, debounce_ms: f64) -> Self {
        Self {
            line_y,
            speed_eps,
            spin_eps,
            debounce_ms,
            breach_since: None,
        }
    }

    /// Whether a breach is currently being timed
    pub fn breached(&self) -> bool {
        self.breach_since.is_some()
    }

    /// Evaluate the overflow condition against current piece states.
    /// Returns true while a breach has held for the full debounce window.
    /// Call every tick; the breach timer resets the instant no piece
    /// qualifies.
    pub fn evaluate(
        &mut self,
        registry: &EntityRegistry,
        physics: &dyn PhysicsPort,
        now_ms: f64,
    ) -> bool {
        let at_risk = registry.iter().any(|e| {
            let Some(state) = e.state(physics) else {
                return false;
            };
            let top = state.pos.y - e.tier.radius();
            top < self.line_y
                && state.linear_speed < self.speed_eps
                && state.angular_speed < self.spin_eps
        });

        if !at_risk {
            self.breach_since = None;
            return false;
        }

        let since = *self.breach_since.get_or_insert(now_ms);
        now_ms - since >= self.debounce_ms
    }

    /// Forget any running breach timer (round reset)
    pub fn clear(&mut self) {
        self.breach_since = None;
    }
}
