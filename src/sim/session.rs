//! One game session wired end to end
//!
//! Owns a single instance of every core component and runs them in the
//! fixed per-tick order: the host steps physics, feeds contacts in, then
//! calls [`GameSession::tick`] (resolution pass, then loss check) and
//! renders from the snapshot. Pausing is simply not calling `tick`; every
//! window is timestamp-based, so a long pause expires cooldowns on resume.

use super::drop::DropController;
use super::entity::{EntityRegistry, EntityView, Tier};
use super::loss::LossDetector;
use super::merge::MergeEngine;
use super::physics::{ContactPair, PhysicsPort};
use super::progression::ProgressionSelector;
use super::rng::GameRng;
use super::scoring::ScoreBoard;
use crate::tuning::Tuning;

/// Fire-and-forget notifications for audio, VFX, and persistence hosts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A piece was dropped at `x`
    Dropped { tier: Tier, x: f32 },
    /// A merge committed at (`x`, `y`), worth `score_delta` points
    Merged {
        tier: Tier,
        x: f32,
        y: f32,
        score_delta: u64,
    },
    /// The session score passed the known best score
    BestScore { score: u64 },
    /// The playfield overflowed; the run is over
    GameOver { score: u64 },
}

/// The complete game core behind one playfield
pub struct GameSession {
    tuning: Tuning,
    rng: GameRng,
    registry: EntityRegistry,
    selector: ProgressionSelector,
    merges: MergeEngine,
    scoring: ScoreBoard,
    loss: LossDetector,
    dropper: DropController,
    over: bool,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Start a session. `seed: None` self-seeds; `best_score` is the
    /// persisted high score the host loaded at startup.
    pub fn new(seed: Option<u64>, best_score: u64, tuning: Tuning) -> Self {
        let rng = match seed {
            Some(s) => GameRng::seeded(s),
            None => GameRng::from_entropy(),
        };
        log::info!("new session, seed {}", rng.seed());

        Self {
            rng,
            registry: EntityRegistry::new(),
            selector: ProgressionSelector::with_bag(tuning.spawn_bag.clone()),
            merges: MergeEngine::new(
                tuning.merge_cooldown_ms,
                tuning.merge_lift,
                tuning.merge_pop_impulse,
            ),
            scoring: ScoreBoard::new(best_score, tuning.combo_window_ms),
            loss: LossDetector::new(
                tuning.loss_line_y,
                tuning.rest_speed_eps,
                tuning.rest_spin_eps,
                tuning.loss_debounce_ms,
            ),
            dropper: DropController::new(
                tuning.drop_cooldown_ms,
                tuning.spawn_y,
                tuning.field_width,
            ),
            over: false,
            events: Vec::new(),
            tuning,
        }
    }

    /// Player input path. Silent no-op while the drop cooldown runs or the
    /// session is over.
    pub fn request_drop(&mut self, aim_x: f32, now_ms: f64, physics: &mut dyn PhysicsPort) {
        if self.over {
            return;
        }
        if let Some(out) = self.dropper.request_drop(
            aim_x,
            now_ms,
            &mut self.selector,
            &mut self.rng,
            &mut self.registry,
            physics,
        ) {
            self.events.push(GameEvent::Dropped {
                tier: out.tier,
                x: out.x,
            });
        }
    }

    /// Physics event path. Feed every contact pair the engine reports,
    /// begin and persist phases alike.
    pub fn observe_contact(&mut self, pair: &ContactPair, physics: &dyn PhysicsPort, now_ms: f64) {
        if self.over {
            return;
        }
        self.merges
            .observe_contact(pair, &self.registry, physics, now_ms);
    }

    /// Per-tick work, called after the physics step: resolution pass, then
    /// loss evaluation. No-op once the session is terminal.
    pub fn tick(&mut self, now_ms: f64, physics: &mut dyn PhysicsPort) {
        if self.over {
            return;
        }

        for commit in self.merges.resolve(&mut self.registry, physics, now_ms) {
            let score = self.scoring.register_merge(commit.successor, now_ms);
            self.events.push(GameEvent::Merged {
                tier: commit.successor,
                x: commit.contact.x,
                y: commit.contact.y,
                score_delta: score.delta,
            });
            if score.new_best {
                self.events.push(GameEvent::BestScore { score: score.total });
            }
        }

        if self.loss.evaluate(&self.registry, physics, now_ms) {
            self.over = true;
            log::info!("game over, score {}", self.scoring.score());
            self.events.push(GameEvent::GameOver {
                score: self.scoring.score(),
            });
        }
    }

    /// Take the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Reset to a fresh round, removing every piece's body through the
    /// port. The best-score high-water mark survives.
    pub fn reset(&mut self, seed: Option<u64>, physics: &mut dyn PhysicsPort) {
        for entity in self.registry.iter() {
            physics.remove_body(entity.body);
        }
        self.registry.clear();
        self.merges.clear();
        self.loss.clear();
        self.dropper.clear();
        self.selector = ProgressionSelector::with_bag(self.tuning.spawn_bag.clone());
        self.scoring = ScoreBoard::new(self.scoring.best(), self.tuning.combo_window_ms);
        self.rng.reset(seed);
        self.over = false;
        self.events.clear();
        log::info!("session reset, seed {}", self.rng.seed());
    }

    /// Read-only snapshot of live pieces for the renderer
    pub fn entities(&self, physics: &dyn PhysicsPort) -> Vec<EntityView> {
        self.registry.views(physics)
    }

    pub fn score(&self) -> u64 {
        self.scoring.score()
    }

    pub fn best_score(&self) -> u64 {
        self.scoring.best()
    }

    pub fn combo_count(&self) -> u32 {
        self.scoring.combo_count()
    }

    /// Tier the next accepted drop will spawn
    pub fn current_tier(&self) -> Tier {
        self.selector.current()
    }

    /// Preview tier shown to the player
    pub fn next_tier(&self) -> Tier {
        self.selector.next()
    }

    pub fn piece_count(&self) -> usize {
        self.registry.len()
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}
