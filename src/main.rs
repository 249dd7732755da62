//! Melon Drop headless demo
//!
//! Drives a full session against the in-memory physics testbed with an
//! auto-dropping player, then prints a JSON run summary. Useful for
//! eyeballing balance changes and for exercising the core outside a host:
//!
//! ```sh
//! RUST_LOG=info melon-drop [seed] [seconds]
//! ```

use serde::Serialize;

use melon_drop::consts::SIM_DT;
use melon_drop::sim::{GameEvent, GameSession, TestbedPhysics};
use melon_drop::tuning::Tuning;

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    drops: u32,
    merges: u32,
    highest_tier: u8,
    score: u64,
    game_over: bool,
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok());
    let seconds: f64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(60.0);

    let tuning = Tuning::default();
    let field_width = tuning.field_width;
    let mut physics = TestbedPhysics::new(tuning.field_width, tuning.field_height);
    let mut session = GameSession::new(seed, 0, tuning);

    let mut summary = RunSummary {
        seed: session.seed(),
        ticks: 0,
        drops: 0,
        merges: 0,
        highest_tier: 0,
        score: 0,
        game_over: false,
    };

    let total_ticks = (seconds / SIM_DT as f64) as u64;
    let mut next_drop_ms = 0.0_f64;

    for tick in 0..total_ticks {
        let now_ms = tick as f64 * SIM_DT as f64 * 1000.0;

        // Sweep the aim across the field so pieces spread out
        if now_ms >= next_drop_ms {
            let sweep = ((tick as f32 * 0.013).sin() * 0.5 + 0.5) * field_width;
            session.request_drop(sweep, now_ms, &mut physics);
            next_drop_ms = now_ms + 350.0;
        }

        physics.step(SIM_DT);
        for pair in physics.take_contacts() {
            session.observe_contact(&pair, &physics, now_ms);
        }
        session.tick(now_ms, &mut physics);

        for event in session.drain_events() {
            match event {
                GameEvent::Dropped { .. } => summary.drops += 1,
                GameEvent::Merged { tier, .. } => {
                    summary.merges += 1;
                    summary.highest_tier = summary.highest_tier.max(tier.0);
                }
                GameEvent::BestScore { score } => {
                    log::debug!("best score now {score}");
                }
                GameEvent::GameOver { score } => {
                    log::info!("playfield overflowed at score {score}");
                    summary.game_over = true;
                }
            }
        }

        summary.ticks = tick + 1;
        if session.is_over() {
            break;
        }
    }

    summary.score = session.score();
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("summary serialization failed: {err}"),
    }
}
