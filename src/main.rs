//! Fruit Slicer entry point
//!
//! The browser build is driven from JS through `platform::web`. Natively
//! this runs a headless autopilot session and logs what happened.
//!
//! Usage: `fruit-slicer [seed] [preset] [max_ticks]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use fruit_slicer::consts::TICK_MS;
    use fruit_slicer::sim::{Autopilot, GameEvent, GameState};
    use fruit_slicer::{Tuning, TuningPreset};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);
    let preset = args
        .next()
        .and_then(|s| TuningPreset::parse(&s))
        .unwrap_or_default();
    let max_ticks = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(60 * 60 * 5);

    log::info!(
        "Fruit Slicer (native) demo: seed {}, preset {}",
        seed,
        preset.as_str()
    );

    let mut state = GameState::new(Tuning::from_preset(preset), seed);
    let pilot = Autopilot::default();
    state.start();

    for i in 0..max_ticks {
        let now = i as f64 * TICK_MS;
        let mut events = state.advance(now);
        events.extend(pilot.drive(&mut state, now));

        for event in &events {
            match event {
                GameEvent::PowerupSliced { kind, .. } => log::info!("Power-up: {}", kind.name()),
                GameEvent::LifeLost { kind, lives_left, .. } => {
                    log::info!("Missed {} ({} lives left)", kind.name(), lives_left)
                }
                GameEvent::GameEnded { final_score } => {
                    log::info!("Game over at {:.1}s", now / 1000.0);
                    println!("final score: {final_score}");
                }
                _ => log::debug!("{:?}", event),
            }
        }
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::GameEnded { .. }))
        {
            break;
        }
    }

    let stats = state.scoreboard.stats;
    println!(
        "score {} | sliced {} | power-ups {} | bombs {} | missed {}",
        state.score(),
        stats.fruits_sliced,
        stats.powerups_sliced,
        stats.bombs,
        stats.fruits_missed
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_main, this is just to satisfy the compiler
}
