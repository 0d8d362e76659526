//! Astro Duel entry point
//!
//! Headless demo host: runs the simulation at the fixed timestep with a
//! scripted pilot and reports what a real shell would forward to its
//! renderer, score display, and audio engine.
//!
//! Usage: `astro-duel [seed] [seconds]`. Set `ASTRO_DUEL_CONFIG` to a JSON
//! config file to override the defaults.

use std::process::ExitCode;

use astro_duel::consts;
use astro_duel::{Game, GameConfig, GameEvent};

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = match args.next().map(|arg| arg.parse()) {
        Some(Ok(seed)) => seed,
        Some(Err(_)) => {
            eprintln!("usage: astro-duel [seed] [seconds]");
            return ExitCode::FAILURE;
        }
        None => 42,
    };
    let seconds: u32 = match args.next().map(|arg| arg.parse()) {
        Some(Ok(seconds)) => seconds,
        Some(Err(_)) => {
            eprintln!("usage: astro-duel [seed] [seconds]");
            return ExitCode::FAILURE;
        }
        None => 30,
    };

    let config = match load_config() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("bad config: {error}");
            return ExitCode::FAILURE;
        }
    };

    log::info!("Astro Duel starting: seed {seed}, {seconds}s simulated");
    run(config, seed, seconds * 60);
    ExitCode::SUCCESS
}

/// Config from `ASTRO_DUEL_CONFIG` (a JSON file path), or the defaults
fn load_config() -> Result<GameConfig, Box<dyn std::error::Error>> {
    match std::env::var_os("ASTRO_DUEL_CONFIG") {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            let config = GameConfig::from_json(&json)?;
            log::info!("config loaded from {}", path.to_string_lossy());
            Ok(config)
        }
        None => Ok(GameConfig::default()),
    }
}

fn run(config: GameConfig, seed: u64, ticks: u32) {
    let mut game = Game::new(config, seed);
    game.start();

    let mut redraws: u64 = 0;
    let mut booms: u64 = 0;

    for tick_index in 0..ticks {
        script_input(&mut game, tick_index);
        game.tick();

        for event in game.drain_events() {
            match event {
                GameEvent::ScoreChanged { player, value } => {
                    log::info!("score: player {player} -> {value}");
                }
                GameEvent::Sound(cue) => {
                    log::debug!("sound: {}", cue.name());
                    booms += 1;
                }
                GameEvent::RedrawRequested => redraws += 1,
            }
        }
    }

    let scores = game.scores();
    println!("ran {ticks} ticks ({redraws} redraws)");
    println!(
        "score {} - {}, {} enemies on screen, {booms} booms played",
        scores[0],
        scores[1],
        game.enemy_count()
    );
}

/// Scripted pilot: thrust in bursts, sweep the turn keys back and forth.
/// Enough motion to cross the viewport and meet spawned enemies.
fn script_input(game: &mut Game, tick_index: u32) {
    let phase = tick_index % 240;
    game.set_key(consts::KEY_THRUST, phase < 150);
    game.set_key(consts::KEY_TURN_LEFT, (60..120).contains(&phase));
    game.set_key(consts::KEY_TURN_RIGHT, (180..220).contains(&phase));
}
