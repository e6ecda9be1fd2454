//! Pastel entry point
//!
//! Headless demo: plays a seeded game with a simulated player, saves the
//! result and prints the stats screen.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use pastel::persistence::{
    JsonRecordStore, MemoryRecordStore, PreferenceFile, PreferenceStore, RecordStore,
};
use pastel::sim::{GameEvent, GamePhase, GameSession, PhaseTimers, TickInput, tick};
use pastel::stats::{self, GameRecord};
use pastel::{GameConfig, Point};

/// Fixed step for the demo loop
const STEP: Duration = Duration::from_millis(50);

#[derive(Debug, Parser)]
#[command(name = "pastel", about = "Remember a color, find it again")]
struct Args {
    /// Game seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Rounds per game
    #[arg(long)]
    rounds: Option<u32>,
    /// Field width in pixels
    #[arg(long)]
    width: Option<u32>,
    /// Field height in pixels
    #[arg(long)]
    height: Option<u32>,
    /// Directory for records and preferences (in-memory if omitted)
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Game config JSON
    #[arg(long)]
    config: Option<PathBuf>,
    /// Flip the sound preference before playing
    #[arg(long)]
    toggle_sound: bool,
    /// How far off the simulated player guesses, in pixels
    #[arg(long, default_value_t = 120.0)]
    skill: f32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Pastel (headless) starting...");

    let mut config = args.config.as_deref().map(GameConfig::load).unwrap_or_default();
    if let Some(rounds) = args.rounds {
        config.total_rounds = rounds;
    }
    if let Some(width) = args.width {
        config.field_width = width;
    }
    if let Some(height) = args.height {
        config.field_height = height;
    }

    let mut prefs = match &args.data_dir {
        Some(dir) => PreferenceFile::open(dir.join(PreferenceFile::FILE_NAME)),
        None => PreferenceFile::in_memory(),
    };
    if args.toggle_sound {
        prefs.toggle_sound()?;
    }
    let sound = prefs.sound_enabled();

    let mut store: Box<dyn RecordStore> = match &args.data_dir {
        Some(dir) => Box::new(JsonRecordStore::in_dir(dir)),
        None => Box::new(MemoryRecordStore::new()),
    };

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let total = play(seed, &config, args.skill.abs(), sound, store.as_mut());

    let snapshot = stats::load_snapshot(store.as_ref());
    println!("Final score: {}", total);
    println!("Best: {}  Games played: {}", snapshot.highest_score, snapshot.games_played);
    for entry in snapshot.history.iter().take(10) {
        println!("  {}  {:>4}", entry.date, entry.score);
    }
    Ok(())
}

/// Play one full game with a simulated player, returning the total score
fn play(
    seed: u64,
    config: &GameConfig,
    skill: f32,
    sound: bool,
    store: &mut dyn RecordStore,
) -> u32 {
    let mut session = GameSession::new(seed, config.clone());
    let mut timers = PhaseTimers::new(config);
    // Player noise is separate from the game seed stream
    let mut hand = Pcg32::seed_from_u64(seed ^ 0x5eed);
    session.start();
    log::info!("Game initialized with seed: {}", seed);

    let mut total = 0;
    while session.phase() != GamePhase::Finished {
        let mut input = TickInput::default();
        match session.phase() {
            GamePhase::Guess => {
                if let Some(round) = session.current_round() {
                    let target = round.target_point();
                    let jitter = Point::new(
                        hand.random_range(-skill..=skill),
                        hand.random_range(-skill..=skill),
                    );
                    let field = round.field();
                    let guess = (target + jitter).clamp(
                        Point::ZERO,
                        Point::new(field.width() as f32, field.height() as f32),
                    );
                    input.pointer = Some(guess);
                    input.confirm = true;
                    if sound {
                        log::debug!("*click*");
                    }
                }
            }
            GamePhase::RoundDone => input.advance = true,
            _ => {}
        }

        tick(&mut session, &mut timers, &input, STEP);

        for event in session.drain_events() {
            match event {
                GameEvent::RoundScored { round, score, .. } => {
                    let result = session
                        .rounds()
                        .get(round as usize - 1)
                        .and_then(|r| r.result());
                    if let Some(result) = result {
                        println!("Round {:>2}: {:>3}  {}", round, score, result.phrase);
                    }
                }
                GameEvent::GameFinished { total_score } => {
                    total = total_score;
                    stats::record_finished_game(store, GameRecord::now(total_score));
                }
                GameEvent::GameStarted { .. } | GameEvent::PhaseChanged { .. } => {}
            }
        }
    }
    total
}
