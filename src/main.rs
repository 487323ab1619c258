//! Ball Destruction entry point
//!
//! Native headless driver: the autopilot supplies input, the session runs
//! at the fixed tick (paced on the wall clock with `--realtime`), and the
//! outcome is logged. Windowing and drawing belong to a front end that
//! consumes `Session::snapshot`.

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;

use ball_destruction::autopilot::Autopilot;
use ball_destruction::clock::FixedStep;
use ball_destruction::{AudioManager, GamePhase, Session, Settings};

#[derive(Parser, Debug)]
#[command(author, version, about = "Turret arcade shooter (headless demo)", long_about = None)]
struct Args {
    /// Settings JSON file; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Run seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,
    /// Pace ticks on the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,
    /// Stop after this many ticks even if the game is still running
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,
    /// Write the final render snapshot as JSON
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Ball Destruction (native) starting...");

    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let seed = args.seed.or(settings.seed).unwrap_or_else(clock_seed);

    let audio = AudioManager::new(&settings.audio);
    let mut session = Session::new(&settings, seed, Box::new(audio))?;
    let mut pilot = Autopilot::new();

    let phase = if args.realtime {
        run_realtime(&mut session, &mut pilot, &settings, args.max_ticks)
    } else {
        run_flat_out(&mut session, &mut pilot, args.max_ticks)
    };

    match phase {
        GamePhase::Won => log::info!("You Win! Final score {}", session.score()),
        GamePhase::Lost(reason) => {
            log::info!("You Lose! ({:?}) Final score {}", reason, session.score())
        }
        GamePhase::Playing => log::warn!(
            "Stopped after {} ticks with the game still running (score {})",
            args.max_ticks,
            session.score()
        ),
    }

    if let Some(path) = &args.snapshot {
        let json = serde_json::to_string_pretty(&session.snapshot())?;
        std::fs::write(path, json)
            .with_context(|| format!("writing snapshot to {}", path.display()))?;
        log::info!("Snapshot written to {}", path.display());
    }

    Ok(())
}

/// One tick: autopilot intents, then the simulation step
fn step(session: &mut Session, pilot: &mut Autopilot, last_score: &mut u32) -> GamePhase {
    let input = pilot.decide(session.arena());
    session.apply_input(&input);
    let summary = session.tick();
    if summary.score != *last_score {
        log::info!("Score: {}", summary.score);
        *last_score = summary.score;
    }
    summary.phase
}

fn run_flat_out(session: &mut Session, pilot: &mut Autopilot, max_ticks: u64) -> GamePhase {
    let mut last_score = session.score();
    for _ in 0..max_ticks {
        let phase = step(session, pilot, &mut last_score);
        if phase.is_over() {
            return phase;
        }
    }
    session.phase()
}

fn run_realtime(
    session: &mut Session,
    pilot: &mut Autopilot,
    settings: &Settings,
    max_ticks: u64,
) -> GamePhase {
    let mut clock = FixedStep::new(
        Duration::from_millis(settings.timing.tick_ms),
        settings.timing.max_substeps,
    );
    let mut last_score = session.score();
    let mut ticks = 0;
    let mut last_time = Instant::now();

    while ticks < max_ticks {
        std::thread::sleep(clock.until_next());
        let now = Instant::now();
        let due = clock.advance(now - last_time);
        last_time = now;

        for _ in 0..due {
            let phase = step(session, pilot, &mut last_score);
            ticks += 1;
            if phase.is_over() {
                return phase;
            }
        }
    }
    session.phase()
}

/// Seed from the wall clock when none was given
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}
