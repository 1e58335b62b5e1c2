#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a Danger Noodle game in the terminal.

mod options;
mod script;

use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use danger_noodle_core::{DeathCause, GameSnapshot, WELCOME_BANNER};
use danger_noodle_engine::Engine;
use danger_noodle_rendering::TextCanvas;
use danger_noodle_world::query;
use tracing::info;
use tracing_subscriber::EnvFilter;

use self::{options::CliArgs, script::Script};

/// Entry point for the Danger Noodle command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    let settings = args.resolve()?;
    settings
        .game
        .validate()
        .context("invalid game configuration")?;

    let mut script = match &args.script {
        Some(letters) => letters
            .parse::<Script>()
            .context("failed to parse --script")?,
        None => Script::default(),
    };

    println!("{WELCOME_BANNER}");
    info!(
        width = settings.game.width,
        height = settings.game.height,
        solid_walls = settings.game.solid_walls,
        tick_ms = settings.game.tick_duration_ms,
        "starting game"
    );

    let canvas = TextCanvas::new(settings.game.grid(), &settings.palette);
    let mut engine = Engine::new(settings.game, canvas, settings.palette);
    engine.start();
    if args.frames {
        println!("{}\n", engine.sink());
    }

    while query::is_running(engine.world()) && query::ticks(engine.world()) < args.max_ticks {
        if let Some(direction) = script.next_step() {
            engine.request_direction(direction);
        }

        if args.realtime {
            let Some(wait) = engine.time_until_next_tick() else {
                break;
            };
            thread::sleep(wait);
            let _ = engine.advance(wait);
        } else {
            engine.tick();
        }

        if args.frames && query::is_running(engine.world()) {
            println!("{}\n", engine.sink());
        }
    }

    if query::is_running(engine.world()) {
        info!(max_ticks = args.max_ticks, "tick limit reached");
        engine.stop(false);
    }

    print_summary(&engine.snapshot());
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_summary(snapshot: &GameSnapshot) {
    let outcome = match snapshot.snake.as_ref().and_then(|snake| snake.death) {
        Some(DeathCause::SelfCollision) => "ran into its own body",
        Some(DeathCause::WallCollision) => "ran into a wall",
        None => "still alive",
    };

    println!("ticks: {}", snapshot.ticks);
    println!("movements: {}", snapshot.movements);
    println!("apples eaten: {}", snapshot.apples_eaten);
    println!(
        "length: {}",
        snapshot.snake.as_ref().map_or(0, |snake| snake.body.len())
    );
    println!("outcome: {outcome}");
}
