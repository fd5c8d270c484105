//! Petri Dish headless runner
//!
//! Plays a seeded demo session with random input and logs the HUD line.
//! Set `RUST_LOG=info` (or `debug`) to watch it.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use petri_dish::sim::{Game, RandomInput};
use petri_dish::{Tuning, TuningError};

#[derive(Parser)]
#[command(name = "petri-dish")]
#[command(about = "Tick-based petri dish arena")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a headless demo game
    Run {
        /// Seed for the world and the demo input
        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Stop after this many ticks (the game may end sooner)
        #[arg(long, default_value_t = 10_000)]
        ticks: u64,

        /// Balance table (JSON); defaults are used when omitted
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// Log the status line every N ticks
        #[arg(long, default_value_t = 500)]
        report_every: u64,

        /// Print the final session as JSON instead of the HUD line
        #[arg(long)]
        json: bool,
    },
    /// Print the default balance table as JSON
    DumpTuning,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Tuning(#[from] TuningError),

    #[error("failed to encode session as JSON: {0}")]
    Output(#[source] serde_json::Error),
}

fn run(
    seed: u64,
    ticks: u64,
    tuning: Option<PathBuf>,
    report_every: u64,
    json: bool,
) -> Result<(), CliError> {
    let tuning = match tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    let mut game = Game::new(tuning, seed);
    let mut input = RandomInput::new(seed);
    while game.ticks() < ticks && !game.is_over() {
        game.step(&mut input);
        let effects = game.drain_effects();
        if !effects.is_empty() {
            log::trace!("Tick {}: {:?}", game.ticks(), effects);
        }
        if report_every > 0 && game.ticks() % report_every == 0 {
            if let Some(line) = game.session.status_line() {
                log::info!("[{:>6}] {}", game.ticks(), line);
            }
        }
    }

    log::info!(
        "Seed {} stopped after {} ticks{}",
        game.seed(),
        game.ticks(),
        if game.is_over() { " (game over)" } else { "" }
    );
    if json {
        let json = serde_json::to_string_pretty(&game.session).map_err(CliError::Output)?;
        println!("{json}");
    } else if let Some(line) = game.session.status_line() {
        println!("{line}");
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            seed,
            ticks,
            tuning,
            report_every,
            json,
        } => run(seed, ticks, tuning, report_every, json),
        Commands::DumpTuning => Tuning::default()
            .to_json()
            .map(|json| println!("{json}"))
            .map_err(CliError::from),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
