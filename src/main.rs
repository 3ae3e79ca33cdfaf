mod config;
mod food;
mod game;
mod grid;
mod input;
mod snake;
mod term;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::exit;
use std::sync::{mpsc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::style::{self, Color};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::GameConfig;
use game::{Outcome, SnakeGame, START_DIRECTION};
use input::Steering;
use term::{RawKeys, TermManager};

pub type TermInt = u16;
pub type Coords = (u16, u16);

#[derive(Parser)]
#[command(name = "snake")]
#[command(version, about = "Snake in the terminal, with wrap-around edges")]
struct Cli {
    /// Settings file (defaults to ./snake.toml when it exists)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file; the screen belongs to the game
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = GameConfig::load(cli.config.as_deref())?;
    info!(?config, "configuration loaded");

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut term = TermManager::new()?;
    let steering = Steering::new(START_DIRECTION);
    let (quit_tx, quit_rx) = mpsc::channel();
    let mut game = SnakeGame::new(term.grid(), config, steering.clone(), rng);

    let result = term.setup()
        .and_then(|_| input::spawn(RawKeys, steering, quit_tx))
        .and_then(|_reader| game.run(&mut term, &quit_rx));

    // The terminal goes back to normal whichever way the game ended.
    let restored = term.restore();
    let outcome = result?;
    restored?;

    let (message, status) = finish(outcome);
    if let Some(line) = message {
        println!("{}", line);
    }
    if status != 0 {
        exit(status);
    }

    Ok(())
}

/// Final line and exit status. Quitting leaves no score behind.
fn finish(outcome: Outcome) -> (Option<String>, i32) {
    match outcome {
        Outcome::GameOver { score } => (
            Some(format!("Game over! Your score: {}", style::style(score).with(Color::Red))),
            0,
        ),
        Outcome::Quit => (None, 1),
    }
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => return Ok(()),
    };

    let file = File::create(path)
        .with_context(|| format!("Error creating log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_over_reports_score_and_succeeds() {
        let (message, status) = finish(Outcome::GameOver { score: 7 });
        let line = message.unwrap();

        assert_eq!(status, 0);
        assert!(line.starts_with("Game over! Your score: "));
        assert_eq!(line, format!("Game over! Your score: {}", style::style(7u32).with(Color::Red)));
        assert!(line.contains('7'));
    }

    #[test]
    fn quit_is_silent_and_fails() {
        assert_eq!(finish(Outcome::Quit), (None, 1));
    }
}
