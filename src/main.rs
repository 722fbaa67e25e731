mod config;
mod game;
mod input;
mod puzzle;

use anyhow::Result;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use std::io;
use tracing::info;

use config::{Args, Config};
use game::Game;

fn main() -> Result<()> {
    let config = Config::from(Args::parse());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.log))
        .with_writer(io::stderr)
        .init();

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut game = Game::new(stdin.lock(), stdout.lock(), config.clear);

    let outcome = game.run(&mut rng)?;
    info!(?outcome, solved = game.board().is_solved(), "game over");
    Ok(())
}
