mod cli;
mod config;
mod error;
mod food;
mod game;
mod grid;
mod input;
mod logger;
mod render;
mod snake;
mod state;
mod term;

use std::process::exit;

use clap::Parser;
use log::{error, info};

use crate::game::SnakeGame;
use crate::state::Phase;
use crate::term::TermManager;

pub type Coord = i32;
/// A cell as (row, column).
pub type Coords = (Coord, Coord);

fn main() {
    logger::init_logger();
    let args = cli::Args::parse();

    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("snake: {}", e);
        exit(1);
    }
}

fn run(args: &cli::Args) -> error::Result<()> {
    let (config, render_config) = args.config(term::terminal_size()?)?;
    info!("{}x{} board, tick {:?}", config.grid.width(), config.grid.height(), config.tick);

    let mut term = TermManager::new(&config.grid)?;
    term.setup()?;

    let mut game = SnakeGame::new(term, config, render_config);
    let last = game.run();
    // Dropping the game hands the terminal back before printing anything
    drop(game);

    if let Some(state) = last? {
        match state.phase() {
            Phase::GameOver(reason) => println!("Game over: {}, score: {}", reason, state.score()),
            _ => println!("Quit, score: {}", state.score()),
        }
    }

    Ok(())
}
