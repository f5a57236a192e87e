use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::Cell;
use crate::state::GameState;
use crate::Coords;

/// No free cell is left for food: the snake covers the whole board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardFull;

impl fmt::Display for BoardFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no empty cell left to place food on")
    }
}

impl std::error::Error for BoardFull {}

/// Picks a cell uniformly among those the snake does not cover.
pub fn place<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Result<Coords, BoardFull> {
    let grid = state.grid();
    let choices: Vec<Coords> = grid
        .cells()
        .filter(|pos| grid.classify(*pos, state) != Cell::SnakeBody)
        .collect();

    choices.choose(rng).copied().ok_or(BoardFull)
}
