use std::fmt;

use log::{debug, info, trace};
use rand::Rng;

use crate::config::GameConfig;
use crate::food::{self, BoardFull};
use crate::grid::Grid;
use crate::input::Action;
use crate::snake::{Direction, Snake};
use crate::Coords;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameOverReason {
    HitWall,
    HitSelf,
    /// The snake fills the board. This is the winning ending.
    BoardFull,
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameOverReason::HitWall => "the snake ran into the wall",
            GameOverReason::HitSelf => "the snake bit itself",
            GameOverReason::BoardFull => "the snake filled the board",
        };
        f.write_str(s)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    GameOver(GameOverReason),
}

/// What a single call to [`GameState::step`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    Moved,
    Ate,
    Paused,
    Resumed,
    /// Paused, and the input did not resume the game.
    Waiting,
    Over(GameOverReason),
    Quit,
}

#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    snake: Snake,
    food: Option<Coords>,
    score: u32,
    phase: Phase,
}

impl GameState {
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let snake = Snake::straight(config.start_head(), config.initial_length, config.direction);
        let mut state = GameState::from_parts(config.grid, snake, None);

        match food::place(&state, rng) {
            Ok(pos) => state.food = Some(pos),
            Err(BoardFull) => state.phase = Phase::GameOver(GameOverReason::BoardFull),
        }

        debug!("new game on {}x{} grid, food at {:?}", state.grid.width(), state.grid.height(), state.food);
        state
    }

    /// A running game with score zero made of the given pieces.
    pub fn from_parts(grid: Grid, snake: Snake, food: Option<Coords>) -> Self {
        GameState { grid, snake, food, score: 0, phase: Phase::Running }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Coords> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    /// Direction the snake last moved in. Keys are checked for reversal
    /// against this, not against a turn that has not been taken yet.
    pub fn heading(&self) -> Direction {
        self.snake.heading()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver(_))
    }

    /// Applies one tick's worth of input and, while running, moves the snake.
    ///
    /// `action` should come from [`crate::input::map_key`] for
    /// [`GameState::heading`] (or be `Ignore` when no key arrived). A `Move`
    /// back against the heading is dropped here as well. Pausing touches
    /// nothing but the phase.
    pub fn step<R: Rng + ?Sized>(&mut self, action: Action, rng: &mut R) -> Tick {
        let action = match action {
            Action::Move(dir) if dir == self.snake.heading().opposite() => Action::Ignore,
            Action::Quit => return Tick::Quit,
            other => other,
        };

        match self.phase {
            Phase::GameOver(reason) => return Tick::Over(reason),
            Phase::Paused => {
                return match action {
                    Action::Move(dir) => {
                        self.snake.set_direction(dir);
                        self.phase = Phase::Running;
                        info!("resumed heading {}", dir);
                        Tick::Resumed
                    }
                    _ => Tick::Waiting,
                };
            }
            Phase::Running => {}
        }

        match action {
            Action::Pause => {
                self.phase = Phase::Paused;
                info!("paused at score {}", self.score);
                return Tick::Paused;
            }
            Action::Move(dir) => self.snake.set_direction(dir),
            Action::Ignore | Action::Quit => {}
        }

        let new_head = self.snake.advance(self.snake.direction());
        let eating = self.food == Some(new_head);
        trace!("head {:?} -> {:?}", self.snake.head(), new_head);

        if !self.grid.in_bounds(new_head) {
            return self.end(GameOverReason::HitWall);
        }
        if self.snake.collides(new_head, !eating) {
            return self.end(GameOverReason::HitSelf);
        }

        if eating {
            self.snake.grow(new_head);
            self.score += 1;
            debug!("ate food at {:?}, score {}", new_head, self.score);

            match food::place(self, rng) {
                Ok(pos) => self.food = Some(pos),
                Err(BoardFull) => {
                    self.food = None;
                    return self.end(GameOverReason::BoardFull);
                }
            }
            Tick::Ate
        } else {
            self.snake.move_to(new_head);
            Tick::Moved
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn end(&mut self, reason: GameOverReason) -> Tick {
        info!("game over: {} (score {})", reason, self.score);
        self.phase = Phase::GameOver(reason);
        Tick::Over(reason)
    }
}
