use std::fmt;
use std::time::Duration;

use crate::grid::Grid;
use crate::snake::Direction;
use crate::{Coord, Coords};

pub const DEFAULT_TICK: Duration = Duration::from_millis(100);
pub const DEFAULT_INITIAL_LENGTH: usize = 3;
pub const DEFAULT_DIRECTION: Direction = Direction::Right;
pub const MIN_GRID_SIDE: Coord = 2;

/// Everything the game loop needs to know, fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub grid: Grid,
    pub tick: Duration,
    pub initial_length: usize,
    pub direction: Direction,
    /// Seed for food placement. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn with_grid(grid: Grid) -> Self {
        GameConfig {
            grid,
            tick: DEFAULT_TICK,
            initial_length: DEFAULT_INITIAL_LENGTH,
            direction: DEFAULT_DIRECTION,
            seed: None,
        }
    }

    /// The head starts in the middle of the board.
    pub fn start_head(&self) -> Coords {
        self.grid.center()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (w, h) = (self.grid.width(), self.grid.height());
        if w < MIN_GRID_SIDE || h < MIN_GRID_SIDE {
            return Err(ConfigError::GridTooSmall { width: w, height: h });
        }
        if self.tick.is_zero() {
            return Err(ConfigError::ZeroTick);
        }
        if self.initial_length == 0 {
            return Err(ConfigError::EmptySnake);
        }

        let too_long = ConfigError::SnakeTooLong {
            length: self.initial_length,
            direction: self.direction,
        };
        let back = match Coord::try_from(self.initial_length) {
            Ok(len) => len - 1,
            Err(_) => return Err(too_long),
        };

        let (dr, dc) = self.direction.delta();
        let head = self.start_head();
        let tail = head
            .0
            .checked_sub(dr * back)
            .zip(head.1.checked_sub(dc * back));
        match tail {
            Some(tail) if self.grid.in_bounds(tail) => Ok(()),
            _ => Err(too_long),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    GridTooSmall { width: Coord, height: Coord },
    /// The terminal cannot fit the requested board plus its frame.
    TerminalTooSmall { needed: (u32, u32), available: (u16, u16) },
    SnakeTooLong { length: usize, direction: Direction },
    EmptySnake,
    ZeroTick,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridTooSmall { width, height } => write!(f,
                "a {}x{} grid is too small, both sides must be at least {}", width, height, MIN_GRID_SIDE),
            Self::TerminalTooSmall { needed, available } => write!(f,
                "the terminal is {}x{} but {}x{} is needed", available.0, available.1, needed.0, needed.1),
            Self::SnakeTooLong { length, direction } => write!(f,
                "a snake of length {} heading {} does not fit from the centre of the grid", length, direction),
            Self::EmptySnake => write!(f, "the initial snake length must be at least 1"),
            Self::ZeroTick => write!(f, "the tick interval must be at least 1 ms"),
        }
    }
}

impl std::error::Error for ConfigError {}
