//! The seam between the game loop and whatever draws it and reads keys.

use std::io;

use crossterm::event::KeyEvent;
use crossterm::style::Color;

use crate::state::{GameOverReason, GameState, Phase};

/// Glyphs and colours used to draw the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Fixed head glyph. `None` draws an arrow pointing where the snake goes.
    pub head_char: Option<char>,
    pub body_char: char,
    pub food_char: char,
    pub background_char: char,
    /// Drawn over the whole snake once it has crashed.
    pub dead_char: char,
    pub snake_color: Color,
    pub food_color: Color,
    pub color_enabled: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            head_char: None,
            body_char: '#',
            food_char: '*',
            background_char: '.',
            dead_char: 'X',
            snake_color: Color::Green,
            food_color: Color::Red,
            color_enabled: true,
        }
    }
}

/// A single character cell on screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub color: Option<Color>,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph { ch: ' ', color: None };

    pub fn plain(ch: char) -> Self {
        Glyph { ch, color: None }
    }
}

/// Draws the game. Called once per tick with the state after that tick.
pub trait Render {
    /// Wipes the screen ready for a new game.
    fn clear(&mut self) -> io::Result<()>;

    fn render(&mut self, state: &GameState, config: &RenderConfig) -> io::Result<()>;

    /// Overlays a centred box of text until [`Render::hide_message`].
    fn show_message(&mut self, lines: &[&str]) -> io::Result<()>;

    fn hide_message(&mut self) -> io::Result<()>;
}

/// Where key presses come from.
pub trait KeySource {
    /// Next pending key, or `None` without waiting.
    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>>;

    /// Blocks until a key is pressed.
    fn wait_key(&mut self) -> io::Result<KeyEvent>;
}

/// The board as glyphs, row-major, one per grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Glyph>,
}

impl Frame {
    pub fn compose(state: &GameState, config: &RenderConfig) -> Self {
        let grid = state.grid();
        let tint = |color: Color| if config.color_enabled { Some(color) } else { None };
        let mut cells = vec![Glyph::plain(config.background_char); grid.area()];

        let crashed = matches!(
            state.phase(),
            Phase::GameOver(GameOverReason::HitWall) | Phase::GameOver(GameOverReason::HitSelf)
        );
        let snake = state.snake();

        for (i, pos) in snake.body().iter().enumerate() {
            let ch = if crashed {
                config.dead_char
            } else if i == 0 {
                config.head_char.unwrap_or_else(|| snake.head_char())
            } else {
                config.body_char
            };
            cells[grid.index_of(*pos)] = Glyph { ch, color: tint(config.snake_color) };
        }

        if let Some(food) = state.food() {
            cells[grid.index_of(food)] = Glyph { ch: config.food_char, color: tint(config.food_color) };
        }

        Frame { width: grid.width() as usize, height: grid.height() as usize, cells }
    }

    pub fn get(&self, row: usize, col: usize) -> Glyph {
        self.cells[row * self.width + col]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Glyph]> {
        self.cells.chunks(self.width)
    }
}

pub fn status_line(state: &GameState) -> String {
    let phase = match state.phase() {
        Phase::Running => "",
        Phase::Paused => " [paused]",
        Phase::GameOver(_) => " [game over]",
    };
    format!("Score: {}{} | arrows or wasd to move, p to pause, q to quit", state.score(), phase)
}

pub fn game_over_title(reason: GameOverReason) -> &'static str {
    match reason {
        GameOverReason::BoardFull => "You won!",
        GameOverReason::HitWall => "Game over! You hit the wall.",
        GameOverReason::HitSelf => "Game over! You bit yourself.",
    }
}
