use std::time::Duration;

use clap::Parser;
use crossterm::style::Color;

use crate::config::{ConfigError, GameConfig, DEFAULT_DIRECTION, DEFAULT_INITIAL_LENGTH};
use crate::grid::Grid;
use crate::render::RenderConfig;
use crate::snake::Direction;
use crate::term::{required_size, TermCoords, BORDER_COLS, BORDER_ROWS};
use crate::Coord;

/// Classic snake in the terminal.
#[derive(Debug, Parser)]
#[command(name = "snake", version, about)]
pub struct Args {
    /// Board width in cells. Defaults to the widest board the terminal fits.
    #[arg(long, value_name = "COLUMNS", value_parser = clap::value_parser!(u16).range(2..))]
    width: Option<u16>,
    /// Board height in cells. Defaults to the tallest board the terminal fits.
    #[arg(long, value_name = "ROWS", value_parser = clap::value_parser!(u16).range(2..))]
    height: Option<u16>,
    /// Milliseconds between two moves of the snake.
    #[arg(
        long = "tick-ms",
        value_name = "MILLISECONDS",
        default_value_t = 100,
        value_parser = clap::value_parser!(u64).range(1..=60_000)
    )]
    tick_ms: u64,
    /// Length of the snake at the start of a game.
    #[arg(
        long,
        value_name = "CELLS",
        default_value_t = DEFAULT_INITIAL_LENGTH as u16,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    length: u16,
    /// Direction the snake starts moving in: up, down, left or right.
    #[arg(long, value_name = "DIRECTION", default_value_t = DEFAULT_DIRECTION)]
    direction: Direction,
    /// Seed for food placement, for replaying the same game.
    #[arg(long, value_name = "NUMBER")]
    seed: Option<u64>,
    /// Glyph for the snake's head. Defaults to an arrow pointing where it goes.
    #[arg(long, value_name = "CHAR")]
    head_char: Option<char>,
    #[arg(long, value_name = "CHAR", default_value_t = '#')]
    body_char: char,
    #[arg(long, value_name = "CHAR", default_value_t = '*')]
    food_char: char,
    #[arg(long, value_name = "CHAR", default_value_t = '.')]
    background_char: char,
    #[arg(long, value_name = "COLOR", default_value = "green", value_parser = parse_color)]
    snake_color: Color,
    #[arg(long, value_name = "COLOR", default_value = "red", value_parser = parse_color)]
    food_color: Color,
    /// Draw everything in the terminal's default colour.
    #[arg(long)]
    no_color: bool,
}

impl Args {
    /// Builds the run's configuration for a terminal of the given size.
    pub fn config(&self, terminal: TermCoords) -> Result<(GameConfig, RenderConfig), ConfigError> {
        let width = self.width.unwrap_or_else(|| terminal.0.saturating_sub(BORDER_COLS));
        let height = self.height.unwrap_or_else(|| terminal.1.saturating_sub(BORDER_ROWS));
        let grid = Grid::new(width as Coord, height as Coord);

        let needed = required_size(&grid);
        if needed.0 > terminal.0 as u32 || needed.1 > terminal.1 as u32 {
            return Err(ConfigError::TerminalTooSmall { needed, available: terminal });
        }

        let config = GameConfig {
            grid,
            tick: Duration::from_millis(self.tick_ms),
            initial_length: self.length as usize,
            direction: self.direction,
            seed: self.seed,
        };
        config.validate()?;

        let render_config = RenderConfig {
            head_char: self.head_char,
            body_char: self.body_char,
            food_char: self.food_char,
            background_char: self.background_char,
            snake_color: self.snake_color,
            food_color: self.food_color,
            color_enabled: !self.no_color,
            ..RenderConfig::default()
        };

        Ok((config, render_config))
    }
}

fn parse_color(s: &str) -> Result<Color, String> {
    let color = match s.to_ascii_lowercase().replace('_', "-").as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "dark-red" => Color::DarkRed,
        "green" => Color::Green,
        "dark-green" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "dark-yellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "dark-blue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "dark-magenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "dark-cyan" => Color::DarkCyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        "dark-grey" | "dark-gray" => Color::DarkGrey,
        _ => return Err(format!("unknown colour \"{}\"", s)),
    };
    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("snake").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_fill_the_terminal() {
        let (config, render) = parse(&[]).unwrap().config((80, 24)).unwrap();

        assert_eq!(config.grid, Grid::new(78, 21));
        assert_eq!(config.tick, Duration::from_millis(100));
        assert_eq!(config.initial_length, 3);
        assert_eq!(config.direction, Direction::Right);
        assert_eq!(config.seed, None);
        assert_eq!(render, RenderConfig::default());
    }

    #[test]
    fn explicit_options() {
        let args = parse(&[
            "--width", "10", "--height", "8", "--tick-ms", "250", "--length", "4",
            "--direction", "up", "--seed", "9", "--head-char", "@", "--body-char", "o",
            "--food-char", "%", "--background-char", " ", "--snake-color", "dark_cyan",
            "--food-color", "Yellow", "--no-color",
        ])
        .unwrap();
        let (config, render) = args.config((80, 24)).unwrap();

        assert_eq!(config.grid, Grid::new(10, 8));
        assert_eq!(config.tick, Duration::from_millis(250));
        assert_eq!(config.initial_length, 4);
        assert_eq!(config.direction, Direction::Up);
        assert_eq!(config.seed, Some(9));
        assert_eq!(render.head_char, Some('@'));
        assert_eq!(render.body_char, 'o');
        assert_eq!(render.food_char, '%');
        assert_eq!(render.background_char, ' ');
        assert_eq!(render.snake_color, Color::DarkCyan);
        assert_eq!(render.food_color, Color::Yellow);
        assert!(!render.color_enabled);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse(&["--tick-ms", "0"]).is_err());
        assert!(parse(&["--width", "1"]).is_err());
        assert!(parse(&["--direction", "north"]).is_err());
        assert!(parse(&["--snake-color", "plaid"]).is_err());
        assert!(parse(&["--body-char", "ab"]).is_err());
    }

    #[test]
    fn board_must_fit_the_terminal() {
        let err = parse(&["--width", "100"]).unwrap().config((80, 24)).unwrap_err();
        assert_eq!(err, ConfigError::TerminalTooSmall { needed: (102, 24), available: (80, 24) });
    }

    #[test]
    fn widest_board_does_not_overflow() {
        let err = parse(&["--width", "65535", "--height", "65535"]).unwrap().config((80, 24)).unwrap_err();
        assert_eq!(err, ConfigError::TerminalTooSmall { needed: (65537, 65538), available: (80, 24) });

        let err = parse(&["--width", "65535"]).unwrap().config((u16::MAX, u16::MAX)).unwrap_err();
        assert!(matches!(err, ConfigError::TerminalTooSmall { needed: (65537, _), .. }));
    }

    #[test]
    fn length_is_range_checked() {
        assert!(parse(&["--length", "4294967297"]).is_err());
        assert!(parse(&["--length", "0"]).is_err());

        let err = parse(&["--length", "65535", "--direction", "up"]).unwrap().config((80, 24)).unwrap_err();
        assert!(matches!(err, ConfigError::SnakeTooLong { length: 65535, direction: Direction::Up }));
    }

    #[test]
    fn long_snakes_are_rejected() {
        let err = parse(&["--width", "6", "--height", "6", "--length", "5"]).unwrap().config((80, 24)).unwrap_err();
        assert!(matches!(err, ConfigError::SnakeTooLong { length: 5, .. }));
    }
}
