use std::io;
use std::thread::sleep;
use std::time::Instant;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::input::{is_quit_key, map_key, Action};
use crate::render::{self, KeySource, Render, RenderConfig};
use crate::state::{GameState, Phase, Tick};

const INTRO_LINES: &[&str] = &[
    "Arrow keys or WASD to move",
    "P or any other key to pause",
    "Q, Esc or CTRL+C to quit",
    "",
    "Press any key to begin",
];

const PAUSE_LINES: &[&str] = &["Paused", "Press a direction to resume", "or Q to quit"];

/// How a single game ended.
#[derive(Debug)]
pub enum Outcome {
    /// The player quit mid-game.
    Quit(GameState),
    /// The game reached game over.
    Finished(GameState),
}

pub struct SnakeGame<T, R = StdRng> {
    term: T,
    config: GameConfig,
    render_config: RenderConfig,
    rng: R,
}

impl<T: Render + KeySource> SnakeGame<T, StdRng> {
    pub fn new(term: T, config: GameConfig, render_config: RenderConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        SnakeGame::with_rng(term, config, render_config, rng)
    }
}

impl<T: Render + KeySource, R: Rng> SnakeGame<T, R> {
    pub fn with_rng(term: T, config: GameConfig, render_config: RenderConfig, rng: R) -> Self {
        SnakeGame { term, config, render_config, rng }
    }

    /// Shows the intro, then plays games back to back until the player quits.
    /// Returns the state of the last game played, if any.
    pub fn run(&mut self) -> io::Result<Option<GameState>> {
        if !self.show_intro()? {
            return Ok(None);
        }

        loop {
            match self.play()? {
                Outcome::Quit(state) => return Ok(Some(state)),
                Outcome::Finished(state) => {
                    if is_quit_key(&self.term.wait_key()?) {
                        return Ok(Some(state));
                    }
                    debug!("starting another game");
                }
            }
        }
    }

    /// Returns `false` if the player chose to quit right away.
    pub fn show_intro(&mut self) -> io::Result<bool> {
        self.term.clear()?;
        self.term.show_message(INTRO_LINES)?;
        let key = self.term.wait_key()?;
        self.term.hide_message()?;
        Ok(!is_quit_key(&key))
    }

    /// Plays one game from a fresh state until game over or quit.
    pub fn play(&mut self) -> io::Result<Outcome> {
        let mut state = GameState::new(&self.config, &mut self.rng);
        info!("game started, snake of {} heading {}", state.snake().len(), state.direction());

        self.term.clear()?;
        self.term.render(&state, &self.render_config)?;

        loop {
            let started = Instant::now();

            let action = match self.term.poll_key()? {
                Some(ev) => map_key(&ev, state.heading()),
                None => Action::Ignore,
            };

            match state.step(action, &mut self.rng) {
                Tick::Quit => {
                    info!("quit with score {}", state.score());
                    return Ok(Outcome::Quit(state));
                }
                Tick::Paused => self.term.show_message(PAUSE_LINES)?,
                Tick::Resumed => self.term.hide_message()?,
                _ => {}
            }

            self.term.render(&state, &self.render_config)?;

            if let Phase::GameOver(reason) = state.phase() {
                let score = format!("Score: {}", state.score());
                self.term.show_message(&[
                    render::game_over_title(reason),
                    score.as_str(),
                    "",
                    "Press any key to play again,",
                    "or Q to quit.",
                ])?;
                return Ok(Outcome::Finished(state));
            }

            sleep(self.config.tick.saturating_sub(started.elapsed()));
        }
    }
}
