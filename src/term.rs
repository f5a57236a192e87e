use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::cursor;
use crossterm::event::{poll, read, Event, KeyEvent, KeyEventKind};
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use log::{debug, warn};

use crate::grid::Grid;
use crate::render::{self, Frame, Glyph, KeySource, Render, RenderConfig};
use crate::state::GameState;

pub type TermInt = u16;
pub type TermCoords = (TermInt, TermInt);

/// Columns and rows taken by the frame around the board and the status line.
pub const BORDER_COLS: TermInt = 2;
pub const BORDER_ROWS: TermInt = 3;

pub fn terminal_size() -> std::io::Result<TermCoords> {
    terminal::size()
}

/// Terminal size needed to show a board of the given grid. Wider than
/// [`TermCoords`] so boards near `u16::MAX` still compare correctly.
pub fn required_size(grid: &Grid) -> (u32, u32) {
    (
        grid.width().max(0) as u32 + BORDER_COLS as u32,
        grid.height().max(0) as u32 + BORDER_ROWS as u32,
    )
}

/// Crossterm-backed screen and keyboard.
///
/// Keeps a copy of everything on screen so message boxes can be taken down
/// again and so each frame only prints the cells that changed.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    origin: TermCoords,
    board: TermCoords,
    stdout: Stdout,
    screen: Vec<Glyph>,
    current_msg: Option<Message>,
    active: bool,
}

#[derive(Debug, PartialEq, Eq)]
struct Message {
    top_left: TermCoords,
    width: TermInt,
    height: TermInt,
}

impl Message {
    /// Centres a box with a blank line and a blank column on each side of
    /// `lines`, cut down to fit a screen of `screen` size.
    fn layout(lines: &[&str], screen: TermCoords) -> Self {
        let longest = lines.iter().map(|x| x.chars().count()).max().unwrap_or(0);
        let width = TermInt::try_from(longest + 2).unwrap_or(TermInt::MAX).min(screen.0);
        let height = TermInt::try_from(lines.len() + 2).unwrap_or(TermInt::MAX).min(screen.1);
        let top_left = (
            (screen.0 / 2).saturating_sub(width / 2),
            (screen.1 / 2).saturating_sub(height / 2),
        );

        Message { top_left, width, height }
    }

    /// The box contents row by row, each exactly `width` characters.
    fn rows(&self, lines: &[&str]) -> Vec<String> {
        let width = self.width as usize;
        (0..self.height as usize)
            .map(|row| {
                let line = row.checked_sub(1).and_then(|i| lines.get(i)).copied().unwrap_or("");
                let padded = format!("{line: ^width$}", line = line, width = width);
                padded.chars().take(width).collect()
            })
            .collect()
    }
}

impl TermManager {
    /// Prepares a screen for a board of `grid`'s size, centred in the terminal.
    pub fn new(grid: &Grid) -> std::io::Result<Self> {
        let (width, height) = terminal::size()?;
        let (board_w, board_h) = required_size(grid);
        let board = (
            TermInt::try_from(board_w).unwrap_or(TermInt::MAX),
            TermInt::try_from(board_h).unwrap_or(TermInt::MAX),
        );
        let origin = (width.saturating_sub(board.0) / 2, height.saturating_sub(board.1) / 2);
        let screen = vec![Glyph::BLANK; width as usize * height as usize];

        Ok(TermManager { width, height, origin, board, stdout: stdout(), screen, current_msg: None, active: false })
    }

    pub fn setup(&mut self) -> std::io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        self.active = true;
        debug!("terminal set up, {}x{}", self.width, self.height);
        Ok(())
    }

    pub fn restore(&mut self) -> std::io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_borders(&mut self) -> std::io::Result<()> {
        let (x0, y0) = self.origin;
        let (w, h) = (self.board.0, self.board.1 - 1);
        let (end_x, end_y) = (x0 + w - 1, y0 + h - 1);

        for x in x0..x0 + w {
            let ch = if x == x0 || x == end_x { '+' } else { '-' };
            self.print_at((x, y0), Glyph::plain(ch))?;
            self.print_at((x, end_y), Glyph::plain(ch))?;
        }

        for y in y0 + 1..end_y {
            self.print_at((x0, y), Glyph::plain('|'))?;
            self.print_at((end_x, y), Glyph::plain('|'))?;
        }

        self.flush()
    }

    fn draw_status(&mut self, line: &str) -> std::io::Result<()> {
        let (x0, y0) = self.origin;
        let y = y0 + self.board.1 - 1;
        let padded = format!("{:<width$}", line, width = self.board.0 as usize);

        for (i, ch) in padded.chars().take(self.board.0 as usize).enumerate() {
            self.print_at((x0 + i as TermInt, y), Glyph::plain(ch))?;
        }
        Ok(())
    }

    /// Prints a glyph unless the screen already shows it there. Cells under a
    /// message box are only recorded, and appear once the box is hidden.
    fn print_at(&mut self, pos: TermCoords, glyph: Glyph) -> std::io::Result<()> {
        if pos.0 >= self.width || pos.1 >= self.height {
            return Ok(());
        }
        let idx = self.width as usize * pos.1 as usize + pos.0 as usize;
        if self.screen[idx] == glyph {
            return Ok(());
        }
        self.screen[idx] = glyph;

        if self.under_message(pos) {
            return Ok(());
        }
        self.put(pos, glyph)
    }

    fn put(&mut self, pos: TermCoords, glyph: Glyph) -> std::io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1))?;
        match glyph.color {
            Some(color) => queue!(self.stdout, SetForegroundColor(color), Print(glyph.ch), ResetColor),
            None => queue!(self.stdout, Print(glyph.ch)),
        }
    }

    fn under_message(&self, pos: TermCoords) -> bool {
        match &self.current_msg {
            Some(msg) => {
                let (x, y) = msg.top_left;
                (x..x + msg.width).contains(&pos.0) && (y..y + msg.height).contains(&pos.1)
            }
            None => false,
        }
    }
}

impl Render for TermManager {
    fn clear(&mut self) -> std::io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen = vec![Glyph::BLANK; self.width as usize * self.height as usize];
        self.current_msg = None;
        self.draw_borders()
    }

    fn render(&mut self, state: &GameState, config: &RenderConfig) -> std::io::Result<()> {
        let frame = Frame::compose(state, config);
        let (x0, y0) = (self.origin.0 + 1, self.origin.1 + 1);

        for (row, glyphs) in frame.rows().enumerate() {
            for (col, glyph) in glyphs.iter().enumerate() {
                self.print_at((x0 + col as TermInt, y0 + row as TermInt), *glyph)?;
            }
        }

        self.draw_status(&render::status_line(state))?;
        self.flush()
    }

    fn show_message(&mut self, lines: &[&str]) -> std::io::Result<()> {
        if self.current_msg.is_some() {
            self.hide_message()?;
        }

        let msg = Message::layout(lines, (self.width, self.height));
        for (y_diff, row) in msg.rows(lines).iter().enumerate() {
            let y = msg.top_left.1 + y_diff as TermInt;
            for (x_diff, ch) in row.chars().enumerate() {
                self.put((msg.top_left.0 + x_diff as TermInt, y), Glyph::plain(ch))?;
            }
        }

        self.current_msg = Some(msg);
        self.flush()
    }

    fn hide_message(&mut self) -> std::io::Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        for y in msg.top_left.1..(msg.top_left.1 + msg.height).min(self.height) {
            for x in msg.top_left.0..(msg.top_left.0 + msg.width).min(self.width) {
                let glyph = self.screen[self.width as usize * y as usize + x as usize];
                self.put((x, y), glyph)?;
            }
        }

        self.flush()
    }
}

impl KeySource for TermManager {
    fn poll_key(&mut self) -> std::io::Result<Option<KeyEvent>> {
        while poll(Duration::ZERO)? {
            match read()? {
                Event::Key(ev) if ev.kind == KeyEventKind::Press => return Ok(Some(ev)),
                Event::Resize(w, h) => warn!("terminal resized to {}x{}, the board keeps its size", w, h),
                _ => {}
            }
        }
        Ok(None)
    }

    fn wait_key(&mut self) -> std::io::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(ev);
                }
            }
        }
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("could not restore the terminal: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_box_is_centred() {
        let lines = ["Paused", "", "press q"];
        let msg = Message::layout(&lines, (80, 24));

        assert_eq!(msg, Message { top_left: (36, 10), width: 9, height: 5 });
        assert_eq!(msg.rows(&lines), vec!["         ", " Paused  ", "         ", " press q ", "         "]);
    }

    #[test]
    fn message_box_stays_on_a_small_screen() {
        let lines = ["Press any key to play again,", "or Q to quit.", "", "x", "y"];
        let screen = (10, 4);
        let msg = Message::layout(&lines, screen);

        assert!(msg.top_left.0 + msg.width <= screen.0);
        assert!(msg.top_left.1 + msg.height <= screen.1);

        let rows = msg.rows(&lines);
        assert_eq!(rows.len(), msg.height as usize);
        assert!(rows.iter().all(|r| r.chars().count() == msg.width as usize));
    }

    #[test]
    fn board_size_includes_the_frame() {
        assert_eq!(required_size(&Grid::new(78, 21)), (80, 24));
        assert_eq!(required_size(&Grid::new(65535, 65535)), (65537, 65538));
    }
}
