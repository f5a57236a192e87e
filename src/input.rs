use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction::{self, *};

/// What a single key press asks the game to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Pause,
    Quit,
    Ignore,
}

/// Translates a key into an [`Action`] for a snake currently travelling in
/// `current`. Asking to turn straight back is downgraded to [`Action::Ignore`],
/// so a `Move` coming out of here is always safe to apply. Unbound keys pause.
pub fn map_key(ev: &KeyEvent, current: Direction) -> Action {
    if ev.kind != KeyEventKind::Press {
        return Action::Ignore;
    }

    let action = match ev.code {
        _ if is_ctrl_c(ev) => Action::Quit,
        KeyCode::Up => Action::Move(Up),
        KeyCode::Down => Action::Move(Down),
        KeyCode::Left => Action::Move(Left),
        KeyCode::Right => Action::Move(Right),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Action::Move(Up),
            's' => Action::Move(Down),
            'a' => Action::Move(Left),
            'd' => Action::Move(Right),
            'q' => Action::Quit,
            _ => Action::Pause,
        },
        KeyCode::Esc => Action::Quit,
        _ => Action::Pause,
    };

    match action {
        Action::Move(dir) if dir == current.opposite() => Action::Ignore,
        other => other,
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

/// Keys that leave a message box and end the program rather than continue.
pub fn is_quit_key(ev: &KeyEvent) -> bool {
    is_ctrl_c(ev) || matches!(ev.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_letters_agree() {
        let pairs = [
            (KeyCode::Up, 'w', Up),
            (KeyCode::Down, 's', Down),
            (KeyCode::Left, 'a', Left),
            (KeyCode::Right, 'd', Right),
        ];

        for (arrow, letter, dir) in pairs {
            // travelling perpendicular so nothing is a reversal
            let current = if matches!(dir, Up | Down) { Right } else { Up };
            assert_eq!(map_key(&key(arrow), current), Action::Move(dir));
            assert_eq!(map_key(&key(KeyCode::Char(letter)), current), Action::Move(dir));
            assert_eq!(
                map_key(&KeyEvent::new(KeyCode::Char(letter.to_ascii_uppercase()), KeyModifiers::SHIFT), current),
                Action::Move(dir)
            );
        }
    }

    #[test]
    fn reversal_is_ignored() {
        for d in Direction::ALL {
            let arrow = match d.opposite() {
                Up => KeyCode::Up,
                Down => KeyCode::Down,
                Left => KeyCode::Left,
                Right => KeyCode::Right,
            };
            assert_eq!(map_key(&key(arrow), d), Action::Ignore);
        }
        assert_eq!(map_key(&key(KeyCode::Char('a')), Right), Action::Ignore);
    }

    #[test]
    fn same_direction_is_a_move() {
        assert_eq!(map_key(&key(KeyCode::Right), Right), Action::Move(Right));
    }

    #[test]
    fn quit_keys() {
        assert_eq!(map_key(&key(KeyCode::Char('q')), Right), Action::Quit);
        assert_eq!(map_key(&key(KeyCode::Esc), Right), Action::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&ctrl_c, Right), Action::Quit);
        assert!(is_quit_key(&ctrl_c));
        assert!(!is_quit_key(&key(KeyCode::Enter)));
    }

    #[test]
    fn anything_else_pauses() {
        for code in [KeyCode::Char('p'), KeyCode::Char(' '), KeyCode::Char('c'), KeyCode::Enter, KeyCode::Tab, KeyCode::F(5)] {
            assert_eq!(map_key(&key(code), Up), Action::Pause);
        }
    }

    #[test]
    fn releases_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(&release, Right), Action::Ignore);
    }
}
