use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::board::Direction;

/// All commands a player can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Slide the tiles one way.
    Move(Direction),
    /// Start a new session.  Only honoured on the end screen.
    Restart,
    /// Quit the game.
    Quit,
}

/// Translate a terminal event into a `Command`.
///
/// Only key presses count; repeats and releases are dropped so that each
/// physical press moves the board at most once.
pub fn from_event(event: &Event) -> Option<Command> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => from_key(*key),
        _ => None,
    }
}

/// Key bindings:
///
/// ```text
/// ← → ↑ ↓      Move
/// Esc          Restart (end screen)
/// q | Ctrl+C   Quit
/// ```
pub fn from_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Left => Some(Command::Move(Direction::Left)),
        KeyCode::Right => Some(Command::Move(Direction::Right)),
        KeyCode::Up => Some(Command::Move(Direction::Up)),
        KeyCode::Down => Some(Command::Move(Direction::Down)),
        KeyCode::Esc => Some(Command::Restart),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Command::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    #[test]
    fn arrows_map_to_moves() {
        assert_eq!(
            from_key(KeyEvent::from(KeyCode::Left)),
            Some(Command::Move(Direction::Left))
        );
        assert_eq!(
            from_key(KeyEvent::from(KeyCode::Right)),
            Some(Command::Move(Direction::Right))
        );
        assert_eq!(
            from_key(KeyEvent::from(KeyCode::Up)),
            Some(Command::Move(Direction::Up))
        );
        assert_eq!(
            from_key(KeyEvent::from(KeyCode::Down)),
            Some(Command::Move(Direction::Down))
        );
    }

    #[test]
    fn escape_restarts_and_q_quits() {
        assert_eq!(from_key(KeyEvent::from(KeyCode::Esc)), Some(Command::Restart));
        assert_eq!(from_key(KeyEvent::from(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(
            from_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(from_key(KeyEvent::from(KeyCode::Char('c'))), None);
        assert_eq!(from_key(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn only_presses_are_commands() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(from_event(&Event::Key(release)), None);
        assert_eq!(
            from_event(&Event::Key(KeyEvent::from(KeyCode::Left))),
            Some(Command::Move(Direction::Left))
        );
        assert_eq!(from_event(&Event::FocusGained), None);
    }
}
