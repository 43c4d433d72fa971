use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction;

/// Logical keys the game understands.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Confirm,
    Cancel,
    Restart,
    /// Ctrl+C, honoured everywhere
    Quit,
    /// Any other key. Still counts as "press any key".
    Unbound,
}

/// Maps a raw key event; `None` for releases and repeats.
pub fn action_for(key: &KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if is_ctrl_c(key) {
        return Some(Action::Quit);
    }

    let action = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Action::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Action::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Action::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Action::Move(Direction::Right),
        KeyCode::Enter | KeyCode::Char(' ') => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Char('r') | KeyCode::Char('R') => Action::Restart,
        _ => Action::Unbound,
    };
    Some(action)
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(ev.code, KeyCode::Char('c') | KeyCode::Char('C'))
}
