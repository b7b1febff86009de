use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    ClearInput,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    ApplyFilter,
    CopyToClipboard,
    CycleSort,
    ClearFilters,
    LowerMaxPrice,
    RaiseMaxPrice,
    LowerMinPrice,
    RaiseMinPrice,
    InsertChar(char),
    DeleteChar,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
        && key.kind != KeyEventKind::Release
    {
        return Ok(key_to_action(key));
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::ClearInput,

        // Navigation
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::MoveUp,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::MoveDown,
        (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::PageUp, _) => Action::PageUp,
        (KeyCode::PageDown, _) => Action::PageDown,

        // Price slider: plain arrows move the upper end, Shift moves the lower end
        (KeyCode::Left, KeyModifiers::SHIFT) => Action::LowerMinPrice,
        (KeyCode::Right, KeyModifiers::SHIFT) => Action::RaiseMinPrice,
        (KeyCode::Left, _) => Action::LowerMaxPrice,
        (KeyCode::Right, _) => Action::RaiseMaxPrice,

        // Actions
        (KeyCode::Enter, _) => Action::ApplyFilter,
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => Action::CopyToClipboard,
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => Action::CycleSort,
        (KeyCode::Char('x'), KeyModifiers::CONTROL) => Action::ClearFilters,

        // Input line
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::InsertChar(c)
        }
        (KeyCode::Backspace, _) => Action::DeleteChar,

        _ => Action::None,
    }
}
