use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    Adjust(f64),
    RandomValue,
    StartInput,
    ToggleAnimation,
    ToggleTicker,
    StopScroll,
    ShowHelp,
    ExitMode,
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    match &app.mode {
        Mode::Input(_) => return handle_input_mode(key),
        Mode::Help => {
            // Any key exits help
            return Action::ExitMode;
        }
        Mode::Normal => {}
    }

    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Step the value
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::Adjust(1.0),
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::Adjust(-1.0),
        (KeyCode::Up, KeyModifiers::NONE) => Action::Adjust(1.0),
        (KeyCode::Down, KeyModifiers::NONE) => Action::Adjust(-1.0),
        (KeyCode::Char('K'), KeyModifiers::SHIFT) => Action::Adjust(10.0),
        (KeyCode::Char('J'), KeyModifiers::SHIFT) => Action::Adjust(-10.0),
        (KeyCode::PageUp, _) => Action::Adjust(10.0),
        (KeyCode::PageDown, _) => Action::Adjust(-10.0),

        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::RandomValue,
        (KeyCode::Char('e'), KeyModifiers::NONE) => Action::StartInput,
        (KeyCode::Char(':'), _) => Action::StartInput,
        (KeyCode::Char('a'), KeyModifiers::NONE) => Action::ToggleAnimation,
        (KeyCode::Char('t'), KeyModifiers::NONE) => Action::ToggleTicker,
        (KeyCode::Char('s'), KeyModifiers::NONE) => Action::StopScroll,
        (KeyCode::Char('?'), _) => Action::ShowHelp,
        (KeyCode::Esc, KeyModifiers::NONE) => Action::ExitMode,

        _ => Action::None,
    }
}

/// Handle key events while typing a value
fn handle_input_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}
