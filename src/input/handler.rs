use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::modes::Speed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Switch between running and idle
    TogglePause,
    Restart,
    SetSpeed(Speed),
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => KeyAction::TogglePause,

            // Speed
            KeyCode::Char('1') => KeyAction::SetSpeed(Speed::Slow),
            KeyCode::Char('2') => KeyAction::SetSpeed(Speed::Relaxed),
            KeyCode::Char('3') => KeyAction::SetSpeed(Speed::Normal),
            KeyCode::Char('4') => KeyAction::SetSpeed(Speed::Fast),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
