use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, GameMode};

/// What a key means during play
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    SelectMode(GameMode),
    Restart,
    Quit,
    None,
}

/// What a key means while typing a high score name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameEntryAction {
    Push(char),
    Backspace,
    Submit,
    /// Leave the name blank
    Skip,
    Quit,
    None,
}

/// Longest name accepted at the prompt
pub const MAX_NAME_LEN: usize = 16;

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if is_ctrl_c(&key) {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Turn(Direction::Up),
            KeyCode::Down => KeyAction::Turn(Direction::Down),
            KeyCode::Left => KeyAction::Turn(Direction::Left),
            KeyCode::Right => KeyAction::Turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Turn(Direction::Right),

            // Mode for the next game
            KeyCode::Char('1') => KeyAction::SelectMode(GameMode::Classic),
            KeyCode::Char('2') => KeyAction::SelectMode(GameMode::Speed),
            KeyCode::Char('3') => KeyAction::SelectMode(GameMode::Maze),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }

    /// `current_len` is the length of the name typed so far
    pub fn handle_name_key(&self, key: KeyEvent, current_len: usize) -> NameEntryAction {
        if is_ctrl_c(&key) {
            return NameEntryAction::Quit;
        }

        match key.code {
            KeyCode::Enter => NameEntryAction::Submit,
            KeyCode::Esc => NameEntryAction::Skip,
            KeyCode::Backspace => NameEntryAction::Backspace,
            KeyCode::Char(c) if current_len < MAX_NAME_LEN && !c.is_control() => {
                NameEntryAction::Push(c)
            }
            _ => NameEntryAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}
