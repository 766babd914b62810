use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ToggleHelp,
    MoveUp,
    MoveDown,
    Activate,
    Back,
    ShowPacks,
    ShowCollection,
    Search,
    CycleRarity,
    CycleRole,
    ResetProgress,
}

pub fn map_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputAction::Quit,
        KeyCode::Esc | KeyCode::Backspace => InputAction::Back,
        KeyCode::Up | KeyCode::Char('k') => InputAction::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => InputAction::MoveDown,
        KeyCode::Enter | KeyCode::Char(' ') => InputAction::Activate,
        KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        KeyCode::Char('p') => InputAction::ShowPacks,
        KeyCode::Char('c') => InputAction::ShowCollection,
        KeyCode::Char('/') => InputAction::Search,
        KeyCode::Char('r') => InputAction::CycleRarity,
        KeyCode::Char('o') => InputAction::CycleRole,
        KeyCode::Char('x') => InputAction::ResetProgress,
        _ => InputAction::None,
    }
}
