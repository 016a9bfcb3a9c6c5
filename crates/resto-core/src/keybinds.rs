use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::navigation::Direction;

/// Where keyboard input is currently routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Default mode. Keys navigate the panels and edit the focused field.
    #[default]
    Normal,
    /// A text prompt is open (header name, file name).
    Prompt,
    /// A modal menu is open (panel menu, auth chooser, update notice).
    Menu,
}

impl InputMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Prompt => "PROMPT",
            Self::Menu => "MENU",
        }
    }
}

/// Actions that can result from a key press in Normal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The key means nothing here.
    None,
    Quit,
    Navigate(Direction),
    /// Press the focused button, or cycle the focused choice field.
    Activate,
    CycleForward,
    CycleBackward,
    InsertChar(char),
    Backspace,
    SelectAuthMode,
    PanelMenu,
    Help,
    OpenSettings,
    CheckUpdate,
}

/// Whether a character key should be typed as text: plain or shifted only.
pub fn is_text_input(key: &KeyEvent) -> bool {
    key.modifiers.difference(KeyModifiers::SHIFT).is_empty()
}

/// Map a key event in Normal mode to an action.
pub fn process_normal_key(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('j') => Action::Navigate(Direction::Down),
            KeyCode::Char('k') => Action::Navigate(Direction::Up),
            KeyCode::Char('l') => Action::Navigate(Direction::Forward),
            KeyCode::Char('h') => Action::Navigate(Direction::Back),
            KeyCode::Char('a') => Action::SelectAuthMode,
            KeyCode::Char('p') => Action::PanelMenu,
            KeyCode::Char('w') => Action::Help,
            KeyCode::Char('e') => Action::OpenSettings,
            KeyCode::Char('u') => Action::CheckUpdate,
            KeyCode::Char('q') | KeyCode::Char('c') => Action::Quit,
            _ => Action::None,
        };
    }

    match key.code {
        // Many terminals deliver Ctrl-H as Backspace; Alt-H is the portable alias.
        KeyCode::Char('h') if key.modifiers.contains(KeyModifiers::ALT) => {
            Action::Navigate(Direction::Back)
        }
        KeyCode::Tab => Action::Navigate(Direction::Down),
        KeyCode::BackTab => Action::Navigate(Direction::Up),
        KeyCode::Enter => Action::Activate,
        KeyCode::Right => Action::CycleForward,
        KeyCode::Left => Action::CycleBackward,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) if is_text_input(&key) => Action::InsertChar(c),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_control_keys_navigate() {
        let cases = [
            ('j', Direction::Down),
            ('k', Direction::Up),
            ('l', Direction::Forward),
            ('h', Direction::Back),
        ];
        for (c, direction) in cases {
            assert_eq!(
                process_normal_key(key(KeyCode::Char(c), KeyModifiers::CONTROL)),
                Action::Navigate(direction)
            );
        }
    }

    #[test]
    fn test_global_shortcuts() {
        let ctrl = |c| process_normal_key(key(KeyCode::Char(c), KeyModifiers::CONTROL));
        assert_eq!(ctrl('p'), Action::PanelMenu);
        assert_eq!(ctrl('w'), Action::Help);
        assert_eq!(ctrl('e'), Action::OpenSettings);
        assert_eq!(ctrl('u'), Action::CheckUpdate);
        assert_eq!(ctrl('a'), Action::SelectAuthMode);
        assert_eq!(ctrl('q'), Action::Quit);
        assert_eq!(ctrl('c'), Action::Quit);
        assert_eq!(ctrl('z'), Action::None);
    }

    #[test]
    fn test_plain_keys_edit() {
        assert_eq!(
            process_normal_key(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Action::InsertChar('j')
        );
        assert_eq!(
            process_normal_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Action::InsertChar('A')
        );
        assert_eq!(
            process_normal_key(key(KeyCode::Backspace, KeyModifiers::NONE)),
            Action::Backspace
        );
        assert_eq!(
            process_normal_key(key(KeyCode::Enter, KeyModifiers::NONE)),
            Action::Activate
        );
    }

    #[test]
    fn test_modified_chars_are_not_typed() {
        assert_eq!(
            process_normal_key(key(KeyCode::Char('x'), KeyModifiers::ALT)),
            Action::None
        );
        assert_eq!(
            process_normal_key(key(KeyCode::Char('x'), KeyModifiers::SUPER)),
            Action::None
        );
        assert!(is_text_input(&key(KeyCode::Char('X'), KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_tab_and_alt_h_aliases() {
        assert_eq!(
            process_normal_key(key(KeyCode::Tab, KeyModifiers::NONE)),
            Action::Navigate(Direction::Down)
        );
        assert_eq!(
            process_normal_key(key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Action::Navigate(Direction::Up)
        );
        assert_eq!(
            process_normal_key(key(KeyCode::Char('h'), KeyModifiers::ALT)),
            Action::Navigate(Direction::Back)
        );
    }
}
