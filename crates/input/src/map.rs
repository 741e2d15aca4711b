//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

/// Map keyboard input to game actions.
///
/// `paused` decides whether the pause key emits `Pause` or `Resume`.
/// Key releases (only reported by terminals with enhanced keyboard support)
/// map to nothing.
pub fn handle_key_event(key: KeyEvent, paused: bool) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(GameAction::MoveLeft),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(GameAction::MoveRight),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(GameAction::SoftDrop),

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(GameAction::Rotate),

        // Actions
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => None,
        KeyCode::Char('c')
        | KeyCode::Char('C')
        | KeyCode::Modifier(ModifierKeyCode::LeftShift)
        | KeyCode::Modifier(ModifierKeyCode::RightShift) => Some(GameAction::Hold),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(if paused {
            GameAction::Resume
        } else {
            GameAction::Pause
        }),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code), false)
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(press(KeyCode::Left), Some(GameAction::MoveLeft));
        assert_eq!(press(KeyCode::Right), Some(GameAction::MoveRight));
        assert_eq!(press(KeyCode::Down), Some(GameAction::SoftDrop));

        assert_eq!(press(KeyCode::Char('a')), Some(GameAction::MoveLeft));
        assert_eq!(press(KeyCode::Char('D')), Some(GameAction::MoveRight));
        assert_eq!(press(KeyCode::Char('H')), Some(GameAction::MoveLeft));
        assert_eq!(press(KeyCode::Char('L')), Some(GameAction::MoveRight));
        assert_eq!(press(KeyCode::Char('J')), Some(GameAction::SoftDrop));
        assert_eq!(press(KeyCode::Char('s')), Some(GameAction::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        for code in [
            KeyCode::Up,
            KeyCode::Char('w'),
            KeyCode::Char('K'),
            KeyCode::Char('x'),
        ] {
            assert_eq!(press(code), Some(GameAction::Rotate), "{code:?}");
        }
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(press(KeyCode::Char(' ')), Some(GameAction::HardDrop));
        assert_eq!(press(KeyCode::Char('c')), Some(GameAction::Hold));
        assert_eq!(
            press(KeyCode::Modifier(ModifierKeyCode::LeftShift)),
            Some(GameAction::Hold)
        );
        assert_eq!(press(KeyCode::Char('r')), Some(GameAction::Restart));
        assert_eq!(press(KeyCode::Char('?')), None);
    }

    #[test]
    fn test_pause_key_toggles() {
        let p = KeyEvent::from(KeyCode::Char('p'));
        assert_eq!(handle_key_event(p, false), Some(GameAction::Pause));
        assert_eq!(handle_key_event(p, true), Some(GameAction::Resume));

        let esc = KeyEvent::from(KeyCode::Esc);
        assert_eq!(handle_key_event(esc, true), Some(GameAction::Resume));
    }

    #[test]
    fn test_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key_event(release, false), None);
    }

    #[test]
    fn test_quit_keys() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(ctrl_c));
        assert_eq!(handle_key_event(ctrl_c, false), None);
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
