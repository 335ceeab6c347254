//! Key mapping from terminal events to game commands.

use crate::types::GameCommand;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a terminal event means to the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Command(GameCommand),
    Quit,
    /// The terminal was resized; redraw everything
    Redraw,
    Ignored,
}

/// Map keyboard input to game commands.
pub fn handle_key_event(key: KeyEvent) -> Option<GameCommand> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameCommand::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameCommand::MoveRight)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(GameCommand::Rotate),

        // Forced drop
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S')
        | KeyCode::Char(' ') => Some(GameCommand::ForceDrop),

        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(GameCommand::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameCommand::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Classify a raw terminal event. Only key presses produce commands.
pub fn classify(event: &Event) -> InputEvent {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if should_quit(*key) {
                InputEvent::Quit
            } else {
                handle_key_event(*key).map_or(InputEvent::Ignored, InputEvent::Command)
            }
        }
        Event::Resize(_, _) => InputEvent::Redraw,
        _ => InputEvent::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(GameCommand::MoveLeft)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Right)),
            Some(GameCommand::MoveRight)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('H'))),
            Some(GameCommand::MoveLeft)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('d'))),
            Some(GameCommand::MoveRight)
        );
    }

    #[test]
    fn test_rotate_and_drop_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(GameCommand::Rotate)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('w'))),
            Some(GameCommand::Rotate)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(GameCommand::ForceDrop)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(GameCommand::ForceDrop)
        );
    }

    #[test]
    fn test_pause_and_restart_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('p'))),
            Some(GameCommand::TogglePause)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Esc)),
            Some(GameCommand::TogglePause)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('R'))),
            Some(GameCommand::Restart)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }

    #[test]
    fn test_classify_ignores_releases() {
        let press = Event::Key(KeyEvent::from(KeyCode::Left));
        assert_eq!(classify(&press), InputEvent::Command(GameCommand::MoveLeft));

        let release = Event::Key(KeyEvent::new_with_kind_and_state(
            KeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        ));
        assert_eq!(classify(&release), InputEvent::Ignored);

        assert_eq!(classify(&Event::Resize(80, 24)), InputEvent::Redraw);
        assert_eq!(
            classify(&Event::Key(KeyEvent::from(KeyCode::Char('q')))),
            InputEvent::Quit
        );
    }
}
