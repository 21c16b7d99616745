//! Keyboard input dispatch.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Tab};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    /// Re-run the pipeline.
    Refresh,
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> Action {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false
        }
        KeyCode::Char('r') => return Action::Refresh,
        KeyCode::Char('1') => app.select_tab(Tab::Data),
        KeyCode::Char('2') => app.select_tab(Tab::Ranking),
        KeyCode::Tab | KeyCode::BackTab => app.select_tab(app.tab.next()),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
        _ => {}
    }
    Action::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn q_quits() {
        let mut app = App::new("t");
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('q'))), Action::None);
        assert!(!app.running);
    }

    #[test]
    fn r_requests_refresh() {
        let mut app = App::new("t");
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('r'))), Action::Refresh);
        assert!(app.running);
    }

    #[test]
    fn tab_and_digits_switch_tabs() {
        let mut app = App::new("t");
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.tab, Tab::Ranking);
        handle_key(&mut app, press(KeyCode::Char('1')));
        assert_eq!(app.tab, Tab::Data);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = App::new("t");
        let key = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        handle_key(&mut app, key);
        assert!(app.running);
    }
}
