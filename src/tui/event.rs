use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

use crate::core::action::Action;

/// Poll for an event with timeout and translate it into an [`Action`].
///
/// Returns `Ok(None)` on timeout and for events with no binding.
pub fn poll_action(timeout: Duration) -> io::Result<Option<Action>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(map_event(&event::read()?))
}

/// Key bindings. Only presses are mapped, so terminals that report key
/// releases don't trigger every action twice.
pub fn map_event(event: &Event) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            log::debug!("Key event: {:?} with modifiers {:?}", key.code, key.modifiers);
            match (key.modifiers, key.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
                (_, KeyCode::Char('q')) => Some(Action::Quit),
                (_, KeyCode::Tab) => Some(Action::TogglePane),
                (_, KeyCode::Up | KeyCode::Char('k')) => Some(Action::MoveUp),
                (_, KeyCode::Down | KeyCode::Char('j')) => Some(Action::MoveDown),
                (_, KeyCode::Home) => Some(Action::Home),
                (_, KeyCode::End) => Some(Action::End),
                (_, KeyCode::PageUp) => Some(Action::PageUp),
                (_, KeyCode::PageDown) => Some(Action::PageDown),
                (_, KeyCode::Enter) => Some(Action::Activate),
                (_, KeyCode::Esc | KeyCode::Backspace) => Some(Action::Back),
                _ => None,
            }
        }
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::WheelUp),
            MouseEventKind::ScrollDown => Some(Action::WheelDown),
            _ => None,
        },
        Event::Resize(width, height) => Some(Action::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}
