//! Terminal event polling

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use linkpeek_app::message::Message;
use linkpeek_app::InputKey;
use linkpeek_core::prelude::*;
use std::time::Duration;

/// Poll interval; also bounds how long the key thread takes to notice shutdown
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Convert crossterm KeyEvent to InputKey
pub fn key_event_to_input(key: crossterm::event::KeyEvent) -> Option<InputKey> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputKey::CharCtrl(c))
        }
        KeyCode::Char(c) => Some(InputKey::Char(c)),
        KeyCode::Enter => Some(InputKey::Enter),
        KeyCode::Esc => Some(InputKey::Esc),
        KeyCode::Tab => Some(InputKey::Tab),
        // Reverse tab walks popups backwards
        KeyCode::BackTab => Some(InputKey::Up),
        KeyCode::Up => Some(InputKey::Up),
        KeyCode::Down => Some(InputKey::Down),
        KeyCode::Left => Some(InputKey::Left),
        KeyCode::Right => Some(InputKey::Right),
        _ => None,
    }
}

/// Poll for a key press; `None` on timeout or for ignored events
pub fn poll() -> Result<Option<Message>> {
    Ok(poll_key()?.map(Message::Key))
}

/// Poll for a raw key press, for screens the preview does not own
pub fn poll_key() -> Result<Option<InputKey>> {
    if !event::poll(POLL_INTERVAL)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) if key.kind == event::KeyEventKind::Press => Ok(key_event_to_input(key)),
        _ => Ok(None),
    }
}
