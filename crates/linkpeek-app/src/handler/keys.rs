//! Key event handlers

use crate::input_key::InputKey;
use crate::message::Message;
use crate::overlay::OverlayButton;
use crate::state::PreviewState;

/// Convert key events to messages based on what currently has focus
pub fn handle_key(state: &PreviewState, key: InputKey) -> Option<Message> {
    if state.popup_open() {
        handle_key_popup(key)
    } else {
        handle_key_preview(state, key)
    }
}

/// Handle key events while a popup menu is open
fn handle_key_popup(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Down | InputKey::Tab | InputKey::Char('j') => Some(Message::PopupNext),
        InputKey::Up | InputKey::Char('k') => Some(Message::PopupPrevious),
        InputKey::Enter => Some(Message::PopupConfirm),
        InputKey::Esc | InputKey::Char('q') => Some(Message::PopupClose),
        // Ctrl+C still closes the whole preview
        InputKey::CharCtrl('c') => Some(Message::Dismiss),
        _ => None,
    }
}

/// Handle key events on the preview surface
fn handle_key_preview(state: &PreviewState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter => Some(Message::ToolbarClicked),

        // Overlay bar
        InputKey::Char('1') => Some(Message::OverlayClicked(OverlayButton::Primary)),
        InputKey::Char('2') => Some(Message::OverlayClicked(OverlayButton::Secondary)),
        InputKey::Char('3') => Some(Message::OverlayClicked(OverlayButton::Tertiary)),

        InputKey::Char('m') => Some(Message::OpenOverflowMenu),
        InputKey::Char('e') => Some(Message::EditClicked),

        // Gallery strip
        InputKey::Left | InputKey::Char('h') => Some(Message::GalleryPrevious),
        InputKey::Right | InputKey::Char('l') => Some(Message::GalleryNext),
        InputKey::Char('g') => state
            .selected_gallery_item()
            .map(|_| Message::GalleryItemClicked(state.gallery_selected)),

        InputKey::Esc | InputKey::Char('q') | InputKey::CharCtrl('c') => Some(Message::Dismiss),
        _ => None,
    }
}
