//! Main update function - handles state transitions (TEA pattern)
//!
//! Handler implementations live in:
//! - `view_state`: data source announcements
//! - `interaction`: toolbar, overlay bar, popups and gallery
//! - `outcome`: navigation and dismissal

use crate::message::Message;
use crate::state::PreviewState;
use tracing::debug;

use super::{interaction, keys::handle_key, outcome, view_state, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or actions
pub fn update(state: &mut PreviewState, message: Message) -> UpdateResult {
    // A dismissed session is final
    if state.dismissed {
        debug!("Ignoring {:?} after dismissal", message);
        return UpdateResult::none();
    }

    match message {
        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::ViewState(view_state) => view_state::handle_view_state(state, view_state),

        // ─────────────────────────────────────────────────────────
        // Surface Lifecycle
        // ─────────────────────────────────────────────────────────
        Message::SurfaceShown => interaction::handle_surface_shown(state),
        Message::SurfaceDestroyed => outcome::handle_surface_destroyed(state),
        Message::Dismiss => outcome::handle_dismiss(state),

        // ─────────────────────────────────────────────────────────
        // Affordances
        // ─────────────────────────────────────────────────────────
        Message::ToolbarClicked => interaction::handle_toolbar_clicked(state),
        Message::OverlayClicked(button) => interaction::handle_overlay_clicked(state, button),
        Message::EditClicked => interaction::handle_edit_clicked(state),
        Message::StubEditSaved => interaction::handle_stub_edit_saved(state),

        // ─────────────────────────────────────────────────────────
        // Popups
        // ─────────────────────────────────────────────────────────
        Message::OpenOverflowMenu => interaction::handle_open_overflow_menu(state),
        Message::MenuItemSelected(item) => interaction::handle_menu_item(state, item),
        Message::ReadingListChosen(choice) => interaction::handle_reading_list_choice(state, choice),
        Message::PopupNext => interaction::handle_popup_next(state),
        Message::PopupPrevious => interaction::handle_popup_previous(state),
        Message::PopupConfirm => interaction::handle_popup_confirm(state),
        Message::PopupClose => {
            state.overflow_menu = None;
            state.reading_list_menu = None;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Gallery
        // ─────────────────────────────────────────────────────────
        Message::GalleryNext => {
            if state.gallery_visible && !state.gallery.is_empty() {
                state.gallery_selected = (state.gallery_selected + 1) % state.gallery.len();
            }
            UpdateResult::none()
        }
        Message::GalleryPrevious => {
            if state.gallery_visible && !state.gallery.is_empty() {
                let len = state.gallery.len();
                state.gallery_selected = (state.gallery_selected + len - 1) % len;
            }
            UpdateResult::none()
        }
        Message::GalleryItemClicked(index) => interaction::handle_gallery_item_clicked(state, index),
    }
}
