//! User interaction handlers: toolbar, overlay bar, popups, gallery

use linkpeek_core::{from_html, ErrorButtonAction};
use tracing::{debug, warn};

use crate::menu::{build_overflow_menu, build_reading_list_menu, MenuItem, ReadingListChoice};
use crate::message::Message;
use crate::overlay::{OverlayButton, OverlayMode, OverlayState};
use crate::state::{PreviewState, PrimaryRegion};

use super::outcome::navigate;
use super::{UpdateAction, UpdateResult};

pub const MESSAGE_ADDRESS_COPIED: &str = "Address copied";
pub const MESSAGE_EDIT_SAVED: &str = "Edit saved successfully";

/// Places interface names reported with places events
const IFACE_DETAIL_TOOLBAR: &str = "detail_toolbar";
const IFACE_DETAIL_OVERFLOW_MENU: &str = "detail_overflow_menu";
const IFACE_ARTICLE_PREVIEW_MORE_MENU: &str = "article_preview_more_menu";

/// Places event for a session opened from the map
fn places_event(
    state: &PreviewState,
    action: &'static str,
    active_interface: &'static str,
) -> Option<UpdateAction> {
    if state.session.from_places() && state.settings.behavior.places_analytics {
        Some(UpdateAction::LogPlacesEvent {
            action,
            active_interface,
        })
    } else {
        None
    }
}

/// Run `actions`, then dismiss through a follow-up message
fn then_dismiss(actions: Vec<UpdateAction>) -> UpdateResult {
    UpdateResult {
        message: Some(Message::Dismiss),
        actions,
    }
}

/// Prepend `first` to the actions of `result`
fn preceded_by(first: Option<UpdateAction>, mut result: UpdateResult) -> UpdateResult {
    if let Some(action) = first {
        result.actions.insert(0, action);
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Surface
// ─────────────────────────────────────────────────────────────────────────────

/// Build the overlay bar on first display
///
/// A state that settled before the surface was shown is re-applied so the bar
/// reflects it.
pub fn handle_surface_shown(state: &mut PreviewState) -> UpdateResult {
    if state.overlay.is_some() {
        debug!("Surface shown again; overlay already attached");
        return UpdateResult::none();
    }

    let mut overlay = OverlayState::for_session(&state.session);
    match &state.primary {
        PrimaryRegion::Content(content) => {
            overlay.apply_content(&state.session, content.is_disambiguation)
        }
        PrimaryRegion::Error(error) => overlay.apply_error(error.error_type),
        PrimaryRegion::Empty => {}
    }
    state.overlay = Some(overlay);
    UpdateResult::none()
}

pub fn handle_toolbar_clicked(state: &mut PreviewState) -> UpdateResult {
    if !state.toolbar_navigation_enabled {
        debug!("Toolbar navigation disabled for '{}'", state.title().text);
        return UpdateResult::none();
    }
    navigate(state, false)
}

// ─────────────────────────────────────────────────────────────────────────────
// Overlay bar
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_overlay_clicked(state: &mut PreviewState, button: OverlayButton) -> UpdateResult {
    let Some(overlay) = state.overlay.as_ref() else {
        warn!("Overlay click {:?} before the surface was shown", button);
        return UpdateResult::none();
    };
    if !overlay.button(button).visible {
        debug!("Ignoring click on hidden overlay button {:?}", button);
        return UpdateResult::none();
    }

    match (overlay.mode, button) {
        (OverlayMode::Article, OverlayButton::Primary) => navigate(state, false),
        (OverlayMode::Article, OverlayButton::Secondary) => navigate(state, true),
        (OverlayMode::Article, OverlayButton::Tertiary) => UpdateResult::none(),

        (OverlayMode::Places, OverlayButton::Primary) => {
            let mut actions: Vec<UpdateAction> =
                places_event(state, "share_click", IFACE_DETAIL_TOOLBAR)
                    .into_iter()
                    .collect();
            actions.push(UpdateAction::Share {
                title: state.title().clone(),
            });
            UpdateResult::actions(actions)
        }
        (OverlayMode::Places, OverlayButton::Secondary) => {
            let event = places_event(state, "save_click", IFACE_DETAIL_TOOLBAR);
            preceded_by(event, show_reading_list_popup(state))
        }
        (OverlayMode::Places, OverlayButton::Tertiary) => {
            let event = places_event(state, "read_click", IFACE_DETAIL_TOOLBAR);
            preceded_by(event, navigate(state, false))
        }

        (OverlayMode::Error(ErrorButtonAction::Retry), OverlayButton::Primary) => {
            debug!("Retrying '{}'", state.title().text);
            state.awaiting_retry = true;
            UpdateResult::action(UpdateAction::Reload)
        }
        (OverlayMode::Error(ErrorButtonAction::Dismiss), OverlayButton::Primary) => {
            UpdateResult::message(Message::Dismiss)
        }
        (OverlayMode::Error(_), _) => UpdateResult::none(),
    }
}

/// Places "Save": offer the popup when already saved, otherwise save directly
fn show_reading_list_popup(state: &mut PreviewState) -> UpdateResult {
    if state.session.is_in_reading_list {
        state.overflow_menu = None;
        state.reading_list_menu = Some(build_reading_list_menu(&state.session));
        UpdateResult::none()
    } else {
        then_dismiss(vec![UpdateAction::AddToReadingList {
            title: state.title().clone(),
            add_to_default: true,
        }])
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stub editing
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_edit_clicked(state: &mut PreviewState) -> UpdateResult {
    if !state.edit_button_visible {
        return UpdateResult::none();
    }
    UpdateResult::action(UpdateAction::EditStub {
        title: state.title().clone(),
    })
}

pub fn handle_stub_edit_saved(_state: &mut PreviewState) -> UpdateResult {
    UpdateResult::action(UpdateAction::ShowMessage(MESSAGE_EDIT_SAVED.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Overflow menu
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_open_overflow_menu(state: &mut PreviewState) -> UpdateResult {
    if !state.overflow_button_visible {
        debug!("Overflow menu unavailable for '{}'", state.title().text);
        return UpdateResult::none();
    }
    state.reading_list_menu = None;
    state.overflow_menu = Some(build_overflow_menu(&state.session));
    UpdateResult::none()
}

pub fn handle_menu_item(state: &mut PreviewState, item: MenuItem) -> UpdateResult {
    state.overflow_menu = None;
    if !item.is_visible(&state.session) {
        warn!("Menu item {:?} is not offered for this preview", item);
        return UpdateResult::none();
    }

    let title = state.title().clone();
    match item {
        MenuItem::AddToList => then_dismiss(vec![UpdateAction::AddToReadingList {
            title,
            add_to_default: true,
        }]),

        MenuItem::SharePage => UpdateResult::action(UpdateAction::Share { title }),

        MenuItem::Watch => {
            let event = places_event(state, "watch_click", IFACE_DETAIL_OVERFLOW_MENU);
            preceded_by(
                event,
                UpdateResult::action(UpdateAction::WatchOrUnwatch {
                    currently_watched: state.session.is_watched,
                }),
            )
        }

        MenuItem::OpenInNewTab => {
            let event = places_event(state, "new_tab_click", IFACE_DETAIL_OVERFLOW_MENU);
            preceded_by(event, navigate(state, true))
        }

        MenuItem::CopyLink => {
            let mut actions: Vec<UpdateAction> =
                places_event(state, "copy_link_click", IFACE_DETAIL_OVERFLOW_MENU)
                    .into_iter()
                    .collect();
            actions.push(UpdateAction::CopyLink { uri: title.uri() });
            actions.push(UpdateAction::ShowMessage(MESSAGE_ADDRESS_COPIED.to_string()));
            then_dismiss(actions)
        }

        MenuItem::ViewOnMap => {
            // Logged for article previews too, unlike the other places events
            let mut actions = Vec::new();
            if state.settings.behavior.places_analytics {
                actions.push(UpdateAction::LogPlacesEvent {
                    action: "places_click",
                    active_interface: IFACE_ARTICLE_PREVIEW_MORE_MENU,
                });
            }
            if let Some(location) = state.session.location {
                actions.push(UpdateAction::OpenPlaces { title, location });
            }
            then_dismiss(actions)
        }

        MenuItem::GetDirections => {
            let mut actions: Vec<UpdateAction> =
                places_event(state, "directions_click", IFACE_DETAIL_OVERFLOW_MENU)
                    .into_iter()
                    .collect();
            if let Some(location) = state.session.location {
                actions.push(UpdateAction::GetDirections {
                    location,
                    label: from_html(&title.display_text),
                });
            }
            UpdateResult::actions(actions)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Reading-list popup
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_reading_list_choice(
    state: &mut PreviewState,
    choice: ReadingListChoice,
) -> UpdateResult {
    state.reading_list_menu = None;
    let title = state.title().clone();
    let action = match choice {
        ReadingListChoice::AddToAnotherList => UpdateAction::AddToReadingList {
            title,
            add_to_default: false,
        },
        ReadingListChoice::MoveTo(list) => UpdateAction::MoveToReadingList {
            title,
            list_id: list.id,
        },
        ReadingListChoice::Remove => UpdateAction::RemoveFromReadingLists { title },
    };
    then_dismiss(vec![action])
}

// ─────────────────────────────────────────────────────────────────────────────
// Popup navigation
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_popup_next(state: &mut PreviewState) -> UpdateResult {
    if let Some(menu) = state.reading_list_menu.as_mut() {
        menu.select_next();
    } else if let Some(menu) = state.overflow_menu.as_mut() {
        menu.select_next();
    }
    UpdateResult::none()
}

pub fn handle_popup_previous(state: &mut PreviewState) -> UpdateResult {
    if let Some(menu) = state.reading_list_menu.as_mut() {
        menu.select_previous();
    } else if let Some(menu) = state.overflow_menu.as_mut() {
        menu.select_previous();
    }
    UpdateResult::none()
}

pub fn handle_popup_confirm(state: &mut PreviewState) -> UpdateResult {
    if let Some(menu) = state.reading_list_menu.as_ref() {
        if let Some(choice) = menu.selected_item().cloned() {
            return UpdateResult::message(Message::ReadingListChosen(choice));
        }
    } else if let Some(menu) = state.overflow_menu.as_ref() {
        if let Some(item) = menu.selected_item().copied() {
            return UpdateResult::message(Message::MenuItemSelected(item));
        }
    }
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────────────────────────
// Gallery
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_gallery_item_clicked(state: &mut PreviewState, index: usize) -> UpdateResult {
    if !state.gallery_visible {
        return UpdateResult::none();
    }
    let Some(item) = state.gallery.get(index) else {
        warn!(
            "Gallery index {} out of range ({} images)",
            index,
            state.gallery.len()
        );
        return UpdateResult::none();
    };

    let image_name = item.name.clone();
    state.gallery_selected = index;
    UpdateResult::action(UpdateAction::OpenGallery {
        title: state.title().clone(),
        image_name,
    })
}
