//! Handlers for data source announcements
//!
//! Each observed `ViewState` is applied exactly once, in emission order.

use linkpeek_core::{
    distance_label, from_html, is_blank, ErrorCause, GalleryItem, LinkPreviewErrorType,
    Namespace, PageSummary, ViewState,
};
use tracing::{debug, error, warn};

use crate::message::Message;
use crate::state::{ContentView, ErrorView, PreviewState, PrimaryRegion, STUB_PLACEHOLDER};

use super::{UpdateAction, UpdateResult};

/// Dispatch a view state to its handler
pub fn handle_view_state(state: &mut PreviewState, view_state: ViewState) -> UpdateResult {
    state.states_observed += 1;
    debug!(
        "View state #{} for '{}': {}",
        state.states_observed,
        state.title().text,
        view_state.label()
    );

    match view_state {
        ViewState::Loading => handle_loading(state),
        ViewState::Error { cause } => handle_error(state, cause),
        ViewState::Content { summary } => handle_content(state, summary),
        ViewState::Gallery { images } => handle_gallery(state, images),
        ViewState::Watch {
            is_watched,
            message,
        } => handle_watch(state, is_watched, message),
        ViewState::Completed => {
            state.progress_visible = false;
            UpdateResult::none()
        }
    }
}

fn handle_loading(state: &mut PreviewState) -> UpdateResult {
    if state.terminal_observed && !state.awaiting_retry {
        warn!(
            "Ignoring Loading for '{}' after a terminal state",
            state.title().text
        );
        return UpdateResult::none();
    }

    // Retry epoch: progress shows over the previous outcome until the next
    // terminal state replaces it.
    state.awaiting_retry = false;
    state.progress_visible = true;
    UpdateResult::none()
}

fn handle_error(state: &mut PreviewState, cause: ErrorCause) -> UpdateResult {
    error!("Link preview for '{}' failed: {}", state.title().text, cause);

    let error_type = LinkPreviewErrorType::classify(&cause, state.title().namespace());
    state.primary = PrimaryRegion::Error(ErrorView {
        title: from_html(&state.title().display_text),
        error_type,
        cause,
    });
    state.progress_visible = false;
    state.edit_button_visible = false;
    state.terminal_observed = true;
    state.awaiting_retry = false;

    if let Some(overlay) = state.overlay.as_mut() {
        overlay.apply_error(error_type);
    }

    let navigable = error_type.permits_navigation();
    state.toolbar_navigation_enabled = navigable;
    state.overflow_button_visible = navigable;
    if !navigable {
        state.overflow_menu = None;
    }

    UpdateResult::none()
}

fn handle_content(state: &mut PreviewState, summary: PageSummary) -> UpdateResult {
    let mut actions = Vec::new();

    let namespace = summary
        .namespace
        .unwrap_or_else(|| state.title().namespace());
    let is_stub = is_blank(summary.extract.as_deref()) && namespace == Namespace::Main;
    let extract = if is_stub {
        STUB_PLACEHOLDER.to_string()
    } else {
        from_html(summary.extract.as_deref().unwrap_or_default())
    };

    let thumbnail_url = if state.settings.ui.show_thumbnails {
        summary.thumbnail_url.clone()
    } else {
        None
    };

    if state.session.from_places() {
        if let (Some(start), Some(end)) =
            (&state.session.location, &state.session.last_known_location)
        {
            state.distance = Some(distance_label(start, end, state.settings.ui.distance_units));
        }
    }

    let is_disambiguation = summary.is_disambiguation();
    state.primary = PrimaryRegion::Content(ContentView {
        page_id: summary.page_id,
        title: from_html(&summary.display_title),
        extract,
        is_stub,
        description: summary.description.clone(),
        thumbnail_url,
        is_disambiguation,
    });
    state.edit_button_visible = is_stub;
    state.gallery_visible = !is_stub;
    state.terminal_observed = true;
    state.awaiting_retry = false;

    // Content replacing an error restores the affordances the error removed
    state.toolbar_navigation_enabled = true;
    state.overflow_button_visible = true;
    if let Some(overlay) = state.overlay.as_mut() {
        overlay.apply_content(&state.session, is_disambiguation);
    }

    // The interaction context picks up the page id of the first summary
    let mut ctx = state.interaction_context();
    if ctx.page_id.is_none() {
        ctx.page_id = Some(summary.page_id);
        state.interaction = Some(ctx.clone());
    }

    actions.push(UpdateAction::LoadGallery);
    if !state.preview_shown_logged {
        state.preview_shown_logged = true;
        actions.push(UpdateAction::LogPreviewShown(ctx));
    }

    UpdateResult::actions(actions)
}

fn handle_gallery(state: &mut PreviewState, images: Vec<GalleryItem>) -> UpdateResult {
    debug!("Gallery for '{}': {} images", state.title().text, images.len());
    state.gallery = images;
    if state.gallery_selected >= state.gallery.len() {
        state.gallery_selected = 0;
    }
    state.progress_visible = false;
    UpdateResult::none()
}

fn handle_watch(state: &mut PreviewState, is_watched: bool, message: String) -> UpdateResult {
    state.session.is_watched = is_watched;
    let mut result = UpdateResult::action(UpdateAction::ShowWatchConfirmation {
        title: state.title().clone(),
        is_watched,
        message,
    });
    result.message = Some(Message::Dismiss);
    result
}
