//! Navigation and dismissal
//!
//! A session ends exactly once, either by navigating to the page or by being
//! dismissed. The analytics outcome is reconciled here: a navigation logs a
//! click, a dismissal after a terminal state logs a cancel, and at most one
//! of the two is ever logged.

use tracing::{debug, info};

use crate::state::{Outcome, PreviewState};

use super::{UpdateAction, UpdateResult};

/// Continue to the previewed page, then close the surface
pub fn navigate(state: &mut PreviewState, new_tab: bool) -> UpdateResult {
    info!(
        "Navigating to '{}' (new_tab={})",
        state.title().text,
        new_tab
    );
    state.navigate_success = true;

    let mut actions = Vec::new();
    if state.outcome.is_none() {
        state.outcome = Some(Outcome::Click);
        actions.push(UpdateAction::LogLinkClick(state.interaction_context()));
    }

    actions.extend(close(state, true));
    actions.push(UpdateAction::LoadPage {
        entry: state.session.history_entry.clone(),
        new_tab,
    });
    UpdateResult::actions(actions)
}

/// Close the surface at the user's or host's request
pub fn handle_dismiss(state: &mut PreviewState) -> UpdateResult {
    UpdateResult::actions(close(state, true))
}

/// The surface was torn down without an explicit dismissal
pub fn handle_surface_destroyed(state: &mut PreviewState) -> UpdateResult {
    UpdateResult::actions(close(state, false))
}

/// Mark the session dismissed and settle its analytics outcome.
///
/// Idempotent: a second call yields no actions.
fn close(state: &mut PreviewState, notify_host: bool) -> Vec<UpdateAction> {
    if state.dismissed {
        return Vec::new();
    }
    state.dismissed = true;
    state.overflow_menu = None;
    state.reading_list_menu = None;
    state.progress_visible = false;

    let mut actions = Vec::new();
    if !state.navigate_success && state.outcome.is_none() {
        if state.terminal_observed {
            state.outcome = Some(Outcome::Cancel);
            actions.push(UpdateAction::LogCancel(state.interaction_context()));
        } else {
            debug!(
                "'{}' closed before any terminal state; no outcome logged",
                state.title().text
            );
        }
    }

    if notify_host {
        actions.push(UpdateAction::NotifyDismissed);
    }
    actions
}
