//! Action handlers: UpdateAction dispatch to collaborators
//!
//! Every action maps to one collaborator call. A failing call is logged and
//! isolated so later actions and view states are still handled.

use linkpeek_core::prelude::*;

use crate::handler::UpdateAction;
use crate::services::Collaborators;

/// Execute an action against the session's collaborators
pub fn handle_action(action: UpdateAction, collaborators: &Collaborators) {
    let label = action.label();
    trace!("Dispatching {}", label);

    if let Err(e) = dispatch(action, collaborators) {
        if e.is_recoverable() {
            warn!("Action {} failed: {}", label, e);
        } else {
            error!("Action {} failed: {}", label, e);
        }
    }
}

fn dispatch(action: UpdateAction, c: &Collaborators) -> Result<()> {
    match action {
        UpdateAction::LoadGallery => c.view_model.load_gallery(),
        UpdateAction::Reload => c.view_model.reload(),
        UpdateAction::WatchOrUnwatch { currently_watched } => {
            c.view_model.watch_or_unwatch(currently_watched)
        }

        UpdateAction::LogPreviewShown(ctx) => c.analytics.preview_shown(&ctx),
        UpdateAction::LogLinkClick(ctx) => c.analytics.link_click(&ctx),
        UpdateAction::LogCancel(ctx) => c.analytics.cancel(&ctx),
        UpdateAction::LogPlacesEvent {
            action,
            active_interface,
        } => c.analytics.places_action(action, active_interface),

        UpdateAction::LoadPage { entry, new_tab } => c.navigator.load_page(&entry, new_tab),
        UpdateAction::OpenPlaces { title, location } => c.navigator.open_places(&title, location),
        UpdateAction::GetDirections { location, label } => {
            c.navigator.directions(location, &label)
        }
        UpdateAction::OpenGallery { title, image_name } => {
            c.navigator.open_gallery(&title, &image_name)
        }
        UpdateAction::EditStub { title } => c.navigator.edit_page(&title),

        UpdateAction::AddToReadingList {
            title,
            add_to_default,
        } => c.reading_lists.add(&title, add_to_default),
        UpdateAction::MoveToReadingList { title, list_id } => {
            c.reading_lists.move_to(&title, list_id)
        }
        UpdateAction::RemoveFromReadingLists { title } => c.reading_lists.remove(&title),

        UpdateAction::Share { title } => c.host.share(&title),
        UpdateAction::CopyLink { uri } => c.host.copy_to_clipboard(&uri),
        UpdateAction::ShowMessage(message) => c.host.show_message(&message),
        UpdateAction::ShowWatchConfirmation {
            title,
            is_watched,
            message,
        } => c.host.watch_confirmation(&title, is_watched, &message),
        UpdateAction::NotifyDismissed => c.host.dismissed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{
        MockNavigator, MockPreviewAnalytics, MockPreviewHost, MockPreviewViewModel,
        MockReadingLists,
    };
    use linkpeek_core::{HistoryEntry, HistorySource, PageTitle, WikiSite};
    use mockall::predicate::*;
    use std::sync::Arc;

    fn collaborators(
        view_model: MockPreviewViewModel,
        analytics: MockPreviewAnalytics,
        navigator: MockNavigator,
        reading_lists: MockReadingLists,
        host: MockPreviewHost,
    ) -> Collaborators {
        Collaborators {
            view_model: Arc::new(view_model),
            analytics: Arc::new(analytics),
            navigator: Arc::new(navigator),
            reading_lists: Arc::new(reading_lists),
            host: Arc::new(host),
        }
    }

    fn title() -> PageTitle {
        PageTitle::new("Ferris", WikiSite::default()).unwrap()
    }

    #[test]
    fn test_load_page_routes_to_navigator() {
        let mut navigator = MockNavigator::new();
        navigator
            .expect_load_page()
            .withf(|entry, new_tab| entry.title.text == "Ferris" && !*new_tab)
            .times(1)
            .returning(|_, _| Ok(()));

        let c = collaborators(
            MockPreviewViewModel::new(),
            MockPreviewAnalytics::new(),
            navigator,
            MockReadingLists::new(),
            MockPreviewHost::new(),
        );

        handle_action(
            UpdateAction::LoadPage {
                entry: HistoryEntry::new(title(), HistorySource::InternalLink),
                new_tab: false,
            },
            &c,
        );
    }

    #[test]
    fn test_places_event_routes_to_analytics() {
        let mut analytics = MockPreviewAnalytics::new();
        analytics
            .expect_places_action()
            .withf(|action, iface| action == "share_click" && iface == "detail_toolbar")
            .times(1)
            .returning(|_, _| Ok(()));

        let c = collaborators(
            MockPreviewViewModel::new(),
            analytics,
            MockNavigator::new(),
            MockReadingLists::new(),
            MockPreviewHost::new(),
        );

        handle_action(
            UpdateAction::LogPlacesEvent {
                action: "share_click",
                active_interface: "detail_toolbar",
            },
            &c,
        );
    }

    #[test]
    fn test_failing_collaborator_is_isolated() {
        let mut reading_lists = MockReadingLists::new();
        reading_lists
            .expect_add()
            .times(1)
            .returning(|_, _| Err(Error::reading_list("database locked")));
        let mut host = MockPreviewHost::new();
        host.expect_dismissed().times(1).returning(|| Ok(()));

        let c = collaborators(
            MockPreviewViewModel::new(),
            MockPreviewAnalytics::new(),
            MockNavigator::new(),
            reading_lists,
            host,
        );

        handle_action(
            UpdateAction::AddToReadingList {
                title: title(),
                add_to_default: true,
            },
            &c,
        );
        // The next action still reaches its collaborator
        handle_action(UpdateAction::NotifyDismissed, &c);
    }

    #[test]
    fn test_watch_request_carries_current_status() {
        let mut view_model = MockPreviewViewModel::new();
        view_model
            .expect_watch_or_unwatch()
            .with(eq(true))
            .times(1)
            .returning(|_| Ok(()));

        let c = collaborators(
            view_model,
            MockPreviewAnalytics::new(),
            MockNavigator::new(),
            MockReadingLists::new(),
            MockPreviewHost::new(),
        );

        handle_action(
            UpdateAction::WatchOrUnwatch {
                currently_watched: true,
            },
            &c,
        );
    }
}
