//! Collaborators that report every call as a headless event

use std::sync::Arc;

use linkpeek_app::services::{
    Navigator, PreviewAnalytics, PreviewHost, PreviewViewModel, ReadingLists,
};
use linkpeek_app::InteractionContext;
use linkpeek_core::prelude::*;
use linkpeek_core::{HistoryEntry, Location, PageTitle};

use super::{EventSink, HeadlessEvent};

/// Emits one event per collaborator call and forwards view model requests.
pub struct HeadlessCollaborators {
    sink: EventSink,
    view_model: Arc<dyn PreviewViewModel>,
}

impl HeadlessCollaborators {
    pub fn new(sink: EventSink, view_model: Arc<dyn PreviewViewModel>) -> Arc<Self> {
        Arc::new(Self { sink, view_model })
    }

    /// Report `event`; a failed write surfaces as the caller's error kind.
    fn emit(&self, event: HeadlessEvent, failure: fn(String) -> Error) -> Result<()> {
        self.sink
            .try_emit(&event)
            .map_err(|e| failure(e.to_string()))
    }

    fn analytics(&self, kind: &str, ctx: &InteractionContext) -> Result<()> {
        info!("Analytics {} for '{}'", kind, ctx.title.text);
        self.emit(
            HeadlessEvent::analytics(kind, &ctx.title.text, ctx.page_id),
            Error::analytics,
        )
    }
}

fn coordinates(location: Location) -> String {
    format!("{:.5},{:.5}", location.latitude, location.longitude)
}

impl PreviewViewModel for HeadlessCollaborators {
    fn load_gallery(&self) -> Result<()> {
        self.emit(HeadlessEvent::view_model("load_gallery"), Error::collaborator)?;
        self.view_model.load_gallery()
    }

    fn reload(&self) -> Result<()> {
        self.emit(HeadlessEvent::view_model("reload"), Error::collaborator)?;
        self.view_model.reload()
    }

    fn watch_or_unwatch(&self, currently_watched: bool) -> Result<()> {
        let request = if currently_watched { "unwatch" } else { "watch" };
        self.emit(HeadlessEvent::view_model(request), Error::collaborator)?;
        self.view_model.watch_or_unwatch(currently_watched)
    }
}

impl PreviewAnalytics for HeadlessCollaborators {
    fn preview_shown(&self, ctx: &InteractionContext) -> Result<()> {
        self.analytics("preview_shown", ctx)
    }

    fn link_click(&self, ctx: &InteractionContext) -> Result<()> {
        self.analytics("link_click", ctx)
    }

    fn cancel(&self, ctx: &InteractionContext) -> Result<()> {
        self.analytics("cancel", ctx)
    }

    fn places_action(&self, action: &str, active_interface: &str) -> Result<()> {
        self.emit(
            HeadlessEvent::places_action(action, active_interface),
            Error::analytics,
        )
    }
}

impl Navigator for HeadlessCollaborators {
    fn load_page(&self, entry: &HistoryEntry, new_tab: bool) -> Result<()> {
        let event = HeadlessEvent::navigate(
            "page",
            &entry.title.text,
            new_tab,
            Some(entry.source.as_str().to_string()),
        );
        self.emit(event, Error::navigation)
    }

    fn open_places(&self, title: &PageTitle, location: Location) -> Result<()> {
        let event =
            HeadlessEvent::navigate("places", &title.text, false, Some(coordinates(location)));
        self.emit(event, Error::navigation)
    }

    fn directions(&self, location: Location, label: &str) -> Result<()> {
        let event =
            HeadlessEvent::navigate("directions", label, false, Some(coordinates(location)));
        self.emit(event, Error::navigation)
    }

    fn open_gallery(&self, title: &PageTitle, image_name: &str) -> Result<()> {
        let event = HeadlessEvent::navigate(
            "gallery",
            &title.text,
            false,
            Some(image_name.to_string()),
        );
        self.emit(event, Error::navigation)
    }

    fn edit_page(&self, title: &PageTitle) -> Result<()> {
        let event = HeadlessEvent::navigate("edit", &title.text, false, None);
        self.emit(event, Error::navigation)
    }
}

impl ReadingLists for HeadlessCollaborators {
    fn add(&self, title: &PageTitle, add_to_default: bool) -> Result<()> {
        let operation = if add_to_default { "add_default" } else { "add" };
        let event = HeadlessEvent::reading_list(operation, &title.text, None);
        self.emit(event, Error::reading_list)
    }

    fn move_to(&self, title: &PageTitle, list_id: i64) -> Result<()> {
        let event = HeadlessEvent::reading_list("move", &title.text, Some(list_id));
        self.emit(event, Error::reading_list)
    }

    fn remove(&self, title: &PageTitle) -> Result<()> {
        let event = HeadlessEvent::reading_list("remove", &title.text, None);
        self.emit(event, Error::reading_list)
    }
}

impl PreviewHost for HeadlessCollaborators {
    fn share(&self, title: &PageTitle) -> Result<()> {
        self.emit(HeadlessEvent::host("share", &title.uri()), Error::collaborator)
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        self.emit(HeadlessEvent::host("clipboard", text), Error::collaborator)
    }

    fn show_message(&self, message: &str) -> Result<()> {
        self.emit(HeadlessEvent::host("message", message), Error::collaborator)
    }

    fn watch_confirmation(&self, title: &PageTitle, is_watched: bool, message: &str) -> Result<()> {
        debug!("'{}' watched: {}", title.text, is_watched);
        let kind = if is_watched { "watched" } else { "unwatched" };
        self.emit(HeadlessEvent::host(kind, message), Error::watchlist)
    }

    fn dismissed(&self) -> Result<()> {
        self.emit(HeadlessEvent::dismissed(), Error::collaborator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::Mutex;

    use linkpeek_core::{HistorySource, WikiSite};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn events(&self) -> Vec<serde_json::Value> {
            let text = String::from_utf8(self.0.lock().unwrap().clone()).unwrap();
            text.lines()
                .map(|line| serde_json::from_str(line).unwrap())
                .collect()
        }
    }

    #[derive(Default)]
    struct CountingViewModel {
        requests: Mutex<Vec<&'static str>>,
    }

    impl PreviewViewModel for CountingViewModel {
        fn load_gallery(&self) -> Result<()> {
            self.requests.lock().unwrap().push("gallery");
            Ok(())
        }

        fn reload(&self) -> Result<()> {
            self.requests.lock().unwrap().push("reload");
            Ok(())
        }

        fn watch_or_unwatch(&self, _currently_watched: bool) -> Result<()> {
            self.requests.lock().unwrap().push("watch");
            Ok(())
        }
    }

    fn title() -> PageTitle {
        PageTitle::new("Rust", WikiSite::default()).unwrap()
    }

    #[test]
    fn test_view_model_requests_are_forwarded() {
        let captured = Captured::default();
        let view_model = Arc::new(CountingViewModel::default());
        let collaborators = HeadlessCollaborators::new(
            EventSink::new(captured.clone()),
            view_model.clone(),
        );

        collaborators.reload().unwrap();
        collaborators.watch_or_unwatch(true).unwrap();

        assert_eq!(*view_model.requests.lock().unwrap(), vec!["reload", "watch"]);
        let events = captured.events();
        assert_eq!(events[0]["request"], "reload");
        assert_eq!(events[1]["request"], "unwatch");
    }

    #[test]
    fn test_navigation_events() {
        let captured = Captured::default();
        let collaborators = HeadlessCollaborators::new(
            EventSink::new(captured.clone()),
            Arc::new(CountingViewModel::default()),
        );

        let entry = HistoryEntry::new(title(), HistorySource::Search);
        collaborators.load_page(&entry, true).unwrap();
        collaborators
            .directions(Location::new(48.8584, 2.2945), "Eiffel Tower")
            .unwrap();

        let events = captured.events();
        assert_eq!(events[0]["event"], "navigate");
        assert_eq!(events[0]["target"], "page");
        assert_eq!(events[0]["new_tab"], true);
        assert_eq!(events[0]["detail"], "search");
        assert_eq!(events[1]["target"], "directions");
        assert_eq!(events[1]["detail"], "48.85840,2.29450");
    }

    #[test]
    fn test_host_events() {
        let captured = Captured::default();
        let collaborators = HeadlessCollaborators::new(
            EventSink::new(captured.clone()),
            Arc::new(CountingViewModel::default()),
        );

        collaborators.share(&title()).unwrap();
        collaborators
            .watch_confirmation(&title(), true, "Added to watchlist")
            .unwrap();
        collaborators.move_to(&title(), 4).unwrap();

        let events = captured.events();
        assert_eq!(events[0]["kind"], "share");
        assert_eq!(events[0]["text"], "https://en.wikipedia.org/wiki/Rust");
        assert_eq!(events[1]["kind"], "watched");
        assert_eq!(events[2]["operation"], "move");
        assert_eq!(events[2]["list_id"], 4);
    }

    #[test]
    fn test_write_failures_carry_the_collaborator_kind() {
        struct ClosedPipe;

        impl Write for ClosedPipe {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::from(io::ErrorKind::BrokenPipe))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let view_model = Arc::new(CountingViewModel::default());
        let collaborators =
            HeadlessCollaborators::new(EventSink::new(ClosedPipe), view_model.clone());
        let entry = HistoryEntry::new(title(), HistorySource::InternalLink);
        let ctx = InteractionContext {
            title: title(),
            db_name: "enwiki".to_string(),
            page_id: Some(7),
            source: HistorySource::InternalLink,
        };

        let err = collaborators.cancel(&ctx).unwrap_err();
        assert!(matches!(err, Error::Analytics { .. }), "{:?}", err);
        let err = collaborators.load_page(&entry, false).unwrap_err();
        assert!(matches!(err, Error::Navigation { .. }), "{:?}", err);
        let err = collaborators.remove(&title()).unwrap_err();
        assert!(matches!(err, Error::ReadingList { .. }), "{:?}", err);
        let err = collaborators
            .watch_confirmation(&title(), true, "Added to watchlist")
            .unwrap_err();
        assert!(matches!(err, Error::Watchlist { .. }), "{:?}", err);
        assert!(err.is_recoverable());

        // Unreported requests never reach the view model
        assert!(collaborators.reload().is_err());
        assert!(view_model.requests.lock().unwrap().is_empty());
    }
}
