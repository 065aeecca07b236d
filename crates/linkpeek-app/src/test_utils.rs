//! Test utilities for preview sessions
//!
//! Fixture builders plus `RecordingCollaborators`, a fake implementing every
//! collaborator trait that records each call in order.

use std::sync::{Arc, Mutex};

use linkpeek_core::prelude::*;
use linkpeek_core::{
    ErrorCause, GalleryItem, HistoryEntry, HistorySource, Location, PageSummary, PageTitle,
    ViewState, WikiSite,
};

use crate::config::Settings;
use crate::services::{
    Collaborators, Navigator, PreviewAnalytics, PreviewHost, PreviewViewModel, ReadingLists,
};
use crate::session::PreviewSession;
use crate::state::{InteractionContext, PreviewState};

/// Creates a title on English Wikipedia.
pub fn test_title(text: &str) -> PageTitle {
    PageTitle::new(text, WikiSite::default()).expect("valid test title")
}

/// Creates a session for `Rust` opened from `source`.
pub fn test_session(source: HistorySource) -> PreviewSession {
    PreviewSession::new(HistoryEntry::new(test_title("Rust"), source))
}

/// Creates a fresh preview state for `Rust` opened from `source`.
pub fn test_state(source: HistorySource) -> PreviewState {
    PreviewState::new(test_session(source), Settings::default())
}

/// Creates a standard summary.
pub fn test_summary(page_id: i64, display_title: &str, extract: Option<&str>) -> PageSummary {
    PageSummary {
        page_id,
        display_title: display_title.to_string(),
        extract: extract.map(str::to_string),
        thumbnail_url: Some(format!("https://upload.example.org/{}.png", page_id)),
        description: None,
        namespace: None,
        page_type: "standard".to_string(),
    }
}

/// Creates gallery items named after `names`.
pub fn test_gallery(names: &[&str]) -> Vec<GalleryItem> {
    names
        .iter()
        .map(|name| GalleryItem {
            name: format!("File:{}", name),
            thumb_url: format!("https://upload.example.org/{}", name),
            caption: None,
        })
        .collect()
}

pub fn content_state(page_id: i64, display_title: &str) -> ViewState {
    ViewState::Content {
        summary: test_summary(page_id, display_title, Some("<b>Summary</b> text")),
    }
}

pub fn offline_state() -> ViewState {
    ViewState::Error {
        cause: ErrorCause::offline(),
    }
}

/// One recorded collaborator call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    LoadGallery,
    Reload,
    WatchOrUnwatch(bool),
    PreviewShown(Option<i64>),
    LinkClick,
    Cancel,
    PlacesAction(String, String),
    LoadPage { title: String, new_tab: bool },
    OpenPlaces(String),
    Directions(String),
    OpenGallery(String),
    EditPage(String),
    AddToList { title: String, add_to_default: bool },
    MoveToList(String, i64),
    RemoveFromLists(String),
    Share(String),
    CopyToClipboard(String),
    ShowMessage(String),
    WatchConfirmation(bool),
    Dismissed,
}

/// Fake collaborators recording every call.
#[derive(Debug, Default)]
pub struct RecordingCollaborators {
    calls: Mutex<Vec<Call>>,
    /// Calls for which an error is returned after recording
    failing: Mutex<Vec<Call>>,
}

impl RecordingCollaborators {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Wrap in the `Collaborators` bundle.
    pub fn collaborators(self: &Arc<Self>) -> Collaborators {
        Collaborators::from_shared(self.clone())
    }

    /// Make `call` fail after it is recorded.
    pub fn fail_on(&self, call: Call) {
        self.failing.lock().expect("recorder lock").push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("recorder lock").clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    fn record(&self, call: Call) -> Result<()> {
        let fail = self
            .failing
            .lock()
            .expect("recorder lock")
            .contains(&call);
        self.calls.lock().expect("recorder lock").push(call);
        if fail {
            Err(Error::collaborator("injected failure"))
        } else {
            Ok(())
        }
    }
}

impl PreviewViewModel for RecordingCollaborators {
    fn load_gallery(&self) -> Result<()> {
        self.record(Call::LoadGallery)
    }

    fn reload(&self) -> Result<()> {
        self.record(Call::Reload)
    }

    fn watch_or_unwatch(&self, currently_watched: bool) -> Result<()> {
        self.record(Call::WatchOrUnwatch(currently_watched))
    }
}

impl PreviewAnalytics for RecordingCollaborators {
    fn preview_shown(&self, ctx: &InteractionContext) -> Result<()> {
        self.record(Call::PreviewShown(ctx.page_id))
    }

    fn link_click(&self, _ctx: &InteractionContext) -> Result<()> {
        self.record(Call::LinkClick)
    }

    fn cancel(&self, _ctx: &InteractionContext) -> Result<()> {
        self.record(Call::Cancel)
    }

    fn places_action(&self, action: &str, active_interface: &str) -> Result<()> {
        self.record(Call::PlacesAction(
            action.to_string(),
            active_interface.to_string(),
        ))
    }
}

impl Navigator for RecordingCollaborators {
    fn load_page(&self, entry: &HistoryEntry, new_tab: bool) -> Result<()> {
        self.record(Call::LoadPage {
            title: entry.title.text.clone(),
            new_tab,
        })
    }

    fn open_places(&self, title: &PageTitle, _location: Location) -> Result<()> {
        self.record(Call::OpenPlaces(title.text.clone()))
    }

    fn directions(&self, _location: Location, label: &str) -> Result<()> {
        self.record(Call::Directions(label.to_string()))
    }

    fn open_gallery(&self, _title: &PageTitle, image_name: &str) -> Result<()> {
        self.record(Call::OpenGallery(image_name.to_string()))
    }

    fn edit_page(&self, title: &PageTitle) -> Result<()> {
        self.record(Call::EditPage(title.text.clone()))
    }
}

impl ReadingLists for RecordingCollaborators {
    fn add(&self, title: &PageTitle, add_to_default: bool) -> Result<()> {
        self.record(Call::AddToList {
            title: title.text.clone(),
            add_to_default,
        })
    }

    fn move_to(&self, title: &PageTitle, list_id: i64) -> Result<()> {
        self.record(Call::MoveToList(title.text.clone(), list_id))
    }

    fn remove(&self, title: &PageTitle) -> Result<()> {
        self.record(Call::RemoveFromLists(title.text.clone()))
    }
}

impl PreviewHost for RecordingCollaborators {
    fn share(&self, title: &PageTitle) -> Result<()> {
        self.record(Call::Share(title.text.clone()))
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        self.record(Call::CopyToClipboard(text.to_string()))
    }

    fn show_message(&self, message: &str) -> Result<()> {
        self.record(Call::ShowMessage(message.to_string()))
    }

    fn watch_confirmation(&self, _title: &PageTitle, is_watched: bool, _message: &str) -> Result<()> {
        self.record(Call::WatchConfirmation(is_watched))
    }

    fn dismissed(&self) -> Result<()> {
        self.record(Call::Dismissed)
    }
}
