//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `view_state`: One handler per observed `ViewState` variant
//! - `interaction`: Toolbar, overlay, popup and gallery handlers
//! - `outcome`: Navigation, dismissal and analytics reconciliation
//! - `keys`: Key event handlers

pub(crate) mod interaction;
pub(crate) mod keys;
pub(crate) mod outcome;
pub(crate) mod update;
pub(crate) mod view_state;


use linkpeek_core::{HistoryEntry, Location, PageTitle};

use crate::message::Message;
use crate::state::InteractionContext;

// Re-export main entry point
pub use keys::handle_key;
pub use update::update;

/// Side effects for the engine to carry out after update
///
/// Each maps to exactly one fire-and-forget collaborator call.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    // ─────────────────────────────────────────────────────────
    // Data source requests
    // ─────────────────────────────────────────────────────────
    /// Fetch gallery images for the rendered summary
    LoadGallery,
    /// Re-subscribe after an offline failure
    Reload,
    /// Toggle the watch status of the subject
    WatchOrUnwatch { currently_watched: bool },

    // ─────────────────────────────────────────────────────────
    // Analytics
    // ─────────────────────────────────────────────────────────
    /// The summary rendered for the first time
    LogPreviewShown(InteractionContext),
    /// The user continued to the page
    LogLinkClick(InteractionContext),
    /// The user left without navigating
    LogCancel(InteractionContext),
    /// Places map interaction
    LogPlacesEvent {
        action: &'static str,
        active_interface: &'static str,
    },

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    LoadPage { entry: HistoryEntry, new_tab: bool },
    OpenPlaces { title: PageTitle, location: Location },
    GetDirections { location: Location, label: String },
    OpenGallery { title: PageTitle, image_name: String },
    EditStub { title: PageTitle },

    // ─────────────────────────────────────────────────────────
    // Reading lists
    // ─────────────────────────────────────────────────────────
    AddToReadingList { title: PageTitle, add_to_default: bool },
    MoveToReadingList { title: PageTitle, list_id: i64 },
    RemoveFromReadingLists { title: PageTitle },

    // ─────────────────────────────────────────────────────────
    // Host surface
    // ─────────────────────────────────────────────────────────
    Share { title: PageTitle },
    CopyLink { uri: String },
    ShowMessage(String),
    ShowWatchConfirmation {
        title: PageTitle,
        is_watched: bool,
        message: String,
    },
    /// The surface was dismissed
    NotifyDismissed,
}

impl UpdateAction {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::LoadGallery => "load_gallery",
            Self::Reload => "reload",
            Self::WatchOrUnwatch { .. } => "watch_or_unwatch",
            Self::LogPreviewShown(_) => "log_preview_shown",
            Self::LogLinkClick(_) => "log_link_click",
            Self::LogCancel(_) => "log_cancel",
            Self::LogPlacesEvent { .. } => "log_places_event",
            Self::LoadPage { .. } => "load_page",
            Self::OpenPlaces { .. } => "open_places",
            Self::GetDirections { .. } => "get_directions",
            Self::OpenGallery { .. } => "open_gallery",
            Self::EditStub { .. } => "edit_stub",
            Self::AddToReadingList { .. } => "add_to_reading_list",
            Self::MoveToReadingList { .. } => "move_to_reading_list",
            Self::RemoveFromReadingLists { .. } => "remove_from_reading_lists",
            Self::Share { .. } => "share",
            Self::CopyLink { .. } => "copy_link",
            Self::ShowMessage(_) => "show_message",
            Self::ShowWatchConfirmation { .. } => "show_watch_confirmation",
            Self::NotifyDismissed => "notify_dismissed",
        }
    }
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Actions for the engine to perform, in order
    pub actions: Vec<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            actions: Vec::new(),
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            actions: vec![action],
        }
    }

    pub fn actions(actions: Vec<UpdateAction>) -> Self {
        Self {
            message: None,
            actions,
        }
    }
}
