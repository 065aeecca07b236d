//! Collaborator traits
//!
//! The preview never fetches, persists or navigates by itself. Every outward
//! effect goes through one of these traits, injected as trait objects when a
//! session is created. Calls are fire-and-forget: an `Err` is logged by the
//! action dispatcher and the session carries on.

use std::fmt;
use std::sync::Arc;

use linkpeek_core::prelude::*;
use linkpeek_core::{HistoryEntry, Location, PageTitle};

use crate::state::InteractionContext;

/// Requests back to the view model that produces `ViewState`s.
#[cfg_attr(test, mockall::automock)]
pub trait PreviewViewModel: Send + Sync {
    /// Fetch gallery images for the current summary.
    fn load_gallery(&self) -> Result<()>;

    /// Re-subscribe after a failure; a fresh `Loading` is expected next.
    fn reload(&self) -> Result<()>;

    /// Toggle watch status; the result arrives as `ViewState::Watch`.
    fn watch_or_unwatch(&self, currently_watched: bool) -> Result<()>;
}

/// Interaction analytics for the preview.
#[cfg_attr(test, mockall::automock)]
pub trait PreviewAnalytics: Send + Sync {
    fn preview_shown(&self, ctx: &InteractionContext) -> Result<()>;
    fn link_click(&self, ctx: &InteractionContext) -> Result<()>;
    fn cancel(&self, ctx: &InteractionContext) -> Result<()>;
    fn places_action(&self, action: &str, active_interface: &str) -> Result<()>;
}

/// Destinations outside the preview.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn load_page(&self, entry: &HistoryEntry, new_tab: bool) -> Result<()>;
    fn open_places(&self, title: &PageTitle, location: Location) -> Result<()>;
    fn directions(&self, location: Location, label: &str) -> Result<()>;
    fn open_gallery(&self, title: &PageTitle, image_name: &str) -> Result<()>;
    fn edit_page(&self, title: &PageTitle) -> Result<()>;
}

/// Reading-list persistence.
#[cfg_attr(test, mockall::automock)]
pub trait ReadingLists: Send + Sync {
    /// Add to the default list, or let the user pick one when
    /// `add_to_default` is false.
    fn add(&self, title: &PageTitle, add_to_default: bool) -> Result<()>;
    fn move_to(&self, title: &PageTitle, list_id: i64) -> Result<()>;
    fn remove(&self, title: &PageTitle) -> Result<()>;
}

/// The surface hosting the preview: share sheet, clipboard, feedback.
#[cfg_attr(test, mockall::automock)]
pub trait PreviewHost: Send + Sync {
    fn share(&self, title: &PageTitle) -> Result<()>;
    fn copy_to_clipboard(&self, text: &str) -> Result<()>;
    fn show_message(&self, message: &str) -> Result<()>;
    fn watch_confirmation(&self, title: &PageTitle, is_watched: bool, message: &str)
        -> Result<()>;
    /// The preview was dismissed.
    fn dismissed(&self) -> Result<()>;
}

/// All collaborators of one preview session.
#[derive(Clone)]
pub struct Collaborators {
    pub view_model: Arc<dyn PreviewViewModel>,
    pub analytics: Arc<dyn PreviewAnalytics>,
    pub navigator: Arc<dyn Navigator>,
    pub reading_lists: Arc<dyn ReadingLists>,
    pub host: Arc<dyn PreviewHost>,
}

impl Collaborators {
    /// Use a single object implementing every collaborator trait.
    pub fn from_shared<T>(shared: Arc<T>) -> Self
    where
        T: PreviewViewModel + PreviewAnalytics + Navigator + ReadingLists + PreviewHost + 'static,
    {
        Self {
            view_model: shared.clone(),
            analytics: shared.clone(),
            navigator: shared.clone(),
            reading_lists: shared.clone(),
            host: shared,
        }
    }
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
