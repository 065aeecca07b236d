//! Preview state (Model in TEA pattern)

use linkpeek_core::{
    ErrorCause, GalleryItem, HistorySource, LinkPreviewErrorType, PageTitle,
};

use crate::config::Settings;
use crate::menu::{OverflowMenu, ReadingListMenu};
use crate::overlay::OverlayState;
use crate::session::PreviewSession;

/// Placeholder shown for stub articles (blank extract in the main namespace).
pub const STUB_PLACEHOLDER: &str =
    "This article is a stub. You can help by expanding it with more information.";

/// Rendered summary content.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentView {
    pub page_id: i64,
    /// Plain-text title.
    pub title: String,
    /// Plain-text extract, or the stub placeholder.
    pub extract: String,
    /// The extract is the stub placeholder (shown in italics).
    pub is_stub: bool,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub is_disambiguation: bool,
}

/// Rendered error surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorView {
    /// Plain-text title of the requested page.
    pub title: String,
    pub error_type: LinkPreviewErrorType,
    pub cause: ErrorCause,
}

/// Main content/error area of the surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PrimaryRegion {
    /// Nothing settled yet.
    #[default]
    Empty,
    Content(ContentView),
    Error(ErrorView),
}

impl PrimaryRegion {
    pub fn is_settled(&self) -> bool {
        !matches!(self, PrimaryRegion::Empty)
    }
}

/// Analytics context for the link-preview interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionContext {
    pub title: PageTitle,
    pub db_name: String,
    /// Known once a summary has rendered.
    pub page_id: Option<i64>,
    pub source: HistorySource,
}

/// Analytics outcome of a session; at most one is ever logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The user continued to the page.
    Click,
    /// The user left without navigating.
    Cancel,
}

/// Complete state of one preview session.
#[derive(Debug, Clone)]
pub struct PreviewState {
    pub session: PreviewSession,
    pub settings: Settings,

    // ── Primary region ────────────────────────────────────────────────────────
    pub primary: PrimaryRegion,
    pub progress_visible: bool,
    /// Places distance label, e.g. `1.2 km`.
    pub distance: Option<String>,
    pub edit_button_visible: bool,

    // ── Gallery strip ─────────────────────────────────────────────────────────
    pub gallery: Vec<GalleryItem>,
    pub gallery_visible: bool,
    pub gallery_selected: usize,

    // ── Affordances ───────────────────────────────────────────────────────────
    /// `None` until the surface is first displayed.
    pub overlay: Option<OverlayState>,
    pub toolbar_navigation_enabled: bool,
    pub overflow_button_visible: bool,
    pub overflow_menu: Option<OverflowMenu>,
    pub reading_list_menu: Option<ReadingListMenu>,

    // ── Analytics bookkeeping ─────────────────────────────────────────────────
    pub interaction: Option<InteractionContext>,
    pub preview_shown_logged: bool,
    /// A Content or Error state has been observed.
    pub terminal_observed: bool,
    pub navigate_success: bool,
    pub outcome: Option<Outcome>,

    // ── Session lifetime ──────────────────────────────────────────────────────
    /// An offline retry was requested; the next Loading opens a new epoch.
    pub awaiting_retry: bool,
    pub dismissed: bool,
    /// Number of view states observed.
    pub states_observed: usize,
}

impl PreviewState {
    pub fn new(session: PreviewSession, settings: Settings) -> Self {
        Self {
            session,
            settings,
            primary: PrimaryRegion::Empty,
            progress_visible: false,
            distance: None,
            edit_button_visible: false,
            gallery: Vec::new(),
            gallery_visible: true,
            gallery_selected: 0,
            overlay: None,
            toolbar_navigation_enabled: true,
            overflow_button_visible: true,
            overflow_menu: None,
            reading_list_menu: None,
            interaction: None,
            preview_shown_logged: false,
            terminal_observed: false,
            navigate_success: false,
            outcome: None,
            awaiting_retry: false,
            dismissed: false,
            states_observed: 0,
        }
    }

    pub fn title(&self) -> &PageTitle {
        self.session.title()
    }

    /// Interaction context, created on first use.
    pub fn interaction_context(&mut self) -> InteractionContext {
        let session = &self.session;
        self.interaction
            .get_or_insert_with(|| InteractionContext {
                title: session.title().clone(),
                db_name: session.title().wiki_site.db_name(),
                page_id: None,
                source: session.source(),
            })
            .clone()
    }

    pub fn content(&self) -> Option<&ContentView> {
        match &self.primary {
            PrimaryRegion::Content(content) => Some(content),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorView> {
        match &self.primary {
            PrimaryRegion::Error(error) => Some(error),
            _ => None,
        }
    }

    /// A popup currently captures input.
    pub fn popup_open(&self) -> bool {
        self.overflow_menu.is_some() || self.reading_list_menu.is_some()
    }

    pub fn selected_gallery_item(&self) -> Option<&GalleryItem> {
        if self.gallery_visible {
            self.gallery.get(self.gallery_selected)
        } else {
            None
        }
    }
}
