//! Terminal-side collaborators
//!
//! In the terminal there is no app around the preview, so navigation,
//! reading lists and host feedback land in a `Feedback` model that the view
//! draws behind and below the dialog: one page-item row per page the
//! session touched, the last toast message and the clipboard. Once the
//! preview is closed the rows take the keys: they can be focused, opened and
//! their reading-list chips followed.

use std::sync::{Arc, Mutex, MutexGuard};

use linkpeek_app::page_item::{PageItem, PageItemCallback};
use linkpeek_app::services::{
    Collaborators, Navigator, PreviewAnalytics, PreviewHost, PreviewViewModel, ReadingLists,
};
use linkpeek_app::session::PreviewSession;
use linkpeek_app::state::InteractionContext;
use linkpeek_app::InputKey;
use linkpeek_core::prelude::*;
use linkpeek_core::{HistoryEntry, HistorySource, Location, PageTitle, ReadingList};

/// Secondary action glyph on every row
const ROW_ACTION_ICON: &str = "⋮";
const WATCHED_ICON: &str = "★";

/// Something a host-page row was clicked for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RowClick {
    Open(String),
    Options(String),
    List(String),
}

/// Row callback; clicks are queued and applied by `Feedback` once the row
/// borrow ends.
#[derive(Debug, Default)]
struct HostPageCallback {
    clicks: Mutex<Vec<RowClick>>,
}

impl HostPageCallback {
    fn push(&self, click: RowClick) {
        if let Ok(mut clicks) = self.clicks.lock() {
            clicks.push(click);
        }
    }

    fn take(&self) -> Vec<RowClick> {
        self.clicks
            .lock()
            .map(|mut clicks| std::mem::take(&mut *clicks))
            .unwrap_or_default()
    }
}

impl PageItemCallback<HistoryEntry> for HostPageCallback {
    fn on_click(&self, item: Option<&HistoryEntry>) {
        if let Some(entry) = item {
            self.push(RowClick::Open(entry.title.text.clone()));
        }
    }

    fn on_long_click(&self, _item: Option<&HistoryEntry>) -> bool {
        false
    }

    fn on_action_click(&self, item: Option<&HistoryEntry>) {
        if let Some(entry) = item {
            self.push(RowClick::Options(entry.title.text.clone()));
        }
    }

    fn on_list_chip_click(&self, reading_list: &ReadingList) {
        self.push(RowClick::List(reading_list.title.clone()));
    }
}

/// Host-page model shared by the collaborators and the view.
#[derive(Debug)]
pub struct Feedback {
    pub pages: Vec<PageItem<HistoryEntry>>,
    pub toast: Option<String>,
    pub clipboard: Option<String>,
    /// Lists known to the session, for naming chips after a move.
    lists: Vec<ReadingList>,
    /// Row that host-page keys act on.
    focused: usize,
    /// Highlighted in every row when the preview came from a search.
    search_query: Option<String>,
    callback: Arc<HostPageCallback>,
}

pub type SharedFeedback = Arc<Mutex<Feedback>>;

impl Feedback {
    /// Start with one row for the previewed page.
    pub fn new(session: &PreviewSession) -> Self {
        let mut feedback = Self {
            pages: Vec::new(),
            toast: None,
            clipboard: None,
            lists: session.available_lists.clone(),
            focused: 0,
            search_query: (session.source() == HistorySource::Search)
                .then(|| session.title().text.clone()),
            callback: Arc::new(HostPageCallback::default()),
        };

        let row = feedback.row_for(&session.history_entry);
        if session.is_in_reading_list {
            row.set_up_chip_group(vec![ReadingList {
                id: 0,
                title: "Saved".to_string(),
            }]);
        }
        if session.is_watched {
            row.set_secondary_action_icon(WATCHED_ICON, true);
        }
        feedback
    }

    pub fn shared(session: &PreviewSession) -> SharedFeedback {
        Arc::new(Mutex::new(Self::new(session)))
    }

    /// Row for `entry`, appended if the page is new.
    fn row_for(&mut self, entry: &HistoryEntry) -> &mut PageItem<HistoryEntry> {
        let existing = self.pages.iter().position(|row| {
            row.item
                .as_ref()
                .is_some_and(|item| item.title.text == entry.title.text)
        });
        let index = match existing {
            Some(index) => index,
            None => {
                let mut row = PageItem::new(entry.clone());
                row.set_title(Some(&entry.title.display_text));
                row.set_description(entry.title.description.as_deref());
                row.set_image_url(entry.title.thumb_url.as_deref());
                row.set_secondary_action_icon(ROW_ACTION_ICON, true);
                row.title_limit.ellipsis = true;
                row.description_limit.ellipsis = true;
                row.set_search_query(self.search_query.as_deref());
                row.set_callback(self.callback.clone());
                self.pages.push(row);
                self.pages.len() - 1
            }
        };
        &mut self.pages[index]
    }

    fn row_for_title(&mut self, title: &PageTitle) -> &mut PageItem<HistoryEntry> {
        let source = self
            .pages
            .first()
            .and_then(|row| row.item.as_ref())
            .map(|item| item.source)
            .unwrap_or_default();
        self.row_for(&HistoryEntry::new(title.clone(), source))
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    /// Handle a key on the host page; returns false when the page is left.
    pub fn handle_key(&mut self, key: InputKey) -> bool {
        match key {
            InputKey::Char('q') | InputKey::Esc | InputKey::CharCtrl('c') => return false,
            InputKey::Up | InputKey::Char('k') => self.focus(self.focused.saturating_sub(1)),
            InputKey::Down | InputKey::Char('j') => self.focus(self.focused + 1),
            InputKey::Char(' ') => {
                if let Some(row) = self.pages.get_mut(self.focused) {
                    let selected = row.is_selected();
                    row.set_selected(!selected);
                }
            }
            InputKey::Enter => {
                if let Some(row) = self.pages.get(self.focused) {
                    row.click();
                }
            }
            InputKey::Char('m') => {
                if let Some(row) = self.pages.get(self.focused) {
                    row.action_click();
                }
            }
            InputKey::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                let clicked = self
                    .pages
                    .get(self.focused)
                    .is_some_and(|row| row.chip_click(index));
                if !clicked {
                    self.toast(format!("No reading list {}", c));
                }
            }
            _ => {}
        }
        self.apply_clicks();
        true
    }

    fn focus(&mut self, index: usize) {
        if self.pages.is_empty() {
            return;
        }
        self.focused = index.min(self.pages.len() - 1);
    }

    fn apply_clicks(&mut self) {
        for click in self.callback.take() {
            match click {
                RowClick::Open(title) => {
                    if let Some(row) = self.pages.iter_mut().find(|row| {
                        row.item.as_ref().is_some_and(|item| item.title.text == title)
                    }) {
                        row.set_read(true);
                    }
                    self.toast(format!("Opened {}", title));
                }
                RowClick::Options(title) => self.toast(format!("Options for {}", title)),
                RowClick::List(list) => self.toast(format!("Showing reading list {}", list)),
            }
        }
    }

    fn toast(&mut self, message: impl Into<String>) {
        self.toast = Some(message.into());
    }

    fn list_title(&self, list_id: i64) -> String {
        self.lists
            .iter()
            .find(|list| list.id == list_id)
            .map(|list| list.title.clone())
            .unwrap_or_else(|| format!("List {}", list_id))
    }
}

/// Lock the shared model; a poisoned lock means a render panicked.
pub fn lock(feedback: &SharedFeedback) -> Result<MutexGuard<'_, Feedback>> {
    feedback
        .lock()
        .map_err(|_| Error::terminal("feedback lock poisoned"))
}

/// Collaborators that report into `Feedback` and the log.
#[derive(Debug, Clone)]
pub struct TuiCollaborators {
    feedback: SharedFeedback,
}

impl TuiCollaborators {
    pub fn new(feedback: SharedFeedback) -> Arc<Self> {
        Arc::new(Self { feedback })
    }

    /// Bundle with the view model that feeds the session.
    pub fn collaborators(self: &Arc<Self>, view_model: Arc<dyn PreviewViewModel>) -> Collaborators {
        Collaborators {
            view_model,
            analytics: self.clone(),
            navigator: self.clone(),
            reading_lists: self.clone(),
            host: self.clone(),
        }
    }

    /// Apply `f` to the shared model; a poisoned lock is reported as the
    /// caller's error kind.
    fn update<R>(
        &self,
        failure: fn(String) -> Error,
        f: impl FnOnce(&mut Feedback) -> R,
    ) -> Result<R> {
        let mut feedback = self
            .feedback
            .lock()
            .map_err(|_| failure("feedback lock poisoned".to_string()))?;
        Ok(f(&mut feedback))
    }
}

impl PreviewAnalytics for TuiCollaborators {
    fn preview_shown(&self, ctx: &InteractionContext) -> Result<()> {
        info!(
            "Analytics: preview shown title={} wiki={} page_id={:?} source={}",
            ctx.title.text,
            ctx.db_name,
            ctx.page_id,
            ctx.source.as_str()
        );
        Ok(())
    }

    fn link_click(&self, ctx: &InteractionContext) -> Result<()> {
        info!("Analytics: link click title={}", ctx.title.text);
        Ok(())
    }

    fn cancel(&self, ctx: &InteractionContext) -> Result<()> {
        info!("Analytics: cancel title={}", ctx.title.text);
        Ok(())
    }

    fn places_action(&self, action: &str, active_interface: &str) -> Result<()> {
        info!("Analytics: places {} ({})", action, active_interface);
        Ok(())
    }
}

impl Navigator for TuiCollaborators {
    fn load_page(&self, entry: &HistoryEntry, new_tab: bool) -> Result<()> {
        self.update(Error::navigation, |feedback| {
            let row = feedback.row_for(entry);
            row.set_read(true);
            feedback.toast(if new_tab {
                format!("Opened {} in a new tab", entry.title.text)
            } else {
                format!("Opened {}", entry.title.text)
            });
        })
    }

    fn open_places(&self, title: &PageTitle, location: Location) -> Result<()> {
        self.update(Error::navigation, |feedback| {
            feedback.toast(format!(
                "Showing {} on the map ({:.4}, {:.4})",
                title.text, location.latitude, location.longitude
            ));
        })
    }

    fn directions(&self, location: Location, label: &str) -> Result<()> {
        self.update(Error::navigation, |feedback| {
            feedback.toast(format!(
                "Directions to {} ({:.4}, {:.4})",
                label, location.latitude, location.longitude
            ));
        })
    }

    fn open_gallery(&self, title: &PageTitle, image_name: &str) -> Result<()> {
        self.update(Error::navigation, |feedback| {
            feedback.toast(format!("Gallery of {}: {}", title.text, image_name));
        })
    }

    fn edit_page(&self, title: &PageTitle) -> Result<()> {
        self.update(Error::navigation, |feedback| {
            feedback.toast(format!("Editing {}", title.text))
        })
    }
}

impl ReadingLists for TuiCollaborators {
    fn add(&self, title: &PageTitle, add_to_default: bool) -> Result<()> {
        self.update(Error::reading_list, |feedback| {
            let list = if add_to_default {
                ReadingList {
                    id: 0,
                    title: "Saved".to_string(),
                }
            } else {
                feedback.lists.first().cloned().unwrap_or(ReadingList {
                    id: 0,
                    title: "Saved".to_string(),
                })
            };
            let row = feedback.row_for_title(title);
            let mut chips = row.chips().map(<[ReadingList]>::to_vec).unwrap_or_default();
            if !chips.contains(&list) {
                chips.push(list.clone());
            }
            row.set_up_chip_group(chips);
            feedback.toast(format!("Saved {} to {}", title.text, list.title));
        })
    }

    fn move_to(&self, title: &PageTitle, list_id: i64) -> Result<()> {
        self.update(Error::reading_list, |feedback| {
            let list = ReadingList {
                id: list_id,
                title: feedback.list_title(list_id),
            };
            let name = list.title.clone();
            feedback.row_for_title(title).set_up_chip_group(vec![list]);
            feedback.toast(format!("Moved {} to {}", title.text, name));
        })
    }

    fn remove(&self, title: &PageTitle) -> Result<()> {
        self.update(Error::reading_list, |feedback| {
            feedback.row_for_title(title).hide_chip_group();
            feedback.toast(format!("Removed {} from reading lists", title.text));
        })
    }
}

impl PreviewHost for TuiCollaborators {
    fn share(&self, title: &PageTitle) -> Result<()> {
        self.update(Error::collaborator, |feedback| {
            feedback.toast(format!("Share {}", title.uri()))
        })
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        self.update(Error::collaborator, |feedback| {
            feedback.clipboard = Some(text.to_string())
        })
    }

    fn show_message(&self, message: &str) -> Result<()> {
        self.update(Error::collaborator, |feedback| feedback.toast(message))
    }

    fn watch_confirmation(&self, title: &PageTitle, is_watched: bool, message: &str) -> Result<()> {
        self.update(Error::watchlist, |feedback| {
            let icon = if is_watched { WATCHED_ICON } else { ROW_ACTION_ICON };
            feedback
                .row_for_title(title)
                .set_secondary_action_icon(icon, true);
            feedback.toast(message);
        })
    }

    fn dismissed(&self) -> Result<()> {
        debug!("Preview dismissed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkpeek_app::test_utils::{test_session, test_title};
    use linkpeek_core::HistorySource;

    fn setup(session: &PreviewSession) -> (SharedFeedback, Arc<TuiCollaborators>) {
        let feedback = Feedback::shared(session);
        let collaborators = TuiCollaborators::new(feedback.clone());
        (feedback, collaborators)
    }

    #[test]
    fn test_starts_with_previewed_page() {
        let session = test_session(HistorySource::InternalLink);
        let (feedback, _) = setup(&session);
        let feedback = lock(&feedback).unwrap();
        assert_eq!(feedback.pages.len(), 1);
        assert_eq!(feedback.pages[0].title(), "Rust");
        assert!(feedback.pages[0].chips().is_none());
    }

    #[test]
    fn test_load_page_marks_row_read() {
        let session = test_session(HistorySource::Search);
        let (feedback, tui) = setup(&session);

        tui.load_page(&session.history_entry, true).unwrap();

        let feedback = lock(&feedback).unwrap();
        assert_eq!(feedback.pages.len(), 1);
        assert!(feedback.pages[0].is_read());
        assert_eq!(
            feedback.toast.as_deref(),
            Some("Opened Rust in a new tab")
        );
    }

    #[test]
    fn test_reading_list_chips_follow_calls() {
        let session = test_session(HistorySource::Places).with_reading_lists(
            true,
            vec![ReadingList {
                id: 4,
                title: "Paris".into(),
            }],
        );
        let (feedback, tui) = setup(&session);
        let title = test_title("Rust");

        tui.move_to(&title, 4).unwrap();
        {
            let feedback = lock(&feedback).unwrap();
            let chips = feedback.pages[0].chips().unwrap();
            assert_eq!(chips.len(), 1);
            assert_eq!(chips[0].title, "Paris");
        }

        tui.remove(&title).unwrap();
        assert!(lock(&feedback).unwrap().pages[0].chips().is_none());

        tui.add(&title, true).unwrap();
        let feedback = lock(&feedback).unwrap();
        assert_eq!(feedback.pages[0].chips().unwrap()[0].title, "Saved");
    }

    #[test]
    fn test_other_titles_get_their_own_row() {
        let session = test_session(HistorySource::InternalLink);
        let (feedback, tui) = setup(&session);
        tui.add(&test_title("Cargo"), true).unwrap();

        let feedback = lock(&feedback).unwrap();
        assert_eq!(feedback.pages.len(), 2);
        assert_eq!(feedback.pages[1].title(), "Cargo");
    }

    #[test]
    fn test_clipboard_and_messages() {
        let session = test_session(HistorySource::InternalLink);
        let (feedback, tui) = setup(&session);
        tui.copy_to_clipboard("https://en.wikipedia.org/wiki/Rust")
            .unwrap();
        tui.show_message("Address copied").unwrap();

        let feedback = lock(&feedback).unwrap();
        assert_eq!(
            feedback.clipboard.as_deref(),
            Some("https://en.wikipedia.org/wiki/Rust")
        );
        assert_eq!(feedback.toast.as_deref(), Some("Address copied"));
    }

    #[test]
    fn test_watch_confirmation_marks_row() {
        let session = test_session(HistorySource::Places);
        let (feedback, tui) = setup(&session);
        tui.watch_confirmation(&test_title("Rust"), true, "Added to watchlist")
            .unwrap();

        let feedback = lock(&feedback).unwrap();
        assert_eq!(feedback.pages[0].secondary_action().icon, WATCHED_ICON);
        assert_eq!(feedback.toast.as_deref(), Some("Added to watchlist"));
    }

    #[test]
    fn test_poisoned_model_reports_collaborator_kind() {
        let session = test_session(HistorySource::InternalLink);
        let (feedback, tui) = setup(&session);

        let poisoner = feedback.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("render panicked");
        })
        .join();

        let err = tui.load_page(&session.history_entry, false).unwrap_err();
        assert!(matches!(err, Error::Navigation { .. }), "{:?}", err);
        let err = tui
            .watch_confirmation(&test_title("Rust"), true, "Added to watchlist")
            .unwrap_err();
        assert!(matches!(err, Error::Watchlist { .. }), "{:?}", err);
        let err = tui.remove(&test_title("Rust")).unwrap_err();
        assert!(matches!(err, Error::ReadingList { .. }), "{:?}", err);
    }

    #[test]
    fn test_enter_opens_focused_row() {
        let session = test_session(HistorySource::InternalLink);
        let (feedback, tui) = setup(&session);
        tui.add(&test_title("Cargo"), true).unwrap();

        let mut feedback = lock(&feedback).unwrap();
        assert!(feedback.handle_key(InputKey::Down));
        assert!(feedback.handle_key(InputKey::Down));
        assert_eq!(feedback.focused(), 1);

        feedback.handle_key(InputKey::Enter);
        assert!(feedback.pages[1].is_read());
        assert!(!feedback.pages[0].is_read());
        assert_eq!(feedback.toast.as_deref(), Some("Opened Cargo"));

        feedback.handle_key(InputKey::Up);
        feedback.handle_key(InputKey::Char('m'));
        assert_eq!(feedback.toast.as_deref(), Some("Options for Rust"));
    }

    #[test]
    fn test_digit_follows_reading_list_chip() {
        let session = test_session(HistorySource::InternalLink).with_reading_lists(true, vec![]);
        let (feedback, _) = setup(&session);

        let mut feedback = lock(&feedback).unwrap();
        feedback.handle_key(InputKey::Char('1'));
        assert_eq!(
            feedback.toast.as_deref(),
            Some("Showing reading list Saved")
        );

        feedback.handle_key(InputKey::Char('2'));
        assert_eq!(feedback.toast.as_deref(), Some("No reading list 2"));
    }

    #[test]
    fn test_space_toggles_selection_and_q_leaves() {
        let session = test_session(HistorySource::InternalLink);
        let (feedback, _) = setup(&session);

        let mut feedback = lock(&feedback).unwrap();
        feedback.handle_key(InputKey::Char(' '));
        assert!(feedback.pages[0].is_selected());
        feedback.handle_key(InputKey::Char(' '));
        assert!(!feedback.pages[0].is_selected());

        assert!(!feedback.handle_key(InputKey::Char('q')));
        assert!(!feedback.handle_key(InputKey::Esc));
    }

    #[test]
    fn test_search_preview_highlights_rows() {
        let session = test_session(HistorySource::Search);
        let (feedback, tui) = setup(&session);
        tui.add(&test_title("Rust compiler"), true).unwrap();

        let feedback = lock(&feedback).unwrap();
        assert!(!feedback.pages[0].highlights().is_empty());
        assert!(!feedback.pages[1].highlights().is_empty());

        let session = test_session(HistorySource::InternalLink);
        let plain = Feedback::new(&session);
        assert!(plain.pages[0].highlights().is_empty());
    }
}
