//! Preview session - the subject and context of one preview presentation

use linkpeek_core::{HistoryEntry, HistorySource, Location, PageTitle, ReadingList};

/// Everything the preview knows about its subject when it opens.
///
/// Created when the surface opens and dropped when it is dismissed. Watch and
/// reading-list status are updated as the session progresses.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSession {
    pub history_entry: HistoryEntry,
    /// Location of the subject on the places map.
    pub location: Option<Location>,
    /// Last known location of the user.
    pub last_known_location: Option<Location>,
    pub is_watched: bool,
    pub is_in_reading_list: bool,
    /// Lists the page may be moved to from the reading-list popup.
    pub available_lists: Vec<ReadingList>,
    pub logged_in: bool,
}

impl PreviewSession {
    pub fn new(history_entry: HistoryEntry) -> Self {
        Self {
            history_entry,
            location: None,
            last_known_location: None,
            is_watched: false,
            is_in_reading_list: false,
            available_lists: Vec::new(),
            logged_in: false,
        }
    }

    pub fn with_locations(
        mut self,
        location: Option<Location>,
        last_known_location: Option<Location>,
    ) -> Self {
        self.location = location;
        self.last_known_location = last_known_location;
        self
    }

    pub fn with_watched(mut self, is_watched: bool) -> Self {
        self.is_watched = is_watched;
        self
    }

    pub fn with_reading_lists(mut self, in_list: bool, available: Vec<ReadingList>) -> Self {
        self.is_in_reading_list = in_list;
        self.available_lists = available;
        self
    }

    pub fn with_logged_in(mut self, logged_in: bool) -> Self {
        self.logged_in = logged_in;
        self
    }

    pub fn title(&self) -> &PageTitle {
        &self.history_entry.title
    }

    pub fn source(&self) -> HistorySource {
        self.history_entry.source
    }

    /// Opened from the places map rather than from an article link.
    pub fn from_places(&self) -> bool {
        self.source() == HistorySource::Places
    }
}
