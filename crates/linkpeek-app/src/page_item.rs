//! Page item row - reusable list entry for a page
//!
//! Holds the presentation state of one row (title, description, image,
//! selection, secondary action, progress, reading-list chips, search
//! highlighting) and forwards clicks to a typed callback.

use std::ops::Range;
use std::sync::Arc;

use linkpeek_core::{from_html, keyword_ranges, ReadingList};

/// Receives the clicks of a `PageItem<T>`.
pub trait PageItemCallback<T>: Send + Sync {
    fn on_click(&self, item: Option<&T>);

    /// Returns true when the long click was consumed.
    fn on_long_click(&self, item: Option<&T>) -> bool;

    fn on_action_click(&self, item: Option<&T>);

    fn on_list_chip_click(&self, reading_list: &ReadingList);
}

/// What occupies the image slot of the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageMode {
    /// No image, or the image slot is hidden.
    None,
    Thumbnail(String),
    /// Selection checkmark; replaces the thumbnail.
    Selected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleWeight {
    #[default]
    Bold,
    Normal,
}

/// Secondary action button at the end of the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryAction {
    /// Glyph drawn for the action.
    pub icon: String,
    pub visible: bool,
    /// Accessible hint for the action.
    pub hint: Option<String>,
}

/// Truncation settings for a text line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextLimit {
    pub max_lines: Option<u16>,
    pub ellipsis: bool,
}

pub struct PageItem<T> {
    pub item: Option<T>,
    callback: Option<Arc<dyn PageItemCallback<T>>>,

    title: String,
    pub title_limit: TextLimit,
    title_weight_override: Option<TitleWeight>,
    description: Option<String>,
    pub description_limit: TextLimit,

    image_url: Option<String>,
    image_visible: bool,
    selected: bool,

    secondary_action: SecondaryAction,
    progress: u8,
    progress_visible: bool,

    /// `None` when the chip group is hidden.
    chips: Option<Vec<ReadingList>>,
    search_query: Option<String>,
    greyed_out: bool,
    read: bool,
}

impl<T> Default for PageItem<T> {
    fn default() -> Self {
        Self {
            item: None,
            callback: None,
            title: String::new(),
            title_limit: TextLimit::default(),
            title_weight_override: None,
            description: None,
            description_limit: TextLimit::default(),
            image_url: None,
            image_visible: true,
            selected: false,
            secondary_action: SecondaryAction {
                icon: String::new(),
                visible: false,
                hint: None,
            },
            progress: 0,
            progress_visible: false,
            chips: None,
            search_query: None,
            greyed_out: false,
            read: false,
        }
    }
}

impl<T> PageItem<T> {
    pub fn new(item: T) -> Self {
        Self {
            item: Some(item),
            ..Self::default()
        }
    }

    pub fn set_callback(&mut self, callback: Arc<dyn PageItemCallback<T>>) {
        self.callback = Some(callback);
    }

    // ── Text ──────────────────────────────────────────────────────────────────

    /// Set the title from display HTML.
    pub fn set_title(&mut self, text: Option<&str>) {
        self.title = text.map(from_html).unwrap_or_default();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title_weight(&mut self, weight: TitleWeight) {
        self.title_weight_override = Some(weight);
    }

    /// Explicit weight wins; otherwise read rows use the normal weight.
    pub fn title_weight(&self) -> TitleWeight {
        self.title_weight_override.unwrap_or(if self.read {
            TitleWeight::Normal
        } else {
            TitleWeight::Bold
        })
    }

    pub fn set_description(&mut self, text: Option<&str>) {
        self.description = text.map(str::to_string);
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Highlight matches of `query` within the title.
    pub fn set_search_query(&mut self, query: Option<&str>) {
        self.search_query = query.filter(|q| !q.trim().is_empty()).map(str::to_string);
    }

    /// Byte ranges of the title to embolden.
    pub fn highlights(&self) -> Vec<Range<usize>> {
        match &self.search_query {
            Some(query) => keyword_ranges(&self.title, query),
            None => Vec::new(),
        }
    }

    // ── Image / selection ─────────────────────────────────────────────────────

    pub fn set_image_url(&mut self, url: Option<&str>) {
        self.image_url = url.filter(|u| !u.is_empty()).map(str::to_string);
    }

    pub fn set_image_visible(&mut self, visible: bool) {
        self.image_visible = visible;
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn image_mode(&self) -> ImageMode {
        if !self.image_visible {
            ImageMode::None
        } else if self.selected {
            ImageMode::Selected
        } else {
            match &self.image_url {
                Some(url) => ImageMode::Thumbnail(url.clone()),
                None => ImageMode::None,
            }
        }
    }

    // ── Secondary action / progress ───────────────────────────────────────────

    pub fn set_secondary_action_icon(&mut self, icon: &str, show: bool) {
        self.secondary_action.icon = icon.to_string();
        self.secondary_action.visible = show;
    }

    pub fn set_action_hint(&mut self, hint: &str) {
        self.secondary_action.hint = Some(hint.to_string());
    }

    pub fn secondary_action(&self) -> &SecondaryAction {
        &self.secondary_action
    }

    /// Progress percentage, clamped to 100.
    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(100);
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn set_circular_progress_visible(&mut self, visible: bool) {
        self.progress_visible = visible;
    }

    pub fn progress_visible(&self) -> bool {
        self.progress_visible
    }

    // ── Reading-list chips ────────────────────────────────────────────────────

    pub fn set_up_chip_group(&mut self, reading_lists: Vec<ReadingList>) {
        self.chips = Some(reading_lists);
    }

    pub fn hide_chip_group(&mut self) {
        self.chips = None;
    }

    pub fn chips(&self) -> Option<&[ReadingList]> {
        self.chips.as_deref()
    }

    // ── Read / greyed-out ─────────────────────────────────────────────────────

    pub fn set_greyed_out(&mut self, greyed_out: bool) {
        self.greyed_out = greyed_out;
    }

    pub fn is_greyed_out(&self) -> bool {
        self.greyed_out
    }

    pub fn set_read(&mut self, read: bool) {
        self.read = read;
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    // ── Clicks ────────────────────────────────────────────────────────────────

    pub fn click(&self) {
        if let Some(callback) = &self.callback {
            callback.on_click(self.item.as_ref());
        }
    }

    /// Long click; never consumes the event so the default handling runs too.
    pub fn long_click(&self) -> bool {
        if let Some(callback) = &self.callback {
            callback.on_long_click(self.item.as_ref());
        }
        false
    }

    pub fn action_click(&self) {
        if !self.secondary_action.visible {
            return;
        }
        if let Some(callback) = &self.callback {
            callback.on_action_click(self.item.as_ref());
        }
    }

    /// Click the chip at `index`; returns false when there is no such chip.
    pub fn chip_click(&self, index: usize) -> bool {
        let Some(list) = self.chips.as_ref().and_then(|chips| chips.get(index)) else {
            return false;
        };
        if let Some(callback) = &self.callback {
            callback.on_list_chip_click(list);
        }
        true
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for PageItem<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageItem")
            .field("item", &self.item)
            .field("title", &self.title)
            .field("selected", &self.selected)
            .field("read", &self.read)
            .finish_non_exhaustive()
    }
}
