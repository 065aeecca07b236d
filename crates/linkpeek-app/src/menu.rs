//! Popup menus: the overflow menu and the reading-list popup

use linkpeek_core::ReadingList;
use serde::{Deserialize, Serialize};

use crate::session::PreviewSession;

/// Overflow menu items, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuItem {
    AddToList,
    SharePage,
    Watch,
    OpenInNewTab,
    CopyLink,
    ViewOnMap,
    GetDirections,
}

impl MenuItem {
    pub const ALL: [MenuItem; 7] = [
        MenuItem::AddToList,
        MenuItem::SharePage,
        MenuItem::Watch,
        MenuItem::OpenInNewTab,
        MenuItem::CopyLink,
        MenuItem::ViewOnMap,
        MenuItem::GetDirections,
    ];

    /// Whether the item is offered for this session.
    pub fn is_visible(&self, session: &PreviewSession) -> bool {
        let places = session.from_places();
        match self {
            MenuItem::AddToList | MenuItem::SharePage => !places,
            MenuItem::Watch => places && session.logged_in,
            MenuItem::OpenInNewTab | MenuItem::GetDirections => places,
            MenuItem::CopyLink => true,
            MenuItem::ViewOnMap => !places && session.location.is_some(),
        }
    }

    pub fn title(&self, session: &PreviewSession) -> &'static str {
        match self {
            MenuItem::AddToList => "Add to reading list",
            MenuItem::SharePage => "Share",
            MenuItem::Watch if session.is_watched => "Unwatch",
            MenuItem::Watch => "Watch",
            MenuItem::OpenInNewTab => "Open in new tab",
            MenuItem::CopyLink => "Copy link address",
            MenuItem::ViewOnMap => "View on map",
            MenuItem::GetDirections => "Get directions",
        }
    }
}

/// Choices offered when saving a page that is already in a reading list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadingListChoice {
    AddToAnotherList,
    MoveTo(ReadingList),
    Remove,
}

impl ReadingListChoice {
    pub fn title(&self) -> String {
        match self {
            ReadingListChoice::AddToAnotherList => "Add to another reading list".to_string(),
            ReadingListChoice::MoveTo(list) => format!("Move to {}", list.title),
            ReadingListChoice::Remove => "Remove from reading lists".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry<T> {
    pub item: T,
    pub title: String,
}

/// An open popup with a movable selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupMenu<T> {
    pub entries: Vec<MenuEntry<T>>,
    pub selected: usize,
}

impl<T> PopupMenu<T> {
    pub fn new(entries: Vec<MenuEntry<T>>) -> Self {
        Self {
            entries,
            selected: 0,
        }
    }

    pub fn select_next(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + 1) % self.entries.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + self.entries.len() - 1) % self.entries.len();
        }
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.entries.get(self.selected).map(|e| &e.item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: PartialEq> PopupMenu<T> {
    pub fn contains(&self, item: &T) -> bool {
        self.entries.iter().any(|e| &e.item == item)
    }
}

pub type OverflowMenu = PopupMenu<MenuItem>;
pub type ReadingListMenu = PopupMenu<ReadingListChoice>;

/// Overflow menu holding only the items visible for `session`.
pub fn build_overflow_menu(session: &PreviewSession) -> OverflowMenu {
    PopupMenu::new(
        MenuItem::ALL
            .into_iter()
            .filter(|item| item.is_visible(session))
            .map(|item| MenuEntry {
                title: item.title(session).to_string(),
                item,
            })
            .collect(),
    )
}

pub fn build_reading_list_menu(session: &PreviewSession) -> ReadingListMenu {
    let mut choices = vec![ReadingListChoice::AddToAnotherList];
    choices.extend(
        session
            .available_lists
            .iter()
            .cloned()
            .map(ReadingListChoice::MoveTo),
    );
    choices.push(ReadingListChoice::Remove);

    PopupMenu::new(
        choices
            .into_iter()
            .map(|choice| MenuEntry {
                title: choice.title(),
                item: choice,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkpeek_core::{HistoryEntry, HistorySource, Location, PageTitle, WikiSite};

    fn session(source: HistorySource) -> PreviewSession {
        let title = PageTitle::new("Eiffel Tower", WikiSite::default()).unwrap();
        PreviewSession::new(HistoryEntry::new(title, source))
    }

    fn items(menu: &OverflowMenu) -> Vec<MenuItem> {
        menu.entries.iter().map(|e| e.item).collect()
    }

    #[test]
    fn test_article_menu_without_location() {
        let menu = build_overflow_menu(&session(HistorySource::InternalLink));
        assert_eq!(
            items(&menu),
            vec![MenuItem::AddToList, MenuItem::SharePage, MenuItem::CopyLink]
        );
    }

    #[test]
    fn test_article_menu_with_location_offers_map() {
        let s = session(HistorySource::InternalLink)
            .with_locations(Some(Location::new(48.85, 2.29)), None);
        assert!(build_overflow_menu(&s).contains(&MenuItem::ViewOnMap));
    }

    #[test]
    fn test_places_menu_logged_out_hides_watch() {
        let menu = build_overflow_menu(&session(HistorySource::Places));
        assert_eq!(
            items(&menu),
            vec![
                MenuItem::OpenInNewTab,
                MenuItem::CopyLink,
                MenuItem::GetDirections
            ]
        );
    }

    #[test]
    fn test_places_menu_watch_title_follows_status() {
        let s = session(HistorySource::Places)
            .with_logged_in(true)
            .with_watched(true);
        let menu = build_overflow_menu(&s);
        let watch = menu
            .entries
            .iter()
            .find(|e| e.item == MenuItem::Watch)
            .unwrap();
        assert_eq!(watch.title, "Unwatch");
    }

    #[test]
    fn test_selection_wraps() {
        let mut menu = build_overflow_menu(&session(HistorySource::InternalLink));
        menu.select_previous();
        assert_eq!(menu.selected_item(), Some(&MenuItem::CopyLink));
        menu.select_next();
        assert_eq!(menu.selected_item(), Some(&MenuItem::AddToList));
    }

    #[test]
    fn test_reading_list_menu_choices() {
        let s = session(HistorySource::Places).with_reading_lists(
            true,
            vec![ReadingList {
                id: 4,
                title: "Paris".into(),
            }],
        );
        let menu = build_reading_list_menu(&s);
        assert_eq!(menu.len(), 3);
        assert_eq!(menu.entries[1].title, "Move to Paris");
        assert_eq!(menu.entries[2].item, ReadingListChoice::Remove);
    }
}
