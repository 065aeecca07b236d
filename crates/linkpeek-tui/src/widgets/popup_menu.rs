//! Popup menu widget
//!
//! Draws an open `PopupMenu` (the overflow menu or the reading-list popup)
//! as a bordered list with the selected entry highlighted.

use linkpeek_app::menu::PopupMenu;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::styles;

use super::modal_overlay;

pub struct PopupMenuWidget<'a, T> {
    menu: &'a PopupMenu<T>,
    title: &'a str,
}

impl<'a, T> PopupMenuWidget<'a, T> {
    pub fn new(menu: &'a PopupMenu<T>, title: &'a str) -> Self {
        Self { menu, title }
    }

    /// Width and height needed to show every entry without truncation.
    pub fn size(&self) -> (u16, u16) {
        let widest = self
            .menu
            .entries
            .iter()
            .map(|entry| entry.title.width())
            .chain(std::iter::once(self.title.width()))
            .max()
            .unwrap_or(0);
        // Borders plus the selection marker column
        let width = (widest + 6).min(u16::MAX as usize) as u16;
        let height = (self.menu.len() + 2).min(u16::MAX as usize) as u16;
        (width, height)
    }
}

impl<T> Widget for PopupMenuWidget<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        modal_overlay::clear_area(buf, area);
        modal_overlay::render_shadow(buf, area);

        let block = styles::modal_block(self.title);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let lines: Vec<Line> = self
            .menu
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                if index == self.menu.selected {
                    Line::from(vec![
                        Span::styled("▶ ", styles::focused_selected()),
                        Span::styled(entry.title.as_str(), styles::focused_selected()),
                    ])
                } else {
                    Line::from(vec![
                        Span::raw("  "),
                        Span::styled(entry.title.as_str(), styles::text_primary()),
                    ])
                }
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
