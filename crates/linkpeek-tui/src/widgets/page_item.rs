//! Page item row widget
//!
//! One list row for a page: image slot, title with search highlights,
//! optional progress and secondary action, description line and
//! reading-list chips.

use std::ops::Range;

use linkpeek_app::page_item::{ImageMode, PageItem, TitleWeight};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::styles;

const IMAGE_SLOT_WIDTH: u16 = 2;

pub struct PageItemRow<'a, T> {
    item: &'a PageItem<T>,
    focused: bool,
}

impl<'a, T> PageItemRow<'a, T> {
    pub fn new(item: &'a PageItem<T>) -> Self {
        Self {
            item,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Rows needed for `item`.
    pub fn height(item: &PageItem<T>) -> u16 {
        let description = u16::from(item.description().is_some());
        let chips = u16::from(item.chips().is_some_and(|chips| !chips.is_empty()));
        1 + description + chips
    }

    fn style(&self, base: Style) -> Style {
        if self.item.is_greyed_out() {
            styles::text_muted()
        } else {
            base
        }
    }

    fn title_style(&self) -> Style {
        let base = if self.item.is_read() {
            styles::text_secondary()
        } else {
            styles::text_primary()
        };
        let base = match self.item.title_weight() {
            TitleWeight::Bold => base.add_modifier(Modifier::BOLD),
            TitleWeight::Normal => base,
        };
        if self.focused {
            base.add_modifier(Modifier::REVERSED)
        } else {
            self.style(base)
        }
    }

    fn image_span(&self) -> Span<'static> {
        match self.item.image_mode() {
            ImageMode::Selected => Span::styled("✓ ", self.style(styles::status_green())),
            ImageMode::Thumbnail(_) => Span::styled("▣ ", self.style(styles::accent())),
            ImageMode::None => Span::raw("  "),
        }
    }

    /// Right-hand trailer: progress percentage and the action glyph.
    fn trailer(&self) -> Vec<Span<'a>> {
        let mut spans = Vec::new();
        if self.item.progress_visible() {
            spans.push(Span::styled(
                format!(" {}%", self.item.progress()),
                self.style(styles::status_yellow()),
            ));
        }
        let action = self.item.secondary_action();
        if action.visible && !action.icon.is_empty() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                action.icon.as_str(),
                self.style(styles::accent()),
            ));
        }
        spans
    }

    fn title_line(&self, width: u16) -> Line<'a> {
        let trailer = self.trailer();
        let trailer_width: usize = trailer.iter().map(|span| span.width()).sum();
        let available = (width as usize)
            .saturating_sub(IMAGE_SLOT_WIDTH as usize)
            .saturating_sub(trailer_width);

        let title = self.item.title();
        let limit = self.item.title_limit;
        let (cut, ellipsis) = fit_width(title, available, limit.ellipsis);

        let mut spans = vec![self.image_span()];
        spans.extend(highlighted_spans(
            &title[..cut],
            &self.item.highlights(),
            self.title_style(),
        ));
        if ellipsis {
            spans.push(Span::styled("…", self.title_style()));
        }

        let used: usize = spans.iter().map(|span| span.width()).sum();
        let pad = (width as usize).saturating_sub(used + trailer_width);
        if !trailer.is_empty() {
            spans.push(Span::raw(" ".repeat(pad)));
            spans.extend(trailer);
        }
        Line::from(spans)
    }

    fn description_line(&self, description: &'a str, width: u16) -> Line<'a> {
        let available = (width as usize).saturating_sub(IMAGE_SLOT_WIDTH as usize);
        let limit = self.item.description_limit;
        let (cut, ellipsis) = fit_width(description, available, limit.ellipsis);
        let mut spans = vec![
            Span::raw("  "),
            Span::styled(&description[..cut], self.style(styles::text_secondary())),
        ];
        if ellipsis {
            spans.push(Span::styled("…", self.style(styles::text_secondary())));
        }
        Line::from(spans)
    }

    fn chips_line(&self) -> Option<Line<'a>> {
        let chips = self.item.chips().filter(|chips| !chips.is_empty())?;
        let mut spans = vec![Span::raw("  ")];
        for (index, list) in chips.iter().enumerate() {
            if index > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!("[{}]", list.title),
                self.style(styles::accent()),
            ));
        }
        Some(Line::from(spans))
    }
}

impl<T> Widget for PageItemRow<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let mut lines = vec![self.title_line(area.width)];
        if let Some(description) = self.item.description() {
            lines.push(self.description_line(description, area.width));
        }
        if let Some(chips) = self.chips_line() {
            lines.push(chips);
        }

        Paragraph::new(lines).render(area, buf);
    }
}

/// Byte length of the longest prefix of `text` fitting in `width` columns,
/// and whether an ellipsis follows it.
fn fit_width(text: &str, width: usize, ellipsis: bool) -> (usize, bool) {
    if text.width() <= width {
        return (text.len(), false);
    }
    let budget = if ellipsis {
        width.saturating_sub(1)
    } else {
        width
    };

    let mut used = 0;
    let mut end = 0;
    for (index, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        end = index + ch.len_utf8();
    }
    (end, ellipsis)
}

/// Split `text` into plain and highlighted spans. Ranges past the end of
/// `text` are clipped.
fn highlighted_spans<'a>(text: &'a str, ranges: &[Range<usize>], style: Style) -> Vec<Span<'a>> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for range in ranges {
        let start = range.start.min(text.len());
        let end = range.end.min(text.len());
        if start < cursor || start >= end {
            continue;
        }
        let (Some(before), Some(matched)) = (text.get(cursor..start), text.get(start..end)) else {
            continue;
        };
        if !before.is_empty() {
            spans.push(Span::styled(before, style));
        }
        spans.push(Span::styled(matched, styles::search_highlight()));
        cursor = end;
    }

    if let Some(rest) = text.get(cursor..) {
        if !rest.is_empty() {
            spans.push(Span::styled(rest, style));
        }
    }
    spans
}
