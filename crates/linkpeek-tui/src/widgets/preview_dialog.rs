//! Preview dialog widget
//!
//! Draws the whole link preview surface for one `PreviewState`: the title
//! toolbar, the progress and meta lines, the extract or error message, the
//! stub edit button, the gallery strip and the overlay action bar.
//! Popups are drawn on top by the caller (see `render::view`).

use linkpeek_app::overlay::{ButtonState, OverlayState};
use linkpeek_app::state::{PreviewState, PrimaryRegion};
use linkpeek_core::from_html;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme::{palette, styles};

use super::modal_overlay;

/// Preferred dialog height, including borders
const PREFERRED_HEIGHT: u16 = 18;

pub struct PreviewDialog<'a> {
    state: &'a PreviewState,
}

impl<'a> PreviewDialog<'a> {
    pub fn new(state: &'a PreviewState) -> Self {
        Self { state }
    }

    /// Where the dialog sits inside `area`.
    pub fn area(&self, area: Rect) -> Rect {
        let width = self.state.settings.ui.dialog_width.min(area.width.saturating_sub(2));
        let height = PREFERRED_HEIGHT.min(area.height.saturating_sub(2));
        modal_overlay::centered_rect(width, height, area)
    }

    fn toolbar_title(&self) -> Line<'a> {
        let title = match self.state.content() {
            Some(content) => content.title.clone(),
            None => from_html(&self.state.title().display_text),
        };
        let mut spans = vec![Span::raw(" "), Span::styled(title, styles::accent_bold())];
        if self.state.toolbar_navigation_enabled {
            spans.push(Span::styled(" ›", styles::accent()));
        }
        spans.push(Span::raw(" "));
        Line::from(spans)
    }

    fn meta_lines(&self) -> Vec<Line<'a>> {
        let mut lines = Vec::new();

        if let Some(description) = self.state.content().and_then(|c| c.description.as_deref()) {
            lines.push(Line::from(Span::styled(
                description.to_string(),
                styles::text_secondary().add_modifier(Modifier::ITALIC),
            )));
        }
        if let Some(distance) = &self.state.distance {
            lines.push(Line::from(vec![
                Span::styled("⌖ ", styles::accent()),
                Span::styled(distance.clone(), styles::text_secondary()),
            ]));
        }
        if let Some(url) = self.state.content().and_then(|c| c.thumbnail_url.as_deref()) {
            lines.push(Line::from(vec![
                Span::styled("▣ ", styles::accent()),
                Span::styled(url.to_string(), styles::text_muted()),
            ]));
        }
        if self.state.progress_visible {
            lines.push(Line::from(Span::styled("◌ Loading…", styles::status_yellow())));
        }
        lines
    }

    fn body(&self) -> Paragraph<'a> {
        let lines = match &self.state.primary {
            PrimaryRegion::Empty => Vec::new(),
            PrimaryRegion::Content(content) => {
                let style = if content.is_stub {
                    styles::text_muted().add_modifier(Modifier::ITALIC)
                } else {
                    styles::text_primary()
                };
                vec![Line::from(Span::styled(content.extract.clone(), style))]
            }
            PrimaryRegion::Error(error) => vec![
                Line::from(Span::styled(
                    error.title.clone(),
                    styles::text_primary().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    error.error_type.message(),
                    styles::status_red(),
                )),
            ],
        };
        Paragraph::new(lines).wrap(Wrap { trim: true })
    }

    fn gallery_line(&self) -> Option<Line<'a>> {
        if !self.state.gallery_visible || self.state.gallery.is_empty() {
            return None;
        }
        let mut spans = vec![Span::styled("◀ ", styles::text_muted())];
        for (index, item) in self.state.gallery.iter().enumerate() {
            if index > 0 {
                spans.push(Span::raw(" "));
            }
            let name = item.name.strip_prefix("File:").unwrap_or(&item.name);
            let style = if index == self.state.gallery_selected {
                styles::focused_selected()
            } else {
                styles::text_secondary()
            };
            spans.push(Span::styled(format!(" {} ", name), style));
        }
        spans.push(Span::styled(" ▶", styles::text_muted()));
        Some(Line::from(spans))
    }

    fn overlay_line(overlay: &OverlayState) -> Line<'a> {
        let buttons: [(&str, &ButtonState, Style); 3] = [
            ("1", &overlay.primary, styles::accent_bold()),
            ("2", &overlay.secondary, styles::accent()),
            ("3", &overlay.tertiary, styles::accent()),
        ];

        let mut spans = Vec::new();
        for (key, button, style) in buttons {
            if !button.visible {
                continue;
            }
            if !spans.is_empty() {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(format!("[{}] ", key), styles::text_muted()));
            spans.push(Span::styled(button.label.clone(), style));
        }
        Line::from(spans)
    }
}

impl Widget for PreviewDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        modal_overlay::clear_area(buf, area);
        modal_overlay::render_shadow(buf, area);

        let mut block = styles::glass_block(true)
            .style(Style::default().bg(palette::DIALOG_BG))
            .title(self.toolbar_title());
        if self.state.overflow_button_visible {
            block = block.title_top(Line::from(Span::styled(" ⋮ ", styles::accent())).right_aligned());
        }

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let meta = self.meta_lines();
        let edit_height = u16::from(self.state.edit_button_visible);
        let gallery = self.gallery_line();
        let overlay = self.state.overlay.as_ref();

        let [meta_area, body_area, edit_area, gallery_area, bar_area] = Layout::vertical([
            Constraint::Length(meta.len() as u16),
            Constraint::Min(1),
            Constraint::Length(edit_height),
            Constraint::Length(u16::from(gallery.is_some())),
            Constraint::Length(u16::from(overlay.is_some())),
        ])
        .areas(inner);

        Paragraph::new(meta).render(meta_area, buf);
        self.body().render(body_area, buf);

        if self.state.edit_button_visible {
            Paragraph::new(Line::from(vec![
                Span::styled("[e] ", styles::text_muted()),
                Span::styled("Edit this article", styles::accent()),
            ]))
            .render(edit_area, buf);
        }
        if let Some(gallery) = gallery {
            Paragraph::new(gallery).render(gallery_area, buf);
        }
        if let Some(overlay) = overlay {
            Paragraph::new(Self::overlay_line(overlay)).render(bar_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use linkpeek_app::handler::update;
    use linkpeek_app::message::Message;
    use linkpeek_app::test_utils::{content_state, offline_state, test_gallery, test_state, test_summary};
    use linkpeek_core::{HistorySource, ViewState};

    fn shown(source: HistorySource) -> PreviewState {
        let mut state = test_state(source);
        update(&mut state, Message::SurfaceShown);
        state
    }

    fn apply(state: &mut PreviewState, view_state: ViewState) {
        update(state, Message::ViewState(view_state));
    }

    fn draw(state: &PreviewState) -> TestTerminal {
        let mut term = TestTerminal::new();
        let dialog = PreviewDialog::new(state);
        let area = dialog.area(term.area());
        term.render_widget(dialog, area);
        term
    }

    #[test]
    fn test_loading_shows_progress_and_title() {
        let mut state = shown(HistorySource::InternalLink);
        apply(&mut state, ViewState::Loading);

        let term = draw(&state);
        assert!(term.buffer_contains("Rust ›"));
        assert!(term.buffer_contains("Loading…"));
        assert!(term.buffer_contains("[1] Continue to article"));
        assert!(term.buffer_contains("[2] Open in new tab"));
        assert!(term.buffer_contains("⋮"));
    }

    #[test]
    fn test_content_shows_extract_and_gallery() {
        let mut state = shown(HistorySource::InternalLink);
        apply(&mut state, ViewState::Loading);
        apply(&mut state, content_state(7, "<i>Rust</i> language"));
        apply(
            &mut state,
            ViewState::Gallery {
                images: test_gallery(&["Ferris.png", "Logo.svg"]),
            },
        );

        let term = draw(&state);
        assert!(term.buffer_contains("Rust language ›"));
        assert!(term.buffer_contains("Summary text"));
        assert!(term.buffer_contains(" Ferris.png "));
        assert!(term.buffer_contains(" Logo.svg "));
        assert!(!term.buffer_contains("Loading…"));
    }

    #[test]
    fn test_stub_shows_edit_button() {
        let mut state = shown(HistorySource::InternalLink);
        apply(
            &mut state,
            ViewState::Content {
                summary: test_summary(3, "Tiny", Some("  ")),
            },
        );

        let term = draw(&state);
        assert!(term.buffer_contains("This article is a stub"));
        assert!(term.buffer_contains("[e] Edit this article"));
    }

    #[test]
    fn test_offline_error_shows_retry() {
        let mut state = shown(HistorySource::InternalLink);
        apply(&mut state, ViewState::Loading);
        apply(&mut state, offline_state());

        let term = draw(&state);
        assert!(term.buffer_contains("You're offline"));
        assert!(term.buffer_contains("[1] Retry"));
        assert!(!term.buffer_contains("Open in new tab"));
    }

    #[test]
    fn test_missing_page_disables_toolbar_and_menu() {
        let mut state = shown(HistorySource::InternalLink);
        apply(
            &mut state,
            ViewState::Error {
                cause: linkpeek_core::ErrorCause::not_found(),
            },
        );

        let term = draw(&state);
        assert!(term.buffer_contains("This page does not exist"));
        assert!(term.buffer_contains("[1] Go back"));
        assert!(!term.buffer_contains("›"));
        assert!(!term.buffer_contains("⋮"));
    }

    #[test]
    fn test_places_bar_has_three_buttons() {
        let state = shown(HistorySource::Places);
        let term = draw(&state);
        assert!(term.buffer_contains("[1] Share"));
        assert!(term.buffer_contains("[2] Save"));
        assert!(term.buffer_contains("[3] Read"));
    }

    #[test]
    fn test_dialog_area_respects_configured_width() {
        let mut state = test_state(HistorySource::InternalLink);
        state.settings.ui.dialog_width = 40;
        let area = PreviewDialog::new(&state).area(ratatui::layout::Rect::new(0, 0, 80, 24));
        assert_eq!(area.width, 40);
        assert_eq!(area.height, PREFERRED_HEIGHT);
    }

    #[test]
    fn test_compact_terminal_does_not_panic() {
        let mut state = shown(HistorySource::Places);
        apply(&mut state, content_state(7, "Rust"));
        let mut term = TestTerminal::compact();
        let dialog = PreviewDialog::new(&state);
        let area = dialog.area(term.area());
        term.render_widget(dialog, area);
    }
}
