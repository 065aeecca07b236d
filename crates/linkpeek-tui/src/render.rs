//! Full-screen rendering
//!
//! The host page (one page-item row per page the session touched) fills the
//! screen; while the preview is open it is dimmed and the dialog, its
//! popups and a status line are drawn over it.

use linkpeek_app::state::PreviewState;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};

use crate::feedback::Feedback;
use crate::theme::styles;
use crate::widgets::{modal_overlay, PageItemRow, PopupMenuWidget, PreviewDialog};

const KEY_HINTS: &str = "enter open · 1/2/3 buttons · m menu · ←/→ gallery · q close";
const HOST_KEY_HINTS: &str = "↑/↓ row · enter open · 1-9 list · space select · q quit";

/// Render the whole screen for `state`
pub fn view(frame: &mut Frame, state: &PreviewState, feedback: &Feedback) {
    let area = frame.area();
    let [host_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

    render_host_page(frame, host_area, feedback, state.dismissed);

    if !state.dismissed {
        modal_overlay::dim_background(frame.buffer_mut(), host_area);
        render_preview(frame, host_area, state);
    }

    let hints = if state.dismissed {
        HOST_KEY_HINTS
    } else {
        KEY_HINTS
    };
    render_status(frame, status_area, feedback, hints);
}

/// Rows only show focus once the preview no longer holds the keys.
fn render_host_page(frame: &mut Frame, area: Rect, feedback: &Feedback, interactive: bool) {
    let block = styles::glass_block(false).title(" linkpeek ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut y = inner.y;
    for (index, row) in feedback.pages.iter().enumerate() {
        let height = PageItemRow::height(row).min(inner.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        frame.render_widget(
            PageItemRow::new(row).focused(interactive && index == feedback.focused()),
            Rect::new(inner.x, y, inner.width, height),
        );
        y += height;
    }
}

fn render_preview(frame: &mut Frame, area: Rect, state: &PreviewState) {
    let dialog = PreviewDialog::new(state);
    let dialog_area = dialog.area(area);
    frame.render_widget(dialog, dialog_area);

    if let Some(menu) = &state.overflow_menu {
        let popup = PopupMenuWidget::new(menu, " More ");
        let (width, height) = popup.size();
        let popup_area = modal_overlay::anchored_rect(width, height, dialog_area, area);
        frame.render_widget(popup, popup_area);
    }

    if let Some(menu) = &state.reading_list_menu {
        let popup = PopupMenuWidget::new(menu, " Reading lists ");
        let (width, height) = popup.size();
        let popup_area = modal_overlay::centered_rect(width, height, dialog_area);
        frame.render_widget(popup, popup_area);
    }
}

fn render_status(frame: &mut Frame, area: Rect, feedback: &Feedback, hints: &str) {
    let mut spans = Vec::new();
    match &feedback.toast {
        Some(toast) => spans.push(Span::styled(format!(" {}", toast), styles::status_yellow())),
        None => spans.push(Span::styled(format!(" {}", hints), styles::text_muted())),
    }
    if let Some(clipboard) = &feedback.clipboard {
        spans.push(Span::styled(format!("  ⧉ {}", clipboard), styles::text_secondary()));
    }
    Paragraph::new(Line::from(spans)).render(area, frame.buffer_mut());
}
