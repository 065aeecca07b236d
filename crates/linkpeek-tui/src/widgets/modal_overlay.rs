//! Modal placement helpers shared by the dialog and its popups.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Clear, Widget};

use crate::theme::palette;

/// Center a `width` x `height` rect in `area`, clamped to the area.
///
/// ```
/// use ratatui::layout::Rect;
/// use linkpeek_tui::widgets::modal_overlay::centered_rect;
///
/// let modal = centered_rect(40, 10, Rect::new(0, 0, 80, 24));
/// assert_eq!(modal, Rect::new(20, 7, 40, 10));
/// ```
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Place a `width` x `height` rect under the top-right corner of `anchor`,
/// the way a dropdown opens from a toolbar button.
///
/// The result is clamped so it never leaves `bounds`.
pub fn anchored_rect(width: u16, height: u16, anchor: Rect, bounds: Rect) -> Rect {
    let w = width.min(bounds.width);
    let h = height.min(bounds.height);
    let right = anchor.x.saturating_add(anchor.width).min(bounds.right());
    let x = right.saturating_sub(w).max(bounds.x);
    let y = anchor
        .y
        .saturating_add(1)
        .min(bounds.bottom().saturating_sub(h))
        .max(bounds.y);
    Rect::new(x, y, w, h)
}

/// Restyle every cell of `area` with a muted foreground on the deepest
/// background, leaving the symbols in place.
pub fn dim_background(buf: &mut Buffer, area: Rect) {
    let dim_style = Style::default()
        .fg(palette::TEXT_MUTED)
        .bg(palette::DEEPEST_BG);

    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_style(dim_style);
            }
        }
    }
}

/// Draw a one-cell drop shadow along the right and bottom edges of `rect`.
pub fn render_shadow(buf: &mut Buffer, rect: Rect) {
    let shadow_style = Style::default().fg(palette::SHADOW).bg(palette::SHADOW);
    let right_x = rect.x.saturating_add(rect.width);
    let bottom_y = rect.y.saturating_add(rect.height);

    let right_edge = (rect.y.saturating_add(1)..=bottom_y).map(|y| (right_x, y));
    let bottom_edge = (rect.x.saturating_add(1)..=right_x).map(|x| (x, bottom_y));

    for position in right_edge.chain(bottom_edge) {
        if let Some(cell) = buf.cell_mut(position) {
            cell.set_char(' ');
            cell.set_style(shadow_style);
        }
    }
}

/// Reset the cells of `area` before drawing a modal over it.
pub fn clear_area(buf: &mut Buffer, area: Rect) {
    Clear.render(area, buf);
}
