//! Widgets for the preview surface

pub mod modal_overlay;
mod page_item;
mod popup_menu;
mod preview_dialog;

pub use page_item::PageItemRow;
pub use popup_menu::PopupMenuWidget;
pub use preview_dialog::PreviewDialog;
