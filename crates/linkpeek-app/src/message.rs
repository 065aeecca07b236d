//! Message types for the preview (TEA pattern)

use linkpeek_core::ViewState;

use crate::input_key::InputKey;
use crate::menu::{MenuItem, ReadingListChoice};
use crate::overlay::OverlayButton;

/// All possible messages/actions in a preview session
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// State announcement from the data source
    ViewState(ViewState),

    // ─────────────────────────────────────────────────────────
    // Surface Lifecycle
    // ─────────────────────────────────────────────────────────
    /// The surface became visible for the first time
    SurfaceShown,
    /// The surface is being torn down
    SurfaceDestroyed,
    /// Close the preview
    Dismiss,

    // ─────────────────────────────────────────────────────────
    // Affordances
    // ─────────────────────────────────────────────────────────
    /// Title toolbar clicked
    ToolbarClicked,
    /// One of the overlay action bar buttons clicked
    OverlayClicked(OverlayButton),
    /// Stub article edit button clicked
    EditClicked,
    /// The stub edit flow reported a saved edit
    StubEditSaved,

    // ─────────────────────────────────────────────────────────
    // Popups
    // ─────────────────────────────────────────────────────────
    /// Open the overflow menu
    OpenOverflowMenu,
    /// Overflow menu item chosen
    MenuItemSelected(MenuItem),
    /// Reading-list popup choice made
    ReadingListChosen(ReadingListChoice),
    /// Move selection in the open popup
    PopupNext,
    PopupPrevious,
    /// Activate the selected popup entry
    PopupConfirm,
    /// Close whichever popup is open
    PopupClose,

    // ─────────────────────────────────────────────────────────
    // Gallery
    // ─────────────────────────────────────────────────────────
    GalleryNext,
    GalleryPrevious,
    /// Thumbnail at index clicked
    GalleryItemClicked(usize),
}
