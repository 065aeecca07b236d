//! linkpeek-tui - Terminal UI for linkpeek
//!
//! Renders the preview dialog, its popups and the page-item rows of the
//! host page with ratatui, maps crossterm key events onto the abstract
//! `InputKey`, and runs an interactive session against a real terminal.

pub mod event;
pub mod feedback;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

pub use feedback::{Feedback, TuiCollaborators};
pub use runner::{run, TuiView};
