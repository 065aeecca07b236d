//! linkpeek-app - Preview state and orchestration for linkpeek
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the link
//! preview: the `PreviewState` model, the `update` function driven by view
//! states and user input, the collaborator traits every side effect goes
//! through, and the `PreviewEngine` that runs one session against a surface
//! lifecycle. It also holds configuration loading and the page item row.

pub mod actions;
pub mod config;
pub mod engine;
pub mod handler;
pub mod input_key;
pub mod lifecycle;
pub mod menu;
pub mod message;
pub mod overlay;
pub mod page_item;
pub mod process;
pub mod services;
pub mod session;
pub mod state;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

// Re-export primary types
pub use engine::{preview_channels, PreviewChannels, PreviewEngine, PreviewInputs};
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use lifecycle::{BoundView, PreviewView, SurfacePhase};
pub use message::Message;
pub use page_item::{ImageMode, PageItem, PageItemCallback, TitleWeight};
pub use services::{
    Collaborators, Navigator, PreviewAnalytics, PreviewHost, PreviewViewModel, ReadingLists,
};
pub use session::PreviewSession;
pub use state::{InteractionContext, PreviewState, PrimaryRegion};
