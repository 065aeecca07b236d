//! View-state events emitted by the preview data source
//!
//! A preview session observes a sequence of [`ViewState`] values. The data
//! layer that produces them is outside this workspace; these types are the
//! whole contract. They are serde-tagged so scripted sources and headless
//! tooling can speak NDJSON:
//!
//! ```json
//! {"state":"loading"}
//! {"state":"content","summary":{"page_id":1,"display_title":"Rust"}}
//! {"state":"gallery","images":[{"name":"File:Ferris.png","thumb_url":"https://..."}]}
//! {"state":"completed"}
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{GalleryItem, PageSummary};

/// Pre-classified failure kind attached to an error state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No connectivity; the load may succeed later.
    Offline,
    /// The page does not exist (HTTP 404).
    NotFound,
    /// Any other failure.
    #[default]
    Other,
}

/// Opaque cause carried by [`ViewState::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCause {
    #[serde(default)]
    pub kind: ErrorKind,
    #[serde(default)]
    pub message: String,
}

impl ErrorCause {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn offline() -> Self {
        Self::new(ErrorKind::Offline, "network unavailable")
    }

    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound, "page not found")
    }

    pub fn is_offline(&self) -> bool {
        self.kind == ErrorKind::Offline
    }
}

impl std::fmt::Display for ErrorCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// One state announcement from the preview data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    /// The summary is being fetched.
    Loading,
    /// The summary could not be loaded.
    Error { cause: ErrorCause },
    /// The summary is available.
    Content { summary: PageSummary },
    /// Gallery images for the secondary strip.
    Gallery { images: Vec<GalleryItem> },
    /// A watch/unwatch request finished.
    Watch { is_watched: bool, message: String },
    /// The data source has nothing further for the primary region.
    Completed,
}

impl ViewState {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Error { .. } => "error",
            ViewState::Content { .. } => "content",
            ViewState::Gallery { .. } => "gallery",
            ViewState::Watch { .. } => "watch",
            ViewState::Completed => "completed",
        }
    }

    /// Content and Error settle the primary region.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ViewState::Error { .. } | ViewState::Content { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tagged_states() {
        let state: ViewState = serde_json::from_str(r#"{"state":"loading"}"#).unwrap();
        assert_eq!(state, ViewState::Loading);

        let state: ViewState =
            serde_json::from_str(r#"{"state":"error","cause":{"kind":"offline"}}"#).unwrap();
        match state {
            ViewState::Error { cause } => assert!(cause.is_offline()),
            other => panic!("unexpected {:?}", other),
        }

        let state: ViewState =
            serde_json::from_str(r#"{"state":"watch","is_watched":true,"message":"Added"}"#)
                .unwrap();
        assert_eq!(state.label(), "watch");
    }

    #[test]
    fn test_terminal_states() {
        assert!(ViewState::Error {
            cause: ErrorCause::offline()
        }
        .is_terminal());
        assert!(!ViewState::Loading.is_terminal());
        assert!(!ViewState::Completed.is_terminal());
        assert!(!ViewState::Gallery { images: vec![] }.is_terminal());
    }

    #[test]
    fn test_unknown_state_rejected() {
        assert!(serde_json::from_str::<ViewState>(r#"{"state":"exploded"}"#).is_err());
    }
}
