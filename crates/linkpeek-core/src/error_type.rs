//! Taxonomy of preview load failures
//!
//! Maps an [`ErrorCause`] plus the subject namespace to the message, button
//! label and button behaviour shown in the error surface.

use crate::events::{ErrorCause, ErrorKind};
use crate::types::Namespace;

/// What the error surface's primary button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorButtonAction {
    /// Ask the data source to load again.
    Retry,
    /// Close the preview.
    Dismiss,
}

/// Classified preview failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPreviewErrorType {
    Offline,
    PageMissing,
    UserPageMissing,
    Generic,
}

impl LinkPreviewErrorType {
    /// Classify a cause for a title in `namespace`.
    pub fn classify(cause: &ErrorCause, namespace: Namespace) -> Self {
        match cause.kind {
            ErrorKind::Offline => LinkPreviewErrorType::Offline,
            ErrorKind::NotFound if namespace.is_user() => LinkPreviewErrorType::UserPageMissing,
            ErrorKind::NotFound => LinkPreviewErrorType::PageMissing,
            ErrorKind::Other => LinkPreviewErrorType::Generic,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            LinkPreviewErrorType::Offline => "You're offline. Connect to the internet to load this page.",
            LinkPreviewErrorType::PageMissing => "This page does not exist.",
            LinkPreviewErrorType::UserPageMissing => "This user has not created a user page.",
            LinkPreviewErrorType::Generic => "An error occurred while loading this page.",
        }
    }

    pub fn button_text(&self) -> &'static str {
        match self {
            LinkPreviewErrorType::Offline => "Retry",
            _ => "Go back",
        }
    }

    pub fn button_action(&self) -> ErrorButtonAction {
        match self {
            LinkPreviewErrorType::Offline => ErrorButtonAction::Retry,
            _ => ErrorButtonAction::Dismiss,
        }
    }

    /// Whether the toolbar may still navigate to the page.
    ///
    /// Only an offline failure leaves the destination reachable.
    pub fn permits_navigation(&self) -> bool {
        matches!(self, LinkPreviewErrorType::Offline)
    }
}
