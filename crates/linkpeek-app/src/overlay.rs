//! Overlay action bar state
//!
//! The bar has three buttons whose labels and behaviour depend on where the
//! preview was opened from and on what the primary region currently shows.

use linkpeek_core::{ErrorButtonAction, LinkPreviewErrorType, Namespace};
use serde::{Deserialize, Serialize};

use crate::session::PreviewSession;

pub const LABEL_CONTINUE_TO_ARTICLE: &str = "Continue to article";
pub const LABEL_CONTINUE_TO_TALK_PAGE: &str = "Continue to talk page";
pub const LABEL_CONTINUE_TO_DISAMBIGUATION: &str = "Continue to disambiguation";
pub const LABEL_OPEN_IN_NEW_TAB: &str = "Open in new tab";
pub const LABEL_SHARE: &str = "Share";
pub const LABEL_SAVE: &str = "Save";
pub const LABEL_SAVED: &str = "Saved";
pub const LABEL_READ: &str = "Read";

/// One of the three overlay buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayButton {
    Primary,
    Secondary,
    Tertiary,
}

/// Which click behaviour the bar currently has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayMode {
    /// Continue / open in new tab.
    Article,
    /// Share / save / read.
    Places,
    /// A single button driven by the error type.
    Error(ErrorButtonAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub label: String,
    pub visible: bool,
}

impl ButtonState {
    fn shown(label: &str) -> Self {
        Self {
            label: label.to_string(),
            visible: true,
        }
    }

    fn hidden() -> Self {
        Self {
            label: String::new(),
            visible: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayState {
    pub mode: OverlayMode,
    pub primary: ButtonState,
    pub secondary: ButtonState,
    pub tertiary: ButtonState,
}

/// Primary label for article-context previews.
pub fn article_primary_label(namespace: Namespace, is_disambiguation: bool) -> &'static str {
    if is_disambiguation {
        LABEL_CONTINUE_TO_DISAMBIGUATION
    } else if matches!(namespace, Namespace::Talk | Namespace::UserTalk) {
        LABEL_CONTINUE_TO_TALK_PAGE
    } else {
        LABEL_CONTINUE_TO_ARTICLE
    }
}

impl OverlayState {
    /// Initial bar for a freshly displayed surface.
    pub fn for_session(session: &PreviewSession) -> Self {
        if session.from_places() {
            Self {
                mode: OverlayMode::Places,
                primary: ButtonState::shown(LABEL_SHARE),
                secondary: ButtonState::shown(LABEL_SAVE),
                tertiary: ButtonState::shown(LABEL_READ),
            }
        } else {
            Self {
                mode: OverlayMode::Article,
                primary: ButtonState::shown(article_primary_label(
                    session.title().namespace(),
                    false,
                )),
                secondary: ButtonState::shown(LABEL_OPEN_IN_NEW_TAB),
                tertiary: ButtonState::hidden(),
            }
        }
    }

    /// Relabel after content has rendered.
    pub fn apply_content(&mut self, session: &PreviewSession, is_disambiguation: bool) {
        match self.mode {
            OverlayMode::Article => {
                self.primary.label =
                    article_primary_label(session.title().namespace(), is_disambiguation)
                        .to_string();
            }
            OverlayMode::Places => {
                self.secondary.label = if session.is_in_reading_list {
                    LABEL_SAVED
                } else {
                    LABEL_SAVE
                }
                .to_string();
            }
            // Content replacing an error restores the regular bar.
            OverlayMode::Error(_) => {
                *self = Self::for_session(session);
                self.apply_content(session, is_disambiguation);
            }
        }
    }

    /// Collapse to the single error button.
    pub fn apply_error(&mut self, error_type: LinkPreviewErrorType) {
        self.mode = OverlayMode::Error(error_type.button_action());
        self.primary = ButtonState::shown(error_type.button_text());
        self.secondary = ButtonState::hidden();
        self.tertiary = ButtonState::hidden();
    }

    pub fn button(&self, button: OverlayButton) -> &ButtonState {
        match button {
            OverlayButton::Primary => &self.primary,
            OverlayButton::Secondary => &self.secondary,
            OverlayButton::Tertiary => &self.tertiary,
        }
    }
}
