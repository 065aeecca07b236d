//! Headless mode - NDJSON event output instead of a terminal UI
//!
//! Every collaborator call and every visible change of the preview surface
//! is written as one JSON object per line, so scripts and tests can follow a
//! session without parsing terminal output.
//!
//! # Example Output
//!
//! ```json
//! {"event":"session_started","title":"Rust","source":"internal_link","timestamp":1704700001000}
//! {"event":"surface","primary":"content","title":"Rust","progress":false,"buttons":["Continue to article","Open in new tab"],"popup":null,"timestamp":1704700001400}
//! {"event":"analytics","kind":"preview_shown","title":"Rust","page_id":1,"timestamp":1704700001400}
//! ```

pub mod collaborators;
pub mod runner;

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use linkpeek_core::{Error, Result};
use serde::Serialize;
use tracing::error;

pub use collaborators::HeadlessCollaborators;
pub use runner::{run_headless, HeadlessView};

/// Events emitted in headless mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// A preview session was created
    SessionStarted {
        title: String,
        source: String,
        timestamp: i64,
    },

    /// The rendered surface changed
    Surface {
        primary: String,
        title: String,
        progress: bool,
        buttons: Vec<String>,
        popup: Option<Vec<String>>,
        timestamp: i64,
    },

    /// Request to the view model
    ViewModel { request: String, timestamp: i64 },

    /// Link-preview interaction analytics
    Analytics {
        kind: String,
        title: String,
        page_id: Option<i64>,
        timestamp: i64,
    },

    /// Places interaction event
    PlacesAction {
        action: String,
        interface: String,
        timestamp: i64,
    },

    /// Navigation away from the preview
    Navigate {
        target: String,
        title: String,
        new_tab: bool,
        detail: Option<String>,
        timestamp: i64,
    },

    /// Reading-list change
    ReadingList {
        operation: String,
        title: String,
        list_id: Option<i64>,
        timestamp: i64,
    },

    /// Host feedback (share, clipboard, message, watch confirmation)
    Host {
        kind: String,
        text: String,
        timestamp: i64,
    },

    /// The host was told the preview closed
    Dismissed { timestamp: i64 },

    /// The session finished
    SessionEnded {
        outcome: Option<String>,
        states_observed: usize,
        timestamp: i64,
    },

    /// Error occurred
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn session_started(title: &str, source: &str) -> Self {
        Self::SessionStarted {
            title: title.to_string(),
            source: source.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn surface(
        primary: &str,
        title: String,
        progress: bool,
        buttons: Vec<String>,
        popup: Option<Vec<String>>,
    ) -> Self {
        Self::Surface {
            primary: primary.to_string(),
            title,
            progress,
            buttons,
            popup,
            timestamp: Self::now(),
        }
    }

    pub fn view_model(request: &str) -> Self {
        Self::ViewModel {
            request: request.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn analytics(kind: &str, title: &str, page_id: Option<i64>) -> Self {
        Self::Analytics {
            kind: kind.to_string(),
            title: title.to_string(),
            page_id,
            timestamp: Self::now(),
        }
    }

    pub fn places_action(action: &str, interface: &str) -> Self {
        Self::PlacesAction {
            action: action.to_string(),
            interface: interface.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn navigate(target: &str, title: &str, new_tab: bool, detail: Option<String>) -> Self {
        Self::Navigate {
            target: target.to_string(),
            title: title.to_string(),
            new_tab,
            detail,
            timestamp: Self::now(),
        }
    }

    pub fn reading_list(operation: &str, title: &str, list_id: Option<i64>) -> Self {
        Self::ReadingList {
            operation: operation.to_string(),
            title: title.to_string(),
            list_id,
            timestamp: Self::now(),
        }
    }

    pub fn host(kind: &str, text: &str) -> Self {
        Self::Host {
            kind: kind.to_string(),
            text: text.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn dismissed() -> Self {
        Self::Dismissed {
            timestamp: Self::now(),
        }
    }

    pub fn session_ended(outcome: Option<&str>, states_observed: usize) -> Self {
        Self::SessionEnded {
            outcome: outcome.map(str::to_string),
            states_observed,
            timestamp: Self::now(),
        }
    }

    pub fn error(message: String, fatal: bool) -> Self {
        Self::Error {
            message,
            fatal,
            timestamp: Self::now(),
        }
    }
}

/// Shared NDJSON writer for headless events.
#[derive(Clone)]
pub struct EventSink {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl EventSink {
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Arc::new(Mutex::new(Box::new(out))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Write `event` as one JSON line and flush, logging any failure
    pub fn emit(&self, event: &HeadlessEvent) {
        if let Err(e) = self.try_emit(event) {
            error!("Failed to write headless event: {}", e);
        }
    }

    /// Write `event` as one JSON line and flush
    pub fn try_emit(&self, event: &HeadlessEvent) -> Result<()> {
        let json = serde_json::to_string(event)?;
        let mut out = self
            .out
            .lock()
            .map_err(|_| Error::terminal("headless output lock poisoned"))?;
        writeln!(out, "{}", json)?;
        out.flush()?;
        Ok(())
    }
}

impl std::fmt::Debug for EventSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSink").finish_non_exhaustive()
    }
}
