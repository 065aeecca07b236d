//! linkpeek library
//!
//! Runs a link preview session from a scripted view-state source, either in
//! the terminal or headless with NDJSON output.

pub mod headless;
pub mod runner;
pub mod script;
pub mod signals;

use std::path::PathBuf;
use std::time::Duration;

use linkpeek_app::config::Settings;
use linkpeek_app::PreviewSession;
use linkpeek_core::prelude::*;
use linkpeek_core::{HistoryEntry, HistorySource, Location, PageTitle, ReadingList, WikiSite};

pub use headless::run_headless;
pub use runner::run_interactive;
pub use script::{scripted, Script, ScriptPlayer, ScriptedViewModel};

/// Idle time after which a headless script is considered finished
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(1500);

/// Title previewed when none is given
pub const DEFAULT_TITLE: &str = "Rust (programming language)";

/// Everything the command line decides about a session.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// NDJSON script; the built-in demo is played when absent
    pub script: Option<PathBuf>,
    pub title: Option<String>,
    /// Overrides the configured wiki language
    pub language: Option<String>,
    /// Open as if from the places map
    pub places: bool,
    pub logged_in: bool,
    pub watched: bool,
    pub in_reading_list: bool,
    /// Location of the previewed place
    pub location: Option<Location>,
    /// Last known location of the user
    pub here: Option<Location>,
    pub headless: bool,
    pub settle: Option<Duration>,
}

impl LaunchOptions {
    /// Build the preview session described by these options.
    pub fn session(&self, settings: &Settings) -> Result<PreviewSession> {
        let language = self
            .language
            .as_deref()
            .unwrap_or(&settings.behavior.language);
        let title = PageTitle::new(
            self.title.as_deref().unwrap_or(DEFAULT_TITLE),
            WikiSite::for_language(language),
        )?;

        let source = if self.places {
            HistorySource::Places
        } else {
            HistorySource::InternalLink
        };
        let available_lists = if self.in_reading_list {
            vec![ReadingList {
                id: 2,
                title: "Travel".to_string(),
            }]
        } else {
            Vec::new()
        };

        Ok(PreviewSession::new(HistoryEntry::new(title, source))
            .with_locations(self.location, self.here)
            .with_watched(self.watched)
            .with_reading_lists(self.in_reading_list, available_lists)
            .with_logged_in(self.logged_in || settings.behavior.logged_in))
    }

    /// Load the script, or fall back to the demo for `title`.
    pub fn script(&self, title: &PageTitle) -> Result<Script> {
        match &self.script {
            Some(path) => Script::load(path),
            None => Ok(Script::demo(title)),
        }
    }
}

/// Run one preview session as described by `options`.
pub async fn run(options: LaunchOptions, settings: Settings) -> Result<()> {
    let session = options.session(&settings)?;
    let script = options.script(session.title())?;

    let state = if options.headless {
        let sink = headless::EventSink::stdout();
        run_headless(
            session,
            settings,
            script,
            sink,
            options.settle.unwrap_or(DEFAULT_SETTLE),
        )
        .await?
    } else {
        run_interactive(session, settings, script).await?
    };

    debug!(
        "Session finished after {} view states (outcome {:?})",
        state.states_observed, state.outcome
    );
    Ok(())
}

/// Parse a `lat,lon` pair.
pub fn parse_location(value: &str) -> std::result::Result<Location, String> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got '{}'", value))?;
    let latitude: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let longitude: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lon.trim()))?;
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(format!("coordinates out of range: {}", value));
    }
    Ok(Location::new(latitude, longitude))
}
