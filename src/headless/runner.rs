//! Headless mode runner - plays a script without a terminal UI
//!
//! The script feeds view states and inputs into a preview engine whose
//! collaborators and view write NDJSON events to the sink.

use std::time::Duration;

use linkpeek_app::config::Settings;
use linkpeek_app::lifecycle::{PreviewView, SurfacePhase};
use linkpeek_app::state::{Outcome, PreviewState, PrimaryRegion};
use linkpeek_app::{preview_channels, Collaborators, PreviewEngine, PreviewSession};
use linkpeek_core::prelude::*;

use super::{EventSink, HeadlessCollaborators, HeadlessEvent};
use crate::script::{scripted, Script};
use crate::signals;

/// What a headless observer can see of the surface.
#[derive(Debug, Clone, PartialEq)]
struct SurfaceSnapshot {
    primary: &'static str,
    title: String,
    progress: bool,
    buttons: Vec<String>,
    popup: Option<Vec<String>>,
}

impl SurfaceSnapshot {
    fn of(state: &PreviewState) -> Self {
        let (primary, title) = match &state.primary {
            PrimaryRegion::Empty => ("empty", state.title().text.clone()),
            PrimaryRegion::Content(content) => ("content", content.title.clone()),
            PrimaryRegion::Error(error) => ("error", error.title.clone()),
        };

        let buttons = state
            .overlay
            .iter()
            .flat_map(|overlay| [&overlay.primary, &overlay.secondary, &overlay.tertiary])
            .filter(|button| button.visible)
            .map(|button| button.label.clone())
            .collect();

        let popup = if let Some(menu) = &state.reading_list_menu {
            Some(menu.entries.iter().map(|e| e.title.clone()).collect())
        } else {
            state
                .overflow_menu
                .as_ref()
                .map(|menu| menu.entries.iter().map(|e| e.title.clone()).collect())
        };

        Self {
            primary,
            title,
            progress: state.progress_visible,
            buttons,
            popup,
        }
    }

    fn into_event(self) -> HeadlessEvent {
        HeadlessEvent::surface(
            self.primary,
            self.title,
            self.progress,
            self.buttons,
            self.popup,
        )
    }
}

/// View that reports surface changes as events.
pub struct HeadlessView {
    sink: EventSink,
    last: Option<SurfaceSnapshot>,
}

impl HeadlessView {
    pub fn new(sink: EventSink) -> Self {
        Self { sink, last: None }
    }
}

impl PreviewView for HeadlessView {
    fn render(&mut self, state: &PreviewState) -> Result<()> {
        let snapshot = SurfaceSnapshot::of(state);
        if self.last.as_ref() == Some(&snapshot) {
            return Ok(());
        }
        self.last = Some(snapshot.clone());
        self.sink.emit(&snapshot.into_event());
        Ok(())
    }

    fn release(&mut self) {
        trace!("Headless view released");
    }
}

/// Run one preview session from `script`, writing events to `sink`.
///
/// `settle` is how long the script may stay idle before the surface is
/// destroyed.
pub async fn run_headless(
    session: PreviewSession,
    settings: Settings,
    script: Script,
    sink: EventSink,
    settle: Duration,
) -> Result<PreviewState> {
    info!("═══════════════════════════════════════════════════════");
    info!("linkpeek starting in HEADLESS mode");
    info!("Title: {}", session.title().text);
    info!("═══════════════════════════════════════════════════════");

    sink.emit(&HeadlessEvent::session_started(
        &session.title().text,
        session.source().as_str(),
    ));

    let (inputs, channels) = preview_channels();
    if inputs.lifecycle.send(SurfacePhase::Active).is_err() {
        let message = "preview channels closed before start".to_string();
        sink.emit(&HeadlessEvent::error(message.clone(), true));
        return Err(Error::channel_send(message));
    }

    signals::spawn_signal_handler(inputs.messages.clone());

    let (view_model, player) = scripted(script, inputs);
    let collaborators =
        Collaborators::from_shared(HeadlessCollaborators::new(sink.clone(), view_model));
    let engine = PreviewEngine::new(session, settings, collaborators);

    let player = tokio::spawn(player.play(Some(settle)));
    let state = engine.run(HeadlessView::new(sink.clone()), channels).await;

    player.abort();
    if let Err(e) = player.await {
        if e.is_panic() {
            error!("Script player panicked: {}", e);
            sink.emit(&HeadlessEvent::error("script player panicked".to_string(), false));
        }
    }

    let outcome = state.outcome.map(|outcome| match outcome {
        Outcome::Click => "click",
        Outcome::Cancel => "cancel",
    });
    sink.emit(&HeadlessEvent::session_ended(outcome, state.states_observed));

    info!("linkpeek headless mode exiting");
    Ok(state)
}
