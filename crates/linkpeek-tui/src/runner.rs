//! Interactive runner
//!
//! Binds a real terminal as the preview view and forwards key presses to the
//! engine until the session ends, then leaves the host page up until the
//! user quits it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use linkpeek_app::engine::{PreviewChannels, PreviewEngine};
use linkpeek_app::lifecycle::PreviewView;
use linkpeek_app::message::Message;
use linkpeek_app::state::PreviewState;
use linkpeek_core::prelude::*;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;

use crate::feedback::{lock, SharedFeedback};
use crate::{event, render, terminal};

/// Terminal-backed preview view.
///
/// The terminal is restored on `release`, or on drop when the surface never
/// became active and the view was never bound.
pub struct TuiView {
    terminal: Option<DefaultTerminal>,
    feedback: SharedFeedback,
}

impl TuiView {
    pub fn init(feedback: SharedFeedback) -> Result<Self> {
        let terminal = terminal::init()?;
        Ok(Self {
            terminal: Some(terminal),
            feedback,
        })
    }
}

impl PreviewView for TuiView {
    fn render(&mut self, state: &PreviewState) -> Result<()> {
        let Some(terminal) = self.terminal.as_mut() else {
            return Err(Error::terminal("render after release"));
        };
        let feedback = lock(&self.feedback)?;
        terminal.draw(|frame| render::view(frame, state, &feedback))?;
        Ok(())
    }

    fn release(&mut self) {
        if self.terminal.take().is_some() {
            terminal::restore();
        }
    }
}

impl Drop for TuiView {
    fn drop(&mut self) {
        self.release();
    }
}

/// Run `engine` in the terminal until the preview is dismissed, then keep
/// the host page up until it is quit.
///
/// Key presses are read on a blocking thread and sent as `Message::Key` on
/// `messages`. The surface lifecycle is driven by whoever holds the
/// `PreviewInputs`.
pub async fn run(
    engine: PreviewEngine,
    channels: PreviewChannels,
    messages: mpsc::Sender<Message>,
    feedback: SharedFeedback,
) -> Result<PreviewState> {
    let view = TuiView::init(feedback.clone())?;

    let stop = Arc::new(AtomicBool::new(false));
    let keys = spawn_key_reader(messages, stop.clone());

    let state = engine.run(view, channels).await;

    stop.store(true, Ordering::Relaxed);
    if let Err(e) = keys.await {
        warn!("Key reader task failed: {}", e);
    }

    let host_state = state.clone();
    tokio::task::spawn_blocking(move || browse_host_page(&host_state, &feedback))
        .await
        .map_err(|e| Error::terminal(format!("host page task failed: {}", e)))??;
    Ok(state)
}

/// Drive the host page rows from the keyboard until `q` or Esc.
fn browse_host_page(state: &PreviewState, feedback: &SharedFeedback) -> Result<()> {
    let mut terminal = terminal::init()?;
    let result = host_page_loop(&mut terminal, state, feedback);
    terminal::restore();
    result
}

fn host_page_loop(
    terminal: &mut DefaultTerminal,
    state: &PreviewState,
    feedback: &SharedFeedback,
) -> Result<()> {
    loop {
        {
            let feedback = lock(feedback)?;
            terminal.draw(|frame| render::view(frame, state, &feedback))?;
        }

        let Some(key) = event::poll_key()? else {
            continue;
        };
        if !lock(feedback)?.handle_key(key) {
            debug!("Host page closed");
            return Ok(());
        }
    }
}

fn spawn_key_reader(
    messages: mpsc::Sender<Message>,
    stop: Arc<AtomicBool>,
) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !stop.load(Ordering::Relaxed) {
            match event::poll() {
                Ok(Some(message)) => {
                    if messages.blocking_send(message).is_err() {
                        debug!("Engine gone; key reader stopping");
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    error!("Failed to read terminal event: {}", e);
                    break;
                }
            }
        }
    })
}
