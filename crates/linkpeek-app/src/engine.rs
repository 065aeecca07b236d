//! Preview engine - one cooperative consumer task per preview session
//!
//! The engine owns the `PreviewState` and the session's collaborators. Its
//! `run` loop observes view states only while the surface is `Active`, binds
//! the view on first display, and releases it on every exit path.

use tokio::sync::{mpsc, watch};

use linkpeek_core::prelude::*;
use linkpeek_core::ViewState;

use crate::config::Settings;
use crate::lifecycle::{BoundView, PreviewView, SurfacePhase};
use crate::message::Message;
use crate::process::process_message;
use crate::services::Collaborators;
use crate::session::PreviewSession;
use crate::state::PreviewState;

/// Capacity of the user message channel
const MESSAGE_CHANNEL_CAPACITY: usize = 256;

/// Producer ends of a preview session's inputs.
#[derive(Debug)]
pub struct PreviewInputs {
    /// View states from the data source. Unbounded so the producer never waits.
    pub view_states: mpsc::UnboundedSender<ViewState>,
    /// User and host messages.
    pub messages: mpsc::Sender<Message>,
    /// Surface lifecycle.
    pub lifecycle: watch::Sender<SurfacePhase>,
}

/// Consumer ends, handed to `PreviewEngine::run`.
#[derive(Debug)]
pub struct PreviewChannels {
    pub view_states: mpsc::UnboundedReceiver<ViewState>,
    pub messages: mpsc::Receiver<Message>,
    pub lifecycle: watch::Receiver<SurfacePhase>,
}

/// Create the input channels for one session.
pub fn preview_channels() -> (PreviewInputs, PreviewChannels) {
    let (states_tx, states_rx) = mpsc::unbounded_channel();
    let (msg_tx, msg_rx) = mpsc::channel(MESSAGE_CHANNEL_CAPACITY);
    let (phase_tx, phase_rx) = watch::channel(SurfacePhase::Created);
    (
        PreviewInputs {
            view_states: states_tx,
            messages: msg_tx,
            lifecycle: phase_tx,
        },
        PreviewChannels {
            view_states: states_rx,
            messages: msg_rx,
            lifecycle: phase_rx,
        },
    )
}

/// Drives one preview session.
#[derive(Debug)]
pub struct PreviewEngine {
    state: PreviewState,
    collaborators: Collaborators,
}

impl PreviewEngine {
    pub fn new(session: PreviewSession, settings: Settings, collaborators: Collaborators) -> Self {
        Self {
            state: PreviewState::new(session, settings),
            collaborators,
        }
    }

    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    /// Process one message (and its follow-ups) synchronously.
    pub fn process_message(&mut self, message: Message) {
        process_message(&mut self.state, message, &self.collaborators);
    }

    pub fn is_finished(&self) -> bool {
        self.state.dismissed
    }

    /// Run the session until it is dismissed or the surface is destroyed.
    ///
    /// Returns the final state.
    pub async fn run<V: PreviewView>(
        mut self,
        view: V,
        mut channels: PreviewChannels,
    ) -> PreviewState {
        info!("Preview session for '{}' started", self.state.title().text);

        // Nothing is observed or bound before the first display
        let first = channels
            .lifecycle
            .wait_for(|phase| phase.is_active() || phase.is_destroyed())
            .await
            .map(|phase| *phase);
        if !matches!(first, Ok(SurfacePhase::Active)) {
            debug!("Surface never became active");
            self.process_message(Message::SurfaceDestroyed);
            return self.state;
        }

        let mut bound = BoundView::bind(view);
        self.process_message(Message::SurfaceShown);
        self.render(&mut bound);

        let mut states_closed = false;
        let mut messages_closed = false;

        while !self.is_finished() {
            let active = channels.lifecycle.borrow().is_active();

            // Lifecycle first, then view states already emitted, then user
            // input, so a queued message never overtakes an earlier state.
            tokio::select! {
                biased;

                changed = channels.lifecycle.changed() => {
                    if changed.is_err() {
                        debug!("Lifecycle owner dropped");
                        break;
                    }
                    let phase = *channels.lifecycle.borrow_and_update();
                    debug!("Surface phase: {:?}", phase);
                    match phase {
                        SurfacePhase::Destroyed => break,
                        SurfacePhase::Active => self.render(&mut bound),
                        SurfacePhase::Created | SurfacePhase::Stopped => {}
                    }
                }

                view_state = channels.view_states.recv(), if active && !states_closed => {
                    match view_state {
                        Some(view_state) => {
                            self.process_message(Message::ViewState(view_state));
                            self.render(&mut bound);
                        }
                        None => {
                            debug!("View state source closed");
                            states_closed = true;
                        }
                    }
                }

                message = channels.messages.recv(), if active && !messages_closed => {
                    match message {
                        Some(message) => {
                            self.process_message(message);
                            self.render(&mut bound);
                        }
                        None => messages_closed = true,
                    }
                }
            }
        }

        // No-op when the session was already dismissed
        self.process_message(Message::SurfaceDestroyed);
        drop(bound);

        info!(
            "Preview session for '{}' ended after {} view states",
            self.state.title().text,
            self.state.states_observed
        );
        self.state
    }

    fn render<V: PreviewView>(&self, bound: &mut BoundView<V>) {
        if let Err(e) = bound.render(&self.state) {
            error!("Failed to render preview: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Outcome;
    use crate::test_utils::{
        content_state, offline_state, test_gallery, test_session, Call, RecordingCollaborators,
    };
    use linkpeek_core::HistorySource;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct TestView {
        renders: Arc<AtomicUsize>,
        released: Arc<AtomicUsize>,
    }

    impl PreviewView for TestView {
        fn render(&mut self, _state: &PreviewState) -> Result<()> {
            self.renders.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn release(&mut self) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn engine(recorder: &Arc<RecordingCollaborators>) -> PreviewEngine {
        PreviewEngine::new(
            test_session(HistorySource::InternalLink),
            Settings::default(),
            recorder.collaborators(),
        )
    }

    #[tokio::test]
    async fn test_states_applied_in_order_then_navigate() {
        let recorder = RecordingCollaborators::new();
        let view = TestView::default();
        let (inputs, channels) = preview_channels();

        inputs.lifecycle.send(SurfacePhase::Active).unwrap();
        inputs.view_states.send(ViewState::Loading).unwrap();
        inputs.view_states.send(content_state(7, "Rust")).unwrap();
        inputs.messages.send(Message::ToolbarClicked).await.unwrap();

        let handle = tokio::spawn(engine(&recorder).run(view.clone(), channels));

        let state = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();

        assert!(state.dismissed);
        assert_eq!(recorder.count(&Call::LinkClick), 1);
        assert_eq!(recorder.count(&Call::Cancel), 0);
        assert_eq!(
            recorder.count(&Call::LoadPage {
                title: "Rust".into(),
                new_tab: false
            }),
            1
        );
        assert_eq!(view.released.load(Ordering::SeqCst), 1);
        assert!(view.renders.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn test_no_observation_before_active() {
        let recorder = RecordingCollaborators::new();
        let view = TestView::default();
        let (inputs, channels) = preview_channels();

        inputs.view_states.send(content_state(1, "Rust")).unwrap();
        let handle = tokio::spawn(engine(&recorder).run(view.clone(), channels));

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(recorder.calls().is_empty());
        assert_eq!(view.renders.load(Ordering::SeqCst), 0);

        inputs.lifecycle.send(SurfacePhase::Destroyed).unwrap();
        let state = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(state.states_observed, 0);
        // Never displayed, so never bound
        assert_eq!(view.released.load(Ordering::SeqCst), 0);
        assert!(recorder.calls().is_empty());
    }

    #[tokio::test]
    async fn test_destroy_mid_load_logs_nothing() {
        let recorder = RecordingCollaborators::new();
        let view = TestView::default();
        let (inputs, channels) = preview_channels();

        inputs.lifecycle.send(SurfacePhase::Active).unwrap();
        inputs.view_states.send(ViewState::Loading).unwrap();
        let handle = tokio::spawn(engine(&recorder).run(view.clone(), channels));

        tokio::time::sleep(Duration::from_millis(20)).await;
        inputs.lifecycle.send(SurfacePhase::Destroyed).unwrap();

        let state = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();

        assert!(state.dismissed);
        assert_eq!(recorder.count(&Call::LinkClick), 0);
        assert_eq!(recorder.count(&Call::Cancel), 0);
        assert_eq!(recorder.count(&Call::Dismissed), 0);
        assert_eq!(view.released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_destroy_after_terminal_logs_cancel() {
        let recorder = RecordingCollaborators::new();
        let (inputs, channels) = preview_channels();

        inputs.lifecycle.send(SurfacePhase::Active).unwrap();
        inputs.view_states.send(ViewState::Loading).unwrap();
        inputs.view_states.send(offline_state()).unwrap();
        let handle = tokio::spawn(engine(&recorder).run(TestView::default(), channels));

        tokio::time::sleep(Duration::from_millis(20)).await;
        inputs.lifecycle.send(SurfacePhase::Destroyed).unwrap();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(recorder.count(&Call::Cancel), 1);
        assert_eq!(recorder.count(&Call::LinkClick), 0);
    }

    #[tokio::test]
    async fn test_queued_dismiss_waits_for_emitted_states() {
        for _ in 0..50 {
            let recorder = RecordingCollaborators::new();
            let (inputs, channels) = preview_channels();

            inputs.lifecycle.send(SurfacePhase::Active).unwrap();
            inputs.view_states.send(ViewState::Loading).unwrap();
            inputs.view_states.send(offline_state()).unwrap();
            inputs.messages.send(Message::Dismiss).await.unwrap();

            let state = tokio::time::timeout(
                Duration::from_secs(1),
                engine(&recorder).run(TestView::default(), channels),
            )
            .await
            .unwrap();

            assert_eq!(state.states_observed, 2);
            assert_eq!(state.outcome, Some(Outcome::Cancel));
            assert_eq!(recorder.count(&Call::Cancel), 1);
            assert_eq!(recorder.count(&Call::Dismissed), 1);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_queued_dismiss_waits_for_emitted_states_across_threads() {
        let recorder = RecordingCollaborators::new();
        let (inputs, channels) = preview_channels();

        inputs.lifecycle.send(SurfacePhase::Active).unwrap();
        let handle = tokio::spawn(engine(&recorder).run(TestView::default(), channels));

        inputs.view_states.send(ViewState::Loading).unwrap();
        inputs.view_states.send(offline_state()).unwrap();
        inputs.messages.send(Message::Dismiss).await.unwrap();

        let state = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(state.states_observed, 2);
        assert_eq!(recorder.count(&Call::Cancel), 1);
    }

    #[tokio::test]
    async fn test_stopped_surface_pauses_observation() {
        let recorder = RecordingCollaborators::new();
        let (inputs, channels) = preview_channels();

        inputs.lifecycle.send(SurfacePhase::Active).unwrap();
        inputs.view_states.send(ViewState::Loading).unwrap();
        let handle = tokio::spawn(engine(&recorder).run(TestView::default(), channels));
        tokio::time::sleep(Duration::from_millis(20)).await;

        inputs.lifecycle.send(SurfacePhase::Stopped).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        inputs.view_states.send(content_state(3, "Rust")).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(recorder.count(&Call::LoadGallery), 0);

        inputs.lifecycle.send(SurfacePhase::Active).unwrap();
        inputs
            .view_states
            .send(ViewState::Gallery {
                images: test_gallery(&["a.png"]),
            })
            .unwrap();
        inputs.messages.send(Message::Dismiss).await.unwrap();

        let state = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(recorder.count(&Call::LoadGallery), 1);
        assert_eq!(state.gallery.len(), 1);
        assert_eq!(recorder.count(&Call::Cancel), 1);
        assert_eq!(recorder.count(&Call::Dismissed), 1);
    }

    #[tokio::test]
    async fn test_failing_collaborator_does_not_stop_session() {
        let recorder = RecordingCollaborators::new();
        recorder.fail_on(Call::LoadGallery);
        let (inputs, channels) = preview_channels();

        inputs.lifecycle.send(SurfacePhase::Active).unwrap();
        inputs.view_states.send(content_state(5, "Rust")).unwrap();
        inputs
            .view_states
            .send(ViewState::Gallery {
                images: test_gallery(&["a.png", "b.png"]),
            })
            .unwrap();
        inputs.view_states.send(ViewState::Completed).unwrap();
        inputs.messages.send(Message::Dismiss).await.unwrap();
        let handle = tokio::spawn(engine(&recorder).run(TestView::default(), channels));

        let state = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(state.gallery.len(), 2);
        assert!(!state.progress_visible);
        assert_eq!(recorder.count(&Call::PreviewShown(Some(5))), 1);
    }

    #[tokio::test]
    async fn test_lifecycle_owner_dropped_ends_session() {
        let recorder = RecordingCollaborators::new();
        let view = TestView::default();
        let (inputs, channels) = preview_channels();

        inputs.lifecycle.send(SurfacePhase::Active).unwrap();
        let handle = tokio::spawn(engine(&recorder).run(view.clone(), channels));
        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(inputs);

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(view.released.load(Ordering::SeqCst), 1);
    }
}
