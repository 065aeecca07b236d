//! Interactive runner - plays a script into the terminal preview

use linkpeek_app::config::Settings;
use linkpeek_app::lifecycle::SurfacePhase;
use linkpeek_app::state::PreviewState;
use linkpeek_app::{preview_channels, PreviewEngine, PreviewSession};
use linkpeek_core::prelude::*;
use linkpeek_tui::{Feedback, TuiCollaborators};

use crate::script::{scripted, Script};
use crate::signals;

/// Run one preview session in the terminal until it is dismissed.
pub async fn run_interactive(
    session: PreviewSession,
    settings: Settings,
    script: Script,
) -> Result<PreviewState> {
    info!("Previewing '{}' interactively", session.title().text);

    let feedback = Feedback::shared(&session);
    let (inputs, channels) = preview_channels();
    inputs
        .lifecycle
        .send(SurfacePhase::Active)
        .map_err(|_| Error::channel_send("preview channels closed before start"))?;

    let keys = inputs.messages.clone();
    signals::spawn_signal_handler(inputs.messages.clone());

    let (view_model, player) = scripted(script, inputs);
    let collaborators = TuiCollaborators::new(feedback.clone()).collaborators(view_model);
    let engine = PreviewEngine::new(session, settings, collaborators);

    let player = tokio::spawn(player.play(None));
    let result = linkpeek_tui::run(engine, channels, keys, feedback).await;
    player.abort();

    let state = result?;
    info!(
        "Preview closed: dismissed={}, outcome={:?}",
        state.dismissed, state.outcome
    );
    Ok(state)
}
