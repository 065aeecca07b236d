//! Scripted view-state source
//!
//! Stands in for the data layer: a script is NDJSON, one step per line. A step
//! is either a view state for the engine or a user/lifecycle input:
//!
//! ```json
//! {"state":"loading"}
//! {"state":"content","summary":{"page_id":1,"display_title":"Rust"},"delay_ms":300}
//! {"on":"load_gallery","state":"gallery","images":[]}
//! {"input":"overlay","button":"primary"}
//! ```
//!
//! Steps run in order. A step with `"on"` is held back until the preview asks
//! the view model for that request (`load_gallery`, `reload`, `watch`), which
//! is how gallery, retry and watch results are scripted. Blank lines and lines
//! starting with `#` are skipped.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use linkpeek_app::engine::PreviewInputs;
use linkpeek_app::lifecycle::SurfacePhase;
use linkpeek_app::menu::MenuItem;
use linkpeek_app::message::Message;
use linkpeek_app::overlay::OverlayButton;
use linkpeek_app::services::PreviewViewModel;
use linkpeek_app::InputKey;
use linkpeek_core::prelude::*;
use linkpeek_core::{from_html, PageSummary, PageTitle, ViewState};
use serde::Deserialize;
use tokio::sync::mpsc;

/// View-model request a step waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// Played as soon as the script starts.
    #[default]
    Start,
    LoadGallery,
    Reload,
    Watch,
}

/// User or lifecycle input injected by a script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "input", rename_all = "snake_case")]
pub enum ScriptInput {
    Toolbar,
    Overlay { button: OverlayButton },
    Menu { item: MenuItem },
    Edit,
    EditSaved,
    Gallery { index: usize },
    Key { key: char },
    Dismiss,
    /// Hide the surface; view states queue until `resume`.
    Stop,
    Resume,
    /// Tear the surface down.
    Destroy,
}

impl ScriptInput {
    /// Message for the engine, or `None` for lifecycle inputs.
    fn message(&self) -> Option<Message> {
        Some(match self {
            ScriptInput::Toolbar => Message::ToolbarClicked,
            ScriptInput::Overlay { button } => Message::OverlayClicked(*button),
            ScriptInput::Menu { item } => Message::MenuItemSelected(*item),
            ScriptInput::Edit => Message::EditClicked,
            ScriptInput::EditSaved => Message::StubEditSaved,
            ScriptInput::Gallery { index } => Message::GalleryItemClicked(*index),
            ScriptInput::Key { key } => Message::Key(InputKey::Char(*key)),
            ScriptInput::Dismiss => Message::Dismiss,
            ScriptInput::Stop | ScriptInput::Resume | ScriptInput::Destroy => return None,
        })
    }

    fn phase(&self) -> Option<SurfacePhase> {
        match self {
            ScriptInput::Stop => Some(SurfacePhase::Stopped),
            ScriptInput::Resume => Some(SurfacePhase::Active),
            ScriptInput::Destroy => Some(SurfacePhase::Destroyed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepAction {
    State(ViewState),
    Input(ScriptInput),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptStep {
    pub trigger: Trigger,
    pub delay: Duration,
    pub action: StepAction,
}

/// Fields shared by every step line
#[derive(Debug, Deserialize)]
struct StepHeader {
    #[serde(default)]
    on: Trigger,
    #[serde(default)]
    delay_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    pub steps: Vec<ScriptStep>,
}

impl Script {
    /// Parse NDJSON script text. Line numbers in errors are 1-based.
    pub fn parse(text: &str) -> Result<Self> {
        let mut steps = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let value: serde_json::Value =
                serde_json::from_str(line).map_err(|e| Error::script(line_no, e.to_string()))?;
            let header: StepHeader = serde_json::from_value(value.clone())
                .map_err(|e| Error::script(line_no, e.to_string()))?;

            let action = if value.get("state").is_some() {
                StepAction::State(
                    serde_json::from_value(value)
                        .map_err(|e| Error::script(line_no, e.to_string()))?,
                )
            } else if value.get("input").is_some() {
                StepAction::Input(
                    serde_json::from_value(value)
                        .map_err(|e| Error::script(line_no, e.to_string()))?,
                )
            } else {
                return Err(Error::script(
                    line_no,
                    "expected a \"state\" or an \"input\" field",
                ));
            };

            steps.push(ScriptStep {
                trigger: header.on,
                delay: Duration::from_millis(header.delay_ms),
                action,
            });
        }

        Ok(Self { steps })
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ScriptNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path)?;
        let script = Self::parse(&text)?;
        info!(
            "Loaded script {} ({} steps)",
            path.display(),
            script.steps.len()
        );
        Ok(script)
    }

    /// Built-in script used when none is given: a short load that settles
    /// on a summary of `title`, with a gallery once it is asked for.
    pub fn demo(title: &PageTitle) -> Self {
        let display_title = from_html(&title.display_text);
        let summary = PageSummary {
            page_id: 1,
            display_title: title.display_text.clone(),
            extract: Some(format!(
                "{} is the page this preview was opened for. Open it to keep reading.",
                display_title
            )),
            thumbnail_url: title.thumb_url.clone(),
            description: title.description.clone(),
            namespace: None,
            page_type: "standard".to_string(),
        };

        let step = |trigger, delay_ms, state| ScriptStep {
            trigger,
            delay: Duration::from_millis(delay_ms),
            action: StepAction::State(state),
        };

        Self {
            steps: vec![
                step(Trigger::Start, 0, ViewState::Loading),
                step(Trigger::Start, 400, ViewState::Content { summary }),
                step(
                    Trigger::LoadGallery,
                    200,
                    ViewState::Gallery { images: Vec::new() },
                ),
                step(
                    Trigger::Watch,
                    200,
                    ViewState::Watch {
                        is_watched: true,
                        message: format!("Added {} to your watchlist", display_title),
                    },
                ),
            ],
        }
    }

    /// Remove and return the steps waiting for `trigger`, in order.
    fn take(&mut self, trigger: Trigger) -> Vec<ScriptStep> {
        let (taken, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.steps)
            .into_iter()
            .partition(|step| step.trigger == trigger);
        self.steps = rest;
        taken
    }
}

/// View model that turns preview requests into script triggers.
#[derive(Debug)]
pub struct ScriptedViewModel {
    triggers: mpsc::UnboundedSender<Trigger>,
}

impl ScriptedViewModel {
    fn request(&self, trigger: Trigger) -> Result<()> {
        debug!("View model request: {:?}", trigger);
        self.triggers
            .send(trigger)
            .map_err(|_| Error::ChannelClosed)
    }
}

impl PreviewViewModel for ScriptedViewModel {
    fn load_gallery(&self) -> Result<()> {
        self.request(Trigger::LoadGallery)
    }

    fn reload(&self) -> Result<()> {
        self.request(Trigger::Reload)
    }

    fn watch_or_unwatch(&self, _currently_watched: bool) -> Result<()> {
        self.request(Trigger::Watch)
    }
}

/// Plays a script into a session's inputs.
#[derive(Debug)]
pub struct ScriptPlayer {
    script: Script,
    triggers: mpsc::UnboundedReceiver<Trigger>,
    inputs: PreviewInputs,
}

/// Pair a script with the view model that releases its held-back steps.
pub fn scripted(script: Script, inputs: PreviewInputs) -> (Arc<ScriptedViewModel>, ScriptPlayer) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        Arc::new(ScriptedViewModel { triggers: tx }),
        ScriptPlayer {
            script,
            triggers: rx,
            inputs,
        },
    )
}

impl ScriptPlayer {
    /// Play the start steps, then the steps of each request as it arrives.
    ///
    /// With `settle`, the surface is destroyed once no request has arrived
    /// for that long; without it the player idles until the view model is
    /// dropped.
    pub async fn play(mut self, settle: Option<Duration>) {
        let start = self.script.take(Trigger::Start);
        if !self.play_steps(start).await {
            return;
        }

        loop {
            let trigger = match settle {
                Some(settle) => match tokio::time::timeout(settle, self.triggers.recv()).await {
                    Ok(trigger) => trigger,
                    Err(_) => {
                        debug!("Script settled");
                        break;
                    }
                },
                None => self.triggers.recv().await,
            };
            let Some(trigger) = trigger else {
                debug!("View model dropped; script finished");
                return;
            };

            let steps = self.script.take(trigger);
            if steps.is_empty() {
                debug!("No scripted steps for {:?}", trigger);
            }
            if !self.play_steps(steps).await {
                return;
            }
        }

        if settle.is_some() && self.inputs.lifecycle.send(SurfacePhase::Destroyed).is_err() {
            debug!("Engine already gone at end of script");
        }
    }

    /// Returns false once the engine has gone away.
    async fn play_steps(&mut self, steps: Vec<ScriptStep>) -> bool {
        for step in steps {
            if !step.delay.is_zero() {
                tokio::time::sleep(step.delay).await;
            }
            trace!("Script step: {:?}", step.action);

            let delivered = match step.action {
                StepAction::State(state) => self.inputs.view_states.send(state).is_ok(),
                StepAction::Input(input) => match (input.phase(), input.message()) {
                    (Some(phase), _) => self.inputs.lifecycle.send(phase).is_ok(),
                    (None, Some(message)) => self.inputs.messages.send(message).await.is_ok(),
                    (None, None) => true,
                },
            };
            if !delivered {
                debug!("Engine gone; script stopped");
                return false;
            }
        }
        true
    }
}
