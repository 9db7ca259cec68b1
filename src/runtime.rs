//! Async driver for a mounted viewer.
//!
//! One tokio task owns the [`ViewSession`]. Commands come in over an mpsc
//! channel, every state change publishes a fresh [`ViewFrame`] on a watch
//! channel, and the auto-rotate interval is only polled while the session
//! says rotation is active. Detail lookups run as their own tasks and report
//! back tagged with the selection generation they were started for.

use crate::data::landmarks::Landmark;
use crate::input::events::InputEvent;
use crate::prelude::Arc;
use crate::tools::concave::GET_LANDMARK_DETAILS;
use crate::tools::{ToolContext, ToolRegistry};
use crate::ui::widget::{DetailRequest, ViewFrame, ViewSession, ViewerProps};
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::json;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Where the viewer gets full landmark records from
#[async_trait]
pub trait DetailFetcher: Send + Sync + 'static {
    async fn fetch(&self, id: &str) -> Result<Landmark>;
}

/// Resolves details by calling `get-landmark-details` on a tool registry,
/// sharing the tool context of the call that opened the viewer
pub struct ToolDetailFetcher {
    registry: ToolRegistry,
    context: Arc<ToolContext>,
}

impl ToolDetailFetcher {
    pub fn new(registry: ToolRegistry, context: Arc<ToolContext>) -> Self {
        Self { registry, context }
    }
}

#[async_trait]
impl DetailFetcher for ToolDetailFetcher {
    async fn fetch(&self, id: &str) -> Result<Landmark> {
        let output = self
            .registry
            .call(GET_LANDMARK_DETAILS, json!({ "id": id }), &self.context)
            .await?;
        let content = output
            .structured_content
            .ok_or_else(|| Error::Fetch(format!("no structured content for {id}")))?;
        Ok(serde_json::from_value(content)?)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Load(ViewerProps),
    Input(InputEvent),
    Select(String),
    ToggleAutoRotate,
    Reset,
    Unmount,
}

type DetailResult = (u64, Result<Landmark>);

/// Handle to a running session. Dropping it unmounts the viewer.
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
    frames: watch::Receiver<ViewFrame>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    pub fn send(&self, command: SessionCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| Error::Session("view session has stopped".to_string()))
    }

    pub fn load(&self, props: ViewerProps) -> Result<()> {
        self.send(SessionCommand::Load(props))
    }

    pub fn input(&self, event: InputEvent) -> Result<()> {
        self.send(SessionCommand::Input(event))
    }

    pub fn select(&self, id: impl Into<String>) -> Result<()> {
        self.send(SessionCommand::Select(id.into()))
    }

    pub fn toggle_auto_rotate(&self) -> Result<()> {
        self.send(SessionCommand::ToggleAutoRotate)
    }

    pub fn reset(&self) -> Result<()> {
        self.send(SessionCommand::Reset)
    }

    /// Latest published frame
    pub fn frame(&self) -> ViewFrame {
        self.frames.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewFrame> {
        self.frames.clone()
    }

    /// Stop the session and wait for its task to finish
    pub async fn unmount(self) -> Result<()> {
        // Already stopped is fine, the join below reports real failures.
        let _ = self.commands.send(SessionCommand::Unmount);
        self.task
            .await
            .map_err(|e| Error::Session(format!("view session task failed: {e}")))
    }
}

/// Run `session` on the current tokio runtime
pub fn spawn_session(session: ViewSession, fetcher: Arc<dyn DetailFetcher>) -> SessionHandle {
    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let (frames_tx, frames_rx) = watch::channel(session.render());
    let task = tokio::spawn(run_session(session, fetcher, commands_rx, frames_tx));
    SessionHandle {
        commands: commands_tx,
        frames: frames_rx,
        task,
    }
}

fn spawn_fetch(
    fetcher: &Arc<dyn DetailFetcher>,
    request: DetailRequest,
    results: &mpsc::UnboundedSender<DetailResult>,
) {
    let fetcher = Arc::clone(fetcher);
    let results = results.clone();
    tokio::spawn(async move {
        let result = fetcher.fetch(&request.id).await;
        // A closed channel means the session is gone; nobody wants the answer.
        let _ = results.send((request.generation, result));
    });
}

async fn run_session(
    mut session: ViewSession,
    fetcher: Arc<dyn DetailFetcher>,
    mut commands: mpsc::UnboundedReceiver<SessionCommand>,
    frames: watch::Sender<ViewFrame>,
) {
    let (results_tx, mut results_rx) = mpsc::unbounded_channel::<DetailResult>();
    let period = session.auto_rotate_interval();
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    log::info!("view session started");

    loop {
        let spinning = session.auto_rotate_active();

        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    log::debug!("session handle dropped");
                    break;
                };
                match command {
                    SessionCommand::Unmount => break,
                    SessionCommand::Load(props) => {
                        if let Some(request) = session.load(props) {
                            spawn_fetch(&fetcher, request, &results_tx);
                        }
                    }
                    SessionCommand::Input(event) => {
                        session.handle_input(&event);
                    }
                    SessionCommand::Select(id) => {
                        let request = session.select(id);
                        spawn_fetch(&fetcher, request, &results_tx);
                    }
                    SessionCommand::ToggleAutoRotate => {
                        session.toggle_auto_rotate();
                    }
                    SessionCommand::Reset => session.reset(),
                }
                if !spinning && session.auto_rotate_active() {
                    // First step lands one full period after rotation resumes.
                    ticker.reset();
                }
            }
            Some((generation, result)) = results_rx.recv() => {
                session.receive_details(generation, result);
            }
            _ = ticker.tick(), if spinning => {
                session.tick();
            }
        }

        frames.send_replace(session.render());
    }

    log::info!("view session ended");
}
