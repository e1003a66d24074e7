use std::io::Write;
use std::sync::Arc;

use leadwatch_core::{update, AppState, Effect, Msg};
use leadwatch_engine::{ApiClient, JobApi, LogFeed, ReqwestJobApi, ReqwestLogFeed};
use leadwatch_logging::{set_poll_cycle, watch_debug, watch_info, watch_warn};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::prompt::{CodePrompter, StdinPrompter};
use super::ui::render::TerminalRenderer;

/// Builds the HTTP-backed dispatcher and runs `initial` to completion.
pub async fn run_app(config: &AppConfig, initial: Vec<Msg>) -> anyhow::Result<()> {
    let client = ApiClient::new(config.api_settings())?;
    watch_info!("Job host: {}", client.settings().base_url);
    let api: Arc<dyn JobApi> = Arc::new(ReqwestJobApi::new(client.clone()));
    let feed: Arc<dyn LogFeed> = Arc::new(ReqwestLogFeed::new(client));
    let prompter: Arc<dyn CodePrompter> = Arc::new(StdinPrompter);

    let dispatcher = Dispatcher::new(config, api, feed, prompter, std::io::stdout());
    dispatcher.run(initial).await;
    Ok(())
}

/// Single owner of `AppState`.
///
/// Messages are applied one at a time in arrival order; effects are handed
/// to the runner, which reports back over the same channel.
pub struct Dispatcher<W: Write> {
    state: AppState,
    runner: EffectRunner,
    renderer: TerminalRenderer<W>,
    msg_rx: UnboundedReceiver<Msg>,
}

impl<W: Write> Dispatcher<W> {
    pub fn new(
        config: &AppConfig,
        api: Arc<dyn JobApi>,
        feed: Arc<dyn LogFeed>,
        prompter: Arc<dyn CodePrompter>,
        out: W,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let runner = EffectRunner::new(
            api,
            feed,
            prompter,
            config.console_poll(),
            config.watch_poll(),
            msg_tx,
        );
        Self {
            state: AppState::with_lingers(config.lingers()),
            runner,
            renderer: TerminalRenderer::new(out),
            msg_rx,
        }
    }

    /// Applies `initial`, then processes messages until nothing is outstanding.
    /// Returns the final state and the renderer output.
    pub async fn run(mut self, initial: Vec<Msg>) -> (AppState, W) {
        for msg in initial {
            self.dispatch(msg);
        }
        while !self.state.is_settled() {
            let Some(msg) = self.msg_rx.recv().await else {
                break;
            };
            self.dispatch(msg);
        }
        watch_info!("All jobs settled");
        (self.state, self.renderer.into_inner())
    }

    fn dispatch(&mut self, msg: Msg) {
        if let Msg::LogsPolled { cycle, .. } = &msg {
            set_poll_cycle(*cycle);
        }
        watch_debug!("dispatch {:?}", msg_name(&msg));

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.view();
        let was_dirty = state.consume_dirty();
        self.state = state;

        for effect in effects {
            if let Effect::Notify(notification) = &effect {
                if let Err(err) = self.renderer.notify(notification) {
                    watch_warn!("Failed to write notification: {}", err);
                }
            }
            self.runner.run(effect);
        }
        if was_dirty {
            if let Err(err) = self.renderer.render(&view) {
                watch_warn!("Failed to render: {}", err);
            }
        }
        set_poll_cycle(0);
    }
}

fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::EnrichRequested(_) => "EnrichRequested",
        Msg::EnrichmentFinished { .. } => "EnrichmentFinished",
        Msg::LeadRefreshed { .. } => "LeadRefreshed",
        Msg::AgentRunRequested(_) => "AgentRunRequested",
        Msg::AgentRunFinished { .. } => "AgentRunFinished",
        Msg::ConsoleRequested => "ConsoleRequested",
        Msg::LogsPolled { .. } => "LogsPolled",
        Msg::PollingStopped { .. } => "PollingStopped",
        Msg::CodeEntered(_) => "CodeEntered",
        Msg::CodeSubmitted { .. } => "CodeSubmitted",
    }
}
