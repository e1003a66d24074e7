use std::sync::Arc;

use leadwatch_core::{
    AgentQuery, Effect, LeadSummary, LogSnapshot, ManagerContact, Msg, PollStopReason, RunId,
    SessionKind,
};
use leadwatch_engine::{
    AgentRunRequest, JobApi, LogFeed, ManagerRecord, PollEvent, PollSettings, PollingSession,
    StopReason,
};
use leadwatch_logging::{watch_info, watch_warn};
use tokio::sync::mpsc::UnboundedSender;

use super::prompt::CodePrompter;

/// Executes I/O effects. Every result comes back to the dispatcher as a `Msg`.
pub struct EffectRunner {
    api: Arc<dyn JobApi>,
    prompter: Arc<dyn CodePrompter>,
    visible: PollingSession,
    silent: PollingSession,
    console_poll: PollSettings,
    watch_poll: PollSettings,
    msg_tx: UnboundedSender<Msg>,
}

impl EffectRunner {
    pub fn new(
        api: Arc<dyn JobApi>,
        feed: Arc<dyn LogFeed>,
        prompter: Arc<dyn CodePrompter>,
        console_poll: PollSettings,
        watch_poll: PollSettings,
        msg_tx: UnboundedSender<Msg>,
    ) -> Self {
        Self {
            api,
            prompter,
            visible: PollingSession::new("console", Arc::clone(&feed)),
            silent: PollingSession::new("watch", feed),
            console_poll,
            watch_poll,
            msg_tx,
        }
    }

    /// Runs one non-notification effect. Must be called inside a tokio runtime.
    pub fn run(&mut self, effect: Effect) {
        match effect {
            Effect::StartPolling { session, run } => {
                let settings = match session {
                    SessionKind::Visible => self.console_poll,
                    SessionKind::Silent => self.watch_poll,
                };
                let on_event = poll_forwarder(self.msg_tx.clone(), session, run);
                self.session_mut(session).start(settings, on_event);
            }
            Effect::StopPolling { session, linger } => {
                watch_info!("Stopping {:?} polling in {:?}", session, linger);
                self.session_mut(session).stop_after(linger);
            }
            Effect::StartEnrichment { lead_id } => {
                let api = Arc::clone(&self.api);
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let started = std::time::Instant::now();
                    let result: Result<Vec<ManagerContact>, String> = api
                        .start_enrichment(&lead_id)
                        .await
                        .map(|outcome| outcome.managers.into_iter().map(map_manager).collect())
                        .map_err(|err| err.to_string());
                    watch_info!(
                        "Enrichment for {} returned after {:.1}s (ok={})",
                        lead_id,
                        started.elapsed().as_secs_f32(),
                        result.is_ok()
                    );
                    let _ = tx.send(Msg::EnrichmentFinished { lead_id, result });
                });
            }
            Effect::StartAgentRun(query) => {
                let api = Arc::clone(&self.api);
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let request = map_query(query);
                    let result = api
                        .run_agent(&request)
                        .await
                        .map(|ack| {
                            ack.message
                                .unwrap_or_else(|| "Agent started in background!".to_string())
                        })
                        .map_err(|err| err.to_string());
                    let _ = tx.send(Msg::AgentRunFinished { result });
                });
            }
            Effect::RefreshLead { lead_id } => {
                let api = Arc::clone(&self.api);
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let result = match api.fetch_lead(&lead_id).await {
                        Ok(record) => Ok(LeadSummary {
                            name: record.name,
                            company: record.company,
                            managers: record.managers_info.into_iter().map(map_manager).collect(),
                        }),
                        Err(err) => {
                            watch_warn!("Could not refresh lead {}: {}", lead_id, err);
                            Err(err.to_string())
                        }
                    };
                    let _ = tx.send(Msg::LeadRefreshed { lead_id, result });
                });
            }
            Effect::PromptForCode => {
                let prompter = Arc::clone(&self.prompter);
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let code = prompter.collect_code().await;
                    let _ = tx.send(Msg::CodeEntered(code));
                });
            }
            Effect::SubmitCode { code } => {
                let api = Arc::clone(&self.api);
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let result = api
                        .submit_verification_code(&code)
                        .await
                        .map_err(|err| err.to_string());
                    let _ = tx.send(Msg::CodeSubmitted { result });
                });
            }
            Effect::Notify(notification) => {
                watch_info!("notification: {}", notification.message);
            }
        }
    }

    fn session_mut(&mut self, session: SessionKind) -> &mut PollingSession {
        match session {
            SessionKind::Visible => &mut self.visible,
            SessionKind::Silent => &mut self.silent,
        }
    }
}

/// Tags poll events with their session and run and forwards them as messages.
fn poll_forwarder(
    tx: UnboundedSender<Msg>,
    session: SessionKind,
    run: RunId,
) -> impl FnMut(PollEvent) + Send + 'static {
    move |event| {
        let msg = match event {
            PollEvent::Tick { cycle, snapshot } => Msg::LogsPolled {
                session,
                run,
                cycle,
                snapshot: snapshot.map(|s| LogSnapshot::new(s.lines)),
            },
            PollEvent::Stopped { reason } => Msg::PollingStopped {
                session,
                run,
                reason: map_reason(reason),
            },
        };
        let _ = tx.send(msg);
    }
}

fn map_reason(reason: StopReason) -> PollStopReason {
    match reason {
        StopReason::CycleCap => PollStopReason::CycleCap,
        StopReason::Cancelled => PollStopReason::Cancelled,
    }
}

fn map_manager(record: ManagerRecord) -> ManagerContact {
    ManagerContact {
        name: record.name,
        title: record.title,
        email: record.email,
        phone: record.phone,
        profile_url: record.profile_url,
    }
}

fn map_query(query: AgentQuery) -> AgentRunRequest {
    AgentRunRequest {
        industry: query.industry,
        location: query.location,
        target_persona: query.target_persona,
        keywords: query.keywords,
    }
}
