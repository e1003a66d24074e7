use std::time::Duration;

use crate::{detect, AppState, Effect, Msg, Notification, SessionKind};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::EnrichRequested(lead_id) => {
            if !state.begin_enrichment(&lead_id) {
                return (state, Vec::new());
            }
            let visible = state.arm_session(SessionKind::Visible);
            let silent = state.arm_session(SessionKind::Silent);
            vec![
                Effect::Notify(Notification::info("Fetching managers…")),
                Effect::StartPolling {
                    session: SessionKind::Visible,
                    run: visible,
                },
                Effect::StartPolling {
                    session: SessionKind::Silent,
                    run: silent,
                },
                Effect::StartEnrichment { lead_id },
            ]
        }
        Msg::EnrichmentFinished { lead_id, result } => {
            if !state.finish_enrichment(&lead_id) {
                return (state, Vec::new());
            }
            let mut effects = Vec::new();
            match result {
                Ok(managers) => {
                    let count = managers.len();
                    state.lead_entry(&lead_id).managers = managers;
                    effects.push(Effect::Notify(Notification::success(format!(
                        "Found {count} manager{} for lead {lead_id}",
                        if count == 1 { "" } else { "s" }
                    ))));
                    state.begin_refresh(&lead_id);
                    effects.push(Effect::RefreshLead { lead_id });
                }
                Err(detail) => {
                    effects.push(Effect::Notify(Notification::error(format!("Error: {detail}"))));
                }
            }
            let linger = state.lingers().enrichment;
            effects.extend(release_sessions(&state, linger));
            effects
        }
        Msg::LeadRefreshed { lead_id, result } => {
            state.finish_refresh(&lead_id);
            // A failed refresh keeps whatever the enrichment already reported.
            if let Ok(summary) = result {
                *state.lead_entry(&lead_id) = summary;
            }
            Vec::new()
        }
        Msg::AgentRunRequested(query) => {
            if state.agent_running() {
                return (
                    state,
                    vec![Effect::Notify(Notification::info("Agent is already running"))],
                );
            }
            state.set_agent_running(true);
            let run = state.arm_session(SessionKind::Visible);
            vec![
                Effect::Notify(Notification::info(
                    "Agent is running… This may take a few minutes.",
                )),
                Effect::StartPolling {
                    session: SessionKind::Visible,
                    run,
                },
                Effect::StartAgentRun(query),
            ]
        }
        Msg::AgentRunFinished { result } => {
            if !state.agent_running() {
                return (state, Vec::new());
            }
            state.set_agent_running(false);
            let mut effects = vec![match result {
                Ok(message) => Effect::Notify(Notification::success(message)),
                Err(detail) => {
                    Effect::Notify(Notification::error(format!("Agent failed to start: {detail}")))
                }
            }];
            let linger = state.lingers().agent;
            effects.extend(release_sessions(&state, linger));
            effects
        }
        Msg::ConsoleRequested => {
            let run = state.arm_session(SessionKind::Visible);
            vec![Effect::StartPolling {
                session: SessionKind::Visible,
                run,
            }]
        }
        Msg::LogsPolled {
            session,
            run,
            cycle,
            snapshot,
        } => {
            if !state.is_current_run(session, run) {
                return (state, Vec::new());
            }
            state.record_cycle(session, cycle);
            let Some(snapshot) = snapshot else {
                return (state, Vec::new());
            };
            if session == SessionKind::Visible && !snapshot.is_empty() {
                state.replace_console_lines(&snapshot.lines);
            }
            if state.interrupt_mut().begin(detect(&snapshot)) {
                state.mark_dirty();
                vec![
                    Effect::Notify(Notification::info(
                        "Verification code required to continue",
                    )),
                    Effect::PromptForCode,
                ]
            } else {
                Vec::new()
            }
        }
        Msg::PollingStopped { session, run, .. } => {
            if state.is_current_run(session, run) {
                state.disarm_session(session);
            }
            Vec::new()
        }
        Msg::CodeEntered(input) => {
            let was_prompting = state.interrupt().is_outstanding();
            let code = state.interrupt_mut().supply(input);
            if was_prompting {
                state.mark_dirty();
            }
            match code {
                Some(code) => vec![Effect::SubmitCode { code }],
                None => Vec::new(),
            }
        }
        Msg::CodeSubmitted { result } => {
            if !state.interrupt_mut().resolve() {
                return (state, Vec::new());
            }
            state.mark_dirty();
            vec![match result {
                Ok(()) => Effect::Notify(Notification::success(
                    "Verification code submitted. Resuming…",
                )),
                Err(detail) => {
                    Effect::Notify(Notification::error(format!("Verification failed: {detail}")))
                }
            }]
        }
    };

    (state, effects)
}

/// Stops the sessions no remaining job needs, after `linger`.
fn release_sessions(state: &AppState, linger: Duration) -> Vec<Effect> {
    let mut effects = Vec::new();
    let enriching = state.has_enrichments();
    if !enriching && state.is_armed(SessionKind::Silent) {
        effects.push(Effect::StopPolling {
            session: SessionKind::Silent,
            linger,
        });
    }
    if !enriching && !state.agent_running() && state.is_armed(SessionKind::Visible) {
        effects.push(Effect::StopPolling {
            session: SessionKind::Visible,
            linger,
        });
    }
    effects
}
