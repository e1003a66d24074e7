use std::time::Duration;

use leadwatch_core::{
    update, AgentQuery, AppState, Effect, LeadSummary, Lingers, ManagerContact, Msg, Notification,
    SessionKind,
};
use pretty_assertions::assert_eq;

fn lingers() -> Lingers {
    Lingers {
        enrichment: Duration::from_secs(5),
        agent: Duration::from_secs(10),
    }
}

fn manager(name: &str) -> ManagerContact {
    ManagerContact {
        name: Some(name.to_string()),
        title: Some("Manager".to_string()),
        ..ManagerContact::default()
    }
}

#[test]
fn enrich_marks_lead_and_arms_both_sessions_before_request() {
    let (mut state, effects) = update(
        AppState::with_lingers(lingers()),
        Msg::EnrichRequested("42".to_string()),
    );

    assert_eq!(
        effects,
        vec![
            Effect::Notify(Notification::info("Fetching managers…")),
            Effect::StartPolling {
                session: SessionKind::Visible,
                run: 1,
            },
            Effect::StartPolling {
                session: SessionKind::Silent,
                run: 2,
            },
            Effect::StartEnrichment {
                lead_id: "42".to_string()
            },
        ]
    );

    let view = state.view();
    assert_eq!(view.leads.len(), 1);
    assert!(view.leads[0].enriching);
    assert_eq!(view.console_status.label(), "Live: Syncing...");
    assert!(!state.is_settled());
    assert!(state.consume_dirty());
}

#[test]
fn duplicate_enrich_request_is_ignored() {
    let (state, _) = update(AppState::new(), Msg::EnrichRequested("42".to_string()));
    let (_state, effects) = update(state, Msg::EnrichRequested("42".to_string()));
    assert!(effects.is_empty());
}

#[test]
fn successful_enrichment_clears_spinner_refreshes_and_lingers() {
    let (state, _) = update(
        AppState::with_lingers(lingers()),
        Msg::EnrichRequested("42".to_string()),
    );
    let (state, effects) = update(
        state,
        Msg::EnrichmentFinished {
            lead_id: "42".to_string(),
            result: Ok(vec![manager("Ada"), manager("Grace")]),
        },
    );

    assert_eq!(
        effects,
        vec![
            Effect::Notify(Notification::success("Found 2 managers for lead 42")),
            Effect::RefreshLead {
                lead_id: "42".to_string()
            },
            Effect::StopPolling {
                session: SessionKind::Silent,
                linger: Duration::from_secs(5),
            },
            Effect::StopPolling {
                session: SessionKind::Visible,
                linger: Duration::from_secs(5),
            },
        ]
    );

    let view = state.view();
    assert!(!view.leads[0].enriching);
    assert_eq!(view.leads[0].managers.len(), 2);
}

#[test]
fn failed_enrichment_notifies_detail_and_still_stops_sessions() {
    let (state, _) = update(
        AppState::with_lingers(lingers()),
        Msg::EnrichRequested("42".to_string()),
    );
    let (state, effects) = update(
        state,
        Msg::EnrichmentFinished {
            lead_id: "42".to_string(),
            result: Err("Lead not found".to_string()),
        },
    );

    assert_eq!(effects[0], Effect::Notify(Notification::error("Error: Lead not found")));
    assert!(effects.contains(&Effect::StopPolling {
        session: SessionKind::Silent,
        linger: Duration::from_secs(5),
    }));
    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, Effect::RefreshLead { .. })));
    assert!(state.view().leads.iter().all(|lead| !lead.enriching));
}

#[test]
fn sessions_keep_running_while_another_enrichment_is_in_flight() {
    let (state, _) = update(AppState::new(), Msg::EnrichRequested("a".to_string()));
    let (state, _) = update(state, Msg::EnrichRequested("b".to_string()));
    let (state, effects) = update(
        state,
        Msg::EnrichmentFinished {
            lead_id: "a".to_string(),
            result: Ok(Vec::new()),
        },
    );

    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, Effect::StopPolling { .. })));

    let (_state, effects) = update(
        state,
        Msg::EnrichmentFinished {
            lead_id: "b".to_string(),
            result: Ok(Vec::new()),
        },
    );
    let stops = effects
        .iter()
        .filter(|effect| matches!(effect, Effect::StopPolling { .. }))
        .count();
    assert_eq!(stops, 2);
}

#[test]
fn refresh_replaces_lead_summary_and_failure_keeps_previous() {
    let (state, _) = update(AppState::new(), Msg::EnrichRequested("42".to_string()));
    let (state, _) = update(
        state,
        Msg::EnrichmentFinished {
            lead_id: "42".to_string(),
            result: Ok(vec![manager("Ada")]),
        },
    );
    let (state, effects) = update(
        state,
        Msg::LeadRefreshed {
            lead_id: "42".to_string(),
            result: Ok(LeadSummary {
                name: Some("Acme".to_string()),
                company: Some("Acme Corp".to_string()),
                managers: vec![manager("Ada"), manager("Linus")],
            }),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.leads[0].label, "Acme Corp");
    assert_eq!(view.leads[0].managers.len(), 2);

    let (state, _) = update(
        state,
        Msg::LeadRefreshed {
            lead_id: "42".to_string(),
            result: Err("offline".to_string()),
        },
    );
    assert_eq!(state.view().leads[0].managers.len(), 2);
}

#[test]
fn agent_run_arms_console_and_lingers_longer() {
    let query = AgentQuery {
        industry: "SaaS".to_string(),
        keywords: vec!["b2b".to_string()],
        ..AgentQuery::default()
    };
    let (state, effects) = update(
        AppState::with_lingers(lingers()),
        Msg::AgentRunRequested(query.clone()),
    );
    assert!(effects.contains(&Effect::StartAgentRun(query.clone())));
    assert!(effects.contains(&Effect::StartPolling {
        session: SessionKind::Visible,
        run: 1,
    }));

    let (state, effects) = update(state, Msg::AgentRunRequested(query));
    assert_eq!(
        effects,
        vec![Effect::Notify(Notification::info("Agent is already running"))]
    );

    let (state, effects) = update(
        state,
        Msg::AgentRunFinished {
            result: Ok("Agent started in background!".to_string()),
        },
    );
    assert_eq!(
        effects,
        vec![
            Effect::Notify(Notification::success("Agent started in background!")),
            Effect::StopPolling {
                session: SessionKind::Visible,
                linger: Duration::from_secs(10),
            },
        ]
    );
    assert!(!state.view().agent_running);
}

#[test]
fn settles_once_sessions_report_stopped() {
    let (state, _) = update(AppState::new(), Msg::EnrichRequested("42".to_string()));
    let (state, _) = update(
        state,
        Msg::EnrichmentFinished {
            lead_id: "42".to_string(),
            result: Ok(Vec::new()),
        },
    );
    assert!(!state.is_settled());

    let (state, _) = update(
        state,
        Msg::PollingStopped {
            session: SessionKind::Visible,
            run: 1,
            reason: leadwatch_core::PollStopReason::Cancelled,
        },
    );
    let (state, _) = update(
        state,
        Msg::PollingStopped {
            session: SessionKind::Silent,
            run: 2,
            reason: leadwatch_core::PollStopReason::Cancelled,
        },
    );
    assert!(!state.is_settled(), "refresh still pending");

    let (state, _) = update(
        state,
        Msg::LeadRefreshed {
            lead_id: "42".to_string(),
            result: Err("offline".to_string()),
        },
    );
    assert!(state.is_settled());
}

#[test]
fn fresh_state_is_settled_and_idle() {
    let state = AppState::with_lingers(lingers());
    let view = state.view();

    assert!(state.is_settled());
    assert!(!state.interrupt().is_outstanding());
    assert!(view.leads.is_empty());
    assert!(view.console_lines.is_empty());
    assert_eq!(view.console_cycle, 0);
}
