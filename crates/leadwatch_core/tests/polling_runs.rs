use leadwatch_core::{
    update, AppState, ConsoleStatus, Effect, LineKind, LogSnapshot, Msg, PollStopReason,
    SessionKind,
};

fn lines(raw: &[&str]) -> Option<LogSnapshot> {
    Some(LogSnapshot::new(raw.iter().map(|l| l.to_string()).collect()))
}

fn console_run(state: AppState) -> (AppState, u64) {
    let (state, effects) = update(state, Msg::ConsoleRequested);
    match effects.as_slice() {
        [Effect::StartPolling {
            session: SessionKind::Visible,
            run,
        }] => (state, *run),
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn console_shows_latest_snapshot_and_keeps_it_on_empty_or_skipped_cycles() {
    let (state, run) = console_run(AppState::new());

    let (state, _) = update(
        state,
        Msg::LogsPolled {
            session: SessionKind::Visible,
            run,
            cycle: 1,
            snapshot: lines(&["[10:00:00] SCRAPER START", "Searching..."]),
        },
    );
    let (state, _) = update(
        state,
        Msg::LogsPolled {
            session: SessionKind::Visible,
            run,
            cycle: 2,
            snapshot: None,
        },
    );
    let (state, _) = update(
        state,
        Msg::LogsPolled {
            session: SessionKind::Visible,
            run,
            cycle: 3,
            snapshot: lines(&[]),
        },
    );

    let view = state.view();
    assert_eq!(view.console_cycle, 3);
    assert_eq!(view.console_lines.len(), 2);
    assert_eq!(view.console_lines[0].kind, LineKind::Important);
    assert_eq!(view.console_lines[0].timestamp.as_deref(), Some("[10:00:00]"));
}

#[test]
fn silent_snapshots_do_not_touch_the_console() {
    let (state, _) = update(AppState::new(), Msg::EnrichRequested("1".to_string()));
    let (state, _) = update(
        state,
        Msg::LogsPolled {
            session: SessionKind::Silent,
            run: 2,
            cycle: 1,
            snapshot: lines(&["background only"]),
        },
    );
    assert!(state.view().console_lines.is_empty());
}

#[test]
fn stale_run_events_are_discarded() {
    let (state, old_run) = console_run(AppState::new());
    let (state, new_run) = console_run(state);
    assert_ne!(old_run, new_run);

    let (state, effects) = update(
        state,
        Msg::LogsPolled {
            session: SessionKind::Visible,
            run: old_run,
            cycle: 5,
            snapshot: lines(&["ACTION REQUIRED: old run"]),
        },
    );
    assert!(effects.is_empty());
    assert!(state.view().console_lines.is_empty());
    assert!(!state.interrupt().is_outstanding());

    let (state, _) = update(
        state,
        Msg::PollingStopped {
            session: SessionKind::Visible,
            run: old_run,
            reason: PollStopReason::Cancelled,
        },
    );
    assert_eq!(state.view().console_status, ConsoleStatus::Live);
}

#[test]
fn cycle_cap_marks_console_inactive() {
    let (state, run) = console_run(AppState::new());
    let (state, _) = update(
        state,
        Msg::PollingStopped {
            session: SessionKind::Visible,
            run,
            reason: PollStopReason::CycleCap,
        },
    );
    assert_eq!(state.view().console_status, ConsoleStatus::Inactive);
    assert_eq!(state.view().console_status.label(), "Inactive");
    assert!(state.is_settled());
}
