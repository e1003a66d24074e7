//! Timer-driven polling of a [`LogFeed`].
//!
//! Each call to [`PollingSession::start`] spawns one run: a tokio task that
//! ticks on a fixed interval, fetches a snapshot and hands it to the caller's
//! callback. A run owns a cancellation token; restarting or stopping the
//! session cancels it.
//!
//! Ticks of one run never overlap: the fetch is awaited inside the loop and
//! ticks missed while it was in flight are skipped. A fetch that is still in
//! flight when the run is cancelled completes, but its result is dropped.

use std::sync::Arc;
use std::time::Duration;

use leadwatch_logging::{watch_debug, watch_info};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::{LogFeed, LogSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    /// Self-stop after this many cycles. `None` polls until stopped.
    pub max_cycles: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    CycleCap,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    /// One completed cycle, 1-based. `None` when the feed had no data.
    Tick {
        cycle: u32,
        snapshot: Option<LogSnapshot>,
    },
    /// Sent exactly once when a run ends.
    Stopped { reason: StopReason },
}

struct ActiveRun {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct PollingSession {
    name: &'static str,
    feed: Arc<dyn LogFeed>,
    run: Option<ActiveRun>,
}

impl PollingSession {
    pub fn new(name: &'static str, feed: Arc<dyn LogFeed>) -> Self {
        Self {
            name,
            feed,
            run: None,
        }
    }

    /// Starts a new run, stopping the current one first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(&mut self, settings: PollSettings, on_event: F)
    where
        F: FnMut(PollEvent) + Send + 'static,
    {
        self.stop();
        let token = CancellationToken::new();
        let handle = tokio::spawn(run_loop(
            self.name,
            Arc::clone(&self.feed),
            settings,
            token.clone(),
            on_event,
        ));
        watch_info!(
            "{} polling started (every {:?}, cap {:?})",
            self.name,
            settings.interval,
            settings.max_cycles
        );
        self.run = Some(ActiveRun { token, handle });
    }

    /// Stops the current run. No-op when nothing is running.
    pub fn stop(&mut self) {
        if let Some(run) = self.run.take() {
            run.token.cancel();
        }
    }

    /// Stops the run that is current now once `linger` has elapsed.
    ///
    /// A run started in the meantime is not affected.
    pub fn stop_after(&self, linger: Duration) {
        let Some(run) = self.run.as_ref() else {
            return;
        };
        if linger.is_zero() {
            run.token.cancel();
            return;
        }
        let token = run.token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(linger) => token.cancel(),
                _ = token.cancelled() => {}
            }
        });
    }

    pub fn is_active(&self) -> bool {
        self.run
            .as_ref()
            .is_some_and(|run| !run.token.is_cancelled() && !run.handle.is_finished())
    }
}

impl Drop for PollingSession {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_loop<F>(
    name: &'static str,
    feed: Arc<dyn LogFeed>,
    settings: PollSettings,
    token: CancellationToken,
    mut on_event: F,
) where
    F: FnMut(PollEvent) + Send,
{
    let mut ticker = tokio::time::interval(settings.interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut cycle = 0u32;

    let reason = loop {
        if settings.max_cycles.is_some_and(|max| cycle >= max) {
            break StopReason::CycleCap;
        }
        tokio::select! {
            biased;
            _ = token.cancelled() => break StopReason::Cancelled,
            _ = ticker.tick() => {}
        }
        cycle += 1;
        let snapshot = feed.fetch_snapshot().await;
        if token.is_cancelled() {
            watch_debug!("{} dropped result of cycle {} fetched after stop", name, cycle);
            break StopReason::Cancelled;
        }
        on_event(PollEvent::Tick { cycle, snapshot });
    };

    watch_info!("{} polling stopped after {} cycles ({:?})", name, cycle, reason);
    on_event(PollEvent::Stopped { reason });
}
