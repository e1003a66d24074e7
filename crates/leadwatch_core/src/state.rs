use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use crate::view_model::{classify_line, AppViewModel, ConsoleStatus, LeadRowView};
use crate::{InterruptResolution, LeadId, LeadSummary, RunId, SessionKind};

/// Grace periods between a job finishing and its polling sessions stopping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lingers {
    pub enrichment: Duration,
    pub agent: Duration,
}

impl Default for Lingers {
    fn default() -> Self {
        Self {
            enrichment: Duration::from_secs(5),
            agent: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct SessionSlot {
    run: Option<RunId>,
    last_cycle: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    lingers: Lingers,
    interrupt: InterruptResolution,
    enriching: BTreeSet<LeadId>,
    refreshing: BTreeSet<LeadId>,
    leads: BTreeMap<LeadId, LeadSummary>,
    agent_running: bool,
    visible: SessionSlot,
    silent: SessionSlot,
    next_run: RunId,
    console_lines: Vec<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lingers(lingers: Lingers) -> Self {
        Self {
            lingers,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        let lead_ids: BTreeSet<&LeadId> = self.enriching.iter().chain(self.leads.keys()).collect();
        let leads = lead_ids
            .into_iter()
            .map(|lead_id| {
                let summary = self.leads.get(lead_id);
                LeadRowView {
                    lead_id: lead_id.clone(),
                    label: summary
                        .and_then(|s| s.company.clone().or_else(|| s.name.clone()))
                        .unwrap_or_else(|| lead_id.clone()),
                    enriching: self.enriching.contains(lead_id),
                    managers: summary.map(|s| s.managers.clone()).unwrap_or_default(),
                }
            })
            .collect();

        AppViewModel {
            console_status: if self.visible.run.is_some() {
                ConsoleStatus::Live
            } else {
                ConsoleStatus::Inactive
            },
            console_lines: self.console_lines.iter().map(|l| classify_line(l)).collect(),
            console_cycle: self.visible.last_cycle,
            prompt: self.interrupt.state(),
            interrupt_outstanding: self.interrupt.is_outstanding(),
            leads,
            agent_running: self.agent_running,
            dirty: self.dirty,
        }
    }

    /// True once no job, polling run or prompt remains outstanding.
    pub fn is_settled(&self) -> bool {
        self.enriching.is_empty()
            && self.refreshing.is_empty()
            && !self.agent_running
            && self.visible.run.is_none()
            && self.silent.run.is_none()
            && !self.interrupt.is_outstanding()
    }

    pub fn interrupt(&self) -> &InterruptResolution {
        &self.interrupt
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn lingers(&self) -> Lingers {
        self.lingers
    }

    pub(crate) fn interrupt_mut(&mut self) -> &mut InterruptResolution {
        &mut self.interrupt
    }

    fn slot(&self, session: SessionKind) -> &SessionSlot {
        match session {
            SessionKind::Visible => &self.visible,
            SessionKind::Silent => &self.silent,
        }
    }

    fn slot_mut(&mut self, session: SessionKind) -> &mut SessionSlot {
        match session {
            SessionKind::Visible => &mut self.visible,
            SessionKind::Silent => &mut self.silent,
        }
    }

    /// Allocates a fresh run for `session`, superseding any current one.
    pub(crate) fn arm_session(&mut self, session: SessionKind) -> RunId {
        self.next_run += 1;
        let run = self.next_run;
        let slot = self.slot_mut(session);
        slot.run = Some(run);
        slot.last_cycle = 0;
        self.dirty = true;
        run
    }

    pub(crate) fn is_armed(&self, session: SessionKind) -> bool {
        self.slot(session).run.is_some()
    }

    pub(crate) fn is_current_run(&self, session: SessionKind, run: RunId) -> bool {
        self.slot(session).run == Some(run)
    }

    pub(crate) fn record_cycle(&mut self, session: SessionKind, cycle: u32) {
        self.slot_mut(session).last_cycle = cycle;
        if session == SessionKind::Visible {
            self.dirty = true;
        }
    }

    pub(crate) fn disarm_session(&mut self, session: SessionKind) {
        self.slot_mut(session).run = None;
        self.dirty = true;
    }

    /// Replaces the console lines with the latest snapshot. Returns true if they changed.
    pub(crate) fn replace_console_lines(&mut self, lines: &[String]) -> bool {
        if self.console_lines == lines {
            return false;
        }
        self.console_lines = lines.to_vec();
        self.dirty = true;
        true
    }

    /// Marks a lead as enriching. Returns false if it already was.
    pub(crate) fn begin_enrichment(&mut self, lead_id: &LeadId) -> bool {
        let inserted = self.enriching.insert(lead_id.clone());
        if inserted {
            self.dirty = true;
        }
        inserted
    }

    /// Clears the enriching marker. Returns false if the lead was not enriching.
    pub(crate) fn finish_enrichment(&mut self, lead_id: &LeadId) -> bool {
        let removed = self.enriching.remove(lead_id);
        if removed {
            self.dirty = true;
        }
        removed
    }

    pub(crate) fn has_enrichments(&self) -> bool {
        !self.enriching.is_empty()
    }

    pub(crate) fn begin_refresh(&mut self, lead_id: &LeadId) {
        self.refreshing.insert(lead_id.clone());
    }

    pub(crate) fn finish_refresh(&mut self, lead_id: &LeadId) {
        self.refreshing.remove(lead_id);
    }

    pub(crate) fn lead_entry(&mut self, lead_id: &LeadId) -> &mut LeadSummary {
        self.dirty = true;
        self.leads.entry(lead_id.clone()).or_default()
    }

    pub(crate) fn agent_running(&self) -> bool {
        self.agent_running
    }

    pub(crate) fn set_agent_running(&mut self, running: bool) {
        self.agent_running = running;
        self.dirty = true;
    }
}
