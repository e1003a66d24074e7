//! Plain-terminal rendering of the view model.
//!
//! The renderer keeps the last view it printed and only writes what changed:
//! console status flips, log lines not yet shown, per-lead progress and
//! notifications.

use std::io::{self, Write};

use chrono::Local;
use leadwatch_core::{
    AppViewModel, ConsoleLine, LeadRowView, LineKind, Notification, NotifyLevel,
};

pub struct TerminalRenderer<W: Write> {
    out: W,
    last: AppViewModel,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last: AppViewModel::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn render(&mut self, view: &AppViewModel) -> io::Result<()> {
        if view.console_status != self.last.console_status {
            writeln!(self.out, "── Console: {}", view.console_status.label())?;
        }

        let fresh = unseen_suffix(&self.last.console_lines, &view.console_lines);
        for line in fresh {
            writeln!(self.out, "{}", format_line(line))?;
        }

        for lead in &view.leads {
            let previous = self
                .last
                .leads
                .iter()
                .find(|l| l.lead_id == lead.lead_id)
                .cloned();
            if previous.as_ref() != Some(lead) {
                self.render_lead(lead, previous.as_ref())?;
            }
        }

        self.out.flush()?;
        self.last = view.clone();
        Ok(())
    }

    pub fn notify(&mut self, notification: &Notification) -> io::Result<()> {
        let icon = match notification.level {
            NotifyLevel::Success => "✅",
            NotifyLevel::Error => "❌",
            NotifyLevel::Info => "ℹ️",
        };
        writeln!(
            self.out,
            "{} {} {}",
            Local::now().format("%H:%M:%S"),
            icon,
            notification.message
        )?;
        self.out.flush()
    }

    fn render_lead(&mut self, lead: &LeadRowView, previous: Option<&LeadRowView>) -> io::Result<()> {
        if lead.enriching {
            if !previous.is_some_and(|p| p.enriching) {
                writeln!(self.out, "⏳ {} enriching…", lead.label)?;
            }
            return Ok(());
        }
        if previous.is_some_and(|p| !p.enriching && p.managers == lead.managers) {
            return Ok(());
        }
        writeln!(self.out, "💼 Managers at {} ({})", lead.label, lead.managers.len())?;
        for manager in &lead.managers {
            let name = manager.name.as_deref().unwrap_or("Unknown");
            let title = manager.title.as_deref().unwrap_or("");
            let mut row = format!("   • {name}");
            if !title.is_empty() {
                row.push_str(&format!(" | {title}"));
            }
            if let Some(email) = manager.email.as_deref() {
                row.push_str(&format!(" | {email}"));
            }
            if let Some(url) = manager.profile_url.as_deref() {
                row.push_str(&format!(" | {url}"));
            }
            writeln!(self.out, "{row}")?;
        }
        Ok(())
    }
}

/// Lines of `next` that were not already printed.
///
/// Snapshots are whole logs, not deltas: the longest suffix of `previous`
/// that is a prefix of `next` is treated as already shown.
fn unseen_suffix<'a>(previous: &[ConsoleLine], next: &'a [ConsoleLine]) -> &'a [ConsoleLine] {
    let max_overlap = previous.len().min(next.len());
    let overlap = (0..=max_overlap)
        .rev()
        .find(|&k| previous[previous.len() - k..] == next[..k])
        .unwrap_or(0);
    &next[overlap..]
}

fn format_line(line: &ConsoleLine) -> String {
    let marker = match line.kind {
        LineKind::Plain => " ",
        LineKind::Success => "+",
        LineKind::Warning => "!",
        LineKind::Important => "*",
    };
    match &line.timestamp {
        Some(ts) => format!("{marker} {ts}{}", line.text),
        None => format!("{marker} {}", line.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadwatch_core::classify_line;

    fn lines(raw: &[&str]) -> Vec<ConsoleLine> {
        raw.iter().map(|l| classify_line(l)).collect()
    }

    #[test]
    fn growing_log_prints_only_new_lines() {
        let previous = lines(&["a", "b"]);
        let next = lines(&["a", "b", "c"]);
        assert_eq!(unseen_suffix(&previous, &next), &next[2..]);
    }

    #[test]
    fn sliding_window_prints_only_new_tail() {
        let previous = lines(&["a", "b", "c"]);
        let next = lines(&["b", "c", "d", "e"]);
        assert_eq!(unseen_suffix(&previous, &next), &next[2..]);
    }

    #[test]
    fn unrelated_log_prints_everything() {
        let previous = lines(&["a"]);
        let next = lines(&["x", "y"]);
        assert_eq!(unseen_suffix(&previous, &next), &next[..]);
    }

    #[test]
    fn status_and_lines_are_written_once() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        let view = AppViewModel {
            console_status: leadwatch_core::ConsoleStatus::Live,
            console_lines: lines(&["[10:00:00] SCRAPER START"]),
            ..AppViewModel::default()
        };
        renderer.render(&view).unwrap();
        renderer.render(&view).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(text.matches("Live: Syncing...").count(), 1);
        assert_eq!(text.matches("SCRAPER START").count(), 1);
        assert!(text.contains("* [10:00:00] SCRAPER START"));
    }
}
