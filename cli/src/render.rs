//! Plain-text rendering for the terminal console.

use std::fmt::{self, Write as _};
use std::io;

use wire::{AuthRule, EventRecord, StatsRow};

use crate::console::{Toast, ToastLevel};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Left-aligned columns separated by two spaces, header underlined with `-`.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| (*h).to_owned()).collect();
    push_row(&mut out, &widths, &header);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &widths, &rule);
    for row in rows {
        push_row(&mut out, &widths, row);
    }
    out
}

fn push_row(out: &mut String, widths: &[usize], cells: &[String]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let pad = width.saturating_sub(cell.chars().count());
        let _ = write!(line, "{cell}{}", " ".repeat(pad));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[must_use]
pub fn rules_table(rules: &[AuthRule]) -> String {
    let rows: Vec<Vec<String>> = rules
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.app.clone(),
                r.version_rule.clone(),
                r.ip_rule.clone(),
                r.detail_info.clone(),
                r.created_at.format(TIME_FORMAT).to_string(),
            ]
        })
        .collect();
    table(&["ID", "APP", "VERSION RULE", "IP RULE", "DETAIL", "CREATED"], &rows)
}

#[must_use]
pub fn events_table(events: &[EventRecord]) -> String {
    let rows: Vec<Vec<String>> = events
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.app.clone(),
                e.version.clone(),
                e.event_type.to_string(),
                e.client_ip.clone(),
                e.created_at.format(TIME_FORMAT).to_string(),
            ]
        })
        .collect();
    table(&["ID", "APP", "VERSION", "TYPE", "CLIENT IP", "TIME"], &rows)
}

#[must_use]
pub fn stats_table(stats: &[StatsRow]) -> String {
    let rows: Vec<Vec<String>> = stats
        .iter()
        .map(|s| {
            vec![
                s.app.clone(),
                s.start_count.to_string(),
                s.stop_count.to_string(),
                s.unique_ips.to_string(),
            ]
        })
        .collect();
    table(&["APP", "STARTS", "STOPS", "UNIQUE IPS"], &rows)
}

#[must_use]
pub fn toast_line(toast: &Toast) -> String {
    let mark = match toast.level {
        ToastLevel::Success => '✔',
        ToastLevel::Error => '✖',
    };
    format!("{mark} {}", toast.text)
}

/// Write toast lines and then the command error, if any. Returns whether the
/// run failed: an error toast or a command error.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn report(out: &mut impl io::Write, toasts: &[Toast], error: Option<&dyn fmt::Display>) -> io::Result<bool> {
    for toast in toasts {
        writeln!(out, "{}", toast_line(toast))?;
    }
    if let Some(err) = error {
        writeln!(out, "error: {err}")?;
    }
    Ok(error.is_some() || toasts.iter().any(|t| t.level == ToastLevel::Error))
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
