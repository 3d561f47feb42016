#![cfg(feature = "debug")]

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use is_terminal_polyfill::IsTerminal;

static DEPTH: AtomicUsize = AtomicUsize::new(0);

pub struct Depth {
    depth: usize,
}

impl Depth {
    pub fn new() -> Self {
        let depth = DEPTH.fetch_add(1, Ordering::SeqCst);
        Self { depth }
    }
}

impl Drop for Depth {
    fn drop(&mut self) {
        let _ = DEPTH.fetch_sub(1, Ordering::SeqCst);
    }
}

impl core::ops::Deref for Depth {
    type Target = usize;

    fn deref(&self) -> &Self::Target {
        &self.depth
    }
}

pub enum Severity {
    Success,
    Committed,
    Backtrack,
}

pub fn start(depth: usize, name: &dyn core::fmt::Display, remaining: &str) {
    let gutter_style = anstyle::Style::new().bold();
    let input_style = anstyle::Style::new().underline();

    let call_width = column_width();
    let call_column = format!("{:depth$}> {name}", "");

    let mut preview = format!("{remaining:?}");
    let max_preview = 24;
    if preview.chars().count() > max_preview {
        let truncate_at = preview
            .char_indices()
            .nth(max_preview)
            .map(|(byte, _)| byte)
            .unwrap_or(preview.len());
        preview.truncate(truncate_at);
        preview.push('…');
    }

    let writer = anstream::stderr();
    let mut writer = writer.lock();
    let _ = writeln!(
        writer,
        "{call_column:call_width$} {g}|{gr} {i}{preview}{ir}",
        g = gutter_style.render(),
        gr = gutter_style.render_reset(),
        i = input_style.render(),
        ir = input_style.render_reset(),
    );
}

pub fn end(depth: usize, name: &dyn core::fmt::Display, consumed: usize, severity: Severity) {
    let gutter_style = anstyle::Style::new().bold();
    let call_width = column_width();
    let call_column = format!("{:depth$}< {name}", "");

    let (status_style, status) = match severity {
        Severity::Success => (
            anstyle::Style::new().fg_color(Some(anstyle::AnsiColor::Green.into())),
            format!("+{consumed}"),
        ),
        Severity::Committed => (
            anstyle::Style::new().fg_color(Some(anstyle::AnsiColor::Red.into())),
            "committed".to_owned(),
        ),
        Severity::Backtrack => (
            anstyle::Style::new().fg_color(Some(anstyle::AnsiColor::Yellow.into())),
            "backtrack".to_owned(),
        ),
    };

    let writer = anstream::stderr();
    let mut writer = writer.lock();
    let _ = writeln!(
        writer,
        "{s}{call_column:call_width$}{sr} {g}|{gr} {s}{status}{sr}",
        s = status_style.render(),
        sr = status_style.render_reset(),
        g = gutter_style.render(),
        gr = gutter_style.render_reset(),
    );
}

fn column_width() -> usize {
    let term_width = columns_env().or_else(query_width).unwrap_or(80);
    let min_call_width = 40;
    term_width.max(min_call_width)
}

fn query_width() -> Option<usize> {
    if std::io::stderr().is_terminal() {
        terminal_size::terminal_size().map(|(w, _h)| w.0.into())
    } else {
        None
    }
}

fn columns_env() -> Option<usize> {
    std::env::var("COLUMNS").ok().and_then(|c| c.parse::<usize>().ok())
}
