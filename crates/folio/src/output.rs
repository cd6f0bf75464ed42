//! Terminal output for the CLI.
//!
//! Diagnostics go to stderr and are best-effort. Command results go to
//! stdout, and write failures there are returned to the caller so that a
//! closed pipe fails the command.

use std::io::{self, Write};

use console::{Style, Term};
use serde::Serialize;

use crate::error::CliError;

/// Terminal output formatter.
pub(crate) struct Output {
    diagnostics: Term,
    results: Term,
    success: Style,
    warning: Style,
    error: Style,
    heading: Style,
    muted: Style,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            diagnostics: Term::stderr(),
            results: Term::stdout(),
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red(),
            heading: Style::new().cyan().bold(),
            muted: Style::new().dim(),
        }
    }

    fn diagnostic(&self, style: Option<&Style>, msg: &str) {
        let line = match style {
            Some(style) => style.apply_to(msg).to_string(),
            None => msg.to_owned(),
        };
        let _ = self.diagnostics.write_line(&line);
    }

    /// Plain progress message.
    pub(crate) fn info(&self, msg: &str) {
        self.diagnostic(None, msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.diagnostic(Some(&self.success), msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.diagnostic(Some(&self.warning), msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.diagnostic(Some(&self.error), msg);
    }

    /// Section heading, e.g. a docs instance id.
    pub(crate) fn heading(&self, msg: &str) {
        self.diagnostic(Some(&self.heading), msg);
    }

    /// Style an inline fragment as secondary text.
    pub(crate) fn muted(&self, text: &str) -> String {
        self.muted.apply_to(text).to_string()
    }

    /// Write result lines to stdout.
    pub(crate) fn lines<I, S>(&self, lines: I) -> io::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        write_lines(&mut &self.results, lines)
    }

    /// Write a value to stdout as pretty-printed JSON.
    pub(crate) fn json<T: Serialize>(&self, value: &T) -> Result<(), CliError> {
        let json = serde_json::to_string_pretty(value)?;
        self.lines([json])?;
        Ok(())
    }
}

fn write_lines<W, I, S>(out: &mut W, lines: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in lines {
        writeln!(out, "{}", line.as_ref())?;
    }
    out.flush()
}
