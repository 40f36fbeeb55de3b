//! Structured JSON logger
//!
//! - One log line = one event
//! - Synchronous, unbuffered, no background threads
//! - Event first, then fields in caller order; output is deterministic
//!   for deterministic input
//!
//! Resolution itself never logs; logging happens at the surface layer
//! that drives it, so the core stays a pure function.

use std::io::{self, Write};

use super::Event;

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
}

impl Severity {
    /// String representation used in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

/// Synchronous structured logger.
pub struct Logger;

impl Logger {
    /// Logs an informational event to stdout.
    pub fn info(event: Event, fields: &[(&str, &str)]) {
        Self::log_to_writer(Severity::Info, event, fields, &mut io::stdout());
    }

    /// Logs a warning to stdout.
    pub fn warn(event: Event, fields: &[(&str, &str)]) {
        Self::log_to_writer(Severity::Warn, event, fields, &mut io::stdout());
    }

    /// Logs a failure to stderr.
    pub fn error(event: Event, fields: &[(&str, &str)]) {
        Self::log_to_writer(Severity::Error, event, fields, &mut io::stderr());
    }

    fn log_to_writer<W: Write>(
        severity: Severity,
        event: Event,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let mut line = String::with_capacity(128);
        line.push('{');
        push_pair(&mut line, "event", event.as_str());
        line.push(',');
        push_pair(&mut line, "severity", severity.as_str());
        for (key, value) in fields {
            line.push(',');
            push_pair(&mut line, key, value);
        }
        line.push('}');
        line.push('\n');

        // A full stdout is not a reason to fail the operation being logged.
        let _ = writer.write_all(line.as_bytes());
    }
}

fn push_pair(out: &mut String, key: &str, value: &str) {
    push_json_string(out, key);
    out.push(':');
    push_json_string(out, value);
}

fn push_json_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(severity: Severity, event: Event, fields: &[(&str, &str)]) -> String {
        let mut buf = Vec::new();
        Logger::log_to_writer(severity, event, fields, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_line_is_valid_json_with_event_first() {
        let line = render(
            Severity::Info,
            Event::ResolveComplete,
            &[("table", "db.events"), ("visible", "3")],
        );
        assert!(line.starts_with("{\"event\":\"RESOLVE_COMPLETE\""));
        let parsed: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(parsed["severity"], "INFO");
        assert_eq!(parsed["table"], "db.events");
        assert_eq!(parsed["visible"], "3");
    }

    #[test]
    fn test_strings_are_escaped() {
        let line = render(
            Severity::Error,
            Event::ConsistencyFault,
            &[("detail", "cycle at \"p_1_1_0\"\n")],
        );
        let parsed: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(parsed["detail"], "cycle at \"p_1_1_0\"\n");
    }

    #[test]
    fn test_identical_input_renders_identically() {
        let a = render(Severity::Info, Event::GcPassComplete, &[("candidates", "2")]);
        let b = render(Severity::Info, Event::GcPassComplete, &[("candidates", "2")]);
        assert_eq!(a, b);
    }
}
