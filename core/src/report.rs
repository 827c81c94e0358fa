//! Report assembly.
//!
//! A report is a header timestamp, a blank separator line, then one line per
//! input line in exactly the order the peer list was read. It lives for one
//! run and is handed to the notifier as a single string.

use chrono::{DateTime, Utc};
use chrono_tz::US::Pacific;

/// Header format, rendered in the fixed reference timezone:
/// `Tue - Jan 02 - 03:04 PM - PST`.
const HEADER_FORMAT: &str = "%a - %b %d - %I:%M %p - %Z";

#[derive(Debug, Clone)]
pub struct Report {
    header: String,
    lines: Vec<String>,
}

impl Report {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            header: format_timestamp(now),
            lines: Vec::new(),
        }
    }

    pub fn push_line(&mut self, line: String) {
        self.lines.push(line);
    }

    /// Number of body lines (everything below the header).
    pub fn body_len(&self) -> usize {
        self.lines.len()
    }

    /// Renders the full message body passed to the notifier.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(
            self.header.len() + 2 + self.lines.iter().map(|l| l.len() + 1).sum::<usize>(),
        );
        out.push_str(&self.header);
        out.push_str("\n\n");
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Formats an instant in the fixed reference timezone (US/Pacific).
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.with_timezone(&Pacific).format(HEADER_FORMAT).to_string()
}
