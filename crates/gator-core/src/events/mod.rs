//! Status lines reported by the reservation engine.
//!
//! Every engine operation returns a [`StatusReport`]: the ordered status
//! lines it produced. The `Display` impls render the exact wording the
//! batch driver writes to its output file.

pub mod status;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use status::StatusLine;

/// Ordered status lines produced by a single engine call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusReport {
    lines: Vec<StatusLine>,
}

impl StatusReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a report holding a single line.
    pub fn single(line: StatusLine) -> Self {
        Self { lines: vec![line] }
    }

    /// Append a line.
    pub fn push(&mut self, line: StatusLine) {
        self.lines.push(line);
    }

    /// The lines in the order they were produced.
    pub fn lines(&self) -> &[StatusLine] {
        &self.lines
    }

    /// Consume the report, returning its lines.
    pub fn into_lines(self) -> Vec<StatusLine> {
        self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the report has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether the call was refused without changing any state.
    pub fn is_rejection(&self) -> bool {
        matches!(self.lines.as_slice(), [line] if line.is_rejection())
    }
}

impl From<StatusLine> for StatusReport {
    fn from(line: StatusLine) -> Self {
        Self::single(line)
    }
}

impl FromIterator<StatusLine> for StatusReport {
    fn from_iter<I: IntoIterator<Item = StatusLine>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{line}")?;
        }
        Ok(())
    }
}
