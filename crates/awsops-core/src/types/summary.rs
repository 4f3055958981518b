use serde::Serialize;
use std::fmt;

/// Aggregate result counters for one upload run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Rows that were submitted (or dry-run reported) successfully
    pub succeeded: u32,

    /// Rows that failed to parse, resolve, or submit
    pub failed: u32,

    /// Rows skipped for an unsupported record type
    pub skipped: u32,
}

impl RunSummary {
    /// Create an empty summary
    #[must_use]
    pub const fn new() -> Self {
        Self {
            succeeded: 0,
            failed: 0,
            skipped: 0,
        }
    }

    /// Count a successful row
    pub fn success(&mut self) {
        self.succeeded += 1;
    }

    /// Count a failed row
    pub fn failure(&mut self) {
        self.failed += 1;
    }

    /// Count a skipped row
    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    /// Total number of rows accounted for
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.succeeded + self.failed + self.skipped
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} successful, {} failed, {} skipped",
            self.succeeded, self.failed, self.skipped
        )
    }
}
