use std::io::{self, Write};

/// Receives integer percentage updates from a long-running operation.
///
/// Values are in [0, 100] and non-decreasing within one operation; the
/// first value reported is always 0.
pub trait ProgressSink: Sync {
    fn report(&self, percent: u8);
}

/// Sink that discards every update.
pub struct NoopProgressSink;

impl ProgressSink for NoopProgressSink {
    fn report(&self, _percent: u8) {}
}

/// A minimal progress reporter that rewrites a percentage line on stdout.
pub struct ConsoleProgressSink {
    label: String,
}

impl ConsoleProgressSink {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl ProgressSink for ConsoleProgressSink {
    fn report(&self, percent: u8) {
        print!("\r {}: {percent}%", self.label);
        let _ = io::stdout().flush();
    }
}
