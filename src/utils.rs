/// Utility functions for user interaction and common output formatting.
use std::io::{self, Write};

use crate::error::Result;

/// Operator's answer to a destructive-action prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
    Cancel,
}

/// Prompt the operator before a container purge.
///
/// A closed stdin counts as Cancel; anything other than an explicit yes
/// counts as No. `force` skips the prompt entirely.
pub fn confirm_purge(container: &str, force: bool) -> Result<Confirmation> {
    if force {
        return Ok(Confirmation::Yes);
    }

    print!(
        "Are you sure you want to delete the container \"{container}\" (and all its contents)? (y/N): "
    );
    io::stdout().flush()?;

    let mut input = String::new();
    let read = io::stdin().read_line(&mut input)?;
    if read == 0 {
        return Ok(Confirmation::Cancel);
    }

    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(Confirmation::Yes),
        _ => Ok(Confirmation::No),
    }
}

/// Format a byte size in human-readable form, base 1024, units B/K/M/G/T.
pub fn format_size(size: u64) -> String {
    const UNITS: &[&str] = &["B", "K", "M", "G", "T"];
    const THRESHOLD: f64 = 1024.0;

    if size < 1024 {
        return format!("{size}B");
    }
    let mut value = size as f64;
    let mut unit = 0;
    while value >= THRESHOLD && unit < UNITS.len() - 1 {
        value /= THRESHOLD;
        unit += 1;
    }
    format!("{value:.1}{}", UNITS[unit])
}
