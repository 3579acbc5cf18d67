use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use time::OffsetDateTime;
use time::macros::format_description;

/// Appends one outcome line for a compared pair, creating the log if it
/// does not exist yet. Pairs that failed to parse are never logged.
pub fn append_outcome(log_path: &Path, first: &str, second: &str, matched: bool) -> Result<()> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    append_outcome_at(log_path, first, second, matched, now)
}

pub fn append_outcome_at(
    log_path: &Path,
    first: &str,
    second: &str,
    matched: bool,
    at: OffsetDateTime,
) -> Result<()> {
    let line = format_outcome_line(first, second, matched, at)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("unable to open log: {}", log_path.display()))?;
    file.write_all(line.as_bytes())
        .with_context(|| format!("unable to append to log: {}", log_path.display()))
}

/// `[2018-Feb-18 09:30:00]Match::\t\tfirst | second`, with one fewer tab
/// after the longer `No match::` tag so the filenames line up.
fn format_outcome_line(
    first: &str,
    second: &str,
    matched: bool,
    at: OffsetDateTime,
) -> Result<String> {
    let stamp_format =
        format_description!("[[[year]-[month repr:short]-[day] [hour]:[minute]:[second]]");
    let stamp = at.format(&stamp_format).context("format log timestamp")?;
    let line = if matched {
        format!("{stamp}Match::\t\t{first} | {second}\n")
    } else {
        format!("{stamp}No match::\t{first} | {second}\n")
    };
    Ok(line)
}
