use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::constants::{OUTPUT_EXTENSION, TIMESTAMP_FORMAT};
use crate::error::RecorderError;

/// Resolve an IANA zone name such as "Europe/Vienna" against the bundled
/// timezone database.
///
/// An unknown zone is an error rather than a silent fallback, since a wrong
/// zone would mislabel every recording.
pub fn resolve_timezone(name: &str) -> Result<Tz, RecorderError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| RecorderError::InvalidTimezone(name.to_string()))
}

/// Render `instant` in `tz` as a sortable, filesystem-safe timestamp
/// like "20240115_143005".
pub fn format_timestamp<Z: TimeZone>(instant: DateTime<Utc>, tz: &Z) -> String
where
    Z::Offset: std::fmt::Display,
{
    instant.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string()
}

/// Check that a file prefix is usable as the leading part of a file name.
pub fn validate_prefix(prefix: &str) -> Result<(), RecorderError> {
    if prefix.is_empty() {
        return Err(RecorderError::Config("File prefix must not be empty".to_string()));
    }

    // Reject both separators regardless of platform so names stay portable
    if prefix.contains(['/', '\\']) || prefix.contains(std::path::is_separator) {
        return Err(RecorderError::Config(format!(
            "Invalid prefix '{}': must not contain a path separator",
            prefix
        )));
    }

    Ok(())
}

/// File name of a recording: "{prefix}_{timestamp}.mp3".
pub fn recording_file_name(prefix: &str, timestamp: &str) -> String {
    format!("{}_{}.{}", prefix, timestamp, OUTPUT_EXTENSION)
}

/// File name of the "latest recording" alias: "{prefix}.mp3".
pub fn alias_file_name(prefix: &str) -> String {
    format!("{}.{}", prefix, OUTPUT_EXTENSION)
}

/// Convert a byte count to MiB for display.
#[allow(clippy::cast_precision_loss)]
pub fn bytes_to_mib(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}
