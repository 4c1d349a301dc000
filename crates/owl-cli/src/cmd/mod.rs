pub mod consolidate;
pub mod query;
pub mod stats;

use chrono::DateTime;

/// Render a millisecond Unix timestamp as UTC, falling back to the raw
/// number when it is out of range.
pub fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis).map_or_else(
        || millis.to_string(),
        |t| t.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string(),
    )
}
