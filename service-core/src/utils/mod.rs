use chrono::{SecondsFormat, Utc};

/// Current UTC time as RFC 3339 with millisecond precision, e.g. `2024-03-09T14:05:26.123Z`.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
