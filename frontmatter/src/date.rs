//! Normalization of free-text date input collected during post creation.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DateInputError {
    #[error("Unrecognized date: {0}")]
    Unparseable(String),
}

/// Normalizes user-supplied date text to an RFC 3339 UTC timestamp.
///
/// The literal token `today` (any case) maps to `now`; otherwise the text is
/// parsed as RFC 3339 or as a bare `YYYY-MM-DD` date (taken as midnight UTC).
/// Anything else is [`DateInputError::Unparseable`], which the creation flow
/// answers by re-prompting for the same field.
pub fn normalize_date_input(
    text: &str,
    now: DateTime<Utc>,
) -> Result<String, DateInputError> {
    let trimmed = text.trim();

    if trimmed.eq_ignore_ascii_case("today") {
        return Ok(render(now));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(render(parsed.with_timezone(&Utc)));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(render(date.and_time(NaiveTime::MIN).and_utc()));
    }

    Err(DateInputError::Unparseable(trimmed.to_string()))
}

fn render(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}
