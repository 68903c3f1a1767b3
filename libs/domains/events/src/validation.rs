//! Event candidate validation.
//!
//! Presence and URL rules are declared on [`CreateEvent`] with `validator`;
//! calendar dates are checked here with `chrono`. Messages come out in field
//! order: name, startDate, endDate, time, venue, fileUrl.

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{CreateEvent, ValidEvent};

static HTTP_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://.+").expect("static pattern compiles"));

/// Field order for reported messages: (struct field, wire name).
const FIELD_ORDER: [(&str, &str); 6] = [
    ("name", "name"),
    ("start_date", "startDate"),
    ("end_date", "endDate"),
    ("time", "time"),
    ("venue", "venue"),
    ("file_url", "fileUrl"),
];

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Blank counts as "no attachment" and passes.
pub(crate) fn valid_file_url(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || HTTP_URL.is_match(value) {
        return Ok(());
    }
    Err(ValidationError::new("url"))
}

/// Parse `YYYY-MM-DD`, or an RFC 3339 timestamp whose date part is taken.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn first_message(errors: &ValidationErrors, field: &str, wire: &str) -> Option<String> {
    let field_errors = errors.field_errors();
    field_errors
        .get(field)
        .or_else(|| field_errors.get(wire))
        .and_then(|errs| errs.first())
        .map(|err| {
            err.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{wire} is invalid"))
        })
}

impl CreateEvent {
    /// Check every rule and either return the normalised event or all
    /// violation messages in field order.
    pub fn validate_event(self) -> Result<ValidEvent, Vec<String>> {
        let declared = self.validate().err();
        let start = self.start_date.as_deref().map(parse_calendar_date);
        let end = self.end_date.as_deref().map(parse_calendar_date);

        let mut messages = Vec::new();
        for (field, wire) in FIELD_ORDER {
            if let Some(message) = declared
                .as_ref()
                .and_then(|errors| first_message(errors, field, wire))
            {
                messages.push(message);
                continue;
            }

            let unparsed = match field {
                "start_date" => matches!(start, Some(None)),
                "end_date" => matches!(end, Some(None)),
                _ => false,
            };
            if unparsed {
                messages.push(format!("{wire} must be a valid date"));
            }
        }

        match (start.flatten(), end.flatten()) {
            (Some(start_date), Some(end_date)) if messages.is_empty() => Ok(ValidEvent {
                name: trimmed(self.name).unwrap_or_default(),
                start_date,
                end_date,
                time: trimmed(self.time).unwrap_or_default(),
                venue: trimmed(self.venue).unwrap_or_default(),
                description: trimmed(self.description),
                category: trimmed(self.category),
                file_url: trimmed(self.file_url),
            }),
            _ => Err(messages),
        }
    }
}
