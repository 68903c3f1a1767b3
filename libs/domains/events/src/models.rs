//! Event domain models

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validation::{not_blank, valid_file_url};

/// A published campus event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(alias = "_id")]
    pub id: Uuid,

    pub name: String,

    /// First day of the event
    #[schema(value_type = String, format = Date, example = "2025-03-01")]
    pub start_date: NaiveDate,

    /// Last day of the event (inclusive)
    #[schema(value_type = String, format = Date, example = "2025-03-02")]
    pub end_date: NaiveDate,

    /// Free-text time of day, e.g. "10:00 AM - 4:00 PM"
    pub time: String,

    pub venue: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    /// Attachment link; `null` when none was given
    #[serde(default)]
    pub file_url: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Materialise a validated candidate with a fresh time-ordered id.
    ///
    /// `created_at` is cut to milliseconds, the precision the store keeps.
    pub fn from_valid(valid: ValidEvent, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: valid.name,
            start_date: valid.start_date,
            end_date: valid.end_date,
            time: valid.time,
            venue: valid.venue,
            description: valid.description,
            category: valid.category,
            file_url: valid.file_url,
            created_at: created_at.trunc_subsecs(3),
        }
    }
}

/// Strings pass through; any other JSON value reads as absent.
fn text_or_absent<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}

/// Strings pass through; other non-null values keep their JSON text so the
/// URL rule rejects them.
fn text_or_raw<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// Event candidate as submitted by an admin. Every field is optional and
/// loosely typed on the wire so that missing or non-string values are
/// reported as validation messages rather than deserialization failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    #[validate(
        required(message = "name required"),
        custom(function = "not_blank", message = "name required")
    )]
    #[schema(example = "Tech Fest")]
    #[serde(default, deserialize_with = "text_or_absent")]
    pub name: Option<String>,

    #[validate(
        required(message = "startDate required"),
        custom(function = "not_blank", message = "startDate required")
    )]
    #[schema(example = "2025-03-01")]
    #[serde(default, deserialize_with = "text_or_absent")]
    pub start_date: Option<String>,

    #[validate(
        required(message = "endDate required"),
        custom(function = "not_blank", message = "endDate required")
    )]
    #[schema(example = "2025-03-02")]
    #[serde(default, deserialize_with = "text_or_absent")]
    pub end_date: Option<String>,

    #[validate(
        required(message = "time required"),
        custom(function = "not_blank", message = "time required")
    )]
    #[schema(example = "10:00 AM")]
    #[serde(default, deserialize_with = "text_or_absent")]
    pub time: Option<String>,

    #[validate(
        required(message = "venue required"),
        custom(function = "not_blank", message = "venue required")
    )]
    #[schema(example = "Main Hall")]
    #[serde(default, deserialize_with = "text_or_absent")]
    pub venue: Option<String>,

    #[serde(default, deserialize_with = "text_or_absent")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "text_or_absent")]
    pub category: Option<String>,

    #[validate(custom(
        function = "valid_file_url",
        message = "fileUrl must be a valid http(s) URL"
    ))]
    #[schema(example = "https://example.edu/brochure.pdf")]
    #[serde(default, deserialize_with = "text_or_raw")]
    pub file_url: Option<String>,
}

/// A candidate that passed every rule: strings trimmed, dates parsed, blank
/// optionals collapsed to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEvent {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub time: String,
    pub venue: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub file_url: Option<String>,
}
