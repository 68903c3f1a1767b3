//! Date-bucket classification and text search over events.
//!
//! Pure functions of an event list and a calendar "today"; nothing here
//! touches the store or the clock.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

use crate::models::Event;

/// Date bucket an event falls into relative to a given day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventStatus {
    Ongoing,
    Upcoming,
    Past,
}

/// Bucket selector; `All` applies no date filter.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StatusFilter {
    #[default]
    All,
    Ongoing,
    Upcoming,
    Past,
}

impl StatusFilter {
    fn admits(self, event: &Event, today: NaiveDate) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Ongoing => classify_into(event, today).contains(&EventStatus::Ongoing),
            StatusFilter::Upcoming => classify_into(event, today).contains(&EventStatus::Upcoming),
            StatusFilter::Past => classify_into(event, today).contains(&EventStatus::Past),
        }
    }
}

/// Every bucket whose predicate holds.
///
/// For `start <= end` exactly one bucket matches. An inverted range
/// (`start > end`) is never ongoing and is both upcoming and past when
/// `end < today < start`. Every event lands in at least one bucket.
pub fn classify_into(event: &Event, today: NaiveDate) -> Vec<EventStatus> {
    let mut statuses = Vec::with_capacity(1);
    if event.start_date <= today && today <= event.end_date {
        statuses.push(EventStatus::Ongoing);
    }
    if event.start_date > today {
        statuses.push(EventStatus::Upcoming);
    }
    if event.end_date < today {
        statuses.push(EventStatus::Past);
    }
    statuses
}

/// The first matching bucket, in the order ongoing, upcoming, past.
pub fn classify(event: &Event, today: NaiveDate) -> Option<EventStatus> {
    classify_into(event, today).into_iter().next()
}

/// Case-insensitive substring match on name, venue, description, category
/// and time. A blank query matches everything.
pub fn matches_query(event: &Event, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    [
        Some(event.name.as_str()),
        Some(event.venue.as_str()),
        event.description.as_deref(),
        event.category.as_deref(),
        Some(event.time.as_str()),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Events in `status` that match `query`, in input order.
pub fn filter_events<'a, I>(events: I, status: StatusFilter, query: &str, today: NaiveDate) -> Vec<Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|event| status.admits(event, today) && matches_query(event, query))
        .cloned()
        .collect()
}
