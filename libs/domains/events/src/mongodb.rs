//! MongoDB implementation of EventRepository

use crate::error::{EventError, Result};
use crate::models::{Event, ValidEvent};
use crate::repository::EventRepository;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use futures_util::TryStreamExt;
use mongodb::bson::{DateTime as BsonDateTime, doc};
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

pub const EVENTS_COLLECTION: &str = "events";

/// Stored shape of an event. Calendar dates are kept as midnight-UTC
/// timestamps so they sort and compare natively in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventDocument {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    start_date: BsonDateTime,
    end_date: BsonDateTime,
    time: String,
    venue: String,
    description: Option<String>,
    category: Option<String>,
    file_url: Option<String>,
    created_at: BsonDateTime,
}

fn date_to_bson(date: NaiveDate) -> BsonDateTime {
    BsonDateTime::from_millis(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
}

fn bson_to_utc(value: BsonDateTime) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value.timestamp_millis())
        .ok_or_else(|| EventError::Corrupt(format!("timestamp out of range: {value}")))
}

impl From<&Event> for EventDocument {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.to_string(),
            name: event.name.clone(),
            start_date: date_to_bson(event.start_date),
            end_date: date_to_bson(event.end_date),
            time: event.time.clone(),
            venue: event.venue.clone(),
            description: event.description.clone(),
            category: event.category.clone(),
            file_url: event.file_url.clone(),
            created_at: BsonDateTime::from_millis(event.created_at.timestamp_millis()),
        }
    }
}

impl TryFrom<EventDocument> for Event {
    type Error = EventError;

    fn try_from(doc: EventDocument) -> Result<Self> {
        Ok(Self {
            id: Uuid::parse_str(&doc.id)
                .map_err(|e| EventError::Corrupt(format!("bad id {}: {e}", doc.id)))?,
            name: doc.name,
            start_date: bson_to_utc(doc.start_date)?.date_naive(),
            end_date: bson_to_utc(doc.end_date)?.date_naive(),
            time: doc.time,
            venue: doc.venue,
            description: doc.description,
            category: doc.category,
            file_url: doc.file_url,
            created_at: bson_to_utc(doc.created_at)?,
        })
    }
}

/// MongoDB-based event repository
#[derive(Clone)]
pub struct MongoEventRepository {
    collection: Collection<EventDocument>,
}

impl MongoEventRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(EVENTS_COLLECTION),
        }
    }

    /// Descending `createdAt` index backing the listing order.
    pub async fn create_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "createdAt": -1, "_id": -1 })
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self, event), fields(event_name = %event.name))]
    async fn create(&self, event: ValidEvent) -> Result<Event> {
        let event = Event::from_valid(event, Utc::now());
        self.collection
            .insert_one(EventDocument::from(&event))
            .await?;
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Event>> {
        // UUIDv7 strings sort by creation time, so `_id` breaks createdAt ties.
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await?;
        let documents: Vec<EventDocument> = cursor.try_collect().await?;
        documents.into_iter().map(Event::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_round_trips_calendar_dates() {
        let event = Event {
            id: Uuid::now_v7(),
            name: "Tech Fest".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            time: "10:00".into(),
            venue: "Hall".into(),
            description: None,
            category: Some("Tech".into()),
            file_url: None,
            created_at: DateTime::from_timestamp_millis(1_740_000_000_123).unwrap(),
        };

        let restored = Event::try_from(EventDocument::from(&event)).unwrap();
        assert_eq!(restored, event);
    }

    #[test]
    fn test_created_event_matches_stored_document() {
        let created = Event::from_valid(
            ValidEvent {
                name: "Tech Fest".into(),
                start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
                time: "10:00".into(),
                venue: "Hall".into(),
                description: None,
                category: None,
                file_url: None,
            },
            Utc::now(),
        );

        let listed = Event::try_from(EventDocument::from(&created)).unwrap();
        assert_eq!(listed, created);
    }

    #[test]
    fn test_document_uses_camel_case_keys() {
        let event = Event::from_valid(
            ValidEvent {
                name: "Quiz".into(),
                start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                time: "9".into(),
                venue: "Lab".into(),
                description: None,
                category: None,
                file_url: None,
            },
            Utc::now(),
        );
        let document = mongodb::bson::to_document(&EventDocument::from(&event)).unwrap();
        assert!(document.contains_key("_id"));
        assert!(document.contains_key("startDate"));
        assert!(document.contains_key("fileUrl"));
        assert!(document.contains_key("createdAt"));
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_create_and_list_against_mongo() {
        let url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = mongodb::Client::with_uri_str(&url).await.unwrap();
        let db = client.database(&format!("circular_test_{}", Uuid::now_v7().simple()));
        let repo = MongoEventRepository::new(&db);
        repo.create_indexes().await.unwrap();

        for name in ["A", "B"] {
            repo.create(ValidEvent {
                name: name.into(),
                start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                time: "10:00".into(),
                venue: "Hall".into(),
                description: None,
                category: None,
                file_url: None,
            })
            .await
            .unwrap();
        }

        let names: Vec<_> = repo.list().await.unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["B", "A"]);
        db.drop().await.unwrap();
    }
}
