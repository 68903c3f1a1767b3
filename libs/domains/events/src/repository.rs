//! Event repository trait and in-memory implementation

use crate::error::Result;
use crate::models::{Event, ValidEvent};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Persistence for events. Events are append-only.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Store a validated event, assigning its id and `createdAt`.
    async fn create(&self, event: ValidEvent) -> Result<Event>;

    /// All events, `createdAt` descending, ties broken by latest insertion.
    async fn list(&self) -> Result<Vec<Event>>;
}

/// In-memory repository for tests and local runs without MongoDB
#[derive(Clone, Default)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<Vec<Event>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, event: ValidEvent) -> Result<Event> {
        let event = Event::from_valid(event, Utc::now());
        self.events.write().await.push(event.clone());
        Ok(event)
    }

    async fn list(&self) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self.events.read().await.iter().rev().cloned().collect();
        // Stable sort keeps latest-inserted first among equal timestamps.
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(events)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid(name: &str) -> ValidEvent {
        ValidEvent {
            name: name.to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            time: "10:00".to_string(),
            venue: "Hall".to_string(),
            description: None,
            category: None,
            file_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamp() {
        let repo = InMemoryEventRepository::new();
        let before = Utc::now();
        let event = repo.create(valid("A")).await.unwrap();

        assert!(!event.id.is_nil());
        assert!(event.created_at >= before);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = InMemoryEventRepository::new();
        repo.create(valid("A")).await.unwrap();
        repo.create(valid("B")).await.unwrap();
        repo.create(valid("C")).await.unwrap();

        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let repo = InMemoryEventRepository::new();
        assert!(repo.list().await.unwrap().is_empty());
    }
}
