//! Event service layer

use crate::error::{EventError, Result};
use crate::models::{CreateEvent, Event};
use crate::repository::EventRepository;
use tracing::{info, instrument};

/// Validates candidates and talks to the event store.
pub struct EventService<R: EventRepository> {
    repository: R,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Validate and store a new event.
    #[instrument(skip(self, candidate))]
    pub async fn create(&self, candidate: CreateEvent) -> Result<Event> {
        let valid = candidate.validate_event().map_err(EventError::Validation)?;

        let event = self.repository.create(valid).await?;
        info!(event_id = %event.id, event_name = %event.name, "Event created");
        Ok(event)
    }

    /// Every event, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Event>> {
        self.repository.list().await
    }
}
