//! Events Domain
//!
//! Campus event announcements:
//! - validation of admin-submitted candidates ([`CreateEvent::validate_event`])
//! - append-only storage in MongoDB (or in memory for tests)
//! - date-bucket classification and search ([`filter`])
//!
//! ```text
//! POST /events ─► require_admin ─► validate ─► EventService ─► EventRepository
//! GET  /events ─────────────────────────────► EventService ─► EventRepository
//! ```

use utoipa::OpenApi;

mod error;
pub mod filter;
mod handlers;
mod models;
mod mongodb;
mod repository;
mod service;
pub mod validation;

pub use error::{EventError, Result};
pub use filter::{EventStatus, StatusFilter, classify, classify_into, filter_events, matches_query};
pub use handlers::{EventsState, events_router};
pub use models::{CreateEvent, Event, ValidEvent};
pub use self::mongodb::{EVENTS_COLLECTION, MongoEventRepository};
pub use repository::{EventRepository, InMemoryEventRepository};
pub use service::EventService;

/// OpenAPI documentation for the events API
#[derive(OpenApi)]
#[openapi(
    paths(handlers::list_events, handlers::create_event),
    components(schemas(Event, CreateEvent, EventStatus, StatusFilter)),
    tags(
        (name = "events", description = "Campus event announcements")
    )
)]
pub struct ApiDoc;
