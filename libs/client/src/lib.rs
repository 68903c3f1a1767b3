//! Client for the Circular API.
//!
//! ```rust,no_run
//! use circular_client::{CircularClient, ClientConfig};
//! use domain_events::StatusFilter;
//!
//! # async fn run() -> circular_client::Result<()> {
//! let mut client = CircularClient::new(&ClientConfig::default())?;
//! client.login("asha@example.edu", "s3cret").await?;
//!
//! let today = chrono::Utc::now().date_naive();
//! let upcoming = client.browse(StatusFilter::Upcoming, "tech", today).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;

pub use client::CircularClient;
pub use config::{ClientConfig, DEFAULT_BACKEND_URL};
pub use error::{ClientError, Result};
