//! Modbot core
//!
//! Persistence and media plumbing behind the moderation bot:
//!
//! - `PersistenceGateway` writes a named subset of an entity's fields through
//!   a change-tracking session and leaves the entity attached or detached the
//!   way it found it.
//! - `ResourceCache` hands out gallery links, prefetching a whole page on a
//!   miss and serving the rest from a FIFO pool.
//!
//! # Architecture
//!
//! The crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, errors and port traits
//! - **Adapter Layer** (`adapters`): SQLite, HTTP and in-memory port implementations
//! - **Service Layer** (`services`): The gateway and the cache
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//!
//! # Example
//!
//! ```ignore
//! use modbot::{ConfigLoader, FetchOutcome, ResourceCache};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let mut cache = ResourceCache::from_config(&config.gallery)?;
//!     if let Some(link) = cache.fetch(&CancellationToken::new()).await.into_link() {
//!         println!("{link}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    CommitSummary, Config, Entity, EntityField, EntityKey, EntityRef, FieldValue, GalleryConfig,
    GalleryPayload, GuildUser, GuildUserField, Infraction, InfractionField, InfractionKind,
    ResourceLink, TrackingState,
};
pub use domain::ports::{GalleryClient, GalleryError, PersistenceSession};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::logging::{LogConfig, LoggerImpl};
pub use services::{FetchFailure, FetchOutcome, PersistenceGateway, ResourceCache};
