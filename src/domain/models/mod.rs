pub mod config;
pub mod gallery;
pub mod moderation;
pub mod tracking;

pub use config::{Config, DatabaseConfig, GalleryConfig, LoggingConfig};
pub use gallery::{GalleryGroup, GalleryImage, GalleryPayload, ResourceLink};
pub use moderation::{GuildUser, GuildUserField, Infraction, InfractionField, InfractionKind};
pub use tracking::{
    CommitSummary, CommittedEntry, Entity, EntityField, EntityKey, EntityRef, FieldValue,
    TrackingState,
};
