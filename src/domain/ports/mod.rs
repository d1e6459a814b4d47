//! Port trait definitions (Hexagonal Architecture)
//!
//! - PersistenceSession: change-tracking unit of work over the store
//! - GalleryClient: remote gallery endpoint
//!
//! These traits let the services stay independent of sqlx and reqwest.

pub mod errors;
pub mod gallery_client;
pub mod persistence_session;

pub use errors::GalleryError;
pub use gallery_client::GalleryClient;
pub use persistence_session::PersistenceSession;
