//! Application services built on the domain ports.

pub mod persistence_gateway;
pub mod resource_cache;

pub use persistence_gateway::PersistenceGateway;
pub use resource_cache::{FetchFailure, FetchOutcome, ResourceCache};
