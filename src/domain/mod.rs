//! Domain layer for the moderation core
//!
//! This module contains the domain models and the port traits that adapters
//! implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
