//! Infrastructure adapters for external systems.

pub mod change_tracker;
pub mod gallery;
pub mod memory;
pub mod sqlite;
