//! Change-tracking vocabulary shared by the persistence gateway and sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use uuid::Uuid;

/// How a persistence session currently tracks an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingState {
    /// Not tracked by the session.
    #[default]
    Detached,
    /// Tracked, nothing pending.
    Unchanged,
    /// Tracked with at least one field marked for the next commit.
    Modified,
}

impl TrackingState {
    pub const fn is_attached(self) -> bool {
        !matches!(self, Self::Detached)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Detached => "detached",
            Self::Unchanged => "unchanged",
            Self::Modified => "modified",
        }
    }
}

impl fmt::Display for TrackingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity key of a persisted entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKey {
    Integer(i64),
    Text(String),
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for EntityKey {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<String> for EntityKey {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for EntityKey {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<Uuid> for EntityKey {
    fn from(v: Uuid) -> Self {
        Self::Text(v.to_string())
    }
}

/// A single column value as it will be written to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Boolean(bool),
    /// Stored as RFC 3339 text.
    Timestamp(DateTime<Utc>),
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Statically typed selector for one column of an entity.
pub trait EntityField: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Column name in the entity's table.
    fn column(self) -> &'static str;
}

/// A record that can be tracked by a persistence session.
pub trait Entity: Send + Sync {
    /// The entity's updatable fields.
    type Field: EntityField;

    const TABLE: &'static str;
    const KEY_COLUMN: &'static str;

    fn key(&self) -> EntityKey;

    /// Current in-memory value of `field`.
    fn value(&self, field: Self::Field) -> FieldValue;

    fn entity_ref(&self) -> EntityRef {
        EntityRef::new(Self::TABLE, Self::KEY_COLUMN, self.key())
    }
}

/// Type-erased identity of a tracked entity, used as the session's map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub table: &'static str,
    pub key_column: &'static str,
    pub key: EntityKey,
}

impl EntityRef {
    pub fn new(table: &'static str, key_column: &'static str, key: impl Into<EntityKey>) -> Self {
        Self {
            table,
            key_column,
            key: key.into(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.table, self.key)
    }
}

/// One entry flushed by a commit and the columns that were written for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedEntry {
    pub entity: EntityRef,
    pub columns: Vec<&'static str>,
}

/// Result of a successful session commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitSummary {
    pub entries: Vec<CommittedEntry>,
}

impl CommitSummary {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rows_written(&self) -> usize {
        self.entries.len()
    }

    /// Columns written for `entity`, if it was part of this commit.
    pub fn columns_for(&self, entity: &EntityRef) -> Option<&[&'static str]> {
        self.entries
            .iter()
            .find(|entry| &entry.entity == entity)
            .map(|entry| entry.columns.as_slice())
    }
}
