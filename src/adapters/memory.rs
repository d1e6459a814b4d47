//! In-memory persistence session for testing.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};

use crate::adapters::change_tracker::ChangeTracker;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{CommitSummary, Entity, EntityField, EntityRef, FieldValue, TrackingState};
use crate::domain::ports::PersistenceSession;

pub type StoredRow = BTreeMap<&'static str, FieldValue>;

/// Session backed by a map of rows, with scriptable commit failures.
#[derive(Debug, Default)]
pub struct InMemorySession {
    tracker: ChangeTracker,
    rows: HashMap<EntityRef, StoredRow>,
    commit_calls: usize,
    fail_next_commit: Option<String>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a stored row without tracking it.
    pub fn insert_row(
        &mut self,
        entity: EntityRef,
        values: impl IntoIterator<Item = (&'static str, FieldValue)>,
    ) {
        self.rows.insert(entity, values.into_iter().collect());
    }

    /// Seed a stored row from an entity's current values for `fields`.
    pub fn insert_entity<E: Entity>(&mut self, entity: &E, fields: &[E::Field]) {
        let values = fields.iter().map(|&field| (field.column(), entity.value(field)));
        self.insert_row(entity.entity_ref(), values);
    }

    pub fn row(&self, entity: &EntityRef) -> Option<&StoredRow> {
        self.rows.get(entity)
    }

    pub fn commit_calls(&self) -> usize {
        self.commit_calls
    }

    /// Make the next `commit` fail with a database error.
    pub fn fail_next_commit(&mut self, message: impl Into<String>) {
        self.fail_next_commit = Some(message.into());
    }
}

#[async_trait]
impl PersistenceSession for InMemorySession {
    fn tracking_state(&self, entity: &EntityRef) -> TrackingState {
        self.tracker.state(entity)
    }

    fn attach(&mut self, entity: EntityRef) {
        self.tracker.attach(entity);
    }

    fn mark_modified(
        &mut self,
        entity: &EntityRef,
        column: &'static str,
        value: FieldValue,
    ) -> DomainResult<()> {
        self.tracker.mark(entity, column, value)
    }

    fn detach(&mut self, entity: &EntityRef) {
        self.tracker.detach(entity);
    }

    async fn commit(&mut self) -> DomainResult<CommitSummary> {
        self.commit_calls += 1;
        if let Some(message) = self.fail_next_commit.take() {
            return Err(DomainError::DatabaseError(message));
        }

        let pending = self.tracker.pending_updates();
        if let Some(missing) = pending.iter().find(|update| !self.rows.contains_key(&update.entity)) {
            return Err(DomainError::ConcurrencyConflict {
                entity: missing.entity.table.to_string(),
                id: missing.entity.key.to_string(),
            });
        }

        for update in pending {
            if let Some(row) = self.rows.get_mut(&update.entity) {
                row.extend(update.changes);
            }
        }

        Ok(self.tracker.accept_changes())
    }
}
