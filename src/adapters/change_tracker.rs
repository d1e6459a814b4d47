//! Identity map with per-entry tracking state, shared by the session adapters.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{CommitSummary, CommittedEntry, EntityRef, FieldValue, TrackingState};

/// Columns marked on one entry, in the order they were first marked.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUpdate {
    pub entity: EntityRef,
    pub changes: Vec<(&'static str, FieldValue)>,
}

impl PendingUpdate {
    pub fn columns(&self) -> Vec<&'static str> {
        self.changes.iter().map(|(column, _)| *column).collect()
    }
}

#[derive(Debug)]
struct TrackedEntry {
    entity: EntityRef,
    state: TrackingState,
    changes: Vec<(&'static str, FieldValue)>,
}

#[derive(Debug, Default)]
pub struct ChangeTracker {
    entries: Vec<TrackedEntry>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&self, entity: &EntityRef) -> Option<&TrackedEntry> {
        self.entries.iter().find(|entry| &entry.entity == entity)
    }

    fn find_mut(&mut self, entity: &EntityRef) -> Option<&mut TrackedEntry> {
        self.entries.iter_mut().find(|entry| &entry.entity == entity)
    }

    pub fn state(&self, entity: &EntityRef) -> TrackingState {
        self.find(entity).map_or(TrackingState::Detached, |entry| entry.state)
    }

    pub fn attach(&mut self, entity: EntityRef) {
        if self.find(&entity).is_none() {
            self.entries.push(TrackedEntry {
                entity,
                state: TrackingState::Unchanged,
                changes: Vec::new(),
            });
        }
    }

    pub fn mark(
        &mut self,
        entity: &EntityRef,
        column: &'static str,
        value: FieldValue,
    ) -> DomainResult<()> {
        let entry = self
            .find_mut(entity)
            .ok_or_else(|| DomainError::NotTracked(entity.to_string()))?;

        match entry.changes.iter_mut().find(|(marked, _)| *marked == column) {
            Some(slot) => slot.1 = value,
            None => entry.changes.push((column, value)),
        }
        entry.state = TrackingState::Modified;
        Ok(())
    }

    pub fn detach(&mut self, entity: &EntityRef) {
        self.entries.retain(|entry| &entry.entity != entity);
    }

    /// Snapshot of every modified entry, in attach order.
    pub fn pending_updates(&self) -> Vec<PendingUpdate> {
        self.entries
            .iter()
            .filter(|entry| entry.state == TrackingState::Modified && !entry.changes.is_empty())
            .map(|entry| PendingUpdate {
                entity: entry.entity.clone(),
                changes: entry.changes.clone(),
            })
            .collect()
    }

    /// Return every modified entry to `Unchanged` after a successful flush.
    pub fn accept_changes(&mut self) -> CommitSummary {
        let mut summary = CommitSummary::default();
        for entry in &mut self.entries {
            if entry.state != TrackingState::Modified {
                continue;
            }
            let columns: Vec<&'static str> = entry.changes.drain(..).map(|(column, _)| column).collect();
            if !columns.is_empty() {
                summary.entries.push(CommittedEntry {
                    entity: entry.entity.clone(),
                    columns,
                });
            }
            entry.state = TrackingState::Unchanged;
        }
        summary
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
