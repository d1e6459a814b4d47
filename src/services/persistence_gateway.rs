//! Sparse entity updates over a change-tracking session.
//!
//! Callers name the fields they changed; the gateway takes care of attaching
//! the entity, marking exactly those fields, committing, and putting the
//! entity's attachment back the way it found it.

use std::collections::HashSet;
use tracing::{info, instrument, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{CommitSummary, Entity, EntityField, EntityRef};
use crate::domain::ports::PersistenceSession;

/// Commits named subsets of an entity's fields through a session.
///
/// The gateway owns its session; `update_fields` takes `&mut self`, so one
/// gateway (and its session) serves one caller at a time.
pub struct PersistenceGateway<S: PersistenceSession> {
    session: S,
}

impl<S: PersistenceSession> PersistenceGateway<S> {
    pub fn new(session: S) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    pub fn is_attached<E: Entity>(&self, entity: &E) -> bool {
        self.session.is_attached(&entity.entity_ref())
    }

    /// Write only `selectors` of `entity` to the store.
    ///
    /// An entity that was detached before the call is detached again
    /// afterwards, whether or not the commit succeeded; its pending marks are
    /// discarded with it. An entity that was already attached keeps whatever
    /// state the session leaves it in: `Unchanged` after a successful commit,
    /// still `Modified` after a failed one.
    ///
    /// Commit errors are returned unchanged and never retried.
    #[instrument(skip(self, entity, selectors), fields(table = E::TABLE, selected = selectors.len()))]
    pub async fn update_fields<E: Entity>(
        &mut self,
        entity: &E,
        selectors: &[E::Field],
    ) -> DomainResult<CommitSummary> {
        let entity_ref = entity.entity_ref();
        if selectors.is_empty() {
            return Err(DomainError::ValidationFailed(format!(
                "no fields selected for {entity_ref}"
            )));
        }

        let was_attached = self.session.is_attached(&entity_ref);
        if !was_attached {
            self.session.attach(entity_ref.clone());
        }

        if let Err(err) = self.mark_selected(entity, &entity_ref, selectors) {
            self.restore(&entity_ref, was_attached);
            return Err(err);
        }

        let outcome = self.session.commit().await;
        self.restore(&entity_ref, was_attached);

        match &outcome {
            Ok(summary) => info!(
                entity = %entity_ref,
                columns = ?summary.columns_for(&entity_ref),
                rows = summary.rows_written(),
                "fields committed"
            ),
            Err(err) => warn!(entity = %entity_ref, error = %err, was_attached, "commit failed"),
        }
        outcome
    }

    fn mark_selected<E: Entity>(
        &mut self,
        entity: &E,
        entity_ref: &EntityRef,
        selectors: &[E::Field],
    ) -> DomainResult<()> {
        let mut seen = HashSet::with_capacity(selectors.len());
        for &field in selectors {
            if seen.insert(field) {
                self.session
                    .mark_modified(entity_ref, field.column(), entity.value(field))?;
            }
        }
        Ok(())
    }

    fn restore(&mut self, entity_ref: &EntityRef, was_attached: bool) {
        if !was_attached {
            self.session.detach(entity_ref);
        }
    }
}
