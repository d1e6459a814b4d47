use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{CommitSummary, EntityRef, FieldValue, TrackingState};

/// Port for a change-tracking unit of work over the store.
///
/// A session is a single-owner resource: every mutating method takes
/// `&mut self`, so concurrent use of one session does not compile.
#[async_trait]
pub trait PersistenceSession: Send {
    /// Current tracking state of `entity`; `Detached` when unknown.
    fn tracking_state(&self, entity: &EntityRef) -> TrackingState;

    fn is_attached(&self, entity: &EntityRef) -> bool {
        self.tracking_state(entity).is_attached()
    }

    /// Start tracking `entity` as `Unchanged`. No-op if already tracked.
    fn attach(&mut self, entity: EntityRef);

    /// Mark one column of a tracked entity for the next commit.
    ///
    /// `value` is the entity's value for that column at the time of marking.
    fn mark_modified(
        &mut self,
        entity: &EntityRef,
        column: &'static str,
        value: FieldValue,
    ) -> DomainResult<()>;

    /// Stop tracking `entity`, discarding any pending marks.
    fn detach(&mut self, entity: &EntityRef);

    /// Flush every modified entry to the store.
    ///
    /// On success all flushed entries become `Unchanged`. On failure nothing
    /// is written and tracking state is left as it was.
    async fn commit(&mut self) -> DomainResult<CommitSummary>;
}
