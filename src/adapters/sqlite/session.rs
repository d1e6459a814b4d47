//! SQLite implementation of the PersistenceSession port.

use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use crate::adapters::change_tracker::{ChangeTracker, PendingUpdate};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{CommitSummary, EntityKey, EntityRef, FieldValue, TrackingState};
use crate::domain::ports::PersistenceSession;

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Change-tracking session that flushes sparse `UPDATE`s through sqlx.
///
/// Only the columns marked on an entry are written; the rest of the row is
/// never read or overwritten.
pub struct SqliteSession {
    pool: SqlitePool,
    tracker: ChangeTracker,
}

impl SqliteSession {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            tracker: ChangeTracker::new(),
        }
    }

    /// Number of entries currently tracked.
    pub fn tracked_count(&self) -> usize {
        self.tracker.len()
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn update_statement(update: &PendingUpdate) -> String {
    let assignments = update
        .changes
        .iter()
        .map(|(column, _)| format!("{} = ?", quote_identifier(column)))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "UPDATE {} SET {} WHERE {} = ?",
        quote_identifier(update.entity.table),
        assignments,
        quote_identifier(update.entity.key_column)
    )
}

fn bind_value<'q>(query: SqliteQuery<'q>, value: &FieldValue) -> SqliteQuery<'q> {
    match value {
        FieldValue::Null => query.bind(None::<String>),
        FieldValue::Integer(v) => query.bind(*v),
        FieldValue::Real(v) => query.bind(*v),
        FieldValue::Text(v) => query.bind(v.clone()),
        FieldValue::Boolean(v) => query.bind(*v),
        FieldValue::Timestamp(v) => query.bind(v.to_rfc3339()),
    }
}

fn bind_key<'q>(query: SqliteQuery<'q>, key: &EntityKey) -> SqliteQuery<'q> {
    match key {
        EntityKey::Integer(v) => query.bind(*v),
        EntityKey::Text(v) => query.bind(v.clone()),
    }
}

#[async_trait]
impl PersistenceSession for SqliteSession {
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

    #[instrument(skip(self))]
    async fn commit(&mut self) -> DomainResult<CommitSummary> {
        let pending = self.tracker.pending_updates();
        if pending.is_empty() {
            return Ok(CommitSummary::default());
        }

        let mut tx = self.pool.begin().await?;
        for update in &pending {
            let sql = update_statement(update);
            let mut query = sqlx::query(&sql);
            for (_, value) in &update.changes {
                query = bind_value(query, value);
            }
            query = bind_key(query, &update.entity.key);

            let result = query.execute(&mut *tx).await?;
            if result.rows_affected() == 0 {
                // Dropping `tx` rolls back whatever earlier entries wrote.
                return Err(DomainError::ConcurrencyConflict {
                    entity: update.entity.table.to_string(),
                    id: update.entity.key.to_string(),
                });
            }
            debug!(entity = %update.entity, columns = ?update.columns(), "entry flushed");
        }
        tx.commit().await?;

        Ok(self.tracker.accept_changes())
    }
}
