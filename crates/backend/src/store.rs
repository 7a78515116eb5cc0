//! Counter persistence.
//!
//! [`CounterStore`] is the seam between the counter service and whatever
//! holds the records: PostgreSQL in production, a map in memory otherwise.

use std::collections::HashMap;

use async_trait::async_trait;
use counter_types::Counter;
use diesel_async::pooled_connection::deadpool::PoolError;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::db::{self, DbPool};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database connection error")]
    ConnectionPool(#[from] PoolError),

    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed-by-email counter persistence.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Load the counter for `email`, if one exists.
    async fn find(&self, email: &str) -> StoreResult<Option<Counter>>;

    /// Persist `counter`, replacing any record with the same email.
    async fn save(&self, counter: &Counter) -> StoreResult<Counter>;
}

pub struct PgCounterStore {
    pool: DbPool,
}

impl PgCounterStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CounterStore for PgCounterStore {
    async fn find(&self, email: &str) -> StoreResult<Option<Counter>> {
        let mut conn = self.pool.get().await?;
        Ok(db::counters::get_by_email(&mut conn, email).await?)
    }

    async fn save(&self, counter: &Counter) -> StoreResult<Counter> {
        let mut conn = self.pool.get().await?;
        Ok(db::counters::upsert(&mut conn, counter).await?)
    }
}

#[derive(Default)]
pub struct MemoryCounterStore {
    counters: RwLock<HashMap<String, Counter>>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn find(&self, email: &str) -> StoreResult<Option<Counter>> {
        Ok(self.counters.read().await.get(email).cloned())
    }

    async fn save(&self, counter: &Counter) -> StoreResult<Counter> {
        self.counters
            .write()
            .await
            .insert(counter.email.clone(), counter.clone());
        Ok(counter.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_find_missing() {
        let store = MemoryCounterStore::new();
        assert!(store.find("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_save_replaces_by_email() {
        let store = MemoryCounterStore::new();
        let mut counter = Counter::new("a@example.com");
        store.save(&counter).await.unwrap();

        counter.count = 3;
        store.save(&counter).await.unwrap();

        let found = store.find("a@example.com").await.unwrap().unwrap();
        assert_eq!(found.count, 3);
        assert_eq!(store.counters.read().await.len(), 1);
    }
}
