//! Counter find-or-create and adjustment service.
//!
//! Every mutation is a read-modify-write through the [`CounterStore`]:
//! two concurrent adjustments of the same email can lose an update.

use counter_types::Counter;

use crate::store::{CounterStore, StoreResult};

/// Which counter field an adjustment applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterField {
    Count,
    MyCount,
}

impl CounterField {
    fn apply(self, counter: &mut Counter, delta: i32) {
        let field = match self {
            CounterField::Count => &mut counter.count,
            CounterField::MyCount => &mut counter.mycount,
        };
        *field = field.saturating_add(delta);
    }
}

/// Service for counter-related business logic
pub struct CounterService;

impl CounterService {
    /// Existing record, or `None`. Never creates.
    pub async fn get(store: &dyn CounterStore, email: &str) -> StoreResult<Option<Counter>> {
        store.find(email).await
    }

    /// Return the record for `email`, persisting a zeroed one if absent.
    pub async fn create(store: &dyn CounterStore, email: &str) -> StoreResult<Counter> {
        match store.find(email).await? {
            Some(counter) => Ok(counter),
            None => {
                tracing::info!("Creating counter for {}", email);
                store.save(&Counter::new(email)).await
            }
        }
    }

    /// Apply `delta` to one field, creating the record first if needed.
    pub async fn adjust(
        store: &dyn CounterStore,
        email: &str,
        field: CounterField,
        delta: i32,
    ) -> StoreResult<Counter> {
        let mut counter = store
            .find(email)
            .await?
            .unwrap_or_else(|| Counter::new(email));

        field.apply(&mut counter, delta);
        store.save(&counter).await
    }
}
