use std::time::Duration;

use moka::future::Cache;

use crate::models::Transaction;
use crate::types::TransactionId;

/// Read-through cache for single transaction lookups.
///
/// The store stays the source of truth. Writers push the new record or
/// invalidate after the store has been mutated.
#[derive(Clone)]
pub struct TransactionCache {
    inner: Cache<TransactionId, Transaction>
}

impl TransactionCache {
    pub fn new(capacity: u64, time_to_live: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(time_to_live)
            .build();

        Self { inner }
    }

    pub async fn get(&self, id: &str) -> Option<Transaction> {
        self.inner.get(id).await
    }

    pub async fn put(&self, transaction: &Transaction) {
        self.inner.insert(transaction.id.clone(), transaction.clone()).await;
    }

    pub async fn invalidate(&self, id: &str) {
        self.inner.invalidate(id).await;
    }
}
