use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{Page, PageRequest, Transaction, TransactionError, TransactionInput};
use crate::service::TransactionCache;
use crate::storage::{Storage, StorageError};
use crate::types::Clock;
use crate::validation::Validator;

/// Entry point for every transaction operation.
///
/// Writes are validated, checked for duplicate content and then persisted;
/// reads go straight to the store, through the cache when one is configured.
pub struct TransactionService<S: Storage> {
    storage: Arc<S>,
    validator: Validator,
    clock: Arc<dyn Clock>,
    cache: Option<TransactionCache>,
    max_page_size: Option<usize>
}

impl<S: Storage> TransactionService<S> {
    pub fn new(storage: Arc<S>, validator: Validator, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            validator,
            clock,
            cache: None,
            max_page_size: None
        }
    }

    pub fn with_cache(mut self, cache: TransactionCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Caps the page size accepted by [`TransactionService::list`]. Unlimited unless set.
    pub fn with_max_page_size(mut self, max_page_size: usize) -> Self {
        self.max_page_size = Some(max_page_size);
        self
    }

    pub async fn create(&self, input: TransactionInput) -> Result<Transaction, TransactionError> {
        self.validator.validate(&input)?;

        if self.storage.exists(&input) {
            warn!("Duplicate transaction rejected for account [{}]", input.account_id);
            return Err(TransactionError::duplicate(&input.account_id))
        }

        let account_id = input.account_id.clone();
        let transaction = Transaction::new(Uuid::new_v4().to_string(), input, self.clock.now());
        let stored = match self.storage.save(transaction) {
            Ok(stored) => stored,
            Err(StorageError::Conflict { existing_id, .. }) => return Err(lost_race(&account_id, &existing_id)),
            Err(error) => return Err(anyhow::Error::new(error).context("Saving a new transaction").into())
        };

        self.cache_if_current(&stored).await;

        debug!("Transaction [{}]:[{:?}] created for account [{}]", stored.id, stored.transaction_type, stored.account_id);

        Ok(stored)
    }

    pub async fn get(&self, id: &str) -> Result<Transaction, TransactionError> {
        if let Some(cache) = &self.cache {
            if let Some(transaction) = cache.get(id).await {
                return Ok(transaction)
            }
        }

        let transaction = self.storage.find_by_id(id).ok_or_else(|| TransactionError::not_found(id))?;
        self.cache_if_current(&transaction).await;

        Ok(transaction)
    }

    pub async fn update(&self, id: &str, input: TransactionInput) -> Result<Transaction, TransactionError> {
        let existing = self.storage.find_by_id(id).ok_or_else(|| TransactionError::not_found(id))?;

        self.validator.validate(&input)?;

        if self.storage.exists(&input) && existing.fingerprint() != input.fingerprint() {
            warn!("Update of transaction [{id}] would duplicate another record for account [{}]", input.account_id);
            return Err(TransactionError::duplicate(&input.account_id))
        }

        let account_id = input.account_id.clone();
        let updated = self.storage.replace(existing.with_content(input)).map_err(|error| match error {
            StorageError::Conflict { existing_id, .. } => lost_race(&account_id, &existing_id),
            StorageError::Missing { id } => TransactionError::not_found(&id)
        })?;

        self.cache_if_current(&updated).await;

        debug!("Transaction [{}]:[{:?}] updated for account [{}]", updated.id, updated.transaction_type, updated.account_id);

        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), TransactionError> {
        let removed = self.storage.delete(id);

        if let Some(cache) = &self.cache {
            cache.invalidate(id).await;
        }

        let removed = removed.ok_or_else(|| TransactionError::not_found(id))?;

        debug!("Transaction [{}] deleted for account [{}]", removed.id, removed.account_id);

        Ok(())
    }

    pub fn list(&self, page: usize, size: usize) -> Result<Page<Transaction>, TransactionError> {
        let request = PageRequest::new(page, size, self.max_page_size)?;
        let content = self.storage.find_all(request.page(), request.size());
        let total = self.storage.count();

        Ok(Page::new(content, request, total))
    }

    /// Caches `transaction` unless the store no longer holds exactly that record.
    ///
    /// Every put is followed by a re-read of the store, and every store mutation
    /// is followed by its own put or invalidate, so an entry written by a
    /// writer that lost a race never outlives the re-read.
    async fn cache_if_current(&self, transaction: &Transaction) {
        let Some(cache) = &self.cache else {
            return
        };

        cache.put(transaction).await;

        //NOTE: A concurrent update or delete may have landed between our store write and the put above
        if self.storage.find_by_id(&transaction.id).as_ref() != Some(transaction) {
            cache.invalidate(&transaction.id).await;
        }
    }
}

fn lost_race(account_id: &str, existing_id: &str) -> TransactionError {
    warn!("Concurrent duplicate for account [{account_id}] lost to transaction [{existing_id}]");
    TransactionError::duplicate(account_id)
}
