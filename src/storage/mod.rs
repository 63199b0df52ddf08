mod errors;
#[cfg(test)]
mod tests;
mod transaction_storage;

use crate::models::{Transaction, TransactionInput};

pub use errors::StorageError;
pub use transaction_storage::TransactionStorage;

/// Record store with content-level duplicate detection.
///
/// Implementations keep the record map and the fingerprint index in step: a
/// fingerprint is indexed exactly while a record with that content is stored.
pub trait Storage: Send + Sync + 'static {
    /// Upserts by id. Fails if another id already owns the same content.
    fn save(&self, transaction: Transaction) -> Result<Transaction, StorageError>;

    /// Like `save`, but fails if the id is not currently stored.
    fn replace(&self, transaction: Transaction) -> Result<Transaction, StorageError>;

    fn find_by_id(&self, id: &str) -> Option<Transaction>;

    /// One page of the records ordered by `(timestamp, id)`.
    fn find_all(&self, page: usize, size: usize) -> Vec<Transaction>;

    /// Removes the record and its fingerprint, returning what was removed.
    fn delete(&self, id: &str) -> Option<Transaction>;

    fn count(&self) -> usize;

    fn exists(&self, content: &TransactionInput) -> bool;
}
