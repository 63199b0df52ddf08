use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::trace;

use crate::models::{Transaction, TransactionInput};
use crate::storage::{Storage, StorageError};
use crate::types::{Fingerprint, TransactionId};

/// In-memory store backed by two sharded maps: records by id and the owning
/// id of every stored content fingerprint.
///
/// Writers lock the fingerprint entry first and the record entry second, and
/// never hold two fingerprint entries at once. A write that finds the record
/// changed underneath it since it was read starts over.
#[derive(Default)]
pub struct TransactionStorage {
    records: DashMap<TransactionId, Transaction>,
    fingerprints: DashMap<Fingerprint, TransactionId>
}

enum Write {
    Done(Option<Fingerprint>),
    Retry
}

impl TransactionStorage {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            fingerprints: DashMap::new()
        }
    }

    fn write(&self, transaction: Transaction, require_existing: bool) -> Result<Transaction, StorageError> {
        let fingerprint = transaction.fingerprint();

        loop {
            let previous = self.records.get(&transaction.id).map(|record| record.fingerprint());

            if require_existing && previous.is_none() {
                return Err(StorageError::Missing { id: transaction.id })
            }

            match self.try_write(&transaction, fingerprint, previous)? {
                Write::Done(stale) => {
                    if let Some(stale) = stale.filter(|stale| *stale != fingerprint) {
                        self.release(stale, &transaction.id);
                    }

                    return Ok(transaction)
                }
                Write::Retry => trace!("Transaction [{}] changed during write, retrying", transaction.id)
            }
        }
    }

    fn try_write(&self, transaction: &Transaction, fingerprint: Fingerprint, previous: Option<Fingerprint>) -> Result<Write, StorageError> {
        let claim = match self.fingerprints.entry(fingerprint) {
            Entry::Occupied(owner) if *owner.get() != transaction.id => {
                return Err(StorageError::Conflict { fingerprint, existing_id: owner.get().clone() })
            }
            claim => claim
        };

        match self.records.entry(transaction.id.clone()) {
            Entry::Occupied(mut record) if previous == Some(record.get().fingerprint()) => {
                record.insert(transaction.clone());
            }
            Entry::Vacant(slot) if previous.is_none() => {
                slot.insert(transaction.clone());
            }
            _ => return Ok(Write::Retry)
        }

        claim.or_insert_with(|| transaction.id.clone());

        Ok(Write::Done(previous))
    }

    #[cfg(test)]
    pub(crate) fn fingerprint_count(&self) -> usize {
        self.fingerprints.len()
    }

    /// Drops `fingerprint` from the index unless the record has been written back to it meanwhile.
    fn release(&self, fingerprint: Fingerprint, id: &str) {
        if let Entry::Occupied(owner) = self.fingerprints.entry(fingerprint) {
            let in_use = self.records.get(id).is_some_and(|record| record.fingerprint() == fingerprint);

            if owner.get() == id && !in_use {
                owner.remove();
            }
        }
    }
}

impl Storage for TransactionStorage {
    fn save(&self, transaction: Transaction) -> Result<Transaction, StorageError> {
        self.write(transaction, false)
    }

    fn replace(&self, transaction: Transaction) -> Result<Transaction, StorageError> {
        self.write(transaction, true)
    }

    fn find_by_id(&self, id: &str) -> Option<Transaction> {
        self.records.get(id).map(|record| record.value().clone())
    }

    fn find_all(&self, page: usize, size: usize) -> Vec<Transaction> {
        let mut transactions: Vec<Transaction> = self.records.iter()
            .map(|record| record.value().clone())
            .collect();

        transactions.sort_by(|left, right| left.timestamp.cmp(&right.timestamp).then_with(|| left.id.cmp(&right.id)));

        transactions.into_iter()
            .skip(page.saturating_mul(size))
            .take(size)
            .collect()
    }

    fn delete(&self, id: &str) -> Option<Transaction> {
        loop {
            let fingerprint = self.records.get(id).map(|record| record.fingerprint())?;
            let claim = self.fingerprints.entry(fingerprint);

            match self.records.entry(id.to_string()) {
                Entry::Occupied(record) if record.get().fingerprint() == fingerprint => {
                    let removed = record.remove();

                    if let Entry::Occupied(owner) = claim {
                        if owner.get() == id {
                            owner.remove();
                        }
                    }

                    return Some(removed)
                }
                Entry::Vacant(_) => return None,
                _ => trace!("Transaction [{id}] changed during delete, retrying")
            }
        }
    }

    fn count(&self) -> usize {
        self.records.len()
    }

    fn exists(&self, content: &TransactionInput) -> bool {
        self.fingerprints.contains_key(&content.fingerprint())
    }
}
