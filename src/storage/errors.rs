use thiserror::Error;

use crate::types::{Fingerprint, TransactionId};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Content [{fingerprint}] is already stored as transaction [{existing_id}]")]
    Conflict {
        fingerprint: Fingerprint,
        existing_id: TransactionId
    },
    #[error("Transaction [{id}] is not stored")]
    Missing {
        id: TransactionId
    }
}
