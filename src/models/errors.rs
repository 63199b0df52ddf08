use chrono::NaiveTime;
use thiserror::Error;

use crate::types::{AccountId, TransactionId};

/// Every failure a caller of the transaction service can observe.
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("Invalid transaction data: {reason}")]
    InvalidTransactionData {
        reason: String
    },
    #[error("Account [{account_id}] is blacklisted")]
    AccountBlacklisted {
        account_id: AccountId
    },
    #[error("Transaction outside allowed time window ({start}-{end})")]
    OutsideTransactionWindow {
        start: NaiveTime,
        end: NaiveTime
    },
    #[error("Duplicate transaction detected for account [{account_id}]")]
    DuplicateTransaction {
        account_id: AccountId
    },
    #[error("Transaction [{id}] was not found")]
    TransactionNotFound {
        id: TransactionId
    },
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error)
}

impl TransactionError {
    pub fn invalid_data(reason: impl Into<String>) -> Self {
        Self::InvalidTransactionData { reason: reason.into() }
    }

    pub fn duplicate(account_id: &str) -> Self {
        Self::DuplicateTransaction { account_id: account_id.to_string() }
    }

    pub fn not_found(id: &str) -> Self {
        Self::TransactionNotFound { id: id.to_string() }
    }

    /// Stable machine-readable code reported to callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidTransactionData { .. } => "VALIDATION_003",
            Self::AccountBlacklisted { .. } => "VALIDATION_001",
            Self::OutsideTransactionWindow { .. } => "VALIDATION_002",
            Self::DuplicateTransaction { .. } => "TRANSACTION_001",
            Self::TransactionNotFound { .. } => "TRANSACTION_002",
            Self::Internal(_) => "SYSTEM_001"
        }
    }
}
