use chrono::NaiveTime;
use thiserror::Error;

use crate::models::TransactionError;
use crate::types::AccountId;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid transaction data: {reason}")]
    InvalidTransactionData {
        reason: String
    },
    #[error("Account [{account_id}] is blacklisted")]
    AccountBlacklisted {
        account_id: AccountId
    },
    #[error("Time [{now}] is outside the allowed window ({start}-{end})")]
    OutsideTransactionWindow {
        now: NaiveTime,
        start: NaiveTime,
        end: NaiveTime
    }
}

impl From<ValidationError> for TransactionError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::InvalidTransactionData { reason } => TransactionError::InvalidTransactionData { reason },
            ValidationError::AccountBlacklisted { account_id } => TransactionError::AccountBlacklisted { account_id },
            ValidationError::OutsideTransactionWindow { start, end, .. } => TransactionError::OutsideTransactionWindow { start, end }
        }
    }
}
