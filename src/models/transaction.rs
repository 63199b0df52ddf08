use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{TransactionError, TransactionType};
use crate::types::{AccountId, Fingerprint, TransactionId};

/// A recorded transaction.
///
/// `id` and `timestamp` are assigned by the service on creation and survive
/// every later update. The remaining fields form the content identity that
/// duplicate detection works on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub account_id: AccountId,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub timestamp: DateTime<Utc>,
    pub description: Option<String>
}

impl Transaction {
    pub fn new(id: TransactionId, input: TransactionInput, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            account_id: input.account_id,
            amount: input.amount,
            transaction_type: input.transaction_type,
            timestamp,
            description: input.description
        }
    }

    /// Replaces the content fields, keeping `id` and `timestamp`.
    pub fn with_content(&self, input: TransactionInput) -> Self {
        Self::new(self.id.clone(), input, self.timestamp)
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::from(self)
    }
}

/// Content fields of a transaction as supplied on create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub account_id: AccountId,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub description: Option<String>
}

impl TransactionInput {
    pub fn new(account_id: impl Into<AccountId>, amount: Decimal, transaction_type: TransactionType, description: Option<&str>) -> Self {
        Self {
            account_id: account_id.into(),
            amount,
            transaction_type,
            description: description.map(str::to_string)
        }
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::from(self)
    }
}

/// Wire form of a write payload. Every field is optional here so a missing one
/// is reported as invalid data instead of an unreadable body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub account_id: Option<AccountId>,
    pub amount: Option<Decimal>,
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub description: Option<String>
}

impl TryFrom<TransactionRequest> for TransactionInput {
    type Error = TransactionError;

    fn try_from(request: TransactionRequest) -> Result<Self, Self::Error> {
        let Some(account_id) = request.account_id else {
            return Err(TransactionError::invalid_data("accountId is required"))
        };

        let Some(amount) = request.amount else {
            return Err(TransactionError::invalid_data("amount is required"))
        };

        let Some(transaction_type) = request.transaction_type else {
            return Err(TransactionError::invalid_data("type is required"))
        };

        Ok(Self {
            account_id,
            amount,
            transaction_type,
            description: request.description
        })
    }
}
