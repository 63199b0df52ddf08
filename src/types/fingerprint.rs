use std::fmt;
use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

use crate::models::{Transaction, TransactionInput, TransactionType};

const FIELD_SEPARATOR: u8 = 0x1f;
const DESCRIPTION_ABSENT: u8 = 0x00;
const DESCRIPTION_PRESENT: u8 = 0x01;

/// Content digest of a transaction, independent of its assigned identity.
///
/// Covers `account_id`, `amount`, `transaction_type` and `description` in that
/// order. The amount is normalized first so `10.0` and `10.00` collide, and an
/// absent description hashes differently from an empty one.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn compute(account_id: &str, amount: Decimal, transaction_type: TransactionType, description: Option<&str>) -> Self {
        let mut hasher = Sha256::new();

        hasher.update(account_id.as_bytes());
        hasher.update([FIELD_SEPARATOR]);
        hasher.update(amount.normalize().to_string().as_bytes());
        hasher.update([FIELD_SEPARATOR]);
        hasher.update(transaction_type.as_str().as_bytes());
        hasher.update([FIELD_SEPARATOR]);

        match description {
            Some(text) => {
                hasher.update([DESCRIPTION_PRESENT]);
                hasher.update(text.as_bytes());
            }
            None => hasher.update([DESCRIPTION_ABSENT])
        }

        Self(hasher.finalize().into())
    }
}

impl From<&Transaction> for Fingerprint {
    fn from(transaction: &Transaction) -> Self {
        Self::compute(&transaction.account_id, transaction.amount, transaction.transaction_type, transaction.description.as_deref())
    }
}

impl From<&TransactionInput> for Fingerprint {
    fn from(input: &TransactionInput) -> Self {
        Self::compute(&input.account_id, input.amount, input.transaction_type, input.description.as_deref())
    }
}

impl Display for Fingerprint {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", hex::encode(self.0))
    }
}
