mod account_status;
mod errors;
mod page;
mod transaction;

use serde::{Deserialize, Serialize};

pub use account_status::AccountStatus;
pub use errors::TransactionError;
pub use page::{Page, PageRequest};
pub use transaction::{Transaction, TransactionInput, TransactionRequest};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Withdrawal => "WITHDRAWAL",
            TransactionType::Transfer => "TRANSFER"
        }
    }
}
