use std::collections::HashMap;

use crate::models::{AccountStatus, TransactionInput};
use crate::types::AccountId;
use crate::validation::{TransactionCheck, ValidationError};

/// Rejects accounts flagged in the injected status table.
pub struct BlacklistCheck {
    statuses: HashMap<AccountId, AccountStatus>
}

impl BlacklistCheck {
    pub fn new(statuses: impl IntoIterator<Item = AccountStatus>) -> Self {
        Self {
            statuses: statuses.into_iter()
                .map(|status| (status.account_id.clone(), status))
                .collect()
        }
    }

    /// Builds the table from a list of account ids, all of them flagged.
    pub fn from_accounts<I, A>(accounts: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<AccountId>,
    {
        Self::new(accounts.into_iter().map(AccountStatus::blacklisted))
    }

    pub fn is_blacklisted(&self, account_id: &str) -> bool {
        self.statuses.get(account_id).is_some_and(|status| status.is_blacklisted)
    }
}

impl TransactionCheck for BlacklistCheck {
    fn name(&self) -> &'static str {
        "blacklist"
    }

    fn check(&self, input: &TransactionInput) -> Result<(), ValidationError> {
        if self.is_blacklisted(&input.account_id) {
            return Err(ValidationError::AccountBlacklisted { account_id: input.account_id.clone() })
        }

        Ok(())
    }
}
