use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::AccountId;

/// Standing of a single account as seen by the validation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatus {
    pub account_id: AccountId,
    pub is_blacklisted: bool,
    /// Informational only, a flagged account stays blocked past this instant.
    pub blacklist_until: Option<DateTime<Utc>>
}

impl AccountStatus {
    pub fn blacklisted(account_id: impl Into<AccountId>) -> Self {
        Self {
            account_id: account_id.into(),
            is_blacklisted: true,
            blacklist_until: None
        }
    }
}
