mod blacklist;
mod errors;
mod time_window;

use tracing::debug;

use crate::models::TransactionInput;

pub use blacklist::BlacklistCheck;
pub use errors::ValidationError;
pub use time_window::TimeWindowCheck;

/// A single business rule applied to every proposed write.
pub trait TransactionCheck: Send + Sync + 'static {
    fn name(&self) -> &'static str;
    fn check(&self, input: &TransactionInput) -> Result<(), ValidationError>;
}

/// Ordered list of checks. Checks run in the order they were added and the
/// first rejection ends validation.
#[derive(Default)]
pub struct Validator {
    checks: Vec<Box<dyn TransactionCheck>>
}

impl Validator {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    pub fn with_check<C: TransactionCheck>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn validate(&self, input: &TransactionInput) -> Result<(), ValidationError> {
        if input.account_id.trim().is_empty() {
            return Err(ValidationError::InvalidTransactionData { reason: "accountId must not be blank".to_string() })
        }

        for check in &self.checks {
            if let Err(error) = check.check(input) {
                debug!("Check [{}] rejected transaction for account [{}]: {error}", check.name(), input.account_id);
                return Err(error)
            }
        }

        Ok(())
    }
}
