use std::sync::Arc;

use chrono::NaiveTime;

use crate::models::TransactionInput;
use crate::types::Clock;
use crate::validation::{TransactionCheck, ValidationError};

/// Accepts writes only while the local time of day lies within `[start, end]`.
///
/// Both endpoints are inclusive. When `start` is later than `end` the window
/// wraps past midnight.
pub struct TimeWindowCheck {
    start: NaiveTime,
    end: NaiveTime,
    clock: Arc<dyn Clock>
}

impl TimeWindowCheck {
    pub fn new(start: NaiveTime, end: NaiveTime, clock: Arc<dyn Clock>) -> Self {
        Self { start, end, clock }
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.start <= self.end {
            self.start <= time && time <= self.end
        } else {
            time >= self.start || time <= self.end
        }
    }
}

impl TransactionCheck for TimeWindowCheck {
    fn name(&self) -> &'static str {
        "time-window"
    }

    fn check(&self, _input: &TransactionInput) -> Result<(), ValidationError> {
        let now = self.clock.local_time();

        if !self.contains(now) {
            return Err(ValidationError::OutsideTransactionWindow { now, start: self.start, end: self.end })
        }

        Ok(())
    }
}
