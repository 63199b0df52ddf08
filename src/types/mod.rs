mod clock;
mod fingerprint;
#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use fingerprint::Fingerprint;

pub type AccountId = String;
pub type TransactionId = String;
