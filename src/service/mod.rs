mod cache;
mod transaction_service;

pub use cache::TransactionCache;
pub use transaction_service::TransactionService;
