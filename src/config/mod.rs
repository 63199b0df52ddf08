
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveTime;

use crate::service::{TransactionCache, TransactionService};
use crate::storage::Storage;
use crate::types::Clock;
use crate::validation::{BlacklistCheck, TimeWindowCheck, Validator};

const PREFIX: &str = "TRANSACTION_SERVICE_";
const TIME_FORMAT: &str = "%H:%M";

/// Runtime settings of the service.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bind_address: SocketAddr,
    pub window_start: NaiveTime,
    pub window_end: NaiveTime,
    pub blacklist: Vec<String>,
    /// A capacity of zero disables the cache.
    pub cache_capacity: u64,
    pub cache_time_to_live: Duration,
    /// Upper bound on listing page sizes. `None` accepts any positive size.
    pub max_page_size: Option<usize>
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8080)),
            window_start: NaiveTime::from_hms_opt(6, 0, 0).unwrap_or_default(),
            window_end: NaiveTime::from_hms_opt(23, 0, 0).unwrap_or_default(),
            blacklist: vec!["BLACKLISTED_ACCOUNT".to_string()],
            cache_capacity: 10_000,
            cache_time_to_live: Duration::from_secs(300),
            max_page_size: None
        }
    }
}

impl Settings {
    /// Defaults overridden by any `TRANSACTION_SERVICE_*` variables present in the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        let read = |name: &str| lookup(&format!("{PREFIX}{name}")).map(|value| (format!("{PREFIX}{name}"), value));

        if let Some((key, value)) = read("BIND") {
            settings.bind_address = parse(&key, &value)?;
        }

        if let Some((key, value)) = read("WINDOW_START") {
            settings.window_start = parse_time(&key, &value)?;
        }

        if let Some((key, value)) = read("WINDOW_END") {
            settings.window_end = parse_time(&key, &value)?;
        }

        if let Some((_, value)) = read("BLACKLIST") {
            settings.blacklist = value.split(',')
                .map(str::trim)
                .filter(|account| !account.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some((key, value)) = read("CACHE_CAPACITY") {
            settings.cache_capacity = parse(&key, &value)?;
        }

        if let Some((key, value)) = read("CACHE_TTL_SECS") {
            settings.cache_time_to_live = Duration::from_secs(parse(&key, &value)?);
        }

        if let Some((key, value)) = read("MAX_PAGE_SIZE") {
            settings.max_page_size = Some(parse(&key, &value)?);
        }

        Ok(settings)
    }

    /// The validation pipeline: blacklist first, then the time window.
    pub fn validator(&self, clock: Arc<dyn Clock>) -> Validator {
        Validator::new()
            .with_check(BlacklistCheck::from_accounts(self.blacklist.iter().cloned()))
            .with_check(TimeWindowCheck::new(self.window_start, self.window_end, clock))
    }

    pub fn cache(&self) -> Option<TransactionCache> {
        (self.cache_capacity > 0).then(|| TransactionCache::new(self.cache_capacity, self.cache_time_to_live))
    }

    /// Applies the page size limit and the cache, when configured, to `service`.
    pub fn configure<S: Storage>(&self, mut service: TransactionService<S>) -> TransactionService<S> {
        if let Some(max_page_size) = self.max_page_size {
            service = service.with_max_page_size(max_page_size);
        }

        if let Some(cache) = self.cache() {
            service = service.with_cache(cache);
        }

        service
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().with_context(|| format!("Invalid value '{value}' for {key}"))
}

fn parse_time(key: &str, value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .with_context(|| format!("Invalid time '{value}' for {key}, expected HH:MM"))
}
