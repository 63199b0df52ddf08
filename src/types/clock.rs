use chrono::{DateTime, FixedOffset, Local, NaiveTime, Utc};

/// Source of the current time, injected wherever a decision depends on it.
pub trait Clock: Send + Sync + 'static {
    /// The current instant, used to stamp new transactions.
    fn now(&self) -> DateTime<Utc>;

    /// The current wall-clock time of day in the service's local zone.
    fn local_time(&self) -> NaiveTime;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_time(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// A clock frozen at a single instant. The offset of the instant is treated as the local zone.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<FixedOffset>
}

impl FixedClock {
    pub fn new(instant: DateTime<FixedOffset>) -> Self {
        Self { instant }
    }

    /// A UTC clock frozen at today's date and the given time of day.
    pub fn at(time: NaiveTime) -> Self {
        let instant = Utc::now().date_naive().and_time(time).and_utc().fixed_offset();
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant.with_timezone(&Utc)
    }

    fn local_time(&self) -> NaiveTime {
        self.instant.time()
    }
}
