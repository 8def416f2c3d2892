//! Injectable sources of identifiers and wall-clock time.
//!
//! The reducer is otherwise pure; ID generation and the current time are
//! read through [`Environment`] so tests can pin both.

use chrono::{DateTime, FixedOffset, Local, SecondsFormat, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Produces unique opaque identifiers.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic identifiers: `id-1`, `id-2`, ...
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::with_prefix("id")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, n)
    }
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// The local system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Parses an RFC 3339 timestamp such as `2024-03-01T10:00:00+00:00`.
    pub fn at(rfc3339: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(rfc3339).map(Self::new)
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = *guard + by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Everything the reducer reads from the outside world.
#[derive(Clone)]
pub struct Environment {
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("ids", &"<dyn IdGenerator>")
            .field("clock", &"<dyn Clock>")
            .finish()
    }
}

impl Environment {
    pub fn new(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self { ids, clock }
    }

    /// UUID identifiers and the local system clock.
    pub fn system() -> Self {
        Self::new(Arc::new(UuidGenerator), Arc::new(SystemClock))
    }

    pub fn next_id(&self) -> String {
        self.ids.next_id()
    }

    /// Current time as an RFC 3339 UTC timestamp with millisecond precision.
    pub fn timestamp(&self) -> String {
        self.clock
            .now()
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Today's calendar date (`YYYY-MM-DD`) in the clock's own offset.
    pub fn today(&self) -> String {
        self.clock.now().format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIdGenerator::new();
        assert_eq!(ids.next_id(), "id-1");
        assert_eq!(ids.next_id(), "id-2");

        let days = SequentialIdGenerator::with_prefix("day");
        assert_eq!(days.next_id(), "day-1");
    }

    #[test]
    fn test_uuid_ids_are_unique() {
        let ids = UuidGenerator;
        assert_ne!(ids.next_id(), ids.next_id());
    }

    #[test]
    fn test_timestamp_and_date_from_fixed_clock() {
        let clock = FixedClock::at("2024-03-01T23:30:00-05:00").unwrap();
        let env = Environment::new(Arc::new(SequentialIdGenerator::new()), Arc::new(clock));

        assert_eq!(env.timestamp(), "2024-03-02T04:30:00.000Z");
        // The calendar date follows the clock's local offset, not UTC.
        assert_eq!(env.today(), "2024-03-01");
    }

    #[test]
    fn test_fixed_clock_advance() {
        let clock = FixedClock::at("2024-03-01T10:00:00+00:00").unwrap();
        clock.advance(chrono::Duration::minutes(45));
        assert_eq!(
            clock.now().to_rfc3339(),
            "2024-03-01T10:45:00+00:00"
        );
    }
}
