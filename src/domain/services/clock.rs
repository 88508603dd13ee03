use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Asia::Seoul;
use std::time::Instant;

/// Business timezone for all calendar math. Slot dates, week boundaries
/// and "today" are always evaluated in this zone, wherever the process runs.
pub const BUSINESS_TZ: chrono_tz::Tz = Seoul;

/// Source of "now" for date arithmetic, passed explicitly through
/// `AppState` instead of living in process-wide mutable state. A handler
/// that needs a reproducible reference instant (tests, replays) gets an
/// anchored or offset clock; production uses the system clock.
#[derive(Debug, Clone)]
pub enum Clock {
    /// Raw system time.
    System,
    /// A reference instant captured once; `now` advances from it by the
    /// monotonic elapsed time since capture.
    Anchored {
        base: DateTime<Utc>,
        captured_at: Instant,
    },
    /// A fixed delta measured once against a trusted upstream timestamp,
    /// applied on top of local time.
    Offset { offset: Duration },
}

impl Clock {
    pub fn system() -> Self {
        Clock::System
    }

    pub fn anchored(base: DateTime<Utc>) -> Self {
        Clock::Anchored {
            base,
            captured_at: Instant::now(),
        }
    }

    /// Builds an anchored clock from an untrusted RFC 3339 string.
    /// Unparseable input silently falls back to the system clock; callers
    /// are internal and a bad reference must never take the service down.
    pub fn anchored_from_str(reference: &str) -> Self {
        match DateTime::parse_from_rfc3339(reference) {
            Ok(dt) => Clock::anchored(dt.with_timezone(&Utc)),
            Err(_) => Clock::System,
        }
    }

    /// Measures the delta between a trusted reference timestamp and the
    /// local clock, captured once for the lifetime of this value.
    pub fn with_offset(reference: DateTime<Utc>) -> Self {
        Clock::Offset {
            offset: reference - Utc::now(),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Anchored { base, captured_at } => {
                let elapsed = Duration::from_std(captured_at.elapsed())
                    .unwrap_or_else(|_| Duration::zero());
                *base + elapsed
            }
            Clock::Offset { offset } => Utc::now() + *offset,
        }
    }

    /// Calendar date of `now()` in the business timezone.
    pub fn today(&self) -> NaiveDate {
        self.now().with_timezone(&BUSINESS_TZ).date_naive()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::System
    }
}
