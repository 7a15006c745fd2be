//! Time source injection.
//!
//! Several views default their period to "today". That default comes from an
//! injected [`Clock`] rather than a system-clock call buried in the logic,
//! so command behavior is deterministic under test.

use chrono::{Local, NaiveDate};

/// Provides "today" to code that defaults dates or months.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The production clock, backed by the system's local time.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a fixed date.
#[derive(Debug, Copy, Clone)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert_eq!(FixedClock(date).today(), date);
    }
}
