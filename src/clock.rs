//! Date and time sources.
//!
//! Journals never read the wall clock directly; the current date and time are
//! supplied through a [`Clock`] so "today" can be pinned in tests.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Supplies the current date and time.
pub trait Clock {
    /// The calendar date journals treat as today.
    fn today(&self) -> NaiveDate;

    /// The current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the local system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: NaiveDateTime,
}

impl FixedClock {
    pub fn new(instant: NaiveDateTime) -> Self {
        Self { instant }
    }

    /// Fixes the clock at midnight of `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self::new(date.and_time(chrono::NaiveTime::MIN))
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.instant.date()
    }

    fn now(&self) -> NaiveDateTime {
        self.instant
    }
}

/// Formats a time of day as a short entry label, e.g. `3:45 PM`.
pub fn time_label(now: &NaiveDateTime) -> String {
    now.format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_time_label_afternoon() {
        assert_eq!(time_label(&at(2024, 3, 1, 15, 45)), "3:45 PM");
    }

    #[test]
    fn test_time_label_morning_has_no_leading_zero() {
        assert_eq!(time_label(&at(2024, 3, 1, 9, 5)), "9:05 AM");
    }

    #[test]
    fn test_time_label_midnight_and_noon() {
        assert_eq!(time_label(&at(2024, 3, 1, 0, 0)), "12:00 AM");
        assert_eq!(time_label(&at(2024, 3, 1, 12, 30)), "12:30 PM");
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::new(at(2023, 12, 31, 23, 59));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(clock.now(), at(2023, 12, 31, 23, 59));

        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(time_label(&clock.now()), "12:00 AM");
    }
}
