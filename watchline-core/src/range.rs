//! The calendar span covered by the timeline.

use chrono::{Datelike, Duration, NaiveDate, Utc};

use crate::event::Event;

/// Whole-day span `[start, end)` with `total_days = end - start >= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimelineRange {
    start: NaiveDate,
    end: NaiveDate,
    total_days: i64,
}

impl TimelineRange {
    /// Build a range; `end` earlier than or equal to `start` still yields one day.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let total_days = (end - start).num_days().max(1);
        Self {
            start,
            end,
            total_days,
        }
    }

    /// Earliest to latest event date, widened by `pad_days` on both sides.
    /// Returns `None` when there are no events.
    pub fn from_events(events: &[Event], pad_days: i64) -> Option<Self> {
        let min = events.iter().map(|e| e.date).min()?;
        let max = events.iter().map(|e| e.date).max()?;
        let pad = Duration::days(pad_days);
        Some(Self::new(min - pad, max + pad))
    }

    /// Jan 1 of `year` up to (not including) Jan 1 of the next year, so every
    /// day of the year through Dec 31 is covered.
    pub fn full_year(year: i32) -> Self {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
        let end = NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap_or(NaiveDate::MAX);
        Self::new(start, end)
    }

    /// Fallback range used when no events are available.
    pub fn current_year() -> Self {
        Self::full_year(Utc::now().year())
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn total_days(&self) -> i64 {
        self.total_days
    }

    /// Signed number of days from the range start to `date`.
    pub fn days_from_start(&self, date: NaiveDate) -> f64 {
        (date - self.start).num_days() as f64
    }

    /// Date `offset` whole days after the start (negative allowed).
    pub fn date_at(&self, offset: i64) -> Option<NaiveDate> {
        self.start.checked_add_signed(Duration::try_days(offset)?)
    }

    /// First day of every month touching the range, through the first day of
    /// the month after the one containing `end`.
    pub fn month_starts(&self) -> MonthStarts {
        let first = self.start.with_day(1).unwrap_or(self.start);
        let last = first_of_next_month(self.end.with_day(1).unwrap_or(self.end));
        MonthStarts {
            next: Some(first),
            last,
        }
    }
}

/// Iterator over month boundaries, see [`TimelineRange::month_starts`].
#[derive(Clone, Debug)]
pub struct MonthStarts {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl Iterator for MonthStarts {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        if current > self.last {
            self.next = None;
            return None;
        }
        self.next = Some(first_of_next_month(current));
        Some(current)
    }
}

fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX)
}
