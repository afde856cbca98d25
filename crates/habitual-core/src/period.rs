//! Periods — the time buckets a completion satisfies.
//!
//! A daily habit's period is a calendar day; a weekly habit's period is a
//! year-qualified ISO week. Stepping back one period always goes through
//! date arithmetic, so the week before 2026-W01 is 2025-W52 rather than a
//! nonexistent "week 0".

use std::fmt;

use chrono::{Datelike, Days, IsoWeek, NaiveDate, Weekday};

use crate::habit::Interval;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Period {
  Day(NaiveDate),
  Week(IsoWeek),
}

impl Period {
  /// The period of `interval` that contains `date`.
  pub fn containing(interval: Interval, date: NaiveDate) -> Self {
    match interval {
      Interval::Daily => Self::Day(date),
      Interval::Weekly => Self::Week(date.iso_week()),
    }
  }

  pub fn interval(self) -> Interval {
    match self {
      Self::Day(_) => Interval::Daily,
      Self::Week(_) => Interval::Weekly,
    }
  }

  /// The first calendar day of the period.
  pub fn start(self) -> Option<NaiveDate> {
    match self {
      Self::Day(date) => Some(date),
      Self::Week(week) => {
        NaiveDate::from_isoywd_opt(week.year(), week.week(), Weekday::Mon)
      }
    }
  }

  /// The period immediately before this one. `None` only at the edge of
  /// chrono's representable range.
  pub fn previous(self) -> Option<Self> {
    let start = self.start()?;
    let step = match self {
      Self::Day(_) => Days::new(1),
      Self::Week(_) => Days::new(7),
    };
    let earlier = start.checked_sub_days(step)?;
    Some(Self::containing(self.interval(), earlier))
  }

  pub fn contains(self, date: NaiveDate) -> bool {
    Self::containing(self.interval(), date) == self
  }
}

impl fmt::Display for Period {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Day(date) => write!(f, "{date}"),
      Self::Week(week) => write!(f, "{}-W{:02}", week.year(), week.week()),
    }
  }
}
