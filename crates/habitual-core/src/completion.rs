//! Completion records — the append-only log of "I did it" events.
//!
//! Records are never updated or deleted by the tracker. Several records may
//! share a period; only the first one in a period advances the streak.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::period::Period;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
  pub habit_name:     String,
  pub completed_date: NaiveDate,
  /// Informational only; no streak logic reads it.
  pub completed_time: NaiveTime,
  /// ISO week number of `completed_date`, fixed at insertion.
  pub completed_week: u32,
}

impl CompletionRecord {
  /// Build a record for a completion at `at` (local wall-clock time).
  /// The time is kept to whole seconds.
  pub fn new(habit_name: impl Into<String>, at: NaiveDateTime) -> Self {
    let time = at.time();
    Self {
      habit_name:     habit_name.into(),
      completed_date: at.date(),
      completed_time: time.with_nanosecond(0).unwrap_or(time),
      completed_week: at.date().iso_week().week(),
    }
  }
}

/// Whether any record in `history` falls within `period`.
pub fn completed_in(history: &[CompletionRecord], period: Period) -> bool {
  history.iter().any(|r| period.contains(r.completed_date))
}
