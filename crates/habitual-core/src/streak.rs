//! Streak counters and the summaries derived from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::habit::{Habit, Interval};

// ─── Streak ──────────────────────────────────────────────────────────────────

/// A habit's current streak together with its all-time best.
///
/// `max >= count` holds for every value of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Streak {
  count: u32,
  max:   u32,
}

impl Streak {
  /// Build a streak, raising `max` to `count` if a caller passes a stale
  /// high-water mark.
  pub fn new(count: u32, max: u32) -> Self {
    Self { count, max: max.max(count) }
  }

  pub fn count(self) -> u32 { self.count }

  pub fn max(self) -> u32 { self.max }

  /// One more satisfied period.
  pub fn advance(self) -> Self {
    let count = self.count.saturating_add(1);
    Self { count, max: self.max.max(count) }
  }

  /// Drop the current streak; the high-water mark is kept.
  pub fn reset(self) -> Self {
    Self { count: 0, max: self.max }
  }

  pub fn state(self) -> StreakState {
    if self.count == 0 {
      StreakState::NoStreak
    } else {
      StreakState::Active
    }
  }
}

/// The two states a habit's streak moves between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakState {
  NoStreak,
  Active,
}

// ─── Completion status ───────────────────────────────────────────────────────

/// Whether the current period has been satisfied yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CompletionStatus {
  Done,
  Pending,
}

// ─── Summaries ───────────────────────────────────────────────────────────────

/// The streak figures reported for a single habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
  pub name:         String,
  pub interval:     Interval,
  pub created_date: NaiveDate,
  pub streak_count: u32,
  pub max_streak:   u32,
}

impl From<&Habit> for StreakSummary {
  fn from(habit: &Habit) -> Self {
    Self {
      name:         habit.name.clone(),
      interval:     habit.interval,
      created_date: habit.created_date,
      streak_count: habit.streak_count,
      max_streak:   habit.max_streak,
    }
  }
}

/// A habit as shown in a listing: counters after the lapse check, plus the
/// current period's status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitStatus {
  #[serde(flatten)]
  pub habit:  Habit,
  pub status: CompletionStatus,
}
