//! Habit — a named recurring task and its streak counters.
//!
//! The habit's `name` is its stable identity. Streak counters live on the
//! habit row; the completion log lives in [`crate::completion`].

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, streak::Streak};

// ─── Interval ────────────────────────────────────────────────────────────────

/// How often a habit is meant to be completed.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Interval {
  /// One completion per calendar day.
  Daily,
  /// One completion per ISO week.
  Weekly,
}

// ─── Editable fields ─────────────────────────────────────────────────────────

/// The attributes of a habit that can be edited after creation.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HabitField {
  Name,
  Description,
  Interval,
}

/// A single edit to a habit, carrying the typed replacement value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "lowercase")]
pub enum HabitUpdate {
  /// Rename the habit. Completion history follows the new name.
  Name(String),
  Description(String),
  Interval(Interval),
}

impl HabitUpdate {
  /// Build an update from a field selector and a raw string value.
  pub fn parse(field: HabitField, value: &str) -> Result<Self> {
    match field {
      HabitField::Name => Ok(Self::Name(validate_name(value)?)),
      HabitField::Description => Ok(Self::Description(value.to_owned())),
      HabitField::Interval => Interval::from_str(value)
        .map(Self::Interval)
        .map_err(|_| Error::UnknownInterval(value.to_owned())),
    }
  }

  pub fn field(&self) -> HabitField {
    match self {
      Self::Name(_) => HabitField::Name,
      Self::Description(_) => HabitField::Description,
      Self::Interval(_) => HabitField::Interval,
    }
  }
}

// ─── Habit ───────────────────────────────────────────────────────────────────

/// A tracked habit as persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
  pub name:         String,
  pub description:  String,
  pub interval:     Interval,
  /// Local calendar date the habit was added; set by the store.
  pub created_date: NaiveDate,
  /// Consecutive satisfied periods, up to and including the latest one.
  pub streak_count: u32,
  /// High-water mark of `streak_count`; never decreases.
  pub max_streak:   u32,
}

impl Habit {
  pub fn streak(&self) -> Streak {
    Streak::new(self.streak_count, self.max_streak)
  }

  /// Return a copy of this habit carrying `streak` as its counters.
  pub fn with_streak(mut self, streak: Streak) -> Self {
    self.streak_count = streak.count();
    self.max_streak = streak.max();
    self
  }
}

// ─── NewHabit ────────────────────────────────────────────────────────────────

/// Input to [`crate::store::HabitStore::add_habit`].
/// `created_date` and the streak counters are always set by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHabit {
  pub name:        String,
  pub description: String,
  pub interval:    Interval,
}

impl NewHabit {
  /// Validate and normalise the inputs; the name is trimmed and must not be
  /// empty.
  pub fn new(
    name: &str,
    description: impl Into<String>,
    interval: Interval,
  ) -> Result<Self> {
    Ok(Self {
      name: validate_name(name)?,
      description: description.into(),
      interval,
    })
  }
}

fn validate_name(name: &str) -> Result<String> {
  let trimmed = name.trim();
  if trimmed.is_empty() {
    return Err(Error::InvalidName);
  }
  Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn interval_parses_case_insensitively() {
    assert_eq!("daily".parse::<Interval>().unwrap(), Interval::Daily);
    assert_eq!("WEEKLY".parse::<Interval>().unwrap(), Interval::Weekly);
    assert!("monthly".parse::<Interval>().is_err());
    assert_eq!(Interval::Weekly.to_string(), "Weekly");
  }

  #[test]
  fn update_parse_is_typed_per_field() {
    assert_eq!(
      HabitUpdate::parse(HabitField::Interval, "weekly").unwrap(),
      HabitUpdate::Interval(Interval::Weekly),
    );
    assert!(matches!(
      HabitUpdate::parse(HabitField::Interval, "hourly"),
      Err(Error::UnknownInterval(_))
    ));
    assert!(matches!(
      HabitUpdate::parse(HabitField::Name, "   "),
      Err(Error::InvalidName)
    ));
    let update = HabitUpdate::parse(HabitField::Description, "").unwrap();
    assert_eq!(update.field(), HabitField::Description);
  }

  #[test]
  fn new_habit_trims_name() {
    let habit = NewHabit::new("  Read  ", "one chapter", Interval::Daily).unwrap();
    assert_eq!(habit.name, "Read");
    assert!(NewHabit::new("", "", Interval::Daily).is_err());
  }
}
