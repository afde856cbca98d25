//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD`, times as `HH:MM:SS`, intervals by their
//! display names (`Daily`, `Weekly`) and ISO week numbers as decimal text.

use chrono::{NaiveDate, NaiveTime};
use habitual_core::{
  completion::CompletionRecord,
  habit::{Habit, Interval},
};

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::Decode(format!("date {s:?}: {e}")))
}

// ─── NaiveTime ───────────────────────────────────────────────────────────────

pub fn encode_time(t: NaiveTime) -> String { t.format(TIME_FORMAT).to_string() }

pub fn decode_time(s: &str) -> Result<NaiveTime> {
  NaiveTime::parse_from_str(s, TIME_FORMAT)
    .map_err(|e| Error::Decode(format!("time {s:?}: {e}")))
}

// ─── Interval ────────────────────────────────────────────────────────────────

pub fn encode_interval(i: Interval) -> &'static str {
  match i {
    Interval::Daily => "Daily",
    Interval::Weekly => "Weekly",
  }
}

pub fn decode_interval(s: &str) -> Result<Interval> {
  match s {
    "Daily" => Ok(Interval::Daily),
    "Weekly" => Ok(Interval::Weekly),
    other => Err(habitual_core::Error::UnknownInterval(other.to_owned()).into()),
  }
}

// ─── Counters ────────────────────────────────────────────────────────────────

fn decode_count(column: &str, v: i64) -> Result<u32> {
  u32::try_from(v).map_err(|_| Error::Decode(format!("{column} out of range: {v}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `habits` row.
pub struct RawHabit {
  pub name:         String,
  pub description:  String,
  pub interval:     String,
  pub created_date: String,
  pub streak_count: i64,
  pub max_streak:   i64,
}

impl RawHabit {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      name:         row.get(0)?,
      description:  row.get(1)?,
      interval:     row.get(2)?,
      created_date: row.get(3)?,
      streak_count: row.get(4)?,
      max_streak:   row.get(5)?,
    })
  }

  pub fn into_habit(self) -> Result<Habit> {
    Ok(Habit {
      interval:     decode_interval(&self.interval)?,
      created_date: decode_date(&self.created_date)?,
      streak_count: decode_count("streak_count", self.streak_count)?,
      max_streak:   decode_count("max_streak", self.max_streak)?,
      name:         self.name,
      description:  self.description,
    })
  }
}

/// Raw strings read directly from a `tracker` row.
pub struct RawCompletion {
  pub completed_date: String,
  pub completed_time: String,
  pub completed_week: String,
  pub habit_name:     String,
}

impl RawCompletion {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      completed_date: row.get(0)?,
      completed_time: row.get(1)?,
      completed_week: row.get(2)?,
      habit_name:     row.get(3)?,
    })
  }

  pub fn into_record(self) -> Result<CompletionRecord> {
    let completed_week = self
      .completed_week
      .parse::<u32>()
      .map_err(|e| Error::Decode(format!("week {:?}: {e}", self.completed_week)))?;

    Ok(CompletionRecord {
      habit_name: self.habit_name,
      completed_date: decode_date(&self.completed_date)?,
      completed_time: decode_time(&self.completed_time)?,
      completed_week,
    })
  }
}
