//! Plain-text and JSON rendering of tracker results.
//!
//! Everything goes to the writer handed in by the caller; with `--json` that
//! writer carries exactly one JSON document per command.

use std::{io::Write, path::Path};

use habitual_core::{
  completion::CompletionRecord,
  engine::Completion,
  habit::{Habit, HabitField},
  streak::{CompletionStatus, HabitStatus, StreakSummary},
};
use serde::Serialize;

type Result<T = ()> = anyhow::Result<T>;

// ─── JSON shapes ──────────────────────────────────────────────────────────────

/// Result of `habitual modify`.
#[derive(Debug, Serialize)]
pub struct Updated<'a> {
  pub habit:   &'a str,
  pub field:   HabitField,
  pub updated: usize,
}

/// Result of `habitual delete`.
#[derive(Debug, Serialize)]
pub struct Deleted<'a> {
  pub habit:    &'a str,
  pub deleted:  bool,
  pub canceled: bool,
}

/// Result of `habitual reset`.
#[derive(Debug, Serialize)]
pub struct Reset<'a> {
  pub path:     &'a Path,
  pub removed:  bool,
  pub canceled: bool,
}

/// Write `value` as pretty JSON followed by a newline.
pub fn json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result {
  serde_json::to_writer_pretty(&mut *out, value)?;
  writeln!(out)?;
  Ok(())
}

// ─── Text ─────────────────────────────────────────────────────────────────────

fn mark(status: CompletionStatus) -> &'static str {
  match status {
    CompletionStatus::Done => "\u{2714}",
    CompletionStatus::Pending => "\u{2718}",
  }
}

pub fn statuses(out: &mut impl Write, rows: &[HabitStatus]) -> Result {
  if rows.is_empty() {
    writeln!(out, "No habits to display. Add one with `habitual add`.")?;
    return Ok(());
  }
  let width = rows
    .iter()
    .map(|r| r.habit.name.chars().count())
    .max()
    .unwrap_or(0)
    .max("Habit".len());

  writeln!(
    out,
    "   {:<width$}  {:<7}  {:<10}  {:>6}  {:>4}  Description",
    "Habit", "Every", "Since", "Streak", "Best"
  )?;
  for row in rows {
    let h = &row.habit;
    writeln!(
      out,
      "{}  {:<width$}  {:<7}  {:<10}  {:>6}  {:>4}  {}",
      mark(row.status),
      h.name,
      h.interval.to_string(),
      h.created_date.to_string(),
      h.streak_count,
      h.max_streak,
      h.description,
    )?;
  }
  Ok(())
}

pub fn history(out: &mut impl Write, records: &[CompletionRecord]) -> Result {
  if records.is_empty() {
    writeln!(out, "No completions recorded yet.")?;
    return Ok(());
  }
  writeln!(out, "{:<10}  {:<8}  {:>4}  Habit", "Date", "Time", "Week")?;
  for r in records {
    writeln!(
      out,
      "{:<10}  {:<8}  {:>4}  {}",
      r.completed_date.to_string(),
      r.completed_time.to_string(),
      r.completed_week,
      r.habit_name,
    )?;
  }
  Ok(())
}

pub fn added(out: &mut impl Write, habit: &Habit) -> Result {
  writeln!(out, "Habit '{}' added ({}).", habit.name, habit.interval)?;
  Ok(())
}

pub fn completion(out: &mut impl Write, completion: &Completion) -> Result {
  let name = &completion.record.habit_name;
  if completion.advanced {
    writeln!(
      out,
      "Completed '{name}'. Streak is now {} (best {}).",
      completion.streak.count(),
      completion.streak.max()
    )?;
  } else {
    writeln!(
      out,
      "Completed '{name}' again; this period already counts. Streak stays at {}.",
      completion.streak.count()
    )?;
  }
  Ok(())
}

pub fn longest(out: &mut impl Write, summary: Option<&StreakSummary>, named: bool) -> Result {
  let Some(s) = summary else {
    writeln!(out, "No habits to display. Add one with `habitual add`.")?;
    return Ok(());
  };
  let interval = s.interval.to_string().to_uppercase();
  if named {
    writeln!(
      out,
      "'{}' -- {interval}: the longest streak for this habit is {}.",
      s.name, s.max_streak
    )?;
  } else {
    writeln!(
      out,
      "Your longest streak is {}, for habit '{}', which should be completed {interval}.",
      s.max_streak, s.name
    )?;
  }
  writeln!(
    out,
    "You started this habit on {} and the current streak is {}.",
    s.created_date, s.streak_count
  )?;
  Ok(())
}

pub fn updated(out: &mut impl Write, u: &Updated<'_>) -> Result {
  writeln!(out, "Updated {} record(s) successfully.", u.updated)?;
  Ok(())
}

pub fn deleted(out: &mut impl Write, d: &Deleted<'_>) -> Result {
  if d.canceled {
    writeln!(out, "Action canceled.")?;
  } else {
    writeln!(out, "Habit '{}' deleted.", d.habit)?;
  }
  Ok(())
}

pub fn reset(out: &mut impl Write, r: &Reset<'_>) -> Result {
  if r.canceled {
    writeln!(out, "Action canceled.")?;
  } else if r.removed {
    writeln!(out, "Habit database removed.")?;
  } else {
    writeln!(out, "No habit database at {}.", r.path.display())?;
  }
  Ok(())
}
