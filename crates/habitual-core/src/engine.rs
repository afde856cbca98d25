//! The streak engine.
//!
//! Pure functions that decide streak transitions. Nothing here touches the
//! store or reads the system clock; callers pass in the habit, its history,
//! and the current date or time, then persist whatever comes back.
//!
//! A streak survives as long as the current period or the one before it has
//! a completion. Two consecutive empty periods make it lapse.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
  Error, Result,
  completion::{CompletionRecord, completed_in},
  habit::Habit,
  period::Period,
  streak::{CompletionStatus, Streak, StreakSummary},
};

// ─── Record completion ───────────────────────────────────────────────────────

/// Outcome of [`record_completion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
  pub streak:   Streak,
  /// The log entry to append; produced whether or not the streak moved.
  pub record:   CompletionRecord,
  /// `false` when the current period was already satisfied.
  pub advanced: bool,
}

/// Apply a completion made at `now`.
///
/// The streak advances only on the first completion in the current period.
/// A record is produced either way.
pub fn record_completion(
  habit: &Habit,
  history: &[CompletionRecord],
  now: NaiveDateTime,
) -> Completion {
  let current = Period::containing(habit.interval, now.date());
  let already_completed = completed_in(history, current);

  let streak = if already_completed {
    habit.streak()
  } else {
    habit.streak().advance()
  };

  Completion {
    streak,
    record: CompletionRecord::new(habit.name.clone(), now),
    advanced: !already_completed,
  }
}

// ─── Lapse check ─────────────────────────────────────────────────────────────

/// Outcome of [`check_lapse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LapseCheck {
  pub streak: Streak,
  pub status: CompletionStatus,
  /// `true` when this check reset a non-zero streak.
  pub lapsed: bool,
}

/// Re-derive the habit's status as of `today`.
///
/// Resets the streak to zero when neither the current nor the previous
/// period has a completion. Never increments.
pub fn check_lapse(
  habit: &Habit,
  history: &[CompletionRecord],
  today: NaiveDate,
) -> LapseCheck {
  let current = Period::containing(habit.interval, today);
  let done_now = completed_in(history, current);
  let done_previous = current
    .previous()
    .is_some_and(|previous| completed_in(history, previous));

  let streak = habit.streak();
  let lapsed = streak.count() != 0 && !done_now && !done_previous;

  LapseCheck {
    streak: if lapsed { streak.reset() } else { streak },
    status: if done_now {
      CompletionStatus::Done
    } else {
      CompletionStatus::Pending
    },
    lapsed,
  }
}

// ─── Longest streak ──────────────────────────────────────────────────────────

/// Report streak figures.
///
/// With a `name`, returns that habit's summary or [`Error::NotFound`].
/// Without one, returns the habit with the highest `max_streak`; ties go to
/// the lexicographically smallest name. `None` when `habits` is empty.
pub fn longest_streak(
  habits: &[Habit],
  name: Option<&str>,
) -> Result<Option<StreakSummary>> {
  match name {
    Some(name) => habits
      .iter()
      .find(|h| h.name == name)
      .map(|h| Some(StreakSummary::from(h)))
      .ok_or_else(|| Error::NotFound(name.to_owned())),
    None => Ok(
      habits
        .iter()
        .max_by(|a, b| {
          a.max_streak
            .cmp(&b.max_streak)
            .then_with(|| b.name.cmp(&a.name))
        })
        .map(StreakSummary::from),
    ),
  }
}

#[cfg(test)]
mod tests {
  use chrono::{Days, NaiveTime};

  use super::*;
  use crate::{habit::Interval, streak::StreakState};

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn at(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::from_hms_opt(9, 30, 0).unwrap())
  }

  fn habit(name: &str, interval: Interval, count: u32, max: u32) -> Habit {
    Habit {
      name: name.into(),
      description: String::new(),
      interval,
      created_date: date(2026, 1, 1),
      streak_count: count,
      max_streak: max,
    }
  }

  fn done_on(name: &str, days: &[NaiveDate]) -> Vec<CompletionRecord> {
    days.iter().map(|d| CompletionRecord::new(name, at(*d))).collect()
  }

  // ── record_completion ───────────────────────────────────────────────────

  #[test]
  fn first_completion_starts_a_streak() {
    let today = date(2026, 10, 18);
    let h = habit("Read", Interval::Daily, 0, 0);

    let c = record_completion(&h, &[], at(today));
    assert!(c.advanced);
    assert_eq!(c.streak, Streak::new(1, 1));
    assert_eq!(c.streak.state(), StreakState::Active);
    assert_eq!(c.record.habit_name, "Read");
    assert_eq!(c.record.completed_date, today);
    assert_eq!(c.record.completed_week, 42);
  }

  #[test]
  fn second_completion_same_day_is_idempotent() {
    let today = date(2026, 10, 18);
    let h = habit("Read", Interval::Daily, 0, 0);

    let first = record_completion(&h, &[], at(today));
    let h = h.with_streak(first.streak);
    let history = vec![first.record];

    let second = record_completion(&h, &history, at(today));
    assert!(!second.advanced);
    assert_eq!(second.streak, Streak::new(1, 1));
    assert_eq!(second.record.completed_date, today);
  }

  #[test]
  fn completion_keeps_max_when_below_it() {
    let today = date(2026, 10, 18);
    let h = habit("Read", Interval::Daily, 2, 9);
    let history = done_on("Read", &[date(2026, 10, 17)]);

    let c = record_completion(&h, &history, at(today));
    assert_eq!(c.streak, Streak::new(3, 9));
  }

  #[test]
  fn weekly_completion_counts_once_per_iso_week() {
    // Monday and Sunday of 2026-W42.
    let h = habit("Hike", Interval::Weekly, 4, 4);
    let history = done_on("Hike", &[date(2026, 10, 12)]);

    let c = record_completion(&h, &history, at(date(2026, 10, 18)));
    assert!(!c.advanced);
    assert_eq!(c.streak.count(), 4);

    let next_week = record_completion(&h, &history, at(date(2026, 10, 19)));
    assert!(next_week.advanced);
    assert_eq!(next_week.streak, Streak::new(5, 5));
  }

  #[test]
  fn weekly_completion_ignores_same_week_number_last_year() {
    let h = habit("Hike", Interval::Weekly, 1, 1);
    let history = done_on("Hike", &[date(2025, 10, 15)]);

    let c = record_completion(&h, &history, at(date(2026, 10, 14)));
    assert_eq!(c.record.completed_week, history[0].completed_week);
    assert!(c.advanced);
  }

  // ── check_lapse ─────────────────────────────────────────────────────────

  #[test]
  fn daily_streak_lapses_after_two_missed_days() {
    let today = date(2026, 10, 18);
    let h = habit("Read", Interval::Daily, 5, 7);
    let history = done_on("Read", &[today - Days::new(2)]);

    let check = check_lapse(&h, &history, today);
    assert!(check.lapsed);
    assert_eq!(check.streak, Streak::new(0, 7));
    assert_eq!(check.status, CompletionStatus::Pending);
  }

  #[test]
  fn daily_streak_survives_on_yesterday() {
    let today = date(2026, 10, 18);
    let h = habit("Read", Interval::Daily, 5, 5);
    let history = done_on("Read", &[today - Days::new(1)]);

    let check = check_lapse(&h, &history, today);
    assert!(!check.lapsed);
    assert_eq!(check.streak.count(), 5);
    assert_eq!(check.status, CompletionStatus::Pending);
  }

  #[test]
  fn daily_completed_today_is_done() {
    let today = date(2026, 10, 18);
    let h = habit("Read", Interval::Daily, 1, 1);
    let history = done_on("Read", &[today]);

    let check = check_lapse(&h, &history, today);
    assert!(!check.lapsed);
    assert_eq!(check.status, CompletionStatus::Done);
  }

  #[test]
  fn zero_streak_never_reports_a_lapse() {
    let h = habit("Read", Interval::Daily, 0, 3);
    let check = check_lapse(&h, &[], date(2026, 10, 18));
    assert!(!check.lapsed);
    assert_eq!(check.streak, Streak::new(0, 3));
  }

  #[test]
  fn weekly_grace_period_is_honoured() {
    // Completed in week 10, evaluated in week 11 before any new completion.
    let h = habit("Hike", Interval::Weekly, 3, 3);
    let history = done_on("Hike", &[date(2026, 3, 4)]);

    let check = check_lapse(&h, &history, date(2026, 3, 11));
    assert!(!check.lapsed);
    assert_eq!(check.streak.count(), 3);
    assert_eq!(check.status, CompletionStatus::Pending);
  }

  #[test]
  fn weekly_streak_lapses_after_missed_week() {
    // Last completion week 9, now week 11.
    let h = habit("Hike", Interval::Weekly, 3, 6);
    let history = done_on("Hike", &[date(2026, 2, 25)]);

    let check = check_lapse(&h, &history, date(2026, 3, 11));
    assert!(check.lapsed);
    assert_eq!(check.streak, Streak::new(0, 6));
  }

  #[test]
  fn weekly_grace_spans_the_year_boundary() {
    // 2025-W52 completion keeps the streak alive during 2026-W01.
    let h = habit("Hike", Interval::Weekly, 2, 2);
    let history = done_on("Hike", &[date(2025, 12, 24)]);

    let check = check_lapse(&h, &history, date(2026, 1, 2));
    assert!(!check.lapsed);
    assert_eq!(check.streak.count(), 2);
  }

  // ── longest_streak ──────────────────────────────────────────────────────

  #[test]
  fn longest_overall_breaks_ties_by_name() {
    let habits = vec![
      habit("Walk", Interval::Weekly, 1, 8),
      habit("Read", Interval::Daily, 2, 8),
      habit("Gym", Interval::Daily, 0, 3),
    ];

    let best = longest_streak(&habits, None).unwrap().unwrap();
    assert_eq!(best.name, "Read");
    assert_eq!(best.max_streak, 8);
    assert_eq!(best.streak_count, 2);
  }

  #[test]
  fn longest_by_name_and_missing_name() {
    let habits = vec![habit("Gym", Interval::Daily, 2, 3)];

    let gym = longest_streak(&habits, Some("Gym")).unwrap().unwrap();
    assert_eq!(gym.interval, Interval::Daily);
    assert_eq!(gym.created_date, date(2026, 1, 1));

    assert!(matches!(
      longest_streak(&habits, Some("Swim")),
      Err(Error::NotFound(n)) if n == "Swim"
    ));
    assert_eq!(longest_streak(&[], None).unwrap(), None);
  }
}
