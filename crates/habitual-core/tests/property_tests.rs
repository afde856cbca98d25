//! Property-based tests for the streak engine.
//!
//! Random sequences of completions and lapse checks are driven through the
//! engine, checking the counter invariants after every step.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use habitual_core::{
  completion::CompletionRecord,
  engine::{check_lapse, record_completion},
  habit::{Habit, Interval},
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
  /// Advance the clock by this many days, then complete.
  Complete(u8),
  /// Advance the clock by this many days, then run a lapse check.
  Check(u8),
}

prop_compose! {
  fn arbitrary_step()(kind in 0..2u8, days in 0..10u8) -> Step {
    if kind == 0 { Step::Complete(days) } else { Step::Check(days) }
  }
}

prop_compose! {
  fn arbitrary_interval()(weekly in any::<bool>()) -> Interval {
    if weekly { Interval::Weekly } else { Interval::Daily }
  }
}

fn start() -> NaiveDateTime {
  NaiveDate::from_ymd_opt(2025, 12, 1)
    .unwrap()
    .and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap())
}

fn fresh(interval: Interval) -> Habit {
  Habit {
    name: "Prop".into(),
    description: String::new(),
    interval,
    created_date: start().date(),
    streak_count: 0,
    max_streak: 0,
  }
}

proptest! {
  #[test]
  fn max_streak_never_below_streak_count(
    interval in arbitrary_interval(),
    steps in prop::collection::vec(arbitrary_step(), 1..60),
  ) {
    let mut habit = fresh(interval);
    let mut history: Vec<CompletionRecord> = Vec::new();
    let mut now = start();
    let mut best = 0;

    for step in steps {
      match step {
        Step::Complete(days) => {
          now = now.checked_add_days(Days::new(days.into())).unwrap();
          let c = record_completion(&habit, &history, now);
          history.push(c.record);
          habit = habit.with_streak(c.streak);
        }
        Step::Check(days) => {
          now = now.checked_add_days(Days::new(days.into())).unwrap();
          let check = check_lapse(&habit, &history, now.date());
          habit = habit.with_streak(check.streak);
        }
      }
      prop_assert!(habit.max_streak >= habit.streak_count);
      prop_assert!(habit.max_streak >= best);
      best = habit.max_streak;
    }
  }

  #[test]
  fn repeated_completion_in_one_period_is_idempotent(
    interval in arbitrary_interval(),
    count in 0..50u32,
    extra in 0..50u32,
    repeats in 1..5usize,
  ) {
    let mut habit = fresh(interval);
    habit.streak_count = count;
    habit.max_streak = count + extra;

    let now = start();
    let first = record_completion(&habit, &[], now);
    prop_assert!(first.advanced);
    prop_assert_eq!(first.streak.count(), count + 1);

    let mut history = vec![first.record];
    habit = habit.with_streak(first.streak);
    for _ in 0..repeats {
      let again = record_completion(&habit, &history, now);
      prop_assert!(!again.advanced);
      prop_assert_eq!(again.streak, first.streak);
      history.push(again.record);
    }
    prop_assert_eq!(history.len(), repeats + 1);
  }

  #[test]
  fn lapse_check_never_increments(
    interval in arbitrary_interval(),
    count in 0..50u32,
    gap in 0..30u64,
  ) {
    let mut habit = fresh(interval);
    habit.streak_count = count;
    habit.max_streak = count;
    let history = vec![CompletionRecord::new("Prop", start())];

    let today = start().date().checked_add_days(Days::new(gap)).unwrap();
    let check = check_lapse(&habit, &history, today);
    prop_assert!(check.streak.count() <= count);
    prop_assert_eq!(check.streak.max(), count);
  }
}
