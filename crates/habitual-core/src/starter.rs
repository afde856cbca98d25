//! Starter habits offered to a fresh tracker, with back-filled history.

use chrono::{Days, NaiveDateTime};

use crate::{
  Result,
  habit::{Interval, NewHabit},
};

const BACKFILL_DAYS: u64 = 28;
const BACKFILL_WEEKS: u64 = 4;

#[derive(Debug, Clone, Copy)]
pub struct StarterHabit {
  pub name:        &'static str,
  pub description: &'static str,
  pub interval:    Interval,
}

pub const STARTER_HABITS: [StarterHabit; 5] = [
  StarterHabit {
    name:        "Drink Water",
    description: "One Liter",
    interval:    Interval::Daily,
  },
  StarterHabit {
    name:        "Read",
    description: "One Chapter",
    interval:    Interval::Daily,
  },
  StarterHabit {
    name:        "Exercise",
    description: "Thirty Minutes",
    interval:    Interval::Daily,
  },
  StarterHabit {
    name:        "Meditate",
    description: "Twenty Minutes",
    interval:    Interval::Daily,
  },
  StarterHabit {
    name:        "Walk in Nature",
    description: "One Hour",
    interval:    Interval::Weekly,
  },
];

impl StarterHabit {
  pub fn new_habit(&self) -> Result<NewHabit> {
    NewHabit::new(self.name, self.description, self.interval)
  }

  /// Completion times covering the four weeks before `now`, oldest first.
  /// The current period is left open.
  pub fn backfill(&self, now: NaiveDateTime) -> Vec<NaiveDateTime> {
    let offsets: Vec<u64> = match self.interval {
      Interval::Daily => (1..=BACKFILL_DAYS).rev().collect(),
      Interval::Weekly => (1..=BACKFILL_WEEKS).rev().map(|w| w * 7).collect(),
    };
    offsets
      .into_iter()
      .filter_map(|days| now.checked_sub_days(Days::new(days)))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  #[test]
  fn backfill_stops_before_the_current_period() {
    let now = NaiveDate::from_ymd_opt(2026, 10, 18)
      .unwrap()
      .and_hms_opt(8, 0, 0)
      .unwrap();

    let daily = STARTER_HABITS[0].backfill(now);
    assert_eq!(daily.len(), 28);
    assert!(daily.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(daily.last().unwrap().date(), now.date().pred_opt().unwrap());

    let weekly = STARTER_HABITS[4].backfill(now);
    assert_eq!(weekly.len(), 4);
    assert_eq!(
      weekly.first().unwrap().date(),
      NaiveDate::from_ymd_opt(2026, 9, 20).unwrap()
    );
  }
}
