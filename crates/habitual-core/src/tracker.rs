//! [`Tracker`] — runs tracker operations against an injected [`HabitStore`].
//!
//! Each operation reads what it needs from the store, hands the decision to
//! [`crate::engine`], and writes the outcome back. Store failures are
//! propagated unchanged. Habit names are trimmed on the way in, matching
//! [`NewHabit::new`].

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  completion::CompletionRecord,
  engine::{self, Completion},
  habit::{Habit, HabitUpdate, Interval, NewHabit},
  starter::STARTER_HABITS,
  store::HabitStore,
  streak::{HabitStatus, StreakSummary},
};

fn lift<E: Into<Error>>(err: E) -> Error { err.into() }

/// Habit tracker operations over a store `S`.
pub struct Tracker<S> {
  store: S,
}

impl<S: HabitStore> Tracker<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub fn store(&self) -> &S { &self.store }

  /// Resolve a habit by name or fail with [`Error::NotFound`].
  pub async fn habit(&self, name: &str) -> Result<Habit> {
    let name = name.trim();
    self
      .store
      .get_habit(name)
      .await
      .map_err(lift)?
      .ok_or_else(|| Error::NotFound(name.to_owned()))
  }

  // ── Habits ────────────────────────────────────────────────────────────

  pub async fn add_habit(&self, input: NewHabit) -> Result<Habit> {
    let habit = self.store.add_habit(input).await.map_err(lift)?;
    info!(habit = %habit.name, interval = %habit.interval, "habit added");
    Ok(habit)
  }

  /// Apply a field edit; returns the number of habits updated.
  pub async fn update(&self, name: &str, update: HabitUpdate) -> Result<usize> {
    let name = name.trim();
    let field = update.field();
    let updated = self.store.update_field(name, update).await.map_err(lift)?;
    info!(habit = %name, %field, updated, "habit updated");
    Ok(updated)
  }

  pub async fn delete(&self, name: &str) -> Result<()> {
    let name = name.trim();
    self.store.delete_habit(name).await.map_err(lift)?;
    info!(habit = %name, "habit deleted");
    Ok(())
  }

  // ── Completions ───────────────────────────────────────────────────────

  /// Record a completion of `name` made at `now`.
  ///
  /// A streak that had already lapsed by `now` is reset before the
  /// completion is counted, so the completion starts a fresh streak at 1.
  pub async fn complete(&self, name: &str, now: NaiveDateTime) -> Result<Completion> {
    let name = name.trim();
    let habit = self.habit(name).await?;
    let history = self.store.get_history(name).await.map_err(lift)?;

    let lapse = engine::check_lapse(&habit, &history, now.date());
    if lapse.lapsed {
      info!(habit = %name, "streak lapsed before completion");
    }
    let habit = habit.with_streak(lapse.streak);

    let completion = engine::record_completion(&habit, &history, now);
    self
      .store
      .append_history(completion.record.clone())
      .await
      .map_err(lift)?;
    self
      .store
      .update_streak(name, completion.streak)
      .await
      .map_err(lift)?;

    if completion.advanced {
      info!(
        habit = %name,
        streak = completion.streak.count(),
        max = completion.streak.max(),
        "streak advanced"
      );
    } else {
      debug!(habit = %name, "period already completed; streak unchanged");
    }
    Ok(completion)
  }

  /// Completion history for one habit, or for every habit when `name` is
  /// `None`.
  pub async fn history(&self, name: Option<&str>) -> Result<Vec<CompletionRecord>> {
    match name.map(str::trim) {
      Some(name) => {
        self.habit(name).await?;
        self.store.get_history(name).await.map_err(lift)
      }
      None => self.store.list_history().await.map_err(lift),
    }
  }

  // ── Status ────────────────────────────────────────────────────────────

  /// The listing view: every habit (optionally of one interval) with its
  /// lapse check applied as of `today`. Resets are persisted.
  pub async fn statuses(
    &self,
    interval: Option<Interval>,
    today: NaiveDate,
  ) -> Result<Vec<HabitStatus>> {
    let habits = self.store.list_habits(interval).await.map_err(lift)?;
    let mut statuses = Vec::with_capacity(habits.len());

    for habit in habits {
      let history = self.store.get_history(&habit.name).await.map_err(lift)?;
      let check = engine::check_lapse(&habit, &history, today);

      if check.lapsed {
        self
          .store
          .update_streak(&habit.name, check.streak)
          .await
          .map_err(lift)?;
        info!(habit = %habit.name, max = check.streak.max(), "streak lapsed");
      }

      statuses.push(HabitStatus {
        habit:  habit.with_streak(check.streak),
        status: check.status,
      });
    }

    statuses.sort_by(|a, b| a.habit.name.cmp(&b.habit.name));
    Ok(statuses)
  }

  /// Streak figures for `name`, or for the habit with the best streak ever
  /// when `name` is `None`.
  pub async fn longest_streak(&self, name: Option<&str>) -> Result<Option<StreakSummary>> {
    let habits = self.store.list_habits(None).await.map_err(lift)?;
    engine::longest_streak(&habits, name.map(str::trim))
  }

  // ── Starter set ───────────────────────────────────────────────────────

  /// Add the starter habits with four weeks of history before `now`.
  ///
  /// Back-filled completions are replayed through the engine so that the
  /// stored streaks agree with the history. Starter habits whose names are
  /// already taken are skipped.
  pub async fn seed_starter(&self, now: NaiveDateTime) -> Result<Vec<Habit>> {
    let mut seeded = Vec::with_capacity(STARTER_HABITS.len());

    for starter in &STARTER_HABITS {
      let mut habit = match self.store.add_habit(starter.new_habit()?).await.map_err(lift) {
        Ok(habit) => habit,
        Err(Error::AlreadyExists(name)) => {
          warn!(habit = %name, "starter habit already exists; skipping");
          continue;
        }
        Err(e) => return Err(e),
      };

      let mut history: Vec<CompletionRecord> = Vec::new();
      for at in starter.backfill(now) {
        let completion = engine::record_completion(&habit, &history, at);
        self
          .store
          .append_history(completion.record.clone())
          .await
          .map_err(lift)?;
        history.push(completion.record);
        habit = habit.with_streak(completion.streak);
      }

      self
        .store
        .update_streak(&habit.name, habit.streak())
        .await
        .map_err(lift)?;
      info!(habit = %habit.name, streak = habit.streak_count, "starter habit seeded");
      seeded.push(habit);
    }

    Ok(seeded)
  }
}
