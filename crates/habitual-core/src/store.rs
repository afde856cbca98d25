//! The `HabitStore` trait — the persistence contract the tracker consumes.
//!
//! The trait is implemented by storage backends (e.g. `habitual-store-sqlite`).
//! The streak engine never sees a store; [`crate::tracker::Tracker`] reads
//! through it, asks the engine for a decision, and writes the result back.

use std::future::Future;

use crate::{
  completion::CompletionRecord,
  habit::{Habit, HabitUpdate, Interval, NewHabit},
  streak::Streak,
};

/// Abstraction over a habit store backend.
///
/// Backends report their own error type, which must convert into
/// [`crate::Error`] so that "not found" and "already exists" conditions keep
/// their meaning at the tracker level.
///
/// The read-then-write sequences the tracker performs are not atomic across
/// calls. A backend shared between concurrent writers needs its own
/// transaction discipline.
pub trait HabitStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static + Into<crate::Error>;

  // ── Habits ────────────────────────────────────────────────────────────

  /// Persist a new habit with zeroed streak counters and today's date as
  /// `created_date`. Fails if the name is already taken.
  fn add_habit(
    &self,
    input: NewHabit,
  ) -> impl Future<Output = Result<Habit, Self::Error>> + Send + '_;

  /// Retrieve a habit by name. Returns `None` if not found.
  fn get_habit<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Habit>, Self::Error>> + Send + 'a;

  /// List habits ordered by name, optionally filtered by interval.
  fn list_habits(
    &self,
    interval: Option<Interval>,
  ) -> impl Future<Output = Result<Vec<Habit>, Self::Error>> + Send + '_;

  /// Overwrite a habit's streak counters. Fails if the habit is missing.
  fn update_streak<'a>(
    &'a self,
    name: &'a str,
    streak: Streak,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Apply a single field edit; returns the number of habits updated.
  ///
  /// Renaming carries the habit's completion history along with it.
  fn update_field<'a>(
    &'a self,
    name: &'a str,
    update: HabitUpdate,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// Remove a habit and its completion history.
  fn delete_habit<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Completion history ────────────────────────────────────────────────

  /// All completion records for one habit, oldest first.
  fn get_history<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Vec<CompletionRecord>, Self::Error>> + Send + 'a;

  /// All completion records across every habit, oldest first.
  fn list_history(
    &self,
  ) -> impl Future<Output = Result<Vec<CompletionRecord>, Self::Error>> + Send + '_;

  /// Append one record to the log. Fails if the habit is missing.
  fn append_history(
    &self,
    record: CompletionRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
