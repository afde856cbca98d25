//! [`SqliteStore`] — the SQLite implementation of [`HabitStore`].

use std::path::Path;

use chrono::Local;
use rusqlite::OptionalExtension as _;

use habitual_core::{
  completion::CompletionRecord,
  habit::{Habit, HabitUpdate, Interval, NewHabit},
  store::HabitStore,
  streak::Streak,
};

use crate::{
  Error, Result,
  encode::{
    RawCompletion, RawHabit, encode_date, encode_interval, encode_time,
  },
  schema::SCHEMA,
};

const HABIT_COLUMNS: &str =
  "name, description, interval, created_date, streak_count, max_streak";

const TRACKER_COLUMNS: &str =
  "completed_date, completed_time, completed_week, habit_name";

/// Whether `err` is the given SQLite extended constraint code.
fn is_constraint(err: &rusqlite::Error, extended: i32) -> bool {
  matches!(
    err,
    rusqlite::Error::SqliteFailure(e, _) if e.extended_code == extended
  )
}

fn is_duplicate_name(err: &rusqlite::Error) -> bool {
  is_constraint(err, rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
}

fn is_missing_habit(err: &rusqlite::Error) -> bool {
  is_constraint(err, rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY)
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A habit store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("habit store schema ready");
    Ok(())
  }

  async fn query_history(&self, name: Option<String>) -> Result<Vec<CompletionRecord>> {
    let raws: Vec<RawCompletion> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(name) = name {
          let mut stmt = conn.prepare(&format!(
            "SELECT {TRACKER_COLUMNS} FROM tracker WHERE habit_name = ?1
             ORDER BY completed_date, completed_time"
          ))?;
          stmt
            .query_map(rusqlite::params![name], RawCompletion::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {TRACKER_COLUMNS} FROM tracker
             ORDER BY completed_date, completed_time, habit_name"
          ))?;
          stmt
            .query_map([], RawCompletion::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCompletion::into_record).collect()
  }
}

// ─── HabitStore impl ─────────────────────────────────────────────────────────

impl HabitStore for SqliteStore {
  type Error = Error;

  // ── Habits ────────────────────────────────────────────────────────────────

  async fn add_habit(&self, input: NewHabit) -> Result<Habit> {
    let habit = Habit {
      name:         input.name,
      description:  input.description,
      interval:     input.interval,
      created_date: Local::now().date_naive(),
      streak_count: 0,
      max_streak:   0,
    };

    let name         = habit.name.clone();
    let description  = habit.description.clone();
    let interval_str = encode_interval(habit.interval);
    let date_str     = encode_date(habit.created_date);

    let inserted = self
      .conn
      .call(move |conn| {
        match conn.execute(
          &format!(
            "INSERT INTO habits ({HABIT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, 0, 0)"
          ),
          rusqlite::params![name, description, interval_str, date_str],
        ) {
          Ok(_) => Ok(true),
          Err(e) if is_duplicate_name(&e) => Ok(false),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    if !inserted {
      return Err(Error::AlreadyExists(habit.name));
    }
    Ok(habit)
  }

  async fn get_habit(&self, name: &str) -> Result<Option<Habit>> {
    let name = name.to_owned();

    let raw: Option<RawHabit> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {HABIT_COLUMNS} FROM habits WHERE name = ?1"),
              rusqlite::params![name],
              RawHabit::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawHabit::into_habit).transpose()
  }

  async fn list_habits(&self, interval: Option<Interval>) -> Result<Vec<Habit>> {
    let interval_str = interval.map(encode_interval);

    let raws: Vec<RawHabit> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(i) = interval_str {
          let mut stmt = conn.prepare(&format!(
            "SELECT {HABIT_COLUMNS} FROM habits WHERE interval = ?1 ORDER BY name"
          ))?;
          stmt
            .query_map(rusqlite::params![i], RawHabit::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn
            .prepare(&format!("SELECT {HABIT_COLUMNS} FROM habits ORDER BY name"))?;
          stmt
            .query_map([], RawHabit::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawHabit::into_habit).collect()
  }

  async fn update_streak(&self, name: &str, streak: Streak) -> Result<()> {
    let name_owned = name.to_owned();
    let count      = i64::from(streak.count());
    let max        = i64::from(streak.max());

    let updated = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE habits SET streak_count = ?1, max_streak = ?2 WHERE name = ?3",
          rusqlite::params![count, max, name_owned],
        )?)
      })
      .await?;

    if updated == 0 {
      return Err(Error::HabitNotFound(name.to_owned()));
    }
    Ok(())
  }

  async fn update_field(&self, name: &str, update: HabitUpdate) -> Result<usize> {
    let name_owned = name.to_owned();
    let new_name = match &update {
      HabitUpdate::Name(n) => Some(n.clone()),
      _ => None,
    };

    // `None` signals a primary-key clash on rename.
    let updated: Option<usize> = self
      .conn
      .call(move |conn| {
        let result = match update {
          HabitUpdate::Name(value) => conn.execute(
            "UPDATE habits SET name = ?1 WHERE name = ?2",
            rusqlite::params![value, name_owned],
          ),
          HabitUpdate::Description(value) => conn.execute(
            "UPDATE habits SET description = ?1 WHERE name = ?2",
            rusqlite::params![value, name_owned],
          ),
          HabitUpdate::Interval(value) => conn.execute(
            "UPDATE habits SET interval = ?1 WHERE name = ?2",
            rusqlite::params![encode_interval(value), name_owned],
          ),
        };
        match result {
          Ok(n) => Ok(Some(n)),
          Err(e) if is_duplicate_name(&e) => Ok(None),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    match updated {
      None => Err(Error::AlreadyExists(new_name.unwrap_or_default())),
      Some(0) => Err(Error::HabitNotFound(name.to_owned())),
      Some(n) => Ok(n),
    }
  }

  async fn delete_habit(&self, name: &str) -> Result<()> {
    let name_owned = name.to_owned();

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM habits WHERE name = ?1",
          rusqlite::params![name_owned],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(Error::HabitNotFound(name.to_owned()));
    }
    Ok(())
  }

  // ── Completion history ────────────────────────────────────────────────────

  async fn get_history(&self, name: &str) -> Result<Vec<CompletionRecord>> {
    self.query_history(Some(name.to_owned())).await
  }

  async fn list_history(&self) -> Result<Vec<CompletionRecord>> {
    self.query_history(None).await
  }

  async fn append_history(&self, record: CompletionRecord) -> Result<()> {
    let date_str = encode_date(record.completed_date);
    let time_str = encode_time(record.completed_time);
    let week_str = record.completed_week.to_string();
    let name     = record.habit_name.clone();

    let inserted = self
      .conn
      .call(move |conn| {
        match conn.execute(
          &format!("INSERT INTO tracker ({TRACKER_COLUMNS}) VALUES (?1, ?2, ?3, ?4)"),
          rusqlite::params![date_str, time_str, week_str, name],
        ) {
          Ok(_) => Ok(true),
          Err(e) if is_missing_habit(&e) => Ok(false),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    if !inserted {
      return Err(Error::HabitNotFound(record.habit_name));
    }
    Ok(())
  }
}
