//! `habitual` — track daily and weekly habits from the terminal.
//!
//! # Usage
//!
//! ```
//! habitual add "Drink Water" --description "One liter" --interval daily
//! habitual complete "Drink Water"
//! habitual today
//! habitual --config ~/.config/habitual/habitual.toml longest
//! ```

mod config;
mod output;

use std::{
  io::{self, BufRead, Write},
  path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use habitual_core::{
  habit::{HabitField, HabitUpdate, Interval, NewHabit},
  tracker::Tracker,
};
use habitual_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Track your habits and keep your streaks going")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "habitual.toml")]
  config: PathBuf,

  /// SQLite database file; overrides `store_path` from the config.
  #[arg(long)]
  db: Option<PathBuf>,

  /// Print results as JSON.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Add a habit to your habit list.
  Add {
    name:        String,
    #[arg(short, long, default_value = "")]
    description: String,
    /// `daily` or `weekly`.
    #[arg(short, long, default_value = "daily")]
    interval:    Interval,
  },
  /// Complete a task for a habit.
  Complete { name: String },
  /// Delete a habit and its history.
  Delete {
    name: String,
    /// Skip the confirmation prompt.
    #[arg(short, long)]
    yes:  bool,
  },
  /// Show every habit with today's completion status.
  Today,
  /// Show habits of one interval with their completion status.
  List {
    #[arg(short, long)]
    interval: Option<Interval>,
  },
  /// Show completion history for one habit, or for all of them.
  History { name: Option<String> },
  /// Show the longest streak overall, or for one habit.
  Longest { name: Option<String> },
  /// Change a habit's name, description, or interval.
  Modify {
    name:  String,
    /// `name`, `description` or `interval`.
    field: HabitField,
    value: String,
  },
  /// Add the starter habits with four weeks of history.
  Seed,
  /// Delete the database. ALL DATA WILL BE LOST.
  Reset {
    #[arg(long)]
    yes: bool,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  let mut settings = Settings::load(&cli.config)?;
  if let Some(db) = cli.db.clone() {
    settings.store_path = db;
  }

  let default_level: LevelFilter = settings
    .log_level
    .parse()
    .with_context(|| format!("invalid log_level {:?}", settings.log_level))?;
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy(),
    )
    .init();

  let mut out = io::stdout();
  if let Command::Reset { yes } = cli.command {
    return reset(&settings.store_path, yes, cli.json, &mut out);
  }

  let store = SqliteStore::open(&settings.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", settings.store_path))?;
  let tracker = Tracker::new(store);

  let now = Local::now().naive_local();
  run(&tracker, cli.command, cli.json, now, &mut out).await
}

async fn run(
  tracker: &Tracker<SqliteStore>,
  command: Command,
  json: bool,
  now: NaiveDateTime,
  out: &mut impl Write,
) -> Result<()> {
  match command {
    Command::Add { name, description, interval } => {
      let habit = tracker
        .add_habit(NewHabit::new(&name, description, interval)?)
        .await?;
      if json { output::json(out, &habit) } else { output::added(out, &habit) }
    }

    Command::Complete { name } => {
      let completion = tracker.complete(&name, now).await?;
      if json {
        output::json(out, &completion.record)
      } else {
        output::completion(out, &completion)
      }
    }

    Command::Delete { name, yes } => {
      let habit = tracker.habit(&name).await?;
      let canceled =
        !yes && !confirm(&format!("Are you sure you want to delete '{}'?", habit.name))?;
      if !canceled {
        tracker.delete(&habit.name).await?;
      }
      let deleted = output::Deleted {
        habit: &habit.name,
        deleted: !canceled,
        canceled,
      };
      if json { output::json(out, &deleted) } else { output::deleted(out, &deleted) }
    }

    Command::Today => {
      let rows = tracker.statuses(None, now.date()).await?;
      if json { output::json(out, &rows) } else { output::statuses(out, &rows) }
    }

    Command::List { interval } => {
      let rows = tracker.statuses(interval, now.date()).await?;
      if json { output::json(out, &rows) } else { output::statuses(out, &rows) }
    }

    Command::History { name } => {
      let records = tracker.history(name.as_deref()).await?;
      if json { output::json(out, &records) } else { output::history(out, &records) }
    }

    Command::Longest { name } => {
      // Bring streaks up to date before reporting them.
      tracker.statuses(None, now.date()).await?;
      let summary = tracker.longest_streak(name.as_deref()).await?;
      if json {
        output::json(out, &summary)
      } else {
        output::longest(out, summary.as_ref(), name.is_some())
      }
    }

    Command::Modify { name, field, value } => {
      let update = HabitUpdate::parse(field, &value)?;
      let updated = output::Updated {
        habit: name.trim(),
        field,
        updated: tracker.update(&name, update).await?,
      };
      if json { output::json(out, &updated) } else { output::updated(out, &updated) }
    }

    Command::Seed => {
      let seeded = tracker.seed_starter(now).await?;
      if json {
        output::json(out, &seeded)
      } else {
        writeln!(out, "Setting up starter habits...")?;
        for habit in &seeded {
          output::added(out, habit)?;
        }
        Ok(())
      }
    }

    Command::Reset { .. } => {
      anyhow::bail!("reset must run before the store is opened")
    }
  }
}

/// Remove the database file along with its WAL side files.
fn reset(store_path: &Path, yes: bool, json: bool, out: &mut impl Write) -> Result<()> {
  let canceled = !yes && !confirm("Delete the habit database? ALL DATA WILL BE LOST.")?;

  let mut removed = false;
  if !canceled {
    for suffix in ["", "-wal", "-shm"] {
      let mut path = store_path.as_os_str().to_owned();
      path.push(suffix);
      match std::fs::remove_file(&path) {
        Ok(()) => removed = true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
          return Err(e).with_context(|| format!("failed to remove {path:?}"));
        }
      }
    }
  }

  let outcome = output::Reset { path: store_path, removed, canceled };
  if json { output::json(out, &outcome) } else { output::reset(out, &outcome) }
}

/// Ask a yes/no question on stdin. The prompt goes to stderr so stdout only
/// ever carries command output.
fn confirm(question: &str) -> Result<bool> {
  let mut err = io::stderr().lock();
  write!(err, "{question} [y/N] ")?;
  err.flush()?;
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(matches!(line.trim(), "y" | "Y" | "yes" | "Yes"))
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use habitual_core::store::HabitStore as _;
  use serde_json::Value;

  use super::*;

  fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 18)
      .unwrap()
      .and_hms_opt(9, 30, 0)
      .unwrap()
  }

  async fn tracker() -> Tracker<SqliteStore> {
    Tracker::new(SqliteStore::open_in_memory().await.unwrap())
  }

  async fn run_json(tracker: &Tracker<SqliteStore>, command: Command) -> Value {
    let mut out = Vec::new();
    run(tracker, command, true, now(), &mut out).await.unwrap();
    serde_json::from_slice(&out).expect("output is a single JSON document")
  }

  fn add(name: &str) -> Command {
    Command::Add {
      name:        name.to_owned(),
      description: String::new(),
      interval:    Interval::Daily,
    }
  }

  #[tokio::test]
  async fn seed_json_is_only_the_seeded_habits() {
    let t = tracker().await;
    let v = run_json(&t, Command::Seed).await;

    let habits = v.as_array().expect("array of habits");
    assert_eq!(habits.len(), 5);
    assert_eq!(habits[0]["name"], "Drink Water");
  }

  #[tokio::test]
  async fn seed_text_announces_itself() {
    let t = tracker().await;
    let mut out = Vec::new();
    run(&t, Command::Seed, false, now(), &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Setting up starter habits..."));
    assert!(text.contains("Habit 'Walk in Nature' added (Weekly)."));
  }

  #[tokio::test]
  async fn modify_json_reports_updated_count() {
    let t = tracker().await;
    run_json(&t, add("Read")).await;

    let v = run_json(&t, Command::Modify {
      name:  "Read".into(),
      field: HabitField::Description,
      value: "x".into(),
    })
    .await;
    assert_eq!(v["habit"], "Read");
    assert_eq!(v["field"], "description");
    assert_eq!(v["updated"], 1);
  }

  #[tokio::test]
  async fn delete_json_reports_deleted_habit() {
    let t = tracker().await;
    run_json(&t, add("Read")).await;

    let v = run_json(&t, Command::Delete { name: " Read ".into(), yes: true }).await;
    assert_eq!(v["habit"], "Read");
    assert_eq!(v["deleted"], true);
    assert_eq!(v["canceled"], false);
    assert!(t.store().get_habit("Read").await.unwrap().is_none());
  }

  #[tokio::test]
  async fn complete_json_is_the_record() {
    let t = tracker().await;
    run_json(&t, add("Read")).await;

    let v = run_json(&t, Command::Complete { name: "Read".into() }).await;
    assert_eq!(v["habit_name"], "Read");
    assert_eq!(v["completed_date"], "2026-10-18");
    assert_eq!(v["completed_week"], 42);
  }

  #[test]
  fn reset_json_for_missing_database() {
    let path = std::env::temp_dir()
      .join(format!("habitual-reset-missing-{}.db", std::process::id()));
    let mut out = Vec::new();
    reset(&path, true, true, &mut out).unwrap();

    let v: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["removed"], false);
    assert_eq!(v["canceled"], false);
  }

  #[test]
  fn reset_removes_database_and_side_files() {
    let dir = std::env::temp_dir();
    let path = dir.join(format!("habitual-reset-{}.db", std::process::id()));
    let wal = dir.join(format!("habitual-reset-{}.db-wal", std::process::id()));
    std::fs::write(&path, b"").unwrap();
    std::fs::write(&wal, b"").unwrap();

    let mut out = Vec::new();
    reset(&path, true, true, &mut out).unwrap();

    let v: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["removed"], true);
    assert!(!path.exists());
    assert!(!wal.exists());
  }
}
