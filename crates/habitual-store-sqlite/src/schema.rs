//! SQL schema for the Habitual SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS habits (
    name          TEXT PRIMARY KEY,
    description   TEXT NOT NULL DEFAULT '',
    interval      TEXT NOT NULL,                -- 'Daily' | 'Weekly'
    created_date  TEXT NOT NULL,                -- YYYY-MM-DD, local date
    streak_count  INTEGER NOT NULL DEFAULT 0,
    max_streak    INTEGER NOT NULL DEFAULT 0,
    CHECK (streak_count >= 0),
    CHECK (max_streak >= streak_count)
);

-- Completion log; rows are only ever inserted by the tracker.
-- Renames and deletes of the owning habit cascade here.
CREATE TABLE IF NOT EXISTS tracker (
    completed_date  TEXT NOT NULL,              -- YYYY-MM-DD
    completed_time  TEXT NOT NULL,              -- HH:MM:SS
    completed_week  TEXT NOT NULL,              -- ISO week number
    habit_name      TEXT NOT NULL
                    REFERENCES habits(name) ON UPDATE CASCADE ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS tracker_habit_idx ON tracker(habit_name);
CREATE INDEX IF NOT EXISTS tracker_date_idx  ON tracker(completed_date);

PRAGMA user_version = 1;
";
