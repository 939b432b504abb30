//! SQL schema for the Hörsaal SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS lectures (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    lecture_number  INTEGER NOT NULL,
    part_number     INTEGER NOT NULL DEFAULT 1,
    given_name      TEXT    NOT NULL DEFAULT '',
    titel           TEXT    NOT NULL DEFAULT '',
    thema           TEXT    NOT NULL DEFAULT '',
    tags            TEXT,            -- JSON array of strings
    wichtig         TEXT             -- JSON array of strings
);

-- Raw speech-to-text fragments, as imported.
CREATE TABLE IF NOT EXISTS lecture_excerpts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    lecture_id  INTEGER NOT NULL REFERENCES lectures(id),
    text        TEXT    NOT NULL,
    start_time  TEXT    NOT NULL,
    end_time    TEXT    NOT NULL
);

-- Fragments merged into sentences; rebuilt wholesale by the fuser.
CREATE TABLE IF NOT EXISTS fused_lecture_excerpts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    lecture_id  INTEGER NOT NULL REFERENCES lectures(id),
    text        TEXT    NOT NULL,
    start_time  TEXT    NOT NULL,
    end_time    TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS excerpts_lecture_idx
    ON lecture_excerpts(lecture_id, start_time);
CREATE INDEX IF NOT EXISTS fused_lecture_idx
    ON fused_lecture_excerpts(lecture_id, start_time);

PRAGMA user_version = 1;
";

/// Uniqueness of `(lecture_number, part_number)`, created by the write path
/// only. Older databases may hold duplicate keys; readers must still open
/// them and serve the first row.
pub const KEY_INDEX: &str = "
CREATE UNIQUE INDEX IF NOT EXISTS lectures_key_idx
    ON lectures(lecture_number, part_number);
";
