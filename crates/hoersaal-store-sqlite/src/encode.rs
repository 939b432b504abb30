//! Mapping between SQLite rows and the `hoersaal-core` record types.
//!
//! Column lists are kept next to their row decoders so a `SELECT` and the
//! matching `from_row` cannot drift apart.

use hoersaal_core::{
  codec,
  lecture::{Excerpt, LectureRow, NewLecture},
};

// ─── Lectures ────────────────────────────────────────────────────────────────

pub const LECTURE_COLUMNS: &str = "id, lecture_number, part_number, given_name, \
                                   titel, thema, tags, wichtig";

pub fn lecture_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<LectureRow> {
  Ok(LectureRow {
    id:             row.get(0)?,
    lecture_number: row.get(1)?,
    part_number:    row.get(2)?,
    given_name:     row.get(3)?,
    titel:          row.get(4)?,
    thema:          row.get(5)?,
    tags:           row.get(6)?,
    wichtig:        row.get(7)?,
  })
}

/// Column values for inserting a [`NewLecture`], lists already encoded.
pub struct EncodedLecture {
  pub lecture_number: u32,
  pub part_number:    u32,
  pub given_name:     String,
  pub titel:          String,
  pub thema:          String,
  pub tags:           String,
  pub wichtig:        String,
}

impl From<NewLecture> for EncodedLecture {
  fn from(l: NewLecture) -> Self {
    Self {
      lecture_number: l.lecture_number,
      part_number:    l.part_number,
      tags:           codec::encode(&l.tags),
      wichtig:        codec::encode(&l.wichtig),
      given_name:     l.given_name,
      titel:          l.titel,
      thema:          l.thema,
    }
  }
}

// ─── Excerpts ────────────────────────────────────────────────────────────────

pub const EXCERPT_COLUMNS: &str = "id, lecture_id, text, start_time, end_time";

pub fn excerpt_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Excerpt> {
  Ok(Excerpt {
    id:         row.get(0)?,
    lecture_id: row.get(1)?,
    text:       row.get(2)?,
    start_time: row.get(3)?,
    end_time:   row.get(4)?,
  })
}
