//! Lecture and excerpt records as they exist in the backing store.
//!
//! Lectures are keyed naturally by `(lecture_number, part_number)`. Excerpts
//! are transcript fragments owned by exactly one lecture.

use serde::Serialize;

// ─── Stored rows ─────────────────────────────────────────────────────────────

/// A `lectures` row. `tags` and `wichtig` are still in their encoded form;
/// see [`crate::codec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LectureRow {
  pub id:             i64,
  pub lecture_number: u32,
  pub part_number:    u32,
  pub given_name:     String,
  pub titel:          String,
  pub thema:          String,
  pub tags:           Option<String>,
  pub wichtig:        Option<String>,
}

/// A `lecture_excerpts` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Excerpt {
  pub id:         i64,
  pub lecture_id: i64,
  pub text:       String,
  pub start_time: String,
  pub end_time:   String,
}

// ─── Write-side inputs ───────────────────────────────────────────────────────

/// A lecture to be inserted. Lists are encoded by the store on write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLecture {
  pub lecture_number: u32,
  pub part_number:    u32,
  pub given_name:     String,
  pub titel:          String,
  pub thema:          String,
  pub tags:           Vec<String>,
  pub wichtig:        Vec<String>,
}

/// A transcript fragment to be attached to a lecture being inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExcerpt {
  pub text:       String,
  pub start_time: String,
  pub end_time:   String,
}

/// One lecture plus its transcript, inserted together.
#[derive(Debug, Clone)]
pub struct LectureImport {
  pub lecture:  NewLecture,
  pub excerpts: Vec<NewExcerpt>,
}

/// A sentence assembled from consecutive excerpts of one lecture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FusedExcerpt {
  pub lecture_id: i64,
  pub text:       String,
  pub start_time: String,
  pub end_time:   String,
}
