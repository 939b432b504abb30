//! The `LectureStore` trait.
//!
//! Implemented by storage backends (e.g. `hoersaal-store-sqlite`). The
//! resolver depends on this abstraction only, so tests can substitute an
//! in-memory double.

use std::future::Future;

use thiserror::Error;

use crate::lecture::{Excerpt, LectureRow};

/// Read-only access to lectures and their excerpts.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait LectureStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Look up the lecture with the given natural key. Returns `None` if no
  /// row matches.
  fn find_lecture(
    &self,
    number: u32,
    part: u32,
  ) -> impl Future<Output = Result<Option<LectureRow>, Self::Error>> + Send + '_;

  /// All excerpts of a lecture, ordered by start time then insertion order.
  ///
  /// `lecture_id` must come from a row returned by
  /// [`find_lecture`](Self::find_lecture). An empty list is a valid answer.
  fn find_excerpts(
    &self,
    lecture_id: i64,
  ) -> impl Future<Output = Result<Vec<Excerpt>, Self::Error>> + Send + '_;
}

/// The store returned an excerpt that belongs to a different lecture.
#[derive(Debug, Error)]
#[error("excerpt {excerpt_id} belongs to lecture {actual}, expected {expected}")]
pub struct ForeignExcerpt {
  pub excerpt_id: i64,
  pub expected:   i64,
  pub actual:     i64,
}
